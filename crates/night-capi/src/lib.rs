/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! C bindings to the night image codecs and font rasterizer
//!
//! The exported functions follow `include/night_platform.h`.
//!
//! Failures never cross the boundary as panics, every entry point
//! catches unwinding and reports failure through its return value
//! (null, false or zeroed outputs).
//!
//! Pixel buffers returned by `NightImageLoad` are allocated with
//! `libc::malloc` and are released by `NightImageFree`.
//!
//! A `NightFont` borrows the bytes it was created from, they must stay
//! alive and unmodified until `NightFontFree` is called.
#![allow(non_snake_case, clippy::missing_safety_doc)]
#![warn(unsafe_op_in_unsafe_fn)]

pub use crate::enums::NightImageWriteFormat;
pub use crate::font::*;
pub use crate::image::*;

mod enums;
mod font;
mod image;
mod utils;

/// Boolean as seen by C, 0 is false, everything else true
pub type NightBool = u8;

pub const NIGHT_FALSE: NightBool = 0;
pub const NIGHT_TRUE: NightBool = 1;
