/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A small BMP decoder
//!
//! # Supported formats
//! - Paletted images (1 bit, 4 bits and 8 bits)
//! - 16, 24 and 32 bit images
//! - Masked images (`BI_BITFIELDS`, 16 bit and 32 bit formats)
//!
//! Pixels always come out as RGBA.
//!
//! # Unsupported formats
//! - RLE compressed images
//! - Embedded PNG and JPEGs
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use crate::decoder::{probe_bmp, BmpDecoder};
pub use crate::errors::BmpDecoderErrors;

mod common;
mod decoder;
mod errors;
mod utils;
