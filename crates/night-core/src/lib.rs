/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all night libraries
//!
//! This crate provides a set of core routines shared
//! by the decoders, encoders and the font engine
//!
//! It currently contains
//!
//! - A bounds checked bytestream reader with endian aware reads
//! - A sink trait and a buffered, endian aware writer on top of it
//! - Image decoder and encoder options
//! - The [`PixelBuffer`](pixels::PixelBuffer) type every decoder produces
//! - Logging macros which compile to nothing when the `log` feature is off
//!
//! This library is `#[no_std]` with `alloc` needed for defining `Vec`
//! which we need for storing decoded bytes.
//!
//! # Features
//!  - `std`: Implements `std::error::Error` for the error types.
//!
//!  - `log`: Routes the [`log`] macros to the `log` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod log;
pub mod options;
pub mod pixels;
