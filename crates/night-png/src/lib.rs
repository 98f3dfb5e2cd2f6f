/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A png decoder and encoder
//!
//! The decoder accepts every standard colour type and bit depth,
//! palettes, tRNS transparency and Adam7 interlacing, and always
//! produces 8 bit RGBA pixels.
//!
//! The encoder writes non-interlaced 8 bit RGBA images.
//!
//! # Features
//! - `crc`: Confirm chunk checksums while decoding, can also be turned off at runtime
//! - `log`: Log decoding progress through the `log` crate
//! - `std`: Implement `std::error::Error` for the error types
//!
//! # Example
//! ```no_run
//! use night_png::PngDecoder;
//! let data = std::fs::read("image.png").unwrap();
//! let mut decoder = PngDecoder::new(&data);
//! let pixels = decoder.decode_rgba().unwrap();
//! println!("{:?}", pixels.dimensions());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use decoder::{PngDecoder, PngInfo};
pub use encoder::PngEncoder;
pub use enums::{InterlaceMethod, PngColor};
pub use error::{PngDecodeErrors, PngEncodeErrors};

mod constants;
mod crc;
mod decoder;
mod encoder;
mod enums;
pub mod error;
mod filters;
mod headers;
mod utils;
