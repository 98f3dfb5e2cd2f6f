/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Load and write images without caring about their format
//!
//! The format is picked from the signature of the input, one of
//! PNG, QOI or BMP, and the matching decoder turns it into an RGBA8
//! [`PixelBuffer`]. Writing goes the other way, to PNG or QOI, into
//! any [`ByteSink`](night_core::bytestream::ByteSink).
//!
//! # Features
//! - `png`, `qoi`, `bmp`: include the respective codec
//! - `log`: route decoder logging to the `log` crate
//!
//! # Example
//! ```no_run
//! use night_image::{load, write, EncodeFormat};
//!
//! let bytes = std::fs::read("image.png").unwrap();
//! let pixels = load(&bytes).unwrap();
//!
//! let mut out = Vec::new();
//! write(&mut out, EncodeFormat::Qoi, &pixels).unwrap();
//! ```
pub use codecs::{guess_format, EncodeFormat, ImageFormat};
pub use errors::ImageErrors;
pub use io::{load, load_with_options, probe, write, write_raw, ImageInfo};
pub use night_core::pixels::PixelBuffer;
pub use traits::DecoderTrait;

pub mod codecs;
pub mod errors;
mod io;
pub mod traits;
