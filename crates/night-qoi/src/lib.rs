/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A Quite OK Image decoder and encoder
//!
//! Decoding always produces RGBA pixels, three channel images
//! get an opaque alpha channel. Encoding takes RGBA pixels and
//! writes a four channel sRGB stream.
//!
//! # Example
//! ```
//! use night_core::options::EncoderOptions;
//! use night_qoi::{QoiDecoder, QoiEncoder};
//!
//! let pixels = [255_u8; 2 * 2 * 4];
//! let mut encoded = vec![];
//! QoiEncoder::new(&pixels, EncoderOptions::new(2, 2))
//!     .encode(&mut encoded)
//!     .unwrap();
//!
//! let image = QoiDecoder::new(&encoded).decode_rgba().unwrap();
//! assert_eq!(image.as_bytes(), &pixels);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use decoder::*;
pub use encoder::*;
pub use errors::*;

mod constants;
mod decoder;
mod encoder;
mod errors;

/// Return true if `bytes` starts with the QOI magic
pub fn probe_qoi(bytes: &[u8]) -> bool {
    bytes.starts_with(b"qoif")
}
