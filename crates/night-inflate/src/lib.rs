/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A small deflate/zlib codec.
//!
//! The decoder understands stored, fixed and dynamic huffman blocks,
//! the encoder produces either stored blocks or LZ77 matches coded with
//! the fixed huffman tables, which is all the png encoder needs.
//!
//! # Usage
//!
//! Decoding deflate data
//!
//! ```no_run
//! use night_inflate::DeflateDecoder;
//! let totally_valid_data = [0; 23];
//! let mut decoder = DeflateDecoder::new(&totally_valid_data);
//!
//! let decompressed = decoder.decode_deflate();
//! ```
//!
//! Decoding zlib data without confirming the adler32 checksum
//! ```no_run
//! use night_inflate::DeflateDecoder;
//! use night_inflate::DeflateOptions;
//! let totally_valid_data = [0; 23];
//! let options = DeflateOptions::default().set_confirm_checksum(false);
//! let mut decoder = DeflateDecoder::new_with_options(&totally_valid_data, options);
//!
//! let decompressed = decoder.decode_zlib();
//! ```
//!
//! Round tripping through the encoder
//! ```
//! use night_inflate::{DeflateDecoder, DeflateEncoder};
//! let data = b"night night night night";
//! let compressed = DeflateEncoder::new(data).encode_zlib();
//! let decoded = DeflateDecoder::new(&compressed).decode_zlib().unwrap();
//! assert_eq!(&decoded, data);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use crate::decoder::{DeflateDecoder, DeflateOptions};
pub use crate::encoder::{DeflateEncoder, DeflateEncodingOptions, DeflateEncodingStrategy};

mod bitstream;
mod constants;
mod decoder;
mod encoder;
pub mod errors;
mod utils;
