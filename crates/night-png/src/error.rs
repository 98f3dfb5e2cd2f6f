/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use night_core::bytestream::ByteIoError;
use night_core::pixels::PixelBufferError;
use night_inflate::errors::InflateDecodeErrors;

/// Errors possible during decoding
pub enum PngDecodeErrors {
    BadSignature,
    /// Crc stored in the file, crc computed
    BadCrc(u32, u32),
    EmptyPalette,
    GenericStatic(&'static str),
    Generic(String),
    ZlibDecodeErrors(InflateDecodeErrors),
    IoErrors(ByteIoError),
    BadPixels(PixelBufferError)
}

impl Debug for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::BadCrc(expected, found) => writeln!(
                f,
                "CRC does not match, expected {expected:#010X} but found {found:#010X}"
            ),
            Self::EmptyPalette => writeln!(f, "Palette image without a PLTE chunk"),
            Self::GenericStatic(val) => writeln!(f, "{val}"),
            Self::Generic(val) => writeln!(f, "{val}"),
            Self::ZlibDecodeErrors(err) => writeln!(f, "Error decoding idat chunks {err:?}"),
            Self::IoErrors(err) => writeln!(f, "I/O error {err:?}"),
            Self::BadPixels(err) => writeln!(f, "{err:?}")
        }
    }
}

impl Display for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PngDecodeErrors {}

impl From<&'static str> for PngDecodeErrors {
    fn from(val: &'static str) -> Self {
        Self::GenericStatic(val)
    }
}

impl From<String> for PngDecodeErrors {
    fn from(val: String) -> Self {
        Self::Generic(val)
    }
}

impl From<InflateDecodeErrors> for PngDecodeErrors {
    fn from(val: InflateDecodeErrors) -> Self {
        Self::ZlibDecodeErrors(val)
    }
}

impl From<ByteIoError> for PngDecodeErrors {
    fn from(val: ByteIoError) -> Self {
        Self::IoErrors(val)
    }
}

impl From<PixelBufferError> for PngDecodeErrors {
    fn from(val: PixelBufferError) -> Self {
        Self::BadPixels(val)
    }
}

/// Errors possible during encoding
pub enum PngEncodeErrors {
    Generic(&'static str),
    /// Width, height and pixel length do not describe an RGBA image
    BadDimensions(PixelBufferError),
    IoErrors(ByteIoError)
}

impl Debug for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Generic(val) => writeln!(f, "{val}"),
            Self::BadDimensions(err) => writeln!(f, "{err:?}"),
            Self::IoErrors(err) => writeln!(f, "I/O error {err:?}")
        }
    }
}

impl Display for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PngEncodeErrors {}

impl From<ByteIoError> for PngEncodeErrors {
    fn from(val: ByteIoError) -> Self {
        Self::IoErrors(val)
    }
}

impl From<PixelBufferError> for PngEncodeErrors {
    fn from(val: PixelBufferError) -> Self {
        Self::BadDimensions(val)
    }
}
