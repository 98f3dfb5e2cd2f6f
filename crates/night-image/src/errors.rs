/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image loading and writing
use std::fmt::{Debug, Display, Formatter};

use night_core::bytestream::ByteIoError;
use night_core::pixels::PixelBufferError;

use crate::codecs::ImageFormat;

/// All errors possible during image loading and writing
#[non_exhaustive]
pub enum ImageErrors {
    /// The leading bytes match no known signature
    UnknownFormat,
    /// The format is known but its codec was not compiled in
    ImageDecoderNotIncluded(ImageFormat),
    ImageEncoderNotIncluded(ImageFormat),
    /// Width, height and buffer length do not agree
    InvalidGeometry(PixelBufferError),
    #[cfg(feature = "png")]
    PngDecodeErrors(night_png::PngDecodeErrors),
    #[cfg(feature = "png")]
    PngEncodeErrors(night_png::PngEncodeErrors),
    #[cfg(feature = "qoi")]
    QoiDecodeErrors(night_qoi::QoiErrors),
    #[cfg(feature = "qoi")]
    QoiEncodeErrors(night_qoi::QoiEncodeErrors),
    #[cfg(feature = "bmp")]
    BmpDecodeErrors(night_bmp::BmpDecoderErrors),
    IoErrors(ByteIoError)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownFormat => writeln!(f, "Unknown image format"),
            Self::ImageDecoderNotIncluded(format) => {
                writeln!(f, "Image decoder for {format:?} not included")
            }
            Self::ImageEncoderNotIncluded(format) => {
                writeln!(f, "Image encoder for {format:?} not included")
            }
            Self::InvalidGeometry(err) => writeln!(f, "Invalid image geometry: {err:?}"),
            #[cfg(feature = "png")]
            Self::PngDecodeErrors(err) => writeln!(f, "Png decoding failed: {err:?}"),
            #[cfg(feature = "png")]
            Self::PngEncodeErrors(err) => writeln!(f, "Png encoding failed: {err:?}"),
            #[cfg(feature = "qoi")]
            Self::QoiDecodeErrors(err) => writeln!(f, "Qoi decoding failed: {err:?}"),
            #[cfg(feature = "qoi")]
            Self::QoiEncodeErrors(err) => writeln!(f, "Qoi encoding failed: {err:?}"),
            #[cfg(feature = "bmp")]
            Self::BmpDecodeErrors(err) => writeln!(f, "Bmp decoding failed: {err:?}"),
            Self::IoErrors(err) => writeln!(f, "I/O error: {err:?}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for ImageErrors {}

impl From<PixelBufferError> for ImageErrors {
    fn from(value: PixelBufferError) -> Self {
        ImageErrors::InvalidGeometry(value)
    }
}

impl From<ByteIoError> for ImageErrors {
    fn from(value: ByteIoError) -> Self {
        ImageErrors::IoErrors(value)
    }
}

#[cfg(feature = "png")]
impl From<night_png::PngDecodeErrors> for ImageErrors {
    fn from(value: night_png::PngDecodeErrors) -> Self {
        ImageErrors::PngDecodeErrors(value)
    }
}

#[cfg(feature = "png")]
impl From<night_png::PngEncodeErrors> for ImageErrors {
    fn from(value: night_png::PngEncodeErrors) -> Self {
        ImageErrors::PngEncodeErrors(value)
    }
}

#[cfg(feature = "qoi")]
impl From<night_qoi::QoiErrors> for ImageErrors {
    fn from(value: night_qoi::QoiErrors) -> Self {
        ImageErrors::QoiDecodeErrors(value)
    }
}

#[cfg(feature = "qoi")]
impl From<night_qoi::QoiEncodeErrors> for ImageErrors {
    fn from(value: night_qoi::QoiEncodeErrors) -> Self {
        ImageErrors::QoiEncodeErrors(value)
    }
}

#[cfg(feature = "bmp")]
impl From<night_bmp::BmpDecoderErrors> for ImageErrors {
    fn from(value: night_bmp::BmpDecoderErrors) -> Self {
        ImageErrors::BmpDecodeErrors(value)
    }
}
