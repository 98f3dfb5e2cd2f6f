/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Format detection and codec dispatch
#![allow(unused_variables)]

use night_core::bytestream::ByteSink;
use night_core::log::trace;
use night_core::options::{DecoderOptions, EncoderOptions};

use crate::errors::ImageErrors;
use crate::traits::DecoderTrait;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];
const QOI_MAGIC: [u8; 4] = *b"qoif";

/// Formats we can recognise from their leading bytes
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ImageFormat {
    Png,
    Qoi,
    Bmp
}

impl ImageFormat {
    /// Whether a decoder for this format was compiled in
    pub fn has_decoder(self) -> bool {
        match self {
            ImageFormat::Png => cfg!(feature = "png"),
            ImageFormat::Qoi => cfg!(feature = "qoi"),
            ImageFormat::Bmp => cfg!(feature = "bmp")
        }
    }

    pub fn decoder<'a>(&self, data: &'a [u8]) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors> {
        self.decoder_with_options(data, DecoderOptions::default())
    }

    pub fn decoder_with_options<'a>(
        &self, data: &'a [u8], options: DecoderOptions
    ) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors> {
        match self {
            ImageFormat::Png => {
                #[cfg(feature = "png")]
                {
                    Ok(Box::new(night_png::PngDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "png"))]
                {
                    Err(ImageErrors::ImageDecoderNotIncluded(*self))
                }
            }
            ImageFormat::Qoi => {
                #[cfg(feature = "qoi")]
                {
                    Ok(Box::new(night_qoi::QoiDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "qoi"))]
                {
                    Err(ImageErrors::ImageDecoderNotIncluded(*self))
                }
            }
            ImageFormat::Bmp => {
                #[cfg(feature = "bmp")]
                {
                    Ok(Box::new(night_bmp::BmpDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "bmp"))]
                {
                    Err(ImageErrors::ImageDecoderNotIncluded(*self))
                }
            }
        }
    }

    /// Guess the format from the first bytes of a file
    pub fn guess_format(bytes: &[u8]) -> Option<ImageFormat> {
        guess_format(bytes)
    }

    pub fn encoder_for_extension<P: AsRef<str>>(extension: P) -> Option<EncodeFormat> {
        EncodeFormat::from_extension(extension)
    }
}

/// Return the format of an image from its signature.
///
/// Only the leading bytes are inspected, exactly one format can match.
pub fn guess_format(bytes: &[u8]) -> Option<ImageFormat> {
    let magic_bytes: [(&[u8], ImageFormat); 2] = [
        (&PNG_SIGNATURE, ImageFormat::Png),
        (&QOI_MAGIC, ImageFormat::Qoi)
    ];

    for (magic, format) in magic_bytes {
        if bytes.starts_with(magic) {
            trace!("Image format identified as {:?}", format);
            return Some(format);
        }
    }
    // BMP only has a two byte magic, so the info header size is checked as well
    if probe_bmp(bytes) {
        trace!("Image format identified as {:?}", ImageFormat::Bmp);
        return Some(ImageFormat::Bmp);
    }
    None
}

#[cfg(feature = "bmp")]
fn probe_bmp(bytes: &[u8]) -> bool {
    night_bmp::probe_bmp(bytes)
}

#[cfg(not(feature = "bmp"))]
fn probe_bmp(bytes: &[u8]) -> bool {
    bytes.starts_with(b"BM")
}

/// Formats the encoders can write
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EncodeFormat {
    Png,
    Qoi
}

impl EncodeFormat {
    pub fn from_extension<P: AsRef<str>>(extension: P) -> Option<EncodeFormat> {
        match extension.as_ref().to_ascii_lowercase().as_str() {
            "png" => Some(EncodeFormat::Png),
            "qoi" => Some(EncodeFormat::Qoi),
            _ => None
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            EncodeFormat::Png => "png",
            EncodeFormat::Qoi => "qoi"
        }
    }

    pub const fn image_format(self) -> ImageFormat {
        match self {
            EncodeFormat::Png => ImageFormat::Png,
            EncodeFormat::Qoi => ImageFormat::Qoi
        }
    }

    /// Encode RGBA8 `data` into `sink`, geometry must already be validated
    pub(crate) fn encode<T: ByteSink>(
        self, data: &[u8], options: EncoderOptions, sink: T
    ) -> Result<usize, ImageErrors> {
        match self {
            EncodeFormat::Png => {
                #[cfg(feature = "png")]
                {
                    Ok(night_png::PngEncoder::new(data, options).encode(sink)?)
                }
                #[cfg(not(feature = "png"))]
                {
                    Err(ImageErrors::ImageEncoderNotIncluded(self.image_format()))
                }
            }
            EncodeFormat::Qoi => {
                #[cfg(feature = "qoi")]
                {
                    Ok(night_qoi::QoiEncoder::new(data, options).encode(sink)?)
                }
                #[cfg(not(feature = "qoi"))]
                {
                    Err(ImageErrors::ImageEncoderNotIncluded(self.image_format()))
                }
            }
        }
    }
}
