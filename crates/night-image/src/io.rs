/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use night_core::bytestream::ByteSink;
use night_core::log::{info, trace};
use night_core::options::{DecoderOptions, EncoderOptions};
use night_core::pixels::{checked_len, PixelBuffer, PixelBufferError};

use crate::codecs::{guess_format, EncodeFormat, ImageFormat};
use crate::errors::ImageErrors;

/// Format and size of an image, read from its headers
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width:  usize,
    pub height: usize
}

/// Decode an image of any supported format into RGBA8 pixels
pub fn load(bytes: &[u8]) -> Result<PixelBuffer, ImageErrors> {
    load_with_options(bytes, DecoderOptions::default())
}

pub fn load_with_options(bytes: &[u8], options: DecoderOptions) -> Result<PixelBuffer, ImageErrors> {
    let format = guess_format(bytes).ok_or(ImageErrors::UnknownFormat)?;

    let mut decoder = format.decoder_with_options(bytes, options)?;
    let pixels = decoder.decode_rgba()?;

    info!(
        "Decoded {:?} image of {}x{}",
        format,
        pixels.width(),
        pixels.height()
    );
    Ok(pixels)
}

/// Read format and dimensions without decoding pixels
pub fn probe(bytes: &[u8], options: DecoderOptions) -> Result<ImageInfo, ImageErrors> {
    let format = guess_format(bytes).ok_or(ImageErrors::UnknownFormat)?;

    let mut decoder = format.decoder_with_options(bytes, options)?;
    decoder.decode_headers()?;

    let (width, height) = decoder
        .dimensions()
        .ok_or(ImageErrors::InvalidGeometry(PixelBufferError::ZeroDimension))?;

    Ok(ImageInfo {
        format: decoder.format(),
        width,
        height
    })
}

/// Encode a pixel buffer into `sink`, returning the number of bytes written
pub fn write<T: ByteSink>(sink: T, format: EncodeFormat, image: &PixelBuffer) -> Result<usize, ImageErrors> {
    write_raw(sink, format, image.width(), image.height(), image.as_bytes())
}

/// Encode raw RGBA8 pixels into `sink`.
///
/// `data` must hold exactly `width * height * 4` bytes and both
/// dimensions must be non-zero, otherwise nothing is written.
pub fn write_raw<T: ByteSink>(
    sink: T, format: EncodeFormat, width: usize, height: usize, data: &[u8]
) -> Result<usize, ImageErrors> {
    let expected = checked_len(width, height)?;

    if data.len() != expected {
        return Err(ImageErrors::InvalidGeometry(
            PixelBufferError::LengthMismatch(expected, data.len())
        ));
    }
    trace!("Encoding {}x{} image as {:?}", width, height, format);

    format.encode(data, EncoderOptions::new(width, height), sink)
}
