/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Common interface over the image decoders
use night_core::pixels::PixelBuffer;

use crate::codecs::ImageFormat;
use crate::errors::ImageErrors;

/// A decoder that produces RGBA pixels.
///
/// Every supported decoder implements this so [`ImageFormat::decoder`]
/// can hand out a trait object.
pub trait DecoderTrait {
    /// Read headers without decoding pixels
    fn decode_headers(&mut self) -> Result<(), ImageErrors>;

    /// Width and height, `None` before headers are decoded
    fn dimensions(&self) -> Option<(usize, usize)>;

    /// Decode the whole image into RGBA8
    fn decode_rgba(&mut self) -> Result<PixelBuffer, ImageErrors>;

    fn format(&self) -> ImageFormat;
}

#[cfg(feature = "png")]
impl<'a> DecoderTrait for night_png::PngDecoder<'a> {
    fn decode_headers(&mut self) -> Result<(), ImageErrors> {
        Ok(self.decode_headers()?)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.get_dimensions()
    }

    fn decode_rgba(&mut self) -> Result<PixelBuffer, ImageErrors> {
        Ok(self.decode_rgba()?)
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }
}

#[cfg(feature = "qoi")]
impl<'a> DecoderTrait for night_qoi::QoiDecoder<'a> {
    fn decode_headers(&mut self) -> Result<(), ImageErrors> {
        Ok(self.decode_headers()?)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.get_dimensions()
    }

    fn decode_rgba(&mut self) -> Result<PixelBuffer, ImageErrors> {
        Ok(self.decode_rgba()?)
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::Qoi
    }
}

#[cfg(feature = "bmp")]
impl<'a> DecoderTrait for night_bmp::BmpDecoder<'a> {
    fn decode_headers(&mut self) -> Result<(), ImageErrors> {
        Ok(self.decode_headers()?)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.get_dimensions()
    }

    fn decode_rgba(&mut self) -> Result<PixelBuffer, ImageErrors> {
        Ok(self.decode_rgba()?)
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::Bmp
    }
}
