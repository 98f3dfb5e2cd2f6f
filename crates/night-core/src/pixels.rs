/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The in-memory image representation shared by decoders and encoders
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};

/// Largest width or height any image may declare
pub const MAX_DIMENSION: usize = 1 << 24;

/// Channels per pixel, always RGBA
pub const CHANNELS: usize = 4;

/// Errors possible when constructing a [`PixelBuffer`]
pub enum PixelBufferError {
    ZeroDimension,
    /// Width or height is above [`MAX_DIMENSION`]
    TooLarge(usize, usize),
    /// Buffer length does not match dimensions, (expected, found)
    LengthMismatch(usize, usize)
}

impl Debug for PixelBufferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroDimension => writeln!(f, "Image width or height is zero"),
            Self::TooLarge(w, h) => writeln!(
                f,
                "Image dimensions {w}x{h} exceed the maximum of {MAX_DIMENSION} per side"
            ),
            Self::LengthMismatch(expected, found) => writeln!(
                f,
                "Expected a pixel buffer of {expected} bytes but found {found}"
            )
        }
    }
}

impl Display for PixelBufferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PixelBufferError {}

/// Compute the byte length of an RGBA image, validating its dimensions
pub fn checked_len(width: usize, height: usize) -> Result<usize, PixelBufferError> {
    if width == 0 || height == 0 {
        return Err(PixelBufferError::ZeroDimension);
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(PixelBufferError::TooLarge(width, height));
    }
    width
        .checked_mul(height)
        .and_then(|x| x.checked_mul(CHANNELS))
        .ok_or(PixelBufferError::TooLarge(width, height))
}

/// Tightly packed 8 bit RGBA pixels, row major, top to bottom
///
/// The length of the data always equals `width * height * 4`
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width:  usize,
    height: usize,
    data:   Vec<u8>
}

impl PixelBuffer {
    /// Wrap `data` as an image of `width` x `height` pixels
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<PixelBuffer, PixelBufferError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(PixelBufferError::LengthMismatch(expected, data.len()));
        }
        Ok(PixelBuffer {
            width,
            height,
            data
        })
    }
    /// Create an image with every byte set to zero
    pub fn zeroed(width: usize, height: usize) -> Result<PixelBuffer, PixelBufferError> {
        let length = checked_len(width, height)?;
        Ok(PixelBuffer {
            width,
            height,
            data: vec![0; length]
        })
    }
    /// Create an image with every pixel set to `pixel`
    pub fn filled(width: usize, height: usize, pixel: [u8; 4]) -> Result<PixelBuffer, PixelBufferError> {
        let mut image = PixelBuffer::zeroed(width, height)?;
        image.pixels_mut().fill(pixel);
        Ok(image)
    }
    pub const fn width(&self) -> usize {
        self.width
    }
    pub const fn height(&self) -> usize {
        self.height
    }
    /// Return `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
    /// Raw RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
    /// View the buffer as whole pixels
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }
    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut(&mut self.data)
    }
    /// Borrow a single row of pixels
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        let stride = self.width * CHANNELS;
        self.data.get(y * stride..(y + 1) * stride)
    }
    /// Consume the image returning the raw RGBA bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

impl Debug for PixelBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}
