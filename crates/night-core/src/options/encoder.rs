/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// How hard the png encoder compresses the image data
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PngCompression {
    /// Store image data uncompressed inside the deflate stream
    Stored,
    /// LZ77 matching with fixed huffman codes
    #[default]
    Fast
}

/// Options shared by encoders
///
/// Pixels handed to encoders are always 8 bit RGBA,
/// so only the geometry and compression hints live here.
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    width:       usize,
    height:      usize,
    compression: PngCompression
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width:       0,
            height:      0,
            compression: PngCompression::Fast
        }
    }
}

impl EncoderOptions {
    /// Create new encode options
    ///
    /// # Arguments
    ///
    /// * `width`: Image width
    /// * `height`: Image height
    pub fn new(width: usize, height: usize) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            ..Default::default()
        }
    }
    /// Get the width for which the image will be encoded in
    pub const fn get_width(&self) -> usize {
        self.width
    }
    /// Get height for which the image will be encoded in
    pub const fn get_height(&self) -> usize {
        self.height
    }
    /// Set the width for the image to be encoded
    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
    /// Set the height for the image to be encoded
    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }
    /// Get the compression strategy used by the png encoder
    pub const fn get_compression(&self) -> PngCompression {
        self.compression
    }
    /// Set the compression strategy used by the png encoder
    pub fn set_compression(mut self, compression: PngCompression) -> Self {
        self.compression = compression;
        self
    }
}
