/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

use crate::pixels::MAX_DIMENSION;

/// Decoder options
///
/// Not all options are respected by decoders all decoders
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_width:             usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_height:            usize,
    /// Whether decoders should error out on non-conformance
    /// they can otherwise recover from
    ///
    /// - Default value: false
    /// - Respected by: `qoi`, `bmp`
    strict_mode:           bool,
    /// Whether the png decoder should confirm CRC of every chunk
    ///
    /// - Default value: true
    png_confirm_crc:       bool,
    /// Whether the inflate decoder should confirm the adler32 checksum
    ///
    /// - Default value: true
    inflate_confirm_adler: bool,
    /// Maximum size of decompressed data, in bytes
    ///
    /// - Default value: 1 GiB
    inflate_limit:         usize
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:             1 << 14,
            max_height:            1 << 14,
            strict_mode:           false,
            png_confirm_crc:       true,
            inflate_confirm_adler: true,
            inflate_limit:         1 << 30
        }
    }
}

impl DecoderOptions {
    /// Create the decoder with options that check every checksum
    /// and error out on all recoverable non-conformance
    pub fn new_safe() -> DecoderOptions {
        DecoderOptions::default().set_strict_mode(true)
    }

    /// Create decoder options which skip checksum verification
    ///
    /// Used by the command line tool to be error resilient
    pub fn new_cmd() -> DecoderOptions {
        DecoderOptions::default()
            .png_set_confirm_crc(false)
            .inflate_set_confirm_adler(false)
    }

    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// And reject most errors
    pub fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// Values above the global dimension ceiling are clamped to it
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width.min(MAX_DIMENSION);
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    ///
    /// Values above the global dimension ceiling are clamped to it
    ///
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height.min(MAX_DIMENSION);
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// This reduces the error tolerance level for the decoders and invalid
    /// samples will be rejected by the decoder
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    /// Whether the inflate decoder should confirm
    /// adler checksums
    pub const fn inflate_get_confirm_adler(&self) -> bool {
        self.inflate_confirm_adler
    }
    /// Set whether the inflate decoder should confirm
    /// adler checksums
    pub fn inflate_set_confirm_adler(mut self, yes: bool) -> Self {
        self.inflate_confirm_adler = yes;
        self
    }
    /// Get the maximum number of bytes inflate may produce
    pub const fn inflate_get_limit(&self) -> usize {
        self.inflate_limit
    }
    /// Set the maximum number of bytes inflate may produce
    pub fn inflate_set_limit(mut self, limit: usize) -> Self {
        self.inflate_limit = limit;
        self
    }
    /// Whether the png decoder should confirm crc
    pub const fn png_get_confirm_crc(&self) -> bool {
        self.png_confirm_crc
    }
    /// Set whether the png decoder should confirm
    /// CRC 32 checksums
    pub fn png_set_confirm_crc(mut self, yes: bool) -> Self {
        self.png_confirm_crc = yes;
        self
    }
}
