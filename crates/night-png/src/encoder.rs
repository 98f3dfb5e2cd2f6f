/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use night_core::bytestream::{ByteSink, ByteWriter};
use night_core::log::trace;
use night_core::options::{EncoderOptions, PngCompression};
use night_core::pixels::{checked_len, PixelBufferError, CHANNELS};
use night_inflate::{DeflateEncoder, DeflateEncodingOptions, DeflateEncodingStrategy};

use crate::constants::{IDAT_CHUNK_SIZE, PNG_SIGNATURE};
use crate::error::PngEncodeErrors;
use crate::filters::{choose_compression_filter, filter_scanline};
use crate::headers::writers::{write_chunk, write_ihdr};

/// An 8 bit RGBA png encoder
///
/// Output is streamed to a [`ByteSink`], a signature, IHDR,
/// IDAT chunks of at most 8192 bytes and IEND.
///
/// # Example
/// ```
/// use night_core::options::EncoderOptions;
/// use night_png::PngEncoder;
///
/// let pixels = [255_u8; 2 * 2 * 4];
/// let mut out = vec![];
/// let mut encoder = PngEncoder::new(&pixels, EncoderOptions::new(2, 2));
/// encoder.encode(&mut out).unwrap();
/// assert_eq!(&out[1..4], b"PNG");
/// ```
pub struct PngEncoder<'a> {
    data:    &'a [u8],
    options: EncoderOptions
}

impl<'a> PngEncoder<'a> {
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> PngEncoder<'a> {
        PngEncoder { data, options }
    }

    /// Filter every row, picking a filter per row
    fn filter_rows(&self) -> Vec<u8> {
        let row_bytes = self.options.get_width() * CHANNELS;
        let mut filtered = vec![0; (row_bytes + 1) * self.options.get_height()];
        let zero_row = vec![0; row_bytes];
        let mut scratch = vec![0; row_bytes + 1];

        let mut previous: &[u8] = &zero_row;

        for (current, out) in self
            .data
            .chunks_exact(row_bytes)
            .zip(filtered.chunks_exact_mut(row_bytes + 1))
        {
            let filter = choose_compression_filter(current, previous, &mut scratch, CHANNELS);
            filter_scanline(current, previous, out, filter, CHANNELS);
            previous = current;
        }
        filtered
    }

    /// Encode the pixels and write them to `sink`
    ///
    /// Returns the number of bytes written, the sink refusing
    /// bytes stops encoding and is reported as an error.
    pub fn encode<T: ByteSink>(&mut self, sink: T) -> Result<usize, PngEncodeErrors> {
        let (width, height) = (self.options.get_width(), self.options.get_height());

        let expected = checked_len(width, height)?;

        if expected != self.data.len() {
            return Err(PngEncodeErrors::BadDimensions(PixelBufferError::LengthMismatch(
                expected,
                self.data.len()
            )));
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(PngEncodeErrors::Generic("Dimensions do not fit in 32 bits"));
        };

        let filtered = self.filter_rows();

        let strategy = match self.options.get_compression() {
            PngCompression::Stored => DeflateEncodingStrategy::NoCompression,
            PngCompression::Fast => DeflateEncodingStrategy::Fast
        };
        let deflate_options = DeflateEncodingOptions::default().set_strategy(strategy);
        let compressed = DeflateEncoder::new_with_options(&filtered, deflate_options).encode_zlib();

        trace!(
            "Filtered {} bytes, compressed to {} bytes",
            filtered.len(),
            compressed.len()
        );

        let mut writer = ByteWriter::new(sink);

        writer.write_u64_be_err(PNG_SIGNATURE)?;
        write_chunk(b"IHDR", &write_ihdr(w, h), &mut writer)?;

        for idat in compressed.chunks(IDAT_CHUNK_SIZE) {
            write_chunk(b"IDAT", idat, &mut writer)?;
        }
        write_chunk(b"IEND", &[], &mut writer)?;

        writer.flush()?;

        Ok(writer.bytes_written())
    }
}
