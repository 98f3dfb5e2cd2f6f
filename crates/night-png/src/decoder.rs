/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use night_core::bytestream::ByteReader;
use night_core::log::{trace, warn};
use night_core::options::DecoderOptions;
use night_core::pixels::{PixelBuffer, CHANNELS};
use night_inflate::DeflateOptions;

use crate::constants::{
    ADAM7_X_ORIGIN, ADAM7_X_SPACING, ADAM7_Y_ORIGIN, ADAM7_Y_SPACING, PNG_SIGNATURE
};
use crate::enums::{FilterMethod, InterlaceMethod, PngChunkType, PngColor};
use crate::error::PngDecodeErrors;
use crate::filters::{
    handle_avg, handle_avg_first, handle_paeth, handle_paeth_first, handle_sub, handle_up
};
use crate::utils::convert_row_to_rgba;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct PLTEEntry {
    pub red:   u8,
    pub green: u8,
    pub blue:  u8,
    pub alpha: u8
}

impl Default for PLTEEntry {
    fn default() -> Self {
        // but a tRNS chunk may contain fewer values than there are palette entries.
        // In this case, the alpha value for all remaining palette entries is assumed to be 255
        PLTEEntry {
            red:   0,
            green: 0,
            blue:  0,
            alpha: 255
        }
    }
}

#[derive(Copy, Clone)]
pub(crate) struct PngChunk {
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4],
    pub crc:        u32
}

/// Information stored in the IHDR chunk
#[derive(Default, Debug, Copy, Clone)]
pub struct PngInfo {
    pub width:            usize,
    pub height:           usize,
    pub depth:            u8,
    pub color:            PngColor,
    pub component:        u8,
    pub interlace_method: InterlaceMethod
}

impl PngInfo {
    /// Bytes in one unfiltered row of `width` pixels
    pub(crate) fn row_bytes(&self, width: usize) -> Option<usize> {
        width
            .checked_mul(usize::from(self.component))?
            .checked_mul(usize::from(self.depth))?
            .checked_add(7)
            .map(|x| x / 8)
    }
    /// Distance in bytes between a byte and the matching
    /// byte of the pixel to its left, at least one
    pub(crate) fn filter_stride(&self) -> usize {
        (usize::from(self.component) * usize::from(self.depth) / 8).max(1)
    }
}

/// A PNG decoder instance.
///
/// The decoder walks every chunk of the file, inflates the
/// concatenated IDAT payload and converts whatever colour type
/// and bit depth the file stores into 8 bit RGBA.
pub struct PngDecoder<'a> {
    pub(crate) seen_hdr:        bool,
    pub(crate) seen_iend:       bool,
    pub(crate) stream:          ByteReader<'a>,
    pub(crate) options:         DecoderOptions,
    pub(crate) png_info:        PngInfo,
    pub(crate) palette:         Vec<PLTEEntry>,
    pub(crate) palette_entries: usize,
    pub(crate) idat_chunks:     Vec<u8>,
    pub(crate) trns_key:        Option<[u16; 3]>,
    pub(crate) seen_trns:       bool
}

impl<'a> PngDecoder<'a> {
    /// Create a new decoder with the default options
    pub fn new(data: &'a [u8]) -> PngDecoder<'a> {
        PngDecoder::new_with_options(data, DecoderOptions::default())
    }
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a> {
        PngDecoder {
            seen_hdr: false,
            seen_iend: false,
            stream: ByteReader::new(data),
            options,
            palette: Vec::new(),
            palette_entries: 0,
            png_info: PngInfo::default(),
            idat_chunks: Vec::with_capacity(37), // randomly chosen size, my favourite number,
            trns_key: None,
            seen_trns: false
        }
    }

    /// Get image dimensions or none if they aren't decoded
    pub const fn get_dimensions(&self) -> Option<(usize, usize)> {
        if !self.seen_hdr {
            return None;
        }
        Some((self.png_info.width, self.png_info.height))
    }
    /// Get the contents of the IHDR chunk or none if
    /// headers aren't decoded
    pub const fn get_info(&self) -> Option<PngInfo> {
        if !self.seen_hdr {
            return None;
        }
        Some(self.png_info)
    }

    fn read_chunk_header(&mut self) -> Result<PngChunk, PngDecodeErrors> {
        // Format is length - chunk type - [data] -  crc chunk, load crc chunk now
        let chunk_length = self.stream.get_u32_be_err()?;

        if chunk_length > (1 << 31) - 1 {
            return Err(PngDecodeErrors::GenericStatic("Chunk length exceeds 2^31-1"));
        }
        let chunk_length = chunk_length as usize;
        let chunk_type_int = self.stream.get_u32_be_err()?.to_be_bytes();

        let chunk_type = PngChunkType::from_bytes(&chunk_type_int);

        if !self.stream.has(chunk_length + 4 /*crc stream*/) {
            let err = format!(
                "Not enough bytes for chunk {:?}, bytes requested are {}, but bytes present are {}",
                chunk_type,
                chunk_length + 4,
                self.stream.remaining()
            );

            return Err(PngDecodeErrors::Generic(err));
        }
        let crc_ref = self.stream.peek_at(chunk_length, 4)?;
        let crc = u32::from_be_bytes([crc_ref[0], crc_ref[1], crc_ref[2], crc_ref[3]]);

        // Confirm the CRC here.
        #[cfg(feature = "crc")]
        {
            if self.options.png_get_confirm_crc() {
                use crate::crc::calc_crc_with_bytes;

                let bytes = self.stream.peek_at(0, chunk_length)?;

                // crc covers the chunk type and the chunk data
                let calc_crc = !calc_crc_with_bytes(bytes, calc_crc_with_bytes(&chunk_type_int, u32::MAX));

                if crc != calc_crc {
                    return Err(PngDecodeErrors::BadCrc(crc, calc_crc));
                }
            }
        }

        Ok(PngChunk {
            length: chunk_length,
            chunk: chunk_type_int,
            chunk_type,
            crc
        })
    }

    /// Read the png signature and the IHDR chunk
    ///
    /// After this, [`get_dimensions`](Self::get_dimensions) and
    /// [`get_info`](Self::get_info) return the image information.
    /// Calling it more than once is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Ok(());
        }
        // READ PNG signature
        let signature = self.stream.peek_at(0, 8).map_err(|_| PngDecodeErrors::BadSignature)?;

        if u64::from_be_bytes([
            signature[0], signature[1], signature[2], signature[3], signature[4], signature[5],
            signature[6], signature[7]
        ]) != PNG_SIGNATURE
        {
            return Err(PngDecodeErrors::BadSignature);
        }
        self.stream.skip(8)?;

        // check if first chunk is ihdr here
        if self.stream.peek_at(4, 4)? != b"IHDR" {
            return Err(PngDecodeErrors::GenericStatic(
                "First chunk not IHDR, Corrupt PNG"
            ));
        }
        self.next_chunk()
    }

    /// Read and act on one chunk
    fn next_chunk(&mut self) -> Result<(), PngDecodeErrors> {
        let header = self.read_chunk_header()?;
        let data = self.stream.get_slice(header.length)?;

        match header.chunk_type {
            PngChunkType::IHDR => self.parse_ihdr(header, data)?,
            PngChunkType::PLTE => self.parse_plte(header, data)?,
            PngChunkType::IDAT => self.parse_idat(data)?,
            PngChunkType::tRNS => self.parse_trns(header, data)?,
            PngChunkType::IEND => self.seen_iend = true,
            PngChunkType::unkn => self.parse_unknown(header)?
        }
        // skip crc
        self.stream.skip(4)?;

        Ok(())
    }

    /// Decode the image into 8 bit RGBA pixels
    ///
    /// Every supported colour type and bit depth is converted,
    /// grey is replicated across channels, palettes are looked up,
    /// tRNS colour keys become alpha and 16 bit samples keep their
    /// high byte.
    pub fn decode_rgba(&mut self) -> Result<PixelBuffer, PngDecodeErrors> {
        self.decode_headers()?;

        while !self.seen_iend {
            self.next_chunk()?;
        }
        if self.idat_chunks.is_empty() {
            return Err(PngDecodeErrors::GenericStatic("No IDAT chunks found"));
        }
        if self.png_info.color == PngColor::Palette && self.palette.is_empty() {
            return Err(PngDecodeErrors::EmptyPalette);
        }

        let info = self.png_info;
        let expected_len = self.filtered_size()?;
        // go parse IDAT chunks returning the inflate
        let deflate_data = self.inflate(expected_len)?;
        // remove idat chunks from memory
        // we are already done with them.
        self.idat_chunks = Vec::new();

        if deflate_data.len() < expected_len {
            return Err(PngDecodeErrors::Generic(format!(
                "Not enough pixels, expected {} but found {}",
                expected_len,
                deflate_data.len()
            )));
        }
        if deflate_data.len() > expected_len {
            if self.options.get_strict_mode() {
                return Err(PngDecodeErrors::GenericStatic("Extra data after image rows"));
            }
            warn!(
                "{} extra bytes after the last row, ignoring",
                deflate_data.len() - expected_len
            );
        }

        let mut image = PixelBuffer::zeroed(info.width, info.height)?;
        let mut unfiltered = Vec::new();

        match info.interlace_method {
            InterlaceMethod::Standard => {
                self.create_png_image_raw(&deflate_data, info.width, info.height, &mut unfiltered)?;

                let row_bytes = self.row_bytes(info.width)?;

                for (in_row, out_row) in unfiltered
                    .chunks_exact(row_bytes)
                    .zip(image.pixels_mut().chunks_exact_mut(info.width))
                {
                    convert_row_to_rgba(self, in_row, bytemuck::cast_slice_mut(out_row));
                }
            }
            InterlaceMethod::Adam7 => {
                self.decode_adam7(&deflate_data, &mut unfiltered, &mut image)?;
            }
        }

        Ok(image)
    }

    /// Size of the inflated data, filter bytes included
    fn filtered_size(&self) -> Result<usize, PngDecodeErrors> {
        let info = &self.png_info;
        let mut total = 0_usize;

        for (width, height) in self.pass_dimensions() {
            if width == 0 || height == 0 {
                continue;
            }
            let row = self.row_bytes(width)? + 1;
            total = row
                .checked_mul(height)
                .and_then(|x| x.checked_add(total))
                .ok_or(PngDecodeErrors::GenericStatic("Image size overflows"))?;
        }
        trace!("Expected inflated size {} for {:?}", total, info.interlace_method);
        Ok(total)
    }

    fn row_bytes(&self, width: usize) -> Result<usize, PngDecodeErrors> {
        self.png_info
            .row_bytes(width)
            .ok_or(PngDecodeErrors::GenericStatic("Row size overflows"))
    }

    /// Width and height of each sub-image stored in the file,
    /// one for standard images and seven for Adam7
    fn pass_dimensions(&self) -> Vec<(usize, usize)> {
        let info = &self.png_info;

        match info.interlace_method {
            InterlaceMethod::Standard => vec![(info.width, info.height)],
            InterlaceMethod::Adam7 => (0..7)
                .map(|p| {
                    let x = (info.width + ADAM7_X_SPACING[p] - ADAM7_X_ORIGIN[p] - 1)
                        / ADAM7_X_SPACING[p];
                    let y = (info.height + ADAM7_Y_SPACING[p] - ADAM7_Y_ORIGIN[p] - 1)
                        / ADAM7_Y_SPACING[p];
                    (x, y)
                })
                .collect()
        }
    }

    fn decode_adam7(
        &self, deflate_data: &[u8], unfiltered: &mut Vec<u8>, image: &mut PixelBuffer
    ) -> Result<(), PngDecodeErrors> {
        let info = self.png_info;
        let mut image_offset = 0;
        let mut rgba_row = Vec::new();

        for (p, (x, y)) in self.pass_dimensions().into_iter().enumerate() {
            if x == 0 || y == 0 {
                continue;
            }
            let row_bytes = self.row_bytes(x)?;
            let image_len = (row_bytes + 1) * y;

            let deflate_slice = deflate_data
                .get(image_offset..image_offset + image_len)
                .ok_or(PngDecodeErrors::GenericStatic("Not enough data for interlaced pass"))?;

            self.create_png_image_raw(deflate_slice, x, y, unfiltered)?;

            rgba_row.resize(x * CHANNELS, 0);
            let pixels = image.pixels_mut();

            for (j, in_row) in unfiltered.chunks_exact(row_bytes).enumerate() {
                convert_row_to_rgba(self, in_row, &mut rgba_row);

                let out_y = j * ADAM7_Y_SPACING[p] + ADAM7_Y_ORIGIN[p];

                for (i, px) in rgba_row.chunks_exact(CHANNELS).enumerate() {
                    let out_x = i * ADAM7_X_SPACING[p] + ADAM7_X_ORIGIN[p];
                    pixels[out_y * info.width + out_x].copy_from_slice(px);
                }
            }
            image_offset += image_len;
        }
        Ok(())
    }

    /// Undo the row filters of a `width` x `height` (sub-)image
    ///
    /// `out` is resized to hold the unfiltered rows back to back
    fn create_png_image_raw(
        &self, deflate_data: &[u8], width: usize, height: usize, out: &mut Vec<u8>
    ) -> Result<(), PngDecodeErrors> {
        let width_stride = self.row_bytes(width)?;
        let chunk_size = width_stride + 1;
        let components = self.png_info.filter_stride();

        if deflate_data.len() < chunk_size * height {
            let msg = format!(
                "Not enough pixels, expected {} but found {}",
                chunk_size * height,
                deflate_data.len()
            );
            return Err(PngDecodeErrors::Generic(msg));
        }
        out.clear();
        out.resize(width_stride * height, 0);

        let mut first_row = true;

        for (i, in_stride) in deflate_data.chunks_exact(chunk_size).take(height).enumerate() {
            // Split output into current and previous
            // current points to the start of the row where we are writing de-filtered output to
            // prev is all rows we already wrote output to.
            let (prev, current) = out.split_at_mut(i * width_stride);
            let current = &mut current[..width_stride];

            let prev_row: &[u8] = if first_row {
                &[]
            } else {
                &prev[(i - 1) * width_stride..]
            };

            // take filter
            let filter_byte = in_stride[0];
            // raw image bytes
            let raw = &in_stride[1..];

            // get it's type
            let mut filter = FilterMethod::from_int(filter_byte)
                .ok_or_else(|| PngDecodeErrors::Generic(format!("Unknown filter {filter_byte}")))?;

            if first_row {
                // match our filters to special filters for first row
                // these special filters do not need the previous scanline and treat it
                // as zero
                filter = match filter {
                    FilterMethod::Paeth => FilterMethod::PaethFirst,
                    // up for the first row becomes a memcpy
                    FilterMethod::Up => FilterMethod::None,
                    FilterMethod::Average => FilterMethod::AvgFirst,
                    other => other
                };
                first_row = false;
            }

            match filter {
                FilterMethod::None => current.copy_from_slice(raw),

                FilterMethod::Average => handle_avg(prev_row, raw, current, components),

                FilterMethod::Sub => handle_sub(raw, current, components),

                FilterMethod::Up => handle_up(prev_row, raw, current),

                FilterMethod::Paeth => handle_paeth(prev_row, raw, current, components),

                FilterMethod::PaethFirst => handle_paeth_first(raw, current, components),

                FilterMethod::AvgFirst => handle_avg_first(raw, current, components)
            }
        }
        Ok(())
    }

    /// Undo deflate decoding
    fn inflate(&self, expected_len: usize) -> Result<Vec<u8>, PngDecodeErrors> {
        // deflate doesn't store its uncompressed size but we know
        // what a well formed image inflates to, allow a little slack
        // past that and stop there
        let option = DeflateOptions::default()
            .set_size_hint(expected_len)
            .set_limit(expected_len.saturating_add(1 << 16))
            .set_confirm_checksum(self.options.inflate_get_confirm_adler());

        let mut decoder = night_inflate::DeflateDecoder::new_with_options(&self.idat_chunks, option);

        decoder.decode_zlib().map_err(PngDecodeErrors::ZlibDecodeErrors)
    }
}
