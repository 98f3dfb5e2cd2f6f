/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;
use alloc::vec::Vec;

use crate::bitstream::BitStreamReader;
use crate::constants::{
    DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN, DEFLATE_BLOCKTYPE_STATIC, DEFLATE_BLOCKTYPE_UNCOMPRESSED,
    DEFLATE_END_OF_BLOCK, DEFLATE_MAX_PRE_CODEWORD_LEN, DEFLATE_NUM_LITLEN_SYMS,
    DEFLATE_NUM_OFFSET_SYMS, DEFLATE_NUM_PRECODE_SYMS, DEFLATE_PRECODE_LENS_PERMUTATION,
    LENGTH_BASE, LENGTH_EXTRA, OFFSET_BASE, OFFSET_EXTRA
};
use crate::errors::{DecodeErrorStatus, InflateDecodeErrors};
use crate::utils::HuffmanTable;

/// Options that influence decompression
#[derive(Copy, Clone, Debug)]
pub struct DeflateOptions {
    limit:            usize,
    confirm_checksum: bool,
    size_hint:        usize
}

impl Default for DeflateOptions {
    fn default() -> Self {
        DeflateOptions {
            limit:            1 << 30,
            confirm_checksum: true,
            size_hint:        37000
        }
    }
}

impl DeflateOptions {
    /// Get deflate/zlib limit option
    ///
    /// The decoder won't extend the inbuilt limit and will
    /// return an error if the limit is exceeded
    ///
    /// # Note
    /// This is a soft limit, it's possible that the decompressed data
    /// may be bigger than this, but the decoder will not go beyond
    /// this after an iteration
    pub const fn get_limit(&self) -> usize {
        self.limit
    }
    /// Set a limit to the internal vector
    /// used to store decoded zlib/deflate output.
    ///
    /// # Arguments
    /// limit: The new decompressor limit
    /// # Returns
    /// A modified version of DeflateDecoder
    #[must_use]
    pub fn set_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Get whether the decoder will confirm a checksum
    /// after decoding
    pub const fn get_confirm_checksum(&self) -> bool {
        self.confirm_checksum
    }
    /// Set whether the decoder should confirm a checksum
    /// after decoding
    ///
    /// Note, you should definitely confirm your checksum, use this
    /// with caution, otherwise data returned may be corrupt
    #[must_use]
    pub fn set_confirm_checksum(mut self, yes: bool) -> Self {
        self.confirm_checksum = yes;
        self
    }

    /// Get the default size hint for the decompressor
    ///
    /// The decompressor initializes the internal storage for decompressed bytes
    /// with this size and will reallocate the vec if the decompressed size becomes bigger
    /// than this, but when the caller knows the size of data beforehand, it can set
    /// this to be the expected size in order to avoid re-allocations for their
    /// use case
    pub const fn get_size_hint(&self) -> usize {
        self.size_hint
    }
    /// Set the size hint for the decompressor
    #[must_use]
    pub fn set_size_hint(mut self, hint: usize) -> Self {
        self.size_hint = hint;
        self
    }
}

/// A deflate decoder instance.
///
/// The decoder manages output buffer as opposed to requiring the caller to provide a pre-allocated buffer
/// it tracks number of bytes written and on successfully reaching the
/// end of the block, will return a vector with exactly
/// the number of decompressed bytes.
pub struct DeflateDecoder<'a> {
    data:     &'a [u8],
    position: usize,
    options:  DeflateOptions
}

impl<'a> DeflateDecoder<'a> {
    /// Create a new decompressor that will read compressed
    /// data from `data` and return a new vector containing new data
    ///
    /// # Arguments
    /// - `data`: The compressed data. Data can be of any format i.e
    /// gzip, zlib or raw deflate.
    ///
    /// # Returns
    /// A decoder instance which will pull compressed data from `data` to inflate the output output
    pub fn new(data: &'a [u8]) -> DeflateDecoder<'a> {
        DeflateDecoder::new_with_options(data, DeflateOptions::default())
    }
    /// Create new decoder with specified options
    ///
    /// This can be used to fine tune the decoder to the user's
    /// needs.
    pub fn new_with_options(data: &'a [u8], options: DeflateOptions) -> DeflateDecoder<'a> {
        DeflateDecoder {
            data,
            position: 0,
            options
        }
    }
    /// Decode zlib-encoded data returning the uncompressed in a `Vec<u8>`
    /// or an error if something went wrong.
    ///
    /// Bytes consumed will be from the data passed when the
    /// `new` method was called.
    ///
    /// # Returns
    /// - The decoded data on success, an error detailing what went wrong
    /// together with data inflated so far on failure.
    #[cfg(feature = "zlib")]
    pub fn decode_zlib(&mut self) -> Result<Vec<u8>, InflateDecodeErrors> {
        if self.data.len()
            < 2 /* zlib header */
            + 4
        /* Deflate */
        {
            return Err(InflateDecodeErrors::new_with_error(
                DecodeErrorStatus::InsufficientData
            ));
        }

        // Zlib flags
        // See https://www.ietf.org/rfc/rfc1950.txt for
        // the RFC
        let cmf = self.data[0];
        let flg = self.data[1];

        let cm = cmf & 0xF;
        let cinfo = cmf >> 4;

        // confirm we have the right deflate methods
        if cm != 8 {
            if cm == 15 {
                return Err(InflateDecodeErrors::new_with_error(DecodeErrorStatus::Generic(
                    "CM of 15 is preserved by the standard,currently don't know how to handle it"
                )));
            }
            return Err(InflateDecodeErrors::new_with_error(
                DecodeErrorStatus::GenericStr(format!("Unknown zlib compression method {cm}"))
            ));
        }
        if cinfo > 7 {
            return Err(InflateDecodeErrors::new_with_error(
                DecodeErrorStatus::GenericStr(format!(
                    "Unknown cinfo `{cinfo}` greater than 7, not allowed"
                ))
            ));
        }
        let flag_checks = (u16::from(cmf) * 256) + u16::from(flg);

        if flag_checks % 31 != 0 {
            return Err(InflateDecodeErrors::new_with_error(DecodeErrorStatus::Generic(
                "FCHECK integrity not preserved"
            )));
        }
        if (flg >> 5) & 1 == 1 {
            return Err(InflateDecodeErrors::new_with_error(DecodeErrorStatus::Generic(
                "Preset dictionaries are not supported"
            )));
        }

        self.position = 2;

        let data = self.decode_deflate()?;

        if self.options.confirm_checksum {
            // Get number of consumed bytes from the input
            let adler_bytes = self.data.get(self.position..self.position + 4);

            match adler_bytes {
                Some(bytes) => {
                    let adler_bits = [bytes[0], bytes[1], bytes[2], bytes[3]];
                    let adler32_expected = u32::from_be_bytes(adler_bits);

                    let mut hasher = simd_adler32::Adler32::new();
                    hasher.write(&data);
                    let adler32_found = hasher.finish();

                    if adler32_expected != adler32_found {
                        let err_msg =
                            DecodeErrorStatus::MismatchedAdler(adler32_expected, adler32_found);
                        return Err(InflateDecodeErrors::new(err_msg, data));
                    }
                }
                None => {
                    return Err(InflateDecodeErrors::new(
                        DecodeErrorStatus::InsufficientData,
                        data
                    ));
                }
            }
        }

        Ok(data)
    }

    /// Decode a deflate stream returning the data as `Vec<u8>` or an error
    /// indicating what went wrong.
    pub fn decode_deflate(&mut self) -> Result<Vec<u8>, InflateDecodeErrors> {
        let mut out = Vec::with_capacity(self.options.size_hint.min(self.options.limit));

        match self.inflate_blocks(&mut out) {
            Ok(()) => Ok(out),
            Err(e) => Err(InflateDecodeErrors::new(e, out))
        }
    }

    fn inflate_blocks(&mut self, out: &mut Vec<u8>) -> Result<(), DecodeErrorStatus> {
        let src = self.data.get(self.position..).unwrap_or(&[]);
        let mut stream = BitStreamReader::new(src);

        loop {
            stream.refill();

            let is_last_block = stream.get_bits(1) == 1;
            let block_type = stream.get_bits(2);

            if block_type == DEFLATE_BLOCKTYPE_UNCOMPRESSED {
                self.copy_stored_block(&mut stream, out)?;
            } else if block_type == DEFLATE_BLOCKTYPE_STATIC {
                let (litlen, offset) = fixed_tables()?;
                self.decode_huffman_block(&mut stream, &litlen, &offset, out)?;
            } else if block_type == DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN {
                let (litlen, offset) = read_dynamic_tables(&mut stream)?;
                self.decode_huffman_block(&mut stream, &litlen, &offset, out)?;
            } else {
                return Err(DecodeErrorStatus::Generic("Reserved block type 3 encountered"));
            }

            if stream.is_overrun() {
                return Err(DecodeErrorStatus::InsufficientData);
            }
            if is_last_block {
                break;
            }
        }
        // skip partial byte and record how far we went, zlib
        // expects the adler checksum right after
        let consumed = stream.align_to_byte();
        self.position += consumed;

        Ok(())
    }

    fn copy_stored_block(
        &self, stream: &mut BitStreamReader, out: &mut Vec<u8>
    ) -> Result<(), DecodeErrorStatus> {
        let position = stream.align_to_byte();
        let remaining = stream.remaining_slice(position);

        if remaining.len() < 4 {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        let len = u16::from_le_bytes([remaining[0], remaining[1]]);
        let nlen = u16::from_le_bytes([remaining[2], remaining[3]]);

        if len != !nlen {
            return Err(DecodeErrorStatus::Generic(
                "Stored block length does not match its complement"
            ));
        }
        let len = usize::from(len);
        let bytes = remaining
            .get(4..4 + len)
            .ok_or(DecodeErrorStatus::InsufficientData)?;

        self.check_limit(out.len() + len)?;
        out.extend_from_slice(bytes);

        stream.reset(position + 4 + len);
        Ok(())
    }

    fn check_limit(&self, size: usize) -> Result<(), DecodeErrorStatus> {
        if size > self.options.limit {
            return Err(DecodeErrorStatus::OutputLimitExceeded(
                self.options.limit,
                size
            ));
        }
        Ok(())
    }

    fn decode_huffman_block(
        &self, stream: &mut BitStreamReader, litlen: &HuffmanTable, offset: &HuffmanTable,
        out: &mut Vec<u8>
    ) -> Result<(), DecodeErrorStatus> {
        loop {
            // worst case per iteration: 15 litlen bits + 5 extra + 15 offset bits + 13 extra
            stream.refill();

            if stream.is_overrun() {
                return Err(DecodeErrorStatus::InsufficientData);
            }
            let symbol = decode_symbol(stream, litlen)?;

            if symbol < DEFLATE_END_OF_BLOCK {
                if out.len() >= self.options.limit {
                    return Err(DecodeErrorStatus::OutputLimitExceeded(
                        self.options.limit,
                        out.len() + 1
                    ));
                }
                out.push(symbol as u8);
                continue;
            }
            if symbol == DEFLATE_END_OF_BLOCK {
                return Ok(());
            }

            let length_index = symbol - 257;

            if length_index >= LENGTH_BASE.len() {
                return Err(DecodeErrorStatus::CorruptData);
            }
            let length = usize::from(LENGTH_BASE[length_index])
                + stream.get_bits(LENGTH_EXTRA[length_index]) as usize;

            let offset_symbol = decode_symbol(stream, offset)?;

            if offset_symbol >= OFFSET_BASE.len() {
                return Err(DecodeErrorStatus::CorruptData);
            }
            let distance = usize::from(OFFSET_BASE[offset_symbol])
                + stream.get_bits(OFFSET_EXTRA[offset_symbol]) as usize;

            if distance > out.len() {
                return Err(DecodeErrorStatus::GenericStr(format!(
                    "Match offset {distance} goes before the start of the output ({})",
                    out.len()
                )));
            }
            self.check_limit(out.len() + length)?;

            let start = out.len() - distance;

            if distance >= length {
                out.extend_from_within(start..start + length);
            } else {
                // overlapping copy, repeats the last `distance` bytes
                for i in start..start + length {
                    let byte = out[i];
                    out.push(byte);
                }
            }
        }
    }
}

#[inline(always)]
fn decode_symbol(stream: &mut BitStreamReader, table: &HuffmanTable) -> Result<usize, DecodeErrorStatus> {
    let entry = table.entries[stream.peek_var_bits(table.table_bits)];
    let length = (entry & 0xFF) as u8;

    if length == 0 {
        return Err(DecodeErrorStatus::CorruptData);
    }
    stream.drop_bits(length);

    Ok((entry >> 8) as usize)
}

/// Build the litlen and offset tables for a static huffman block
fn fixed_tables() -> Result<(HuffmanTable, HuffmanTable), DecodeErrorStatus> {
    let mut lens = [0_u8; DEFLATE_NUM_LITLEN_SYMS];

    lens[0..144].fill(8);
    lens[144..256].fill(9);
    lens[256..280].fill(7);
    lens[280..288].fill(8);

    let offset_lens = [5_u8; DEFLATE_NUM_OFFSET_SYMS];

    Ok((HuffmanTable::new(&lens)?, HuffmanTable::new(&offset_lens)?))
}

/// Read the code length code, and use it to decode the litlen and
/// offset code lengths of a dynamic huffman block
fn read_dynamic_tables(
    stream: &mut BitStreamReader
) -> Result<(HuffmanTable, HuffmanTable), DecodeErrorStatus> {
    let num_litlen_syms = 257 + stream.get_bits(5) as usize;
    let num_offset_syms = 1 + stream.get_bits(5) as usize;
    let num_explicit_precode_lens = 4 + stream.get_bits(4) as usize;

    if num_litlen_syms > 286 || num_offset_syms > 30 {
        return Err(DecodeErrorStatus::Generic("Too many litlen or offset symbols"));
    }

    let mut precode_lens = [0_u8; DEFLATE_NUM_PRECODE_SYMS];

    for i in DEFLATE_PRECODE_LENS_PERMUTATION
        .iter()
        .take(num_explicit_precode_lens)
    {
        if !stream.has(3) {
            stream.refill();
        }
        precode_lens[usize::from(*i)] = stream.get_bits(3) as u8;
    }

    let precode = HuffmanTable::new(&precode_lens)?;

    /* Decode the litlen and offset codeword lengths. */
    let total = num_litlen_syms + num_offset_syms;
    let mut lens = [0_u8; DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_OFFSET_SYMS];
    let mut i = 0;

    while i < total {
        // a precode symbol plus up to 7 repeat bits
        if !stream.has(DEFLATE_MAX_PRE_CODEWORD_LEN as u8 + 7) {
            stream.refill();
        }
        if stream.is_overrun() {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        let presym = decode_symbol(stream, &precode)?;

        let (rep_val, rep_count) = match presym {
            0..=15 => {
                lens[i] = presym as u8;
                i += 1;
                continue;
            }
            16 => {
                if i == 0 {
                    return Err(DecodeErrorStatus::Generic(
                        "Repeat code with no previous length"
                    ));
                }
                (lens[i - 1], 3 + stream.get_bits(2) as usize)
            }
            17 => (0, 3 + stream.get_bits(3) as usize),
            18 => (0, 11 + stream.get_bits(7) as usize),
            _ => return Err(DecodeErrorStatus::CorruptData)
        };

        if i + rep_count > total {
            return Err(DecodeErrorStatus::Generic("Code lengths overflow symbol count"));
        }
        lens[i..i + rep_count].fill(rep_val);
        i += rep_count;
    }

    if lens[DEFLATE_END_OF_BLOCK] == 0 {
        return Err(DecodeErrorStatus::Generic("Missing end of block code"));
    }

    let litlen = HuffmanTable::new(&lens[..num_litlen_syms])?;
    let offset = HuffmanTable::new(&lens[num_litlen_syms..total])?;

    Ok((litlen, offset))
}
