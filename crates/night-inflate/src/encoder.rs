/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use crate::bitstream::BitStreamWriter;
use crate::constants::{
    DEFLATE_BLOCKTYPE_STATIC, DEFLATE_BLOCKTYPE_UNCOMPRESSED, DEFLATE_END_OF_BLOCK,
    DEFLATE_MAX_MATCH_LEN, DEFLATE_MIN_MATCH_LEN, DEFLATE_WINDOW_SIZE, LENGTH_BASE, LENGTH_EXTRA,
    OFFSET_BASE, OFFSET_EXTRA
};
use crate::utils::reverse_bits;

const HASH_BITS: usize = 15;
const HASH_SIZE: usize = 1 << HASH_BITS;
const WINDOW_MASK: usize = DEFLATE_WINDOW_SIZE - 1;
/// How many previous positions with the same hash we try before giving up
const MAX_CHAIN: usize = 64;
const NO_POSITION: usize = usize::MAX;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DeflateEncodingStrategy {
    /// Stored blocks only
    NoCompression,
    /// Greedy LZ77 matching coded with the static huffman tables,
    /// falls back to stored blocks if that turns out larger
    Fast
}

impl DeflateEncodingStrategy {
    fn to_level(self) -> u8 {
        match self {
            Self::NoCompression => 0,
            Self::Fast => 1
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct DeflateEncodingOptions {
    strategy: DeflateEncodingStrategy
}

impl Default for DeflateEncodingOptions {
    fn default() -> Self {
        DeflateEncodingOptions {
            strategy: DeflateEncodingStrategy::Fast
        }
    }
}

impl DeflateEncodingOptions {
    pub const fn get_strategy(&self) -> DeflateEncodingStrategy {
        self.strategy
    }
    #[must_use]
    pub fn set_strategy(mut self, strategy: DeflateEncodingStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

pub struct DeflateEncoder<'a> {
    data:    &'a [u8],
    options: DeflateEncodingOptions
}

impl<'a> DeflateEncoder<'a> {
    /// Create a new deflate encoder with the default options
    pub fn new(data: &'a [u8]) -> DeflateEncoder<'a> {
        DeflateEncoder::new_with_options(data, DeflateEncodingOptions::default())
    }
    pub fn new_with_options(data: &'a [u8], options: DeflateEncodingOptions) -> DeflateEncoder<'a> {
        DeflateEncoder { data, options }
    }

    fn write_zlib_header(&self, output: &mut Vec<u8>) {
        const ZLIB_CM_DEFLATE: u16 = 8;
        const ZLIB_CINFO_32K_WINDOW: u16 = 7;

        let level_hint = self.options.strategy.to_level();

        let mut hdr = (ZLIB_CM_DEFLATE << 8) | (ZLIB_CINFO_32K_WINDOW << 12);

        hdr |= u16::from(level_hint) << 6;
        hdr |= 31 - (hdr % 31);

        output.extend_from_slice(&hdr.to_be_bytes());
    }

    /// Encode a deflate data block with no compression
    fn encode_no_compression(&self, output: &mut Vec<u8>) {
        /*
         * If the input is zero-length, we still must output a block in order
         * for the output to be a valid DEFLATE stream.
         */
        if self.data.is_empty() {
            /* BFINAL and BTYPE */
            output.push((1 | (DEFLATE_BLOCKTYPE_UNCOMPRESSED << 1)) as u8);
            /* LEN and NLEN */
            output.extend_from_slice(&0xFFFF_0000_u32.to_le_bytes());
            return;
        }
        let mut chunks = self.data.chunks(usize::from(u16::MAX)).peekable();

        while let Some(chunk) = chunks.next() {
            let bfinal = u64::from(chunks.peek().is_none());
            /*
             * Output BFINAL and BTYPE.  The stream is already byte-aligned
             * here, so this step always requires outputting exactly 1 byte.
             */
            output.push((bfinal | (DEFLATE_BLOCKTYPE_UNCOMPRESSED << 1)) as u8);

            let len = chunk.len() as u16;
            output.extend_from_slice(&len.to_le_bytes());
            output.extend_from_slice(&(!len).to_le_bytes());
            output.extend_from_slice(chunk);
        }
    }

    /// Encode everything as one block using the static huffman codes
    fn encode_fixed_huffman(&self, output: Vec<u8>) -> Vec<u8> {
        let mut writer = BitStreamWriter::new(output);
        // BFINAL = 1, BTYPE = 01
        writer.put_bits((1 | (DEFLATE_BLOCKTYPE_STATIC << 1)) as u32, 3);

        let data = self.data;
        let mut head = vec![NO_POSITION; HASH_SIZE];
        let mut prev = vec![NO_POSITION; DEFLATE_WINDOW_SIZE];

        let mut i = 0;

        while i < data.len() {
            let mut best_len = 0;
            let mut best_distance = 0;

            if i + DEFLATE_MIN_MATCH_LEN <= data.len() {
                let max_len = DEFLATE_MAX_MATCH_LEN.min(data.len() - i);
                let mut candidate = insert(data, i, &mut head, &mut prev);
                let mut chain = MAX_CHAIN;

                while candidate != NO_POSITION && chain > 0 {
                    let distance = i - candidate;

                    if distance >= DEFLATE_WINDOW_SIZE {
                        break;
                    }
                    // cheap reject, the byte that would extend the best match must agree
                    let probe = best_len.min(max_len - 1);

                    if data[candidate + probe] == data[i + probe] {
                        let length = match_length(&data[candidate..], &data[i..], max_len);

                        if length > best_len {
                            best_len = length;
                            best_distance = distance;

                            if length == max_len {
                                break;
                            }
                        }
                    }
                    candidate = prev[candidate & WINDOW_MASK];
                    chain -= 1;
                }
            }

            if best_len >= DEFLATE_MIN_MATCH_LEN {
                write_match(&mut writer, best_len, best_distance);

                for pos in i + 1..i + best_len {
                    if pos + DEFLATE_MIN_MATCH_LEN <= data.len() {
                        insert(data, pos, &mut head, &mut prev);
                    }
                }
                i += best_len;
            } else {
                write_literal(&mut writer, usize::from(data[i]));
                i += 1;
            }
        }
        write_literal(&mut writer, DEFLATE_END_OF_BLOCK);

        writer.finish()
    }

    /// Encode data as a raw deflate stream
    pub fn encode_deflate(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.data.len() / 2 + 64);
        self.encode_deflate_into(&mut output);
        output
    }

    fn encode_deflate_into(&self, output: &mut Vec<u8>) {
        match self.options.strategy {
            DeflateEncodingStrategy::NoCompression => self.encode_no_compression(output),
            DeflateEncodingStrategy::Fast => {
                let start = output.len();
                // stored blocks cost 5 bytes of framing per 64 KiB
                let stored_size = self.data.len() + 5 * (self.data.len() / 65535 + 1);

                let compressed = self.encode_fixed_huffman(core::mem::take(output));
                *output = compressed;

                if output.len() - start > stored_size {
                    output.truncate(start);
                    self.encode_no_compression(output);
                }
            }
        }
    }

    /// Encode data as a zlib stream, header, deflate data and
    /// adler32 checksum of the uncompressed data
    #[cfg(feature = "zlib")]
    pub fn encode_zlib(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.data.len() / 2 + 64);

        self.write_zlib_header(&mut output);
        self.encode_deflate_into(&mut output);

        // add adler hash
        let mut hasher = simd_adler32::Adler32::new();
        hasher.write(self.data);
        output.extend_from_slice(&hasher.finish().to_be_bytes());

        output
    }
}

/// Insert `pos` into the hash chains returning the previous
/// head for its hash
#[inline(always)]
fn insert(data: &[u8], pos: usize, head: &mut [usize], prev: &mut [usize]) -> usize {
    let hash = hash3(&data[pos..pos + DEFLATE_MIN_MATCH_LEN]);
    let candidate = head[hash];
    prev[pos & WINDOW_MASK] = candidate;
    head[hash] = pos;
    candidate
}

#[inline(always)]
fn hash3(bytes: &[u8]) -> usize {
    let value = u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2]) << 16);
    (value.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize
}

#[inline(always)]
fn match_length(a: &[u8], b: &[u8], max_len: usize) -> usize {
    a.iter()
        .zip(b.iter())
        .take(max_len)
        .take_while(|(x, y)| x == y)
        .count()
}

/// Write a literal/length symbol with the static litlen code
fn write_literal(writer: &mut BitStreamWriter, symbol: usize) {
    let (code, length) = match symbol {
        0..=143 => (0x30 + symbol, 8),
        144..=255 => (0x190 + symbol - 144, 9),
        256..=279 => (symbol - 256, 7),
        _ => (0xC0 + symbol - 280, 8)
    };
    writer.put_bits(u32::from(reverse_bits(code as u16, length)), length);
}

fn write_match(writer: &mut BitStreamWriter, length: usize, distance: usize) {
    // last base that is <= the value
    let length_index = LENGTH_BASE.partition_point(|base| usize::from(*base) <= length) - 1;
    write_literal(writer, 257 + length_index);
    writer.put_bits(
        (length - usize::from(LENGTH_BASE[length_index])) as u32,
        LENGTH_EXTRA[length_index]
    );

    let offset_index = OFFSET_BASE.partition_point(|base| usize::from(*base) <= distance) - 1;
    writer.put_bits(u32::from(reverse_bits(offset_index as u16, 5)), 5);
    writer.put_bits(
        (distance - usize::from(OFFSET_BASE[offset_index])) as u32,
        OFFSET_EXTRA[offset_index]
    );
}
