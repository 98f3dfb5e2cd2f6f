/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use crate::constants::DEFLATE_MAX_CODEWORD_LENGTH;
use crate::errors::DecodeErrorStatus;

/// Reverse the low `length` bits of `code`
///
/// Huffman codes are defined MSB first but deflate
/// packs them starting from the least significant bit
#[inline]
pub(crate) const fn reverse_bits(code: u16, length: u8) -> u16 {
    code.reverse_bits() >> (16 - length as u32)
}

/// Compute canonical huffman codes from code lengths
///
/// Returns the codes (MSB first, as the format defines them), lengths of
/// zero are left with a code of zero.
///
/// Errors out if the lengths over-subscribe the code space.
pub(crate) fn canonical_codes(lengths: &[u8]) -> Result<Vec<u16>, DecodeErrorStatus> {
    let mut count = [0_u16; DEFLATE_MAX_CODEWORD_LENGTH + 1];

    for len in lengths {
        count[usize::from(*len)] += 1;
    }
    count[0] = 0;

    // check for an over-subscribed code
    let mut left: i32 = 1;
    for len in 1..=DEFLATE_MAX_CODEWORD_LENGTH {
        left <<= 1;
        left -= i32::from(count[len]);
        if left < 0 {
            return Err(DecodeErrorStatus::Generic("Over-subscribed huffman code"));
        }
    }

    let mut next_code = [0_u16; DEFLATE_MAX_CODEWORD_LENGTH + 2];
    let mut code = 0_u16;

    for len in 1..=DEFLATE_MAX_CODEWORD_LENGTH {
        code = (code + count[len - 1]) << 1;
        next_code[len] = code;
    }

    let mut codes = vec![0_u16; lengths.len()];

    for (sym, len) in lengths.iter().enumerate() {
        if *len != 0 {
            codes[sym] = next_code[usize::from(*len)];
            next_code[usize::from(*len)] += 1;
        }
    }
    Ok(codes)
}

/// A single level lookup table for a canonical huffman code.
///
/// The table is indexed by the next `table_bits` bits of the stream,
/// each entry stores `(symbol << 8) | code_length`, a code length of
/// zero marks a bit pattern with no assigned code.
pub(crate) struct HuffmanTable {
    pub(crate) entries:    Vec<u32>,
    pub(crate) table_bits: u8
}

impl HuffmanTable {
    /// Build a decode table from the code lengths of each symbol
    pub(crate) fn new(lengths: &[u8]) -> Result<HuffmanTable, DecodeErrorStatus> {
        let codes = canonical_codes(lengths)?;

        let table_bits = lengths.iter().copied().max().unwrap_or(0).max(1);
        let mut entries = vec![0_u32; 1 << table_bits];

        for (sym, (len, code)) in lengths.iter().zip(codes.iter()).enumerate() {
            if *len == 0 {
                continue;
            }
            let reversed = usize::from(reverse_bits(*code, *len));
            let entry = ((sym as u32) << 8) | u32::from(*len);
            let step = 1 << len;

            let mut pos = reversed;
            while pos < entries.len() {
                entries[pos] = entry;
                pos += step;
            }
        }

        Ok(HuffmanTable {
            entries,
            table_bits
        })
    }
}
