/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! `BitStreamReader` and `BitStreamWriter` API
//!
//! This module provides an interface to read and write bits (and bytes) for
//! huffman

use alloc::vec::Vec;

pub struct BitStreamReader<'src> {
    // buffer from which we are pulling in bits from
    // used in decompression.
    src:       &'src [u8],
    // position in our buffer, may go past the end of `src`
    // when we pad with zeroes
    position:  usize,
    bits_left: u8,
    buffer:    u64
}

impl<'src> BitStreamReader<'src> {
    /// Create a new `BitStreamReader` instance
    pub fn new(in_buffer: &'src [u8]) -> BitStreamReader<'src> {
        BitStreamReader {
            bits_left: 0,
            buffer:    0,
            src:       in_buffer,
            position:  0
        }
    }
    /// Refill the bitstream ensuring the buffer has bits between
    /// 56 and 63.
    #[inline(always)]
    pub fn refill(&mut self) {
        /*
         * The refill always guarantees refills between 56-63
         *
         * Bits stored will never go above 63 and if bits are in the range 56-63 no refills occur.
         */
        let mut buf = [0; 8];

        match self.src.get(self.position..self.position + 8) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                // create a u64 from an array of u8's
                let new_buffer = u64::from_le_bytes(buf);
                // num indicates how many bytes we actually consumed.
                let num = 63 ^ self.bits_left;
                // offset position
                self.position += (num >> 3) as usize;
                // shift number of bits
                self.buffer |= new_buffer << self.bits_left;
                // update bits left
                // bits left are now between 56-63
                self.bits_left |= 56;
            }
            None => self.refill_slow()
        }
    }
    /// Byte by byte refill for the tail of the stream,
    /// past the end we shift in zeroes and let
    /// [`is_overrun`](Self::is_overrun) report it
    #[inline(never)]
    fn refill_slow(&mut self) {
        while self.bits_left < 56 {
            let byte = self.src.get(self.position).copied().unwrap_or(0);

            self.buffer |= u64::from(byte) << self.bits_left;
            self.bits_left += 8;
            self.position += 1;
        }
    }

    #[inline(always)]
    pub fn peek_var_bits(&self, lookahead: u8) -> usize {
        (self.buffer & ((1 << lookahead) - 1)) as usize
    }

    #[inline(always)]
    pub fn get_bits(&mut self, num_bits: u8) -> u64 {
        debug_assert!(self.bits_left >= num_bits);

        let mask = (1_u64 << num_bits) - 1;

        let value = self.buffer & mask;

        self.buffer >>= num_bits;

        self.bits_left -= num_bits;

        value
    }

    #[inline(always)]
    pub fn drop_bits(&mut self, bits: u8) {
        debug_assert!(self.bits_left >= bits);
        self.bits_left -= bits;
        self.buffer >>= bits;
    }
    /// Return true if the bit buffer can satisfy
    /// `bits` read without refilling,
    pub const fn has(&self, bits: u8) -> bool {
        self.bits_left >= bits
    }
    /// Return true if more bits were consumed than the
    /// input holds
    pub const fn is_overrun(&self) -> bool {
        self.position * 8 - self.bits_left as usize > self.src.len() * 8
    }
    /// Discard bits until the stream is on a byte boundary,
    /// then hand back buffered whole bytes so the next read
    /// starts at the returned byte position
    pub fn align_to_byte(&mut self) -> usize {
        self.drop_bits(self.bits_left & 7);

        let position = self.position - usize::from(self.bits_left >> 3);
        self.reset(position);
        position
    }
    /// Position of the next unread byte, only meaningful
    /// when the stream is aligned
    pub fn byte_position(&self) -> usize {
        self.position - usize::from(self.bits_left >> 3)
    }
    /// Reset buffer and bits left to zero and move
    /// to `position`
    pub fn reset(&mut self, position: usize) {
        self.buffer = 0;
        self.bits_left = 0;
        self.position = position;
    }
    /// Return the remaining bytes in this stream.
    pub fn remaining_slice(&self, position: usize) -> &'src [u8] {
        self.src.get(position..).unwrap_or(&[])
    }
}

/// Packs bits least significant bit first into a byte vector
pub struct BitStreamWriter {
    out:    Vec<u8>,
    buffer: u64,
    bits:   u8
}

impl BitStreamWriter {
    pub fn new(out: Vec<u8>) -> BitStreamWriter {
        BitStreamWriter {
            out,
            buffer: 0,
            bits: 0
        }
    }
    /// Append the low `num_bits` bits of `value`, at most 32 bits at a time
    #[inline(always)]
    pub fn put_bits(&mut self, value: u32, num_bits: u8) {
        debug_assert!(num_bits <= 32);
        self.buffer |= u64::from(value) << self.bits;
        self.bits += num_bits;

        while self.bits >= 8 {
            self.out.push(self.buffer as u8);
            self.buffer >>= 8;
            self.bits -= 8;
        }
    }
    /// Bytes produced so far, including a partially filled byte
    pub fn len(&self) -> usize {
        self.out.len() + usize::from(self.bits > 0)
    }
    /// Pad the last byte with zeroes and return the buffer
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits > 0 {
            self.out.push(self.buffer as u8);
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn writer_reader_agree() {
        let mut writer = BitStreamWriter::new(vec![]);
        writer.put_bits(0b101, 3);
        writer.put_bits(0x1234, 16);
        writer.put_bits(1, 1);
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 3);

        let mut reader = BitStreamReader::new(&bytes);
        reader.refill();
        assert_eq!(reader.get_bits(3), 0b101);
        assert_eq!(reader.get_bits(16), 0x1234);
        assert_eq!(reader.get_bits(1), 1);
        assert!(!reader.is_overrun());
        reader.get_bits(8);
        assert!(reader.is_overrun());
    }
}
