/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;

use crate::errors::BmpDecoderErrors;

/// Split packed palette indices of `depth` bits into one byte each
///
/// Indices are packed most significant bits first
pub(crate) fn expand_bits_to_byte(depth: usize, input: &[u8], out: &mut [u8]) {
    let per_byte = 8 / depth;
    let mask = (1_u8 << depth) - 1;

    for (out_chunk, in_val) in out.chunks_mut(per_byte).zip(input) {
        for (pos, out_val) in out_chunk.iter_mut().enumerate() {
            let shift = 8 - depth * (pos + 1);
            *out_val = (in_val >> shift) & mask;
        }
    }
}

/// A colour channel stored under a bit mask
#[derive(Debug, Copy, Clone, Default)]
pub(crate) struct ChannelMask {
    shift: u32,
    bits:  u32,
    mask:  u32
}

impl ChannelMask {
    /// A zero mask gives a channel that always reads 0, masks with
    /// holes in them are rejected
    pub fn new(mask: u32) -> Result<ChannelMask, BmpDecoderErrors> {
        if mask == 0 {
            return Ok(ChannelMask::default());
        }
        let shift = mask.trailing_zeros();
        let bits = (mask >> shift).trailing_ones();

        if (mask >> shift).checked_shr(bits).unwrap_or(0) != 0 {
            return Err(BmpDecoderErrors::Generic(format!(
                "Bit mask {mask:#010x} is not contiguous"
            )));
        }
        Ok(ChannelMask { shift, bits, mask })
    }
    pub const fn is_empty(&self) -> bool {
        self.mask == 0
    }
    /// Pull the channel out of `pixel` and stretch it to 8 bits
    #[inline]
    pub fn extract(&self, pixel: u32) -> u8 {
        if self.bits == 0 {
            return 0;
        }
        let value = (pixel & self.mask) >> self.shift;

        if self.bits >= 8 {
            (value >> (self.bits - 8)) as u8
        } else {
            let max = (1_u32 << self.bits) - 1;
            ((value * 255 + max / 2) / max) as u8
        }
    }
}
