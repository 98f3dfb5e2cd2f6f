/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// 00xxxxxx
pub const QOI_OP_INDEX: u8 = 0x00;
// 01xxxxxx
pub const QOI_OP_DIFF: u8 = 0x40;
// 10xxxxxx
pub const QOI_OP_LUMA: u8 = 0x80;
// 11xxxxxx
pub const QOI_OP_RUN: u8 = 0xc0;
// 11111110
pub const QOI_OP_RGB: u8 = 0xfe;
// 11111111
pub const QOI_OP_RGBA: u8 = 0xff;

// (11)000000
pub const QOI_MASK_2: u8 = 0xc0;

pub const QOI_MAGIC: u32 = u32::from_be_bytes(*b"qoif");
pub const QOI_HEADER_SIZE: usize = 14;
pub const QOI_END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
/// Longest run a single op can hold
pub const QOI_MAX_RUN: u8 = 62;

/// Position of a pixel in the 64 entry colour index
#[inline(always)]
pub fn qoi_hash(px: [u8; 4]) -> usize {
    (usize::from(px[0]) * 3 + usize::from(px[1]) * 5 + usize::from(px[2]) * 7 + usize::from(px[3]) * 11)
        % 64
}
