/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BmpCompression {
    RGB,
    RLE8,
    RLE4,
    BITFIELDS
}

impl BmpCompression {
    pub fn from_u32(num: u32) -> Option<BmpCompression> {
        match num {
            0 => Some(BmpCompression::RGB),
            1 => Some(BmpCompression::RLE8),
            2 => Some(BmpCompression::RLE4),
            3 => Some(BmpCompression::BITFIELDS),
            _ => None
        }
    }
}

/// How the bytes of a row map to pixels
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BmpPixelFormat {
    /// Indices into the palette, 1, 4 or 8 bits each
    PAL8,
    /// B, G, R triples
    BGR,
    /// B, G, R plus an unused byte
    BGRO,
    /// 16 or 32 bit pixels split by channel masks
    Masked
}
