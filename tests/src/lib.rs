/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use std::path::{Path, PathBuf};

use nanorand::{Rng, WyRand};
use night_core::pixels::PixelBuffer;
use serde::Deserialize;

mod capi;
mod font;
mod qoi;
mod roundtrip;
mod truncation;
pub mod ttf;

/// One row of `tests/glyphs.json`
#[derive(Clone, Deserialize, Debug)]
pub struct GlyphEntry {
    pub char:     char,
    pub glyph:    u16,
    pub size:     f32,
    pub width:    usize,
    pub height:   usize,
    pub advance:  f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub visible:  bool,
    pub comment:  Option<String>
}

pub fn test_data_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests")
}

/// Random opaque and translucent pixels with runs and repeats mixed in,
/// so every QOI op gets exercised
pub fn random_image(width: usize, height: usize, seed: u64) -> PixelBuffer {
    let mut rng = WyRand::new_seed(seed);
    let mut data = vec![0_u8; width * height * 4];

    for pixel in data.chunks_exact_mut(4) {
        match rng.generate_range(0_u8..4) {
            0 => rng.fill_bytes(pixel),
            1 => pixel.copy_from_slice(&[10, 20, 30, 255]),
            _ => {
                let v = rng.generate::<u8>() & 3;
                pixel.copy_from_slice(&[100 + v, 101, 99 + v, 255]);
            }
        }
    }
    PixelBuffer::new(width, height, data).unwrap()
}

/// A bottom-up BMP with a 40 byte info header.
///
/// `masks` switches to 32 bit BI_BITFIELDS with the red, green and blue
/// masks stored after the header, otherwise rows are 24 bit BGR.
pub fn bmp_file(image: &PixelBuffer, masks: Option<[u32; 3]>) -> Vec<u8> {
    let (width, height) = (image.width(), image.height());
    let (depth, compression, extra) = match masks {
        Some(_) => (32_u16, 3_u32, 12),
        None => (24, 0, 0)
    };
    let stride = (width * usize::from(depth) + 31) / 32 * 4;
    let offset = 14 + 40 + extra;

    let mut out = b"BM".to_vec();
    out.extend_from_slice(&((offset + stride * height) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.extend_from_slice(&40_u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&depth.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&[0; 20]);

    if let Some(masks) = masks {
        for mask in masks {
            out.extend_from_slice(&mask.to_le_bytes());
        }
    }
    for y in (0..height).rev() {
        let start = out.len();
        let row = image.row(y).unwrap();

        for px in row.chunks_exact(4) {
            match masks {
                Some(_) => out.extend_from_slice(&[0, px[2], px[1], px[0]]),
                None => out.extend_from_slice(&[px[2], px[1], px[0]])
            }
        }
        out.resize(start + stride, 0);
    }
    out
}
