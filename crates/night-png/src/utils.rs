/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::enums::PngColor;
use crate::PngDecoder;

/// Multiply a grey sample of depth `n` by `SCALE[n]` to stretch it to 8 bits
const SCALE: [u8; 9] = [0, 0xff, 0x55, 0, 0x11, 0, 0, 0, 0x01];

/// Iterator over packed samples of a row at any png bit depth
///
/// Sub byte samples are packed most significant bit first,
/// 16 bit samples are stored big endian.
struct Samples<'a> {
    data:     &'a [u8],
    depth:    u8,
    position: usize
}

impl<'a> Samples<'a> {
    fn new(data: &'a [u8], depth: u8) -> Samples<'a> {
        Samples {
            data,
            depth,
            position: 0
        }
    }
}

impl<'a> Iterator for Samples<'a> {
    type Item = u16;

    #[inline]
    fn next(&mut self) -> Option<u16> {
        let value = match self.depth {
            16 => {
                let b = self.data.get(self.position * 2..self.position * 2 + 2)?;
                u16::from_be_bytes([b[0], b[1]])
            }
            8 => u16::from(*self.data.get(self.position)?),
            depth => {
                let bit = self.position * usize::from(depth);
                let byte = *self.data.get(bit / 8)?;
                let shift = 8 - usize::from(depth) - (bit % 8);
                let mask = (1_u8 << depth) - 1;

                u16::from((byte >> shift) & mask)
            }
        };
        self.position += 1;
        Some(value)
    }
}

/// Reduce a sample to 8 bits, scaling up sub byte grey values
/// and keeping the high byte of 16 bit ones
#[inline(always)]
fn to_u8(sample: u16, depth: u8) -> u8 {
    match depth {
        16 => (sample >> 8) as u8,
        8 => sample as u8,
        _ => (sample as u8).wrapping_mul(SCALE[usize::from(depth)])
    }
}

/// Convert one unfiltered row into RGBA
///
/// `out` holds four bytes for each pixel of the row
pub(crate) fn convert_row_to_rgba(decoder: &PngDecoder, in_row: &[u8], out: &mut [u8]) {
    let info = &decoder.png_info;
    let depth = info.depth;
    let key = if decoder.seen_trns { decoder.trns_key } else { None };

    let mut samples = Samples::new(in_row, depth);

    match info.color {
        PngColor::Luma => {
            for (px, sample) in out.chunks_exact_mut(4).zip(samples) {
                let v = to_u8(sample, depth);
                let alpha = match key {
                    Some([k, _, _]) if k == sample => 0,
                    _ => 255
                };
                px.copy_from_slice(&[v, v, v, alpha]);
            }
        }
        PngColor::LumaA => {
            for px in out.chunks_exact_mut(4) {
                let (Some(v), Some(a)) = (samples.next(), samples.next()) else {
                    break;
                };
                let v = to_u8(v, depth);
                px.copy_from_slice(&[v, v, v, to_u8(a, depth)]);
            }
        }
        PngColor::RGB => {
            for px in out.chunks_exact_mut(4) {
                let (Some(r), Some(g), Some(b)) = (samples.next(), samples.next(), samples.next())
                else {
                    break;
                };
                let alpha = match key {
                    Some(k) if k == [r, g, b] => 0,
                    _ => 255
                };
                px.copy_from_slice(&[to_u8(r, depth), to_u8(g, depth), to_u8(b, depth), alpha]);
            }
        }
        PngColor::RGBA => {
            for px in out.chunks_exact_mut(4) {
                for value in px.iter_mut() {
                    *value = samples.next().map_or(0, |s| to_u8(s, depth));
                }
            }
        }
        PngColor::Palette => {
            for (px, index) in out.chunks_exact_mut(4).zip(samples) {
                // indices past the palette read the default entry
                let entry = decoder
                    .palette
                    .get(usize::from(index))
                    .copied()
                    .unwrap_or_default();
                px.copy_from_slice(&[entry.red, entry.green, entry.blue, entry.alpha]);
            }
        }
    }
}
