/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Every strict prefix of a valid file must be rejected without
//! reading past the slice handed over.

use nanorand::{Rng, WyRand};
use night_font::FontInfo;
use night_image::{guess_format, load, write, EncodeFormat, ImageFormat};

use crate::{bmp_file, random_image};
use crate::ttf::sample_font;

#[test]
fn truncated_images_fail() {
    let image = random_image(9, 7, 3);

    for format in [EncodeFormat::Png, EncodeFormat::Qoi] {
        let mut encoded = Vec::new();
        write(&mut encoded, format, &image).unwrap();

        assert!(load(&encoded).is_ok());

        for len in 0..encoded.len() {
            // copy so any read past `len` would land outside the allocation
            let prefix = encoded[..len].to_vec();
            assert!(load(&prefix).is_err(), "{format:?} prefix of {len} bytes decoded");
        }
    }
}

/// Red, green and blue masks matching the byte order `bmp_file` writes
const BMP_MASKS: [u32; 3] = [0xFF00_0000, 0x00FF_0000, 0x0000_FF00];

#[test]
fn truncated_bmps_fail() {
    let image = random_image(5, 3, 8);

    for masks in [None, Some(BMP_MASKS)] {
        let file = bmp_file(&image, masks);

        assert_eq!(guess_format(&file), Some(ImageFormat::Bmp));
        assert!(load(&file).is_ok());

        for len in 0..file.len() {
            let prefix = file[..len].to_vec();
            assert!(load(&prefix).is_err(), "bmp prefix of {len} bytes decoded");
        }
    }
}

#[test]
fn corrupted_bmps_never_panic() {
    let image = random_image(6, 4, 11);
    let mut rng = WyRand::new_seed(0x626d_70);

    for masks in [None, Some(BMP_MASKS)] {
        let file = bmp_file(&image, masks);

        for _ in 0..2000 {
            let mut corrupt = file.clone();

            for _ in 0..rng.generate_range(1_usize..6) {
                // mostly the headers, where a bad value changes control flow
                let end = if rng.generate::<bool>() { 70.min(corrupt.len()) } else { corrupt.len() };
                let pos = rng.generate_range(0..end);
                corrupt[pos] = rng.generate();
            }
            // decoding may succeed or fail, it has to return
            let _ = load(&corrupt);
        }
    }
}

#[test]
fn hostile_bitfield_masks() {
    let image = random_image(3, 2, 4);

    let holes = [
        [0x8000_0001, 0x00FF_0000, 0x0000_FF00],
        [0xFF00_0000, 0x00F0_0F00, 0x0000_FF00],
        [0xFF00_0000, 0x00FF_0000, 0xFFFF_FF01],
    ];
    for masks in holes {
        let file = bmp_file(&image, Some(masks));
        assert!(load(&file).is_err(), "{masks:x?} decoded");
    }

    // empty channels read as zero
    let file = bmp_file(&image, Some([0, 0x00FF_0000, 0]));
    let decoded = load(&file).unwrap();

    for (got, want) in decoded.pixels().iter().zip(image.pixels()) {
        assert_eq!(*got, [0, want[1], 0, 255]);
    }

    // a single channel covering every bit
    let file = bmp_file(&image, Some([u32::MAX, 0, 0]));
    let decoded = load(&file).unwrap();

    for (got, want) in decoded.pixels().iter().zip(image.pixels()) {
        assert_eq!(*got, [want[0], 0, 0, 255]);
    }
}

#[test]
fn truncated_fonts_fail() {
    let data = sample_font();
    assert!(FontInfo::new(&data).is_ok());

    for len in 0..data.len() {
        let prefix = data[..len].to_vec();
        assert!(FontInfo::new(&prefix).is_err(), "font prefix of {len} bytes parsed");
    }
}

#[test]
fn corrupted_fonts_never_panic() {
    let data = sample_font();
    let mut rng = WyRand::new_seed(0x6e69_6768_74);

    for _ in 0..500 {
        let mut corrupt = data.clone();

        for _ in 0..rng.generate_range(1_usize..8) {
            let pos = rng.generate_range(0..corrupt.len());
            corrupt[pos] = rng.generate();
        }
        // parsing may succeed or fail, every query has to return
        let Ok(font) = FontInfo::new(&corrupt) else {
            continue;
        };
        for c in ['A', 'B', 'C', 'O', ' ', 'Z'] {
            let glyph = font.glyph_index(u32::from(c));
            let scale = font.scale_for_pixel_height(24.0);

            let _ = font.kerning(glyph, 1, scale);

            if let Ok(metrics) = font.glyph_metrics(glyph, scale) {
                if metrics.width * metrics.height <= 1 << 20 {
                    let mut out = vec![0; metrics.width * metrics.height];
                    let _ = font.render_glyph(glyph, scale, metrics.width, metrics.height, &mut out);
                }
            }
        }
    }
}
