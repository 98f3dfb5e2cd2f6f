/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;

use night_font::{FontErrors, FontInfo, FontOptions};

use crate::ttf::{on, sample, sample_font, FontBuilder, TestGlyph};
use crate::{test_data_path, GlyphEntry};

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_glyph_table() {
    let json_file = read(test_data_path().join("glyphs.json")).unwrap();
    let entries: Vec<GlyphEntry> = serde_json::from_slice(&json_file).unwrap();

    let data = sample_font();
    let font = FontInfo::new(&data).unwrap();

    let mut failures = Vec::new();

    for entry in &entries {
        let glyph = font.glyph_index(u32::from(entry.char));
        let scale = font.scale_for_pixel_height(entry.size);
        let metrics = font.glyph_metrics(glyph, scale).unwrap();

        let matches = glyph == entry.glyph
            && metrics.width == entry.width
            && metrics.height == entry.height
            && metrics.visible == entry.visible
            && (metrics.advance - entry.advance).abs() < 1e-4
            && (metrics.offset_x - entry.offset_x).abs() < 1e-4
            && (metrics.offset_y - entry.offset_y).abs() < 1e-4;

        if !matches {
            eprintln!("Mismatch for {:?}\nFound glyph {} {:?}\n", entry, glyph, metrics);
            failures.push(entry.clone());
        }
    }
    if !failures.is_empty() {
        panic!("Glyph metrics differ\n {:#?}", failures);
    }
}

#[test]
fn scale_maps_em_to_size() {
    let data = sample_font();
    let font = FontInfo::new(&data).unwrap();

    for size in [0.5_f32, 1.0, 12.0, 13.5, 64.0, 300.0, 4096.0] {
        let scale = font.scale_for_pixel_height(size);
        let em = scale * f32::from(font.units_per_em());

        assert!((em - size).abs() <= size * 1e-6, "{size} gave {em}");
    }
}

#[test]
fn vertical_metrics_are_font_units() {
    let data = sample_font();
    let font = FontInfo::new(&data).unwrap();
    let metrics = font.vertical_metrics();

    assert_eq!(metrics.ascent, 900);
    assert_eq!(metrics.descent, -200);
    assert_eq!(metrics.line_gap, 40);
    assert_eq!(font.num_glyphs(), 6);
}

#[test]
fn kerning_only_for_listed_pairs() {
    let data = sample_font();
    let font = FontInfo::new(&data).unwrap();
    let scale = font.scale_for_pixel_height(128.0);

    let kerned = font.kerning(sample::SQUARE, sample::SHIFTED_SQUARE, scale);
    assert!((kerned + 8.0).abs() < 1e-5);

    for (left, right) in [(2, 1), (1, 1), (0, 0), (5, 4), (1, 400), (u16::MAX, u16::MAX)] {
        assert_eq!(font.kerning(left, right, scale), 0.0);
    }
}

#[test]
fn font_without_kern_table_never_kerns() {
    let data = FontBuilder::new(2048)
        .glyph(TestGlyph::Empty, 100)
        .map('a', 1)
        .build();
    let font = FontInfo::new(&data).unwrap();

    assert_eq!(font.kerning(0, 1, 1.0), 0.0);
    assert_eq!(font.kerning(1, 0, 1.0), 0.0);
}

#[test]
fn self_referencing_composite_fails() {
    let data = sample_font();
    let font = FontInfo::new(&data).unwrap();

    let glyph = font.glyph_index(u32::from('C'));
    assert_eq!(glyph, sample::CYCLE);

    assert!(matches!(
        font.glyph_metrics(glyph, 1.0),
        Err(FontErrors::CompositeTooDeep)
    ));
    let mut out = [0; 16];
    assert!(font.render_glyph(glyph, 1.0, 4, 4, &mut out).is_err());
}

#[test]
fn composite_depth_follows_options() {
    // glyph 1 is the square, every next glyph wraps the previous one
    let mut builder = FontBuilder::new(1024)
        .glyph(TestGlyph::Simple(vec![vec![on(0, 0), on(0, 10), on(10, 10)]]), 10);

    for glyph in 1..=4 {
        builder = builder.glyph(TestGlyph::Composite(vec![(glyph, 1, 1)]), 10);
    }
    let data = builder.build();

    let shallow = FontOptions::default().set_max_composite_depth(2);
    let font = FontInfo::new_with_options(&data, shallow).unwrap();

    assert!(font.glyph_metrics(3, 1.0).is_ok());
    assert!(matches!(font.glyph_metrics(5, 1.0), Err(FontErrors::CompositeTooDeep)));

    let font = FontInfo::new(&data).unwrap();
    assert!(font.glyph_metrics(5, 1.0).unwrap().visible);
}

#[test]
fn unmapped_codepoints_use_missing_glyph() {
    let data = sample_font();
    let font = FontInfo::new(&data).unwrap();

    for codepoint in [u32::from('Z'), 0, 0xFFFF, 0x1F600, 0x10FFFF, u32::MAX] {
        let glyph = font.glyph_index(codepoint);
        assert_eq!(glyph, 0);

        let metrics = font.glyph_metrics(glyph, 0.5).unwrap();
        assert!(!metrics.visible);
        assert_eq!((metrics.width, metrics.height), (0, 0));
    }
}

#[test]
fn out_of_range_glyphs_are_errors() {
    let data = sample_font();
    let font = FontInfo::new(&data).unwrap();

    assert!(matches!(
        font.glyph_metrics(6, 1.0),
        Err(FontErrors::GlyphOutOfRange(6))
    ));
    assert!(font.glyph_metrics(u16::MAX, 1.0).is_err());
}

#[test]
fn square_renders_solid() {
    let data = sample_font();
    let font = FontInfo::new(&data).unwrap();
    let scale = font.scale_for_pixel_height(128.0);

    let metrics = font.glyph_metrics(sample::SQUARE, scale).unwrap();
    let mut out = vec![0; metrics.width * metrics.height];

    font.render_glyph(sample::SQUARE, scale, metrics.width, metrics.height, &mut out)
        .unwrap();

    assert!(out.iter().all(|&c| c >= 250), "square edges lie on pixel borders");
}

#[test]
fn round_glyph_has_soft_corners() {
    let data = sample_font();
    let font = FontInfo::new(&data).unwrap();
    let scale = font.scale_for_pixel_height(128.0);

    let metrics = font.glyph_metrics(sample::ROUND, scale).unwrap();
    let (w, h) = (metrics.width, metrics.height);
    let mut out = vec![0; w * h];

    font.render_glyph(sample::ROUND, scale, w, h, &mut out).unwrap();

    let at = |x: usize, y: usize| out[y * w + x];

    assert_eq!(at(w / 2, h / 2), 255);
    assert_eq!(at(0, 0), 0);
    assert_eq!(at(w - 1, 0), 0);
    assert_eq!(at(0, h - 1), 0);
    assert_eq!(at(w - 1, h - 1), 0);
    // partially covered pixels exist along the curve
    assert!(out.iter().any(|&c| c > 0 && c < 255));
}

#[test]
fn render_leaves_bytes_past_the_bitmap() {
    let data = sample_font();
    let font = FontInfo::new(&data).unwrap();
    let scale = font.scale_for_pixel_height(16.0);

    let metrics = font.glyph_metrics(sample::SQUARE, scale).unwrap();
    let size = metrics.width * metrics.height;
    let mut out = vec![7; size + 10];

    font.render_glyph(sample::SQUARE, scale, metrics.width, metrics.height, &mut out)
        .unwrap();

    assert!(out[size..].iter().all(|&c| c == 7));
    assert!(font
        .render_glyph(sample::SQUARE, scale, metrics.width, metrics.height, &mut out[..size - 1])
        .is_err());
}
