/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::{c_float, c_int, c_void};
use std::ptr;

use night_core::pixels::PixelBuffer;
use night_platform::*;

use crate::{bmp_file, random_image};
use crate::ttf::{sample, sample_font};

unsafe extern "C" fn collect(context: *mut c_void, data: *mut c_void, size: c_int) {
    let out = &mut *(context as *mut Vec<u8>);
    out.extend_from_slice(std::slice::from_raw_parts(data as *const u8, size as usize));
}

fn write_via_callback(format: c_int, image: &PixelBuffer) -> Option<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    let callback: NightWriteFn = Some(collect);

    let ok = unsafe {
        NightImageWrite(
            &callback,
            (&mut out as *mut Vec<u8>).cast(),
            format,
            image.width() as c_int,
            image.height() as c_int,
            image.as_bytes().as_ptr().cast()
        )
    };
    (ok == NIGHT_TRUE).then_some(out)
}

#[test]
fn write_then_load() {
    let image = random_image(13, 6, 42);

    for format in [0, 1] {
        let encoded = write_via_callback(format, &image).unwrap();

        let (mut w, mut h) = (0, 0);
        let pixels = unsafe { NightImageLoad(encoded.as_ptr(), encoded.len() as c_int, &mut w, &mut h) };
        assert!(!pixels.is_null());
        assert_eq!((w, h), (13, 6));

        let decoded = unsafe { std::slice::from_raw_parts(pixels, (w * h * 4) as usize) };
        assert_eq!(decoded, image.as_bytes());

        unsafe { NightImageFree(pixels) };
    }
}

#[test]
fn qoi_callback_matches_library_output() {
    let image = PixelBuffer::filled(2, 2, [255; 4]).unwrap();

    let mut direct = Vec::new();
    night_image::write(&mut direct, night_image::EncodeFormat::Qoi, &image).unwrap();

    assert_eq!(write_via_callback(1, &image), Some(direct));
}

#[test]
fn load_rejects_garbage_and_truncation() {
    let image = random_image(4, 4, 1);
    let encoded = write_via_callback(0, &image).unwrap();

    for len in 0..encoded.len() {
        let prefix = encoded[..len].to_vec();
        let (mut w, mut h) = (-1, -1);
        let pixels = unsafe { NightImageLoad(prefix.as_ptr(), len as c_int, &mut w, &mut h) };

        assert!(pixels.is_null());
    }
    let garbage = [0x42_u8; 64];
    assert!(unsafe { NightImageLoad(garbage.as_ptr(), 64, ptr::null_mut(), ptr::null_mut()) }.is_null());
    assert!(unsafe { NightImageLoad(ptr::null(), 10, ptr::null_mut(), ptr::null_mut()) }.is_null());
}

#[test]
fn font_init_rejects_truncation() {
    let mut data = sample_font();
    let len = data.len();

    for prefix in [0, 1, 11, 12, 100, len / 2, len - 1] {
        let font = unsafe { NightFontInit(data.as_mut_ptr(), prefix as c_int) };
        assert!(font.is_null(), "prefix {prefix} parsed");
    }
    let font = unsafe { NightFontInit(data.as_mut_ptr(), len as c_int) };
    assert!(!font.is_null());
    unsafe { NightFontFree(font) };
}

#[test]
fn font_queries() {
    let mut data = sample_font();
    let font = unsafe { NightFontInit(data.as_mut_ptr(), data.len() as c_int) };
    assert!(!font.is_null());

    unsafe {
        let (mut ascent, mut descent, mut line_gap) = (0, 0, 0);
        NightFontGetMetrics(font, &mut ascent, &mut descent, &mut line_gap);
        assert_eq!((ascent, descent, line_gap), (900, -200, 40));

        let scale = NightFontGetScale(font, 128.0);
        assert!((scale * f32::from(sample::UNITS_PER_EM) - 128.0).abs() < 1e-4);

        let a = NightFontGetGlyphIndex(font, 'A' as c_int);
        let b = NightFontGetGlyphIndex(font, 'B' as c_int);
        assert_eq!((a, b), (1, 2));
        assert_eq!(NightFontGetGlyphIndex(font, 'Z' as c_int), 0);
        assert_eq!(NightFontGetGlyphIndex(font, -5), 0);

        assert!((NightFontGetKerning(font, a, b, scale) + 8.0).abs() < 1e-5);
        assert_eq!(NightFontGetKerning(font, b, a, scale), 0.0);
        assert_eq!(NightFontGetKerning(font, -1, a, scale), 0.0);

        let (mut w, mut h, mut visible) = (0, 0, 0);
        let (mut advance, mut x, mut y): (c_float, c_float, c_float) = (0.0, 0.0, 0.0);
        NightFontGetCharacter(font, a, scale, &mut w, &mut h, &mut advance, &mut x, &mut y, &mut visible);

        assert_eq!((w, h, visible), (64, 64, 1));
        assert_eq!((advance, x, y), (96.0, 16.0, -64.0));

        let mut pixels = vec![0_u8; (w * h) as usize];
        NightFontGetPixels(font, pixels.as_mut_ptr(), a, w, h, scale);
        assert!(pixels.iter().all(|&c| c >= 250));

        NightFontFree(font);
    }
}

#[test]
fn font_failures_zero_outputs() {
    let mut data = sample_font();
    let font = unsafe { NightFontInit(data.as_mut_ptr(), data.len() as c_int) };

    unsafe {
        // missing glyph: valid empty box
        let (mut w, mut h, mut visible) = (-1, -1, -1);
        let (mut advance, mut x, mut y): (c_float, c_float, c_float) = (-1.0, -1.0, -1.0);
        NightFontGetCharacter(font, 0, 1.0, &mut w, &mut h, &mut advance, &mut x, &mut y, &mut visible);
        assert_eq!((w, h, visible), (0, 0, 0));

        // cycle: fails, everything zeroed
        let cycle = NightFontGetGlyphIndex(font, 'C' as c_int);
        NightFontGetCharacter(font, cycle, 1.0, &mut w, &mut h, &mut advance, &mut x, &mut y, &mut visible);
        assert_eq!((w, h, visible), (0, 0, 0));
        assert_eq!((advance, x, y), (0.0, 0.0, 0.0));

        let mut pixels = [9_u8; 16];
        NightFontGetPixels(font, pixels.as_mut_ptr(), cycle, 4, 4, 1.0);
        assert_eq!(pixels, [0; 16]);

        // null handle
        NightFontGetCharacter(ptr::null_mut(), 1, 1.0, &mut w, &mut h, &mut advance, &mut x, &mut y, &mut visible);
        assert_eq!((w, h, visible), (0, 0, 0));
        assert_eq!(NightFontGetScale(ptr::null_mut(), 10.0), 0.0);

        NightFontFree(font);
        NightFontFree(ptr::null_mut());
    }
}

#[test]
fn load_rejects_bmp_masks_with_holes() {
    let image = PixelBuffer::filled(1, 1, [255; 4]).unwrap();
    let file = bmp_file(&image, Some([0x8000_0001, 0x00FF_0000, 0x0000_FF00]));

    let (mut w, mut h) = (-1, -1);
    let pixels = unsafe { NightImageLoad(file.as_ptr(), file.len() as c_int, &mut w, &mut h) };
    assert!(pixels.is_null());

    let file = bmp_file(&image, Some([0xFF00_0000, 0x00FF_0000, 0x0000_FF00]));
    let pixels = unsafe { NightImageLoad(file.as_ptr(), file.len() as c_int, &mut w, &mut h) };
    assert!(!pixels.is_null());
    assert_eq!((w, h), (1, 1));

    let decoded = unsafe { std::slice::from_raw_parts(pixels, 4) };
    assert_eq!(decoded, &[255; 4]);
    unsafe { NightImageFree(pixels) };
}
