/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use night_bmp::{probe_bmp, BmpDecoder};
use night_core::options::DecoderOptions;

/// A WinBMPv2 file, 12 byte info header and 3 byte palette entries
fn core_header_file(width: u16, height: u16, depth: u16, palette: &[[u8; 3]], pixels: &[u8]) -> Vec<u8> {
    let offset = 14 + 12 + palette.len() * 3;
    let mut out = b"BM".to_vec();
    out.extend_from_slice(&((offset + pixels.len()) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.extend_from_slice(&12_u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&depth.to_le_bytes());
    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend_from_slice(pixels);
    out
}

#[test]
fn test_one_bit_palette() {
    let palette = [[0, 0, 0], [255, 255, 255]];
    // 10 pixels need two bytes, padded to four
    let file = core_header_file(10, 1, 1, &palette, &[0b1010_0000, 0b0100_0000, 0, 0]);

    assert!(probe_bmp(&file));
    let image = BmpDecoder::new(&file).decode_rgba().unwrap();
    let white: Vec<bool> = image.pixels().iter().map(|px| px[0] == 255).collect();

    assert_eq!(
        white,
        [true, false, true, false, false, false, false, false, false, true]
    );
    assert!(image.pixels().iter().all(|px| px[3] == 255));
}

#[test]
fn test_sixteen_bit_555() {
    let red = 0x7C00_u16.to_le_bytes();
    let blue = 0x001F_u16.to_le_bytes();
    let file = core_header_file(2, 1, 16, &[], &[red[0], red[1], blue[0], blue[1]]);

    let image = BmpDecoder::new(&file).decode_rgba().unwrap();
    assert_eq!(image.as_bytes(), &[255, 0, 0, 255, 0, 0, 255, 255]);
}

#[test]
fn test_limits_and_probe() {
    let file = core_header_file(8, 8, 24, &[], &[0; 8 * 8 * 3]);
    let options = DecoderOptions::default().set_max_height(4);

    assert!(BmpDecoder::new_with_options(&file, options).decode_headers().is_err());
    assert!(!probe_bmp(b"BM"));
    assert!(!probe_bmp(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn test_every_prefix_fails() {
    let file = core_header_file(3, 2, 24, &[], &[7; 12 * 2]);
    assert!(BmpDecoder::new(&file).decode_rgba().is_ok());

    for len in 0..file.len() {
        assert!(BmpDecoder::new(&file[..len]).decode_rgba().is_err(), "{len}");
    }
}
