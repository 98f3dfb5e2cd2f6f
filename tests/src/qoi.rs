/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use night_core::pixels::PixelBuffer;
use night_image::{load, write, EncodeFormat, ImageFormat};

const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

#[test]
fn white_2x2_exact_bytes() {
    let image = PixelBuffer::filled(2, 2, [255; 4]).unwrap();

    let mut out = Vec::new();
    let written = write(&mut out, EncodeFormat::Qoi, &image).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(b"qoif");
    expected.extend_from_slice(&2_u32.to_be_bytes());
    expected.extend_from_slice(&2_u32.to_be_bytes());
    // channels, colorspace
    expected.extend_from_slice(&[4, 0]);
    // one color op for white then a run of three
    expected.extend_from_slice(&[0x55, 0xc2]);
    expected.extend_from_slice(&END_MARKER);

    assert_eq!(out, expected);
    assert_eq!(written, expected.len());
}

#[test]
fn header_and_marker_frame_every_image() {
    for (width, height) in [(1, 1), (7, 3), (64, 65)] {
        let image = crate::random_image(width, height, (width * height) as u64);

        let mut out = Vec::new();
        write(&mut out, EncodeFormat::Qoi, &image).unwrap();

        assert_eq!(&out[..4], b"qoif");
        assert_eq!(&out[4..8], &(width as u32).to_be_bytes());
        assert_eq!(&out[8..12], &(height as u32).to_be_bytes());
        assert_eq!(&out[12..14], &[4, 0]);
        assert!(out.ends_with(&END_MARKER));

        assert_eq!(night_image::guess_format(&out), Some(ImageFormat::Qoi));
    }
}
