/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use night_core::bytestream::FnSink;
use night_image::{load, probe, write, EncodeFormat, ImageFormat};
use night_core::options::DecoderOptions;

use crate::random_image;

fn roundtrip(format: EncodeFormat) {
    for (seed, (width, height)) in [(1, 1), (3, 5), (31, 17), (200, 3)].into_iter().enumerate() {
        let image = random_image(width, height, seed as u64);

        let mut encoded = Vec::new();
        write(&mut encoded, format, &image).unwrap();

        let info = probe(&encoded, DecoderOptions::default()).unwrap();
        assert_eq!(info.format, format.image_format());
        assert_eq!((info.width, info.height), (width, height));

        let decoded = load(&encoded).unwrap();
        assert_eq!(decoded, image, "{format:?} {width}x{height} did not round trip");
    }
}

#[test]
fn qoi_is_bit_exact() {
    roundtrip(EncodeFormat::Qoi);
}

#[test]
fn png_pixels_are_bit_exact() {
    roundtrip(EncodeFormat::Png);
}

#[test]
fn chunked_sink_sees_the_same_stream() {
    let image = random_image(40, 40, 99);

    for format in [EncodeFormat::Png, EncodeFormat::Qoi] {
        let mut whole = Vec::new();
        write(&mut whole, format, &image).unwrap();

        let mut pieces = Vec::new();
        let mut calls = 0;
        let sink = FnSink::new(|bytes: &[u8]| {
            calls += 1;
            pieces.extend_from_slice(bytes);
            true
        });
        write(sink, format, &image).unwrap();

        assert!(calls > 0);
        assert_eq!(whole, pieces);
    }
}

#[test]
fn failing_sink_fails_the_write() {
    let image = random_image(16, 16, 5);

    for format in [EncodeFormat::Png, EncodeFormat::Qoi] {
        let sink = FnSink::new(|_: &[u8]| false);
        assert!(write(sink, format, &image).is_err());
    }
}
