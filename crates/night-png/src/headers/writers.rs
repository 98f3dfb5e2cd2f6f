/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Chunk writers used by the encoder

use night_core::bytestream::{ByteIoError, ByteSink, ByteWriter};

use crate::crc::calc_crc_with_bytes;
use crate::enums::PngColor;

/// Write a complete chunk, length, name, payload and crc
pub(crate) fn write_chunk<T: ByteSink>(
    name: &[u8; 4], data: &[u8], writer: &mut ByteWriter<T>
) -> Result<(), ByteIoError> {
    let length = u32::try_from(data.len()).map_err(|_| ByteIoError::Generic("Chunk too large"))?;

    writer.write_u32_be_err(length)?;
    writer.write_all(name)?;
    writer.write_all(data)?;

    let crc = !calc_crc_with_bytes(data, calc_crc_with_bytes(name, u32::MAX));
    writer.write_u32_be_err(crc)?;

    Ok(())
}

/// Contents of an IHDR chunk for an 8 bit RGBA image
pub(crate) fn write_ihdr(width: u32, height: u32) -> [u8; 13] {
    let mut ihdr = [0_u8; 13];

    ihdr[0..4].copy_from_slice(&width.to_be_bytes());
    ihdr[4..8].copy_from_slice(&height.to_be_bytes());
    // depth
    ihdr[8] = 8;
    ihdr[9] = PngColor::RGBA.to_int();
    // compression, filter and interlace methods are all zero
    ihdr
}
