/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! CRC-32 as used by png chunks, polynomial 0xEDB88320

const fn make_crc_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut n = 0;

    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;

        while k < 8 {
            if c & 1 == 1 {
                c = 0xEDB8_8320 ^ (c >> 1);
            } else {
                c >>= 1;
            }
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = make_crc_table();

/// Update a running crc with `bytes`
///
/// Start with `u32::MAX` and invert the final value
#[inline]
pub fn calc_crc_with_bytes(bytes: &[u8], crc: u32) -> u32 {
    let mut crc = crc;

    for byte in bytes {
        crc = CRC_TABLE[((crc ^ u32::from(*byte)) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc
}

/// Calculate the crc of a complete buffer
pub fn calc_crc(bytes: &[u8]) -> u32 {
    !calc_crc_with_bytes(bytes, u32::MAX)
}

#[test]
fn crc_of_iend() {
    // every png ends with this crc
    assert_eq!(calc_crc(b"IEND"), 0xAE42_6082);
}
