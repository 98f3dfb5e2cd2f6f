/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub const PNG_SIGNATURE: u64 = 0x89504E470D0A1A0A;

/// Size of IDAT chunks written by the encoder
pub const IDAT_CHUNK_SIZE: usize = 8192;

/// Adam7 pass origins and spacing
pub const ADAM7_X_ORIGIN: [usize; 7] = [0, 4, 0, 2, 0, 1, 0];
pub const ADAM7_Y_ORIGIN: [usize; 7] = [0, 0, 4, 0, 2, 0, 1];
pub const ADAM7_X_SPACING: [usize; 7] = [8, 8, 4, 4, 2, 2, 1];
pub const ADAM7_Y_SPACING: [usize; 7] = [8, 8, 8, 4, 4, 2, 2];
