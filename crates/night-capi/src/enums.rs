/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::c_int;

use night_image::EncodeFormat;

/// Output formats for `NightImageWrite`
///
/// Functions receive this as a plain `int` so that an out of range
/// value from C is an error instead of an invalid enum.
#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NightImageWriteFormat {
    Png = 0,
    Qoi = 1
}

impl NightImageWriteFormat {
    pub fn from_int(value: c_int) -> Option<NightImageWriteFormat> {
        match value {
            0 => Some(NightImageWriteFormat::Png),
            1 => Some(NightImageWriteFormat::Qoi),
            _ => None
        }
    }

    pub const fn to_encode_format(self) -> EncodeFormat {
        match self {
            NightImageWriteFormat::Png => EncodeFormat::Png,
            NightImageWriteFormat::Qoi => EncodeFormat::Qoi
        }
    }
}
