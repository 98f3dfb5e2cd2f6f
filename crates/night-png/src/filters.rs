/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Png scanline filters
//!
//! `components` is the filter stride, bytes per complete pixel,
//! rounded up to one for bit depths below 8.
pub(crate) use de_filter::{
    handle_avg, handle_avg_first, handle_paeth, handle_paeth_first, handle_sub, handle_up
};
pub(crate) use en_filter::{choose_compression_filter, filter_scanline};

mod de_filter;
mod en_filter;

/// Paeth predictor, pick the neighbour closest to `a + b - c`
///
/// Ties are broken in the order a, b, c
#[inline(always)]
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let a = i16::from(a);
    let b = i16::from(b);
    let c = i16::from(c);

    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        a as u8
    } else if pb <= pc {
        b as u8
    } else {
        c as u8
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::enums::FilterMethod;

    #[test]
    fn paeth_predictor() {
        assert_eq!(paeth(10, 20, 10), 20);
        assert_eq!(paeth(20, 10, 10), 20);
        assert_eq!(paeth(5, 5, 5), 5);
        assert_eq!(paeth(0, 255, 255), 0);
    }

    /// filtering then de-filtering any row reproduces the row
    #[test]
    fn filter_inverse() {
        let previous: vec::Vec<u8> = (0..24_u32).map(|x| (x * 37 % 256) as u8).collect();
        let current: vec::Vec<u8> = (0..24_u32).map(|x| (x * 91 % 256) as u8).collect();

        for filter in FilterMethod::ENCODE_CANDIDATES {
            let mut filtered = vec![0; current.len() + 1];
            filter_scanline(&current, &previous, &mut filtered, filter, 4);
            assert_eq!(filtered[0], filter.to_int());

            let mut restored = vec![0; current.len()];
            let raw = &filtered[1..];
            match filter {
                FilterMethod::None => restored.copy_from_slice(raw),
                FilterMethod::Sub => handle_sub(raw, &mut restored, 4),
                FilterMethod::Up => handle_up(&previous, raw, &mut restored),
                FilterMethod::Average => handle_avg(&previous, raw, &mut restored, 4),
                FilterMethod::Paeth => handle_paeth(&previous, raw, &mut restored, 4),
                _ => unreachable!()
            }
            assert_eq!(restored, current, "{filter:?}");
        }
    }

    #[test]
    fn first_row_variants_match_zero_previous() {
        let raw: vec::Vec<u8> = (0..12_u8).map(|x| x.wrapping_mul(29)).collect();
        let zeros = [0_u8; 12];

        let mut a = [0; 12];
        let mut b = [0; 12];
        handle_paeth(&zeros, &raw, &mut a, 3);
        handle_paeth_first(&raw, &mut b, 3);
        assert_eq!(a, b);

        handle_avg(&zeros, &raw, &mut a, 3);
        handle_avg_first(&raw, &mut b, 3);
        assert_eq!(a, b);
    }
}
