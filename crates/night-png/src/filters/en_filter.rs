/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::enums::FilterMethod;
use crate::filters::paeth;

/// Filter `current` with `filter` writing the filter type byte
/// followed by the filtered bytes into `out`
///
/// `previous` is the unfiltered row above, all zeroes for the first row,
/// `out` must be one byte longer than `current`
pub fn filter_scanline(
    current: &[u8], previous: &[u8], out: &mut [u8], filter: FilterMethod, components: usize
) {
    let (filter_byte, out) = out.split_at_mut(1);
    filter_byte[0] = filter.to_int();

    let left = |i: usize| -> u8 {
        if i >= components {
            current[i - components]
        } else {
            0
        }
    };
    let upper_left = |i: usize| -> u8 {
        if i >= components {
            previous[i - components]
        } else {
            0
        }
    };

    match filter {
        FilterMethod::None => out.copy_from_slice(current),
        FilterMethod::Sub => {
            for (i, byte) in out.iter_mut().enumerate() {
                *byte = current[i].wrapping_sub(left(i));
            }
        }
        FilterMethod::Up => {
            for (i, byte) in out.iter_mut().enumerate() {
                *byte = current[i].wrapping_sub(previous[i]);
            }
        }
        FilterMethod::Average | FilterMethod::AvgFirst => {
            for (i, byte) in out.iter_mut().enumerate() {
                let avg = ((u16::from(left(i)) + u16::from(previous[i])) >> 1) as u8;
                *byte = current[i].wrapping_sub(avg);
            }
        }
        FilterMethod::Paeth | FilterMethod::PaethFirst => {
            for (i, byte) in out.iter_mut().enumerate() {
                *byte = current[i].wrapping_sub(paeth(left(i), previous[i], upper_left(i)));
            }
        }
    }
}

/// Pick the filter whose output has the smallest sum of absolute
/// values, bytes read as signed.
///
/// Ties go to the lowest filter type number. `scratch` must be
/// one byte longer than `current`.
pub fn choose_compression_filter(
    current: &[u8], previous: &[u8], scratch: &mut [u8], components: usize
) -> FilterMethod {
    let mut best_filter = FilterMethod::None;
    let mut best_sum = u64::MAX;

    for filter in FilterMethod::ENCODE_CANDIDATES {
        filter_scanline(current, previous, scratch, filter, components);

        let sum: u64 = scratch[1..]
            .iter()
            .map(|x| u64::from((*x as i8).unsigned_abs()))
            .sum();

        // strictly less, so earlier (lower numbered) filters win ties
        if sum < best_sum {
            best_sum = sum;
            best_filter = filter;
        }
    }
    best_filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_row_prefers_sub_over_none() {
        let current = [200_u8; 16];
        let previous = [0_u8; 16];
        let mut scratch = [0_u8; 17];
        // None: |200 as i8| = 56 per byte, Sub: 56 once then zeros
        assert_eq!(
            choose_compression_filter(&current, &previous, &mut scratch, 4),
            FilterMethod::Sub
        );
    }

    #[test]
    fn ties_go_to_lowest_number() {
        let zeros = [0_u8; 8];
        let mut scratch = [0_u8; 9];
        assert_eq!(
            choose_compression_filter(&zeros, &zeros, &mut scratch, 4),
            FilterMethod::None
        );
    }
}
