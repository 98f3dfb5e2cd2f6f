/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pair kerning from the `kern` table
use night_core::log::{trace, warn};

use crate::tables::{read_i16, read_u16, read_u32};

const PAIR_SIZE: usize = 6;

/// Format 0 pair list of the first horizontal subtable
#[derive(Clone, Copy, Debug)]
pub struct KernTable<'a> {
    pairs:  &'a [u8],
    sorted: bool
}

#[inline]
fn pair_key(pairs: &[u8], index: usize) -> u32 {
    read_u32(pairs, index * PAIR_SIZE).unwrap_or(u32::MAX)
}

impl<'a> KernTable<'a> {
    /// Parse a `kern` table.
    ///
    /// Returns `None` when the table holds nothing we can use, which
    /// is the same as the font having no kerning.
    pub fn parse(data: &'a [u8]) -> Option<KernTable<'a>> {
        let version = read_u16(data, 0)?;

        if version != 0 {
            warn!("kern table version {version} not supported, kerning disabled");
            return None;
        }
        let num_tables = read_u16(data, 2)?;
        let mut offset = 4_usize;

        for _ in 0..num_tables {
            let length = usize::from(read_u16(data, offset + 2)?);
            let coverage = read_u16(data, offset + 4)?;
            let format = coverage >> 8;
            let horizontal = coverage & 1 == 1;
            let minimum_or_cross = coverage & 0b110 != 0;

            if format == 0 && horizontal && !minimum_or_cross {
                let num_pairs = usize::from(read_u16(data, offset + 6)?);
                let start = offset + 14;
                let end = start + num_pairs * PAIR_SIZE;

                let Some(pairs) = data.get(start..end) else {
                    warn!("kern pair list truncated, kerning disabled");
                    return None;
                };
                let sorted = (1..num_pairs).all(|i| pair_key(pairs, i - 1) <= pair_key(pairs, i));

                if !sorted {
                    warn!("kern pairs not sorted, falling back to linear search");
                }
                trace!("kern: {} pairs", num_pairs);

                return Some(KernTable { pairs, sorted });
            }
            if length < 6 {
                return None;
            }
            offset += length;
        }
        None
    }

    pub fn num_pairs(&self) -> usize {
        self.pairs.len() / PAIR_SIZE
    }

    /// Adjustment in font units between two glyphs, 0 if absent
    pub fn kerning(&self, left: u16, right: u16) -> i16 {
        let needle = (u32::from(left) << 16) | u32::from(right);
        let n = self.num_pairs();

        let index = if self.sorted {
            let (mut lo, mut hi) = (0, n);
            let mut found = None;

            while lo < hi {
                let mid = (lo + hi) / 2;
                let key = pair_key(self.pairs, mid);

                match key.cmp(&needle) {
                    core::cmp::Ordering::Less => lo = mid + 1,
                    core::cmp::Ordering::Greater => hi = mid,
                    core::cmp::Ordering::Equal => {
                        found = Some(mid);
                        break;
                    }
                }
            }
            found
        } else {
            (0..n).find(|i| pair_key(self.pairs, *i) == needle)
        };

        index
            .and_then(|i| read_i16(self.pairs, i * PAIR_SIZE + 4))
            .unwrap_or(0)
    }
}
