/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Character to glyph mapping (`cmap`)
//!
//! Only one subtable is kept, the best one for unicode lookups.
//! Preference order is
//!
//! 1. format 12 on a full repertoire encoding (3,10), (0,4), (0,6)
//! 2. format 4 on a BMP encoding (3,1), (0,3) or any other unicode platform entry
//! 3. format 6 or format 0 anywhere
use night_core::log::{trace, warn};

use crate::errors::FontErrors;
use crate::tables::{read_u16, read_u32};

/// A cmap subtable we know how to read, borrowed from the font
#[derive(Clone, Copy, Debug)]
pub enum CmapSubtable<'a> {
    /// Byte encoding table, 256 one byte glyph ids
    Format0(&'a [u8]),
    /// Segment mapping to delta values
    Format4 {
        seg_count: usize,
        data:      &'a [u8]
    },
    /// Trimmed table mapping
    Format6 {
        first_code:  u16,
        entry_count: u16,
        data:        &'a [u8]
    },
    /// Segmented coverage
    Format12 { num_groups: usize, data: &'a [u8] }
}

fn rank(platform: u16, encoding: u16, format: u16) -> u8 {
    match (format, platform, encoding) {
        (12, 3, 10) | (12, 0, 4) | (12, 0, 6) => 4,
        (4, 3, 1) | (4, 0, _) => 3,
        (4, 3, 0) => 2,
        (6 | 0, _, _) => 1,
        _ => 0
    }
}

impl<'a> CmapSubtable<'a> {
    /// Pick the best subtable from a `cmap` table
    pub fn select(cmap: &'a [u8]) -> Result<CmapSubtable<'a>, FontErrors> {
        let num_tables = read_u16(cmap, 2).ok_or(FontErrors::UnexpectedEof)?;

        let mut best: Option<(u8, CmapSubtable<'a>)> = None;

        for i in 0..usize::from(num_tables) {
            let record = 4 + i * 8;
            let platform = read_u16(cmap, record).ok_or(FontErrors::UnexpectedEof)?;
            let encoding = read_u16(cmap, record + 2).ok_or(FontErrors::UnexpectedEof)?;
            let offset = read_u32(cmap, record + 4).ok_or(FontErrors::UnexpectedEof)? as usize;

            let Some(format) = read_u16(cmap, offset) else {
                warn!("cmap record ({platform},{encoding}) points outside the table");
                continue;
            };
            let score = rank(platform, encoding, format);

            trace!("cmap subtable ({},{}) format {} rank {}", platform, encoding, format, score);

            if score == 0 || best.as_ref().map_or(false, |(b, _)| *b >= score) {
                continue;
            }
            match Self::parse(&cmap[offset..], format) {
                Ok(table) => best = Some((score, table)),
                Err(e) => warn!("Ignoring cmap subtable ({platform},{encoding}): {e:?}")
            }
        }
        best.map(|(_, table)| table)
            .ok_or(FontErrors::UnsupportedCmap)
    }

    fn parse(data: &'a [u8], format: u16) -> Result<CmapSubtable<'a>, FontErrors> {
        match format {
            0 => {
                let table = data.get(6..6 + 256).ok_or(FontErrors::UnexpectedEof)?;
                Ok(CmapSubtable::Format0(table))
            }
            4 => {
                let seg_count = usize::from(read_u16(data, 6).ok_or(FontErrors::UnexpectedEof)? / 2);
                // endCode, pad, startCode, idDelta, idRangeOffset
                if data.len() < 16 + seg_count * 8 {
                    return Err(FontErrors::UnexpectedEof);
                }
                Ok(CmapSubtable::Format4 { seg_count, data })
            }
            6 => {
                let first_code = read_u16(data, 6).ok_or(FontErrors::UnexpectedEof)?;
                let entry_count = read_u16(data, 8).ok_or(FontErrors::UnexpectedEof)?;

                if data.len() < 10 + usize::from(entry_count) * 2 {
                    return Err(FontErrors::UnexpectedEof);
                }
                Ok(CmapSubtable::Format6 {
                    first_code,
                    entry_count,
                    data
                })
            }
            12 => {
                let num_groups = read_u32(data, 12).ok_or(FontErrors::UnexpectedEof)? as usize;

                let needed = num_groups
                    .checked_mul(12)
                    .and_then(|x| x.checked_add(16))
                    .ok_or(FontErrors::UnexpectedEof)?;
                if data.len() < needed {
                    return Err(FontErrors::UnexpectedEof);
                }
                Ok(CmapSubtable::Format12 { num_groups, data })
            }
            _ => Err(FontErrors::UnsupportedCmap)
        }
    }

    /// Map a codepoint to a glyph index, 0 when unmapped
    pub fn lookup(&self, codepoint: u32) -> u16 {
        match *self {
            CmapSubtable::Format0(table) => table
                .get(codepoint as usize)
                .map_or(0, |glyph| u16::from(*glyph)),
            CmapSubtable::Format4 { seg_count, data } => {
                u16::try_from(codepoint).map_or(0, |c| lookup_format4(data, seg_count, c))
            }
            CmapSubtable::Format6 {
                first_code,
                entry_count,
                data
            } => {
                let Some(index) = codepoint.checked_sub(u32::from(first_code)) else {
                    return 0;
                };
                if index >= u32::from(entry_count) {
                    return 0;
                }
                read_u16(data, 10 + index as usize * 2).unwrap_or(0)
            }
            CmapSubtable::Format12 { num_groups, data } => {
                lookup_format12(data, num_groups, codepoint)
            }
        }
    }
}

fn lookup_format4(data: &[u8], seg_count: usize, c: u16) -> u16 {
    let end_codes = 14;
    let start_codes = end_codes + seg_count * 2 + 2;
    let id_deltas = start_codes + seg_count * 2;
    let id_range_offsets = id_deltas + seg_count * 2;

    // first segment whose endCode >= c
    let (mut lo, mut hi) = (0, seg_count);

    while lo < hi {
        let mid = (lo + hi) / 2;
        let end = read_u16(data, end_codes + mid * 2).unwrap_or(0);

        if end < c {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    if lo == seg_count {
        return 0;
    }
    let seg = lo;
    let start = read_u16(data, start_codes + seg * 2).unwrap_or(u16::MAX);

    if c < start {
        return 0;
    }
    let delta = read_u16(data, id_deltas + seg * 2).unwrap_or(0);
    let range_offset_pos = id_range_offsets + seg * 2;
    let range_offset = read_u16(data, range_offset_pos).unwrap_or(0);

    if range_offset == 0 {
        return c.wrapping_add(delta);
    }
    // offset is relative to the idRangeOffset entry itself
    let glyph_pos = range_offset_pos + usize::from(range_offset) + usize::from(c - start) * 2;

    match read_u16(data, glyph_pos) {
        Some(0) | None => 0,
        Some(glyph) => glyph.wrapping_add(delta)
    }
}

fn lookup_format12(data: &[u8], num_groups: usize, c: u32) -> u16 {
    let (mut lo, mut hi) = (0, num_groups);

    while lo < hi {
        let mid = (lo + hi) / 2;
        let group = 16 + mid * 12;
        let start = read_u32(data, group).unwrap_or(u32::MAX);
        let end = read_u32(data, group + 4).unwrap_or(0);

        if c < start {
            hi = mid;
        } else if c > end {
            lo = mid + 1;
        } else {
            let start_glyph = read_u32(data, group + 8).unwrap_or(0);
            return start_glyph
                .checked_add(c - start)
                .and_then(|glyph| u16::try_from(glyph).ok())
                .unwrap_or(0);
        }
    }
    0
}
