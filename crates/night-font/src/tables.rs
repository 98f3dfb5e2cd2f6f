/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! sfnt table directory and the fixed size tables
//!
//! Tables are kept as borrowed slices of the font data, fields are
//! read on demand, nothing is copied out except a handful of header
//! values.

use night_core::bytestream::ByteReader;
use night_core::log::trace;

use crate::errors::FontErrors;

/// A 4-byte table tag identifying a TrueType table.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableTag(pub [u8; 4]);

impl TableTag {
    pub const HEAD: Self = Self(*b"head");
    pub const CMAP: Self = Self(*b"cmap");
    pub const GLYF: Self = Self(*b"glyf");
    pub const LOCA: Self = Self(*b"loca");
    pub const HHEA: Self = Self(*b"hhea");
    pub const HMTX: Self = Self(*b"hmtx");
    pub const MAXP: Self = Self(*b"maxp");
    pub const KERN: Self = Self(*b"kern");
}

impl core::fmt::Debug for TableTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = core::str::from_utf8(&self.0).unwrap_or("????");
        write!(f, "TableTag('{s}')")
    }
}

/// Read a big endian u16 at `offset`
#[inline]
pub(crate) fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

#[inline]
pub(crate) fn read_i16(data: &[u8], offset: usize) -> Option<i16> {
    read_u16(data, offset).map(|x| x as i16)
}

#[inline]
pub(crate) fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// A single entry in the sfnt table directory.
#[derive(Clone, Copy, Debug)]
pub struct TableRecord {
    pub tag:    TableTag,
    pub offset: u32,
    pub length: u32
}

/// The sfnt table directory
pub struct FontFile<'a> {
    pub data:   &'a [u8],
    pub tables: Vec<TableRecord>
}

impl<'a> FontFile<'a> {
    /// Parse the table directory, every record must lie
    /// inside `data`
    pub fn parse(data: &'a [u8]) -> Result<FontFile<'a>, FontErrors> {
        let mut stream = ByteReader::new(data);

        let sfnt_version = stream.get_u32_be_err()?;
        // TrueType 1.0, Apple 'true' or CFF flavoured 'OTTO'
        if !matches!(sfnt_version, 0x0001_0000 | 0x7472_7565 | 0x4F54_544F) {
            return Err(FontErrors::BadMagic);
        }
        let num_tables = stream.get_u16_be_err()?;
        // search range, entry selector, range shift
        stream.skip(6)?;

        let mut tables = Vec::with_capacity(usize::from(num_tables));

        for _ in 0..num_tables {
            let tag_bytes = stream.get_slice(4)?;
            let tag = TableTag([tag_bytes[0], tag_bytes[1], tag_bytes[2], tag_bytes[3]]);
            let _checksum = stream.get_u32_be_err()?;
            let offset = stream.get_u32_be_err()?;
            let length = stream.get_u32_be_err()?;

            let end = (offset as usize).checked_add(length as usize);

            if end.map_or(true, |end| end > data.len()) {
                return Err(FontErrors::TableOutOfBounds(tag.0));
            }
            trace!("Table {:?} at {} length {}", tag, offset, length);

            tables.push(TableRecord {
                tag,
                offset,
                length
            });
        }
        Ok(FontFile { data, tables })
    }

    /// Find a table by tag and return its raw data slice.
    pub fn table_data(&self, tag: TableTag) -> Option<&'a [u8]> {
        self.tables.iter().find(|t| t.tag == tag).and_then(|t| {
            let start = t.offset as usize;
            self.data.get(start..start + t.length as usize)
        })
    }

    /// Like [`table_data`](Self::table_data) but a missing table is an error
    pub fn required(&self, tag: TableTag) -> Result<&'a [u8], FontErrors> {
        self.table_data(tag).ok_or(FontErrors::MissingTable(tag.0))
    }
}

/// Parsed `head` table.
#[derive(Clone, Copy, Debug)]
pub struct HeadTable {
    pub units_per_em:        u16,
    /// 0 = short (u16), 1 = long (u32)
    pub index_to_loc_format: i16
}

impl HeadTable {
    pub fn parse(data: &[u8]) -> Result<HeadTable, FontErrors> {
        if data.len() < 54 {
            return Err(FontErrors::TableOutOfBounds(TableTag::HEAD.0));
        }
        let mut stream = ByteReader::new(data);
        // version, font revision, checksum adjustment
        stream.skip(12)?;

        if stream.get_u32_be_err()? != 0x5F0F_3CF5 {
            return Err(FontErrors::BadMagic);
        }
        let _flags = stream.get_u16_be_err()?;
        let units_per_em = stream.get_u16_be_err()?;

        if !(16..=16384).contains(&units_per_em) {
            return Err(FontErrors::Generic("unitsPerEm outside 16..=16384"));
        }
        // created, modified and the font bounding box
        stream.skip(24)?;
        // mac style, lowest rec ppem, font direction hint
        stream.skip(6)?;
        let index_to_loc_format = stream.get_i16_be_err()?;

        Ok(HeadTable {
            units_per_em,
            index_to_loc_format
        })
    }
}

/// Parsed `hhea` (horizontal header) table.
#[derive(Clone, Copy, Debug)]
pub struct HheaTable {
    pub ascender:      i16,
    pub descender:     i16,
    pub line_gap:      i16,
    pub num_h_metrics: u16
}

impl HheaTable {
    pub fn parse(data: &[u8]) -> Result<HheaTable, FontErrors> {
        if data.len() < 36 {
            return Err(FontErrors::TableOutOfBounds(TableTag::HHEA.0));
        }
        let mut stream = ByteReader::new(data);
        stream.skip(4)?;
        let ascender = stream.get_i16_be_err()?;
        let descender = stream.get_i16_be_err()?;
        let line_gap = stream.get_i16_be_err()?;
        // advance width max, min/max extents, caret fields, reserved, metric data format
        stream.skip(24)?;
        let num_h_metrics = stream.get_u16_be_err()?;

        Ok(HheaTable {
            ascender,
            descender,
            line_gap,
            num_h_metrics
        })
    }
}

/// Number of glyphs from the `maxp` table
pub fn parse_maxp(data: &[u8]) -> Result<u16, FontErrors> {
    read_u16(data, 4).ok_or(FontErrors::TableOutOfBounds(TableTag::MAXP.0))
}

/// Glyph locations from `loca`
#[derive(Clone, Copy, Debug)]
pub struct LocaTable<'a> {
    data:       &'a [u8],
    long:       bool,
    num_glyphs: u16
}

impl<'a> LocaTable<'a> {
    pub fn new(data: &'a [u8], index_to_loc_format: i16, num_glyphs: u16) -> Result<LocaTable<'a>, FontErrors> {
        let long = match index_to_loc_format {
            0 => false,
            1 => true,
            _ => return Err(FontErrors::Generic("Unknown indexToLocFormat"))
        };
        let entry = if long { 4 } else { 2 };

        if data.len() < (usize::from(num_glyphs) + 1) * entry {
            return Err(FontErrors::TableOutOfBounds(TableTag::LOCA.0));
        }
        Ok(LocaTable {
            data,
            long,
            num_glyphs
        })
    }

    /// Byte range of a glyph inside `glyf`
    pub fn glyph_range(&self, glyph: u16) -> Option<(usize, usize)> {
        if glyph >= self.num_glyphs {
            return None;
        }
        let i = usize::from(glyph);

        if self.long {
            Some((
                read_u32(self.data, i * 4)? as usize,
                read_u32(self.data, i * 4 + 4)? as usize
            ))
        } else {
            Some((
                usize::from(read_u16(self.data, i * 2)?) * 2,
                usize::from(read_u16(self.data, i * 2 + 2)?) * 2
            ))
        }
    }
}

/// Horizontal metrics for a glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HMetric {
    pub advance_width:     u16,
    pub left_side_bearing: i16
}

/// The `hmtx` table
#[derive(Clone, Copy, Debug)]
pub struct HmtxTable<'a> {
    data:          &'a [u8],
    num_h_metrics: u16
}

impl<'a> HmtxTable<'a> {
    pub fn new(data: &'a [u8], num_h_metrics: u16) -> Result<HmtxTable<'a>, FontErrors> {
        if num_h_metrics == 0 || data.len() < usize::from(num_h_metrics) * 4 {
            return Err(FontErrors::TableOutOfBounds(TableTag::HMTX.0));
        }
        Ok(HmtxTable {
            data,
            num_h_metrics
        })
    }

    /// Glyphs past the long metrics share the last advance width
    pub fn metric(&self, glyph: u16) -> HMetric {
        let n = usize::from(self.num_h_metrics);
        let g = usize::from(glyph);

        if g < n {
            HMetric {
                advance_width:     read_u16(self.data, g * 4).unwrap_or(0),
                left_side_bearing: read_i16(self.data, g * 4 + 2).unwrap_or(0)
            }
        } else {
            HMetric {
                advance_width:     read_u16(self.data, (n - 1) * 4).unwrap_or(0),
                left_side_bearing: read_i16(self.data, n * 4 + (g - n) * 2).unwrap_or(0)
            }
        }
    }
}
