/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Builds small TrueType files in memory.
//!
//! Only the tables the font crate reads are written. Checksums are
//! left as zero and the last table is not padded, so every strict
//! prefix of the output has a directory entry running past the end.

/// One outline point in font units
#[derive(Copy, Clone, Debug)]
pub struct TestPoint {
    pub x:        i16,
    pub y:        i16,
    pub on_curve: bool
}

pub const fn on(x: i16, y: i16) -> TestPoint {
    TestPoint { x, y, on_curve: true }
}

pub const fn off(x: i16, y: i16) -> TestPoint {
    TestPoint { x, y, on_curve: false }
}

#[derive(Clone, Debug)]
pub enum TestGlyph {
    Empty,
    /// Contours of points
    Simple(Vec<Vec<TestPoint>>),
    /// References as (glyph, dx, dy)
    Composite(Vec<(u16, i16, i16)>)
}

#[derive(Clone, Debug)]
pub struct FontBuilder {
    units_per_em: u16,
    ascent:       i16,
    descent:      i16,
    line_gap:     i16,
    glyphs:       Vec<(TestGlyph, u16)>,
    mappings:     Vec<(u16, u16)>,
    kerning:      Vec<(u16, u16, i16)>
}

impl FontBuilder {
    /// A font with a single empty `.notdef` glyph
    pub fn new(units_per_em: u16) -> FontBuilder {
        FontBuilder {
            units_per_em,
            ascent: 0,
            descent: 0,
            line_gap: 0,
            glyphs: vec![(TestGlyph::Empty, units_per_em / 2)],
            mappings: Vec::new(),
            kerning: Vec::new()
        }
    }

    pub fn set_vertical_metrics(mut self, ascent: i16, descent: i16, line_gap: i16) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self.line_gap = line_gap;
        self
    }

    /// Add a glyph, its index is the number of glyphs added before it plus one
    pub fn glyph(mut self, glyph: TestGlyph, advance: u16) -> Self {
        self.glyphs.push((glyph, advance));
        self
    }

    /// Map a BMP codepoint to a glyph index
    pub fn map(mut self, codepoint: char, glyph: u16) -> Self {
        self.mappings.push((codepoint as u16, glyph));
        self
    }

    pub fn kern(mut self, left: u16, right: u16, value: i16) -> Self {
        self.kerning.push((left, right, value));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let (glyf, loca) = self.glyf_and_loca();

        let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![
            (*b"cmap", self.cmap()),
            (*b"head", self.head()),
            (*b"hhea", self.hhea()),
            (*b"hmtx", self.hmtx()),
            (*b"loca", loca),
            (*b"maxp", self.maxp()),
        ];
        if !self.kerning.is_empty() {
            tables.push((*b"kern", self.kern_table()));
        }
        // glyf last so it is never padded
        tables.push((*b"glyf", glyf));

        let mut out = Vec::new();
        put_u32(&mut out, 0x0001_0000);
        put_u16(&mut out, tables.len() as u16);
        // search range, entry selector, range shift
        put_u16(&mut out, 0);
        put_u16(&mut out, 0);
        put_u16(&mut out, 0);

        let mut offset = 12 + 16 * tables.len();

        for (tag, data) in &tables {
            out.extend_from_slice(tag);
            put_u32(&mut out, 0);
            put_u32(&mut out, offset as u32);
            put_u32(&mut out, data.len() as u32);
            offset += (data.len() + 3) & !3;
        }
        let last = tables.len() - 1;

        for (i, (_, data)) in tables.iter().enumerate() {
            out.extend_from_slice(data);

            if i != last {
                out.resize((out.len() + 3) & !3, 0);
            }
        }
        out
    }

    fn head(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, 0x0001_0000);
        put_u32(&mut out, 0x0001_0000);
        put_u32(&mut out, 0);
        put_u32(&mut out, 0x5F0F_3CF5);
        put_u16(&mut out, 0);
        put_u16(&mut out, self.units_per_em);
        // created, modified, bounding box, mac style, lowest ppem, direction hint
        out.resize(out.len() + 30, 0);
        // long loca offsets
        put_u16(&mut out, 1);
        put_u16(&mut out, 0);
        out
    }

    fn hhea(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, 0x0001_0000);
        put_u16(&mut out, self.ascent as u16);
        put_u16(&mut out, self.descent as u16);
        put_u16(&mut out, self.line_gap as u16);
        out.resize(out.len() + 24, 0);
        put_u16(&mut out, self.glyphs.len() as u16);
        out
    }

    fn maxp(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, 0x0000_5000);
        put_u16(&mut out, self.glyphs.len() as u16);
        out
    }

    fn hmtx(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for (glyph, advance) in &self.glyphs {
            let lsb = match glyph {
                TestGlyph::Simple(contours) => {
                    contours.iter().flatten().map(|p| p.x).min().unwrap_or(0)
                }
                _ => 0
            };
            put_u16(&mut out, *advance);
            put_u16(&mut out, lsb as u16);
        }
        out
    }

    /// A (3,1) format 4 subtable with one segment per mapping
    fn cmap(&self) -> Vec<u8> {
        let mut mappings = self.mappings.clone();
        mappings.sort_unstable();
        mappings.push((0xFFFF, 0));

        let seg_count = mappings.len();

        let mut sub = Vec::new();
        put_u16(&mut sub, 4);
        put_u16(&mut sub, (16 + seg_count * 8) as u16);
        put_u16(&mut sub, 0);
        put_u16(&mut sub, (seg_count * 2) as u16);
        // search range, entry selector, range shift
        put_u16(&mut sub, 0);
        put_u16(&mut sub, 0);
        put_u16(&mut sub, 0);

        for (code, _) in &mappings {
            put_u16(&mut sub, *code);
        }
        put_u16(&mut sub, 0);

        for (code, _) in &mappings {
            put_u16(&mut sub, *code);
        }
        for (code, glyph) in &mappings {
            let delta = if *code == 0xFFFF { 1 } else { glyph.wrapping_sub(*code) };
            put_u16(&mut sub, delta);
        }
        for _ in &mappings {
            put_u16(&mut sub, 0);
        }

        let mut out = Vec::new();
        put_u16(&mut out, 0);
        put_u16(&mut out, 1);
        put_u16(&mut out, 3);
        put_u16(&mut out, 1);
        put_u32(&mut out, 12);
        out.extend_from_slice(&sub);
        out
    }

    fn kern_table(&self) -> Vec<u8> {
        let mut pairs = self.kerning.clone();
        pairs.sort_unstable_by_key(|(l, r, _)| (u32::from(*l) << 16) | u32::from(*r));

        let mut out = Vec::new();
        put_u16(&mut out, 0);
        put_u16(&mut out, 1);
        // subtable version, length, coverage (format 0, horizontal)
        put_u16(&mut out, 0);
        put_u16(&mut out, (14 + pairs.len() * 6) as u16);
        put_u16(&mut out, 0x0001);
        put_u16(&mut out, pairs.len() as u16);
        put_u16(&mut out, 0);
        put_u16(&mut out, 0);
        put_u16(&mut out, 0);

        for (left, right, value) in pairs {
            put_u16(&mut out, left);
            put_u16(&mut out, right);
            put_u16(&mut out, value as u16);
        }
        out
    }

    fn glyf_and_loca(&self) -> (Vec<u8>, Vec<u8>) {
        let mut glyf = Vec::new();
        let mut loca = Vec::new();

        for (glyph, _) in &self.glyphs {
            put_u32(&mut loca, glyf.len() as u32);

            match glyph {
                TestGlyph::Empty => {}
                TestGlyph::Simple(contours) => encode_simple(&mut glyf, contours),
                TestGlyph::Composite(parts) => encode_composite(&mut glyf, parts)
            }
            glyf.resize((glyf.len() + 3) & !3, 0);
        }
        put_u32(&mut loca, glyf.len() as u32);

        (glyf, loca)
    }
}

fn encode_simple(out: &mut Vec<u8>, contours: &[Vec<TestPoint>]) {
    let points: Vec<TestPoint> = contours.iter().flatten().copied().collect();

    put_u16(out, contours.len() as u16);
    let x_min = points.iter().map(|p| p.x).min().unwrap_or(0);
    let y_min = points.iter().map(|p| p.y).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.x).max().unwrap_or(0);
    let y_max = points.iter().map(|p| p.y).max().unwrap_or(0);

    for v in [x_min, y_min, x_max, y_max] {
        put_u16(out, v as u16);
    }
    let mut end = 0_usize;

    for contour in contours {
        end += contour.len();
        put_u16(out, (end - 1) as u16);
    }
    // no instructions
    put_u16(out, 0);

    // every coordinate as a signed 16 bit delta
    for p in &points {
        out.push(u8::from(p.on_curve));
    }
    let (mut x, mut y) = (0_i16, 0_i16);

    for p in &points {
        put_u16(out, p.x.wrapping_sub(x) as u16);
        x = p.x;
    }
    for p in &points {
        put_u16(out, p.y.wrapping_sub(y) as u16);
        y = p.y;
    }
}

fn encode_composite(out: &mut Vec<u8>, parts: &[(u16, i16, i16)]) {
    put_u16(out, u16::MAX);
    out.extend_from_slice(&[0; 8]);

    for (i, (glyph, dx, dy)) in parts.iter().enumerate() {
        // word args holding x/y offsets
        let mut flags = 0x0001 | 0x0002;

        if i + 1 != parts.len() {
            flags |= 0x0020;
        }
        put_u16(out, flags);
        put_u16(out, *glyph);
        put_u16(out, *dx as u16);
        put_u16(out, *dy as u16);
    }
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

/// Glyph indices in [`sample_font`]
pub mod sample {
    pub const SQUARE: u16 = 1;
    pub const SHIFTED_SQUARE: u16 = 2;
    pub const CYCLE: u16 = 3;
    pub const SPACE: u16 = 4;
    pub const ROUND: u16 = 5;
    pub const UNITS_PER_EM: u16 = 1024;
}

/// The font most tests use, 1024 units per em.
///
/// | char | glyph | outline                                   |
/// |------|-------|-------------------------------------------|
/// | `A`  | 1     | square (128, 0) to (640, 512)             |
/// | `B`  | 2     | glyph 1 moved 64 units right              |
/// | `C`  | 3     | composite referencing itself              |
/// | ` `  | 4     | none                                      |
/// | `O`  | 5     | quadratic diamond in (0, 0) to (512, 512) |
///
/// The pair (A, B) kerns by -64 units.
pub fn sample_font() -> Vec<u8> {
    use sample::*;

    let square = vec![vec![on(128, 0), on(128, 512), on(640, 512), on(640, 0)]];
    let round = vec![vec![
        on(256, 0),
        off(512, 0),
        on(512, 256),
        off(512, 512),
        on(256, 512),
        off(0, 512),
        on(0, 256),
        off(0, 0),
    ]];

    FontBuilder::new(UNITS_PER_EM)
        .set_vertical_metrics(900, -200, 40)
        .glyph(TestGlyph::Simple(square), 768)
        .glyph(TestGlyph::Composite(vec![(SQUARE, 64, 0)]), 768)
        .glyph(TestGlyph::Composite(vec![(CYCLE, 0, 0)]), 768)
        .glyph(TestGlyph::Empty, 256)
        .glyph(TestGlyph::Simple(round), 640)
        .map('A', SQUARE)
        .map('B', SHIFTED_SQUARE)
        .map('C', CYCLE)
        .map(' ', SPACE)
        .map('O', ROUND)
        .kern(SQUARE, SHIFTED_SQUARE, -64)
        .build()
}
