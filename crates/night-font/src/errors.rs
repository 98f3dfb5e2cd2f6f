/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use night_core::bytestream::ByteIoError;

/// Errors possible when parsing a font or building glyph outlines
#[non_exhaustive]
pub enum FontErrors {
    /// The sfnt version or `head` magic is wrong
    BadMagic,
    /// A table the font cannot work without is absent
    MissingTable([u8; 4]),
    /// A table directory entry points outside the file,
    /// or a table is too short for its fixed fields
    TableOutOfBounds([u8; 4]),
    /// Ran out of bytes while reading
    UnexpectedEof,
    /// No cmap subtable in a format we can read
    UnsupportedCmap,
    /// Glyph data is malformed
    InvalidGlyph(&'static str),
    /// Composite glyphs nest deeper than allowed, usually a cycle
    CompositeTooDeep,
    /// Glyph index at or past `numGlyphs`
    GlyphOutOfRange(u16),
    Generic(&'static str)
}

fn tag_str(tag: &[u8; 4]) -> &str {
    core::str::from_utf8(tag).unwrap_or("????")
}

impl Debug for FontErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadMagic => writeln!(f, "Bad magic, not a TrueType font"),
            Self::MissingTable(tag) => writeln!(f, "Required table `{}` missing", tag_str(tag)),
            Self::TableOutOfBounds(tag) => {
                writeln!(f, "Table `{}` lies outside the font data", tag_str(tag))
            }
            Self::UnexpectedEof => writeln!(f, "Unexpected end of font data"),
            Self::UnsupportedCmap => writeln!(f, "No supported cmap subtable"),
            Self::InvalidGlyph(reason) => writeln!(f, "Invalid glyph: {reason}"),
            Self::CompositeTooDeep => writeln!(f, "Composite glyph nesting too deep"),
            Self::GlyphOutOfRange(glyph) => writeln!(f, "Glyph {glyph} out of range"),
            Self::Generic(val) => writeln!(f, "{val}")
        }
    }
}

impl Display for FontErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for FontErrors {}

impl From<ByteIoError> for FontErrors {
    fn from(_: ByteIoError) -> Self {
        FontErrors::UnexpectedEof
    }
}
