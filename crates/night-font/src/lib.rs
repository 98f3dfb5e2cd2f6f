/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A TrueType font reader and glyph rasterizer
//!
//! This crate parses the tables needed to lay out and draw single
//! glyphs from a TrueType (`glyf` outline) font and renders them into
//! 8 bit anti-aliased coverage bitmaps.
//!
//! Supported
//! - cmap formats 0, 4, 6 and 12
//! - Simple and composite glyphs (with scale and 2x2 transforms)
//! - Pair kerning from the `kern` table
//!
//! Unsupported
//! - CFF outlines (fonts load, but no glyph is visible)
//! - Hinting, GPOS kerning and anything that needs shaping
//!
//! # Example
//! ```no_run
//! use night_font::FontInfo;
//!
//! let data = std::fs::read("font.ttf").unwrap();
//! let font = FontInfo::new(&data).unwrap();
//!
//! let glyph = font.glyph_index(u32::from('A'));
//! let scale = font.scale_for_pixel_height(32.0);
//! let metrics = font.glyph_metrics(glyph, scale).unwrap();
//!
//! let mut pixels = vec![0; metrics.width * metrics.height];
//! font.render_glyph(glyph, scale, metrics.width, metrics.height, &mut pixels)
//!     .unwrap();
//! ```
pub use errors::FontErrors;
pub use font::{FontInfo, GlyphMetrics, VerticalMetrics};
pub use options::FontOptions;
pub use outline::{Bounds, GlyphOutline, Point, Segment};

mod cmap;
pub mod errors;
mod font;
mod glyph;
mod kern;
mod options;
mod outline;
mod rasterizer;
mod tables;
