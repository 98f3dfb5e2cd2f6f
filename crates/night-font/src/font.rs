/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use night_core::log::{info, trace, warn};

use crate::cmap::CmapSubtable;
use crate::errors::FontErrors;
use crate::kern::KernTable;
use crate::options::FontOptions;
use crate::outline::{build_outline, GlyphOutline, GlyphSource, Point, Segment};
use crate::rasterizer::Rasterizer;
use crate::tables::{parse_maxp, FontFile, HeadTable, HheaTable, HmtxTable, LocaTable, TableTag};

/// Vertical metrics in font units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerticalMetrics {
    pub ascent:   i16,
    pub descent:  i16,
    pub line_gap: i16
}

/// Placement of a rendered glyph.
///
/// Offsets locate the top-left corner of the bitmap relative to the pen
/// position on the baseline, with y growing downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    pub width:    usize,
    pub height:   usize,
    /// Horizontal advance in pixels
    pub advance:  f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// False for glyphs without an outline, width and height are 0
    pub visible:  bool
}

/// A parsed TrueType font.
///
/// Holds views into the font bytes, nothing is copied, so the bytes
/// must outlive it. All queries take `&self` and the struct has no
/// interior mutability, it can be shared across threads freely.
pub struct FontInfo<'a> {
    options:    FontOptions,
    head:       HeadTable,
    hhea:       HheaTable,
    num_glyphs: u16,
    cmap:       CmapSubtable<'a>,
    hmtx:       HmtxTable<'a>,
    outlines:   Option<(LocaTable<'a>, &'a [u8])>,
    kern:       Option<KernTable<'a>>
}

impl<'a> FontInfo<'a> {
    /// Parse a font with default options
    pub fn new(data: &'a [u8]) -> Result<FontInfo<'a>, FontErrors> {
        FontInfo::new_with_options(data, FontOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: FontOptions) -> Result<FontInfo<'a>, FontErrors> {
        let file = FontFile::parse(data)?;

        let head = HeadTable::parse(file.required(TableTag::HEAD)?)?;
        let hhea = HheaTable::parse(file.required(TableTag::HHEA)?)?;
        let num_glyphs = parse_maxp(file.required(TableTag::MAXP)?)?;
        let cmap = CmapSubtable::select(file.required(TableTag::CMAP)?)?;
        let hmtx = HmtxTable::new(file.required(TableTag::HMTX)?, hhea.num_h_metrics)?;

        trace!("Units per em: {}", head.units_per_em);
        trace!("Glyphs: {}", num_glyphs);
        trace!("Ascent {} descent {} line gap {}", hhea.ascender, hhea.descender, hhea.line_gap);

        let outlines = match (file.table_data(TableTag::LOCA), file.table_data(TableTag::GLYF)) {
            (Some(loca), Some(glyf)) => Some((
                LocaTable::new(loca, head.index_to_loc_format, num_glyphs)?,
                glyf
            )),
            (loca, _) => {
                if options.get_strict_mode() {
                    let tag = if loca.is_none() { TableTag::LOCA } else { TableTag::GLYF };
                    return Err(FontErrors::MissingTable(tag.0));
                }
                warn!("Font has no TrueType outlines, glyphs will not be visible");
                None
            }
        };
        let kern = file.table_data(TableTag::KERN).and_then(KernTable::parse);

        if kern.is_none() {
            info!("Font has no usable kerning");
        }

        Ok(FontInfo {
            options,
            head,
            hhea,
            num_glyphs,
            cmap,
            hmtx,
            outlines,
            kern
        })
    }

    pub const fn units_per_em(&self) -> u16 {
        self.head.units_per_em
    }

    pub const fn num_glyphs(&self) -> u16 {
        self.num_glyphs
    }

    pub const fn options(&self) -> &FontOptions {
        &self.options
    }

    /// Ascent, descent and line gap in font units
    pub const fn vertical_metrics(&self) -> VerticalMetrics {
        VerticalMetrics {
            ascent:   self.hhea.ascender,
            descent:  self.hhea.descender,
            line_gap: self.hhea.line_gap
        }
    }

    /// Glyph index of a unicode codepoint, 0 (the missing glyph) when unmapped
    pub fn glyph_index(&self, codepoint: u32) -> u16 {
        let glyph = self.cmap.lookup(codepoint);

        if glyph >= self.num_glyphs {
            return 0;
        }
        glyph
    }

    /// Scale factor turning font units into pixels so that one em is `size` pixels
    pub fn scale_for_pixel_height(&self, size: f32) -> f32 {
        size / f32::from(self.head.units_per_em)
    }

    /// Advance width in font units
    pub fn advance_width(&self, glyph: u16) -> u16 {
        self.hmtx.metric(glyph).advance_width
    }

    /// Left side bearing in font units
    pub fn left_side_bearing(&self, glyph: u16) -> i16 {
        self.hmtx.metric(glyph).left_side_bearing
    }

    /// Kerning between two glyphs in pixels, 0 when the pair is not kerned
    pub fn kerning(&self, left: u16, right: u16, scale: f32) -> f32 {
        self.kern
            .as_ref()
            .map_or(0.0, |kern| f32::from(kern.kerning(left, right)) * scale)
    }

    /// The glyph's outline in font units
    pub fn outline(&self, glyph: u16) -> Result<GlyphOutline, FontErrors> {
        if glyph >= self.num_glyphs {
            return Err(FontErrors::GlyphOutOfRange(glyph));
        }
        build_outline(self, glyph, self.options.get_max_composite_depth())
    }

    /// Bitmap size and placement of a glyph at `scale`, no rendering is done
    pub fn glyph_metrics(&self, glyph: u16, scale: f32) -> Result<GlyphMetrics, FontErrors> {
        let outline = self.outline(glyph)?;

        Ok(self.metrics_for(&outline, glyph, scale))
    }

    fn metrics_for(&self, outline: &GlyphOutline, glyph: u16, scale: f32) -> GlyphMetrics {
        let advance = f32::from(self.advance_width(glyph)) * scale;

        match outline.bounds() {
            Some(bounds) if !outline.is_empty() => {
                let x0 = (bounds.x_min * scale).floor();
                let y0 = (-bounds.y_max * scale).floor();
                let x1 = (bounds.x_max * scale).ceil();
                let y1 = (-bounds.y_min * scale).ceil();

                GlyphMetrics {
                    width: (x1 - x0).max(0.0) as usize,
                    height: (y1 - y0).max(0.0) as usize,
                    advance,
                    offset_x: x0,
                    offset_y: y0,
                    visible: true
                }
            }
            _ => GlyphMetrics {
                advance,
                ..GlyphMetrics::default()
            }
        }
    }

    /// Render the coverage of `glyph` into `out`.
    ///
    /// `width` and `height` should come from [`glyph_metrics`](Self::glyph_metrics)
    /// at the same scale, `out` holds at least `width * height` bytes laid out
    /// row by row. Bytes past `width * height` are left untouched.
    pub fn render_glyph(
        &self, glyph: u16, scale: f32, width: usize, height: usize, out: &mut [u8]
    ) -> Result<(), FontErrors> {
        let size = width
            .checked_mul(height)
            .ok_or(FontErrors::Generic("Glyph bitmap size overflows"))?;

        if out.len() < size {
            return Err(FontErrors::Generic("Output buffer smaller than width * height"));
        }
        let out = &mut out[..size];

        let outline = self.outline(glyph)?;
        let metrics = self.metrics_for(&outline, glyph, scale);

        if !metrics.visible || size == 0 {
            out.fill(0);
            return Ok(());
        }
        let to_pixels = |p: Point| {
            Point::new(
                p.x * scale - metrics.offset_x,
                -p.y * scale - metrics.offset_y
            )
        };
        let mut raster = Rasterizer::new(width, height, self.options.get_flatten_tolerance());

        for segment in outline.segments() {
            match *segment {
                Segment::Line(p0, p1) => raster.draw_line(to_pixels(p0), to_pixels(p1)),
                Segment::Quad(p0, p1, p2) => {
                    raster.draw_quad(to_pixels(p0), to_pixels(p1), to_pixels(p2));
                }
            }
        }
        raster.accumulate(out);

        Ok(())
    }
}

impl<'a> GlyphSource for FontInfo<'a> {
    fn glyph_data(&self, glyph: u16) -> Result<&[u8], FontErrors> {
        let Some((loca, glyf)) = self.outlines.as_ref() else {
            return Ok(&[]);
        };
        let (start, end) = loca
            .glyph_range(glyph)
            .ok_or(FontErrors::GlyphOutOfRange(glyph))?;

        if start > end {
            return Err(FontErrors::InvalidGlyph("loca offsets decrease"));
        }
        glyf.get(start..end)
            .ok_or(FontErrors::TableOutOfBounds(TableTag::GLYF.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn font_info_is_thread_safe() {
        assert_send_sync::<FontInfo<'static>>();
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(FontInfo::new(&[]).is_err());
        assert!(FontInfo::new(b"not a font at all").is_err());
    }
}
