/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::{c_float, c_int, c_uchar};
use std::ptr;

use night_core::log::error;
use night_font::FontInfo;

use crate::utils::{guard, positive, write_out};

/// Opaque font handle handed to C
///
/// The `'static` lifetime is a promise made by the caller of
/// `NightFontInit`: the font bytes outlive the handle.
pub struct NightFont {
    info: FontInfo<'static>
}

/// Borrow the font behind a handle
///
/// # Safety
/// `font` must be null or a live handle from `NightFontInit`
unsafe fn font_ref<'a>(font: *mut NightFont) -> Option<&'a NightFont> {
    unsafe { font.as_ref() }
}

fn glyph_id(glyph: c_int) -> Option<u16> {
    u16::try_from(glyph).ok()
}

/// Parse a TrueType font
///
/// @param data: Font file bytes, these are NOT copied and must stay
/// alive and unmodified until `NightFontFree`
///
/// @param length: Number of bytes in `data`
///
/// \returns A font handle, or null if the font cannot be parsed
#[no_mangle]
pub unsafe extern "C" fn NightFontInit(data: *mut c_uchar, length: c_int) -> *mut NightFont {
    guard(ptr::null_mut(), || {
        let Some(length) = positive(length) else {
            return ptr::null_mut();
        };
        if data.is_null() {
            return ptr::null_mut();
        }
        // safety: the caller keeps `length` bytes at `data` alive for
        // the lifetime of the handle
        let bytes: &'static [u8] = unsafe { std::slice::from_raw_parts(data, length) };

        match FontInfo::new(bytes) {
            Ok(info) => Box::into_raw(Box::new(NightFont { info })),
            Err(e) => {
                error!("Could not parse font: {:?}", e);
                ptr::null_mut()
            }
        }
    })
}

/// Ascent, descent and line gap in font units, outputs can be null
#[no_mangle]
pub unsafe extern "C" fn NightFontGetMetrics(
    font: *mut NightFont, ascent: *mut c_int, descent: *mut c_int, linegap: *mut c_int
) {
    guard((), || {
        let metrics = unsafe { font_ref(font) }.map(|font| font.info.vertical_metrics());

        let (a, d, l) = metrics.map_or((0, 0, 0), |m| {
            (c_int::from(m.ascent), c_int::from(m.descent), c_int::from(m.line_gap))
        });
        unsafe {
            write_out(ascent, a);
            write_out(descent, d);
            write_out(linegap, l);
        }
    })
}

/// Glyph index of a unicode codepoint, 0 when the font does not map it
#[no_mangle]
pub unsafe extern "C" fn NightFontGetGlyphIndex(font: *mut NightFont, codepoint: c_int) -> c_int {
    guard(0, || {
        let (Some(font), Ok(codepoint)) = (unsafe { font_ref(font) }, u32::try_from(codepoint))
        else {
            return 0;
        };
        c_int::from(font.info.glyph_index(codepoint))
    })
}

/// Scale turning font units into pixels for a font `size` pixels high
#[no_mangle]
pub unsafe extern "C" fn NightFontGetScale(font: *mut NightFont, size: c_float) -> c_float {
    guard(0.0, || {
        unsafe { font_ref(font) }.map_or(0.0, |font| font.info.scale_for_pixel_height(size))
    })
}

/// Kerning adjustment in pixels between two glyphs, 0 when not kerned
#[no_mangle]
pub unsafe extern "C" fn NightFontGetKerning(
    font: *mut NightFont, glyph1: c_int, glyph2: c_int, scale: c_float
) -> c_float {
    guard(0.0, || {
        let (Some(font), Some(left), Some(right)) =
            (unsafe { font_ref(font) }, glyph_id(glyph1), glyph_id(glyph2))
        else {
            return 0.0;
        };
        font.info.kerning(left, right, scale)
    })
}

/// Bitmap size and placement of a glyph, no pixels are produced
///
/// On failure every output is zeroed and `visible` is 0.
#[no_mangle]
pub unsafe extern "C" fn NightFontGetCharacter(
    font: *mut NightFont, glyph: c_int, scale: c_float, width: *mut c_int, height: *mut c_int,
    advance: *mut c_float, offsetX: *mut c_float, offsetY: *mut c_float, visible: *mut c_int
) {
    guard((), || {
        let metrics = match (unsafe { font_ref(font) }, glyph_id(glyph)) {
            (Some(font), Some(glyph)) => font.info.glyph_metrics(glyph, scale).ok(),
            _ => None
        };
        let metrics = metrics.and_then(|m| {
            Some((
                c_int::try_from(m.width).ok()?,
                c_int::try_from(m.height).ok()?,
                m
            ))
        });
        unsafe {
            match metrics {
                Some((w, h, m)) => {
                    write_out(width, w);
                    write_out(height, h);
                    write_out(advance, m.advance);
                    write_out(offsetX, m.offset_x);
                    write_out(offsetY, m.offset_y);
                    write_out(visible, c_int::from(m.visible));
                }
                None => {
                    write_out(width, 0);
                    write_out(height, 0);
                    write_out(advance, 0.0);
                    write_out(offsetX, 0.0);
                    write_out(offsetY, 0.0);
                    write_out(visible, 0);
                }
            }
        }
    })
}

/// Render a glyph's coverage into `dest`
///
/// `dest` holds `width * height` bytes, `width` and `height` should come
/// from `NightFontGetCharacter` with the same glyph and scale. On
/// failure `dest` is zeroed.
#[no_mangle]
pub unsafe extern "C" fn NightFontGetPixels(
    font: *mut NightFont, dest: *mut c_uchar, glyph: c_int, width: c_int, height: c_int,
    scale: c_float
) {
    guard((), || {
        let (Some(w), Some(h)) = (positive(width), positive(height)) else {
            return;
        };
        let Some(size) = w.checked_mul(h) else {
            return;
        };
        if dest.is_null() {
            return;
        }
        // safety: the caller provides width * height writable bytes
        let out = unsafe { std::slice::from_raw_parts_mut(dest, size) };

        let rendered = match (unsafe { font_ref(font) }, glyph_id(glyph)) {
            (Some(font), Some(glyph)) => font.info.render_glyph(glyph, scale, w, h, out),
            _ => Err(night_font::FontErrors::Generic("Invalid font handle or glyph"))
        };
        if let Err(e) = rendered {
            error!("Could not render glyph {}: {:?}", glyph, e);
            out.fill(0);
        }
    })
}

/// Release a font handle, the font bytes are not touched
#[no_mangle]
pub unsafe extern "C" fn NightFontFree(font: *mut NightFont) {
    if !font.is_null() {
        // safety: the handle came from Box::into_raw in NightFontInit
        drop(unsafe { Box::from_raw(font) });
    }
}
