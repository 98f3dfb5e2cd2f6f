/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Raw glyph records from the `glyf` table
//!
//! A glyph is either simple (a list of contours made of on and off
//! curve points) or composite (a list of other glyphs with affine
//! transforms). Decoding here stays in font units, turning points into
//! segments happens in [`outline`](crate::outline).
use night_core::bytestream::ByteReader;

use crate::errors::FontErrors;

/// A point of a simple glyph, in font units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphPoint {
    pub x:        i32,
    pub y:        i32,
    pub on_curve: bool
}

/// A component of a composite glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Component {
    pub glyph: u16,
    /// 2x2 matrix `[a b c d]` as `x' = a*x + c*y + dx`, `y' = b*x + d*y + dy`
    pub xx:    f32,
    pub xy:    f32,
    pub yx:    f32,
    pub yy:    f32,
    pub dx:    f32,
    pub dy:    f32
}

/// A decoded glyph record
#[derive(Clone, Debug)]
pub enum GlyphRecord {
    /// No outline, e.g. the space character
    Empty,
    Simple {
        /// Index of the last point of each contour
        end_points: Vec<u16>,
        points:     Vec<GlyphPoint>
    },
    Composite(Vec<Component>)
}

const ON_CURVE_POINT: u8 = 0x01;
const X_SHORT_VECTOR: u8 = 0x02;
const Y_SHORT_VECTOR: u8 = 0x04;
const REPEAT_FLAG: u8 = 0x08;
const X_IS_SAME_OR_POSITIVE_SHORT: u8 = 0x10;
const Y_IS_SAME_OR_POSITIVE_SHORT: u8 = 0x20;

const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const ARGS_ARE_XY_VALUES: u16 = 0x0002;
const WE_HAVE_A_SCALE: u16 = 0x0008;
const MORE_COMPONENTS: u16 = 0x0020;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;

/// Read a glyph record, `data` is the glyph's byte range in `glyf`
pub fn parse_glyph(data: &[u8]) -> Result<GlyphRecord, FontErrors> {
    if data.is_empty() {
        return Ok(GlyphRecord::Empty);
    }
    let mut stream = ByteReader::new(data);

    let num_contours = stream.get_i16_be_err()?;
    // bounding box, recomputed from the points
    stream.skip(8)?;

    match num_contours {
        0 => Ok(GlyphRecord::Empty),
        1.. => parse_simple(&mut stream, num_contours as usize),
        _ => parse_composite(&mut stream)
    }
}

fn parse_simple(stream: &mut ByteReader, num_contours: usize) -> Result<GlyphRecord, FontErrors> {
    let mut end_points = Vec::with_capacity(num_contours);

    for _ in 0..num_contours {
        let end = stream.get_u16_be_err()?;

        if end_points.last().map_or(false, |prev| end < *prev) {
            return Err(FontErrors::InvalidGlyph("contour end points decrease"));
        }
        end_points.push(end);
    }
    let num_points = end_points.last().map_or(0, |last| usize::from(*last) + 1);

    let instruction_len = usize::from(stream.get_u16_be_err()?);
    stream.skip(instruction_len)?;

    // every point needs at least one flag byte
    if stream.remaining() < num_points {
        return Err(FontErrors::UnexpectedEof);
    }

    let mut flags = Vec::with_capacity(num_points);

    while flags.len() < num_points {
        let flag = stream.get_u8_err()?;
        flags.push(flag);

        if flag & REPEAT_FLAG != 0 {
            let count = usize::from(stream.get_u8_err()?);
            let count = count.min(num_points - flags.len());
            flags.extend(core::iter::repeat(flag).take(count));
        }
    }

    let xs = read_coordinates(stream, &flags, X_SHORT_VECTOR, X_IS_SAME_OR_POSITIVE_SHORT)?;
    let ys = read_coordinates(stream, &flags, Y_SHORT_VECTOR, Y_IS_SAME_OR_POSITIVE_SHORT)?;

    let points = flags
        .iter()
        .zip(xs.iter().zip(ys.iter()))
        .map(|(flag, (x, y))| GlyphPoint {
            x:        *x,
            y:        *y,
            on_curve: flag & ON_CURVE_POINT != 0
        })
        .collect();

    Ok(GlyphRecord::Simple { end_points, points })
}

fn read_coordinates(
    stream: &mut ByteReader, flags: &[u8], short: u8, same_or_positive: u8
) -> Result<Vec<i32>, FontErrors> {
    let mut coords = Vec::with_capacity(flags.len());
    let mut value = 0_i32;

    for flag in flags {
        if flag & short != 0 {
            let delta = i32::from(stream.get_u8_err()?);

            if flag & same_or_positive != 0 {
                value += delta;
            } else {
                value -= delta;
            }
        } else if flag & same_or_positive == 0 {
            value += i32::from(stream.get_i16_be_err()?);
        }
        coords.push(value);
    }
    Ok(coords)
}

#[inline]
fn f2dot14(stream: &mut ByteReader) -> Result<f32, FontErrors> {
    Ok(f32::from(stream.get_i16_be_err()?) / 16384.0)
}

fn parse_composite(stream: &mut ByteReader) -> Result<GlyphRecord, FontErrors> {
    let mut components = Vec::new();

    loop {
        let flags = stream.get_u16_be_err()?;
        let glyph = stream.get_u16_be_err()?;

        if flags & ARGS_ARE_XY_VALUES == 0 {
            return Err(FontErrors::InvalidGlyph(
                "composite point matching is not supported"
            ));
        }
        let (dx, dy) = if flags & ARG_1_AND_2_ARE_WORDS != 0 {
            (
                f32::from(stream.get_i16_be_err()?),
                f32::from(stream.get_i16_be_err()?)
            )
        } else {
            (
                f32::from(stream.get_u8_err()? as i8),
                f32::from(stream.get_u8_err()? as i8)
            )
        };
        let (mut xx, mut xy, mut yx, mut yy) = (1.0, 0.0, 0.0, 1.0);

        if flags & WE_HAVE_A_SCALE != 0 {
            xx = f2dot14(stream)?;
            yy = xx;
        } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
            xx = f2dot14(stream)?;
            yy = f2dot14(stream)?;
        } else if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
            xx = f2dot14(stream)?;
            xy = f2dot14(stream)?;
            yx = f2dot14(stream)?;
            yy = f2dot14(stream)?;
        }
        components.push(Component {
            glyph,
            xx,
            xy,
            yx,
            yy,
            dx,
            dy
        });

        if flags & MORE_COMPONENTS == 0 {
            break;
        }
    }
    Ok(GlyphRecord::Composite(components))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(contours: i16) -> Vec<u8> {
        let mut data = contours.to_be_bytes().to_vec();
        data.extend_from_slice(&[0; 8]);
        data
    }

    #[test]
    fn empty_glyph() {
        assert!(matches!(parse_glyph(&[]), Ok(GlyphRecord::Empty)));
        assert!(matches!(parse_glyph(&header(0)), Ok(GlyphRecord::Empty)));
    }

    #[test]
    fn simple_triangle_with_repeat() {
        let mut data = header(1);
        data.extend_from_slice(&2_u16.to_be_bytes());
        data.extend_from_slice(&0_u16.to_be_bytes());
        // first point at origin, then two points with short positive x
        data.push(ON_CURVE_POINT | X_IS_SAME_OR_POSITIVE_SHORT | Y_IS_SAME_OR_POSITIVE_SHORT);
        data.push(ON_CURVE_POINT | X_SHORT_VECTOR | X_IS_SAME_OR_POSITIVE_SHORT | REPEAT_FLAG);
        data.push(1);
        // x deltas
        data.extend_from_slice(&[100, 50]);
        // y: point 0 same, points 1 and 2 long deltas
        data.extend_from_slice(&0_i16.to_be_bytes());
        data.extend_from_slice(&200_i16.to_be_bytes());

        let GlyphRecord::Simple { end_points, points } = parse_glyph(&data).unwrap() else {
            panic!("expected simple glyph");
        };
        assert_eq!(end_points, vec![2]);
        let xy: Vec<_> = points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(xy, vec![(0, 0), (100, 0), (150, 200)]);
        assert!(points.iter().all(|p| p.on_curve));
    }

    #[test]
    fn short_negative_deltas() {
        let mut data = header(1);
        data.extend_from_slice(&1_u16.to_be_bytes());
        data.extend_from_slice(&0_u16.to_be_bytes());
        data.push(X_SHORT_VECTOR | Y_SHORT_VECTOR);
        data.push(X_SHORT_VECTOR | Y_SHORT_VECTOR);
        data.extend_from_slice(&[10, 5, 20, 5]);

        let GlyphRecord::Simple { points, .. } = parse_glyph(&data).unwrap() else {
            panic!("expected simple glyph");
        };
        assert_eq!((points[1].x, points[1].y), (-15, -25));
        assert!(!points[0].on_curve);
    }

    #[test]
    fn truncated_coordinates() {
        let mut data = header(1);
        data.extend_from_slice(&1_u16.to_be_bytes());
        data.extend_from_slice(&0_u16.to_be_bytes());
        data.extend_from_slice(&[ON_CURVE_POINT, ON_CURVE_POINT]);
        data.extend_from_slice(&10_i16.to_be_bytes());

        assert!(parse_glyph(&data).is_err());
    }

    #[test]
    fn decreasing_end_points() {
        let mut data = header(2);
        data.extend_from_slice(&5_u16.to_be_bytes());
        data.extend_from_slice(&2_u16.to_be_bytes());
        assert!(matches!(
            parse_glyph(&data),
            Err(FontErrors::InvalidGlyph(_))
        ));
    }

    #[test]
    fn composite_with_scale() {
        let mut data = header(-1);
        let flags = ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES | WE_HAVE_A_SCALE | MORE_COMPONENTS;
        data.extend_from_slice(&flags.to_be_bytes());
        data.extend_from_slice(&3_u16.to_be_bytes());
        data.extend_from_slice(&100_i16.to_be_bytes());
        data.extend_from_slice(&(-20_i16).to_be_bytes());
        data.extend_from_slice(&(8192_i16).to_be_bytes());

        data.extend_from_slice(&ARGS_ARE_XY_VALUES.to_be_bytes());
        data.extend_from_slice(&4_u16.to_be_bytes());
        data.extend_from_slice(&[(-3_i8) as u8, 7]);

        let GlyphRecord::Composite(components) = parse_glyph(&data).unwrap() else {
            panic!("expected composite glyph");
        };
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].glyph, 3);
        assert_eq!((components[0].dx, components[0].dy), (100.0, -20.0));
        assert_eq!((components[0].xx, components[0].yy), (0.5, 0.5));
        assert_eq!((components[1].dx, components[1].dy), (-3.0, 7.0));
        assert_eq!(components[1].xx, 1.0);
    }

    #[test]
    fn point_matching_rejected() {
        let mut data = header(-1);
        data.extend_from_slice(&0_u16.to_be_bytes());
        data.extend_from_slice(&1_u16.to_be_bytes());
        data.extend_from_slice(&[0, 0]);
        assert!(matches!(
            parse_glyph(&data),
            Err(FontErrors::InvalidGlyph(_))
        ));
    }
}
