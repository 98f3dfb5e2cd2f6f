/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Glyph outlines as lines and quadratic curves
//!
//! Composite glyphs are flattened here, each component is fetched,
//! transformed and appended to the same outline. Coordinates stay in
//! font units with y pointing up.
use night_core::log::trace;

use crate::errors::FontErrors;
use crate::glyph::{parse_glyph, Component, GlyphPoint, GlyphRecord};

/// Upper bound on glyph records visited while resolving one glyph
const MAX_GLYPH_VISITS: usize = 4096;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Line(Point, Point),
    /// start, control, end
    Quad(Point, Point, Point)
}

/// Axis aligned bounds of every point of an outline, control points included
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32
}

impl Bounds {
    fn point(p: Point) -> Bounds {
        Bounds {
            x_min: p.x,
            y_min: p.y,
            x_max: p.x,
            y_max: p.y
        }
    }

    fn extend(&mut self, p: Point) {
        self.x_min = self.x_min.min(p.x);
        self.y_min = self.y_min.min(p.y);
        self.x_max = self.x_max.max(p.x);
        self.y_max = self.y_max.max(p.y);
    }
}

/// Affine transform `x' = xx*x + yx*y + dx`, `y' = xy*x + yy*y + dy`
#[derive(Clone, Copy, Debug, PartialEq)]
struct Transform {
    xx: f32,
    xy: f32,
    yx: f32,
    yy: f32,
    dx: f32,
    dy: f32
}

impl Transform {
    const IDENTITY: Transform = Transform {
        xx: 1.0,
        xy: 0.0,
        yx: 0.0,
        yy: 1.0,
        dx: 0.0,
        dy: 0.0
    };

    fn apply(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.xx * x + self.yx * y + self.dx,
            self.xy * x + self.yy * y + self.dy
        )
    }

    /// `self` applied after the component's own transform
    fn then_component(&self, c: &Component) -> Transform {
        Transform {
            xx: self.xx * c.xx + self.yx * c.xy,
            xy: self.xy * c.xx + self.yy * c.xy,
            yx: self.xx * c.yx + self.yx * c.yy,
            yy: self.xy * c.yx + self.yy * c.yy,
            dx: self.xx * c.dx + self.yx * c.dy + self.dx,
            dy: self.xy * c.dx + self.yy * c.dy + self.dy
        }
    }
}

/// Anything that can hand out the raw `glyf` record of a glyph
pub trait GlyphSource {
    fn glyph_data(&self, glyph: u16) -> Result<&[u8], FontErrors>;
}

/// A glyph outline made of closed contours
#[derive(Clone, Debug, Default)]
pub struct GlyphOutline {
    segments: Vec<Segment>,
    bounds:   Option<Bounds>
}

impl GlyphOutline {
    pub fn new() -> GlyphOutline {
        GlyphOutline::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// `None` when the outline has no points
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn touch(&mut self, p: Point) {
        match self.bounds.as_mut() {
            Some(bounds) => bounds.extend(p),
            None => self.bounds = Some(Bounds::point(p))
        }
    }

    pub fn line_to(&mut self, from: Point, to: Point) {
        self.touch(to);
        self.segments.push(Segment::Line(from, to));
    }

    pub fn quad_to(&mut self, from: Point, control: Point, to: Point) {
        self.touch(control);
        self.touch(to);
        self.segments.push(Segment::Quad(from, control, to));
    }

    /// Append one closed contour.
    ///
    /// Two consecutive off-curve points imply an on-curve point half
    /// way between them. The contour starts at its first on-curve point,
    /// or between the last and first points when every point is off-curve.
    fn add_contour(&mut self, points: &[GlyphPoint], transform: &Transform) {
        let Some(last) = points.last() else {
            return;
        };
        let map = |p: &GlyphPoint| transform.apply(p.x as f32, p.y as f32);

        let (start, rest): (Point, Vec<&GlyphPoint>) =
            match points.iter().position(|p| p.on_curve) {
                Some(s) => (
                    map(&points[s]),
                    points[s + 1..].iter().chain(points[..s].iter()).collect()
                ),
                None => (map(last).midpoint(map(&points[0])), points.iter().collect())
            };
        self.touch(start);

        let mut current = start;
        let mut control: Option<Point> = None;

        for p in rest {
            let pos = map(p);

            if p.on_curve {
                match control.take() {
                    Some(c) => self.quad_to(current, c, pos),
                    None => self.line_to(current, pos)
                }
                current = pos;
            } else {
                if let Some(c) = control {
                    let mid = c.midpoint(pos);
                    self.quad_to(current, c, mid);
                    current = mid;
                }
                control = Some(pos);
            }
        }
        match control {
            Some(c) => self.quad_to(current, c, start),
            None if current != start => self.line_to(current, start),
            None => ()
        }
    }
}

struct Resolver<'s, S: GlyphSource> {
    source:    &'s S,
    max_depth: usize,
    visits:    usize,
    outline:   GlyphOutline
}

impl<'s, S: GlyphSource> Resolver<'s, S> {
    fn add_glyph(&mut self, glyph: u16, transform: Transform, depth: usize) -> Result<(), FontErrors> {
        if depth > self.max_depth {
            return Err(FontErrors::CompositeTooDeep);
        }
        self.visits += 1;

        if self.visits > MAX_GLYPH_VISITS {
            return Err(FontErrors::CompositeTooDeep);
        }

        match parse_glyph(self.source.glyph_data(glyph)?)? {
            GlyphRecord::Empty => Ok(()),
            GlyphRecord::Simple { end_points, points } => {
                let mut start = 0;

                for end in end_points {
                    let end = usize::from(end) + 1;
                    self.outline.add_contour(&points[start..end], &transform);
                    start = end;
                }
                Ok(())
            }
            GlyphRecord::Composite(components) => {
                trace!("Glyph {} has {} components", glyph, components.len());

                for component in &components {
                    let child = transform.then_component(component);
                    self.add_glyph(component.glyph, child, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// Build the outline of `glyph`, resolving composite references
/// at most `max_depth` levels deep.
pub fn build_outline<S: GlyphSource>(
    source: &S, glyph: u16, max_depth: usize
) -> Result<GlyphOutline, FontErrors> {
    let mut resolver = Resolver {
        source,
        max_depth,
        visits: 0,
        outline: GlyphOutline::new()
    };
    resolver.add_glyph(glyph, Transform::IDENTITY, 0)?;

    Ok(resolver.outline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i32, y: i32, on_curve: bool) -> GlyphPoint {
        GlyphPoint { x, y, on_curve }
    }

    #[test]
    fn square_contour() {
        let mut outline = GlyphOutline::new();
        let points = [pt(0, 0, true), pt(10, 0, true), pt(10, 10, true), pt(0, 10, true)];
        outline.add_contour(&points, &Transform::IDENTITY);

        assert_eq!(outline.segments().len(), 4);
        assert_eq!(
            outline.segments()[3],
            Segment::Line(Point::new(0.0, 10.0), Point::new(0.0, 0.0))
        );
        assert_eq!(
            outline.bounds(),
            Some(Bounds {
                x_min: 0.0,
                y_min: 0.0,
                x_max: 10.0,
                y_max: 10.0
            })
        );
    }

    #[test]
    fn implied_on_curve_points() {
        let mut outline = GlyphOutline::new();
        let points = [pt(0, 0, true), pt(10, 10, false), pt(20, 10, false), pt(30, 0, true)];
        outline.add_contour(&points, &Transform::IDENTITY);

        let segments = outline.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[0],
            Segment::Quad(Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(15.0, 10.0))
        );
        assert_eq!(
            segments[1],
            Segment::Quad(Point::new(15.0, 10.0), Point::new(20.0, 10.0), Point::new(30.0, 0.0))
        );
    }

    #[test]
    fn all_off_curve_contour_closes() {
        let mut outline = GlyphOutline::new();
        let points = [pt(0, 10, false), pt(10, 0, false), pt(0, -10, false), pt(-10, 0, false)];
        outline.add_contour(&points, &Transform::IDENTITY);

        let segments = outline.segments();
        assert_eq!(segments.len(), 4);
        let Segment::Quad(first, _, _) = segments[0] else {
            panic!("expected a curve");
        };
        let Segment::Quad(_, _, last) = segments[3] else {
            panic!("expected a curve");
        };
        assert_eq!(first, last);
        assert_eq!(first, Point::new(-5.0, 5.0));
    }

    #[test]
    fn component_transform_composition() {
        let parent = Transform {
            dx: 100.0,
            ..Transform::IDENTITY
        };
        let component = Component {
            glyph: 1,
            xx:    2.0,
            xy:    0.0,
            yx:    0.0,
            yy:    2.0,
            dx:    10.0,
            dy:    5.0
        };
        let child = parent.then_component(&component);
        assert_eq!(child.apply(1.0, 1.0), Point::new(112.0, 7.0));
    }

    struct SelfReference(Vec<u8>);

    impl GlyphSource for SelfReference {
        fn glyph_data(&self, _: u16) -> Result<&[u8], FontErrors> {
            Ok(&self.0)
        }
    }

    #[test]
    fn cyclic_composite_fails() {
        let mut data = (-1_i16).to_be_bytes().to_vec();
        data.extend_from_slice(&[0; 8]);
        // ARGS_ARE_XY_VALUES, glyph 0, byte offsets
        data.extend_from_slice(&2_u16.to_be_bytes());
        data.extend_from_slice(&0_u16.to_be_bytes());
        data.extend_from_slice(&[0, 0]);

        let source = SelfReference(data);
        assert!(matches!(
            build_outline(&source, 0, 8),
            Err(FontErrors::CompositeTooDeep)
        ));
    }
}
