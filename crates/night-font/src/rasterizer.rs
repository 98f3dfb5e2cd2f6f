/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Anti-aliased scan conversion with a signed area accumulation buffer
//!
//! Every line deposits, for each pixel it crosses, the signed area it
//! covers to its right. A running sum over the buffer then gives the
//! winding coverage of each pixel, so no edge sorting or active edge
//! list is needed. Curves are flattened into lines first.
use crate::outline::Point;

pub struct Rasterizer {
    width:     usize,
    height:    usize,
    tolerance: f32,
    acc:       Vec<f32>
}

/// Flattening never produces more pieces than this per curve
const MAX_QUAD_PIECES: usize = 4096;

impl Rasterizer {
    /// Create a rasterizer for a `width` x `height` coverage bitmap.
    ///
    /// `tolerance` is the flattening tolerance in pixels.
    pub fn new(width: usize, height: usize, tolerance: f32) -> Rasterizer {
        // lines ending on the right border deposit past the last pixel
        let size = width.saturating_mul(height).saturating_add(4);

        Rasterizer {
            width,
            height,
            tolerance: tolerance.max(f32::EPSILON),
            acc: vec![0.0; size]
        }
    }

    #[inline]
    fn add(&mut self, index: isize, value: f32) {
        if let Some(cell) = usize::try_from(index).ok().and_then(|i| self.acc.get_mut(i)) {
            *cell += value;
        }
    }

    fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0.0, self.width as f32),
            p.y.clamp(0.0, self.height as f32)
        )
    }

    pub fn draw_line(&mut self, p0: Point, p1: Point) {
        if !(p0.x.is_finite() && p0.y.is_finite() && p1.x.is_finite() && p1.y.is_finite()) {
            return;
        }
        let (p0, p1) = (self.clamp(p0), self.clamp(p1));

        if (p0.y - p1.y).abs() <= f32::EPSILON {
            return;
        }
        let (dir, p0, p1) = if p0.y < p1.y {
            (1.0, p0, p1)
        } else {
            (-1.0, p1, p0)
        };
        let dxdy = (p1.x - p0.x) / (p1.y - p0.y);
        let mut x = p0.x;

        let y_start = p0.y as usize;
        let y_end = self.height.min(p1.y.ceil() as usize);

        for y in y_start..y_end {
            let line_start = (y * self.width) as isize;
            let dy = ((y + 1) as f32).min(p1.y) - (y as f32).max(p0.y);
            let x_next = x + dxdy * dy;
            let d = dy * dir;

            let (x0, x1) = if x < x_next { (x, x_next) } else { (x_next, x) };

            let x0_floor = x0.floor();
            let x0i = x0_floor as isize;
            let x1_ceil = x1.ceil();
            let x1i = x1_ceil as isize;

            if x1i <= x0i + 1 {
                // the line stays inside one pixel column on this row
                let xmf = 0.5 * (x + x_next) - x0_floor;
                self.add(line_start + x0i, d - d * xmf);
                self.add(line_start + x0i + 1, d * xmf);
            } else {
                let s = (x1 - x0).recip();
                let x0f = x0 - x0_floor;
                let a0 = 0.5 * s * (1.0 - x0f) * (1.0 - x0f);
                let x1f = x1 - x1_ceil + 1.0;
                let am = 0.5 * s * x1f * x1f;

                self.add(line_start + x0i, d * a0);

                if x1i == x0i + 2 {
                    self.add(line_start + x0i + 1, d * (1.0 - a0 - am));
                } else {
                    let a1 = s * (1.5 - x0f);
                    self.add(line_start + x0i + 1, d * (a1 - a0));

                    for xi in x0i + 2..x1i - 1 {
                        self.add(line_start + xi, d * s);
                    }
                    let a2 = a1 + (x1i - x0i - 3) as f32 * s;
                    self.add(line_start + x1i - 1, d * (1.0 - a2 - am));
                }
                self.add(line_start + x1i, d * am);
            }
            x = x_next;
        }
    }

    pub fn draw_quad(&mut self, p0: Point, p1: Point, p2: Point) {
        let dev_x = p0.x - 2.0 * p1.x + p2.x;
        let dev_y = p0.y - 2.0 * p1.y + p2.y;
        let dev = (dev_x * dev_x + dev_y * dev_y).sqrt();

        let pieces = ((dev / self.tolerance).sqrt().ceil() as usize).clamp(1, MAX_QUAD_PIECES);

        let step = 1.0 / pieces as f32;
        let mut previous = p0;

        for i in 1..pieces {
            let t = i as f32 * step;
            let mt = 1.0 - t;
            let next = Point::new(
                mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
                mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y
            );
            self.draw_line(previous, next);
            previous = next;
        }
        self.draw_line(previous, p2);
    }

    /// Resolve coverage into `out`, one byte per pixel
    pub fn accumulate(&self, out: &mut [u8]) {
        let mut acc = 0.0_f32;

        let pixels = self.width * self.height;

        for (value, pix) in self.acc[..pixels].iter().zip(out.iter_mut()) {
            acc += value;
            let coverage = acc.abs().min(1.0);
            *pix = (coverage * 255.0 + 0.5) as u8;
        }
    }
}
