/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Font engine options

/// Options controlling font parsing and glyph rendering
#[derive(Debug, Copy, Clone)]
pub struct FontOptions {
    /// How many levels of composite glyph references
    /// are followed before giving up
    ///
    /// - Default value: 8
    max_composite_depth: usize,
    /// Maximum distance, in pixels, between a curve and the
    /// lines approximating it
    ///
    /// - Default value: 0.35
    flatten_tolerance:   f32,
    /// Whether fonts without `loca`/`glyf` should be rejected
    /// instead of reporting every glyph as invisible
    ///
    /// - Default value: false
    strict_mode:         bool
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            max_composite_depth: 8,
            flatten_tolerance:   0.35,
            strict_mode:         false
        }
    }
}

impl FontOptions {
    pub const fn get_max_composite_depth(&self) -> usize {
        self.max_composite_depth
    }

    pub fn set_max_composite_depth(mut self, depth: usize) -> Self {
        self.max_composite_depth = depth;
        self
    }

    pub const fn get_flatten_tolerance(&self) -> f32 {
        self.flatten_tolerance
    }

    /// Set the flattening tolerance, non positive values
    /// keep the current tolerance
    pub fn set_flatten_tolerance(mut self, tolerance: f32) -> Self {
        if tolerance > 0.0 {
            self.flatten_tolerance = tolerance;
        }
        self
    }

    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}
