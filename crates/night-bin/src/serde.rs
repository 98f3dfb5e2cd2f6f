/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use night_image::{ImageFormat, ImageInfo};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// What `probe` prints for every file
pub struct Metadata<'a> {
    file: &'a str,
    size: usize,
    info: ImageInfo
}

impl<'a> Metadata<'a> {
    pub fn new(file: &'a str, size: usize, info: ImageInfo) -> Metadata<'a> {
        Metadata { file, size, info }
    }
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::Qoi => "qoi",
        ImageFormat::Bmp => "bmp"
    }
}

impl<'a> Serialize for Metadata<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Metadata", 5)?;

        state.serialize_field("file", self.file)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("format", format_name(self.info.format))?;
        state.serialize_field("width", &self.info.width)?;
        state.serialize_field("height", &self.info.height)?;

        state.end()
    }
}
