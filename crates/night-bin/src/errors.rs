/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

use night_font::FontErrors;
use night_image::ImageErrors;

pub enum CliErrors {
    IoErrors(String, std::io::Error),
    ImageErrors(ImageErrors),
    FontErrors(FontErrors),
    Generic(String)
}

impl Debug for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoErrors(file, err) => writeln!(f, "{file}: {err}"),
            Self::ImageErrors(err) => writeln!(f, "{err:?}"),
            Self::FontErrors(err) => writeln!(f, "{err:?}"),
            Self::Generic(err) => writeln!(f, "{err}")
        }
    }
}

impl From<ImageErrors> for CliErrors {
    fn from(value: ImageErrors) -> Self {
        CliErrors::ImageErrors(value)
    }
}

impl From<FontErrors> for CliErrors {
    fn from(value: FontErrors) -> Self {
        CliErrors::FontErrors(value)
    }
}
