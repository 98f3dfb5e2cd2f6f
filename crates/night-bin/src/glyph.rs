/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, trace};
use night_font::FontInfo;
use night_image::{EncodeFormat, PixelBuffer};

use crate::errors::CliErrors;
use crate::file_io::{read_file, write_image};

/// Coverage as the alpha channel of white pixels
pub fn coverage_to_rgba(width: usize, height: usize, coverage: &[u8]) -> Result<PixelBuffer, CliErrors> {
    let mut data = Vec::with_capacity(coverage.len() * 4);

    for alpha in coverage {
        data.extend_from_slice(&[255, 255, 255, *alpha]);
    }
    PixelBuffer::new(width, height, data).map_err(|e| CliErrors::Generic(format!("{e:?}")))
}

pub fn render_glyph(args: &ArgMatches) -> Result<(), CliErrors> {
    let (Some(font_file), Some(text), Some(out)) = (
        args.get_one::<String>("font"),
        args.get_one::<String>("char"),
        args.get_one::<String>("out")
    ) else {
        return Err(CliErrors::Generic("Missing arguments".to_string()));
    };
    let size = args.get_one::<f32>("size").copied().unwrap_or(32.0);

    let character = text
        .chars()
        .next()
        .ok_or_else(|| CliErrors::Generic("--char is empty".to_string()))?;

    let data = read_file(font_file)?;
    let font = FontInfo::new(&data)?;

    let glyph = font.glyph_index(u32::from(character));
    let scale = font.scale_for_pixel_height(size);
    let metrics = font.glyph_metrics(glyph, scale)?;

    trace!("Glyph {glyph} for {character:?}: {metrics:?}");

    if !metrics.visible || metrics.width == 0 || metrics.height == 0 {
        return Err(CliErrors::Generic(format!(
            "Glyph for {character:?} has no outline"
        )));
    }
    let mut coverage = vec![0; metrics.width * metrics.height];
    font.render_glyph(glyph, scale, metrics.width, metrics.height, &mut coverage)?;

    let image = coverage_to_rgba(metrics.width, metrics.height, &coverage)?;
    write_image(out, EncodeFormat::Png, &image)?;

    info!("Rendered {character:?} at {size}px into {out}");
    Ok(())
}
