/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use night_core::bytestream::FnSink;
use night_image::{write, EncodeFormat, PixelBuffer};

use crate::errors::CliErrors;

pub fn read_file(file: &str) -> Result<Vec<u8>, CliErrors> {
    debug!("Reading {file}");
    std::fs::read(file).map_err(|e| CliErrors::IoErrors(file.to_string(), e))
}

/// Pick the output format, `--format` wins over the file extension
pub fn output_format(out: &str, format: Option<&String>) -> Result<EncodeFormat, CliErrors> {
    if let Some(format) = format {
        return EncodeFormat::from_extension(format)
            .ok_or_else(|| CliErrors::Generic(format!("Unknown output format {format}")));
    }
    let extension = Path::new(out)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    EncodeFormat::from_extension(extension).ok_or_else(|| {
        CliErrors::Generic(format!(
            "Cannot infer output format from {out:?}, use --format"
        ))
    })
}

/// Encode `image` straight into the output file
pub fn write_image(out: &str, format: EncodeFormat, image: &PixelBuffer) -> Result<(), CliErrors> {
    let io_err = |e| CliErrors::IoErrors(out.to_string(), e);

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(out)
        .map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    let mut failure = None;
    let sink = FnSink::new(|bytes: &[u8]| match writer.write_all(bytes) {
        Ok(()) => true,
        Err(e) => {
            failure = Some(e);
            false
        }
    });
    let result = write(sink, format, image);

    if let Some(e) = failure {
        return Err(io_err(e));
    }
    let written = result?;
    writer.flush().map_err(io_err)?;

    info!("Wrote {written} bytes to {out} as {format:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_selection() {
        assert_eq!(output_format("a.png", None).unwrap(), EncodeFormat::Png);
        assert_eq!(output_format("a.PNG", None).unwrap(), EncodeFormat::Png);
        assert_eq!(
            output_format("a.png", Some(&"qoi".to_string())).unwrap(),
            EncodeFormat::Qoi
        );
        assert!(output_format("a.bmp", None).is_err());
        assert!(output_format("noextension", None).is_err());
    }
}
