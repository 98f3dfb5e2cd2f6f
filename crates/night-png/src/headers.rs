/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;

use night_core::bytestream::ByteReader;
use night_core::log::{info, trace, warn};

use crate::decoder::{PLTEEntry, PngChunk};
use crate::enums::{InterlaceMethod, PngColor};
use crate::error::PngDecodeErrors;
use crate::PngDecoder;

pub(crate) mod writers;

impl<'a> PngDecoder<'a> {
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk, data: &[u8]) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Err(PngDecodeErrors::GenericStatic("Multiple IHDR, corrupt PNG"));
        }

        if chunk.length != 13 {
            return Err(PngDecodeErrors::GenericStatic("BAD IHDR length"));
        }
        let mut stream = ByteReader::new(data);

        self.png_info.width = stream.get_u32_be_err()? as usize;
        self.png_info.height = stream.get_u32_be_err()? as usize;

        if self.png_info.width == 0 || self.png_info.height == 0 {
            return Err(PngDecodeErrors::GenericStatic("Width or height cannot be zero"));
        }

        if self.png_info.width > self.options.get_max_width() {
            return Err(PngDecodeErrors::Generic(format!(
                "Image width {}, larger than maximum configured width {}, aborting",
                self.png_info.width,
                self.options.get_max_width()
            )));
        }

        if self.png_info.height > self.options.get_max_height() {
            return Err(PngDecodeErrors::Generic(format!(
                "Image height {}, larger than maximum configured height {}, aborting",
                self.png_info.height,
                self.options.get_max_height()
            )));
        }

        self.png_info.depth = stream.get_u8_err()?;
        let color = stream.get_u8_err()?;

        if let Some(img_color) = PngColor::from_int(color) {
            self.png_info.color = img_color;
        } else {
            return Err(PngDecodeErrors::Generic(format!("Unknown color value {color}")));
        }
        self.png_info.component = self.png_info.color.num_components();
        // verify colors plus bit depths
        match self.png_info.depth {
            1 | 2 | 4 => {
                if !matches!(self.png_info.color, PngColor::Luma | PngColor::Palette) {
                    let err_msg = format!(
                        "Bit depth of {} only allows Greyscale or Indexed color types, but found {:?}",
                        self.png_info.depth, self.png_info.color
                    );

                    return Err(PngDecodeErrors::Generic(err_msg));
                }
            }
            8 => { /*silent pass through since all color types support it */ }
            16 => {
                if self.png_info.color == PngColor::Palette {
                    return Err(PngDecodeErrors::GenericStatic(
                        "Indexed colour cannot have 16 bit depth"
                    ));
                }
            }
            _ => {
                return Err(PngDecodeErrors::Generic(format!(
                    "Unknown bit depth {}",
                    self.png_info.depth
                )))
            }
        }

        if stream.get_u8_err()? != 0 {
            return Err(PngDecodeErrors::GenericStatic("Unknown compression method"));
        }

        let filter_method = stream.get_u8_err()?;

        if filter_method != 0 {
            return Err(PngDecodeErrors::Generic(format!(
                "Unknown filter method {filter_method}"
            )));
        }

        let interlace_method = stream.get_u8_err()?;

        if let Some(method) = InterlaceMethod::from_int(interlace_method) {
            self.png_info.interlace_method = method;
        } else {
            return Err(PngDecodeErrors::Generic(format!(
                "Unknown interlace method {interlace_method}",
            )));
        }

        info!("Width: {}", self.png_info.width);
        info!("Height: {}", self.png_info.height);
        info!("Color type: {:?}", self.png_info.color);
        info!("Depth: {:?}", self.png_info.depth);
        info!("Interlace :{:?}", self.png_info.interlace_method);

        self.seen_hdr = true;

        Ok(())
    }

    pub(crate) fn parse_plte(&mut self, chunk: PngChunk, data: &[u8]) -> Result<(), PngDecodeErrors> {
        if chunk.length % 3 != 0 || chunk.length == 0 || chunk.length > 256 * 3 {
            return Err(PngDecodeErrors::GenericStatic("Invalid PLTE length, corrupt PNG"));
        }
        if !self.idat_chunks.is_empty() {
            return Err(PngDecodeErrors::GenericStatic("PLTE chunk after IDAT"));
        }

        // allocate palette, entries not in the chunk stay opaque black
        self.palette.clear();
        self.palette.resize(256, PLTEEntry::default());

        for (entry, pal_chunk) in self.palette.iter_mut().zip(data.chunks_exact(3)) {
            entry.red = pal_chunk[0];
            entry.green = pal_chunk[1];
            entry.blue = pal_chunk[2];
        }
        self.palette_entries = chunk.length / 3;

        trace!("Palette entries: {}", self.palette_entries);

        Ok(())
    }

    pub(crate) fn parse_idat(&mut self, data: &[u8]) -> Result<(), PngDecodeErrors> {
        // get a reference to the IDAT chunk stream and push it,
        // we will later pass these to the deflate decoder as a whole, to get the whole
        // uncompressed stream.
        self.idat_chunks.extend_from_slice(data);

        Ok(())
    }

    pub(crate) fn parse_trns(&mut self, chunk: PngChunk, data: &[u8]) -> Result<(), PngDecodeErrors> {
        let mut stream = ByteReader::new(data);

        match self.png_info.color {
            PngColor::Luma => {
                let grey_sample = stream.get_u16_be_err()?;
                self.trns_key = Some([grey_sample; 3]);
            }
            PngColor::RGB => {
                let red_sample = stream.get_u16_be_err()?;
                let green_sample = stream.get_u16_be_err()?;
                let blue_sample = stream.get_u16_be_err()?;
                self.trns_key = Some([red_sample, green_sample, blue_sample]);
            }
            PngColor::Palette => {
                if self.palette.is_empty() {
                    return Err(PngDecodeErrors::GenericStatic("tRNS chunk before PLTE"));
                }
                if chunk.length > self.palette_entries {
                    if self.options.get_strict_mode() {
                        return Err(PngDecodeErrors::GenericStatic(
                            "tRNS chunk with too long entries"
                        ));
                    }
                    warn!("tRNS chunk has more entries than the palette, ignoring extras");
                }
                for (entry, alpha) in self.palette.iter_mut().zip(data) {
                    entry.alpha = *alpha;
                }
            }
            _ => {
                let msg = format!(
                    "A tRNS chunk shall not appear for colour type {:?} as it is already transparent",
                    self.png_info.color
                );
                if self.options.get_strict_mode() {
                    return Err(PngDecodeErrors::Generic(msg));
                }
                warn!("{}", msg);
            }
        }
        self.seen_trns = true;

        Ok(())
    }

    /// Chunks we do not understand, ancillary ones are skipped
    /// while unknown critical chunks abort decoding
    pub(crate) fn parse_unknown(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        let chunk_name = core::str::from_utf8(&chunk.chunk).unwrap_or("XXXX");

        if chunk.chunk[0] & (1 << 5) == 0 {
            return Err(PngDecodeErrors::Generic(format!(
                "Marker {chunk_name} unknown but deemed necessary",
            )));
        }

        trace!("Encountered unknown chunk {:?}", chunk_name);
        trace!("Length of chunk {}", chunk.length);

        Ok(())
    }
}
