/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// Header layouts follow the Windows BMP versions, see
// - http://fileformats.archiveteam.org/wiki/BMP
// - https://en.wikipedia.org/wiki/BMP_file_format
//
// WinBMPv2 and OS2-BMPv1 carry a 12 byte info header with 16 bit
// dimensions and 3 byte palette entries, WinBMPv3 grows it to 40 bytes
// and adds compression and the colour count, v4 (108) and v5 (124)
// carry channel masks inside the header.

use alloc::vec::Vec;
use alloc::{format, vec};

use night_core::bytestream::ByteReader;
use night_core::log::{trace, warn};
use night_core::options::DecoderOptions;
use night_core::pixels::PixelBuffer;

use crate::common::{BmpCompression, BmpPixelFormat};
use crate::utils::{expand_bits_to_byte, ChannelMask};
use crate::BmpDecoderErrors;

/// Probe some bytes to see
/// if they consist of a BMP image
pub fn probe_bmp(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        if magic_bytes == b"BM" {
            // skip file_size   -> 4
            // skip reserved    -> 4
            // skip data offset -> 4
            // read sz
            if let Some(sz) = bytes.get(14..18) {
                let sz = u32::from_le_bytes([sz[0], sz[1], sz[2], sz[3]]);

                return matches!(sz, 12 | 40 | 52 | 56 | 108 | 124);
            }
        }
    }
    false
}

/// A single palette entry for bmp
#[derive(Clone, Copy, Default, Debug)]
struct PaletteEntry {
    red:   u8,
    green: u8,
    blue:  u8
}

/// A BMP decoder.
///
/// # Usage
/// ```no_run
/// use night_bmp::BmpDecoder;
///
/// fn main() -> Result<(), night_bmp::BmpDecoderErrors> {
///     let data = std::fs::read("image.bmp").unwrap();
///     let mut decoder = BmpDecoder::new(&data);
///     decoder.decode_headers()?;
///     // after decoding headers, we can safely access the image metadata
///     let (w, h) = decoder.get_dimensions().unwrap();
///     println!("Image width: {}\t Image height: {}", w, h);
///
///     let pixels = decoder.decode_rgba()?;
///     println!("Pixels length:{}", pixels.as_bytes().len());
///     Ok(())
/// }
/// ```
pub struct BmpDecoder<'a> {
    bytes:           ByteReader<'a>,
    options:         DecoderOptions,
    width:           usize,
    height:          usize,
    flip_vertically: bool,
    masks:           [ChannelMask; 4],
    decoded_headers: bool,
    pix_fmt:         BmpPixelFormat,
    data_offset:     usize,
    palette:         Vec<PaletteEntry>,
    depth:           u16
}

impl<'a> BmpDecoder<'a> {
    /// Create a new bmp decoder that reads data from
    /// `data`
    pub fn new(data: &'a [u8]) -> BmpDecoder<'a> {
        BmpDecoder::new_with_options(data, DecoderOptions::default())
    }
    /// Create a new decoder instance with specified options
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> BmpDecoder<'a> {
        BmpDecoder {
            bytes: ByteReader::new(data),
            options,
            decoded_headers: false,
            width: 0,
            height: 0,
            masks: [ChannelMask::default(); 4],
            pix_fmt: BmpPixelFormat::BGR,
            flip_vertically: false,
            data_offset: 0,
            depth: 0,
            palette: vec![]
        }
    }

    /// Decode headers stored in the bmp file and store
    /// information in the decode context
    ///
    /// After calling this, most information fields will be filled
    /// except the actual decoding bytes
    pub fn decode_headers(&mut self) -> Result<(), BmpDecoderErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        if self.bytes.get_u8_err()? != b'B' || self.bytes.get_u8_err()? != b'M' {
            return Err(BmpDecoderErrors::InvalidMagicBytes);
        }
        // 4 bytes file size
        // skip 4 reserved bytes
        self.bytes.skip(8)?;

        let data_offset = self.bytes.get_u32_le_err()?;
        let ihsize = self.bytes.get_u32_le_err()?;

        if ihsize.saturating_add(14) > data_offset {
            return Err(BmpDecoderErrors::GenericStatic("Invalid header size"));
        }

        let (width, height): (i32, i32) = match ihsize {
            40 | 52 | 56 | 108 | 124 => (
                self.bytes.get_i32_le_err()?,
                self.bytes.get_i32_le_err()?
            ),
            12 => (
                i32::from(self.bytes.get_u16_le_err()?),
                i32::from(self.bytes.get_u16_le_err()?)
            ),
            _ => {
                return Err(BmpDecoderErrors::GenericStatic(
                    "Unknown information header size"
                ));
            }
        };
        if width <= 0 {
            return Err(BmpDecoderErrors::GenericStatic("Width is zero or negative"));
        }
        // positive heights are stored bottom up
        self.flip_vertically = height > 0;

        self.height = height.unsigned_abs() as usize;
        self.width = width as usize;

        if self.height > self.options.get_max_height() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "height",
                self.options.get_max_height(),
                self.height
            ));
        }
        if self.width > self.options.get_max_width() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "width",
                self.options.get_max_width(),
                self.width
            ));
        }
        if self.height == 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Height is zero, invalid image"
            ));
        }

        trace!("Width: {}", self.width);
        trace!("Height: {}", self.height);

        // planes
        if self.bytes.get_u16_le_err()? != 1 {
            return Err(BmpDecoderErrors::GenericStatic("Invalid BMP header"));
        }

        let depth = self.bytes.get_u16_le_err()?;
        let mut colors_used = 0;

        let compression = if ihsize >= 40 {
            let compression = BmpCompression::from_u32(self.bytes.get_u32_le_err()?).ok_or(
                BmpDecoderErrors::GenericStatic("Unsupported BMP compression scheme")
            )?;
            // image size, horizontal and vertical resolution
            self.bytes.skip(12)?;
            colors_used = self.bytes.get_u32_le_err()?;
            // important colours
            self.bytes.skip(4)?;
            compression
        } else {
            BmpCompression::RGB
        };

        trace!("Compression  : {:?}", compression);
        trace!("Bit depth: {:?}", depth);

        self.pix_fmt = match (compression, depth) {
            (BmpCompression::RLE4 | BmpCompression::RLE8, _) => {
                return Err(BmpDecoderErrors::GenericStatic(
                    "RLE compressed BMP images are not supported"
                ));
            }
            (BmpCompression::RGB, 1 | 4 | 8) => BmpPixelFormat::PAL8,
            (BmpCompression::RGB, 16) => {
                // 5 bits for each channel
                self.masks = [
                    ChannelMask::new(0x7C00)?,
                    ChannelMask::new(0x03E0)?,
                    ChannelMask::new(0x001F)?,
                    ChannelMask::default()
                ];
                BmpPixelFormat::Masked
            }
            (BmpCompression::RGB, 24) => BmpPixelFormat::BGR,
            (BmpCompression::RGB, 32) => BmpPixelFormat::BGRO,
            (BmpCompression::BITFIELDS, 16 | 32) => {
                // masks follow a v3 header, and live inside larger ones
                let red = self.bytes.get_u32_le_err()?;
                let green = self.bytes.get_u32_le_err()?;
                let blue = self.bytes.get_u32_le_err()?;
                let alpha = if ihsize >= 56 {
                    self.bytes.get_u32_le_err()?
                } else {
                    0
                };
                self.masks = [
                    ChannelMask::new(red)?,
                    ChannelMask::new(green)?,
                    ChannelMask::new(blue)?,
                    ChannelMask::new(alpha)?
                ];
                BmpPixelFormat::Masked
            }
            (_, depth) => {
                let message = format!("Depth {depth} unsupported for {compression:?}");
                return Err(BmpDecoderErrors::Generic(message));
            }
        };

        if self.pix_fmt == BmpPixelFormat::PAL8 {
            self.read_palette(ihsize, depth, colors_used, data_offset)?;
        }

        self.depth = depth;
        self.data_offset = data_offset as usize;
        self.decoded_headers = true;

        Ok(())
    }

    fn read_palette(
        &mut self, ihsize: u32, depth: u16, colors_used: u32, data_offset: u32
    ) -> Result<(), BmpDecoderErrors> {
        let max_colors = 1_u32 << depth;
        let mut colors = max_colors;

        if colors_used > max_colors {
            let msg = format!("Incorrect number of colors {colors_used} for depth {depth}");
            if self.options.get_strict_mode() {
                return Err(BmpDecoderErrors::Generic(msg));
            }
            warn!("{}", msg);
        } else if colors_used != 0 {
            colors = colors_used;
        }
        // OS/2 bitmap, 3 bytes per palette entry
        let entry_size = if ihsize == 12 { 3 } else { 4 };
        let space = data_offset - ihsize - 14;

        if space < colors * entry_size {
            return Err(BmpDecoderErrors::GenericStatic("Invalid Palette entries"));
        }
        // palette location
        self.bytes.set_position((14 + ihsize) as usize);

        // indices past the palette read black
        self.palette.resize(256, PaletteEntry::default());

        for entry in self.palette.iter_mut().take(colors as usize) {
            let bgr = self.bytes.get_slice(entry_size as usize)?;

            entry.red = bgr[2];
            entry.green = bgr[1];
            entry.blue = bgr[0];
        }
        Ok(())
    }

    /// Get dimensions of the image
    ///
    /// This is a tuple of width,height
    pub const fn get_dimensions(&self) -> Option<(usize, usize)> {
        if !self.decoded_headers {
            return None;
        }
        Some((self.width, self.height))
    }

    /// Decode the image into RGBA pixels, top row first
    pub fn decode_rgba(&mut self) -> Result<PixelBuffer, BmpDecoderErrors> {
        self.decode_headers()?;

        // rows are padded to four bytes
        let stride = self
            .width
            .checked_mul(usize::from(self.depth))
            .and_then(|x| x.checked_add(31))
            .map(|x| x / 32 * 4)
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        let data_size = stride
            .checked_mul(self.height)
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        self.bytes.set_position(self.data_offset);
        let data = self.bytes.get_slice(data_size).map_err(|_| {
            BmpDecoderErrors::Generic(format!(
                "Not enough pixel data, expected {data_size} bytes but {} remain",
                self.bytes.remaining()
            ))
        })?;

        let mut image = PixelBuffer::zeroed(self.width, self.height)?;
        let mut indices = vec![0_u8; self.width];
        let width = self.width;

        for (i, out) in image.pixels_mut().chunks_exact_mut(width).enumerate() {
            let row_index = if self.flip_vertically {
                self.height - 1 - i
            } else {
                i
            };
            let row = &data[row_index * stride..(row_index + 1) * stride];

            match self.pix_fmt {
                BmpPixelFormat::PAL8 => {
                    if self.depth == 8 {
                        indices.copy_from_slice(&row[..width]);
                    } else {
                        expand_bits_to_byte(usize::from(self.depth), row, &mut indices);
                    }
                    for (px, &index) in out.iter_mut().zip(&indices) {
                        let entry = self.palette[usize::from(index)];
                        *px = [entry.red, entry.green, entry.blue, 255];
                    }
                }
                BmpPixelFormat::BGR => {
                    for (px, bgr) in out.iter_mut().zip(row.chunks_exact(3)) {
                        *px = [bgr[2], bgr[1], bgr[0], 255];
                    }
                }
                BmpPixelFormat::BGRO => {
                    for (px, bgr) in out.iter_mut().zip(row.chunks_exact(4)) {
                        *px = [bgr[2], bgr[1], bgr[0], 255];
                    }
                }
                BmpPixelFormat::Masked => {
                    let [r, g, b, a] = self.masks;
                    let bytes_per_pixel = usize::from(self.depth / 8);

                    for (px, raw) in out.iter_mut().zip(row.chunks_exact(bytes_per_pixel)) {
                        let value = match raw {
                            [x, y] => u32::from(u16::from_le_bytes([*x, *y])),
                            [x, y, z, w] => u32::from_le_bytes([*x, *y, *z, *w]),
                            _ => 0
                        };
                        let alpha = if a.is_empty() { 255 } else { a.extract(value) };

                        *px = [r.extract(value), g.extract(value), b.extract(value), alpha];
                    }
                }
            }
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use crate::{probe_bmp, BmpDecoder};

    fn v3_header(width: i32, height: i32, depth: u16, compression: u32, extra: usize, data: usize) -> Vec<u8> {
        let offset = 14 + 40 + extra;
        let mut out = b"BM".to_vec();
        out.extend_from_slice(&((offset + data) as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        out.extend_from_slice(&40_u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1_u16.to_le_bytes());
        out.extend_from_slice(&depth.to_le_bytes());
        out.extend_from_slice(&compression.to_le_bytes());
        out.extend_from_slice(&[0; 20]);
        out
    }

    #[test]
    fn bottom_up_24_bit() {
        let mut file = v3_header(1, 2, 24, 0, 0, 8);
        // bottom row first, each padded to four bytes
        file.extend_from_slice(&[1, 2, 3, 0, 4, 5, 6, 0]);

        assert!(probe_bmp(&file));
        let image = BmpDecoder::new(&file).decode_rgba().unwrap();
        assert_eq!(image.as_bytes(), &[6, 5, 4, 255, 3, 2, 1, 255]);
    }

    #[test]
    fn top_down_palette() {
        let mut file = v3_header(3, -1, 8, 0, 8, 4);
        // colours used
        file[46] = 2;
        // two palette entries, BGR0
        file.extend_from_slice(&[0, 0, 255, 0, 255, 0, 0, 0]);
        file.extend_from_slice(&[1, 0, 1, 0]);

        let image = BmpDecoder::new(&file).decode_rgba().unwrap();
        assert_eq!(
            image.as_bytes(),
            &[0, 0, 255, 255, 255, 0, 0, 255, 0, 0, 255, 255]
        );
    }

    #[test]
    fn bitfields_with_masks_after_header() {
        let mut file = v3_header(1, 1, 32, 3, 12, 4);
        for mask in [0x0000_FF00_u32, 0x00FF_0000, 0xFF00_0000] {
            file.extend_from_slice(&mask.to_le_bytes());
        }
        file.extend_from_slice(&[0, 10, 20, 30]);

        let image = BmpDecoder::new(&file).decode_rgba().unwrap();
        assert_eq!(image.as_bytes(), &[10, 20, 30, 255]);
    }

    #[test]
    fn bitfields_mask_with_holes_is_an_error() {
        let mut file = v3_header(1, 1, 32, 3, 12, 4);
        for mask in [0x8000_0001_u32, 0x0000_FF00, 0x00FF_0000] {
            file.extend_from_slice(&mask.to_le_bytes());
        }
        file.extend_from_slice(&[0xFF; 4]);

        assert!(BmpDecoder::new(&file).decode_headers().is_err());
        assert!(BmpDecoder::new(&file).decode_rgba().is_err());
    }

    #[test]
    fn bitfields_zero_mask_reads_black() {
        let mut file = v3_header(1, 1, 16, 3, 12, 4);
        for mask in [0_u32, 0x03E0, 0x001F] {
            file.extend_from_slice(&mask.to_le_bytes());
        }
        file.extend_from_slice(&[0xFF, 0x7F, 0, 0]);

        let image = BmpDecoder::new(&file).decode_rgba().unwrap();
        assert_eq!(image.as_bytes(), &[0, 255, 255, 255]);
    }

    #[test]
    fn rle_is_rejected() {
        let mut file = v3_header(1, 1, 8, 1, 8, 4);
        file.extend_from_slice(&[0; 12]);
        assert!(BmpDecoder::new(&file).decode_headers().is_err());
    }

    #[test]
    fn truncated_pixels_fail() {
        let mut file = v3_header(2, 2, 24, 0, 0, 16);
        file.extend_from_slice(&[0; 15]);
        assert!(BmpDecoder::new(&file).decode_rgba().is_err());
    }
}
