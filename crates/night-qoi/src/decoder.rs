/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;

use night_core::bytestream::ByteReader;
use night_core::log::{debug, error, info, warn};
use night_core::options::DecoderOptions;
use night_core::pixels::PixelBuffer;

use crate::constants::{
    qoi_hash, QOI_END_MARKER, QOI_HEADER_SIZE, QOI_MASK_2, QOI_OP_DIFF, QOI_OP_INDEX,
    QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA, QOI_OP_RUN
};
use crate::errors::QoiErrors;

/// Colourspace byte of the header
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum QoiColorspace {
    sRGB,
    // SRGB with Linear alpha
    Linear
}

/// A Quite OK Image decoder
///
/// The decoder is initialized by calling `new`
/// and either of [`decode_headers`] to decode headers
/// or [`decode_rgba`] to return uncompressed pixels
///
/// Additional methods are provided that give more
/// details of the compressed image like width and height
/// are accessible after decoding headers
///
/// [`decode_headers`]:QoiDecoder::decode_headers
/// [`decode_rgba`]:QoiDecoder::decode_rgba
pub struct QoiDecoder<'a> {
    width:             usize,
    height:            usize,
    channels:          u8,
    colorspace_layout: QoiColorspace,
    decoded_headers:   bool,
    stream:            ByteReader<'a>,
    options:           DecoderOptions
}

impl<'a> QoiDecoder<'a> {
    /// Create a new QOI format decoder with the default options
    ///
    /// # Example
    ///
    /// ```no_run
    /// let mut decoder = night_qoi::QoiDecoder::new(&[]);
    /// // additional code
    /// ```
    pub fn new(data: &'a [u8]) -> QoiDecoder<'a> {
        QoiDecoder::new_with_options(data, DecoderOptions::default())
    }
    /// Create a new QOI format decoder that obeys specified restrictions
    ///
    /// E.g can be used to set width and height limits to prevent OOM attacks
    ///
    /// # Example
    /// ```
    /// use night_core::options::DecoderOptions;
    /// use night_qoi::QoiDecoder;
    /// // only decode images less than 10 in both width and height
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = QoiDecoder::new_with_options(&[], options);
    /// ```
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> QoiDecoder<'a> {
        QoiDecoder {
            width: 0,
            height: 0,
            channels: 4,
            colorspace_layout: QoiColorspace::sRGB,
            decoded_headers: false,
            stream: ByteReader::new(data),
            options
        }
    }
    /// Decode a QOI header storing needed information into
    /// the decoder instance
    pub fn decode_headers(&mut self) -> Result<(), QoiErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        if !self.stream.has(QOI_HEADER_SIZE) {
            return Err(QoiErrors::InsufficientData(
                QOI_HEADER_SIZE,
                self.stream.remaining()
            ));
        }
        // match magic bytes.
        let magic = self.stream.get_slice(4)?;

        if magic != b"qoif" {
            return Err(QoiErrors::WrongMagicBytes);
        }

        let width = self.stream.get_u32_be_err()? as usize;
        let height = self.stream.get_u32_be_err()? as usize;
        let channels = self.stream.get_u8_err()?;
        let colorspace_layout = self.stream.get_u8_err()?;

        if width > self.options.get_max_width() {
            let msg = format!(
                "Width {} greater than max configured width {}",
                width,
                self.options.get_max_width()
            );
            return Err(QoiErrors::Generic(msg));
        }

        if height > self.options.get_max_height() {
            let msg = format!(
                "Height {} greater than max configured height {}",
                height,
                self.options.get_max_height()
            );
            return Err(QoiErrors::Generic(msg));
        }
        if !(channels == 3 || channels == 4) {
            return Err(QoiErrors::UnknownChannels(channels));
        }
        self.colorspace_layout = match colorspace_layout {
            0 => QoiColorspace::sRGB,
            1 => QoiColorspace::Linear,
            _ => {
                if self.options.get_strict_mode() {
                    return Err(QoiErrors::UnknownColorspace(colorspace_layout));
                }
                error!("Unknown/invalid colorspace value {colorspace_layout}, expected 0 or 1");
                QoiColorspace::sRGB
            }
        };
        self.width = width;
        self.height = height;
        self.channels = channels;

        info!("Image width: {:?}", self.width);
        info!("Image height: {:?}", self.height);
        info!("Image channels: {:?}", self.channels);
        self.decoded_headers = true;

        Ok(())
    }

    /// Decode the image into RGBA pixels
    ///
    /// Three channel images are given an opaque alpha channel
    pub fn decode_rgba(&mut self) -> Result<PixelBuffer, QoiErrors> {
        self.decode_headers()?;

        let mut image = PixelBuffer::zeroed(self.width, self.height)?;

        let mut index = [[0_u8; 4]; 64];
        // starting pixel
        let mut px = [0, 0, 0, 255];

        let mut run = 0;

        for pix in image.pixels_mut() {
            if run > 0 {
                run -= 1;
                *pix = px;
                continue;
            }
            let chunk = self.stream.get_u8_err()?;

            if chunk == QOI_OP_RGB {
                let rgb = self.stream.get_slice(3)?;
                px[..3].copy_from_slice(rgb);
            } else if chunk == QOI_OP_RGBA {
                let rgba = self.stream.get_slice(4)?;
                px.copy_from_slice(rgba);
            } else {
                match chunk & QOI_MASK_2 {
                    QOI_OP_INDEX => px = index[usize::from(chunk & 63)],
                    QOI_OP_DIFF => {
                        px[0] = px[0].wrapping_add(((chunk >> 4) & 0x03).wrapping_sub(2));
                        px[1] = px[1].wrapping_add(((chunk >> 2) & 0x03).wrapping_sub(2));
                        px[2] = px[2].wrapping_add((chunk & 0x03).wrapping_sub(2));
                    }
                    QOI_OP_LUMA => {
                        let b2 = self.stream.get_u8_err()?;
                        let vg = (chunk & 0x3f).wrapping_sub(32);

                        px[0] = px[0].wrapping_add(vg.wrapping_sub(8).wrapping_add((b2 >> 4) & 0x0f));
                        px[1] = px[1].wrapping_add(vg);
                        px[2] = px[2].wrapping_add(vg.wrapping_sub(8).wrapping_add(b2 & 0x0f));
                    }
                    // QOI_OP_RUN, the current pixel is the first of the run
                    _ => run = usize::from(chunk & 0x3f)
                }
            }
            *pix = px;
            index[qoi_hash(px)] = px;
        }

        let marker = self
            .stream
            .get_slice(QOI_END_MARKER.len())
            .map_err(|_| QoiErrors::GenericStatic("Missing QOI end marker"))?;

        if marker != QOI_END_MARKER {
            return Err(QoiErrors::GenericStatic(
                "Last bytes do not match QOI end marker"
            ));
        }
        if !self.stream.eof() {
            if self.options.get_strict_mode() {
                return Err(QoiErrors::GenericStatic("Extra bytes after QOI end marker"));
            }
            warn!("{} bytes after QOI end marker, ignoring", self.stream.remaining());
        }
        if self.channels == 3 {
            // encoders may still emit RGBA ops for 3 channel images
            for pix in image.pixels_mut() {
                pix[3] = 255;
            }
        }

        debug!("Finished decoding image");

        Ok(image)
    }

    /// Return the width and height of the image
    ///
    /// Or none if the headers haven't been decoded
    pub const fn get_dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            return Some((self.width, self.height));
        }
        None
    }
    /// Number of channels stored in the file, 3 or 4
    pub const fn get_channels(&self) -> Option<u8> {
        if self.decoded_headers {
            return Some(self.channels);
        }
        None
    }
    /// Colourspace stored in the header
    pub const fn get_colorspace(&self) -> Option<QoiColorspace> {
        if self.decoded_headers {
            return Some(self.colorspace_layout);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::{QoiDecoder, QoiErrors};

    fn header(w: u32, h: u32, channels: u8) -> Vec<u8> {
        let mut out = b"qoif".to_vec();
        out.extend_from_slice(&w.to_be_bytes());
        out.extend_from_slice(&h.to_be_bytes());
        out.extend_from_slice(&[channels, 0]);
        out
    }

    #[test]
    fn decode_every_op() {
        let mut data = header(6, 1, 4);
        // rgba, diff(+1,-1,0), luma(vg=2, r-g=0, b-g=0), index of the first pixel, run 2
        data.extend_from_slice(&[0xff, 10, 20, 30, 40]);
        data.push(0x40 | (3 << 4) | (1 << 2) | 2);
        data.extend_from_slice(&[0x80 | 34, 0x88]);

        let first = [10_u8, 20, 30, 40];
        let hash = (10 * 3 + 20 * 5 + 30 * 7 + 40 * 11) % 64;
        data.push(hash as u8);
        data.push(0xc0 | 1);
        data.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);

        let image = QoiDecoder::new(&data).decode_rgba().unwrap();
        let pixels = image.pixels();

        assert_eq!(pixels[0], first);
        assert_eq!(pixels[1], [11, 19, 30, 40]);
        assert_eq!(pixels[2], [13, 21, 32, 40]);
        assert_eq!(pixels[3], first);
        assert_eq!(pixels[4], first);
        assert_eq!(pixels[5], first);
    }

    #[test]
    fn three_channel_is_opaque() {
        let mut data = header(1, 1, 3);
        data.extend_from_slice(&[0xfe, 1, 2, 3]);
        data.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);

        let image = QoiDecoder::new(&data).decode_rgba().unwrap();
        assert_eq!(image.as_bytes(), &[1, 2, 3, 255]);
    }

    #[test]
    fn bad_channels_and_magic() {
        let data = header(1, 1, 5);
        assert!(matches!(
            QoiDecoder::new(&data).decode_headers(),
            Err(QoiErrors::UnknownChannels(5))
        ));
        let mut data = header(1, 1, 4);
        data[0] = b'x';
        assert!(matches!(
            QoiDecoder::new(&data).decode_headers(),
            Err(QoiErrors::WrongMagicBytes)
        ));
    }

    #[test]
    fn zero_width_is_an_error() {
        let mut data = header(0, 4, 4);
        data.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
        assert!(QoiDecoder::new(&data).decode_rgba().is_err());
    }
}
