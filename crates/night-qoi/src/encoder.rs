/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use night_core::bytestream::{ByteSink, ByteWriter};
use night_core::options::EncoderOptions;
use night_core::pixels::{checked_len, PixelBufferError};

use crate::constants::{
    qoi_hash, QOI_END_MARKER, QOI_HEADER_SIZE, QOI_MAGIC, QOI_MAX_RUN, QOI_OP_DIFF, QOI_OP_INDEX,
    QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA, QOI_OP_RUN
};
use crate::QoiEncodeErrors;

/// A QOI encoder for RGBA pixels
///
/// The stream always declares four channels and the sRGB colourspace
pub struct QoiEncoder<'a> {
    // raw pixels, in RGBA
    pixel_data: &'a [u8],
    options:    EncoderOptions
}

impl<'a> QoiEncoder<'a> {
    /// Create a new encoder which will encode the pixels
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> QoiEncoder<'a> {
        QoiEncoder {
            pixel_data: data,
            options
        }
    }

    fn encode_headers<T: ByteSink>(&self, writer: &mut ByteWriter<T>) -> Result<(), QoiEncodeErrors> {
        let options = &self.options;

        let width = u32::try_from(options.get_width())
            .map_err(|_| QoiEncodeErrors::TooLargeDimensions(options.get_width()))?;
        let height = u32::try_from(options.get_height())
            .map_err(|_| QoiEncodeErrors::TooLargeDimensions(options.get_height()))?;

        // qoif
        writer.write_u32_be_err(QOI_MAGIC)?;
        writer.write_u32_be_err(width)?;
        writer.write_u32_be_err(height)?;
        // channels
        writer.write_u8_err(4)?;
        // sRGB with linear alpha
        writer.write_u8_err(0)?;

        Ok(())
    }

    /// Encode the pixels, writing the stream to `sink`
    ///
    /// Returns the number of bytes written
    #[allow(clippy::manual_range_contains)]
    pub fn encode<T: ByteSink>(&mut self, sink: T) -> Result<usize, QoiEncodeErrors> {
        let expected = checked_len(self.options.get_width(), self.options.get_height())?;

        if expected != self.pixel_data.len() {
            return Err(QoiEncodeErrors::BadDimensions(PixelBufferError::LengthMismatch(
                expected,
                self.pixel_data.len()
            )));
        }
        let mut stream = ByteWriter::new(sink);
        stream.reserve(QOI_HEADER_SIZE + expected / 2)?;

        self.encode_headers(&mut stream)?;

        let mut index = [[0_u8; 4]; 64];
        // starting pixel
        let mut px_prev = [0, 0, 0, 255];

        let mut run = 0;

        for pix_chunk in self.pixel_data.chunks_exact(4) {
            let px = [pix_chunk[0], pix_chunk[1], pix_chunk[2], pix_chunk[3]];

            if px == px_prev {
                run += 1;

                if run == QOI_MAX_RUN {
                    stream.write_u8_err(QOI_OP_RUN | (run - 1))?;
                    run = 0;
                }
                continue;
            }
            if run > 0 {
                stream.write_u8_err(QOI_OP_RUN | (run - 1))?;
                run = 0;
            }

            let index_pos = qoi_hash(px);

            if index[index_pos] == px {
                stream.write_u8_err(QOI_OP_INDEX | (index_pos as u8))?;
            } else {
                index[index_pos] = px;

                if px[3] == px_prev[3] {
                    let vr = px[0].wrapping_sub(px_prev[0]);
                    let vg = px[1].wrapping_sub(px_prev[1]);
                    let vb = px[2].wrapping_sub(px_prev[2]);

                    let vg_r = vr.wrapping_sub(vg);
                    let vg_b = vb.wrapping_sub(vg);

                    if (vr < 2 || vr > 253) && (vg < 2 || vg > 253) && (vb < 2 || vb > 253) {
                        stream.write_u8_err(
                            QOI_OP_DIFF
                                | vr.wrapping_add(2) << 4
                                | vg.wrapping_add(2) << 2
                                | vb.wrapping_add(2)
                        )?;
                    } else if (vg_r > 247 || vg_r < 8)
                        && (vg > 223 || vg < 32)
                        && (vg_b > 247 || vg_b < 8)
                    {
                        stream.write_u8_err(QOI_OP_LUMA | vg.wrapping_add(32))?;
                        stream.write_u8_err(vg_r.wrapping_add(8) << 4 | vg_b.wrapping_add(8))?;
                    } else {
                        stream.write_all(&[QOI_OP_RGB, px[0], px[1], px[2]])?;
                    }
                } else {
                    stream.write_u8_err(QOI_OP_RGBA)?;
                    stream.write_all(&px)?;
                }
            }
            px_prev = px;
        }
        if run > 0 {
            stream.write_u8_err(QOI_OP_RUN | (run - 1))?;
        }
        stream.write_all(&QOI_END_MARKER)?;
        stream.flush()?;

        Ok(stream.bytes_written())
    }
}

#[cfg(test)]
mod tests {
    use night_core::options::EncoderOptions;

    use crate::QoiEncoder;

    #[test]
    fn white_two_by_two() {
        let pixels = [255_u8; 16];
        let mut out = vec![];
        let written = QoiEncoder::new(&pixels, EncoderOptions::new(2, 2))
            .encode(&mut out)
            .unwrap();

        let mut expected = b"qoif".to_vec();
        expected.extend_from_slice(&[0, 0, 0, 2, 0, 0, 0, 2, 4, 0]);
        // white is a (-1, -1, -1) diff from the start pixel, then a run of three
        expected.extend_from_slice(&[0x55, 0xc0 | 2]);
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);

        assert_eq!(out, expected);
        assert_eq!(written, out.len());
    }

    #[test]
    fn long_runs_are_split() {
        let pixels = [0, 0, 0, 255].repeat(100);
        let mut out = vec![];
        QoiEncoder::new(&pixels, EncoderOptions::new(100, 1))
            .encode(&mut out)
            .unwrap();

        // 100 start-pixel repeats: 62 + 38
        assert_eq!(&out[14..16], &[0xc0 | 61, 0xc0 | 37]);
        assert_eq!(out.len(), 14 + 2 + 8);
    }

    #[test]
    fn mismatched_length_fails() {
        let mut out = vec![];
        assert!(QoiEncoder::new(&[0; 15], EncoderOptions::new(2, 2))
            .encode(&mut out)
            .is_err());
    }
}
