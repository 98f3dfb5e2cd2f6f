/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::{c_int, c_uchar, c_void};
use std::ptr;

use night_core::bytestream::{ByteIoError, ByteSink};
use night_core::log::{error, trace};
use night_core::pixels::checked_len;

use crate::enums::NightImageWriteFormat;
use crate::utils::{guard, positive, write_out};
use crate::{NightBool, NIGHT_FALSE, NIGHT_TRUE};

/// Write callback, receives the user context, a chunk of encoded bytes and its length
pub type NightWriteFn = Option<unsafe extern "C" fn(context: *mut c_void, data: *mut c_void, size: c_int)>;

/// Forwards encoder output to a C callback.
///
/// The callback cannot report failure so every call is treated as
/// accepted.
struct CallbackSink {
    callback: unsafe extern "C" fn(*mut c_void, *mut c_void, c_int),
    context:  *mut c_void
}

impl ByteSink for CallbackSink {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        for chunk in buf.chunks(c_int::MAX as usize) {
            // safety: the caller of NightImageWrite vouches for the callback
            unsafe {
                (self.callback)(self.context, chunk.as_ptr() as *mut c_void, chunk.len() as c_int);
            }
        }
        Ok(())
    }
}

/// Decode an image held in memory into RGBA8 pixels
///
/// @param memory: Encoded image bytes (PNG, QOI or BMP)
///
/// @param length: Number of bytes in `memory`
///
/// @param w: Receives the image width, can be null
///
/// @param h: Receives the image height, can be null
///
/// \returns A `malloc`ed buffer of exactly `w * h * 4` bytes, or null if
/// the image cannot be decoded. Release it with `NightImageFree`.
#[no_mangle]
pub unsafe extern "C" fn NightImageLoad(
    memory: *const c_uchar, length: c_int, w: *mut c_int, h: *mut c_int
) -> *mut c_uchar {
    guard(ptr::null_mut(), || {
        let Some(length) = positive(length) else {
            return ptr::null_mut();
        };
        if memory.is_null() {
            return ptr::null_mut();
        }
        // safety: the caller guarantees `length` readable bytes at `memory`
        let bytes = unsafe { std::slice::from_raw_parts(memory, length) };

        let pixels = match night_image::load(bytes) {
            Ok(pixels) => pixels,
            Err(e) => {
                error!("Could not load image: {:?}", e);
                return ptr::null_mut();
            }
        };
        let (Ok(width), Ok(height)) = (
            c_int::try_from(pixels.width()),
            c_int::try_from(pixels.height())
        ) else {
            return ptr::null_mut();
        };
        let data = pixels.as_bytes();

        // safety: plain allocation, checked for null below
        let output = unsafe { libc::malloc(data.len()) }.cast::<c_uchar>();

        if output.is_null() {
            error!("Malloc failed to allocate buffer with size of {}", data.len());
            return ptr::null_mut();
        }
        // safety: output was just allocated with data.len() bytes
        unsafe {
            ptr::copy_nonoverlapping(data.as_ptr(), output, data.len());
            write_out(w, width);
            write_out(h, height);
        }
        output
    })
}

/// Release pixels returned by `NightImageLoad`, null is ignored
#[no_mangle]
pub unsafe extern "C" fn NightImageFree(data: *mut c_uchar) {
    if !data.is_null() {
        // safety: data came from NightImageLoad, which allocates with malloc
        unsafe { libc::free(data.cast()) };
    }
}

/// Encode RGBA8 pixels and stream them through `func`
///
/// @param func: Pointer to the write callback, called once or more with
/// consecutive chunks of the encoded file
///
/// @param context: Passed untouched to every callback call
///
/// @param format: `NIGHT_IMAGE_WRITE_FORMAT_PNG` or `NIGHT_IMAGE_WRITE_FORMAT_QOI`
///
/// @param w, h: Image dimensions, both must be positive
///
/// @param data: `w * h * 4` bytes of RGBA pixels
///
/// \returns 1 when the whole file was handed to the callback, 0 otherwise
#[no_mangle]
pub unsafe extern "C" fn NightImageWrite(
    func: *const NightWriteFn, context: *mut c_void, format: c_int, w: c_int, h: c_int,
    data: *const c_void
) -> NightBool {
    guard(NIGHT_FALSE, || {
        if func.is_null() || data.is_null() {
            return NIGHT_FALSE;
        }
        // safety: non null, the caller guarantees it points to a callback slot
        let Some(callback) = (unsafe { *func }) else {
            return NIGHT_FALSE;
        };
        let Some(format) = NightImageWriteFormat::from_int(format) else {
            error!("Unknown image write format {}", format);
            return NIGHT_FALSE;
        };
        let (Some(width), Some(height)) = (positive(w), positive(h)) else {
            return NIGHT_FALSE;
        };
        let Ok(length) = checked_len(width, height) else {
            return NIGHT_FALSE;
        };
        // safety: the caller guarantees w * h * 4 readable bytes
        let pixels = unsafe { std::slice::from_raw_parts(data.cast::<u8>(), length) };

        let sink = CallbackSink { callback, context };

        match night_image::write_raw(sink, format.to_encode_format(), width, height, pixels) {
            Ok(written) => {
                trace!("Wrote {} bytes", written);
                NIGHT_TRUE
            }
            Err(e) => {
                error!("Could not write image: {:?}", e);
                NIGHT_FALSE
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn collect(context: *mut c_void, data: *mut c_void, size: c_int) {
        let out = unsafe { &mut *context.cast::<Vec<u8>>() };
        let bytes = unsafe { std::slice::from_raw_parts(data.cast::<u8>(), size as usize) };
        out.extend_from_slice(bytes);
    }

    #[test]
    fn write_then_load() {
        let pixels: Vec<u8> = (0..3 * 2 * 4).map(|x| (x * 7) as u8).collect();

        for format in [0, 1] {
            let mut encoded: Vec<u8> = Vec::new();
            let func: NightWriteFn = Some(collect);

            let ok = unsafe {
                NightImageWrite(
                    &func,
                    (&mut encoded as *mut Vec<u8>).cast(),
                    format,
                    3,
                    2,
                    pixels.as_ptr().cast()
                )
            };
            assert_eq!(ok, NIGHT_TRUE);

            let (mut w, mut h) = (0, 0);
            let decoded = unsafe { NightImageLoad(encoded.as_ptr(), encoded.len() as c_int, &mut w, &mut h) };
            assert!(!decoded.is_null());
            assert_eq!((w, h), (3, 2));

            let slice = unsafe { std::slice::from_raw_parts(decoded, pixels.len()) };
            assert_eq!(slice, &pixels[..]);
            unsafe { NightImageFree(decoded) };
        }
    }

    #[test]
    fn bad_arguments_fail() {
        let pixels = [0_u8; 16];
        let func: NightWriteFn = Some(collect);
        let none: NightWriteFn = None;
        let mut sink: Vec<u8> = Vec::new();
        let context = (&mut sink as *mut Vec<u8>).cast();

        unsafe {
            assert_eq!(NightImageWrite(ptr::null(), context, 0, 2, 2, pixels.as_ptr().cast()), NIGHT_FALSE);
            assert_eq!(NightImageWrite(&none, context, 0, 2, 2, pixels.as_ptr().cast()), NIGHT_FALSE);
            assert_eq!(NightImageWrite(&func, context, 7, 2, 2, pixels.as_ptr().cast()), NIGHT_FALSE);
            assert_eq!(NightImageWrite(&func, context, 0, 0, 2, pixels.as_ptr().cast()), NIGHT_FALSE);
            assert_eq!(NightImageWrite(&func, context, 0, -2, 2, pixels.as_ptr().cast()), NIGHT_FALSE);
            assert_eq!(NightImageWrite(&func, context, 1, 2, 2, ptr::null()), NIGHT_FALSE);

            assert!(NightImageLoad(ptr::null(), 10, ptr::null_mut(), ptr::null_mut()).is_null());
            assert!(NightImageLoad(pixels.as_ptr(), -1, ptr::null_mut(), ptr::null_mut()).is_null());
            assert!(NightImageLoad(pixels.as_ptr(), 16, ptr::null_mut(), ptr::null_mut()).is_null());
            NightImageFree(ptr::null_mut());
        }
        assert!(sink.is_empty());
    }
}
