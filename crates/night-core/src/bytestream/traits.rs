/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The output trait implemented by encoder sinks

use alloc::vec::Vec;

use crate::bytestream::ByteIoError;

/// The writer trait implemented for the night encoders
///
/// Anything that implements this trait can be used as a sink
/// for writing encoded images. Bytes are handed over in stream order,
/// and an implementation either accepts the whole chunk or returns an
/// error, in which case the encoder stops.
pub trait ByteSink {
    /// Accept all bytes in `buf` or return an error
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;

    /// A hint to tell the implementation how big of a size we expect the image to be
    ///
    /// This is just a hint, akin to calling `Vec::reserve` and should be treated as such.
    fn reserve_capacity(&mut self, _size: usize) -> Result<(), ByteIoError> {
        Ok(())
    }
}

impl ByteSink for Vec<u8> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError> {
        self.reserve(size);
        Ok(())
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        (**self).write_bytes(buf)
    }

    fn reserve_capacity(&mut self, size: usize) -> Result<(), ByteIoError> {
        (**self).reserve_capacity(size)
    }
}

/// Writing into a fixed slice advances the slice past the written bytes
impl ByteSink for &mut [u8] {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        if buf.len() > self.len() {
            return Err(ByteIoError::NotEnoughBuffer(buf.len(), self.len()));
        }
        let (start, rest) = core::mem::take(self).split_at_mut(buf.len());
        start.copy_from_slice(buf);
        *self = rest;
        Ok(())
    }
}

/// Adapts a closure returning `true` on success into a sink
///
/// ```
/// use night_core::bytestream::{ByteSink, FnSink};
/// let mut total = 0;
/// let mut sink = FnSink::new(|bytes: &[u8]| {
///     total += bytes.len();
///     true
/// });
/// sink.write_bytes(&[1, 2, 3]).unwrap();
/// drop(sink);
/// assert_eq!(total, 3);
/// ```
pub struct FnSink<F: FnMut(&[u8]) -> bool> {
    func: F
}

impl<F: FnMut(&[u8]) -> bool> FnSink<F> {
    pub fn new(func: F) -> FnSink<F> {
        FnSink { func }
    }
}

impl<F: FnMut(&[u8]) -> bool> ByteSink for FnSink<F> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        if (self.func)(buf) {
            Ok(())
        } else {
            Err(ByteIoError::SinkRejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_sink_advances() {
        let mut storage = [0_u8; 5];
        let mut sink: &mut [u8] = &mut storage;
        sink.write_bytes(&[1, 2]).unwrap();
        sink.write_bytes(&[3, 4, 5]).unwrap();
        assert!(sink.write_bytes(&[6]).is_err());
        assert_eq!(storage, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn rejecting_closure() {
        let mut sink = FnSink::new(|_: &[u8]| false);
        assert!(matches!(
            sink.write_bytes(&[0]),
            Err(ByteIoError::SinkRejected)
        ));
    }
}
