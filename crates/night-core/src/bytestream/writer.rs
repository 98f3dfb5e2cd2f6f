/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;
use core::mem::size_of;

use crate::bytestream::{ByteIoError, ByteSink};

/// Bytes gathered before the sink is invoked.
const BUFFER_SIZE: usize = 8192;

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

/// Encapsulates a simple byte writer with
/// support for endian aware writes
///
/// Small writes are gathered into an internal buffer and
/// forwarded to the sink in order, call [`flush`](Self::flush)
/// once done to push the tail of the stream.
pub struct ByteWriter<T: ByteSink> {
    sink:          T,
    buffer:        Vec<u8>,
    bytes_written: usize
}

impl<T: ByteSink> ByteWriter<T> {
    /// Create a new writer for the sink
    pub fn new(sink: T) -> ByteWriter<T> {
        ByteWriter {
            sink,
            buffer: Vec::with_capacity(BUFFER_SIZE),
            bytes_written: 0
        }
    }
    /// Return the number of bytes the writer has accepted
    ///
    /// This includes bytes still waiting in the internal buffer
    ///
    /// ```
    /// use night_core::bytestream::ByteWriter;
    /// let mut out = vec![];
    /// let mut writer = ByteWriter::new(&mut out);
    /// writer.write_u32_be_err(10).unwrap();
    /// assert_eq!(writer.bytes_written(), 4);
    /// ```
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }
    /// Pass a size hint to the underlying sink
    pub fn reserve(&mut self, size: usize) -> Result<(), ByteIoError> {
        self.sink.reserve_capacity(size)
    }
    /// Write all bytes, forwarding to the sink when the buffer fills up
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        if self.buffer.len() + buf.len() > BUFFER_SIZE {
            self.flush()?;
        }
        if buf.len() >= BUFFER_SIZE {
            self.sink.write_bytes(buf)?;
        } else {
            self.buffer.extend_from_slice(buf);
        }
        self.bytes_written += buf.len();
        Ok(())
    }
    /// Write a single byte
    #[inline]
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), ByteIoError> {
        if self.buffer.len() == BUFFER_SIZE {
            self.flush()?;
        }
        self.buffer.push(byte);
        self.bytes_written += 1;
        Ok(())
    }
    /// Hand every buffered byte to the sink
    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        if !self.buffer.is_empty() {
            self.sink.write_bytes(&self.buffer)?;
            self.buffer.clear();
        }
        Ok(())
    }
    /// Flush and return the sink
    pub fn into_inner(mut self) -> Result<T, ByteIoError> {
        self.flush()?;
        Ok(self.sink)
    }
}

macro_rules! write_single_type {
    ($name:tt,$name2:tt,$name3:tt,$int_type:tt) => {
        impl<T: ByteSink> ByteWriter<T> {
            #[inline(always)]
            fn $name(&mut self, byte: $int_type, mode: Mode) -> Result<(), ByteIoError> {
                const SIZE: usize = size_of::<$int_type>();

                let bytes: [u8; SIZE] = match mode {
                    Mode::BE => byte.to_be_bytes(),
                    Mode::LE => byte.to_le_bytes()
                };
                self.write_all(&bytes)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the sink rejects the ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name2(&mut self, byte: $int_type) -> Result<(), ByteIoError> {
                self.$name(byte, Mode::BE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the sink rejects the ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name3(&mut self, byte: $int_type) -> Result<(), ByteIoError> {
                self.$name(byte, Mode::LE)
            }
        }
    };
}

write_single_type!(write_u64_inner_or_die, write_u64_be_err, write_u64_le_err, u64);
write_single_type!(write_u32_inner_or_die, write_u32_be_err, write_u32_le_err, u32);
write_single_type!(write_u16_inner_or_die, write_u16_be_err, write_u16_le_err, u16);

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::bytestream::FnSink;

    #[test]
    fn writes_reach_sink_in_order() {
        let mut out = vec![];
        let mut writer = ByteWriter::new(&mut out);
        writer.write_u16_be_err(0x0102).unwrap();
        writer.write_u16_le_err(0x0304).unwrap();
        writer.write_all(&[9; 3]).unwrap();
        writer.flush().unwrap();
        assert_eq!(out, [1, 2, 4, 3, 9, 9, 9]);
    }

    #[test]
    fn large_writes_are_chunked() {
        let mut calls = 0;
        let mut total = 0;
        {
            let sink = FnSink::new(|b: &[u8]| {
                calls += 1;
                total += b.len();
                true
            });
            let mut writer = ByteWriter::new(sink);
            for _ in 0..3 {
                writer.write_all(&[0; 5000]).unwrap();
            }
            writer.flush().unwrap();
            assert_eq!(writer.bytes_written(), 15000);
        }
        assert_eq!(total, 15000);
        assert!(calls >= 2);
    }
}
