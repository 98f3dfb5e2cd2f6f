/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

/// Errors raised by the bytestream reader and writer
pub enum ByteIoError {
    /// Reader ran out of bytes, (requested, available)
    NotEnoughBytes(usize, usize),
    /// Writer ran out of space, (requested, available)
    NotEnoughBuffer(usize, usize),
    /// The sink refused the bytes handed to it
    SinkRejected,
    Generic(&'static str)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::NotEnoughBuffer(expected, found) => {
                writeln!(
                    f,
                    "Not enough buffer to write {expected} bytes, buffer size is {found}"
                )
            }
            ByteIoError::SinkRejected => {
                writeln!(f, "The output sink rejected the write")
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

/// An encapsulation of a byte stream reader
///
/// This provides an interface similar to [std::io::Cursor] but
/// with the exception of adding endian aware reads and every read
/// is bounds checked, a short buffer is reported as
/// [`ByteIoError::NotEnoughBytes`] and the position is left untouched.
pub struct ByteReader<'a> {
    stream:   &'a [u8],
    position: usize
}

enum Mode {
    BE,
    LE
}

impl<'a> ByteReader<'a> {
    /// Create a new instance of the byte stream
    pub const fn new(buf: &'a [u8]) -> ByteReader<'a> {
        ByteReader {
            stream:   buf,
            position: 0
        }
    }
    /// Skip `num` bytes ahead of the stream.
    ///
    /// Skipping past the end is an error and does not move the cursor
    pub fn skip(&mut self, num: usize) -> Result<(), ByteIoError> {
        if !self.has(num) {
            return Err(ByteIoError::NotEnoughBytes(num, self.remaining()));
        }
        self.position += num;
        Ok(())
    }
    /// Move the cursor to an absolute position
    ///
    /// Positions past the end are clamped to the end of the stream
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.stream.len());
    }
    /// Return whether the underlying buffer
    /// has `num` bytes available for reading
    ///
    /// ```
    /// use night_core::bytestream::ByteReader;
    /// let data = [0_u8; 120];
    /// let reader = ByteReader::new(&data);
    /// assert!(reader.has(80));
    /// assert!(!reader.has(121));
    /// ```
    #[inline]
    pub const fn has(&self, num: usize) -> bool {
        match self.position.checked_add(num) {
            Some(end) => end <= self.stream.len(),
            None => false
        }
    }
    /// Number of bytes left to read
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }
    /// Current position of the cursor
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }
    /// Length of the underlying buffer
    pub const fn len(&self) -> usize {
        self.stream.len()
    }
    pub const fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }
    /// Return true if there are no more bytes to read
    pub const fn eof(&self) -> bool {
        self.position >= self.stream.len()
    }
    /// Borrow the remaining bytes without advancing
    pub fn remaining_bytes(&self) -> &'a [u8] {
        self.stream.get(self.position..).unwrap_or(&[])
    }
    /// Look at `num_bytes` bytes starting `position` bytes after
    /// the cursor without advancing
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], ByteIoError> {
        let start = self
            .position
            .checked_add(position)
            .ok_or(ByteIoError::Generic("Overflow when peeking"))?;
        let end = start
            .checked_add(num_bytes)
            .ok_or(ByteIoError::Generic("Overflow when peeking"))?;

        self.stream
            .get(start..end)
            .ok_or(ByteIoError::NotEnoughBytes(num_bytes, self.remaining()))
    }
    /// Read `num_bytes` and advance the cursor past them
    pub fn get_slice(&mut self, num_bytes: usize) -> Result<&'a [u8], ByteIoError> {
        let slice = self.peek_at(0, num_bytes)?;
        self.position += num_bytes;
        Ok(slice)
    }
    /// Fill `buf` with bytes from the stream
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let slice = self.get_slice(buf.len())?;
        buf.copy_from_slice(slice);
        Ok(())
    }
    /// Read a single byte, or return an error if at the end of the stream
    #[inline]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::NotEnoughBytes(1, 0))
        }
    }
    /// Read a single byte returning 0 at the end of the stream
    #[inline]
    pub fn get_u8(&mut self) -> u8 {
        self.get_u8_err().unwrap_or(0)
    }
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$int_type:tt) => {
        impl<'a> ByteReader<'a> {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> Result<$int_type, ByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL) {
                    Some(position) => {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        match mode {
                            Mode::LE => Ok($int_type::from_le_bytes(space)),
                            Mode::BE => Ok($int_type::from_be_bytes(space))
                        }
                    }
                    None => Err(ByteIoError::NotEnoughBytes(
                        SIZE_OF_VAL,
                        self.remaining()
                    ))
                }
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name2(&mut self) -> Result<$int_type, ByteIoError> {
                self.$name(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, ByteIoError> {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(get_u16_inner_or_die, get_u16_be_err, get_u16_le_err, u16);
get_single_type!(get_i16_inner_or_die, get_i16_be_err, get_i16_le_err, i16);
get_single_type!(get_u32_inner_or_die, get_u32_be_err, get_u32_le_err, u32);
get_single_type!(get_i32_inner_or_die, get_i32_be_err, get_i32_le_err, i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endian_reads() {
        let data = [0x12, 0x34, 0x56, 0x78, 0xff];
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.get_u16_be_err().unwrap(), 0x1234);
        assert_eq!(reader.get_u16_le_err().unwrap(), 0x7856);
        assert_eq!(reader.get_u8_err().unwrap(), 0xff);
        assert!(reader.eof());
    }

    #[test]
    fn short_read_keeps_position() {
        let data = [1, 2, 3];
        let mut reader = ByteReader::new(&data);
        reader.skip(1).unwrap();

        assert!(reader.get_u32_be_err().is_err());
        assert_eq!(reader.position(), 1);
        assert!(reader.skip(3).is_err());
        assert_eq!(reader.get_u16_be_err().unwrap(), 0x0203);
    }

    #[test]
    fn peek_does_not_overflow() {
        let data = [0_u8; 4];
        let reader = ByteReader::new(&data);
        assert!(reader.peek_at(usize::MAX, 2).is_err());
        assert!(reader.peek_at(2, usize::MAX).is_err());
        assert_eq!(reader.peek_at(1, 3).unwrap().len(), 3);
    }
}
