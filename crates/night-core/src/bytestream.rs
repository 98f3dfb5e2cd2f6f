/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The reader borrows an in-memory buffer and never reads past it,
//! the writer forwards bytes to anything implementing [`ByteSink`].
pub use reader::{ByteIoError, ByteReader};
pub use traits::{ByteSink, FnSink};
pub use writer::ByteWriter;

mod reader;
mod traits;
mod writer;
