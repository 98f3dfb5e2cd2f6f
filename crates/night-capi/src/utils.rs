/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::c_int;
use std::panic::{catch_unwind, AssertUnwindSafe};

use night_core::log::error;

/// Run `func`, turning a panic into `default`
pub(crate) fn guard<R>(default: R, func: impl FnOnce() -> R) -> R {
    match catch_unwind(AssertUnwindSafe(func)) {
        Ok(value) => value,
        Err(_) => {
            error!("Panic caught at the C boundary");
            default
        }
    }
}

/// Store `value` behind `ptr` unless it is null
///
/// # Safety
/// `ptr` must be null or valid for writes
pub(crate) unsafe fn write_out<T>(ptr: *mut T, value: T) {
    if !ptr.is_null() {
        unsafe { ptr.write(value) };
    }
}

/// A strictly positive C length as `usize`
pub(crate) fn positive(value: c_int) -> Option<usize> {
    usize::try_from(value).ok().filter(|x| *x > 0)
}
