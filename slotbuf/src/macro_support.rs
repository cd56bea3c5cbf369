//! Helpers called from code generated by the crate's macros. Not part of the public API.

use crate::error::BufferError;

/// Unwraps an allocation result, panicking with the error's message on failure.
#[inline]
pub fn must<T>(result: Result<T, BufferError>) -> T {
    crate::raw::must(result)
}
