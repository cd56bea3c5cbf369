//! Errors reported by buffer and sequence operations.

use core::fmt;

/// Errors that can occur while growing, mutating, or reading a buffer.
///
/// # Examples
///
/// ```
/// use slotbuf::prelude::*;
///
/// let a = Array::from_slice(&[1, 2, 3]).unwrap();
/// assert_eq!(
///     a.at(3),
///     Err(BufferError::IndexOutOfRange { index: 3, length: 3 }),
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// Checked access with an index at or past the live length.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of live elements at the time of the call.
        length: usize,
    },
    /// A structurally nonsensical call, rejected before anything was mutated.
    InvalidArgument {
        /// Name of the rejected operation.
        operation: &'static str,
        /// What was wrong with the arguments.
        reason: &'static str,
    },
    /// The allocator could not provide storage for the requested slot count,
    /// or the byte size of that many slots does not fit in `isize`.
    OutOfMemory {
        /// Number of slots that were requested.
        slots: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, length } => {
                write!(f, "index out of range: index {index}, length {length}")
            }
            Self::InvalidArgument { operation, reason } => {
                write!(f, "invalid argument to `{operation}`: {reason}")
            }
            Self::OutOfMemory { slots } => {
                write!(f, "out of memory: could not allocate {slots} slots")
            }
        }
    }
}

impl core::error::Error for BufferError {}

impl BufferError {
    #[inline]
    pub(crate) const fn invalid(operation: &'static str, reason: &'static str) -> Self {
        BufferError::InvalidArgument { operation, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn messages_name_the_numbers() {
        let e = BufferError::IndexOutOfRange {
            index: 7,
            length: 2,
        };
        assert_eq!(e.to_string(), "index out of range: index 7, length 2");
        let e = BufferError::invalid("erase", "empty range");
        assert_eq!(e.to_string(), "invalid argument to `erase`: empty range");
        let e = BufferError::OutOfMemory { slots: 12 };
        assert_eq!(e.to_string(), "out of memory: could not allocate 12 slots");
    }
}
