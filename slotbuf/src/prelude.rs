//! Single module with almost all `slotbuf` exports
//!
//! # Examples
//!
//! Import all into current scope:
//!
//! ```
//! use slotbuf::prelude::*;
//! ```
//!
//! Import all, named:
//!
//! ```
//! use slotbuf::prelude as s;
//! let a: s::Array<u8> = s::Array::new();
//! ```

pub use crate::array;
pub use crate::array::Array;
pub use crate::cursor::{Cursor, Direction, Forward, RevCursor, Reverse};
pub use crate::error::BufferError;
pub use crate::init::{CopyFrom, FillSequentially, FillWithDefault, MoveFrom, SlotInit};
pub use crate::raw::RawBuf;
pub use crate::relocate::Relocation;
pub use crate::str::{CharLike, EncodeStr, Str, Utf16Str, Utf32Str, WideStr};
pub use crate::Element;
