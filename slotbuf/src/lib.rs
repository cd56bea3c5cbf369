#![doc = crate::doc_macro::make_svgbobdoc!(
//! # `slotbuf`
//! Contiguous, growable buffers with explicit capacity control.
//!
//! 1. [Summary](#summary)
//! 1. [Memory layout](#memory-layout)
//! 1. [Examples](#examples)
//! 1. [Overview of types](#overview-of-types)
//! 1. [Elements and relocation](#elements-and-relocation)
//! 1. [Feature flags](#feature-flags)
//!
//! # Summary
//!
//! `slotbuf` provides a typed buffer, [`RawBuf<T>`], that owns one heap block of slots and
//! keeps track of how many of them hold live values. Two sequence types are built on top of it:
//! [`Array<T>`], a general-purpose dynamic array, and [`Str<C>`], a string over a choice of
//! character units.
//!
//! The buffer's growth policy is deliberately literal. Capacity only changes when you ask for it
//! or when an insertion has no room left, and then it grows by exactly the number of slots the
//! insertion needs. If you want amortized growth, [`reserve`](Array::reserve) ahead of time.
//!
//! Positions are [`Cursor`]s: plain signed offsets, not pointers. A cursor survives any
//! mutation of its buffer; operations check it against the live range when you use it.
//!
//! # Memory layout
//!
//! ```svgbob
//! "Array<u16>"
//! +-------+------------+----------+
//! | "ptr" | "capacity" | "length" |
//! +-------+------------+----------+
//!     |
//!     v
//!     +-----+-----+-----+-----------+-----------+
//!     | "1" | "2" | "3" | "(spare)" | "(spare)" |
//!     +-----+-----+-----+-----------+-----------+
//! ```
//!
//! # Examples
//!
//! ```
//! use slotbuf::prelude::*;
//!
//! let mut a = array![1, 2, 3];
//! assert_eq!(a.capacity(), 3);
//!
//! // Inserting a slice grows by exactly the slice's length.
//! a.insert_slice(a.begin(), &[7, 8]).unwrap();
//! assert_eq!(&a[..], &[7, 8, 1, 2, 3]);
//! assert_eq!(a.capacity(), 5);
//!
//! // Cursors are checked when used.
//! assert!(a.insert(a.end() + 1, &0).is_err());
//!
//! // Strings over UTF-8 units concatenate with `&str`.
//! let hello: Str = Str::copy_from_str("hello").unwrap();
//! let greeting = hello + ", world";
//! assert_eq!(greeting, "hello, world");
//! ```
//!
//! # Overview of types
//!
//! | Name               | Type                               | Notes                                                    |
//! |--------------------|------------------------------------|----------------------------------------------------------|
//! | Typed buffer       | [`RawBuf<T>`][crate::raw::RawBuf]  | Growth, mutation, checked and unchecked access           |
//! | Dynamic array      | [`Array<T>`][crate::array::Array]  | Derefs to `[T]`                                          |
//! | String             | [`Str<C>`][crate::str::Str]        | Units are `u8` (UTF-8), `u16` (UTF-16), `u32` or `char`  |
//! | Position           | [`Cursor<D>`][crate::cursor::Cursor] | Forward or reverse, index-based                        |
//! | In-place init      | [`SlotInit<T>`][crate::init::SlotInit] | Fills uninitialized slots                            |
//! | Errors             | [`BufferError`]                    | Index, argument and allocation failures                  |
//!
//! # Elements and relocation
//!
//! A buffer stores [`Element`]s: owned, clonable values. References and raw pointers are not
//! elements, so a buffer can never hold borrowed data. When the buffer moves elements (growing,
//! shrinking, shifting for an insert or erase) it uses the element type's
//! [`Relocation`] strategy: a raw byte copy for types without drop glue, a slot-by-slot move
//! otherwise, or clone-then-drop for types that ask for it.
//!
//! # Feature flags
//!
//! This crate has no *required* dependencies. The following feature flags exist, which can turn
//! on some dependencies.
//!
//! * `macro`. Enables [`#[derive(Element)]`][crate::Element] for user types, with an optional
//!   `#[element(relocate = "...")]` attribute. Adds a dependency on `slotbuf_macro`, `syn` and
//!   `quote`.
//! * `doc`. Renders the memory-layout diagrams in this documentation as SVG. Adds a dependency
//!   on `svgbobdoc`.
//!
)]
#![no_std]
extern crate alloc;

#[cfg(any(test, doc))]
extern crate std;

pub mod array;
pub mod cursor;
pub mod error;
pub mod init;
#[doc(hidden)]
pub mod macro_support;
pub mod prelude;
pub mod raw;
pub mod relocate;
pub mod str;

mod doc_macro;
mod mutate;
mod newtype;
#[cfg(test)]
mod testing;

pub use crate::str::Str;
pub use array::Array;
pub use cursor::Cursor;
pub use error::BufferError;
pub use raw::RawBuf;
pub use relocate::Relocation;
#[cfg(feature = "macro")]
pub use slotbuf_macro::Element;

/// A value that can live in a buffer slot.
///
/// Elements are owned, clonable values. The trait is implemented for the primitive types,
/// owning standard-library types whose contents are elements, tuples and arrays of elements,
/// and the crate's own sequences. It is *not* implemented for references or raw pointers, and
/// cannot be implemented for types that are not [`Clone`]:
///
/// ```compile_fail
/// use slotbuf::Array;
/// struct NoClone;
/// impl slotbuf::Element for NoClone {}
/// ```
///
/// ```compile_fail
/// let _ = slotbuf::Array::from_slice(&[&1u8, &2u8]);
/// ```
///
/// # Relocation
///
/// [`RELOCATION`](Element::RELOCATION) picks how the buffer moves values of the type. The
/// default is [`Relocation::Bitwise`] for types without drop glue and [`Relocation::Move`]
/// otherwise; a type can ask for [`Relocation::Copy`] instead:
///
/// ```
/// use slotbuf::prelude::*;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// // Counts how many handles are alive, through clones and drops.
/// #[derive(Debug)]
/// struct Handle(Rc<Cell<usize>>);
///
/// impl Clone for Handle {
///     fn clone(&self) -> Self {
///         self.0.set(self.0.get() + 1);
///         Handle(self.0.clone())
///     }
/// }
///
/// impl Drop for Handle {
///     fn drop(&mut self) {
///         self.0.set(self.0.get() - 1);
///     }
/// }
///
/// impl Element for Handle {
///     const RELOCATION: Relocation = Relocation::Copy;
/// }
///
/// let live = Rc::new(Cell::new(1));
/// let h = Handle(live.clone());
/// let mut a = Array::filled(&h, 3).unwrap();
/// a.reserve(10).unwrap();
/// assert_eq!(live.get(), 4);
/// drop(a);
/// assert_eq!(live.get(), 1);
/// ```
///
/// With the `macro` feature, the trait can be derived:
///
/// ```
/// # #[cfg(feature = "macro")]
/// # mod using_macro {
/// use slotbuf::prelude::*;
///
/// #[derive(Clone, Element)]
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// #[derive(Clone, Element)]
/// #[element(relocate = "copy")]
/// struct Tracked(u32);
///
/// # pub fn example() {
/// assert_eq!(<Point as Element>::RELOCATION, Relocation::Bitwise);
/// assert_eq!(<Tracked as Element>::RELOCATION, Relocation::Copy);
/// let points = Array::filled(&Point { x: 0.0, y: 1.0 }, 2).unwrap();
/// assert_eq!(points[1].y, 1.0);
/// # }
/// # }
/// # fn main() {
/// #   #[cfg(feature = "macro")]
/// #   using_macro::example();
/// # }
/// ```
pub trait Element: Clone {
    /// How the buffer relocates values of this type.
    const RELOCATION: Relocation = Relocation::default_for::<Self>();
}

macro_rules! value_elements {
    ($($ty:ty),* $(,)?) => {
        $( impl Element for $ty {} )*
    };
}

value_elements!(
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64, bool, char, (),
    alloc::string::String,
);

impl<T: Element> Element for alloc::boxed::Box<T> {}
impl<T: Element> Element for alloc::vec::Vec<T> {}
impl<T: Element> Element for Option<T> {}
impl<T: Element, const N: usize> Element for [T; N] {}

macro_rules! tuple_elements {
    ($( ($($name:ident),+) ),* $(,)?) => {
        $( impl<$($name: Element),+> Element for ($($name,)+) {} )*
    };
}

tuple_elements!((A), (A, B), (A, B, C), (A, B, C, D));
