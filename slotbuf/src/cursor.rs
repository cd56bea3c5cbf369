#![doc = crate::doc_macro::make_svgbobdoc!(
//! Index-based positions into a buffer, in either traversal direction.
//!
//! A [`Cursor`] is just a signed slot offset tagged with a [`Direction`]. It holds no reference
//! to the buffer, so it can be kept across mutations; it simply names a position, and every
//! operation that takes one checks it against the live range at the time of the call.
//!
//! ```svgbob
//!  "rend"  "begin"                  "rbegin" "end"
//!    |       |                         |      |
//!    v       v                         v      v
//!   -1       0        1        2       3      4
//!        +-------+--------+--------+-------+
//!        |  "a"  |  "b"   |  "c"   |  "d"  |
//!        +-------+--------+--------+-------+
//! ```
//!
//! Forward cursors run from `begin` (0) to `end` (length); reverse cursors run from `rbegin`
//! (length - 1) down to `rend` (-1). Advancing a reverse cursor decrements its position.
//!
//! # Examples
//!
//! ```
//! use slotbuf::prelude::*;
//!
//! let a = array![10, 20, 30];
//! let mut c = a.rbegin();
//! assert_eq!(c.get(&a), Some(&30));
//! c.advance();
//! assert_eq!(c.get(&a), Some(&20));
//! assert_eq!(a.rend() - a.rbegin(), 3);
//! assert_eq!(a.rend().get(&a), None);
//! ```
)]

use crate::error::BufferError;
use core::fmt::Debug;
use core::hash::Hash;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// Traversal direction of a [`Cursor`]: either [`Forward`] or [`Reverse`].
pub trait Direction: private::Sealed + Copy + Debug + Default + Eq + Ord + Hash {}

/// Forward traversal: advancing increments the position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Forward;

/// Reverse traversal: advancing decrements the position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reverse;

impl Direction for Forward {}
impl Direction for Reverse {}

impl private::Sealed for Forward {
    const STEP: isize = 1;
}

impl private::Sealed for Reverse {
    const STEP: isize = -1;
}

mod private {
    pub trait Sealed {
        /// Change in position for one `advance`.
        const STEP: isize;
    }
}

/// A position within a buffer.
///
/// Cursors compare, hash, and subtract by position. Equality between two cursors of the same
/// direction is equality of their positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor<D: Direction = Forward> {
    position: isize,
    direction: PhantomData<D>,
}

/// A cursor that traverses from the last element towards the first.
pub type RevCursor = Cursor<Reverse>;

impl<D: Direction> Cursor<D> {
    /// A cursor at the given slot offset. Negative and past-the-end offsets are representable;
    /// they just never dereference.
    #[inline]
    pub const fn from_position(position: isize) -> Self {
        Cursor {
            position,
            direction: PhantomData,
        }
    }

    #[inline]
    pub(crate) const fn at_offset(offset: usize) -> Self {
        Self::from_position(offset as isize)
    }

    /// The slot offset this cursor names.
    #[inline]
    pub const fn position(self) -> isize {
        self.position
    }

    /// Moves one step in this cursor's direction.
    #[inline]
    pub fn advance(&mut self) -> &mut Self {
        self.position += <D as private::Sealed>::STEP;
        self
    }

    /// Moves one step against this cursor's direction.
    #[inline]
    pub fn retreat(&mut self) -> &mut Self {
        self.position -= <D as private::Sealed>::STEP;
        self
    }

    /// The element index this cursor refers to in a buffer of `len` live elements, or `None` if
    /// the cursor does not name a live element.
    #[inline]
    pub fn index_in(self, len: usize) -> Option<usize> {
        usize::try_from(self.position).ok().filter(|&i| i < len)
    }

    /// The element this cursor refers to, if it names one of `elements`.
    #[inline]
    pub fn get<T>(self, elements: &[T]) -> Option<&T> {
        elements.get(self.index_in(elements.len())?)
    }

    /// Mutable version of [`get`](Self::get).
    #[inline]
    pub fn get_mut<T>(self, elements: &mut [T]) -> Option<&mut T> {
        let index = self.index_in(elements.len())?;
        elements.get_mut(index)
    }
}

impl Cursor<Forward> {
    /// A reverse cursor at the same position.
    #[inline]
    pub const fn reverse(self) -> Cursor<Reverse> {
        Cursor::from_position(self.position)
    }

    /// Offset of this cursor as an insertion or range bound in a buffer of `len` live elements:
    /// anywhere in `0..=len`.
    pub(crate) fn resolve_bound(
        self,
        len: usize,
        operation: &'static str,
    ) -> Result<usize, BufferError> {
        usize::try_from(self.position)
            .ok()
            .filter(|&offset| offset <= len)
            .ok_or(BufferError::invalid(
                operation,
                "cursor is outside the buffer's live range",
            ))
    }
}

impl Cursor<Reverse> {
    /// A forward cursor at the same position.
    #[inline]
    pub const fn forward(self) -> Cursor<Forward> {
        Cursor::from_position(self.position)
    }
}

impl<D: Direction> Add<isize> for Cursor<D> {
    type Output = Self;

    #[inline]
    fn add(self, steps: isize) -> Self {
        Self::from_position(self.position + steps * <D as private::Sealed>::STEP)
    }
}

impl<D: Direction> Sub<isize> for Cursor<D> {
    type Output = Self;

    #[inline]
    fn sub(self, steps: isize) -> Self {
        Self::from_position(self.position - steps * <D as private::Sealed>::STEP)
    }
}

impl<D: Direction> AddAssign<isize> for Cursor<D> {
    #[inline]
    fn add_assign(&mut self, steps: isize) {
        *self = *self + steps;
    }
}

impl<D: Direction> SubAssign<isize> for Cursor<D> {
    #[inline]
    fn sub_assign(&mut self, steps: isize) {
        *self = *self - steps;
    }
}

/// Number of steps from `other` to `self` in this direction.
impl<D: Direction> Sub for Cursor<D> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Self) -> isize {
        (self.position - other.position) * <D as private::Sealed>::STEP
    }
}
