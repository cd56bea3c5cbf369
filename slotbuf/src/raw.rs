#![doc = crate::doc_macro::make_svgbobdoc!(
//! The typed buffer underneath every sequence.
//!
//! A [`RawBuf<T>`] owns one heap block of `capacity` slots, of which the first `length` hold live
//! elements:
//!
//! ```svgbob
//! "RawBuf<T>"
//! +-------+------------+----------+
//! | "ptr" | "capacity" | "length" |
//! +-------+------------+----------+
//!     |
//!     v
//!     +--------+--------+--------+-----------+-----------+
//!     | "live" | "live" | "live" | "(spare)" | "(spare)" |
//!     +--------+--------+--------+-----------+-----------+
//!     |<------ "length" ------->|
//!     |<----------------- "capacity" ------------------>|
//! ```
//!
//! Capacity only changes through [`RawBuf::reallocate`] and the calls built on it. Growth is
//! exact: the buffer never asks for more than the operation in hand needs. Callers that want
//! amortized growth [`reserve`](RawBuf::reserve) ahead of time. `Extend` on the sequences
//! follows the same rule: it reserves what the iterator's lower size hint promises, plus one
//! slot for the value in hand.
//!
//! # Examples
//!
//! ```
//! use slotbuf::prelude::*;
//!
//! let mut buf: RawBuf<u32> = RawBuf::new();
//! assert!(buf.is_empty());
//! buf.reserve(4).unwrap();
//! assert_eq!(buf.capacity(), 4);
//! buf.push_back(&7).unwrap();
//! buf.push_back_n(&9, 2).unwrap();
//! assert_eq!(buf.as_slice(), &[7, 9, 9]);
//! buf.compact().unwrap();
//! assert_eq!(buf.capacity(), 3);
//! ```
)]

use crate::cursor::{Cursor, Reverse};
use crate::error::BufferError;
use crate::init::SlotInit;
use crate::relocate;
use crate::Element;
use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem::{self, MaybeUninit};
use core::ptr::{self, NonNull};
use core::{cmp, fmt};

/// Panics with the message of an allocation error. Used by the trait entry points (`Clone`,
/// `Extend`, `FromIterator`, ...) that have no way to report one.
#[inline(never)]
#[cold]
pub(crate) fn allocation_failure(err: BufferError) -> ! {
    panic!("{err}")
}

/// Unwraps the result of an allocating call from a context that cannot report errors.
#[inline]
pub(crate) fn must<T>(result: Result<T, BufferError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => allocation_failure(err),
    }
}

/// Allocates room for `slots` values of `T`. Zero-sized requests get a dangling pointer.
unsafe fn allocate<T>(slots: usize) -> Result<NonNull<T>, BufferError> {
    if slots == 0 || mem::size_of::<T>() == 0 {
        return Ok(NonNull::dangling());
    }
    let layout = Layout::array::<T>(slots).map_err(|_| BufferError::OutOfMemory { slots })?;
    NonNull::new(alloc::alloc::alloc(layout).cast::<T>()).ok_or(BufferError::OutOfMemory { slots })
}

/// An allocation that is released when dropped. Element lifetimes are not its concern.
struct Block<T> {
    ptr: NonNull<T>,
    slots: usize,
}

impl<T> Drop for Block<T> {
    fn drop(&mut self) {
        if self.slots == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        unsafe {
            // Safety: this exact layout was validated by `Layout::array` when allocating.
            let layout = Layout::from_size_align_unchecked(
                mem::size_of::<T>() * self.slots,
                mem::align_of::<T>(),
            );
            alloc::alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
        }
    }
}

/// A contiguous, growable buffer of [`Element`]s with an explicit capacity.
///
/// Invariants:
/// * `len <= capacity`;
/// * slots `0..len` are live, slots `len..capacity` are uninitialized;
/// * `capacity == 0` exactly when no block is held.
pub struct RawBuf<T: Element> {
    ptr: NonNull<T>,
    capacity: usize,
    len: usize,
    _marker: PhantomData<T>,
}

// Safety: a RawBuf owns its elements exactly like a `Vec<T>` does.
unsafe impl<T: Element + Send> Send for RawBuf<T> {}
unsafe impl<T: Element + Sync> Sync for RawBuf<T> {}

impl<T: Element> RawBuf<T> {
    /// An empty buffer holding no storage.
    #[inline]
    pub const fn new() -> Self {
        RawBuf {
            ptr: NonNull::dangling(),
            capacity: 0,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// An empty buffer with exactly `slots` slots of storage.
    pub fn with_capacity(slots: usize) -> Result<Self, BufferError> {
        let mut buf = RawBuf::new();
        buf.reallocate(slots)?;
        Ok(buf)
    }

    /// A buffer holding clones of `values`, with capacity equal to their count.
    pub fn from_slice(values: &[T]) -> Result<Self, BufferError> {
        let mut buf = RawBuf::with_capacity(values.len())?;
        buf.extend_cloned(values);
        Ok(buf)
    }

    /// A buffer of `count` clones of `value`, with capacity `count`.
    pub fn filled(value: &T, count: usize) -> Result<Self, BufferError> {
        let mut buf = RawBuf::with_capacity(count)?;
        for _ in 0..count {
            // Capacity was sized for every clone.
            unsafe { buf.push_unchecked(value.clone()) };
        }
        Ok(buf)
    }

    /// Number of slots in the block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the buffer holds neither elements nor storage.
    ///
    /// A buffer that has been cleared but kept its capacity is *not* empty by this definition;
    /// compare [`len`](Self::len) against zero for that.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0 && self.len == 0
    }

    /// Number of uninitialized slots after the live elements.
    #[inline]
    pub fn spare(&self) -> usize {
        self.capacity - self.len
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// The live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: slots 0..len are live, and the pointer is non-null and aligned even when no
        // block is held.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// The live elements, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// The uninitialized slots after the live elements.
    #[inline]
    fn spare_slots(&mut self) -> &mut [MaybeUninit<T>] {
        unsafe {
            core::slice::from_raw_parts_mut(
                self.ptr.as_ptr().add(self.len).cast::<MaybeUninit<T>>(),
                self.capacity - self.len,
            )
        }
    }

    /// The element at `index`, without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        &*self.ptr.as_ptr().add(index)
    }

    /// Mutable version of [`get_unchecked`](Self::get_unchecked).
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        &mut *self.ptr.as_ptr().add(index)
    }

    /// The element at `index`, or [`BufferError::IndexOutOfRange`].
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, BufferError> {
        let length = self.len;
        self.as_slice()
            .get(index)
            .ok_or(BufferError::IndexOutOfRange { index, length })
    }

    /// Mutable version of [`at`](Self::at).
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, BufferError> {
        let length = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(BufferError::IndexOutOfRange { index, length })
    }

    /// The first element, if any.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The last element, if any.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// # Safety
    ///
    /// The buffer must hold at least one element.
    #[inline]
    pub unsafe fn front_unchecked(&self) -> &T {
        self.get_unchecked(0)
    }

    /// # Safety
    ///
    /// The buffer must hold at least one element.
    #[inline]
    pub unsafe fn back_unchecked(&self) -> &T {
        self.get_unchecked(self.len - 1)
    }

    /// Cursor at the first slot.
    #[inline]
    pub fn begin(&self) -> Cursor {
        Cursor::at_offset(0)
    }

    /// Cursor one past the last live element.
    #[inline]
    pub fn end(&self) -> Cursor {
        Cursor::at_offset(self.len)
    }

    /// Reverse cursor at the last live element.
    #[inline]
    pub fn rbegin(&self) -> Cursor<Reverse> {
        Cursor::from_position(self.len as isize - 1)
    }

    /// Reverse cursor one before the first element.
    #[inline]
    pub fn rend(&self) -> Cursor<Reverse> {
        Cursor::from_position(-1)
    }

    /// The live elements from `first` up to, not including, `last`.
    pub fn slice(&self, first: Cursor, last: Cursor) -> Result<&[T], BufferError> {
        let start = first.resolve_bound(self.len, "slice")?;
        let stop = last.resolve_bound(self.len, "slice")?;
        if start > stop {
            return Err(BufferError::invalid("slice", "`first` is past `last`"));
        }
        Ok(&self.as_slice()[start..stop])
    }

    /// Moves the contents into a fresh block of exactly `new_capacity` slots.
    ///
    /// The first `min(len, new_capacity)` elements are relocated, in order, with the element
    /// type's [`Relocation`](crate::Relocation) strategy; any elements past the new capacity are
    /// dropped. Requesting the current capacity does nothing. On error the buffer is unchanged.
    pub fn reallocate(&mut self, new_capacity: usize) -> Result<(), BufferError> {
        if new_capacity == self.capacity {
            return Ok(());
        }
        let fresh = Block {
            ptr: unsafe { allocate::<T>(new_capacity)? },
            slots: new_capacity,
        };
        let keep = cmp::min(self.len, new_capacity);
        unsafe {
            relocate::relocate_nonoverlapping(self.ptr.as_ptr(), fresh.ptr.as_ptr(), keep);
        }
        let old = Block {
            ptr: mem::replace(&mut self.ptr, fresh.ptr),
            slots: self.capacity,
        };
        mem::forget(fresh);
        let old_len = mem::replace(&mut self.len, keep);
        self.capacity = new_capacity;
        // Elements that did not fit are destroyed where they are; `old` then frees the block.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                old.ptr.as_ptr().add(keep),
                old_len - keep,
            ));
        }
        Ok(())
    }

    /// Grows capacity by exactly `extra` slots.
    pub fn reserve(&mut self, extra: usize) -> Result<(), BufferError> {
        match self.capacity.checked_add(extra) {
            Some(target) => self.reallocate(target),
            None => Err(BufferError::OutOfMemory { slots: usize::MAX }),
        }
    }

    /// Sets capacity to exactly `capacity` slots, dropping trailing elements that no longer fit.
    pub fn resize(&mut self, capacity: usize) -> Result<(), BufferError> {
        self.reallocate(capacity)
    }

    /// Shrinks capacity to the live length.
    pub fn compact(&mut self) -> Result<(), BufferError> {
        self.reallocate(self.len)
    }

    /// Takes the contents, leaving an empty buffer with no storage behind.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, RawBuf::new())
    }

    /// Constructs `count` new elements at the end with `init`.
    ///
    /// Grows by exactly `count` slots when the spare capacity is short. Returns a cursor to the
    /// first new element.
    pub fn append_with(
        &mut self,
        count: usize,
        init: impl SlotInit<T>,
    ) -> Result<Cursor, BufferError> {
        if self.spare() < count {
            self.reserve(count)?;
        }
        let first = self.end();
        let spare = self.spare_slots();
        init.initialize(&mut spare[..count]);
        self.len += count;
        Ok(first)
    }

    /// # Safety
    ///
    /// `len <= capacity`, and exactly the slots `0..len` must be live afterwards.
    #[inline]
    pub(crate) unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity);
        self.len = len;
    }

    /// Appends an owned value into spare capacity.
    ///
    /// # Safety
    ///
    /// There must be at least one spare slot.
    #[inline]
    pub(crate) unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.capacity);
        self.ptr.as_ptr().add(self.len).write(value);
        self.len += 1;
    }

    /// Appends clones of `values` into spare capacity, one at a time, so a panicking clone leaves
    /// every earlier clone owned by the buffer.
    pub(crate) fn extend_cloned(&mut self, values: &[T]) {
        assert!(self.spare() >= values.len());
        for value in values {
            unsafe { self.push_unchecked(value.clone()) };
        }
    }
}

impl<T: Element> Drop for RawBuf<T> {
    fn drop(&mut self) {
        let _block = Block {
            ptr: self.ptr,
            slots: self.capacity,
        };
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T: Element> Default for RawBuf<T> {
    #[inline]
    fn default() -> Self {
        RawBuf::new()
    }
}

/// Deep copy. The clone's capacity equals the source's length.
///
/// # Panics
///
/// Panics if the allocation fails.
impl<T: Element> Clone for RawBuf<T> {
    fn clone(&self) -> Self {
        must(RawBuf::from_slice(self.as_slice()))
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        must(self.reallocate(source.len));
        self.extend_cloned(source.as_slice());
    }
}

impl<T: Element + fmt::Debug> fmt::Debug for RawBuf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuf")
            .field("capacity", &self.capacity)
            .field("elements", &self.as_slice())
            .finish()
    }
}
