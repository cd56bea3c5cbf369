//! Insertion and erasure on a [`RawBuf`].
//!
//! Every mutation follows the same sequence: validate the arguments, make every clone the
//! operation needs, grow if the spare capacity is short, and only then shift elements around.
//! A call that fails with an error has not touched the buffer.
//!
//! While a suffix is being shifted the buffer's length is pulled back to the shift point. If a
//! `Clone` panics in the middle of a [`Relocation::Copy`](crate::Relocation::Copy) shift, the
//! suffix is leaked, never dropped twice.

use crate::cursor::Cursor;
use crate::error::BufferError;
use crate::raw::RawBuf;
use crate::relocate;
use crate::Element;
use core::ptr;

impl<T: Element> RawBuf<T> {
    /// Inserts a clone of `value` before `position`. Returns a cursor to the new element.
    ///
    /// Grows by exactly one slot when the buffer is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuf::prelude::*;
    ///
    /// let mut buf = RawBuf::from_slice(&['a', 'c']).unwrap();
    /// let at = buf.insert(buf.begin() + 1, &'b').unwrap();
    /// assert_eq!(at.position(), 1);
    /// assert_eq!(buf.as_slice(), &['a', 'b', 'c']);
    /// assert_eq!(buf.capacity(), 3);
    /// ```
    pub fn insert(&mut self, position: Cursor, value: &T) -> Result<Cursor, BufferError> {
        let offset = position.resolve_bound(self.len(), "insert")?;
        let item = value.clone();
        if self.spare() == 0 {
            self.reserve(1)?;
        }
        unsafe { self.place(offset, item) };
        Ok(Cursor::at_offset(offset))
    }

    /// Inserts clones of every element of `values` before `position`, keeping their order.
    /// Returns a cursor to the first inserted element.
    ///
    /// Grows by exactly `values.len()` slots when the spare capacity is short. Inserting an
    /// empty slice changes nothing.
    ///
    /// The clones are made in a separate staging block of `values.len()` slots before the
    /// buffer is touched. That block is allocated even when no growth is needed, so this can
    /// fail with [`BufferError::OutOfMemory`] on a buffer with enough spare capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuf::prelude::*;
    ///
    /// let mut buf = RawBuf::from_slice(&[1, 2, 3]).unwrap();
    /// buf.insert_slice(buf.begin(), &[7, 8]).unwrap();
    /// assert_eq!(buf.as_slice(), &[7, 8, 1, 2, 3]);
    /// ```
    pub fn insert_slice(&mut self, position: Cursor, values: &[T]) -> Result<Cursor, BufferError> {
        let offset = position.resolve_bound(self.len(), "insert")?;
        if values.is_empty() {
            return Ok(Cursor::at_offset(offset));
        }
        let staged = RawBuf::from_slice(values)?;
        if self.spare() < values.len() {
            self.reserve(values.len())?;
        }
        unsafe { self.place_all(offset, staged) };
        Ok(Cursor::at_offset(offset))
    }

    /// Inserts clones of the buffer's own elements from `first` up to, not including, `last`
    /// before `position`. Returns a cursor to the first inserted element.
    ///
    /// All three cursors are resolved against the buffer as it is before the call. A reversed
    /// range or a cursor outside `0..=len` fails with [`BufferError::InvalidArgument`]. An empty
    /// range changes nothing. Growth and the staging block behave as for
    /// [`insert_slice`](RawBuf::insert_slice).
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuf::prelude::*;
    ///
    /// let mut buf = RawBuf::from_slice(&['a', 'b', 'c']).unwrap();
    /// let b = buf.begin();
    /// buf.insert_range(b, b + 1, b + 3).unwrap();
    /// assert_eq!(buf.as_slice(), &['b', 'c', 'a', 'b', 'c']);
    /// ```
    pub fn insert_range(
        &mut self,
        position: Cursor,
        first: Cursor,
        last: Cursor,
    ) -> Result<Cursor, BufferError> {
        let len = self.len();
        let offset = position.resolve_bound(len, "insert")?;
        let start = first.resolve_bound(len, "insert")?;
        let stop = last.resolve_bound(len, "insert")?;
        if start > stop {
            return Err(BufferError::invalid("insert", "`first` is past `last`"));
        }
        if start == stop {
            return Ok(Cursor::at_offset(offset));
        }
        let staged = RawBuf::from_slice(&self.as_slice()[start..stop])?;
        if self.spare() < staged.len() {
            self.reserve(staged.len())?;
        }
        unsafe { self.place_all(offset, staged) };
        Ok(Cursor::at_offset(offset))
    }

    /// Appends a clone of `value`. Returns a cursor to it.
    #[inline]
    pub fn push_back(&mut self, value: &T) -> Result<Cursor, BufferError> {
        self.push_back_n(value, 1)
    }

    /// Appends `repetitions` clones of `value`. Returns a cursor to the first of them.
    ///
    /// Fails with [`BufferError::InvalidArgument`] when `repetitions` is zero. Grows by exactly
    /// `repetitions` slots when the spare capacity is short.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuf::prelude::*;
    ///
    /// let mut buf = RawBuf::new();
    /// buf.push_back_n(&'-', 3).unwrap();
    /// assert_eq!(buf.as_slice(), &['-', '-', '-']);
    /// assert!(buf.push_back_n(&'-', 0).is_err());
    /// ```
    pub fn push_back_n(&mut self, value: &T, repetitions: usize) -> Result<Cursor, BufferError> {
        if repetitions < 1 {
            return Err(BufferError::invalid(
                "push_back",
                "repetitions must be at least 1",
            ));
        }
        if self.spare() < repetitions {
            self.reserve(repetitions)?;
        }
        let first = self.end();
        for _ in 0..repetitions {
            self.insert(self.end(), value)?;
        }
        Ok(first)
    }

    /// Removes the elements from `first` up to, not including, `last`. Returns a cursor to the
    /// element that now sits at `first`.
    ///
    /// An empty range (`first == last`) is rejected with [`BufferError::InvalidArgument`], as is a
    /// reversed range or a cursor outside `0..=len`. Capacity never shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuf::prelude::*;
    ///
    /// let mut buf = RawBuf::from_slice(&[1, 2, 3, 4]).unwrap();
    /// buf.erase(buf.begin() + 1, buf.begin() + 3).unwrap();
    /// assert_eq!(buf.as_slice(), &[1, 4]);
    /// assert_eq!(buf.capacity(), 4);
    /// assert!(buf.erase(buf.begin(), buf.begin()).is_err());
    /// ```
    pub fn erase(&mut self, first: Cursor, last: Cursor) -> Result<Cursor, BufferError> {
        self.erase_range("erase", first, last)
    }

    /// Removes the last element.
    #[inline]
    pub fn pop_back(&mut self) -> Result<(), BufferError> {
        self.pop_back_n(1)
    }

    /// Removes the last `repetitions` elements: `erase(end - repetitions, end)`.
    pub fn pop_back_n(&mut self, repetitions: usize) -> Result<(), BufferError> {
        if repetitions < 1 {
            return Err(BufferError::invalid(
                "pop_back",
                "repetitions must be at least 1",
            ));
        }
        let end = self.end();
        let steps = isize::try_from(repetitions).unwrap_or(isize::MAX);
        self.erase_range("pop_back", end - steps, end)?;
        Ok(())
    }

    /// Drops every live element. Capacity is kept.
    pub fn clear(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len());
        unsafe {
            self.set_len(0);
            ptr::drop_in_place(live);
        }
    }

    /// Appends owned values. Whenever the buffer is full, grows by one slot plus the iterator's
    /// remaining lower size hint, so an iterator that reports its length is appended with one
    /// exact reservation.
    pub(crate) fn extend_owned<I: IntoIterator<Item = T>>(
        &mut self,
        values: I,
    ) -> Result<(), BufferError> {
        let mut values = values.into_iter();
        while let Some(value) = values.next() {
            if self.spare() == 0 {
                let (rest, _) = values.size_hint();
                self.reserve(rest.saturating_add(1))?;
            }
            unsafe { self.push_unchecked(value) };
        }
        Ok(())
    }

    fn erase_range(
        &mut self,
        operation: &'static str,
        first: Cursor,
        last: Cursor,
    ) -> Result<Cursor, BufferError> {
        let len = self.len();
        let start = first.resolve_bound(len, operation)?;
        let stop = last.resolve_bound(len, operation)?;
        if start == stop {
            return Err(BufferError::invalid(operation, "the range is empty"));
        }
        if start > stop {
            return Err(BufferError::invalid(operation, "`first` is past `last`"));
        }
        let removed = stop - start;
        let tail = len - stop;
        unsafe {
            let base = self.as_mut_ptr().add(start);
            self.set_len(start);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base, removed));
            relocate::shift_left(base, tail, removed);
            self.set_len(start + tail);
        }
        Ok(Cursor::at_offset(start))
    }

    /// Moves `item` into the slot at `offset`, shifting the suffix right by one.
    ///
    /// # Safety
    ///
    /// `offset <= len` and there is at least one spare slot.
    unsafe fn place(&mut self, offset: usize, item: T) {
        let len = self.len();
        debug_assert!(offset <= len && len < self.capacity());
        let base = self.as_mut_ptr().add(offset);
        self.set_len(offset);
        relocate::shift_right(base, len - offset, 1);
        base.write(item);
        self.set_len(len + 1);
    }

    /// Moves every element of `staged` into the buffer at `offset`, shifting the suffix right.
    ///
    /// # Safety
    ///
    /// `offset <= len` and there are at least `staged.len()` spare slots.
    unsafe fn place_all(&mut self, offset: usize, mut staged: RawBuf<T>) {
        let len = self.len();
        let count = staged.len();
        debug_assert!(offset <= len && self.spare() >= count);
        let base = self.as_mut_ptr().add(offset);
        self.set_len(offset);
        relocate::shift_right(base, len - offset, count);
        // The staged values are already fresh clones; they only need to change address.
        ptr::copy_nonoverlapping(staged.as_ptr(), base, count);
        staged.set_len(0);
        self.set_len(len + count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::FillSequentially;
    use crate::testing::{CopyCounted, Counted, Tally};
    use std::string::{String, ToString};
    use std::vec::Vec;

    fn values<P: AsRef<[CopyCounted]>>(items: P) -> Vec<i32> {
        items.as_ref().iter().map(|p| p.value).collect()
    }

    #[test]
    fn insert_grows_one_slot_at_a_time() {
        let mut buf = RawBuf::new();
        for c in ['a', 'b', 'c'] {
            buf.insert(buf.end(), &c).unwrap();
        }
        assert_eq!(buf.capacity(), 3);
        buf.insert(buf.begin(), &'z').unwrap();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.as_slice(), &['z', 'a', 'b', 'c']);
    }

    #[test]
    fn insert_uses_spare_capacity_first() {
        let mut buf = RawBuf::with_capacity(8).unwrap();
        buf.push_back(&1u8).unwrap();
        buf.insert(buf.begin(), &0).unwrap();
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.as_slice(), &[0, 1]);
    }

    #[test]
    fn insert_rejects_cursor_outside_live_range() {
        let mut buf = RawBuf::from_slice(&[1, 2]).unwrap();
        let err = buf.insert(buf.end() + 1, &3).unwrap_err();
        assert!(matches!(
            err,
            BufferError::InvalidArgument {
                operation: "insert",
                ..
            }
        ));
        assert_eq!(buf.as_slice(), &[1, 2]);
        assert_eq!(buf.capacity(), 2);
    }

    #[test]
    fn insert_of_own_element_clones_before_moving() {
        let mut buf = RawBuf::from_slice(&[String::from("x"), String::from("y")]).unwrap();
        let first = buf.as_slice()[0].clone();
        buf.insert(buf.end(), &first).unwrap();
        assert_eq!(buf.as_slice(), &["x", "y", "x"]);
    }

    #[test]
    fn insert_slice_reserves_exactly_the_shortfall_amount() {
        let mut buf = RawBuf::from_slice(&[1, 2, 3]).unwrap();
        buf.insert_slice(buf.begin() + 1, &[9, 9]).unwrap();
        assert_eq!(buf.capacity(), 5);
        assert_eq!(buf.as_slice(), &[1, 9, 9, 2, 3]);
        let at = buf.insert_slice(buf.end(), &[]).unwrap();
        assert_eq!(at, buf.end());
        assert_eq!(buf.capacity(), 5);
    }

    #[test]
    fn push_back_n_returns_first_new_position() {
        let mut buf = RawBuf::from_slice(&[0u32]).unwrap();
        let first = buf.push_back_n(&5, 3).unwrap();
        assert_eq!(first.position(), 1);
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.as_slice(), &[0, 5, 5, 5]);
    }

    #[test]
    fn erase_rejects_empty_and_reversed_ranges() {
        let mut buf = RawBuf::from_slice(&[1, 2, 3]).unwrap();
        let b = buf.begin();
        assert_eq!(
            buf.erase(b + 1, b + 1),
            Err(BufferError::invalid("erase", "the range is empty"))
        );
        assert_eq!(
            buf.erase(b + 2, b + 1),
            Err(BufferError::invalid("erase", "`first` is past `last`"))
        );
        assert!(buf.erase(b, b + 4).is_err());
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn pop_back_removes_from_the_end() {
        let mut buf = RawBuf::from_slice(&[1, 2, 3, 4]).unwrap();
        buf.pop_back().unwrap();
        buf.pop_back_n(2).unwrap();
        assert_eq!(buf.as_slice(), &[1]);
        assert!(buf.pop_back_n(2).is_err());
        assert!(buf.pop_back_n(0).is_err());
        buf.pop_back().unwrap();
        assert!(buf.pop_back().is_err());
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn erase_and_clear_destroy_exactly_once() {
        let tally = Tally::new();
        let mut buf = RawBuf::new();
        buf.append_with(5, FillSequentially(|i| tally.counted(i as i32)))
            .unwrap();
        buf.erase(buf.begin() + 1, buf.begin() + 3).unwrap();
        assert_eq!(tally.live(), 3);
        assert_eq!(
            buf.as_slice().iter().map(|p: &Counted| p.value).collect::<Vec<_>>(),
            [0, 3, 4]
        );
        buf.clear();
        assert_eq!(tally.live(), 0);
        assert_eq!(buf.capacity(), 5);
        assert!(!buf.is_empty());
    }

    #[test]
    fn copy_strategy_shifts_balance() {
        let tally = Tally::new();
        let mut buf = RawBuf::new();
        buf.append_with(3, FillSequentially(|i| tally.copy_counted(i as i32)))
            .unwrap();
        let extra = tally.copy_counted(9);
        buf.insert(buf.begin(), &extra).unwrap();
        drop(extra);
        assert_eq!(values(buf.as_slice()), [9, 0, 1, 2]);
        assert_eq!(tally.live(), 4);
        buf.erase(buf.begin(), buf.begin() + 2).unwrap();
        assert_eq!(values(buf.as_slice()), [1, 2]);
        assert_eq!(tally.live(), 2);
    }

    #[test]
    fn failed_staging_leaves_buffer_untouched() {
        let tally = Tally::new();
        let mut buf = RawBuf::new();
        buf.append_with(2, FillSequentially(|i| tally.copy_counted(i as i32)))
            .unwrap();
        let incoming = [tally.copy_counted(7), tally.copy_counted(8)];
        tally.fail_clones_after(1);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = buf.insert_slice(buf.begin(), &incoming);
        }));
        assert!(result.is_err());
        tally.allow_clones();
        assert_eq!(values(buf.as_slice()), [0, 1]);
        assert_eq!(buf.capacity(), 2);
        assert_eq!(tally.live(), 4);
    }

    #[test]
    fn insert_slice_stages_clones_without_growing() {
        let tally = Tally::new();
        let mut buf = RawBuf::with_capacity(4).unwrap();
        buf.push_back(&tally.counted(0)).unwrap();
        let incoming = [tally.counted(1), tally.counted(2)];
        let clones = tally.clones();
        buf.insert_slice(buf.begin(), &incoming).unwrap();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(tally.clones() - clones, 2);
        // The staging block handed its clones over without dropping any.
        assert_eq!(tally.live(), 5);
        assert_eq!(
            buf.as_slice().iter().map(|p: &Counted| p.value).collect::<Vec<_>>(),
            [1, 2, 0]
        );
    }

    #[test]
    fn insert_range_duplicates_own_elements() {
        let mut buf = RawBuf::from_slice(&[1, 2, 3]).unwrap();
        let b = buf.begin();
        let at = buf.insert_range(buf.end(), b, b + 2).unwrap();
        assert_eq!(at.position(), 3);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 1, 2]);
        assert_eq!(buf.capacity(), 5);

        // Every cursor refers to the buffer as it was before the call.
        let b = buf.begin();
        buf.insert_range(b + 1, b + 3, b + 5).unwrap();
        assert_eq!(buf.as_slice(), &[1, 1, 2, 2, 3, 1, 2]);
        assert_eq!(buf.capacity(), 7);
    }

    #[test]
    fn insert_range_rejects_bad_ranges() {
        let mut buf = RawBuf::from_slice(&['x', 'y']).unwrap();
        let b = buf.begin();
        assert_eq!(
            buf.insert_range(b, b + 2, b + 1),
            Err(BufferError::invalid("insert", "`first` is past `last`"))
        );
        assert!(buf.insert_range(b, b, b + 3).is_err());
        assert!(buf.insert_range(b + 3, b, b + 1).is_err());
        let at = buf.insert_range(b + 1, b + 1, b + 1).unwrap();
        assert_eq!(at.position(), 1);
        assert_eq!(buf.as_slice(), &['x', 'y']);
        assert_eq!(buf.capacity(), 2);
    }

    #[test]
    fn insert_range_clones_under_copy_strategy() {
        let tally = Tally::new();
        let mut buf = RawBuf::new();
        buf.append_with(2, FillSequentially(|i| tally.copy_counted(i as i32)))
            .unwrap();
        buf.insert_range(buf.begin(), buf.begin(), buf.end()).unwrap();
        assert_eq!(values(buf.as_slice()), [0, 1, 0, 1]);
        assert_eq!(tally.live(), 4);
        drop(buf);
        assert_eq!(tally.live(), 0);
    }

    #[test]
    fn clone_panic_during_insert_shift_leaks_the_suffix() {
        let tally = Tally::new();
        let mut buf = RawBuf::new();
        buf.append_with(4, FillSequentially(|i| tally.copy_counted(i as i32)))
            .unwrap();
        buf.reserve(2).unwrap();
        let extra = tally.copy_counted(9);
        let dropped = tally.drops();
        // One clone for the new element, one to move slot 3 up, then the move of slot 2 fails.
        tally.fail_clones_after(2);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = buf.insert(buf.begin() + 1, &extra);
        }));
        assert!(result.is_err());
        tally.allow_clones();
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.capacity(), 6);
        assert_eq!(values(buf.as_slice()), [0]);
        // Dropped: the vacated slot 3 and the unplaced clone of `extra`.
        assert_eq!(tally.drops() - dropped, 2);
        // `extra`, slot 0, and the leaked slots 1, 2 and 4.
        assert_eq!(tally.live(), 5);
        drop(extra);
        drop(buf);
        assert_eq!(tally.drops() - dropped, 4);
        assert_eq!(tally.live(), 3);
    }

    #[test]
    fn clone_panic_during_erase_shift_leaks_the_suffix() {
        let tally = Tally::new();
        let mut buf = RawBuf::new();
        buf.append_with(4, FillSequentially(|i| tally.copy_counted(i as i32)))
            .unwrap();
        // Slot 2 moves down into slot 1, then the move of slot 3 fails.
        tally.fail_clones_after(1);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = buf.erase(buf.begin() + 1, buf.begin() + 2);
        }));
        assert!(result.is_err());
        tally.allow_clones();
        assert_eq!(buf.len(), 1);
        assert_eq!(values(buf.as_slice()), [0]);
        // Dropped: the erased element and the vacated slot 2.
        assert_eq!(tally.drops(), 2);
        // Slot 0, plus the leaked slots 1 and 3.
        assert_eq!(tally.live(), 3);
        drop(buf);
        assert_eq!(tally.drops(), 3);
        assert_eq!(tally.live(), 2);
    }

    #[test]
    fn extend_owned_grows_by_the_size_hint() {
        let mut buf = RawBuf::new();
        buf.extend_owned((0..10).filter(|n| n % 2 == 0).map(|n| n.to_string()))
            .unwrap();
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.capacity(), 5);
        assert_eq!(buf.as_slice()[4], "8");

        buf.extend_owned((0..3).map(|n| n.to_string())).unwrap();
        assert_eq!(buf.capacity(), 8);

        let mut sized = RawBuf::with_capacity(1).unwrap();
        sized.extend_owned([1u8, 2, 3, 4]).unwrap();
        assert_eq!(sized.capacity(), 4);
    }
}
