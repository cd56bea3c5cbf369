//! Relocation of live elements between slots.
//!
//! Every place where the buffer moves values around in memory goes through this module: growing
//! or shrinking into a fresh block, and shifting a suffix left or right during `erase` and
//! `insert`. The strategy is chosen per element type through [`Element::RELOCATION`].
//!
//! # Examples
//!
//! ```
//! use slotbuf::prelude::*;
//!
//! // Types without drop glue are relocated with a raw byte copy.
//! assert_eq!(<u64 as Element>::RELOCATION, Relocation::Bitwise);
//! // Types with drop glue are moved slot by slot.
//! assert_eq!(<String as Element>::RELOCATION, Relocation::Move);
//! ```

use crate::Element;
use core::ptr;

/// How the buffer relocates elements of a given type.
///
/// All three strategies leave the source slots dead and the destination slots live. They differ
/// in how the destination is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relocation {
    /// One raw byte copy of the whole range. Valid because the type has no drop glue, so there is
    /// nothing to destroy in the source.
    Bitwise,
    /// Each destination slot is constructed by moving out of its source slot, which is then dead
    /// without running its destructor.
    Move,
    /// Each destination slot is constructed by cloning its source slot; the source is then
    /// dropped. For types whose identity is tied to the clone/drop pair (registries, counters).
    Copy,
}

impl Relocation {
    /// The strategy an [`Element`] gets unless it overrides [`Element::RELOCATION`]:
    /// [`Relocation::Bitwise`] for types without drop glue, [`Relocation::Move`] otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuf::Relocation;
    /// assert_eq!(Relocation::default_for::<(u8, char)>(), Relocation::Bitwise);
    /// assert_eq!(Relocation::default_for::<Vec<u8>>(), Relocation::Move);
    /// ```
    pub const fn default_for<T>() -> Relocation {
        if core::mem::needs_drop::<T>() {
            Relocation::Move
        } else {
            Relocation::Bitwise
        }
    }
}

/// Drops the first `count` slots at `base` when dropped itself. Used to unwind partially
/// cloned destination ranges.
struct Constructed<T> {
    base: *mut T,
    count: usize,
}

impl<T> Drop for Constructed<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.base, self.count));
        }
    }
}

/// Relocates `count` live elements from `src` into the uninitialized slots at `dst`.
///
/// With [`Relocation::Copy`], if a clone panics, the clones already written are dropped and the
/// whole source range is still live: the caller sees the source untouched.
///
/// # Safety
///
/// * `src` must point to `count` live elements, `dst` to `count` writable, uninitialized slots.
/// * The two ranges must not overlap.
/// * On return the source slots are dead and must not be dropped again.
pub(crate) unsafe fn relocate_nonoverlapping<T: Element>(src: *mut T, dst: *mut T, count: usize) {
    match T::RELOCATION {
        Relocation::Bitwise => ptr::copy_nonoverlapping(src, dst, count),
        Relocation::Move => {
            for i in 0..count {
                dst.add(i).write(src.add(i).read());
            }
        }
        Relocation::Copy => {
            let mut built = Constructed {
                base: dst,
                count: 0,
            };
            for i in 0..count {
                dst.add(i).write((*src.add(i)).clone());
                built.count += 1;
            }
            core::mem::forget(built);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(src, count));
        }
    }
}

/// Shifts the `count` live elements at `base` toward the end by `by` slots.
///
/// Works from the last element backwards, so a destination slot is always either spare or
/// already vacated.
///
/// # Safety
///
/// * `base..base + count` must be live and `base + count..base + count + by` must be
///   uninitialized slots of the same allocation.
/// * On return `base..base + by` is dead. If a clone panics under [`Relocation::Copy`] the range
///   is left partly shifted; the caller must treat everything from `base` on as leaked.
pub(crate) unsafe fn shift_right<T: Element>(base: *mut T, count: usize, by: usize) {
    if count == 0 || by == 0 {
        return;
    }
    match T::RELOCATION {
        Relocation::Bitwise => ptr::copy(base, base.add(by), count),
        Relocation::Move => {
            for i in (0..count).rev() {
                base.add(i + by).write(base.add(i).read());
            }
        }
        Relocation::Copy => {
            for i in (0..count).rev() {
                let src = base.add(i);
                base.add(i + by).write((*src).clone());
                ptr::drop_in_place(src);
            }
        }
    }
}

/// Shifts the `count` live elements at `base + by` toward the start, so they begin at `base`.
///
/// # Safety
///
/// * `base..base + by` must be dead slots and `base + by..base + by + count` live, in the same
///   allocation.
/// * On return `base + count..base + count + by` is dead. Panics under [`Relocation::Copy`] leave
///   the range partly shifted, as for [`shift_right`].
pub(crate) unsafe fn shift_left<T: Element>(base: *mut T, count: usize, by: usize) {
    if count == 0 || by == 0 {
        return;
    }
    match T::RELOCATION {
        Relocation::Bitwise => ptr::copy(base.add(by), base, count),
        Relocation::Move => {
            for i in 0..count {
                base.add(i).write(base.add(i + by).read());
            }
        }
        Relocation::Copy => {
            for i in 0..count {
                let src = base.add(i + by);
                base.add(i).write((*src).clone());
                ptr::drop_in_place(src);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CopyCounted, Counted, Tally};
    use core::mem::MaybeUninit;
    use std::vec::Vec;

    fn values<T: Clone>(slots: &[MaybeUninit<T>], range: core::ops::Range<usize>) -> Vec<T> {
        range
            .map(|i| unsafe { slots[i].assume_init_ref().clone() })
            .collect()
    }

    #[test]
    fn default_strategy_follows_drop_glue() {
        assert_eq!(<u32 as Element>::RELOCATION, Relocation::Bitwise);
        assert_eq!(<[u8; 3] as Element>::RELOCATION, Relocation::Bitwise);
        assert_eq!(<std::string::String as Element>::RELOCATION, Relocation::Move);
        assert_eq!(<Counted as Element>::RELOCATION, Relocation::Move);
        assert_eq!(<CopyCounted as Element>::RELOCATION, Relocation::Copy);
    }

    #[test]
    fn move_relocation_neither_clones_nor_drops() {
        let tally = Tally::new();
        let mut src: [MaybeUninit<Counted>; 3] = [const { MaybeUninit::uninit() }; 3];
        let mut dst: [MaybeUninit<Counted>; 3] = [const { MaybeUninit::uninit() }; 3];
        for (i, slot) in src.iter_mut().enumerate() {
            slot.write(tally.counted(i as i32));
        }
        unsafe {
            relocate_nonoverlapping(src[0].as_mut_ptr(), dst[0].as_mut_ptr(), 3);
        }
        assert_eq!(tally.clones(), 0);
        assert_eq!(tally.drops(), 0);
        assert_eq!(values(&dst, 0..3).iter().map(|p| p.value).collect::<Vec<_>>(), [0, 1, 2]);
        // The clones made by `values` are gone; drop the relocated originals too.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(dst[0].as_mut_ptr(), 3));
        }
        assert_eq!(tally.live(), 0);
    }

    #[test]
    fn copy_relocation_clones_then_destroys_sources() {
        let tally = Tally::new();
        let mut src: [MaybeUninit<CopyCounted>; 2] = [const { MaybeUninit::uninit() }; 2];
        let mut dst: [MaybeUninit<CopyCounted>; 2] = [const { MaybeUninit::uninit() }; 2];
        src[0].write(tally.copy_counted(10));
        src[1].write(tally.copy_counted(20));
        unsafe {
            relocate_nonoverlapping(src[0].as_mut_ptr(), dst[0].as_mut_ptr(), 2);
        }
        assert_eq!(tally.clones(), 2);
        assert_eq!(tally.drops(), 2);
        assert_eq!(tally.live(), 2);
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(dst[0].as_mut_ptr(), 2));
        }
        assert_eq!(tally.live(), 0);
    }

    #[test]
    fn failed_copy_relocation_leaves_source_live() {
        let tally = Tally::new();
        let mut src: [MaybeUninit<CopyCounted>; 3] = [const { MaybeUninit::uninit() }; 3];
        let mut dst: [MaybeUninit<CopyCounted>; 3] = [const { MaybeUninit::uninit() }; 3];
        for (i, slot) in src.iter_mut().enumerate() {
            slot.write(tally.copy_counted(i as i32));
        }
        tally.fail_clones_after(2);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| unsafe {
            relocate_nonoverlapping(src[0].as_mut_ptr(), dst[0].as_mut_ptr(), 3);
        }));
        assert!(result.is_err());
        // The two clones that succeeded were destroyed again; the three sources survive.
        assert_eq!(tally.live(), 3);
        tally.allow_clones();
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(src[0].as_mut_ptr(), 3));
        }
        assert_eq!(tally.live(), 0);
    }

    #[test]
    fn shifts_preserve_order() {
        let mut slots: [MaybeUninit<u16>; 6] = [MaybeUninit::uninit(); 6];
        for (i, slot) in slots.iter_mut().take(4).enumerate() {
            slot.write(i as u16 + 1);
        }
        unsafe {
            shift_right(slots[1].as_mut_ptr(), 3, 2);
        }
        assert_eq!(values(&slots, 3..6), [2, 3, 4]);
        unsafe {
            shift_left(slots[1].as_mut_ptr(), 3, 2);
        }
        assert_eq!(values(&slots, 0..4), [1, 2, 3, 4]);
    }

    #[test]
    fn copy_shift_keeps_construct_destroy_balanced() {
        let tally = Tally::new();
        let mut slots: [MaybeUninit<CopyCounted>; 5] = [const { MaybeUninit::uninit() }; 5];
        for (i, slot) in slots.iter_mut().take(3).enumerate() {
            slot.write(tally.copy_counted(i as i32));
        }
        unsafe {
            shift_right(slots[0].as_mut_ptr(), 3, 2);
        }
        assert_eq!(tally.live(), 3);
        assert_eq!(
            values(&slots, 2..5).iter().map(|p| p.value).collect::<Vec<_>>(),
            [0, 1, 2]
        );
        unsafe {
            shift_left(slots[0].as_mut_ptr(), 3, 2);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(slots[0].as_mut_ptr(), 3));
        }
        assert_eq!(tally.live(), 0);
    }
}
