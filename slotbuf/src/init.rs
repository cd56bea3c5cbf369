#![warn(missing_docs)]

//! A [`SlotInit<T>`] is an object that knows how to fill a run of uninitialized slots with `T`
//! values. Sequences use it to construct elements directly in their spare capacity.
//!
//! # Examples
//!
//! ```
//! use slotbuf::prelude::*;
//!
//! let squares: Array<u32> = Array::new_with(4, FillSequentially(|i| (i * i) as u32)).unwrap();
//! assert_eq!(&squares[..], &[0, 1, 4, 9]);
//!
//! let blanks: Array<String> = Array::new_with(2, FillWithDefault).unwrap();
//! assert_eq!(&blanks[..], &[String::new(), String::new()]);
//! ```

use core::mem::MaybeUninit;
use core::ptr;

/// An object that is able to initialize a run of `T` slots.
///
/// # Safety
///
/// `initialize` must write every slot of `dst` before returning normally. If it panics, slots it
/// already wrote are leaked, never dropped.
///
/// # Examples
///
/// An initializer that fills slots from the last one backwards:
///
/// ```
/// use slotbuf::prelude::*;
/// use std::mem::MaybeUninit;
///
/// struct PowersOf3Backwards;
/// unsafe impl SlotInit<u64> for PowersOf3Backwards {
///     fn initialize(self, dst: &mut [MaybeUninit<u64>]) {
///         let mut v = 1;
///         for slot in dst.iter_mut().rev() {
///             slot.write(v);
///             v *= 3;
///         }
///     }
/// }
///
/// let a = Array::new_with(5, PowersOf3Backwards).unwrap();
/// assert_eq!(&a[..], &[81, 27, 9, 3, 1]);
/// ```
pub unsafe trait SlotInit<T> {
    /// Fills the slice.
    fn initialize(self, dst: &mut [MaybeUninit<T>]);
}

/// Computes each slot's value from its index within the run.
pub struct FillSequentially<Lambda>(pub Lambda);

unsafe impl<T, Lambda: FnMut(usize) -> T> SlotInit<T> for FillSequentially<Lambda> {
    fn initialize(self, dst: &mut [MaybeUninit<T>]) {
        let FillSequentially(mut at) = self;
        dst.iter_mut().enumerate().for_each(|(i, slot)| {
            slot.write(at(i));
        });
    }
}

/// Fills every slot with `T::default()`.
pub struct FillWithDefault;

unsafe impl<T: Default> SlotInit<T> for FillWithDefault {
    fn initialize(self, dst: &mut [MaybeUninit<T>]) {
        for slot in dst {
            slot.write(T::default());
        }
    }
}

/// Bit-copies from a slice of the same length.
pub struct CopyFrom<'a, T>(pub &'a [T]);

unsafe impl<'a, T: Copy> SlotInit<T> for CopyFrom<'a, T> {
    fn initialize(self, dst: &mut [MaybeUninit<T>]) {
        assert_eq!(self.0.len(), dst.len(), "source length differs from the slot count");
        // `T: Copy`, so the source stays valid and nothing needs dropping.
        unsafe {
            ptr::copy_nonoverlapping(self.0.as_ptr(), dst.as_mut_ptr().cast::<T>(), dst.len());
        }
    }
}

/// Moves the values out of an array of the same length.
pub struct MoveFrom<T, const N: usize>(pub [T; N]);

unsafe impl<T, const N: usize> SlotInit<T> for MoveFrom<T, N> {
    fn initialize(self, dst: &mut [MaybeUninit<T>]) {
        assert_eq!(dst.len(), N, "array length differs from the slot count");
        for (slot, value) in dst.iter_mut().zip(self.0) {
            slot.write(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill<T, const N: usize>(init: impl SlotInit<T>) -> [T; N] {
        let mut slots: [MaybeUninit<T>; N] = [const { MaybeUninit::uninit() }; N];
        init.initialize(&mut slots);
        slots.map(|slot| unsafe { slot.assume_init() })
    }

    #[test]
    fn initializers_fill_every_slot() {
        assert_eq!(fill::<u8, 3>(FillSequentially(|i| i as u8 * 2)), [0, 2, 4]);
        assert_eq!(fill::<i64, 2>(FillWithDefault), [0, 0]);
        assert_eq!(fill::<u16, 2>(CopyFrom(&[5, 6])), [5, 6]);
        assert_eq!(fill::<u16, 2>(MoveFrom([1, 2])), [1, 2]);
    }

    #[test]
    #[should_panic(expected = "source length differs")]
    fn copy_from_rejects_a_short_source() {
        let _ = fill::<u32, 3>(CopyFrom(&[1, 2]));
    }
}
