#![doc = crate::doc_macro::make_svgbobdoc!(
    //! Strings over a choice of character units.
    //!
    //! A [`Str<C>`] is a sequence of `C` units with the same storage and growth policy as any
    //! other sequence. The unit type decides the encoding used when text enters or leaves the
    //! string: `u8` and `i8` are UTF-8, `u16` is UTF-16, and `u32` and `char` are UTF-32. For
    //! example, `Str::<u16>::copy_from_str("hé")` is:
    //!
    //! ```svgbob
    //! "Str<u16>"
    //! +-------+-----+-----+
    //! | "ptr" | "2" | "2" |
    //! +-------+-----+-----+
    //!     |
    //!     v
    //!     +----------+----------+
    //!     | "0x0068" | "0x00e9" |
    //!     +----------+----------+
    //! ```
    //!
    //! The units are not validated: a string may hold any unit values, and invalid sequences
    //! are shown as U+FFFD when the string is displayed.
    //!
    //! # Examples
    //!
    //! ```
    //! use slotbuf::prelude::*;
    //!
    //! let mut s: Str = Str::copy_from_str("abc").unwrap();
    //! s.erase(s.begin() + 1, s.begin() + 2).unwrap();
    //! assert_eq!(s, "ac");
    //! s.insert(s.begin() + 1, &b'x').unwrap();
    //! assert_eq!(s, "axc");
    //!
    //! let wide = Utf16Str::copy_from_str("hé").unwrap();
    //! assert_eq!(wide.as_slice(), &[0x68, 0xe9]);
    //! assert_eq!(wide.to_string(), "hé");
    //! ```
)]

use crate::error::BufferError;
use crate::init::{CopyFrom, SlotInit};
use crate::newtype::define_sequence;
use crate::raw::must;
use crate::Element;
use core::fmt::{self, Write as _};
use core::mem::MaybeUninit;
use core::ops::{Add, AddAssign};

/// A character unit a [`Str`] can be made of: `u8`, `i8`, `u16`, `u32` or `char`.
pub trait CharLike:
    Element + Copy + Eq + Ord + core::hash::Hash + Default + fmt::Debug + private::Sealed
{
}

impl CharLike for u8 {}
impl CharLike for i8 {}
impl CharLike for u16 {}
impl CharLike for u32 {}
impl CharLike for char {}

mod private {
    use core::fmt;
    use core::mem::MaybeUninit;

    pub trait Sealed: Sized {
        /// Number of units `s` takes in this encoding.
        fn encoded_len(s: &str) -> usize;
        /// Writes `s` into `dst`, which is exactly `encoded_len(s)` slots long.
        fn encode(s: &str, dst: &mut [MaybeUninit<Self>]);
        /// Whether `units` encode exactly `s`.
        fn eq_str(units: &[Self], s: &str) -> bool;
        /// Writes `units` as text, replacing undecodable units with U+FFFD.
        fn write_units(units: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result;
    }

    pub(super) fn write_utf8(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in bytes.utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                fmt::Write::write_char(f, char::REPLACEMENT_CHARACTER)?;
            }
        }
        Ok(())
    }

    #[inline(never)]
    #[cold]
    fn length_mismatch() -> ! {
        panic!("slot count does not match the encoded length")
    }

    pub(super) fn fill<T>(dst: &mut [MaybeUninit<T>], mut units: impl Iterator<Item = T>) {
        for slot in dst.iter_mut() {
            match units.next() {
                Some(unit) => {
                    slot.write(unit);
                }
                None => length_mismatch(),
            }
        }
        if units.next().is_some() {
            length_mismatch()
        }
    }
}

impl private::Sealed for u8 {
    fn encoded_len(s: &str) -> usize {
        s.len()
    }

    fn encode(s: &str, dst: &mut [MaybeUninit<Self>]) {
        CopyFrom(s.as_bytes()).initialize(dst)
    }

    fn eq_str(units: &[Self], s: &str) -> bool {
        units == s.as_bytes()
    }

    fn write_units(units: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        private::write_utf8(units, f)
    }
}

impl private::Sealed for i8 {
    fn encoded_len(s: &str) -> usize {
        s.len()
    }

    fn encode(s: &str, dst: &mut [MaybeUninit<Self>]) {
        private::fill(dst, s.bytes().map(|b| b as i8))
    }

    fn eq_str(units: &[Self], s: &str) -> bool {
        units.iter().map(|&u| u as u8).eq(s.bytes())
    }

    fn write_units(units: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Safety: i8 and u8 have the same size and alignment, and every bit pattern is valid
        // for both.
        let bytes = unsafe { core::slice::from_raw_parts(units.as_ptr().cast::<u8>(), units.len()) };
        private::write_utf8(bytes, f)
    }
}

impl private::Sealed for u16 {
    fn encoded_len(s: &str) -> usize {
        s.encode_utf16().count()
    }

    fn encode(s: &str, dst: &mut [MaybeUninit<Self>]) {
        private::fill(dst, s.encode_utf16())
    }

    fn eq_str(units: &[Self], s: &str) -> bool {
        units.iter().copied().eq(s.encode_utf16())
    }

    fn write_units(units: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in char::decode_utf16(units.iter().copied()) {
            f.write_char(c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl private::Sealed for u32 {
    fn encoded_len(s: &str) -> usize {
        s.chars().count()
    }

    fn encode(s: &str, dst: &mut [MaybeUninit<Self>]) {
        private::fill(dst, s.chars().map(u32::from))
    }

    fn eq_str(units: &[Self], s: &str) -> bool {
        units.iter().copied().eq(s.chars().map(u32::from))
    }

    fn write_units(units: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &u in units {
            f.write_char(char::from_u32(u).unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl private::Sealed for char {
    fn encoded_len(s: &str) -> usize {
        s.chars().count()
    }

    fn encode(s: &str, dst: &mut [MaybeUninit<Self>]) {
        private::fill(dst, s.chars())
    }

    fn eq_str(units: &[Self], s: &str) -> bool {
        units.iter().copied().eq(s.chars())
    }

    fn write_units(units: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        units.iter().try_for_each(|&c| f.write_char(c))
    }
}

/// Encodes a `&str` into slots of any [`CharLike`] unit.
///
/// # Examples
///
/// ```
/// use slotbuf::prelude::*;
///
/// let mut s: Utf32Str = Str::new();
/// s.append_with(5, EncodeStr("hello")).unwrap();
/// assert_eq!(s, "hello");
/// ```
///
/// # Panics
///
/// Panics if the number of slots differs from the encoded length of the text.
pub struct EncodeStr<'a>(pub &'a str);

unsafe impl<'a, C: CharLike> SlotInit<C> for EncodeStr<'a> {
    fn initialize(self, dst: &mut [MaybeUninit<C>]) {
        C::encode(self.0, dst)
    }
}

define_sequence! {
    #[repr(transparent)]
    /// A growable string of [`CharLike`] units, UTF-8 bytes by default.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuf::prelude::*;
    ///
    /// let hello: Str = Str::copy_from_str("hello").unwrap();
    /// let joined = hello.try_concat("huh").unwrap();
    /// assert_eq!(joined, "hellohuh");
    /// assert_eq!(joined.capacity(), 8);
    /// assert_eq!(joined.as_str(), Ok("hellohuh"));
    /// ```
    pub struct Str<(C: CharLike = u8)>(RawBuf<C>);

    with signature: impl<(C: CharLike)> Str<(C)>;
}

/// UTF-16 string.
pub type Utf16Str = Str<u16>;
/// UTF-32 string of `char`s.
pub type Utf32Str = Str<char>;
/// String of 32-bit units, like a platform wide string.
pub type WideStr = Str<u32>;

impl<C: CharLike> Str<C> {
    /// A string holding the encoding of `s`, with capacity equal to its length in units.
    pub fn copy_from_str(s: &str) -> Result<Self, BufferError> {
        Self::new_with(C::encoded_len(s), EncodeStr(s))
    }

    /// Appends the encoding of `s`. Returns a cursor to its first unit.
    ///
    /// Grows by exactly the encoded length when the spare capacity is short.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuf::prelude::*;
    ///
    /// let mut s = Utf16Str::new();
    /// s.push_str("ab").unwrap();
    /// let at = s.push_str("c").unwrap();
    /// assert_eq!(at.position(), 2);
    /// assert_eq!(s, "abc");
    /// ```
    pub fn push_str(&mut self, s: &str) -> Result<crate::Cursor, BufferError> {
        let len = C::encoded_len(s);
        if len == 0 {
            return Ok(self.end());
        }
        self.append_with(len, EncodeStr(s))
    }

    /// A new string holding this one followed by `s`, with capacity equal to their combined
    /// length.
    pub fn try_concat(&self, s: &str) -> Result<Self, BufferError> {
        let extra = C::encoded_len(s);
        let total = self
            .len()
            .checked_add(extra)
            .ok_or(BufferError::OutOfMemory { slots: usize::MAX })?;
        let mut out = Self::with_slots(total)?;
        out.append_with(self.len(), CopyFrom(self.as_slice()))?;
        out.append_with(extra, EncodeStr(s))?;
        Ok(out)
    }
}

impl Str<u8> {
    /// The contents as a `&str`, if they are valid UTF-8.
    pub fn as_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.as_slice())
    }
}

impl<C: CharLike> fmt::Display for Str<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        C::write_units(self.as_slice(), f)
    }
}

impl<C: CharLike> fmt::Debug for Str<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        C::write_units(self.as_slice(), f)?;
        f.write_char('"')
    }
}

impl<C: CharLike> PartialEq<str> for Str<C> {
    fn eq(&self, other: &str) -> bool {
        C::eq_str(self.as_slice(), other)
    }
}

impl<'a, C: CharLike> PartialEq<&'a str> for Str<C> {
    fn eq(&self, other: &&'a str) -> bool {
        C::eq_str(self.as_slice(), other)
    }
}

/// Appends `rhs` in place.
///
/// # Panics
///
/// Panics if the allocation fails; [`Str::push_str`] reports the error instead.
impl<'a, C: CharLike> Add<&'a str> for Str<C> {
    type Output = Str<C>;

    fn add(mut self, rhs: &'a str) -> Str<C> {
        must(self.push_str(rhs));
        self
    }
}

impl<'a, C: CharLike> AddAssign<&'a str> for Str<C> {
    fn add_assign(&mut self, rhs: &'a str) {
        must(self.push_str(rhs));
    }
}

/// # Panics
///
/// Panics if the allocation fails.
impl<'a, C: CharLike> From<&'a str> for Str<C> {
    fn from(s: &'a str) -> Self {
        must(Str::copy_from_str(s))
    }
}
