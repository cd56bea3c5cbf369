//! The surface shared by every derived sequence type.
//!
//! A derived sequence is a `#[repr(transparent)]` wrapper around a [`RawBuf`](crate::raw::RawBuf).
//! [`define_sequence!`] generates its whole common API by forwarding to the buffer: growth,
//! mutation, cursors, checked access, and the standard trait impls. Types then add their own
//! constructors and conversions on top.

macro_rules! define_sequence {
    (
        $(#[$attr:meta])*
        $tyvis:vis struct $outer:ident < $( ( $($generics:tt)* ) ),* > (RawBuf<$elem:ident>);

        with signature: impl< $( ( $($generic_params:tt)* ) ),* > $ignored:ident < $( ($($generics_apply:tt)*) ),* >;
    ) => {
        $(#[$attr])*
        $tyvis struct $outer < $($($generics)*),* > ($crate::raw::RawBuf<$elem>);

        impl< $($($generic_params)*),* > $outer < $($($generics_apply)*),* > {
            /// An empty sequence with no storage.
            #[inline]
            pub const fn new() -> Self {
                $outer($crate::raw::RawBuf::new())
            }

            /// An empty sequence with exactly `slots` slots reserved.
            pub fn with_slots(slots: usize) -> ::core::result::Result<Self, $crate::BufferError> {
                ::core::result::Result::Ok($outer($crate::raw::RawBuf::with_capacity(slots)?))
            }

            /// Clones of `values`, in order. Capacity equals their count.
            pub fn from_slice(values: &[$elem]) -> ::core::result::Result<Self, $crate::BufferError> {
                ::core::result::Result::Ok($outer($crate::raw::RawBuf::from_slice(values)?))
            }

            /// `count` clones of `value`. Capacity equals `count`.
            pub fn filled(value: &$elem, count: usize) -> ::core::result::Result<Self, $crate::BufferError> {
                ::core::result::Result::Ok($outer($crate::raw::RawBuf::filled(value, count)?))
            }

            /// Clones of the elements of `source` from `first` up to, not including, `last`.
            pub fn from_range(
                source: &Self,
                first: $crate::cursor::Cursor,
                last: $crate::cursor::Cursor,
            ) -> ::core::result::Result<Self, $crate::BufferError> {
                Self::from_slice(source.0.slice(first, last)?)
            }

            /// `count` elements constructed in place by `init`. Capacity equals `count`.
            pub fn new_with(
                count: usize,
                init: impl $crate::init::SlotInit<$elem>,
            ) -> ::core::result::Result<Self, $crate::BufferError> {
                let mut raw = $crate::raw::RawBuf::with_capacity(count)?;
                raw.append_with(count, init)?;
                ::core::result::Result::Ok($outer(raw))
            }

            /// Wraps an existing buffer.
            #[inline]
            pub fn from_raw(raw: $crate::raw::RawBuf<$elem>) -> Self {
                $outer(raw)
            }

            /// Unwraps the underlying buffer.
            #[inline]
            pub fn into_raw(self) -> $crate::raw::RawBuf<$elem> {
                self.0
            }

            /// The underlying buffer.
            #[inline]
            pub fn raw(&self) -> &$crate::raw::RawBuf<$elem> {
                &self.0
            }

            /// The underlying buffer, mutably.
            #[inline]
            pub fn raw_mut(&mut self) -> &mut $crate::raw::RawBuf<$elem> {
                &mut self.0
            }

            /// Number of live elements.
            #[inline]
            pub fn size(&self) -> usize {
                self.0.len()
            }

            /// Number of live elements.
            #[inline]
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Number of slots, live or spare.
            #[inline]
            pub fn capacity(&self) -> usize {
                self.0.capacity()
            }

            /// True when there are no live elements. Reserved capacity does not count.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.len() == 0
            }

            /// Grows capacity by exactly `extra` slots.
            #[inline]
            pub fn reserve(&mut self, extra: usize) -> ::core::result::Result<(), $crate::BufferError> {
                self.0.reserve(extra)
            }

            /// Sets capacity to exactly `capacity`, dropping trailing elements that no longer fit.
            #[inline]
            pub fn resize(&mut self, capacity: usize) -> ::core::result::Result<(), $crate::BufferError> {
                self.0.resize(capacity)
            }

            /// Shrinks capacity to the live length.
            #[inline]
            pub fn compact(&mut self) -> ::core::result::Result<(), $crate::BufferError> {
                self.0.compact()
            }

            /// See [`RawBuf::push_back`]($crate::raw::RawBuf::push_back).
            #[inline]
            pub fn push_back(&mut self, value: &$elem) -> ::core::result::Result<$crate::cursor::Cursor, $crate::BufferError> {
                self.0.push_back(value)
            }

            /// See [`RawBuf::push_back_n`]($crate::raw::RawBuf::push_back_n).
            #[inline]
            pub fn push_back_n(
                &mut self,
                value: &$elem,
                repetitions: usize,
            ) -> ::core::result::Result<$crate::cursor::Cursor, $crate::BufferError> {
                self.0.push_back_n(value, repetitions)
            }

            /// See [`RawBuf::insert`]($crate::raw::RawBuf::insert).
            #[inline]
            pub fn insert(
                &mut self,
                position: $crate::cursor::Cursor,
                value: &$elem,
            ) -> ::core::result::Result<$crate::cursor::Cursor, $crate::BufferError> {
                self.0.insert(position, value)
            }

            /// See [`RawBuf::insert_slice`]($crate::raw::RawBuf::insert_slice).
            #[inline]
            pub fn insert_slice(
                &mut self,
                position: $crate::cursor::Cursor,
                values: &[$elem],
            ) -> ::core::result::Result<$crate::cursor::Cursor, $crate::BufferError> {
                self.0.insert_slice(position, values)
            }

            /// See [`RawBuf::insert_range`]($crate::raw::RawBuf::insert_range).
            #[inline]
            pub fn insert_range(
                &mut self,
                position: $crate::cursor::Cursor,
                first: $crate::cursor::Cursor,
                last: $crate::cursor::Cursor,
            ) -> ::core::result::Result<$crate::cursor::Cursor, $crate::BufferError> {
                self.0.insert_range(position, first, last)
            }

            /// See [`RawBuf::erase`]($crate::raw::RawBuf::erase).
            #[inline]
            pub fn erase(
                &mut self,
                first: $crate::cursor::Cursor,
                last: $crate::cursor::Cursor,
            ) -> ::core::result::Result<$crate::cursor::Cursor, $crate::BufferError> {
                self.0.erase(first, last)
            }

            /// Removes the last element.
            #[inline]
            pub fn pop_back(&mut self) -> ::core::result::Result<(), $crate::BufferError> {
                self.0.pop_back()
            }

            /// Removes the last `repetitions` elements.
            #[inline]
            pub fn pop_back_n(&mut self, repetitions: usize) -> ::core::result::Result<(), $crate::BufferError> {
                self.0.pop_back_n(repetitions)
            }

            /// Drops every element, keeping capacity.
            #[inline]
            pub fn clear(&mut self) {
                self.0.clear()
            }

            /// Constructs `count` new elements at the end with `init`.
            #[inline]
            pub fn append_with(
                &mut self,
                count: usize,
                init: impl $crate::init::SlotInit<$elem>,
            ) -> ::core::result::Result<$crate::cursor::Cursor, $crate::BufferError> {
                self.0.append_with(count, init)
            }

            /// Checked access.
            #[inline]
            pub fn at(&self, index: usize) -> ::core::result::Result<&$elem, $crate::BufferError> {
                self.0.at(index)
            }

            /// Checked mutable access.
            #[inline]
            pub fn at_mut(&mut self, index: usize) -> ::core::result::Result<&mut $elem, $crate::BufferError> {
                self.0.at_mut(index)
            }

            /// # Safety
            ///
            /// `index` must be less than [`len`](Self::len).
            #[inline]
            pub unsafe fn get_unchecked(&self, index: usize) -> &$elem {
                self.0.get_unchecked(index)
            }

            #[inline]
            pub fn front(&self) -> ::core::option::Option<&$elem> {
                self.0.front()
            }

            #[inline]
            pub fn back(&self) -> ::core::option::Option<&$elem> {
                self.0.back()
            }

            #[inline]
            pub fn begin(&self) -> $crate::cursor::Cursor {
                self.0.begin()
            }

            #[inline]
            pub fn end(&self) -> $crate::cursor::Cursor {
                self.0.end()
            }

            #[inline]
            pub fn rbegin(&self) -> $crate::cursor::Cursor<$crate::cursor::Reverse> {
                self.0.rbegin()
            }

            #[inline]
            pub fn rend(&self) -> $crate::cursor::Cursor<$crate::cursor::Reverse> {
                self.0.rend()
            }

            /// The elements from `first` up to, not including, `last`.
            #[inline]
            pub fn slice(
                &self,
                first: $crate::cursor::Cursor,
                last: $crate::cursor::Cursor,
            ) -> ::core::result::Result<&[$elem], $crate::BufferError> {
                self.0.slice(first, last)
            }

            #[inline]
            pub fn as_slice(&self) -> &[$elem] {
                self.0.as_slice()
            }

            #[inline]
            pub fn as_mut_slice(&mut self) -> &mut [$elem] {
                self.0.as_mut_slice()
            }

            #[inline]
            pub fn as_ptr(&self) -> *const $elem {
                self.0.as_ptr()
            }

            /// Moves the contents out, leaving `self` empty and without storage.
            #[inline]
            pub fn take(&mut self) -> Self {
                $outer(self.0.take())
            }
        }

        impl< $($($generic_params)*),* > ::core::default::Default for $outer < $($($generics_apply)*),* > {
            #[inline]
            fn default() -> Self {
                Self::new()
            }
        }

        /// Deep copy; the clone's capacity equals the source's length.
        ///
        /// # Panics
        ///
        /// Panics if the allocation fails.
        impl< $($($generic_params)*),* > ::core::clone::Clone for $outer < $($($generics_apply)*),* > {
            #[inline]
            fn clone(&self) -> Self {
                $outer(self.0.clone())
            }

            #[inline]
            fn clone_from(&mut self, source: &Self) {
                self.0.clone_from(&source.0)
            }
        }

        impl< $($($generic_params)*),* > $crate::Element for $outer < $($($generics_apply)*),* > {}

        impl< $($($generic_params)*),* > ::core::ops::Deref for $outer < $($($generics_apply)*),* > {
            type Target = [$elem];

            #[inline]
            fn deref(&self) -> &[$elem] {
                self.0.as_slice()
            }
        }

        impl< $($($generic_params)*),* > ::core::ops::DerefMut for $outer < $($($generics_apply)*),* > {
            #[inline]
            fn deref_mut(&mut self) -> &mut [$elem] {
                self.0.as_mut_slice()
            }
        }

        impl< $($($generic_params)*,)* Idx: ::core::slice::SliceIndex<[$elem]> > ::core::ops::Index<Idx> for $outer < $($($generics_apply)*),* > {
            type Output = Idx::Output;

            #[inline]
            fn index(&self, index: Idx) -> &Idx::Output {
                &self.0.as_slice()[index]
            }
        }

        impl< $($($generic_params)*,)* Idx: ::core::slice::SliceIndex<[$elem]> > ::core::ops::IndexMut<Idx> for $outer < $($($generics_apply)*),* > {
            #[inline]
            fn index_mut(&mut self, index: Idx) -> &mut Idx::Output {
                &mut self.0.as_mut_slice()[index]
            }
        }

        impl< $($($generic_params)*),* > ::core::convert::AsRef<[$elem]> for $outer < $($($generics_apply)*),* > {
            #[inline]
            fn as_ref(&self) -> &[$elem] {
                self.0.as_slice()
            }
        }

        impl< $($($generic_params)*),* > ::core::convert::AsMut<[$elem]> for $outer < $($($generics_apply)*),* > {
            #[inline]
            fn as_mut(&mut self) -> &mut [$elem] {
                self.0.as_mut_slice()
            }
        }

        impl< $($($generic_params)*),* > ::core::cmp::PartialEq for $outer < $($($generics_apply)*),* >
        where
            $elem: ::core::cmp::PartialEq,
        {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.0.as_slice() == other.0.as_slice()
            }
        }

        impl< $($($generic_params)*),* > ::core::cmp::Eq for $outer < $($($generics_apply)*),* >
        where
            $elem: ::core::cmp::Eq,
        {
        }

        impl< $($($generic_params)*),* > ::core::cmp::PartialOrd for $outer < $($($generics_apply)*),* >
        where
            $elem: ::core::cmp::PartialOrd,
        {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                self.0.as_slice().partial_cmp(other.0.as_slice())
            }
        }

        impl< $($($generic_params)*),* > ::core::cmp::Ord for $outer < $($($generics_apply)*),* >
        where
            $elem: ::core::cmp::Ord,
        {
            #[inline]
            fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                self.0.as_slice().cmp(other.0.as_slice())
            }
        }

        impl< $($($generic_params)*),* > ::core::hash::Hash for $outer < $($($generics_apply)*),* >
        where
            $elem: ::core::hash::Hash,
        {
            #[inline]
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::core::hash::Hash::hash(self.0.as_slice(), state)
            }
        }

        /// Grows by one slot plus the iterator's remaining lower size hint whenever it runs out of
        /// room, so an exactly sized iterator is appended with a single reservation.
        ///
        /// # Panics
        ///
        /// Panics if an allocation fails.
        impl< $($($generic_params)*),* > ::core::iter::Extend<$elem> for $outer < $($($generics_apply)*),* > {
            fn extend<I: ::core::iter::IntoIterator<Item = $elem>>(&mut self, iter: I) {
                $crate::raw::must(self.0.extend_owned(iter))
            }
        }

        impl< 'a, $($($generic_params)*),* > ::core::iter::Extend<&'a $elem> for $outer < $($($generics_apply)*),* >
        where
            $elem: 'a,
        {
            fn extend<I: ::core::iter::IntoIterator<Item = &'a $elem>>(&mut self, iter: I) {
                $crate::raw::must(self.0.extend_owned(iter.into_iter().cloned()))
            }
        }

        impl< $($($generic_params)*),* > ::core::iter::FromIterator<$elem> for $outer < $($($generics_apply)*),* > {
            fn from_iter<I: ::core::iter::IntoIterator<Item = $elem>>(iter: I) -> Self {
                let mut sequence = Self::new();
                sequence.extend(iter);
                sequence
            }
        }

        impl< 'a, $($($generic_params)*),* > ::core::iter::IntoIterator for &'a $outer < $($($generics_apply)*),* > {
            type Item = &'a $elem;
            type IntoIter = ::core::slice::Iter<'a, $elem>;

            #[inline]
            fn into_iter(self) -> Self::IntoIter {
                self.0.as_slice().iter()
            }
        }

        impl< 'a, $($($generic_params)*),* > ::core::iter::IntoIterator for &'a mut $outer < $($($generics_apply)*),* > {
            type Item = &'a mut $elem;
            type IntoIter = ::core::slice::IterMut<'a, $elem>;

            #[inline]
            fn into_iter(self) -> Self::IntoIter {
                self.0.as_mut_slice().iter_mut()
            }
        }
    };
}

pub(crate) use define_sequence;
