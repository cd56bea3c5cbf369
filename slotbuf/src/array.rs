use crate::init::MoveFrom;
use crate::newtype::define_sequence;
use crate::raw::must;
use crate::Element;
use core::fmt;

define_sequence! {
    #[repr(transparent)]
    #[doc = crate::doc_macro::make_svgbobdoc!(
    /// A growable array of elements with explicit, exact capacity management.
    ///
    /// An `Array<T>` is a single pointer-capacity-length triple pointing at a heap block:
    ///
    /// ```svgbob
    /// "Array<char>"
    /// +-------+-------+-------+
    /// | "ptr" | "4"   | "3"   |
    /// +-------+-------+-------+
    ///     |
    ///     v
    ///     +-------+-------+-------+-----------+
    ///     | "'a'" | "'b'" | "'c'" | "(spare)" |
    ///     +-------+-------+-------+-----------+
    /// ```
    ///
    /// Unlike `Vec<T>`, growth is exact: inserting into a full array grows it by one slot, and
    /// inserting `n` elements grows it by `n`. Use [`reserve`](Array::reserve) up front when
    /// many single insertions are coming.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbuf::prelude::*;
    ///
    /// let mut a = Array::new();
    /// a.push_back(&'a').unwrap();
    /// a.push_back(&'b').unwrap();
    /// a.push_back(&'c').unwrap();
    /// assert_eq!(a.size(), 3);
    /// assert_eq!(a.capacity(), 3);
    ///
    /// a.erase(a.begin() + 1, a.begin() + 2).unwrap();
    /// assert_eq!(&a[..], &['a', 'c']);
    /// a.insert(a.begin() + 1, &'x').unwrap();
    /// assert_eq!(&a[..], &['a', 'x', 'c']);
    /// ```
    ///
    /// Elements must be [`Element`]s, which rules out references and raw pointers:
    ///
    /// ```compile_fail
    /// use slotbuf::Array;
    /// let _: Array<&str> = Array::new();
    /// ```
    ///
    /// ```compile_fail
    /// use slotbuf::Array;
    /// let _: Array<*const u8> = Array::new();
    /// ```
    )]
    pub struct Array<(T: Element)>(RawBuf<T>);

    with signature: impl<(T: Element)> Array<(T)>;
}

impl<T: Element + fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Moves the values in, with capacity exactly `N`.
///
/// # Panics
///
/// Panics if the allocation fails.
impl<T: Element, const N: usize> From<[T; N]> for Array<T> {
    fn from(values: [T; N]) -> Self {
        must(Array::new_with(N, MoveFrom(values)))
    }
}

/// Creates an [`Array`] from a list of values or from `value; count`.
///
/// # Examples
///
/// ```
/// use slotbuf::array;
///
/// let a = array![1, 2, 3];
/// assert_eq!(a.capacity(), 3);
/// let b = array![String::from("ab"); 2];
/// assert_eq!(&b[..], &["ab", "ab"]);
/// let c: slotbuf::Array<u8> = array![];
/// assert!(c.is_empty());
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::Array::new()
    };
    ($value:expr; $count:expr) => {
        $crate::macro_support::must($crate::Array::filled(&$value, $count))
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Array::from([$($value),+])
    };
}
