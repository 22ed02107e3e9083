//! TypedBitfield - A bitfield addressed by a domain index type.
//!
//! Consumers such as piece pickers deal in piece indices, not raw integers.
//! [`TypedBitfield<T>`] wraps a [`Bitfield`] and takes and returns indices of
//! type `T`, so a piece index cannot be mixed up with, say, a block offset.
//! The index type is only a marker; the wrapper has the same layout as the
//! bitfield it owns.
//!
//! # Examples
//!
//! ```
//! use torrent_bitfield::{PieceIndex, TypedBitfield};
//!
//! let mut have: TypedBitfield<PieceIndex> = TypedBitfield::with_size(16, false);
//! have.set_bit(PieceIndex(3));
//!
//! let missing: Vec<PieceIndex> = have.range().filter(|&p| !have.get_bit(p)).collect();
//! assert_eq!(missing.len(), 15);
//! assert_eq!(have.end_index(), PieceIndex(16));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::Index;

use crate::bitfield::{Bitfield, Word};
use crate::error::Result;
use crate::iter::{BitCursor, Iter};

/// An index domain usable with [`TypedBitfield`].
///
/// Implementations convert losslessly between the domain type and a bit
/// position for every position a bitfield can hold.
pub trait BitIndex: Copy {
    /// Build an index from a bit position.
    fn from_bit(bit: usize) -> Self;

    /// The bit position this index addresses.
    fn to_bit(self) -> usize;
}

macro_rules! impl_bit_index {
    ($($t:ty),*) => {
        $(
            impl BitIndex for $t {
                #[inline(always)]
                fn from_bit(bit: usize) -> Self {
                    match <$t>::try_from(bit) {
                        Ok(index) => index,
                        Err(_) => panic!(
                            "bit position {} does not fit in {}",
                            bit,
                            stringify!($t)
                        ),
                    }
                }

                #[inline(always)]
                fn to_bit(self) -> usize {
                    match usize::try_from(self) {
                        Ok(bit) => bit,
                        Err(_) => panic!("index {} is not a bit position", self),
                    }
                }
            }
        )*
    };
}

impl_bit_index!(u32, u64, i32, i64);

impl BitIndex for usize {
    #[inline(always)]
    fn from_bit(bit: usize) -> Self {
        bit
    }

    #[inline(always)]
    fn to_bit(self) -> usize {
        self
    }
}

/// Index of a piece within a torrent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PieceIndex(pub u32);

impl BitIndex for PieceIndex {
    #[inline(always)]
    fn from_bit(bit: usize) -> Self {
        PieceIndex(u32::from_bit(bit))
    }

    #[inline(always)]
    fn to_bit(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for PieceIndex {
    fn from(index: u32) -> Self {
        PieceIndex(index)
    }
}

impl fmt::Display for PieceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A [`Bitfield`] whose bits are addressed by indices of type `T`.
pub struct TypedBitfield<T> {
    bits: Bitfield,
    _index: PhantomData<fn() -> T>,
}

impl<T> TypedBitfield<T> {
    /// The wrapped bitfield.
    #[inline(always)]
    pub fn bitfield(&self) -> &Bitfield {
        &self.bits
    }

    /// Unwrap into the plain bitfield.
    #[inline]
    pub fn into_inner(self) -> Bitfield {
        self.bits
    }
}

impl<T: BitIndex> TypedBitfield<T> {
    /// Create an empty bitfield. No buffer is allocated.
    #[inline]
    pub const fn new() -> Self {
        Self {
            bits: Bitfield::new(),
            _index: PhantomData,
        }
    }

    /// Create a bitfield with `n` bits, all set to `fill`.
    pub fn with_size(n: usize, fill: bool) -> Self {
        Bitfield::with_size(n, fill).into()
    }

    /// See [`Bitfield::from_bytes`].
    pub fn from_bytes(bytes: &[u8], n: usize) -> Self {
        Bitfield::from_bytes(bytes, n).into()
    }

    /// See [`Bitfield::try_from_bytes`].
    pub fn try_from_bytes(bytes: &[u8], n: usize) -> Result<Self> {
        Bitfield::try_from_bytes(bytes, n).map(Self::from)
    }

    // =========================================================================
    // Size Information
    // =========================================================================

    /// Number of valid indices.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.bits.size()
    }

    /// `true` if the view holds no bits.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// See [`Bitfield::num_words`].
    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.bits.num_words()
    }

    /// See [`Bitfield::num_bytes`].
    #[inline(always)]
    pub fn num_bytes(&self) -> usize {
        self.bits.num_bytes()
    }

    /// See [`Bitfield::data`].
    #[inline]
    pub fn data(&self) -> Option<&[Word]> {
        self.bits.data()
    }

    /// Wire-format view of the bits. See [`Bitfield::as_bytes`].
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// See [`Bitfield::to_bytes`].
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits.to_bytes()
    }

    /// One past the last valid index.
    #[inline]
    pub fn end_index(&self) -> T {
        T::from_bit(self.bits.size())
    }

    /// All valid indices, `0 .. size()`, in order.
    #[inline]
    pub fn range(&self) -> IndexRange<T> {
        IndexRange::new(0, self.bits.size())
    }

    // =========================================================================
    // Bit Operations
    // =========================================================================

    /// Get the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below `size()`.
    #[inline]
    pub fn get_bit(&self, index: T) -> bool {
        self.bits.get_bit(index.to_bit())
    }

    /// Checked variant of [`get_bit`](Self::get_bit).
    #[inline]
    pub fn try_get_bit(&self, index: T) -> Result<bool> {
        self.bits.try_get_bit(index.to_bit())
    }

    /// Set the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below `size()`.
    #[inline]
    pub fn set_bit(&mut self, index: T) {
        self.bits.set_bit(index.to_bit());
    }

    /// Clear the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below `size()`.
    #[inline]
    pub fn clear_bit(&mut self, index: T) {
        self.bits.clear_bit(index.to_bit());
    }

    /// See [`Bitfield::set_all`].
    pub fn set_all(&mut self) {
        self.bits.set_all();
    }

    /// See [`Bitfield::clear_all`].
    pub fn clear_all(&mut self) {
        self.bits.clear_all();
    }

    /// Release storage and set size to 0.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// See [`Bitfield::assign`].
    pub fn assign(&mut self, bytes: &[u8], n: usize) {
        self.bits.assign(bytes, n);
    }

    /// See [`Bitfield::try_assign`].
    pub fn try_assign(&mut self, bytes: &[u8], n: usize) -> Result<()> {
        self.bits.try_assign(bytes, n)
    }

    /// Resize to `n` bits. See [`Bitfield::resize`].
    pub fn resize(&mut self, n: usize, fill: bool) {
        self.bits.resize(n, fill);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of set bits.
    #[inline]
    pub fn count(&self) -> usize {
        self.bits.count()
    }

    /// See [`Bitfield::all_set`].
    pub fn all_set(&self) -> bool {
        self.bits.all_set()
    }

    /// See [`Bitfield::none_set`].
    pub fn none_set(&self) -> bool {
        self.bits.none_set()
    }

    /// Lowest index whose bit is set.
    pub fn find_first_set(&self) -> Option<T> {
        self.bits.find_first_set().map(T::from_bit)
    }

    /// Highest index whose bit is clear.
    pub fn find_last_clear(&self) -> Option<T> {
        self.bits.find_last_clear().map(T::from_bit)
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Iterate over every bit in index order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        self.bits.iter()
    }

    /// Cursor at index 0.
    #[inline]
    pub fn begin(&self) -> BitCursor<'_> {
        self.bits.begin()
    }

    /// Cursor one past the last index.
    #[inline]
    pub fn end(&self) -> BitCursor<'_> {
        self.bits.end()
    }
}

impl<T> From<Bitfield> for TypedBitfield<T> {
    #[inline]
    fn from(bits: Bitfield) -> Self {
        Self {
            bits,
            _index: PhantomData,
        }
    }
}

impl<T> From<TypedBitfield<T>> for Bitfield {
    #[inline]
    fn from(typed: TypedBitfield<T>) -> Self {
        typed.bits
    }
}

impl<T: BitIndex> Index<T> for TypedBitfield<T> {
    type Output = bool;

    #[inline]
    fn index(&self, index: T) -> &bool {
        &self.bits[index.to_bit()]
    }
}

impl<'a, T: BitIndex> IntoIterator for &'a TypedBitfield<T> {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

// Manual impls so that `T` itself needs none of these traits.

impl<T> Clone for TypedBitfield<T> {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            _index: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.bits.clone_from(&source.bits);
    }
}

impl<T> Default for TypedBitfield<T> {
    fn default() -> Self {
        Bitfield::new().into()
    }
}

impl<T> PartialEq for TypedBitfield<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T> Eq for TypedBitfield<T> {}

impl<T> Hash for TypedBitfield<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<T> fmt::Debug for TypedBitfield<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedBitfield").field(&self.bits).finish()
    }
}

impl<T> fmt::Display for TypedBitfield<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.bits, f)
    }
}

/// Lazy range of indices `start .. end` in the domain `T`.
///
/// Clone it to restart the sequence.
pub struct IndexRange<T> {
    start: usize,
    end: usize,
    _index: PhantomData<fn() -> T>,
}

impl<T> IndexRange<T> {
    /// Indices `start .. end`.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "index range end {} before start {}", end, start);
        Self {
            start,
            end,
            _index: PhantomData,
        }
    }
}

impl<T> Clone for IndexRange<T> {
    fn clone(&self) -> Self {
        Self::new(self.start, self.end)
    }
}

impl<T> fmt::Debug for IndexRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexRange({}..{})", self.start, self.end)
    }
}

impl<T: BitIndex> Iterator for IndexRange<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let index = T::from_bit(self.start);
        self.start += 1;
        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<T> {
        self.start = self.start.saturating_add(n).min(self.end);
        self.next()
    }
}

impl<T: BitIndex> DoubleEndedIterator for IndexRange<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        Some(T::from_bit(self.end))
    }
}

impl<T: BitIndex> ExactSizeIterator for IndexRange<T> {}

impl<T: BitIndex> FusedIterator for IndexRange<T> {}
