//! Random-access cursors and iterators over a [`Bitfield`](crate::Bitfield).
//!
//! A [`BitCursor`] is a position in a bitfield. Cursors can be moved by any
//! signed offset, subtracted to get a distance, and compared, all in
//! constant time. Two cursors bound an [`Iter`] over the bits between them,
//! so a piece range can be scanned without copying it out:
//!
//! ```
//! use torrent_bitfield::Bitfield;
//!
//! let mut have = Bitfield::with_size(128, false);
//! have.set_bit(40);
//! have.set_bit(127);
//!
//! let from = have.begin() + 30;
//! let to = have.begin() + 50;
//! assert_eq!(to - from, 20);
//! assert_eq!(from.to(to).filter(|&bit| bit).count(), 1);
//! ```

use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::bitfield::{read_bit, Word};

/// A position within a bitfield.
///
/// Valid positions run from 0 to the bitfield size inclusive; the last one
/// is the end cursor and cannot be dereferenced. Cursors compare by position
/// and are only meaningful against cursors of the same bitfield.
#[derive(Clone, Copy, Debug)]
pub struct BitCursor<'a> {
    words: &'a [Word],
    size: usize,
    pos: usize,
}

impl<'a> BitCursor<'a> {
    #[inline]
    pub(crate) fn new(words: &'a [Word], size: usize, pos: usize) -> Self {
        Self { words, size, pos }
    }

    /// Bit index this cursor points at.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read the bit under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at or past the end.
    #[inline]
    pub fn get(&self) -> bool {
        assert!(
            self.pos < self.size,
            "cursor at {} out of bounds (size: {})",
            self.pos,
            self.size
        );
        read_bit(self.words, self.pos)
    }

    /// Iterator over the bits in `[self, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `end` is before `self` or points into another bitfield.
    #[inline]
    pub fn to(self, end: BitCursor<'a>) -> Iter<'a> {
        assert!(
            std::ptr::eq(self.words, end.words),
            "cursors belong to different bitfields"
        );
        assert!(
            self.pos <= end.pos,
            "range end {} before start {}",
            end.pos,
            self.pos
        );
        Iter {
            words: self.words,
            front: self.pos,
            back: end.pos,
        }
    }

    #[inline]
    fn offset(self, delta: isize) -> Self {
        let pos = self.pos as isize + delta;
        assert!(
            pos >= 0 && pos as usize <= self.size,
            "cursor moved to {} outside 0..={}",
            pos,
            self.size
        );
        Self {
            pos: pos as usize,
            ..self
        }
    }
}

impl<'a> Add<isize> for BitCursor<'a> {
    type Output = BitCursor<'a>;

    #[inline]
    fn add(self, rhs: isize) -> Self::Output {
        self.offset(rhs)
    }
}

impl<'a> Sub<isize> for BitCursor<'a> {
    type Output = BitCursor<'a>;

    #[inline]
    fn sub(self, rhs: isize) -> Self::Output {
        self.offset(-rhs)
    }
}

impl AddAssign<isize> for BitCursor<'_> {
    #[inline]
    fn add_assign(&mut self, rhs: isize) {
        *self = self.offset(rhs);
    }
}

impl SubAssign<isize> for BitCursor<'_> {
    #[inline]
    fn sub_assign(&mut self, rhs: isize) {
        *self = self.offset(-rhs);
    }
}

impl<'a> Sub for BitCursor<'a> {
    type Output = isize;

    /// Signed distance from `rhs` to `self`.
    #[inline]
    fn sub(self, rhs: BitCursor<'a>) -> isize {
        self.pos as isize - rhs.pos as isize
    }
}

impl PartialEq for BitCursor<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for BitCursor<'_> {}

impl PartialOrd for BitCursor<'_> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BitCursor<'_> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert!(
            std::ptr::eq(self.words, other.words),
            "comparing cursors of different bitfields"
        );
        self.pos.cmp(&other.pos)
    }
}

/// Iterator over a range of bits, yielding `true` for set bits.
///
/// Cloning restarts from the current position. Skipping with `nth` and
/// `nth_back` is constant time.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    words: &'a [Word],
    front: usize,
    back: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        let bit = read_bit(self.words, self.front);
        self.front += 1;
        Some(bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<bool> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }

    #[inline]
    fn last(mut self) -> Option<bool> {
        self.next_back()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(read_bit(self.words, self.back))
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<bool> {
        self.back = self.back.saturating_sub(n).max(self.front);
        self.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
