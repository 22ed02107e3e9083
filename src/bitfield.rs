//! Bitfield - Packed piece bitfield using 32-bit words.
//!
//! This module provides the resizable bit vector peers use to describe which
//! pieces of a torrent they hold. Bits are packed into 32-bit words so that
//! counting and scanning run a word at a time.
//!
//! # Design
//!
//! - Uses `Vec<u32>` for storage (32-bit words)
//! - Bit indexing: word_idx = bit_idx / 32, bit_offset = bit_idx % 32
//! - Words are held in network byte order, so the raw word buffer read as
//!   bytes is exactly the payload of the wire `bitfield` message: bit `i`
//!   lives in byte `i / 8` at position `7 - i % 8` (MSB first)
//! - Bits past `size` in the last word (padding) are always zero
//! - An empty bitfield owns no buffer at all
//!
//! # Examples
//!
//! ```
//! use torrent_bitfield::Bitfield;
//!
//! let mut have = Bitfield::with_size(10, false);
//! have.set_bit(0);
//! have.set_bit(9);
//! assert_eq!(have.count(), 2);
//! assert_eq!(have.as_bytes(), &[0x80, 0x40]);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use crate::error::{BitfieldError, Result};
use crate::iter::{BitCursor, Iter};

/// Word type for bit storage (32-bit unsigned integer)
pub type Word = u32;

/// Number of bits per word
pub const BITS_PER_WORD: usize = 32;

/// Maximum word value
pub const WORD_MAX: Word = Word::MAX;

/// Get word index from bit position
#[inline(always)]
pub(crate) const fn get_word_idx(bit_pos: usize) -> usize {
    bit_pos >> 5 // bit_pos / 32
}

/// Get bit index within word from bit position
#[inline(always)]
pub(crate) const fn get_bit_idx(bit_pos: usize) -> usize {
    bit_pos & 31 // bit_pos % 32
}

/// Number of words needed to hold `n` bits
#[inline(always)]
const fn words_for(n: usize) -> usize {
    (n + BITS_PER_WORD - 1) / BITS_PER_WORD
}

/// Number of bytes needed to hold `n` bits
#[inline(always)]
const fn bytes_for(n: usize) -> usize {
    (n + 7) / 8
}

/// Stored-order mask selecting the bit at `bit_pos` within its word.
///
/// Logical bit 0 of a word is the most significant bit of the big-endian
/// value, which `to_be` turns into the first byte in memory.
#[inline(always)]
pub(crate) const fn bit_mask(bit_pos: usize) -> Word {
    (0x8000_0000u32 >> get_bit_idx(bit_pos)).to_be()
}

/// Stored-order mask selecting the first `n` logical bits of a word.
#[inline(always)]
const fn bitmask(n: usize) -> Word {
    if n == 0 {
        0
    } else if n >= BITS_PER_WORD {
        WORD_MAX
    } else {
        (WORD_MAX << (BITS_PER_WORD - n)).to_be()
    }
}

/// Read the bit at `bit_pos` from a stored-order word slice.
#[inline(always)]
pub(crate) fn read_bit(words: &[Word], bit_pos: usize) -> bool {
    words[get_word_idx(bit_pos)] & bit_mask(bit_pos) != 0
}

/// Packed, resizable piece bitfield.
///
/// All bit indices are 0-based. Index arguments must be below
/// [`size`](Self::size); violating that is a caller bug and panics in every
/// build profile, since a stray write into the padding would corrupt
/// [`count`](Self::count) and [`all_set`](Self::all_set).
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "crate::serdes::WireBitfield", try_from = "crate::serdes::WireBitfield")
)]
pub struct Bitfield {
    /// Storage words, network byte order
    words: Vec<Word>,
    /// Number of valid bits
    size: usize,
}

impl Bitfield {
    /// Create an empty bitfield. No buffer is allocated.
    #[inline]
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            size: 0,
        }
    }

    /// Create a bitfield with `n` bits, all set to `fill`.
    ///
    /// # Examples
    ///
    /// ```
    /// use torrent_bitfield::Bitfield;
    ///
    /// let have = Bitfield::with_size(100, true);
    /// assert_eq!(have.size(), 100);
    /// assert_eq!(have.count(), 100);
    /// assert_eq!(have.num_words(), 4);
    /// ```
    pub fn with_size(n: usize, fill: bool) -> Self {
        let mut field = Self {
            words: vec![if fill { WORD_MAX } else { 0 }; words_for(n)],
            size: n,
        };
        field.clear_padding();
        field
    }

    /// Create a bitfield from the first `n` bits of a wire-format buffer.
    ///
    /// Bits of `bytes` past `n` are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` holds fewer than `n` bits.
    pub fn from_bytes(bytes: &[u8], n: usize) -> Self {
        let mut field = Self::new();
        field.assign(bytes, n);
        field
    }

    /// Checked variant of [`from_bytes`](Self::from_bytes).
    pub fn try_from_bytes(bytes: &[u8], n: usize) -> Result<Self> {
        let mut field = Self::new();
        field.try_assign(bytes, n)?;
        Ok(field)
    }

    // =========================================================================
    // Size Information
    // =========================================================================

    /// Number of valid bits.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// `true` if the bitfield holds no bits.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of 32-bit words backing the bits.
    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Number of bytes in the wire representation.
    #[inline(always)]
    pub fn num_bytes(&self) -> usize {
        bytes_for(self.size)
    }

    /// Raw word buffer, or `None` when no storage is allocated.
    ///
    /// Words are in network byte order; use [`as_bytes`](Self::as_bytes) for
    /// the wire form.
    #[inline]
    pub fn data(&self) -> Option<&[Word]> {
        if self.words.is_empty() {
            None
        } else {
            Some(&self.words)
        }
    }

    /// Wire-format view of the bits: `num_bytes()` bytes, MSB first.
    ///
    /// Trailing bits of the last byte past `size()` are zero.
    pub fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<Word, u8>(&self.words)[..self.num_bytes()]
    }

    /// Owned copy of [`as_bytes`](Self::as_bytes).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    // =========================================================================
    // Single Bit Operations
    // =========================================================================

    /// Get bit at position `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b >= size`.
    #[inline]
    pub fn get_bit(&self, b: usize) -> bool {
        assert!(b < self.size, "bit index {} out of bounds (size: {})", b, self.size);
        read_bit(&self.words, b)
    }

    /// Checked variant of [`get_bit`](Self::get_bit).
    #[inline]
    pub fn try_get_bit(&self, b: usize) -> Result<bool> {
        if b < self.size {
            Ok(read_bit(&self.words, b))
        } else {
            Err(BitfieldError::IndexOutOfBounds {
                index: b,
                size: self.size,
            })
        }
    }

    /// Set bit at position `b` to 1.
    ///
    /// # Panics
    ///
    /// Panics if `b >= size`.
    #[inline]
    pub fn set_bit(&mut self, b: usize) {
        assert!(b < self.size, "bit index {} out of bounds (size: {})", b, self.size);
        self.words[get_word_idx(b)] |= bit_mask(b);
    }

    /// Clear bit at position `b` (set to 0).
    ///
    /// # Panics
    ///
    /// Panics if `b >= size`.
    #[inline]
    pub fn clear_bit(&mut self, b: usize) {
        assert!(b < self.size, "bit index {} out of bounds (size: {})", b, self.size);
        self.words[get_word_idx(b)] &= !bit_mask(b);
    }

    // =========================================================================
    // Bulk Operations
    // =========================================================================

    /// Set all bits to 1.
    pub fn set_all(&mut self) {
        self.words.fill(WORD_MAX);
        self.clear_padding();
    }

    /// Clear all bits to 0.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Release storage and set size to 0.
    pub fn clear(&mut self) {
        if self.words.capacity() > 0 {
            log::trace!("releasing bitfield storage ({} bits)", self.size);
        }
        self.words = Vec::new();
        self.size = 0;
    }

    /// Replace the contents with the first `n` bits of a wire-format buffer.
    ///
    /// The existing buffer is reused when it holds exactly the needed number
    /// of words; otherwise it is reallocated to that exact size. Assigning
    /// zero bits releases the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` holds fewer than `n` bits.
    pub fn assign(&mut self, bytes: &[u8], n: usize) {
        assert!(
            n <= bytes.len() * 8,
            "cannot take {} bits from {} bytes",
            n,
            bytes.len()
        );

        if n == 0 {
            self.clear();
            return;
        }

        let num_words = words_for(n);
        if num_words == self.words.capacity() {
            self.words.clear();
        } else {
            log::trace!(
                "reallocating bitfield storage from {} to {} words",
                self.words.capacity(),
                num_words
            );
            self.words = Vec::with_capacity(num_words);
        }

        self.words.extend(bytes[..bytes_for(n)].chunks(4).map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            Word::from_ne_bytes(word)
        }));
        self.size = n;
        self.clear_padding();
    }

    /// Checked variant of [`assign`](Self::assign).
    ///
    /// On error the bitfield is left unchanged.
    pub fn try_assign(&mut self, bytes: &[u8], n: usize) -> Result<()> {
        if n > bytes.len() * 8 {
            return Err(BitfieldError::NotEnoughBytes {
                bits: n,
                available: bytes.len() * 8,
            });
        }
        self.assign(bytes, n);
        Ok(())
    }

    /// Resize the bitfield to contain `n` bits.
    ///
    /// Bits below the old size are kept. When growing, every new bit is set
    /// to `fill`, including bits that used to be padding in the old last
    /// word. When shrinking, bits past `n` are discarded.
    ///
    /// Storage is reallocated only when the word count changes, and exactly
    /// to the needed size.
    ///
    /// # Examples
    ///
    /// ```
    /// use torrent_bitfield::Bitfield;
    ///
    /// let mut have = Bitfield::with_size(2, false);
    /// have.set_bit(0);
    /// have.resize(16, true);
    /// assert_eq!(have.count(), 15);
    /// assert!(!have.get_bit(1));
    /// ```
    pub fn resize(&mut self, n: usize, fill: bool) {
        if n == self.size {
            return;
        }
        if n == 0 {
            self.clear();
            return;
        }

        if fill && n > self.size {
            let tail = get_bit_idx(self.size);
            if tail != 0 {
                if let Some(last) = self.words.last_mut() {
                    *last |= !bitmask(tail);
                }
            }
        }

        let num_words = words_for(n);
        let old_words = self.words.len();
        if num_words != old_words {
            log::trace!(
                "resizing bitfield storage from {} to {} words",
                old_words,
                num_words
            );
            if num_words > old_words {
                self.words.reserve_exact(num_words - old_words);
                self.words.resize(num_words, if fill { WORD_MAX } else { 0 });
            } else {
                self.words.truncate(num_words);
                self.words.shrink_to_fit();
            }
        }

        self.size = n;
        self.clear_padding();
    }

    /// Zero the bits of the last word past `size`.
    #[inline]
    fn clear_padding(&mut self) {
        let tail = get_bit_idx(self.size);
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= bitmask(tail);
            }
        }
    }

    // =========================================================================
    // Counting Operations
    // =========================================================================

    /// Count number of set bits (population count).
    #[inline]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// `true` if every valid bit is set.
    ///
    /// An empty bitfield is not considered all set.
    pub fn all_set(&self) -> bool {
        match self.words.split_last() {
            None => false,
            Some((last, full)) => {
                let tail = self.size - full.len() * BITS_PER_WORD;
                full.iter().all(|&w| w == WORD_MAX) && *last == bitmask(tail)
            }
        }
    }

    /// `true` if no bit is set. Holds for an empty bitfield.
    pub fn none_set(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    // =========================================================================
    // Search Operations
    // =========================================================================

    /// Index of the lowest set bit, or `None` if no bit is set.
    pub fn find_first_set(&self) -> Option<usize> {
        let word_idx = self.words.iter().position(|&w| w != 0)?;
        let word = Word::from_be(self.words[word_idx]);
        Some(word_idx * BITS_PER_WORD + word.leading_zeros() as usize)
    }

    /// Index of the highest clear bit, or `None` if every bit is set.
    pub fn find_last_clear(&self) -> Option<usize> {
        let last_idx = self.words.len().checked_sub(1)?;
        let tail = self.size - last_idx * BITS_PER_WORD;

        for (word_idx, &w) in self.words.iter().enumerate().rev() {
            let mut word = Word::from_be(w);
            if word_idx == last_idx && tail < BITS_PER_WORD {
                // padding counts as set so it is never reported
                word |= WORD_MAX >> tail;
            }
            if word != WORD_MAX {
                let offset = (BITS_PER_WORD - 1) - (!word).trailing_zeros() as usize;
                return Some(word_idx * BITS_PER_WORD + offset);
            }
        }

        None
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Iterate over every bit in index order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        self.begin().to(self.end())
    }

    /// Cursor at bit 0.
    #[inline]
    pub fn begin(&self) -> BitCursor<'_> {
        BitCursor::new(&self.words, self.size, 0)
    }

    /// Cursor one past the last bit.
    #[inline]
    pub fn end(&self) -> BitCursor<'_> {
        BitCursor::new(&self.words, self.size, self.size)
    }
}

impl<'a> IntoIterator for &'a Bitfield {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<bool> for Bitfield {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut field = Self::new();
        field.words.reserve_exact(words_for(iter.size_hint().0));
        for bit in iter {
            if get_bit_idx(field.size) == 0 {
                field.words.push(0);
            }
            if bit {
                field.words[get_word_idx(field.size)] |= bit_mask(field.size);
            }
            field.size += 1;
        }
        field.words.shrink_to_fit();
        field
    }
}

impl Index<usize> for Bitfield {
    type Output = bool;

    #[inline]
    fn index(&self, b: usize) -> &bool {
        if self.get_bit(b) {
            &true
        } else {
            &false
        }
    }
}

// =============================================================================
// Comparison and Formatting
// =============================================================================

impl PartialEq for Bitfield {
    /// Compare size and bits using word-level comparison.
    ///
    /// Padding is always zero, so equal bits imply equal words.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.words == other.words
    }
}

impl Eq for Bitfield {}

impl Hash for Bitfield {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.words.hash(state);
    }
}

impl fmt::Display for Bitfield {
    /// Bits as a string of `0` and `1`, index 0 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bitfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitfield")
            .field("size", &self.size)
            .field("bits", &format_args!("{}", self))
            .finish()
    }
}
