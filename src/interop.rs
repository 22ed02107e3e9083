//! Conversions to and from `bitvec`.
//!
//! `bitvec`'s `Msb0` ordering over `u8` is the same MSB-first layout the
//! wire format uses, so a [`Bitfield`] can be viewed as a
//! `BitSlice<u8, Msb0>` without copying. This gives callers the full
//! `bitvec` toolbox (iteration over set indices, range slicing, bitwise
//! combination) on top of the packed piece storage.

use bitvec::prelude::*;

use crate::bitfield::Bitfield;

impl Bitfield {
    /// Zero-copy `bitvec` view of the valid bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use torrent_bitfield::Bitfield;
    ///
    /// let have = Bitfield::from_bytes(&[0x08, 0x10], 14);
    /// let set: Vec<usize> = have.as_bitslice().iter_ones().collect();
    /// assert_eq!(set, vec![4, 11]);
    /// ```
    #[inline]
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.as_bytes().view_bits::<Msb0>()[..self.size()]
    }
}

impl From<&BitSlice<u8, Msb0>> for Bitfield {
    fn from(bits: &BitSlice<u8, Msb0>) -> Self {
        bits.iter().by_vals().collect()
    }
}

impl From<&Bitfield> for BitVec<u8, Msb0> {
    fn from(field: &Bitfield) -> Self {
        field.as_bitslice().to_bitvec()
    }
}
