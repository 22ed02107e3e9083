//! Integration tests for TypedBitfield and index ranges.

use proptest::prelude::*;
use torrent_bitfield::{Bitfield, BitIndex, PieceIndex, TypedBitfield};

#[test]
fn test_bitfield_index_range() {
    let b1: TypedBitfield<i32> = TypedBitfield::with_size(16, false);
    let mut sum = 0;
    for i in b1.range() {
        sum += i;
    }
    assert_eq!(sum, 15 * 16 / 2);
}

#[test]
fn test_piece_range_order() {
    let have: TypedBitfield<PieceIndex> = TypedBitfield::with_size(4, false);
    let pieces: Vec<PieceIndex> = have.range().collect();
    assert_eq!(
        pieces,
        vec![PieceIndex(0), PieceIndex(1), PieceIndex(2), PieceIndex(3)]
    );
    assert_eq!(have.range().len(), 4);
    assert_eq!(have.range().nth(2), Some(PieceIndex(2)));
    assert_eq!(have.range().last(), Some(PieceIndex(3)));
}

#[test]
fn test_delegates_bit_operations() {
    let mut have: TypedBitfield<PieceIndex> = TypedBitfield::new();
    assert!(have.is_empty());
    assert!(have.none_set());
    assert!(!have.all_set());
    assert!(have.data().is_none());

    have.resize(20, true);
    assert_eq!(have.size(), 20);
    assert_eq!(have.num_words(), 1);
    assert_eq!(have.num_bytes(), 3);
    assert!(have.all_set());

    have.clear_bit(PieceIndex(5));
    have.clear_bit(PieceIndex(17));
    assert_eq!(have.count(), 18);
    assert_eq!(have.find_last_clear(), Some(PieceIndex(17)));
    assert_eq!(have.find_first_set(), Some(PieceIndex(0)));
    assert!(!have[PieceIndex(5)]);
    assert!(have.try_get_bit(PieceIndex(20)).is_err());

    have.clear_all();
    assert_eq!(have.find_first_set(), None);
    have.set_bit(PieceIndex(19));
    assert_eq!(have.find_first_set(), Some(PieceIndex(19)));
    assert_eq!(have.iter().filter(|&b| b).count(), 1);
    assert_eq!(have.end() - have.begin(), 20);

    have.set_all();
    assert_eq!(have.find_last_clear(), None);
    have.clear();
    assert!(have.is_empty());
}

#[test]
fn test_wire_import() {
    let mut have: TypedBitfield<PieceIndex> = TypedBitfield::from_bytes(&[0x08, 0x10], 14);
    let set: Vec<PieceIndex> = have.range().filter(|&p| have.get_bit(p)).collect();
    assert_eq!(set, vec![PieceIndex(4), PieceIndex(11)]);
    assert_eq!(have.as_bytes(), &[0x08, 0x10]);
    assert_eq!(have.to_bytes(), vec![0x08, 0x10]);

    have.assign(&[0xff], 3);
    assert_eq!(have.end_index(), PieceIndex(3));
    assert!(have.all_set());

    assert!(have.try_assign(&[0xff], 9).is_err());
    assert!(TypedBitfield::<PieceIndex>::try_from_bytes(&[], 1).is_err());
}

#[test]
fn test_view_shares_equality_with_bitfield() {
    let mut bits = Bitfield::with_size(33, false);
    bits.set_bit(32);

    let typed: TypedBitfield<u32> = bits.clone().into();
    assert_eq!(typed.bitfield(), &bits);
    assert_eq!(typed.clone(), typed);
    assert_eq!(Bitfield::from(typed), bits);
}

#[test]
fn test_index_conversions() {
    assert_eq!(PieceIndex::from_bit(12), PieceIndex(12));
    assert_eq!(PieceIndex(12).to_bit(), 12);
    assert_eq!(PieceIndex::from(5u32), PieceIndex(5));
    assert_eq!(PieceIndex(9).to_string(), "9");
    assert_eq!(i64::from_bit(7), 7);
    assert_eq!(7u64.to_bit(), 7);
}

proptest! {
    #[test]
    fn prop_range_covers_all_indices(n in 0..3000usize) {
        let view: TypedBitfield<u32> = TypedBitfield::with_size(n, false);
        let mut expected = 0u32;
        for i in view.range() {
            prop_assert_eq!(i, expected);
            expected += 1;
        }
        prop_assert_eq!(expected as usize, n);

        let sum: u64 = view.range().map(u64::from).sum();
        prop_assert_eq!(sum, (n as u64) * (n as u64).saturating_sub(1) / 2);
    }
}
