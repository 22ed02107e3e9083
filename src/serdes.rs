//! `serde` support.
//!
//! A [`Bitfield`] serializes as its size plus the wire-format bytes:
//!
//! ```json
//! { "bits": 10, "bytes": [144, 64] }
//! ```
//!
//! Deserialization goes through [`Bitfield::try_from_bytes`], so a byte
//! array too short for `bits` is rejected instead of panicking. Spare bits in
//! the last byte are dropped.

#![cfg(feature = "serde")]

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bitfield::Bitfield;
use crate::error::BitfieldError;
use crate::typed::TypedBitfield;

/// Serialized form of a [`Bitfield`].
#[derive(Serialize, Deserialize)]
pub(crate) struct WireBitfield {
    bits: usize,
    bytes: Vec<u8>,
}

impl From<Bitfield> for WireBitfield {
    fn from(field: Bitfield) -> Self {
        Self {
            bits: field.size(),
            bytes: field.to_bytes(),
        }
    }
}

impl TryFrom<WireBitfield> for Bitfield {
    type Error = BitfieldError;

    fn try_from(wire: WireBitfield) -> Result<Self, Self::Error> {
        Bitfield::try_from_bytes(&wire.bytes, wire.bits)
    }
}

impl<T> Serialize for TypedBitfield<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bitfield().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for TypedBitfield<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Bitfield::deserialize(deserializer).map(Self::from)
    }
}
