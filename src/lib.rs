//! torrent-bitfield - Packed piece bitfields for BitTorrent peers
//!
//! A peer tells the swarm which pieces it holds with a `bitfield` message: one
//! bit per piece, most significant bit first within each byte. This crate
//! provides the in-memory structure behind that message: a resizable bit
//! vector packed into 32-bit words whose buffer is byte-for-byte the wire
//! payload.
//!
//! # Key Characteristics
//!
//! - Wire-exact layout: [`Bitfield::as_bytes`] is the message payload
//! - Word-level `count`, `all_set`, `find_first_set` and `find_last_clear`
//! - Resize with a fill value; padding bits are always kept clear
//! - Random-access cursors for scanning piece ranges without copying
//! - [`TypedBitfield`] for addressing bits by a domain index such as
//!   [`PieceIndex`]
//!
//! # Examples
//!
//! ## Basic Bitfield Usage
//!
//! ```
//! use torrent_bitfield::Bitfield;
//!
//! // payload of a peer's bitfield message for a 14 piece torrent
//! let mut have = Bitfield::from_bytes(&[0x08, 0x10], 14);
//! assert_eq!(have.count(), 2);
//! assert_eq!(have.find_first_set(), Some(4));
//!
//! // the peer later announces piece 0
//! have.set_bit(0);
//! assert_eq!(have.as_bytes(), &[0x88, 0x10]);
//! assert_eq!(have.find_last_clear(), Some(13));
//! ```
//!
//! ## Typed Piece Indices
//!
//! ```
//! use torrent_bitfield::{PieceIndex, TypedBitfield};
//!
//! let mut have: TypedBitfield<PieceIndex> = TypedBitfield::with_size(16, true);
//! have.clear_bit(PieceIndex(9));
//!
//! let wanted: Vec<PieceIndex> = have.range().filter(|&p| !have[p]).collect();
//! assert_eq!(wanted, vec![PieceIndex(9)]);
//! ```
//!
//! # Safety
//!
//! Out-of-range indices are caller bugs and panic through `assert!` in every
//! build profile. Sizes received from the network should go through the
//! `try_*` constructors, which report [`BitfieldError`] instead.
//!
//! # Concurrency
//!
//! Bitfields are plain owned values: `Send` and `Sync`, with no internal
//! locking. Share one behind a lock when several tasks update it.

// Module declarations
pub mod bitfield;
pub mod error;
pub mod interop;
pub mod iter;
pub mod typed;

mod serdes;

// Re-exports for convenient access
pub use bitfield::{Bitfield, Word, BITS_PER_WORD};
pub use error::{BitfieldError, Result};
pub use iter::{BitCursor, Iter};
pub use typed::{BitIndex, IndexRange, PieceIndex, TypedBitfield};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
