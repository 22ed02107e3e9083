//! Error types for checked bitfield operations.
//!
//! Contract violations (an out-of-range index, a byte source that is too
//! short) panic in the unchecked API. Code that handles sizes coming off the
//! wire can use the `try_*` entry points instead, which report the same
//! conditions through [`BitfieldError`].

use thiserror::Error;

/// The error type for checked bitfield operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitfieldError {
    /// Bit index is not below the bitfield size
    #[error("Index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds {
        /// The index that was accessed
        index: usize,
        /// The number of valid bits
        size: usize,
    },

    /// Byte source holds fewer bits than requested
    #[error("Not enough bytes: {bits} bits requested, source holds {available}")]
    NotEnoughBytes {
        /// Number of bits requested
        bits: usize,
        /// Number of bits the source provides (8 per byte)
        available: usize,
    },
}

/// A specialized `Result` type for checked bitfield operations.
pub type Result<T> = std::result::Result<T, BitfieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BitfieldError::IndexOutOfBounds { index: 10, size: 10 };
        assert_eq!(err.to_string(), "Index out of bounds: index 10, size 10");

        let err = BitfieldError::NotEnoughBytes {
            bits: 20,
            available: 16,
        };
        assert_eq!(
            err.to_string(),
            "Not enough bytes: 20 bits requested, source holds 16"
        );
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<usize> {
            Ok(42)
        }

        assert_eq!(returns_result().unwrap(), 42);
    }
}
