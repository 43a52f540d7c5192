//! Error types for the MVDCC core crate
//!
//! This module defines the failure modes that are programming errors rather
//! than recoverable runtime conditions (see spec §7: the CORE has no
//! recoverable errors on its happy path). We still use `thiserror` for a
//! proper `Display`/`Error` implementation rather than bare strings, matching
//! the rest of the ambient error-handling stack.

use thiserror::Error as ThisError;

/// Result type alias for MVDCC core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the MVDCC core crate
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum Error {
    /// A key fell outside the dense `[0, bound)` key space.
    ///
    /// The key space is dense and bounded by construction; this is a
    /// programming error in the caller, not a transient condition.
    #[error("key {key} out of range: table holds keys [0, {bound})")]
    KeyOutOfRange {
        /// The offending key
        key: u64,
        /// The exclusive upper bound of the valid key space (table size)
        bound: u64,
    },

    /// A transaction log did not satisfy `timestamp == index`.
    #[error("transaction at index {index} has timestamp {timestamp}, expected {index}")]
    TimestampNotDense {
        /// Position in the log
        index: u64,
        /// The timestamp actually found there
        timestamp: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_out_of_range_display() {
        let err = Error::KeyOutOfRange { key: 42, bound: 10 };
        let msg = err.to_string();
        assert!(msg.contains("key 42"));
        assert!(msg.contains("[0, 10)"));
    }

    #[test]
    fn timestamp_not_dense_display() {
        let err = Error::TimestampNotDense {
            index: 3,
            timestamp: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("index 3"));
        assert!(msg.contains("timestamp 7"));
    }
}
