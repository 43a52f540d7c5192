//! Batch dispatcher (spec §4.4, component C4)
//!
//! A single atomic cursor partitions the transaction log into contiguous
//! batches of at most `batch_size` transactions. The cursor alone prevents
//! two workers from claiming the same transaction; there is no backpressure.

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

/// Claims contiguous `[start, end)` slices of a transaction log of length
/// `log_len`, at most `batch_size` transactions at a time.
pub struct BatchDispatcher {
    cursor: AtomicU64,
    batch_size: u64,
    log_len: u64,
}

impl BatchDispatcher {
    /// Build a dispatcher over a log of `log_len` transactions.
    pub fn new(log_len: u64, batch_size: u64) -> Self {
        assert!(batch_size > 0, "batch_size must be positive");
        BatchDispatcher {
            cursor: AtomicU64::new(0),
            batch_size,
            log_len,
        }
    }

    /// Atomically claim the next batch. Returns `None` once the log is
    /// exhausted (`start >= log_len`).
    ///
    /// Uses `SeqCst` fetch-add, matching the source's `__ATOMIC_SEQ_CST`
    /// choice — the dispatcher is not a hot enough path that a weaker
    /// ordering is worth reasoning about separately from `start`/`quit`.
    pub fn claim_batch(&self) -> Option<Range<u64>> {
        let start = self.cursor.fetch_add(self.batch_size, Ordering::SeqCst);
        if start >= self.log_len {
            return None;
        }
        let end = (start + self.batch_size).min(self.log_len);
        Some(start..end)
    }

    /// Current cursor value, for tests and diagnostics (spec property 9:
    /// final `tx_cursor <= W * B` after quit).
    pub fn cursor(&self) -> u64 {
        self.cursor.load(Ordering::SeqCst)
    }
}
