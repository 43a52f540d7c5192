//! Tuning constants for an engine run
//!
//! This module defines the configuration surface a caller uses to size a
//! run: thread count, table size, per-transaction operation bound, batch
//! size, and retry budget.
//!
//! ## Contract
//!
//! The defaults here mirror the source configuration (`config.hpp`):
//! `thread_count = 8`, `tuple_count = 1000`, `max_ope = 10`, `batch_size =
//! 50`, `max_retry = 10`. They are frozen in the sense that changing them
//! changes observed throughput and scheduling behavior, not correctness —
//! any value is accepted, but callers relying on the historical defaults for
//! benchmarking should pin them explicitly rather than depend on `Default`.

/// Tuning constants for one engine run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of CC worker threads (W)
    pub thread_count: usize,

    /// Number of tuples in the table (M)
    pub tuple_count: usize,

    /// Maximum tasks per transaction (MAX_OPE)
    ///
    /// Not enforced by the CORE itself — it bounds the external workload
    /// generator's task sets. Carried here because it is part of the run's
    /// configuration surface.
    pub max_ope: usize,

    /// Contiguous transaction-log slice size claimed per batch (B)
    pub batch_size: u64,

    /// Retry budget for the (external) execution phase
    ///
    /// Unused by CC itself — see spec §7. Carried so that a single
    /// `EngineConfig` value describes the whole run.
    pub max_retry: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            thread_count: 8,
            tuple_count: 1000,
            max_ope: 10,
            batch_size: 50,
            max_retry: 10,
        }
    }
}

impl EngineConfig {
    /// Load-imbalance threshold θ used by the Gato variant's redistribution
    /// policy: `max(load) - min(load) > theta` triggers a migration.
    ///
    /// Spec §4.6 suggests `B / W`; we floor it at 1 so a run with `W >= B`
    /// still has a meaningful (non-zero) threshold.
    pub fn load_imbalance_threshold(&self) -> u64 {
        let w = self.thread_count.max(1) as u64;
        (self.batch_size / w).max(1)
    }
}
