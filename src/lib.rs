//! # mvdcc
//!
//! A deterministic, partition-based multi-version concurrency-control
//! core. Given a fixed table of versioned tuples and a fixed,
//! timestamp-dense transaction log, it assigns each write to exactly one
//! owning worker, installs placeholder versions in timestamp order, and
//! emits every processed transaction onto a single timestamp-ordered ready
//! queue for an external execution phase to pick up.
//!
//! Two ownership strategies are provided:
//!
//! - **Bohm**: static `key % thread_count` partitioning, lock-free lookup.
//! - **Gato**: adaptive partitioning under one mapping mutex, with
//!   load-triggered single-key migration between workers.
//!
//! # Quick Start
//!
//! ```no_run
//! use mvdcc::{Engine, EngineConfig, Table, Task, Transaction};
//!
//! fn main() -> mvdcc::Result<()> {
//!     let config = EngineConfig {
//!         thread_count: 4,
//!         tuple_count: 100,
//!         batch_size: 10,
//!         ..EngineConfig::default()
//!     };
//!
//!     let table = Table::new(config.tuple_count);
//!     let transactions: Vec<Transaction> = (0..50)
//!         .map(|ts| Transaction::new(ts, vec![Task::write(ts % 100)]))
//!         .collect();
//!
//!     let engine = Engine::new_bohm(config, table, transactions)?;
//!     let commit_counts = engine.run_to_completion();
//!     println!("committed {} transactions total", commit_counts.iter().sum::<u64>());
//!
//!     for tx in engine.drain_ready_queue() {
//!         // hand `tx` to the execution phase: run its task set, then
//!         // call `engine.fill_placeholder(key, tx.timestamp, value)` for
//!         // each key it wrote.
//!         let _ = tx;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Crate layout
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | `mvdcc-core` | data model: `Task`, `Transaction`, `EngineConfig`, `Error` |
//! | `mvdcc-concurrency` | the versioned store, both partitioning strategies, the batch dispatcher, the ready queue, the CC worker loops, and the `Engine` orchestrator |
//!
//! Only the re-exports below are part of this crate's stable surface.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use mvdcc_concurrency::{
    AdaptivePartition, BatchDispatcher, Engine, Migration, ReadyQueue, StaticPartition, Table,
    Version,
};
pub use mvdcc_core::{EngineConfig, Error, Op, Result, Task, Transaction};
