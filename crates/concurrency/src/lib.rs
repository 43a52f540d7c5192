//! Concurrency control for mvdcc
//!
//! This crate implements both concurrency-control variants over the CORE's
//! versioned store:
//! - `store`: the versioned tuple table and its per-key placeholder chains
//! - `partition`: static (Bohm) and adaptive (Gato) key-to-worker mappings
//! - `dispatcher`: the atomic batch cursor over a fixed transaction log
//! - `ready_queue`: the timestamp-ordered output boundary
//! - `worker`: the Bohm and Gato CC worker loops, plus shutdown flags
//! - `engine`: the orchestrator wiring all of the above into a worker pool

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dispatcher;
pub mod engine;
pub mod partition;
pub mod ready_queue;
pub mod store;
pub mod worker;

pub use dispatcher::BatchDispatcher;
pub use engine::Engine;
pub use partition::{AdaptivePartition, Migration, StaticPartition};
pub use ready_queue::ReadyQueue;
pub use store::{Chain, Table, Version};
pub use worker::{run_bohm_worker, run_gato_worker, ShutdownFlags};
