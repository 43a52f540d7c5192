//! Core types for the MVDCC concurrency-control engine
//!
//! This crate defines the data model shared by both the Bohm (static
//! partition) and Gato (adaptive partition) concurrency-control variants:
//! - `Op`/`Task`: a single read or write against a dense integer key space
//! - `Transaction`: a timestamp-identified task set plus read/write sets
//! - `EngineConfig`: the frozen default tuning constants for a run
//! - `Error`: the crate's error hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod task;
pub mod transaction;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use task::{Op, Task};
pub use transaction::Transaction;
