//! Engine orchestrator (spec §4.8, wiring all of C1–C7)
//!
//! Owns the versioned store, the transaction log, the chosen partitioning
//! strategy, the batch dispatcher and the ready queue, and drives a fixed
//! pool of named CC worker threads — the same `Arc<Inner>` plus
//! `thread::Builder::new().name(...)` shape as the background scheduler.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use mvdcc_core::{EngineConfig, Transaction};
use parking_lot::Mutex;

use crate::dispatcher::BatchDispatcher;
use crate::partition::{AdaptivePartition, StaticPartition};
use crate::ready_queue::ReadyQueue;
use crate::store::Table;
use crate::worker::{run_bohm_worker, run_gato_worker, ShutdownFlags};

enum Partitioning {
    Static(StaticPartition),
    Adaptive(AdaptivePartition),
}

impl Partitioning {
    fn thread_name_prefix(&self) -> &'static str {
        match self {
            Partitioning::Static(_) => "mvdcc-bohm",
            Partitioning::Adaptive(_) => "mvdcc-gato",
        }
    }
}

struct Shared {
    table: Table,
    dispatcher: BatchDispatcher,
    ready_queue: ReadyQueue,
    flags: ShutdownFlags,
    transactions: Vec<Transaction>,
    partitioning: Partitioning,
    load_imbalance_threshold: u64,
    /// Transactions actually pushed to `ready_queue` so far, across all
    /// workers. Unlike the dispatcher cursor (which overshoots `log_len`
    /// the moment any worker claims past the end), this only advances once
    /// a batch has truly been queued — see [`Engine::run_to_completion`].
    processed: AtomicU64,
}

/// Drives a fixed pool of CC worker threads over a fixed transaction log
/// (spec §4.8, component C8 "Result Aggregator" folded in as `join`).
pub struct Engine {
    shared: Arc<Shared>,
    worker_count: usize,
    workers: Mutex<Vec<JoinHandle<u64>>>,
}

/// Check that `transactions[i].timestamp == i` for every `i` (spec §6).
///
/// A dense, index-equal timestamp log is the CORE's only notion of
/// transaction identity; a caller that builds one otherwise has a bug, not
/// a recoverable runtime condition, so this is checked once at
/// construction rather than on every access.
fn validate_log(transactions: &[Transaction]) -> mvdcc_core::Result<()> {
    for (index, tx) in transactions.iter().enumerate() {
        let index = index as u64;
        if tx.timestamp != index {
            return Err(mvdcc_core::Error::TimestampNotDense {
                index,
                timestamp: tx.timestamp,
            });
        }
    }
    Ok(())
}

impl Engine {
    /// Build an engine using the static (Bohm) partitioning strategy over
    /// an externally-built table and transaction log.
    pub fn new_bohm(
        config: EngineConfig,
        table: Table,
        transactions: Vec<Transaction>,
    ) -> mvdcc_core::Result<Self> {
        validate_log(&transactions)?;
        let log_len = transactions.len() as u64;
        let shared = Arc::new(Shared {
            table,
            dispatcher: BatchDispatcher::new(log_len, config.batch_size),
            ready_queue: ReadyQueue::new(),
            flags: ShutdownFlags::new(),
            partitioning: Partitioning::Static(StaticPartition::new(config.thread_count)),
            load_imbalance_threshold: config.load_imbalance_threshold(),
            transactions,
            processed: AtomicU64::new(0),
        });
        Ok(Engine {
            shared,
            worker_count: config.thread_count,
            workers: Mutex::new(Vec::new()),
        })
    }

    /// Build an engine using the adaptive (Gato) partitioning strategy over
    /// an externally-built table and transaction log.
    pub fn new_gato(
        config: EngineConfig,
        table: Table,
        transactions: Vec<Transaction>,
    ) -> mvdcc_core::Result<Self> {
        validate_log(&transactions)?;
        let log_len = transactions.len() as u64;
        let shared = Arc::new(Shared {
            table,
            dispatcher: BatchDispatcher::new(log_len, config.batch_size),
            ready_queue: ReadyQueue::new(),
            flags: ShutdownFlags::new(),
            partitioning: Partitioning::Adaptive(AdaptivePartition::new(
                config.thread_count,
                config.tuple_count,
            )),
            load_imbalance_threshold: config.load_imbalance_threshold(),
            transactions,
            processed: AtomicU64::new(0),
        });
        Ok(Engine {
            shared,
            worker_count: config.thread_count,
            workers: Mutex::new(Vec::new()),
        })
    }

    /// Number of transactions in this engine's fixed log.
    pub fn log_len(&self) -> u64 {
        self.shared.transactions.len() as u64
    }

    /// Spawn `thread_count` named worker threads, then release them with
    /// the `start` flag. Workers spin until this call completes, so no
    /// transaction can be claimed before every thread has been spawned.
    pub fn start(&self) {
        let mut workers = self.workers.lock();
        let prefix = self.shared.partitioning.thread_name_prefix();
        for id in 0..self.worker_count {
            let shared = Arc::clone(&self.shared);
            let handle = std::thread::Builder::new()
                .name(format!("{prefix}-{id}"))
                .spawn(move || match &shared.partitioning {
                    Partitioning::Static(partition) => run_bohm_worker(
                        id,
                        &shared.table,
                        &shared.dispatcher,
                        partition,
                        &shared.ready_queue,
                        &shared.flags,
                        &shared.transactions,
                        &shared.processed,
                    ),
                    Partitioning::Adaptive(partition) => run_gato_worker(
                        id,
                        &shared.table,
                        &shared.dispatcher,
                        partition,
                        &shared.ready_queue,
                        &shared.flags,
                        &shared.transactions,
                        shared.load_imbalance_threshold,
                        &shared.processed,
                    ),
                })
                .expect("failed to spawn CC worker thread");
            workers.push(handle);
        }
        self.shared.flags.begin();
    }

    /// Signal every worker to stop claiming new batches. In-flight batches
    /// still run to completion.
    pub fn quit(&self) {
        self.shared.flags.request_quit();
    }

    /// Join every worker thread, returning each one's commit count in
    /// worker-id order. Panics if a worker thread panicked — the source
    /// has no recovery path for a worker crash, and neither does this.
    pub fn join(&self) -> Vec<u64> {
        let mut workers = self.workers.lock();
        workers
            .drain(..)
            .map(|handle| handle.join().expect("CC worker thread panicked"))
            .collect()
    }

    /// Run the whole fixed log to completion: start workers, wait for
    /// every transaction to be queued, signal quit, and join.
    ///
    /// This is the log-bounded test harness called for in spec §9's
    /// resolution of Open Question Q3 — the source's drivers are
    /// time-bounded (`EX_TIME` seconds of wall clock), which would make
    /// this crate's tests nondeterministic; a fixed, finite log lets the
    /// harness instead wait for an exact completion condition.
    pub fn run_to_completion(&self) -> Vec<u64> {
        self.start();
        let log_len = self.log_len();
        while self.shared.processed.load(Ordering::Acquire) < log_len {
            std::thread::yield_now();
        }
        self.quit();
        self.join()
    }

    /// Drain every transaction currently on the ready queue, in ascending
    /// timestamp order (spec §9 Q4: the CORE never drains its own queue).
    pub fn drain_ready_queue(&self) -> Vec<Transaction> {
        self.shared.ready_queue.drain()
    }

    /// Read the value visible for `key` as of snapshot timestamp `ts`.
    pub fn read_as_of(&self, key: u64, ts: u64) -> mvdcc_core::Result<Option<u64>> {
        self.shared.table.read_as_of(key, ts)
    }

    /// Fill a previously-installed placeholder, as the out-of-scope
    /// execution phase would after actually running a transaction's logic.
    pub fn fill_placeholder(&self, key: u64, ts: u64, value: u64) -> mvdcc_core::Result<bool> {
        self.shared.table.fill_placeholder(key, ts, value)
    }
}
