//! CC worker loops (spec §4.5 Bohm/C5, §4.6 Gato/C6) and shutdown flags
//! (component of §4.4/§5).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use mvdcc_core::Transaction;
use tracing::trace;

use crate::dispatcher::BatchDispatcher;
use crate::partition::{AdaptivePartition, StaticPartition};
use crate::ready_queue::ReadyQueue;
use crate::store::Table;

/// Lock-free `start`/`quit` control flags shared by all workers (spec §4.4,
/// §5). Both use `SeqCst` ordering — this is not a hot path compared to the
/// dispatcher cursor, and `SeqCst` is the ordering the spec's source
/// explicitly calls for.
#[derive(Default)]
pub struct ShutdownFlags {
    start: AtomicBool,
    quit: AtomicBool,
}

impl ShutdownFlags {
    /// Construct flags in the "not started, not quitting" state.
    pub fn new() -> Self {
        ShutdownFlags {
            start: AtomicBool::new(false),
            quit: AtomicBool::new(false),
        }
    }

    /// Spin until `start` is observed true.
    pub fn wait_for_start(&self) {
        while !self.start.load(Ordering::SeqCst) {
            std::hint::spin_loop();
        }
    }

    /// Flip `start` to true, releasing every spinning worker.
    pub fn begin(&self) {
        self.start.store(true, Ordering::SeqCst);
    }

    /// Flip `quit` to true. Workers finish their in-flight batch and stop
    /// claiming new ones; already-claimed batches run to completion.
    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::SeqCst);
    }

    /// Whether a worker should stop claiming new batches.
    pub fn should_quit(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }
}

/// Clone the log slice `range` into a local, owned batch.
fn clone_batch(transactions: &[Transaction], range: std::ops::Range<u64>) -> Vec<Transaction> {
    transactions[range.start as usize..range.end as usize].to_vec()
}

/// Run one Bohm (static-partition) CC worker to completion.
///
/// Returns the number of transactions this worker placed on the ready
/// queue (its commit count, spec §4.8). Per spec §9 Q2, this counts every
/// claimed transaction — the `is_success` flag in the source is initialized
/// true and never cleared, so the Bohm commit counter is a throughput
/// metric, not a serializability verdict.
///
/// `processed` is bumped by each batch's length right after the batch is
/// pushed to `ready_queue`, so a caller polling it can tell when every
/// transaction up to the log length has actually been queued — the
/// dispatcher's own cursor overshoots `log_len` as soon as any worker
/// claims past the end, well before that worker's in-flight batch (which
/// may still be the last *real* one) finishes processing.
pub fn run_bohm_worker(
    worker_id: usize,
    table: &Table,
    dispatcher: &BatchDispatcher,
    partition: &StaticPartition,
    ready_queue: &ReadyQueue,
    flags: &ShutdownFlags,
    transactions: &[Transaction],
    processed: &AtomicU64,
) -> u64 {
    flags.wait_for_start();
    let mut commits = 0u64;

    loop {
        if flags.should_quit() {
            break;
        }
        let Some(range) = dispatcher.claim_batch() else {
            if flags.should_quit() {
                break;
            }
            std::thread::yield_now();
            continue;
        };

        let mut local_batch = clone_batch(transactions, range);
        local_batch.sort_by_key(|tx| tx.timestamp);

        for tx in &mut local_batch {
            for task in &tx.task_set {
                if task.is_write() && partition.is_owner(worker_id, task.key) {
                    table
                        .install_placeholder(task.key, tx.timestamp)
                        .expect("partition ownership guarantees key is in range");
                    tx.write_set.push(task.key);
                }
            }
        }

        let batch_len = local_batch.len() as u64;
        commits += batch_len;
        trace!(worker_id, batch_len, "bohm batch processed");
        ready_queue.push_batch(local_batch);
        processed.fetch_add(batch_len, Ordering::Release);
    }

    commits
}

/// Run one Gato (adaptive-partition) CC worker to completion.
///
/// Resolves spec §9 Open Question Q1 by sorting the local batch ascending
/// by timestamp, exactly like the Bohm worker, so the per-key
/// strictly-increasing placeholder-timestamp invariant holds even when
/// ownership migrates mid-run.
pub fn run_gato_worker(
    worker_id: usize,
    table: &Table,
    dispatcher: &BatchDispatcher,
    partition: &AdaptivePartition,
    ready_queue: &ReadyQueue,
    flags: &ShutdownFlags,
    transactions: &[Transaction],
    load_imbalance_threshold: u64,
    processed: &AtomicU64,
) -> u64 {
    flags.wait_for_start();
    let mut commits = 0u64;

    loop {
        if flags.should_quit() {
            break;
        }
        let Some(range) = dispatcher.claim_batch() else {
            if flags.should_quit() {
                break;
            }
            std::thread::yield_now();
            continue;
        };

        let mut local_batch = clone_batch(transactions, range);
        local_batch.sort_by_key(|tx| tx.timestamp);
        let batch_len = local_batch.len() as u64;

        for tx in &mut local_batch {
            let mut success = true;
            for task in &tx.task_set {
                match partition.owner(task.key) {
                    None => {
                        // Unknown key: spec §7 — treat as a transaction
                        // failure for commit-counting purposes, but mutate
                        // no placeholder state and surface no error.
                        success = false;
                    }
                    Some(owner) if owner != worker_id => {
                        // Owned by someone else; nothing to do here.
                    }
                    Some(_) => {
                        if task.is_write() {
                            partition.record_write(task.key, worker_id);
                            table
                                .install_placeholder(task.key, tx.timestamp)
                                .expect("owned key is guaranteed in range");
                            tx.write_set.push(task.key);
                        }
                    }
                }
            }
            if success {
                commits += 1;
            }
        }

        trace!(worker_id, batch_len, "gato batch processed");
        ready_queue.push_batch(local_batch);
        processed.fetch_add(batch_len, Ordering::Release);

        if let Some(migration) =
            partition.account_batch_and_maybe_migrate(worker_id, batch_len, load_imbalance_threshold)
        {
            trace!(
                worker_id,
                key = migration.key,
                src = migration.src,
                dst = migration.dst,
                "load-triggered migration"
            );
        }
    }

    commits
}
