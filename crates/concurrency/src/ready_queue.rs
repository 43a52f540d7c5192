//! Ready queue (spec §4.7, component C7)
//!
//! A min-heap over transaction timestamp, guarded by a single mutex and
//! signaled by a condition variable — the CORE's sole output boundary.
//! Producers (CC workers) push a whole batch and notify once per batch, not
//! once per transaction (spec §4.5 step 5b). Consumption (the out-of-scope
//! execution phase) is not performed by the CORE; see [`ReadyQueue::drain`]
//! for the resolution of spec §9 Open Question Q4.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use mvdcc_core::Transaction;
use parking_lot::{Condvar, Mutex};

/// Mutex-guarded min-heap of ready transactions, ordered by ascending
/// timestamp (spec §4.7).
pub struct ReadyQueue {
    heap: Mutex<BinaryHeap<Reverse<Transaction>>>,
    not_empty: Condvar,
}

impl Default for ReadyQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadyQueue {
    /// Construct an empty ready queue.
    pub fn new() -> Self {
        ReadyQueue {
            heap: Mutex::new(BinaryHeap::new()),
            not_empty: Condvar::new(),
        }
    }

    /// Push every transaction in a processed batch, then notify once.
    ///
    /// The lock is held across the whole batch push and the notify call —
    /// taking it after releasing the lock would let a consumer that is
    /// between checking "is it empty?" and calling `wait` miss the wakeup
    /// (the same lost-wakeup shape the background scheduler's `shutdown`
    /// guards against by notifying under the lock).
    pub fn push_batch(&self, batch: impl IntoIterator<Item = Transaction>) {
        let mut heap = self.heap.lock();
        let mut pushed = false;
        for tx in batch {
            heap.push(Reverse(tx));
            pushed = true;
        }
        if pushed {
            self.not_empty.notify_all();
        }
    }

    /// Pop the lowest-timestamp transaction, blocking until one is
    /// available.
    pub fn pop_blocking(&self) -> Transaction {
        let mut heap = self.heap.lock();
        loop {
            if let Some(Reverse(tx)) = heap.pop() {
                return tx;
            }
            self.not_empty.wait(&mut heap);
        }
    }

    /// Pop the lowest-timestamp transaction without blocking.
    pub fn try_pop(&self) -> Option<Transaction> {
        self.heap.lock().pop().map(|Reverse(tx)| tx)
    }

    /// Drain every currently-queued transaction in ascending timestamp
    /// order.
    ///
    /// The CORE never calls this itself (spec §9, Q4): the queue persists
    /// past worker shutdown until an external execution phase drains it.
    /// This is that drain API.
    pub fn drain(&self) -> Vec<Transaction> {
        let mut heap = self.heap.lock();
        let mut out = Vec::with_capacity(heap.len());
        while let Some(Reverse(tx)) = heap.pop() {
            out.push(tx);
        }
        out
    }

    /// Number of transactions currently queued.
    pub fn len(&self) -> usize {
        self.heap.lock().len()
    }

    /// Whether the queue currently holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
