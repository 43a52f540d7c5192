//! Transaction model
//!
//! A `Transaction` is identified by its `timestamp`, which is also its
//! position in the transaction log and its place in the total order the
//! ready queue re-imposes on output (spec §3, §4.7).

use crate::task::Task;

/// A transaction: a timestamp-identified set of tasks plus the read/write
/// sets accumulated while processing it.
///
/// `write_set` is populated during the CC phase (this crate); `read_set` is
/// populated during the out-of-scope execution phase and is carried here
/// only so the type is complete end-to-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Unique, dense position in the transaction log; also the total order
    /// key for the ready queue.
    pub timestamp: u64,
    /// Tasks in construction order. Duplicate keys are permitted.
    pub task_set: Vec<Task>,
    /// `(key, value)` pairs read during execution (external phase).
    pub read_set: Vec<(u64, u64)>,
    /// Keys this transaction installed a placeholder for, filled in by
    /// whichever CC worker(s) own those keys.
    pub write_set: Vec<u64>,
}

impl Transaction {
    /// Construct a transaction with the given timestamp and task set.
    ///
    /// `read_set`/`write_set` start empty; `write_set` is populated by CC,
    /// `read_set` by the execution phase.
    pub fn new(timestamp: u64, task_set: Vec<Task>) -> Self {
        Transaction {
            timestamp,
            task_set,
            read_set: Vec::new(),
            write_set: Vec::new(),
        }
    }
}

// Transactions are ordered by timestamp alone — this is the CORE's only
// notion of transaction identity and total order (spec §3). We implement
// this directly rather than replicating the source's unused
// `std::function` comparator plumbing around the ready queue (spec §9).
impl PartialOrd for Transaction {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Transaction {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Op;

    #[test]
    fn new_leaves_read_and_write_sets_empty() {
        let tx = Transaction::new(5, vec![Task::write(1), Task::read(2)]);
        assert_eq!(tx.timestamp, 5);
        assert_eq!(tx.task_set.len(), 2);
        assert_eq!(tx.task_set[0].op, Op::Write);
        assert!(tx.read_set.is_empty());
        assert!(tx.write_set.is_empty());
    }

    #[test]
    fn ordering_is_by_timestamp_only() {
        let a = Transaction::new(1, vec![]);
        let b = Transaction::new(2, vec![]);
        assert!(a < b);

        let mut v = vec![
            Transaction::new(3, vec![]),
            Transaction::new(1, vec![]),
            Transaction::new(2, vec![]),
        ];
        v.sort();
        let timestamps: Vec<u64> = v.iter().map(|t| t.timestamp).collect();
        assert_eq!(timestamps, vec![1, 2, 3]);
    }
}
