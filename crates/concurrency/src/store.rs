//! Versioned tuple store (spec §4.1, component C1)
//!
//! Each key owns a `Chain`: an append-only arena of [`Version`]s plus an
//! atomic head index. The arena lives behind a `parking_lot::RwLock` so
//! readers can traverse concurrently with the single writer that owns the
//! key; the head index is published with `Release` and loaded with
//! `Acquire` on top of that lock so the ordering contract spec §5 asks for
//! is explicit in the type, not just an accident of the lock.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use mvdcc_core::{Error, Result};

/// An immutable-after-fill record in a key's version chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    /// Timestamp of the writer that created this version
    pub begin_ts: u64,
    /// Begin timestamp of the next-newer version, or `u64::MAX` for the head
    pub end_ts: u64,
    /// Payload value
    pub value: u64,
    /// True while reserved but not yet filled; invisible to readers
    pub placeholder: bool,
    /// Arena index of the next-older version, or `None` for the tail
    prev: Option<usize>,
}

/// The version chain for a single key.
///
/// Starts with exactly one version: the tail, `{begin_ts: 0, end_ts:
/// u64::MAX, value: 0, placeholder: false, prev: None}` (spec §3).
pub struct Chain {
    versions: RwLock<Vec<Version>>,
    head: AtomicUsize,
}

impl Chain {
    fn new() -> Self {
        let tail = Version {
            begin_ts: 0,
            end_ts: u64::MAX,
            value: 0,
            placeholder: false,
            prev: None,
        };
        Chain {
            versions: RwLock::new(vec![tail]),
            head: AtomicUsize::new(0),
        }
    }

    /// Prepend a new placeholder version with the given begin timestamp.
    ///
    /// Precondition (not re-checked here — see spec §4.1 and §7): `ts` is
    /// greater than or equal to the current head's `begin_ts`. This holds
    /// because each key has exactly one owning writer at a time, and that
    /// writer processes its batch in ascending timestamp order; the only
    /// tie possible is the very first write against a key's initial tail
    /// version, whose `begin_ts` is the sentinel `0`.
    pub fn install_placeholder(&self, ts: u64) {
        let new_idx = {
            let mut versions = self.versions.write();
            let old_head_idx = self.head.load(Ordering::Relaxed);
            versions[old_head_idx].end_ts = ts;
            versions.push(Version {
                begin_ts: ts,
                end_ts: u64::MAX,
                value: 0,
                placeholder: true,
                prev: Some(old_head_idx),
            });
            versions.len() - 1
        };
        // Publish the new head after the arena write lock is released so
        // concurrent readers taking only a read lock still see a
        // fully-initialized version at this index.
        self.head.store(new_idx, Ordering::Release);
    }

    /// Fill a previously-installed placeholder with a value.
    ///
    /// Returns `false` if no placeholder with this `begin_ts` is found.
    pub fn fill_placeholder(&self, ts: u64, value: u64) -> bool {
        let mut versions = self.versions.write();
        let mut cursor = Some(self.head.load(Ordering::Acquire));
        while let Some(idx) = cursor {
            if versions[idx].begin_ts == ts {
                if !versions[idx].placeholder {
                    return false;
                }
                versions[idx].value = value;
                versions[idx].placeholder = false;
                return true;
            }
            cursor = versions[idx].prev;
        }
        false
    }

    /// Return the value visible at `ts`, skipping placeholders.
    pub fn read_as_of(&self, ts: u64) -> Option<u64> {
        let versions = self.versions.read();
        let mut cursor = Some(self.head.load(Ordering::Acquire));
        while let Some(idx) = cursor {
            let v = &versions[idx];
            if v.begin_ts <= ts && ts < v.end_ts && !v.placeholder {
                return Some(v.value);
            }
            cursor = v.prev;
        }
        None
    }

    /// Snapshot the chain newest-first, for tests and invariant checks.
    pub fn snapshot(&self) -> Vec<Version> {
        let versions = self.versions.read();
        let mut out = Vec::new();
        let mut cursor = Some(self.head.load(Ordering::Acquire));
        while let Some(idx) = cursor {
            out.push(versions[idx]);
            cursor = versions[idx].prev;
        }
        out
    }
}

/// The versioned tuple table: one [`Chain`] per key in `[0, M)`.
pub struct Table {
    chains: Vec<Chain>,
}

impl Table {
    /// Construct a table of `tuple_count` keys, each starting at the
    /// initial tail version.
    pub fn new(tuple_count: usize) -> Self {
        Table {
            chains: (0..tuple_count).map(|_| Chain::new()).collect(),
        }
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Whether the table holds no keys.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    fn chain(&self, key: u64) -> Result<&Chain> {
        self.chains.get(key as usize).ok_or(Error::KeyOutOfRange {
            key,
            bound: self.chains.len() as u64,
        })
    }

    /// See [`Chain::install_placeholder`].
    pub fn install_placeholder(&self, key: u64, ts: u64) -> Result<()> {
        self.chain(key)?.install_placeholder(ts);
        Ok(())
    }

    /// See [`Chain::fill_placeholder`].
    pub fn fill_placeholder(&self, key: u64, ts: u64, value: u64) -> Result<bool> {
        Ok(self.chain(key)?.fill_placeholder(ts, value))
    }

    /// See [`Chain::read_as_of`].
    pub fn read_as_of(&self, key: u64, ts: u64) -> Result<Option<u64>> {
        Ok(self.chain(key)?.read_as_of(ts))
    }

    /// See [`Chain::snapshot`], for tests.
    pub fn chain_snapshot(&self, key: u64) -> Result<Vec<Version>> {
        Ok(self.chain(key)?.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_table_reads_zero_everywhere() {
        let t = Table::new(4);
        for k in 0..4 {
            assert_eq!(t.read_as_of(k, 0).unwrap(), Some(0));
            assert_eq!(t.read_as_of(k, 1_000_000).unwrap(), Some(0));
        }
    }

    #[test]
    fn out_of_range_key_is_an_error() {
        let t = Table::new(4);
        let err = t.read_as_of(4, 0).unwrap_err();
        assert_eq!(err, Error::KeyOutOfRange { key: 4, bound: 4 });
    }

    #[test]
    fn install_then_fill_then_read_round_trips() {
        let t = Table::new(1);
        t.install_placeholder(0, 10).unwrap();
        assert_eq!(t.read_as_of(0, 10).unwrap(), None); // placeholder invisible
        assert!(t.fill_placeholder(0, 10, 42).unwrap());
        assert_eq!(t.read_as_of(0, 10).unwrap(), Some(42));
        assert_eq!(t.read_as_of(0, 15).unwrap(), Some(42));
    }

    #[test]
    fn fill_missing_placeholder_returns_false() {
        let t = Table::new(1);
        assert!(!t.fill_placeholder(0, 99, 1).unwrap());
    }

    #[test]
    fn historical_reads_see_the_version_in_effect_at_ts() {
        // Scenario S6 from spec §8.
        let t = Table::new(1);
        t.install_placeholder(0, 10).unwrap();
        t.fill_placeholder(0, 10, 42).unwrap();
        t.install_placeholder(0, 20).unwrap();
        t.fill_placeholder(0, 20, 99).unwrap();

        assert_eq!(t.read_as_of(0, 15).unwrap(), Some(42));
        assert_eq!(t.read_as_of(0, 25).unwrap(), Some(99));
        assert_eq!(t.read_as_of(0, 5).unwrap(), Some(0));
    }

    #[test]
    fn chain_invariants_hold_after_several_installs() {
        let t = Table::new(1);
        for ts in [5u64, 10, 15] {
            t.install_placeholder(0, ts).unwrap();
        }
        let chain = t.chain_snapshot(0).unwrap(); // newest-first
        assert_eq!(chain.len(), 4); // 3 placeholders + tail

        // Invariant 1 & 2 (spec §8): adjacent O.end_ts == N.begin_ts,
        // O.begin_ts < N.begin_ts; head.end_ts == +inf; tail.begin_ts == 0.
        assert_eq!(chain[0].end_ts, u64::MAX);
        for pair in chain.windows(2) {
            let (newer, older) = (pair[0], pair[1]);
            assert_eq!(older.end_ts, newer.begin_ts);
            assert!(older.begin_ts < newer.begin_ts);
        }
        let tail = chain.last().unwrap();
        assert_eq!(tail.begin_ts, 0);
        assert!(!tail.placeholder);
        assert_eq!(tail.value, 0);
    }
}
