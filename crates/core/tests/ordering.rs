//! Property-based tests for `Transaction` ordering (spec §3, §4.7).

use mvdcc_core::Transaction;
use proptest::prelude::*;

proptest! {
    /// Sorting any set of transactions by their natural `Ord` always
    /// yields strictly non-decreasing timestamps, and is consistent with
    /// sorting the raw timestamps directly — `Transaction`'s `Ord` carries
    /// no information beyond `timestamp`.
    #[test]
    fn sort_order_matches_sorting_bare_timestamps(
        timestamps in prop::collection::vec(0u64..10_000, 0..50)
    ) {
        let mut transactions: Vec<Transaction> = timestamps
            .iter()
            .map(|&ts| Transaction::new(ts, vec![]))
            .collect();
        transactions.sort();

        let mut expected = timestamps.clone();
        expected.sort_unstable();

        let actual: Vec<u64> = transactions.iter().map(|tx| tx.timestamp).collect();
        prop_assert_eq!(actual, expected);
    }
}
