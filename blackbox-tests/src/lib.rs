//! Black Box Tests for mvdcc
//!
//! These tests only use the public API - no internal crate access.
//! This simulates what an end user would experience.

#[cfg(test)]
mod tests {
    use mvdcc::{Engine, EngineConfig, Table, Task, Transaction};

    fn config(thread_count: usize, tuple_count: usize, batch_size: u64) -> EngineConfig {
        EngineConfig {
            thread_count,
            tuple_count,
            batch_size,
            ..EngineConfig::default()
        }
    }

    // ========================================================================
    // Engine Lifecycle
    // ========================================================================

    #[test]
    fn user_can_build_and_run_a_bohm_engine_to_completion() {
        let transactions = vec![
            Transaction::new(0, vec![Task::write(0)]),
            Transaction::new(1, vec![Task::write(1)]),
        ];
        let engine = Engine::new_bohm(config(2, 4, 2), Table::new(4), transactions).unwrap();

        let commits = engine.run_to_completion();
        assert_eq!(commits.iter().sum::<u64>(), 2);
    }

    #[test]
    fn user_can_build_and_run_a_gato_engine_to_completion() {
        let transactions = vec![
            Transaction::new(0, vec![Task::write(0)]),
            Transaction::new(1, vec![Task::write(1)]),
        ];
        let engine = Engine::new_gato(config(2, 4, 2), Table::new(4), transactions).unwrap();

        let commits = engine.run_to_completion();
        assert_eq!(commits.iter().sum::<u64>(), 2);
    }

    #[test]
    fn rejects_a_log_with_non_dense_timestamps() {
        let transactions = vec![Transaction::new(1, vec![])];
        let err = Engine::new_bohm(config(1, 1, 10), Table::new(1), transactions).unwrap_err();
        assert_eq!(
            err,
            mvdcc::Error::TimestampNotDense {
                index: 0,
                timestamp: 1
            }
        );
    }

    // ========================================================================
    // Placeholder Round Trip
    // ========================================================================

    #[test]
    fn user_can_install_commit_and_read_a_value() {
        let transactions = vec![Transaction::new(0, vec![Task::write(0)])];
        let engine = Engine::new_bohm(config(1, 1, 10), Table::new(1), transactions).unwrap();
        engine.run_to_completion();

        // Before the execution phase fills it, the write is invisible.
        assert_eq!(engine.read_as_of(0, 0).unwrap(), None);

        engine.fill_placeholder(0, 0, 42).unwrap();
        assert_eq!(engine.read_as_of(0, 0).unwrap(), Some(42));
    }

    #[test]
    fn reads_before_any_write_see_the_initial_value() {
        let engine = Engine::new_bohm(config(1, 1, 10), Table::new(1), Vec::new()).unwrap();
        assert_eq!(engine.read_as_of(0, 0).unwrap(), Some(0));
    }

    // ========================================================================
    // Ready Queue
    // ========================================================================

    #[test]
    fn user_can_drain_the_ready_queue_in_timestamp_order() {
        let transactions = vec![
            Transaction::new(0, vec![Task::read(0)]),
            Transaction::new(1, vec![Task::read(0)]),
            Transaction::new(2, vec![Task::read(0)]),
        ];
        let engine = Engine::new_bohm(config(3, 1, 1), Table::new(1), transactions).unwrap();
        engine.run_to_completion();

        let drained = engine.drain_ready_queue();
        let timestamps: Vec<u64> = drained.iter().map(|tx| tx.timestamp).collect();
        assert_eq!(timestamps, vec![0, 1, 2]);
        assert!(engine.drain_ready_queue().is_empty());
    }

    // ========================================================================
    // Out-of-range Keys
    // ========================================================================

    #[test]
    fn reading_an_out_of_range_key_is_an_error() {
        let engine = Engine::new_bohm(config(1, 2, 10), Table::new(2), Vec::new()).unwrap();
        let err = engine.read_as_of(5, 0).unwrap_err();
        assert_eq!(err, mvdcc::Error::KeyOutOfRange { key: 5, bound: 2 });
    }
}
