// ==============================================
// QUEUE BEHAVIOR SCENARIOS (integration)
// ==============================================
//
// End-to-end sequences through the public API only, the way an eviction
// policy would drive the queue.

use cachequeue::prelude::*;

fn drain<E: Eq + std::hash::Hash + Clone>(queue: &FastRemovalQueue<E>) -> Vec<E> {
    std::iter::from_fn(|| queue.poll()).collect()
}

mod documented_sequences {
    use super::*;

    #[test]
    fn move_to_tail_reorders() {
        let queue = FastRemovalQueue::new();
        queue.add('A');
        queue.add('B');
        queue.add('C');
        queue.move_to_tail(&'A');

        assert_eq!(queue.poll(), Some('B'));
        assert_eq!(queue.poll(), Some('C'));
        assert_eq!(queue.poll(), Some('A'));
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn remove_skips_element() {
        let queue = FastRemovalQueue::new();
        queue.add('A');
        queue.add('B');
        queue.remove(&'A');

        assert_eq!(queue.poll(), Some('B'));
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn duplicate_add_collapses() {
        let queue = FastRemovalQueue::new();
        queue.add('A');
        queue.add('A');

        assert_eq!(queue.poll(), Some('A'));
        assert_eq!(queue.poll(), None);
    }
}

mod eviction_patterns {
    use super::*;

    // FIFO eviction: admit keys, evict the oldest when over capacity.
    #[test]
    fn fifo_evicts_oldest() {
        let capacity = 3;
        let queue = QueueBuilder::new().capacity(capacity).build::<u32>();
        let mut evicted = Vec::new();

        for key in 0..6 {
            queue.add(key);
            if queue.len() > capacity {
                evicted.extend(queue.poll());
            }
        }

        assert_eq!(evicted, vec![0, 1, 2]);
        assert_eq!(queue.to_vec(), vec![3, 4, 5]);
    }

    // LRU eviction: touching a key on access protects it from the next eviction.
    #[test]
    fn lru_touch_protects_recent_key() {
        let queue = QueueBuilder::new().capacity(4).shards(2).build::<&str>();
        for key in ["a", "b", "c"] {
            queue.add(key);
        }

        assert!(queue.move_to_tail(&"a"));
        queue.add("d");

        assert_eq!(queue.poll(), Some("b"));
        assert_eq!(queue.peek(), Some("c"));
        assert_eq!(drain(&queue), vec!["c", "a", "d"]);
    }

    // Invalidation: explicit removal frees the key for re-admission at the tail.
    #[test]
    fn invalidated_key_readmits_at_tail() {
        let queue = FastRemovalQueue::new();
        for key in 1..=4 {
            queue.add(key);
        }
        assert!(queue.remove(&2));
        assert!(!queue.remove(&2));
        assert!(queue.add(2));

        assert_eq!(drain(&queue), vec![1, 3, 4, 2]);
    }
}

mod clear_semantics {
    use super::*;

    #[test]
    fn clear_makes_every_prior_element_absent() {
        let queue = FastRemovalQueue::new();
        let keys: Vec<String> = (0..10).map(|i| format!("key:{i}")).collect();
        for key in &keys {
            queue.add(key.clone());
        }

        queue.clear();

        assert_eq!(queue.poll(), None);
        for key in &keys {
            assert!(!queue.remove(key));
            assert!(!queue.move_to_tail(key));
            assert!(!queue.contains(key));
        }
        queue.check_invariants().unwrap();
    }

    #[test]
    fn operations_on_empty_queue_are_noops() {
        let queue: FastRemovalQueue<u8> = FastRemovalQueue::default();
        assert_eq!(queue.poll(), None);
        assert_eq!(queue.peek(), None);
        assert!(!queue.remove(&1));
        assert!(!queue.move_to_tail(&1));
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.to_vec().is_empty());
    }
}

#[cfg(feature = "metrics")]
mod metrics_export {
    use cachequeue::metrics::PrometheusTextExporter;

    use super::*;

    #[test]
    fn snapshot_exports_after_workload() {
        let queue = FastRemovalQueue::new();
        for key in 0..5 {
            queue.add(key);
        }
        queue.remove(&0);
        queue.poll();

        let snapshot = queue.snapshot();
        assert_eq!(snapshot.add_new, 5);
        assert_eq!(snapshot.remove_found, 1);
        assert_eq!(snapshot.poll_found, 1);
        assert_eq!(snapshot.len, 3);
        assert_eq!(snapshot.index_len, 3);

        let exporter = PrometheusTextExporter::new("queue", Vec::new());
        exporter.export(&snapshot);
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("queue_len 3"));
    }
}
