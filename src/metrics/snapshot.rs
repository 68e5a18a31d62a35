/// Point-in-time copy of queue counters plus gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueMetricsSnapshot {
    pub add_calls: u64,
    pub add_new: u64,
    pub add_duplicates: u64,
    pub add_rolled_back: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub remove_stale: u64, // index hit, node already tombstoned by a racing poll

    pub move_calls: u64,
    pub move_found: u64,

    pub poll_calls: u64,
    pub poll_found: u64,

    pub clear_calls: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub index_len: usize,
}

impl QueueMetricsSnapshot {
    /// Fraction of `poll` calls that returned an element.
    pub fn poll_hit_ratio(&self) -> f64 {
        if self.poll_calls == 0 {
            0.0
        } else {
            self.poll_found as f64 / self.poll_calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_hit_ratio_handles_zero_calls() {
        let snapshot = QueueMetricsSnapshot::default();
        assert_eq!(snapshot.poll_hit_ratio(), 0.0);

        let snapshot = QueueMetricsSnapshot {
            poll_calls: 4,
            poll_found: 3,
            ..Default::default()
        };
        assert!((snapshot.poll_hit_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
