//! The session performance record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters and timing for one crawl session.
///
/// Persisted after every iteration so an interrupted session can resume its
/// counters along with the frontier. `end_time` is written exactly once,
/// when the frontier first drains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub iteration_count: u64,
    pub error_count: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_seconds: i64,
    pub urls_to_visit_count: usize,
    pub visited_count: usize,
}

impl Performance {
    pub fn start_now() -> Self {
        Self {
            iteration_count: 0,
            error_count: 0,
            start_time: Utc::now(),
            end_time: None,
            duration_seconds: 0,
            urls_to_visit_count: 0,
            visited_count: 0,
        }
    }

    /// Records one completed page visit and the frontier sizes after it.
    pub fn record_iteration(&mut self, urls_to_visit: usize, visited: usize) {
        self.iteration_count += 1;
        self.urls_to_visit_count = urls_to_visit;
        self.visited_count = visited;
        self.duration_seconds = (Utc::now() - self.start_time).num_seconds();
    }

    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    /// Seals the record. Later calls keep the first end time.
    pub fn finalize(&mut self) {
        if self.end_time.is_none() {
            let now = Utc::now();
            self.end_time = Some(now);
            self.duration_seconds = (now - self.start_time).num_seconds();
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.end_time.is_some()
    }

    /// Every URL the session knows about, queued or visited.
    pub fn total_urls(&self) -> usize {
        self.urls_to_visit_count + self.visited_count
    }

    /// Fraction of known URLs already visited, in `[0, 1]`.
    pub fn completion(&self) -> f64 {
        let total = self.total_urls();
        if total == 0 {
            return 0.0;
        }
        self.visited_count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_iteration_updates_counts() {
        let mut perf = Performance::start_now();

        perf.record_iteration(5, 1);
        perf.record_iteration(4, 2);

        assert_eq!(perf.iteration_count, 2);
        assert_eq!(perf.urls_to_visit_count, 4);
        assert_eq!(perf.visited_count, 2);
        assert_eq!(perf.error_count, 0);
    }

    #[test]
    fn test_finalize_is_write_once() {
        let mut perf = Performance::start_now();
        perf.finalize();
        let first = perf.end_time;

        perf.finalize();
        assert_eq!(perf.end_time, first);
        assert!(perf.is_finalized());
    }

    #[test]
    fn test_completion_ratio() {
        let mut perf = Performance::start_now();
        assert_eq!(perf.completion(), 0.0);

        perf.record_iteration(3, 1);
        assert_eq!(perf.total_urls(), 4);
        assert!((perf.completion() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut perf = Performance::start_now();
        perf.record_iteration(2, 1);
        perf.record_error();

        let value = serde_json::to_value(&perf).unwrap();
        let parsed: Performance = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, perf);
    }
}
