//! Summary statistics over the timing samples of one benchmark.

use std::time::Duration;

use crate::registry::BenchmarkInfo;

/// Derived statistics for one (operation, strategy) pair, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub median_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p95_ms: f64,
    pub mean_ms: f64,
}

impl Summary {
    /// Reduces a non-empty sample set. The 95th percentile uses the
    /// nearest-rank method: sort ascending, index = floor(n * 0.95) clamped
    /// to the last element. No interpolation, so results are reproducible.
    ///
    /// # Panics
    ///
    /// Panics on an empty sample set. The runner rejects iteration counts
    /// below 1 before any benchmark executes, so every timed benchmark
    /// yields at least one sample.
    pub fn from_samples(samples: &[Duration]) -> Summary {
        assert!(!samples.is_empty(), "summary over zero samples");

        let mut ms: Vec<f64> = samples.iter().map(|d| d.as_secs_f64() * 1_000.0).collect();
        ms.sort_by(|a, b| a.total_cmp(b));

        let n = ms.len();
        let p95_idx = usize::min((n as f64 * 0.95) as usize, n - 1);
        let median = if n % 2 == 1 {
            ms[n / 2]
        } else {
            (ms[n / 2 - 1] + ms[n / 2]) / 2.0
        };

        Summary {
            median_ms: median,
            min_ms: ms[0],
            max_ms: ms[n - 1],
            p95_ms: ms[p95_idx],
            mean_ms: ms.iter().sum::<f64>() / n as f64,
        }
    }
}

/// Descriptor metadata plus the ordered samples and their summary. Computed
/// once after all iterations of a benchmark complete; immutable afterwards.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub info: BenchmarkInfo,
    pub samples: Vec<Duration>,
    pub summary: Summary,
}

impl BenchmarkResult {
    /// Computes the summary eagerly. `samples` must be non-empty; see
    /// [`Summary::from_samples`].
    pub fn new(info: BenchmarkInfo, samples: Vec<Duration>) -> Self {
        let summary = Summary::from_samples(&samples);
        BenchmarkResult {
            info,
            samples,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(values: &[u64]) -> Vec<Duration> {
        values.iter().map(|&v| Duration::from_millis(v)).collect()
    }

    #[test]
    fn p95_is_nearest_rank() {
        let samples = ms(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let s = Summary::from_samples(&samples);
        // floor(10 * 0.95) = 9 -> the largest value.
        assert_eq!(s.p95_ms, 10.0);
    }

    #[test]
    fn p95_clamps_for_single_sample() {
        let s = Summary::from_samples(&ms(&[7]));
        assert_eq!(s.p95_ms, 7.0);
        assert_eq!(s.median_ms, 7.0);
        assert_eq!(s.min_ms, 7.0);
        assert_eq!(s.max_ms, 7.0);
    }

    #[test]
    fn standard_definitions_hold() {
        let s = Summary::from_samples(&ms(&[2, 4, 4, 4, 5, 5, 7, 9]));
        assert_eq!(s.mean_ms, 5.0);
        assert_eq!(s.median_ms, 4.5);
        assert_eq!(s.min_ms, 2.0);
        assert_eq!(s.max_ms, 9.0);
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let s = Summary::from_samples(&ms(&[9, 2, 5, 4, 7, 4, 5, 4]));
        assert_eq!(s.median_ms, 4.5);
        assert_eq!(s.p95_ms, 9.0);
    }

    #[test]
    #[should_panic(expected = "summary over zero samples")]
    fn empty_sample_set_is_rejected() {
        Summary::from_samples(&[]);
    }

    #[test]
    fn odd_count_median_is_middle_element() {
        let s = Summary::from_samples(&ms(&[1, 3, 100]));
        assert_eq!(s.median_ms, 3.0);
    }
}
