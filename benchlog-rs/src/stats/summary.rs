use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

/// Summary statistics over a numeric sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1); 0 for a single value
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
}

impl StatSummary {
    /// Summarise `values`, or `None` when the sequence is empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (min, max) = match values.iter().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };

        Some(Self {
            count: values.len(),
            mean: mean(values)?,
            median: median(values)?,
            stdev: sample_stdev(values)?,
            min,
            max,
        })
    }

    /// Summarise integer counts
    pub fn from_counts(values: &[u64]) -> Option<Self> {
        let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        Self::from_values(&as_f64)
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median, averaging the two central values for even lengths
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let len = sorted.len();
    let median_value = if len % 2 == 0 {
        (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
    } else {
        sorted[len / 2]
    };

    Some(median_value)
}

/// Sample standard deviation
///
/// A single value has no sample variance and yields 0.
pub fn sample_stdev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if values.len() == 1 {
        return Some(0.0);
    }

    let sum_sq: f64 = values.iter().map(|&x| (x - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_has_no_summary() {
        assert!(StatSummary::from_values(&[]).is_none());
        assert!(StatSummary::from_counts(&[]).is_none());
    }

    #[test]
    fn test_single_value() {
        let stats = StatSummary::from_values(&[42.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_relative_eq!(stats.mean, 42.5);
        assert_relative_eq!(stats.median, 42.5);
        assert_relative_eq!(stats.stdev, 0.0);
        assert_relative_eq!(stats.min, 42.5);
        assert_relative_eq!(stats.max, 42.5);
    }

    #[test]
    fn test_odd_length() {
        let stats = StatSummary::from_values(&[5.0, 1.0, 3.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_relative_eq!(stats.mean, 3.0);
        assert_relative_eq!(stats.median, 3.0);
        assert_relative_eq!(stats.stdev, 2.0);
        assert_relative_eq!(stats.min, 1.0);
        assert_relative_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_even_length_median() {
        let stats = StatSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_relative_eq!(stats.median, 2.5);
        assert_relative_eq!(stats.mean, 2.5);
    }

    #[test]
    fn test_sample_stdev_matches_reference() {
        // statistics.stdev([2, 4, 4, 4, 5, 5, 7, 9]) == 2.138089935299395
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_stdev(&values).unwrap(), 2.138089935299395, epsilon = 1e-12);
    }

    #[test]
    fn test_counts() {
        let stats = StatSummary::from_counts(&[10, 20, 30, 40]).unwrap();
        assert_relative_eq!(stats.mean, 25.0);
        assert_relative_eq!(stats.min, 10.0);
        assert_relative_eq!(stats.max, 40.0);
    }
}
