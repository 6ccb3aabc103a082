use std::ops::Range;

use serde::Serialize;

/// An equal-width histogram of a dataset.
///
/// Bins span `[min, max]` of the data. Every bin is half-open
/// (`start..end`) except the last, which also includes `max`, so every
/// input value is counted exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin.
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram with `num_bins` equal-width bins.
    ///
    /// When every value is identical the range is widened to
    /// `value - 0.5 ..= value + 0.5`.
    ///
    /// Empty input or `num_bins == 0` yields a histogram with no bins.
    ///
    /// # Examples
    ///
    /// ```
    /// # use magbin_stats::histogram::Histogram;
    /// let histogram = Histogram::new([1.0, 2.0, 2.5, 4.0, 5.0], 4);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, [1, 2, 0, 2]);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max - min < f64::EPSILON {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / num_bins as f64;
        let mut bins = (0..num_bins)
            .map(|i| {
                // Recompute edges from `min` to avoid accumulating rounding error
                let start = min + (i as f64) * width;
                let end = if i + 1 == num_bins {
                    max
                } else {
                    min + ((i + 1) as f64) * width
                };
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for value in values {
            let idx = (((value - min) / width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Count of the fullest bin, or 0 when there are no bins.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Histogram::new(Vec::<f64>::new(), 10).bins.is_empty());
        assert!(Histogram::new([1.0], 0).bins.is_empty());
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let histogram = Histogram::new([0.0, 10.0], 10);
        assert_eq!(histogram.bins.len(), 10);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[9].count, 1);
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn test_constant_values() {
        let histogram = Histogram::new([3.0; 5], 2);
        assert_eq!(histogram.total(), 5);
        assert_eq!(histogram.max_count(), 5);
        assert!((histogram.bins[0].range.start - 2.5).abs() < 1e-12);
        assert!((histogram.bins[1].range.end - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_edges_are_contiguous() {
        let histogram = Histogram::new([0.3, 1.7, 2.2, 9.9], 7);
        for pair in histogram.bins.windows(2) {
            assert!((pair[0].range.end - pair[1].range.start).abs() < 1e-12);
        }
    }
}
