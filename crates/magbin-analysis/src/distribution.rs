//! Size distributions inside each selection-field bin
//!
//! For every non-empty bin and every requested field, an equal-width
//! histogram of the field's valid values. Failed measurements are left out
//! so the sentinel never shows up as a spike at `-1`.

use magbin_stats::histogram::Histogram;
use serde::Serialize;

use crate::{
    bins::{self, BinSpec, BinnedRecords, InvalidInput},
    table::RecordTable,
};

/// Number of histogram bins used when none is given.
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct FieldDistribution {
    pub field: String,
    pub valid: usize,
    pub histogram: Histogram,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinDistribution {
    pub center: f64,
    pub members: usize,
    pub fields: Vec<FieldDistribution>,
}

pub fn distributions<S>(
    table: &RecordTable,
    selection: &str,
    fields: &[S],
    spec: BinSpec,
    histogram_bins: usize,
) -> Result<Vec<BinDistribution>, InvalidInput>
where
    S: AsRef<str>,
{
    if histogram_bins == 0 {
        return Err(InvalidInput::NoHistogramBins);
    }
    let binned = BinnedRecords::new(table, selection, spec)?;
    let columns = bins::require_columns(table, fields)?;

    let result = binned
        .bins
        .iter()
        .map(|bin| {
            let fields = columns
                .iter()
                .map(|(field, values)| {
                    let valid = bin
                        .rows
                        .iter()
                        .map(|&row| values[row])
                        .filter(|&v| bins::is_valid_measurement(v))
                        .collect::<Vec<_>>();
                    FieldDistribution {
                        field: field.clone(),
                        valid: valid.len(),
                        histogram: Histogram::new(valid, histogram_bins),
                    }
                })
                .collect();
            BinDistribution {
                center: bin.center,
                members: bin.rows.len(),
                fields,
            }
        })
        .collect();

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordTable {
        RecordTable::from_columns([
            ("mag", vec![20.0, 20.1, 20.2, 22.0]),
            ("size", vec![1.0, 2.0, -1.0, 4.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_histograms_skip_failed_values() {
        let result = distributions(&sample(), "mag", &["size"], BinSpec::default(), 4).unwrap();
        assert_eq!(result.len(), 2);

        let first = &result[0].fields[0];
        assert_eq!(result[0].members, 3);
        assert_eq!(first.valid, 2);
        assert_eq!(first.histogram.total(), 2);
        assert!(first.histogram.bins[0].range.start >= 0.0);
    }

    #[test]
    fn test_all_failed_bin_has_empty_histogram() {
        let table = RecordTable::from_columns([
            ("mag", vec![20.0, 21.0]),
            ("size", vec![-1.0, 3.0]),
        ])
        .unwrap();
        let result = distributions(&table, "mag", &["size"], BinSpec::default(), 10).unwrap();
        assert_eq!(result[0].fields[0].valid, 0);
        assert!(result[0].fields[0].histogram.bins.is_empty());
        assert_eq!(result[1].fields[0].histogram.total(), 1);
    }

    #[test]
    fn test_zero_histogram_bins() {
        let err =
            distributions(&sample(), "mag", &["size"], BinSpec::default(), 0).unwrap_err();
        assert_eq!(err, InvalidInput::NoHistogramBins);
    }
}
