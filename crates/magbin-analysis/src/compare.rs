//! Comparison of measured sizes against the input size
//!
//! For each measurement technique the report counts failed measurements and
//! summarises the residual `reference - measured` over the records where the
//! measurement succeeded, both overall and per selection-field bin. The
//! reference column is an input quantity and is never masked.

use magbin_stats::{descriptive::DescriptiveStats, percentiles::Percentiles};
use serde::Serialize;

use crate::{
    aggregate::BinMean,
    bins::{self, BinSpec, BinnedRecords, InvalidInput},
    table::RecordTable,
};

/// Percentiles reported for residuals (median and the 1-sigma band).
pub const RESIDUAL_PERCENTILES: [f64; 3] = [16.0, 50.0, 84.0];

#[derive(Debug, Clone, Serialize)]
pub struct ResidualSummary {
    pub stats: DescriptiveStats,
    pub percentiles: Percentiles,
}

impl ResidualSummary {
    fn new(residuals: &[f64]) -> Option<Self> {
        let mut sorted = residuals.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            stats: DescriptiveStats::from_sorted(&sorted)?,
            percentiles: Percentiles::from_sorted(&sorted, &RESIDUAL_PERCENTILES),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BinResidual {
    pub center: f64,
    pub members: usize,
    pub valid: usize,
    pub mean_residual: BinMean,
}

/// Residual report for one measured field.
#[derive(Debug, Clone, Serialize)]
pub struct TechniqueComparison {
    pub reference: String,
    pub measured: String,
    pub total: usize,
    pub valid: usize,
    pub failed: usize,
    /// `None` when every measurement failed.
    pub residual: Option<ResidualSummary>,
    pub by_bin: Vec<BinResidual>,
}

impl TechniqueComparison {
    /// Fraction of records whose measurement failed.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.failed as f64 / self.total as f64
        }
    }
}

/// Compares every `measured` field against `reference`.
///
/// Bins follow the same rules as [`crate::aggregate::aggregate`]: empty bins
/// are skipped and a bin without valid measurements reports
/// [`BinMean::NoData`].
pub fn compare<S>(
    table: &RecordTable,
    selection: &str,
    reference: &str,
    measured: &[S],
    spec: BinSpec,
) -> Result<Vec<TechniqueComparison>, InvalidInput>
where
    S: AsRef<str>,
{
    let binned = BinnedRecords::new(table, selection, spec)?;
    let reference_values = bins::require_column(table, reference)?;
    let measured_columns = bins::require_columns(table, measured)?;

    let residual_of = |values: &[f64], row: usize| {
        bins::is_valid_measurement(values[row]).then(|| reference_values[row] - values[row])
    };

    let comparisons = measured_columns
        .into_iter()
        .map(|(field, values)| {
            let residuals = (0..table.len())
                .filter_map(|row| residual_of(values, row))
                .collect::<Vec<_>>();

            let by_bin = binned
                .bins
                .iter()
                .map(|bin| {
                    let in_bin = bin
                        .rows
                        .iter()
                        .filter_map(|&row| residual_of(values, row))
                        .collect::<Vec<_>>();
                    BinResidual {
                        center: bin.center,
                        members: bin.rows.len(),
                        valid: in_bin.len(),
                        mean_residual: BinMean::from_valid(in_bin),
                    }
                })
                .collect();

            TechniqueComparison {
                reference: reference.to_owned(),
                measured: field,
                total: table.len(),
                valid: residuals.len(),
                failed: table.len() - residuals.len(),
                residual: ResidualSummary::new(&residuals),
                by_bin,
            }
        })
        .collect();

    Ok(comparisons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordTable {
        RecordTable::from_columns([
            ("magIn", vec![20.0, 20.3, 21.0, 21.2]),
            ("r50in", vec![2.0, 3.0, 4.0, 5.0]),
            ("r50meas", vec![1.5, 3.5, -1.0, 4.0]),
            ("r50SE", vec![-1.0, -1.0, -1.0, -1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_counts_and_residuals() {
        let report = compare(
            &sample(),
            "magIn",
            "r50in",
            &["r50meas"],
            BinSpec::default(),
        )
        .unwrap();
        assert_eq!(report.len(), 1);
        let cmp = &report[0];
        assert_eq!(cmp.total, 4);
        assert_eq!(cmp.valid, 3);
        assert_eq!(cmp.failed, 1);
        assert!((cmp.failure_rate() - 0.25).abs() < 1e-12);

        // residuals: 0.5, -0.5, 1.0
        let residual = cmp.residual.as_ref().unwrap();
        assert!((residual.stats.mean - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(residual.stats.median, 0.5);
        assert_eq!(residual.percentiles.get(50.0), Some(0.5));
    }

    #[test]
    fn test_by_bin_residuals() {
        let report = compare(
            &sample(),
            "magIn",
            "r50in",
            &["r50meas"],
            BinSpec::default(),
        )
        .unwrap();
        let by_bin = &report[0].by_bin;
        assert_eq!(by_bin.len(), 2);
        assert_eq!(by_bin[0].center, 20.0);
        assert_eq!(by_bin[0].mean_residual, BinMean::Mean(0.0));
        assert_eq!(by_bin[1].members, 2);
        assert_eq!(by_bin[1].valid, 1);
        assert_eq!(by_bin[1].mean_residual, BinMean::Mean(1.0));
    }

    #[test]
    fn test_all_failed_technique() {
        let report = compare(
            &sample(),
            "magIn",
            "r50in",
            &["r50meas", "r50SE"],
            BinSpec::default(),
        )
        .unwrap();
        let se = &report[1];
        assert_eq!(se.measured, "r50SE");
        assert_eq!(se.valid, 0);
        assert!(se.residual.is_none());
        assert!(se.by_bin.iter().all(|b| b.mean_residual == BinMean::NoData));
    }

    #[test]
    fn test_unknown_reference() {
        let err = compare(
            &sample(),
            "magIn",
            "r50",
            &["r50meas"],
            BinSpec::default(),
        )
        .unwrap_err();
        assert!(matches!(err, InvalidInput::UnknownField { .. }));
    }
}
