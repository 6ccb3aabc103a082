//! Assignment of records to selection-field bins
//!
//! [`BinnedRecords`] is the shared first stage of every analysis in this
//! crate: it validates the request, lays the bin grid over the selection
//! field and records which rows fall into each bin window. Only bins that
//! receive a row are ever built, so a sparse selection range costs nothing. Later stages
//! (means, residuals, histograms) only ever look at those row indices.

use std::collections::BTreeMap;

use magbin_stats::binning::BinGrid;
use serde::{Deserialize, Serialize};

use crate::table::RecordTable;

/// Rejected analysis request. Nothing is computed when this is returned.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidInput {
    #[display("record table is empty")]
    EmptyTable,
    #[display("bin step must be a positive finite number, got {step}")]
    NonPositiveStep { step: f64 },
    #[display("bin half-width must be a positive finite number, got {half_width}")]
    NonPositiveHalfWidth { half_width: f64 },
    #[display("field '{field}' is not present in the table")]
    UnknownField { field: String },
    #[display("histogram needs at least one bin")]
    NoHistogramBins,
}

/// Bin spacing and inclusion window.
///
/// The two values are independent; the default (step 1, half-width 0.5)
/// tiles the selection range without gaps or overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinSpec {
    pub step: f64,
    pub half_width: f64,
}

impl Default for BinSpec {
    fn default() -> Self {
        Self {
            step: 1.0,
            half_width: 0.5,
        }
    }
}

impl BinSpec {
    #[must_use]
    pub fn new(step: f64, half_width: f64) -> Self {
        Self { step, half_width }
    }

    fn validate(self) -> Result<Self, InvalidInput> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(InvalidInput::NonPositiveStep { step: self.step });
        }
        if !(self.half_width.is_finite() && self.half_width > 0.0) {
            return Err(InvalidInput::NonPositiveHalfWidth {
                half_width: self.half_width,
            });
        }
        Ok(self)
    }
}

/// Row indices belonging to one non-empty bin.
#[derive(Debug, Clone, PartialEq)]
pub struct BinMembers {
    pub center: f64,
    pub rows: Vec<usize>,
}

/// Records grouped by selection-field bin, in ascending center order.
///
/// Bins whose window holds no record are left out entirely.
#[derive(Debug, Clone)]
pub struct BinnedRecords {
    pub selection: String,
    pub spec: BinSpec,
    pub bins: Vec<BinMembers>,
}

impl BinnedRecords {
    pub fn new(table: &RecordTable, selection: &str, spec: BinSpec) -> Result<Self, InvalidInput> {
        if table.is_empty() {
            return Err(InvalidInput::EmptyTable);
        }
        let spec = spec.validate()?;
        let values = require_column(table, selection)?;

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // Only fails for an invalid step, which `validate` already rejected
        let grid = BinGrid::spanning(min, max, spec.step)
            .ok_or(InvalidInput::NonPositiveStep { step: spec.step })?;

        let mut rows_by_index = BTreeMap::<usize, Vec<usize>>::new();
        for (row, &value) in values.iter().enumerate() {
            for index in grid.indices_containing(value, spec.half_width) {
                rows_by_index.entry(index).or_default().push(row);
            }
        }
        let bins = rows_by_index
            .into_iter()
            .map(|(index, rows)| BinMembers {
                center: grid.center(index),
                rows,
            })
            .collect();

        Ok(Self {
            selection: selection.to_owned(),
            spec,
            bins,
        })
    }
}

/// Looks up a column, mapping a missing name to [`InvalidInput::UnknownField`].
pub fn require_column<'a>(table: &'a RecordTable, field: &str) -> Result<&'a [f64], InvalidInput> {
    table.column(field).ok_or_else(|| InvalidInput::UnknownField {
        field: field.to_owned(),
    })
}

/// Resolves target fields in the given order, dropping repeated names.
pub fn require_columns<'a, S>(
    table: &'a RecordTable,
    fields: &[S],
) -> Result<Vec<(String, &'a [f64])>, InvalidInput>
where
    S: AsRef<str>,
{
    let mut resolved: Vec<(String, &[f64])> = vec![];
    for field in fields {
        let field = field.as_ref();
        if resolved.iter().any(|(name, _)| name == field) {
            continue;
        }
        resolved.push((field.to_owned(), require_column(table, field)?));
    }
    Ok(resolved)
}

/// A measurement is valid unless it carries the negative failure sentinel.
#[must_use]
pub fn is_valid_measurement(value: f64) -> bool {
    value >= 0.0
}
