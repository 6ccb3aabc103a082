//! Per-bin means of measured fields
//!
//! [`aggregate`] bins the table by a selection field (typically the input
//! magnitude) and, for every non-empty bin, averages each target field over
//! the records whose measurement did not fail.
//!
//! # Examples
//!
//! ```
//! use magbin_analysis::{
//!     aggregate::{BinMean, aggregate},
//!     bins::BinSpec,
//!     table::RecordTable,
//! };
//!
//! let table = RecordTable::parse_str(
//!     "#mag sizeA sizeB\n10 2 -1\n10.4 4 6\n11 -1 3\n",
//! )
//! .unwrap();
//! let result = aggregate(&table, "mag", &["sizeA", "sizeB"], BinSpec::default()).unwrap();
//!
//! assert_eq!(result.centers().collect::<Vec<_>>(), [10.0, 11.0]);
//! assert_eq!(result.bins[0].means[0].mean, BinMean::Mean(3.0));
//! assert_eq!(result.bins[1].means[0].mean, BinMean::NoData);
//! ```

use magbin_stats::descriptive;
use serde::Serialize;

use crate::{
    bins::{self, BinSpec, BinnedRecords, InvalidInput},
    table::RecordTable,
};

/// Value written in place of a mean when a bin has no valid measurement.
pub const MISSING_SENTINEL: f64 = -1.0;

/// Mean of one field in one bin.
///
/// Serialises as the number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum BinMean {
    Mean(f64),
    /// The bin has records but none with a valid value for this field.
    NoData,
}

impl BinMean {
    pub(crate) fn from_valid<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        descriptive::mean(values).map_or(Self::NoData, Self::Mean)
    }

    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Mean(v) => Some(v),
            Self::NoData => None,
        }
    }

    /// The mean, or [`MISSING_SENTINEL`] when there is none.
    #[must_use]
    pub fn or_sentinel(self) -> f64 {
        self.value().unwrap_or(MISSING_SENTINEL)
    }
}

impl From<BinMean> for Option<f64> {
    fn from(mean: BinMean) -> Self {
        mean.value()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMean {
    pub field: String,
    /// Records in the bin with a valid value for this field.
    pub valid: usize,
    pub mean: BinMean,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinAggregate {
    pub center: f64,
    /// Records in the bin window, valid or not.
    pub members: usize,
    /// One entry per target field, in request order.
    pub means: Vec<FieldMean>,
}

/// Per-bin means in ascending bin-center order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedAggregate {
    pub selection: String,
    pub fields: Vec<String>,
    pub spec: BinSpec,
    pub bins: Vec<BinAggregate>,
}

impl BinnedAggregate {
    pub fn centers(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins.iter().map(|b| b.center)
    }

    /// Mean of `field` in the bin at `center`, if that bin exists.
    #[must_use]
    pub fn mean(&self, center: f64, field: &str) -> Option<BinMean> {
        self.bins
            .iter()
            .find(|b| b.center.total_cmp(&center).is_eq())?
            .means
            .iter()
            .find(|m| m.field == field)
            .map(|m| m.mean)
    }
}

/// Computes per-bin means of `targets`, binning records by `selection`.
///
/// Bins with no member record are omitted. Within a bin, each target's mean
/// uses only values accepted by [`bins::is_valid_measurement`]; if none
/// remain the entry is [`BinMean::NoData`]. Repeated target names are
/// collapsed to their first occurrence.
pub fn aggregate<S>(
    table: &RecordTable,
    selection: &str,
    targets: &[S],
    spec: BinSpec,
) -> Result<BinnedAggregate, InvalidInput>
where
    S: AsRef<str>,
{
    let binned = BinnedRecords::new(table, selection, spec)?;
    let columns = bins::require_columns(table, targets)?;

    let bins = binned
        .bins
        .iter()
        .map(|bin| {
            let means = columns
                .iter()
                .map(|(field, values)| {
                    let valid = bin
                        .rows
                        .iter()
                        .map(|&row| values[row])
                        .filter(|&v| bins::is_valid_measurement(v))
                        .collect::<Vec<_>>();
                    FieldMean {
                        field: field.clone(),
                        valid: valid.len(),
                        mean: BinMean::from_valid(valid),
                    }
                })
                .collect();
            BinAggregate {
                center: bin.center,
                members: bin.rows.len(),
                means,
            }
        })
        .collect();

    Ok(BinnedAggregate {
        selection: binned.selection,
        fields: columns.into_iter().map(|(field, _)| field).collect(),
        spec: binned.spec,
        bins,
    })
}
