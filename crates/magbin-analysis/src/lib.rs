//! Binned analysis of simulated size measurements
//!
//! This crate turns a table of simulated profiles (input magnitude, input
//! size and sizes re-measured by one or more techniques) into per-bin
//! summaries. Measurements that failed carry a negative sentinel (`-1`) and
//! are excluded from every statistic.
//!
//! # Overview
//!
//! ```text
//! text table
//!     ↓
//! RecordTable (table)          column-major, immutable
//!     ↓
//! BinnedRecords (bins)         rows per selection-field bin
//!     ↓
//! ├─ aggregate      per-bin means      → export (summary text / JSON)
//! ├─ compare        residuals vs. input size
//! └─ distribution   per-bin histograms
//! ```
//!
//! # Examples
//!
//! ```
//! use magbin_analysis::{aggregate::aggregate, bins::BinSpec, export, table::RecordTable};
//!
//! let table = RecordTable::parse_str(
//!     "#magIn r50in r50meas\n21.2 2.0 1.8\n21.4 3.0 -1\n22.1 1.5 1.6\n",
//! )?;
//! let result = aggregate(&table, "magIn", &["r50in", "r50meas"], BinSpec::default())?;
//!
//! let text = export::summary_to_string(&result);
//! assert_eq!(text, "#magIn r50in r50meas\n21 2.5 1.8\n22 1.5 1.6\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod bins;
pub mod compare;
pub mod distribution;
pub mod export;
pub mod table;
