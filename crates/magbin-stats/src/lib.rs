//! Numeric statistics used by the magbin analyses.
//!
//! This crate knows nothing about records or field names; it works on plain
//! `f64` values.
//!
//! # Modules
//!
//! - [`binning`]: Fixed-step bin grids and half-open bin windows
//! - [`descriptive`]: Mean, median, variance and friends
//! - [`percentiles`]: Nearest-rank percentile computation and storage
//! - [`histogram`]: Equal-width histograms
//!
//! # Examples
//!
//! ## Binning values by a fixed step
//!
//! ```
//! use magbin_stats::binning::BinGrid;
//!
//! let values = [10.0, 10.4, 11.0];
//! let grid = BinGrid::spanning(10.0, 11.0, 1.0).unwrap();
//! let mut counts = [0; 2];
//! for &v in &values {
//!     for index in grid.indices_containing(v, 0.5) {
//!         counts[index] += 1;
//!     }
//! }
//! assert_eq!(counts, [2, 1]);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use magbin_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod binning;
pub mod descriptive;
pub mod histogram;
pub mod percentiles;
