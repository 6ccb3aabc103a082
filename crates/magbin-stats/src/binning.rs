//! Fixed-step binning over a continuous value range
//!
//! A [`BinGrid`] is an ascending sequence of bin centers spaced by a fixed
//! step, laid out so that it covers the observed range of the values being
//! binned. Each center is paired with a half-width at query time to form a
//! [`BinWindow`], the half-open interval `(center - half_width, center + half_width]`.
//!
//! Centers are never materialised: a grid is only a start, a step and a
//! count, and the windows holding a value are found arithmetically.
//!
//! Step and half-width are independent: with `half_width < step / 2` the
//! windows leave gaps, with `half_width > step / 2` neighbouring windows
//! overlap and a value may belong to more than one bin.
//!
//! # Examples
//!
//! ```
//! use magbin_stats::binning::BinGrid;
//!
//! let grid = BinGrid::spanning(10.0, 12.4, 1.0).unwrap();
//! assert_eq!(grid.center(3), 13.0);
//!
//! let hits = grid.indices_containing(11.5, 0.5).collect::<Vec<_>>();
//! assert_eq!(hits, [1]);
//! assert!(!grid.window(1, 0.5).contains(10.5));
//! ```

/// Relative tolerance used when deciding whether the grid has reached its end.
const END_TOLERANCE: f64 = 1e-9;

/// A single bin: a center and the half-width of its inclusion window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinWindow {
    pub center: f64,
    pub half_width: f64,
}

impl BinWindow {
    #[must_use]
    pub fn new(center: f64, half_width: f64) -> Self {
        Self { center, half_width }
    }

    /// Lower (exclusive) edge of the window.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.center - self.half_width
    }

    /// Upper (inclusive) edge of the window.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.center + self.half_width
    }

    /// Returns `true` if `value` lies in `(lower, upper]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use magbin_stats::binning::BinWindow;
    ///
    /// let window = BinWindow::new(10.0, 0.5);
    /// assert!(!window.contains(9.5));
    /// assert!(window.contains(10.5));
    /// ```
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower() < value && value <= self.upper()
    }
}

/// Ascending, evenly spaced bin centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinGrid {
    start: f64,
    step: f64,
    len: usize,
}

impl BinGrid {
    /// Builds the grid covering `[min, max]` with the given step.
    ///
    /// Centers run from `floor(min)` to `ceil(max)` inclusive. When `step`
    /// does not divide that span and the last center would fall below `max`,
    /// one further center is appended so every value in `[min, max]` has a
    /// center at or above it.
    ///
    /// # Returns
    ///
    /// `None` when `min`/`max` are not finite, `min > max`, or `step` is not
    /// a positive finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use magbin_stats::binning::BinGrid;
    ///
    /// let grid = BinGrid::spanning(10.2, 11.0, 0.5).unwrap();
    /// assert_eq!([grid.center(0), grid.center(1), grid.center(2)], [10.0, 10.5, 11.0]);
    ///
    /// assert!(BinGrid::spanning(1.0, 2.0, 0.0).is_none());
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn spanning(min: f64, max: f64, step: f64) -> Option<Self> {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return None;
        }
        if !(step.is_finite() && step > 0.0) {
            return None;
        }

        let start = min.floor();
        let end = max.ceil();
        // saturates for absurdly small steps
        let steps = ((end - start) / step + END_TOLERANCE).floor() as usize;
        let mut grid = Self {
            start,
            step,
            len: steps.saturating_add(1),
        };
        if grid.center(steps) + step * END_TOLERANCE < max {
            grid.len = grid.len.saturating_add(1);
        }
        Some(grid)
    }

    /// Center at `index`, computed as `start + index * step` so that long
    /// grids do not accumulate rounding error.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn center(&self, index: usize) -> f64 {
        self.start + (index as f64) * self.step
    }

    #[must_use]
    pub fn window(&self, index: usize, half_width: f64) -> BinWindow {
        BinWindow::new(self.center(index), half_width)
    }

    /// Indices of the windows of `half_width` that contain `value`, ascending.
    ///
    /// Only the few indices around `value` are inspected, so the cost does
    /// not depend on the size of the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use magbin_stats::binning::BinGrid;
    ///
    /// let grid = BinGrid::spanning(10.0, 11.0, 1.0).unwrap();
    /// assert_eq!(grid.indices_containing(10.5, 0.5).collect::<Vec<_>>(), [0]);
    /// assert_eq!(grid.indices_containing(10.5, 1.0).collect::<Vec<_>>(), [0, 1]);
    /// ```
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn indices_containing(
        &self,
        value: f64,
        half_width: f64,
    ) -> impl Iterator<Item = usize> + '_ {
        // Float-to-int casts saturate, so out-of-grid values give empty ranges
        let lower = ((value - half_width - self.start) / self.step).floor() - 1.0;
        let upper = ((value + half_width - self.start) / self.step).ceil() + 2.0;
        let first = (lower as usize).min(self.len);
        let last = (upper as usize).min(self.len);
        (first..last).filter(move |&index| self.window(index, half_width).contains(value))
    }
}
