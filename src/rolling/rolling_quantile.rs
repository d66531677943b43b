use log::debug;
use num_traits::Float;

use crate::{
    Result, RollingError, Window, Windowed,
    helper::{is_nan_or_inf, nearest_rank},
    utils::RbTree,
};

/// # Rolling Quantile
///
/// Nearest-rank quantile of the last `period` values. The live values are kept
/// in an order-statistic red-black tree, so each update costs O(log n): the
/// evicted value is removed, the new one inserted, and the value of rank
/// `ceil(q * len)` (1-indexed, ascending, clamped to `[1, len]`) is selected.
/// No interpolation takes place; the result is always one of the live values.
///
/// # Examples
///
/// ```
/// # use ta_rolling::RollingQuantile;
/// let mut quantile = RollingQuantile::new(10, 0.3).unwrap();
/// let results: Vec<_> = (1..=10).filter_map(|i| quantile.update(i as f64)).collect();
/// assert_eq!(results, [1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RollingQuantile<T> {
    /// Raw values of the window
    window: Window<T>,
    /// Finite values of the window, ordered
    tree: RbTree<T>,
    /// Quantile fraction in `(0, 1]`
    q: f64,
    /// Number of NaN or infinite values in the window
    non_finite: usize,
}

impl<T> RollingQuantile<T>
where
    T: Float + ordered_float::FloatCore + Default,
{
    /// Creates a new `RollingQuantile` over the last `period` values
    ///
    /// # Arguments
    ///
    /// * `period` - The size of the rolling window
    /// * `q` - The quantile fraction, `0.5` for the median
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The tracker, or `InvalidConfiguration` if `period` is
    ///   zero or `q` lies outside `(0, 1]`
    pub fn new(period: usize, q: f64) -> Result<Self> {
        if q.is_nan() || q <= 0.0 || q > 1.0 {
            return Err(RollingError::InvalidConfiguration(
                "quantile must lie in (0, 1]",
            ));
        }

        let window = Window::new(period)?;
        debug!("rolling quantile created, period={period}, q={q}");
        Ok(Self {
            window,
            tree: RbTree::new(period),
            q,
            non_finite: 0,
        })
    }

    /// Returns the configured quantile fraction
    pub const fn q(&self) -> f64 {
        self.q
    }

    /// Pushes a new value and returns the quantile of the window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The quantile, or `None` while the window holds a
    ///   non-finite value
    pub fn update(&mut self, value: T) -> Option<T> {
        if let Some(evicted) = self.window.push(value) {
            if is_nan_or_inf(evicted) {
                self.non_finite -= 1;
            } else {
                let removed = self.tree.remove(evicted);
                debug_assert!(removed, "evicted value missing from the order tree");
            }
        }

        if is_nan_or_inf(value) {
            self.non_finite += 1;
        } else {
            self.tree.insert(value);
        }

        self.quantile()
    }

    /// Returns the quantile of the window without pushing a value
    pub fn quantile(&self) -> Option<T> {
        if self.non_finite > 0 || self.tree.is_empty() {
            return None;
        }
        let rank = nearest_rank(self.q, self.tree.len())?;
        self.tree.select(rank - 1)
    }

    /// Resets the tracker to its freshly constructed state
    pub fn reset(&mut self) -> &mut Self {
        self.window.reset();
        self.tree.reset();
        self.non_finite = 0;
        self
    }
}

impl<T: Copy> Windowed<T> for RollingQuantile<T> {
    fn window(&self) -> &Window<T> {
        &self.window
    }
}
