use log::{debug, trace};
use num_traits::Float;

use crate::{Kbn, Result, Window, Windowed, helper::is_nan_or_inf};

/// # Rolling Standard Deviation
///
/// Standard deviation of the last `period` values from running sums of values
/// and squares, O(1) per update. Population statistics by default; call
/// [`set_ddof`](Self::set_ddof) for the sample (n - 1) estimator.
///
/// # Examples
///
/// ```
/// # use ta_rolling::RollingStdDev;
/// # use assert_approx_eq::assert_approx_eq;
/// let mut std_dev = RollingStdDev::new(3).unwrap();
/// let inputs = [25.4_f64, 26.2, 26.0, 26.1, 25.8, 25.9, 26.3, 26.2, 26.5];
/// let results: Vec<_> = inputs.iter().filter_map(|&v| std_dev.update(v)).collect();
///
/// let expected: [f64; 7] = [0.3399, 0.0816, 0.1247, 0.1247, 0.216, 0.17, 0.1247];
/// for (e, r) in expected.iter().zip(&results[2..]) {
///     assert_approx_eq!(e, r, 0.0001);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RollingStdDev<T> {
    /// Raw values of the window
    window: Window<T>,
    /// Sum of the finite values
    sum: Kbn<T>,
    /// Sum of squares of the finite values
    sum_sq: Kbn<T>,
    /// Number of NaN or infinite values in the window
    non_finite: usize,
    /// Delta Degrees of Freedom
    ddof: bool,
}

impl<T: Float + Default> RollingStdDev<T> {
    /// Creates a new `RollingStdDev` over the last `period` values
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The tracker, or `InvalidConfiguration` if `period` is zero
    pub fn new(period: usize) -> Result<Self> {
        let window = Window::new(period)?;
        debug!("rolling std dev created, period={period}");
        Ok(Self {
            window,
            sum: Kbn::default(),
            sum_sq: Kbn::default(),
            non_finite: 0,
            ddof: false,
        })
    }

    /// Returns the Delta Degrees of Freedom
    pub const fn ddof(&self) -> bool {
        self.ddof
    }

    /// Sets the Delta Degrees of Freedom
    ///
    /// # Arguments
    ///
    /// * `ddof` - `true` for the sample estimator, `false` for the population one
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The tracker
    pub const fn set_ddof(&mut self, ddof: bool) -> &mut Self {
        self.ddof = ddof;
        self
    }

    /// Pushes a new value and returns the standard deviation of the window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The standard deviation, or `None` while the window holds a
    ///   non-finite value or too few values for the estimator
    pub fn update(&mut self, value: T) -> Option<T> {
        if let Some(evicted) = self.window.push(value) {
            if is_nan_or_inf(evicted) {
                self.non_finite -= 1;
            } else {
                self.sum -= evicted;
                self.sum_sq -= evicted * evicted;
            }
        }

        if is_nan_or_inf(value) {
            self.non_finite += 1;
        } else {
            self.sum += value;
            self.sum_sq += value * value;
        }

        self.stddev()
    }

    /// Returns the variance of the window without pushing a value
    pub fn variance(&self) -> Option<T> {
        if self.non_finite > 0 {
            return None;
        }

        let len = self.window.len();
        let denom = len.checked_sub(usize::from(self.ddof)).filter(|&d| d > 0)?;
        let n = T::from(len)?;
        let sum = self.sum.total();

        let variance = (self.sum_sq.total() - sum * sum / n) / T::from(denom)?;
        Some(variance.max(T::zero()))
    }

    /// Returns the standard deviation of the window without pushing a value
    pub fn stddev(&self) -> Option<T> {
        self.variance().map(|v| v.sqrt())
    }

    /// Rebuilds the running sums from the window
    pub fn recompute(&mut self) -> &mut Self {
        trace!("rolling std dev rebuilt, len={}", self.window.len());
        self.sum = Kbn::default();
        self.sum_sq = Kbn::default();
        for &v in self.window.iter() {
            if !is_nan_or_inf(v) {
                self.sum += v;
                self.sum_sq += v * v;
            }
        }
        self
    }

    /// Resets the tracker, keeping the configured ddof
    pub fn reset(&mut self) -> &mut Self {
        self.window.reset();
        self.sum = Kbn::default();
        self.sum_sq = Kbn::default();
        self.non_finite = 0;
        self
    }
}

impl<T: Copy> Windowed<T> for RollingStdDev<T> {
    fn window(&self) -> &Window<T> {
        &self.window
    }
}
