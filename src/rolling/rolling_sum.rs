use log::{debug, trace};
use num_traits::Float;

use crate::{Kbn, Result, Window, Windowed, helper::is_nan_or_inf};

/// # Rolling Sum
///
/// Sum of the last `period` values, maintained in O(1) per update: the new
/// value is added and the evicted one subtracted. Both go through a
/// Kahan-Babuska-Neumaier accumulator, so rounding error does not compound over
/// long streams the way a plain `+=`/`-=` total would.
///
/// Results are reported from the first update on, over the values seen so far.
/// While the window holds a NaN or infinite value the sum is `None`.
///
/// # Examples
///
/// ```
/// # use ta_rolling::RollingSum;
/// let mut sum = RollingSum::new(3).unwrap();
/// let results: Vec<_> = (1..=5).filter_map(|i| sum.update(i as f64)).collect();
/// assert_eq!(results, [1.0, 3.0, 6.0, 9.0, 12.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RollingSum<T> {
    /// Raw values of the window
    window: Window<T>,
    /// Sum of the finite values in the window
    sum: Kbn<T>,
    /// Number of NaN or infinite values in the window
    non_finite: usize,
}

impl<T: Float + Default> RollingSum<T> {
    /// Creates a new `RollingSum` over the last `period` values
    ///
    /// # Arguments
    ///
    /// * `period` - The size of the rolling window
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The tracker, or `InvalidConfiguration` if `period` is zero
    pub fn new(period: usize) -> Result<Self> {
        let window = Window::new(period)?;
        debug!("rolling sum created, period={period}");
        Ok(Self {
            window,
            sum: Kbn::default(),
            non_finite: 0,
        })
    }

    /// Pushes a new value and returns the sum of the window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The sum, or `None` while the window holds a non-finite value
    pub fn update(&mut self, value: T) -> Option<T> {
        if let Some(evicted) = self.window.push(value) {
            if is_nan_or_inf(evicted) {
                self.non_finite -= 1;
            } else {
                self.sum -= evicted;
            }
        }

        if is_nan_or_inf(value) {
            self.non_finite += 1;
        } else {
            self.sum += value;
        }

        self.sum()
    }

    /// Returns the sum of the window without pushing a value
    pub fn sum(&self) -> Option<T> {
        (!self.window.is_empty() && self.non_finite == 0).then(|| self.sum.total())
    }

    /// Rebuilds the running sum from the window, discarding accumulated
    /// rounding error
    pub fn recompute(&mut self) -> &mut Self {
        trace!("rolling sum rebuilt, len={}", self.window.len());
        self.sum = Kbn::default();
        for &v in self.window.iter() {
            if !is_nan_or_inf(v) {
                self.sum += v;
            }
        }
        self
    }

    /// Resets the tracker to its freshly constructed state
    pub fn reset(&mut self) -> &mut Self {
        self.window.reset();
        self.sum = Kbn::default();
        self.non_finite = 0;
        self
    }
}

impl<T: Copy> Windowed<T> for RollingSum<T> {
    fn window(&self) -> &Window<T> {
        &self.window
    }
}

/// # Rolling Mean
///
/// Arithmetic mean of the last `period` values. While the window is filling
/// the mean is taken over the values seen so far, i.e. divided by the current
/// length rather than by `period`.
///
/// # Examples
///
/// ```
/// # use ta_rolling::RollingMean;
/// let mut mean = RollingMean::new(3).unwrap();
/// let results: Vec<_> = (1..=5).filter_map(|i| mean.update(i as f64)).collect();
/// assert_eq!(results, [1.0, 1.5, 2.0, 3.0, 4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RollingMean<T>(RollingSum<T>);

impl<T: Float + Default> RollingMean<T> {
    /// Creates a new `RollingMean` over the last `period` values
    pub fn new(period: usize) -> Result<Self> {
        RollingSum::new(period).map(Self)
    }

    /// Pushes a new value and returns the mean of the window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The mean, or `None` while the window holds a non-finite value
    pub fn update(&mut self, value: T) -> Option<T> {
        self.0.update(value);
        self.mean()
    }

    /// Returns the mean of the window without pushing a value
    pub fn mean(&self) -> Option<T> {
        let n = T::from(self.0.window.len())?;
        self.0.sum().map(|sum| sum / n)
    }

    /// Rebuilds the running sum from the window
    pub fn recompute(&mut self) -> &mut Self {
        self.0.recompute();
        self
    }

    /// Resets the tracker to its freshly constructed state
    pub fn reset(&mut self) -> &mut Self {
        self.0.reset();
        self
    }
}

impl<T: Copy> Windowed<T> for RollingMean<T> {
    fn window(&self) -> &Window<T> {
        &self.0.window
    }
}
