use log::{debug, trace};
use num_traits::Float;

use crate::{Kbn, Result, RollingError, Window, Windowed, helper::is_nan_or_inf};

/// # Weighted Moving Average
///
/// Linearly weighted average of the last `period` values: the oldest value
/// has weight `1`, the newest weight `period`, and the weighted sum is divided
/// by `period * (period + 1) / 2`.
///
/// The weighted sum is kept in O(1) per update. Once the window is full, every
/// value steps down by one weight, so the weighted sum loses the previous
/// plain sum and gains `period * value`:
///
/// ```text
/// W' = W - S + period * value
/// S' = S - evicted + value
/// ```
///
/// No average is reported until `period` values have been seen.
///
/// # Examples
///
/// ```
/// # use ta_rolling::Wma;
/// # use assert_approx_eq::assert_approx_eq;
/// let mut wma = Wma::new(5).unwrap();
/// let prices = [172.72_f64, 176.08, 178.67, 171.37, 172.38];
/// let results: Vec<_> = prices.iter().map(|&p| wma.update(p)).collect();
///
/// assert!(results[..4].iter().all(Option::is_none));
/// let expected: f64 = (172.72 + 2.0 * 176.08 + 3.0 * 178.67 + 4.0 * 171.37 + 5.0 * 172.38) / 15.0;
/// assert_approx_eq!(results[4].unwrap(), expected, 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Wma<T> {
    /// Raw values of the window
    window: Window<T>,
    /// Weighted sum, weights `1..=len` from oldest to newest
    weighted: Kbn<T>,
    /// Plain sum of the window
    simple: Kbn<T>,
    /// `period` as `T`
    period_t: T,
    /// Weight normalizer, `period * (period + 1) / 2`
    norm: T,
    /// Number of NaN or infinite values in the window
    non_finite: usize,
    /// Set while the sums no longer describe the window
    stale: bool,
}

impl<T: Float + Default> Wma<T> {
    /// Creates a new `Wma` over the last `period` values
    ///
    /// # Arguments
    ///
    /// * `period` - The size of the rolling window
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The indicator, or `InvalidConfiguration` if `period` is zero
    pub fn new(period: usize) -> Result<Self> {
        let window = Window::new(period)?;
        let period_t = T::from(period).ok_or(RollingError::InvalidConfiguration(
            "period is not representable in the value type",
        ))?;
        let two = T::one() + T::one();

        debug!("weighted moving average created, period={period}");
        Ok(Self {
            window,
            weighted: Kbn::default(),
            simple: Kbn::default(),
            period_t,
            norm: period_t * (period_t + T::one()) / two,
            non_finite: 0,
            stale: false,
        })
    }

    /// Pushes a new value and returns the weighted moving average
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The average, or `None` until the window is full and while it
    ///   holds a non-finite value
    pub fn update(&mut self, value: T) -> Option<T> {
        let evicted = self.window.push(value);
        if evicted.is_some_and(is_nan_or_inf) {
            self.non_finite -= 1;
        }
        if is_nan_or_inf(value) {
            self.non_finite += 1;
        }

        if self.non_finite > 0 {
            self.stale = true;
        } else if self.stale {
            self.recompute();
        } else {
            match evicted {
                Some(evicted) => {
                    self.weighted -= self.simple.total();
                    self.weighted += self.period_t * value;
                    self.simple -= evicted;
                    self.simple += value;
                }
                None => match T::from(self.window.len()) {
                    Some(weight) => {
                        self.weighted += weight * value;
                        self.simple += value;
                    }
                    None => {
                        self.recompute();
                    }
                },
            }
        }

        self.wma()
    }

    /// Returns the weighted moving average without pushing a value
    pub fn wma(&self) -> Option<T> {
        (self.window.is_full() && self.non_finite == 0 && !self.stale)
            .then(|| self.weighted.total() / self.norm)
    }

    /// Rebuilds both sums from the window, discarding accumulated rounding error
    pub fn recompute(&mut self) -> &mut Self {
        trace!("weighted moving average rebuilt, len={}", self.window.len());
        self.weighted = Kbn::default();
        self.simple = Kbn::default();

        let mut weight = T::zero();
        for &v in self.window.iter() {
            weight = weight + T::one();
            if !is_nan_or_inf(v) {
                self.weighted += weight * v;
                self.simple += v;
            }
        }
        self.stale = self.non_finite > 0;
        self
    }

    /// Resets the indicator to its freshly constructed state
    pub fn reset(&mut self) -> &mut Self {
        self.window.reset();
        self.weighted = Kbn::default();
        self.simple = Kbn::default();
        self.non_finite = 0;
        self.stale = false;
        self
    }
}

impl<T: Copy> Windowed<T> for Wma<T> {
    fn window(&self) -> &Window<T> {
        &self.window
    }
}
