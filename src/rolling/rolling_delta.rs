use log::{debug, trace};
use num_traits::Float;

use crate::{Result, RollingError, Window, Windowed, helper::is_nan_or_inf};

/// Window shared by [`RollingDelta`] and [`RollingPctChange`]
///
/// Both only compare the newest value against the oldest, which the window
/// already answers in O(1), so there is no auxiliary state. Values between the
/// two ends never affect the result.
#[derive(Debug, Clone)]
struct Span<T> {
    window: Window<T>,
}

impl<T: Float + Default> Span<T> {
    fn new(period: usize, kind: &str) -> Result<Self> {
        let window = Window::new(period)?;
        debug!("rolling {kind} created, period={period}");
        Ok(Self { window })
    }

    fn push(&mut self, value: T) {
        self.window.push(value);
    }

    /// Returns `(head, tail)` when both ends are finite
    fn ends(&self) -> Option<(T, T)> {
        let head = self.window.head().ok()?;
        let tail = self.window.tail().ok()?;
        (!is_nan_or_inf(head) && !is_nan_or_inf(tail)).then_some((head, tail))
    }

    fn reset(&mut self) {
        self.window.reset();
    }
}

/// # Rolling Delta
///
/// Difference between the newest and the oldest value of the window,
/// `tail - head`. With a single value both ends coincide and the delta is zero.
///
/// # Examples
///
/// ```
/// # use ta_rolling::RollingDelta;
/// let mut delta = RollingDelta::new(3).unwrap();
/// let results: Vec<_> = [1.0, 4.0, 9.0, 16.0].iter().filter_map(|&v| delta.update(v)).collect();
/// assert_eq!(results, [0.0, 3.0, 8.0, 12.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RollingDelta<T>(Span<T>);

impl<T: Float + Default> RollingDelta<T> {
    /// Creates a new `RollingDelta` over the last `period` values
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The tracker, or `InvalidConfiguration` if `period` is zero
    pub fn new(period: usize) -> Result<Self> {
        Span::new(period, "delta").map(Self)
    }

    /// Pushes a new value and returns `tail - head`
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The delta, or `None` while the oldest or newest value is
    ///   NaN or infinite
    pub fn update(&mut self, value: T) -> Option<T> {
        self.0.push(value);
        self.delta()
    }

    /// Returns `tail - head` without pushing a value
    pub fn delta(&self) -> Option<T> {
        self.0.ends().map(|(head, tail)| tail - head)
    }

    /// Resets the tracker to its freshly constructed state
    pub fn reset(&mut self) -> &mut Self {
        self.0.reset();
        self
    }
}

impl<T: Copy> Windowed<T> for RollingDelta<T> {
    fn window(&self) -> &Window<T> {
        &self.0.window
    }
}

/// # Rolling Percent Change
///
/// Change from the oldest to the newest value of the window in percent,
/// `(tail - head) / head * 100`.
///
/// A zero oldest value has no defined percent change. `update` still records
/// the value and then reports [`RollingError::UndefinedResult`] instead of an
/// infinite or NaN result.
///
/// # Examples
///
/// ```
/// # use ta_rolling::{RollingPctChange, RollingError};
/// let mut pct = RollingPctChange::new(2).unwrap();
/// assert_eq!(pct.update(50.0), Ok(Some(0.0)));
/// assert_eq!(pct.update(75.0), Ok(Some(50.0)));
///
/// let mut pct = RollingPctChange::new(2).unwrap();
/// assert!(matches!(pct.update(0.0), Err(RollingError::UndefinedResult(_))));
/// assert!(matches!(pct.update(1.0), Err(RollingError::UndefinedResult(_))));
/// assert_eq!(pct.update(2.0), Ok(Some(100.0)));
/// ```
#[derive(Debug, Clone)]
pub struct RollingPctChange<T>(Span<T>);

impl<T: Float + Default> RollingPctChange<T> {
    /// Creates a new `RollingPctChange` over the last `period` values
    pub fn new(period: usize) -> Result<Self> {
        Span::new(period, "percent change").map(Self)
    }

    /// Pushes a new value and returns the percent change across the window
    ///
    /// # Returns
    ///
    /// * `Result<Option<T>>` - The percent change, `Ok(None)` while the oldest or
    ///   newest value is NaN or infinite, or `UndefinedResult` if the oldest value is zero
    pub fn update(&mut self, value: T) -> Result<Option<T>> {
        self.0.push(value);
        self.pct_change()
    }

    /// Returns the percent change without pushing a value
    pub fn pct_change(&self) -> Result<Option<T>> {
        let Some((head, tail)) = self.0.ends() else {
            return Ok(None);
        };

        if head.is_zero() {
            trace!("percent change undefined, oldest value in window is zero");
            return Err(RollingError::UndefinedResult(
                "percent change from a zero reference value",
            ));
        }

        Ok(T::from(100.0).map(|hundred| (tail - head) / head * hundred))
    }

    /// Resets the tracker to its freshly constructed state
    pub fn reset(&mut self) -> &mut Self {
        self.0.reset();
        self
    }
}

impl<T: Copy> Windowed<T> for RollingPctChange<T> {
    fn window(&self) -> &Window<T> {
        &self.0.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_delta_against_slice() {
        let input: std::vec::Vec<f64> = (0..20).map(f64::from).collect();
        let mut delta = RollingDelta::new(3).unwrap();

        for (i, &v) in input.iter().enumerate() {
            let live = &input[(i + 1).saturating_sub(3)..=i];
            assert_eq!(delta.update(v), Some(live[live.len() - 1] - live[0]));
        }
    }

    #[test]
    fn test_pct_change_against_slice() {
        let input: std::vec::Vec<f64> = (0..20).map(f64::from).collect();
        let mut pct = RollingPctChange::new(3).unwrap();

        for (i, &v) in input.iter().enumerate() {
            let live = &input[(i + 1).saturating_sub(3)..=i];
            let (head, tail) = (live[0], live[live.len() - 1]);
            let result = pct.update(v);

            if head == 0.0 {
                assert!(matches!(result, Err(RollingError::UndefinedResult(_))));
            } else {
                assert_approx_eq!(result.unwrap().unwrap(), (tail - head) / head * 100.0, 1e-12);
            }
        }
    }

    #[test]
    fn test_undefined_keeps_window_consistent() {
        let mut pct = RollingPctChange::new(3).unwrap();
        assert!(pct.update(0.0).is_err());
        assert_eq!(pct.len(), 1);
        assert_eq!(pct.head(), Ok(0.0));
        assert!(pct.pct_change().is_err());
    }

    #[test]
    fn test_negative_reference() {
        let mut pct = RollingPctChange::new(2).unwrap();
        pct.update(-4.0).unwrap();
        assert_eq!(pct.update(-2.0), Ok(Some(-50.0)));
    }

    #[test]
    fn test_empty_reads() {
        let delta = RollingDelta::<f64>::new(2).unwrap();
        assert_eq!(delta.delta(), None);
        assert_eq!(delta.head(), Err(RollingError::Empty));
        assert_eq!(delta.tail(), Err(RollingError::Empty));

        let pct = RollingPctChange::<f64>::new(2).unwrap();
        assert_eq!(pct.pct_change(), Ok(None));
    }

    #[test]
    fn test_non_finite_gap() {
        let mut delta = RollingDelta::new(2).unwrap();
        delta.update(1.0);
        assert_eq!(delta.update(f64::INFINITY), None);
        assert_eq!(delta.update(3.0), None);
        assert_eq!(delta.update(7.0), Some(4.0));
    }

    #[test]
    fn test_non_finite_between_ends() {
        let mut delta = RollingDelta::new(3).unwrap();
        let mut pct = RollingPctChange::new(3).unwrap();
        for v in [1.0, f64::NAN] {
            delta.update(v);
            pct.update(v).unwrap();
        }
        assert_eq!(delta.update(5.0), Some(4.0));
        assert_eq!(pct.update(5.0), Ok(Some(400.0)));
        assert!(delta.get(1).unwrap().is_nan());
    }

    #[test]
    fn test_reset() {
        let mut delta = RollingDelta::new(2).unwrap();
        delta.update(1.0);
        delta.update(5.0);
        delta.reset();
        assert_eq!(delta.update(2.0), Some(0.0));
    }
}
