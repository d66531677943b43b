use log::debug;
use num_traits::Float;

use crate::{
    Result, Window, Windowed,
    helper::is_nan_or_inf,
    utils::{Max, Min, MonotonicQueue, OrderPolicy},
};

/// Window plus monotonic candidate queue shared by [`RollingMax`] and [`RollingMin`]
#[derive(Debug, Clone)]
struct Extremum<T, O> {
    window: Window<T>,
    queue: MonotonicQueue<T, O>,
    non_finite: usize,
}

impl<T, O> Extremum<T, O>
where
    T: Float + Default,
    O: OrderPolicy<T>,
{
    fn new(period: usize, kind: &str) -> Result<Self> {
        let window = Window::new(period)?;
        debug!("rolling {kind} created, period={period}");
        Ok(Self {
            window,
            queue: MonotonicQueue::new(period),
            non_finite: 0,
        })
    }

    fn update(&mut self, value: T) -> Option<T> {
        if let Some(evicted) = self.window.push(value) {
            if is_nan_or_inf(evicted) {
                self.non_finite -= 1;
            }
        }

        if is_nan_or_inf(value) {
            self.non_finite += 1;
            self.queue.skip();
        } else {
            self.queue.push(value);
        }

        self.value()
    }

    fn is_ready(&self) -> bool {
        !self.window.is_empty() && self.non_finite == 0
    }

    fn value(&self) -> Option<T> {
        self.queue.front().filter(|_| self.is_ready())
    }

    fn position(&self) -> Option<usize> {
        self.queue.front_position().filter(|_| self.is_ready())
    }

    fn reset(&mut self) {
        self.window.reset();
        self.queue.reset();
        self.non_finite = 0;
    }
}

/// # Rolling Maximum
///
/// Maximum of the last `period` values in amortized O(1) per update. A
/// monotonic queue keeps only the values that can still become the maximum,
/// so each observation is pushed and popped at most once over its lifetime.
///
/// Results are reported from the first update on. While the window holds a NaN
/// or infinite value the maximum is `None`.
///
/// # Examples
///
/// ```
/// # use ta_rolling::RollingMax;
/// let mut max = RollingMax::new(3).unwrap();
/// let inputs = [25.4, 26.2, 26.0, 26.1, 25.8, 25.9, 26.3, 26.2, 26.5];
/// let results: Vec<_> = inputs.iter().filter_map(|&v| max.update(v)).collect();
/// assert_eq!(results, [25.4, 26.2, 26.2, 26.2, 26.1, 26.1, 26.3, 26.3, 26.5]);
/// ```
#[derive(Debug, Clone)]
pub struct RollingMax<T>(Extremum<T, Max>);

impl<T: Float + Default> RollingMax<T> {
    /// Creates a new `RollingMax` over the last `period` values
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The tracker, or `InvalidConfiguration` if `period` is zero
    pub fn new(period: usize) -> Result<Self> {
        Extremum::new(period, "max").map(Self)
    }

    /// Pushes a new value and returns the maximum of the window
    pub fn update(&mut self, value: T) -> Option<T> {
        self.0.update(value)
    }

    /// Returns the maximum of the window without pushing a value
    pub fn max(&self) -> Option<T> {
        self.0.value()
    }

    /// Returns the window position (oldest = 0) of the maximum
    ///
    /// When several values tie for the maximum, the most recent one is reported.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_rolling::RollingMax;
    /// let mut max = RollingMax::new(4).unwrap();
    /// for v in [3.0, 9.0, 1.0, 9.0, 2.0] {
    ///     max.update(v);
    /// }
    /// assert_eq!(max.position(), Some(2));
    /// ```
    pub fn position(&self) -> Option<usize> {
        self.0.position()
    }

    /// Resets the tracker to its freshly constructed state
    pub fn reset(&mut self) -> &mut Self {
        self.0.reset();
        self
    }
}

impl<T: Copy> Windowed<T> for RollingMax<T> {
    fn window(&self) -> &Window<T> {
        &self.0.window
    }
}

/// # Rolling Minimum
///
/// Minimum of the last `period` values in amortized O(1) per update, the
/// mirror image of [`RollingMax`].
///
/// # Examples
///
/// ```
/// # use ta_rolling::RollingMin;
/// let mut min = RollingMin::new(3).unwrap();
/// let inputs = [25.4, 26.2, 26.0, 26.1, 25.8, 25.9, 26.3, 26.2, 26.5];
/// let results: Vec<_> = inputs.iter().filter_map(|&v| min.update(v)).collect();
/// assert_eq!(results, [25.4, 25.4, 25.4, 26.0, 25.8, 25.8, 25.8, 25.9, 26.2]);
/// ```
#[derive(Debug, Clone)]
pub struct RollingMin<T>(Extremum<T, Min>);

impl<T: Float + Default> RollingMin<T> {
    /// Creates a new `RollingMin` over the last `period` values
    pub fn new(period: usize) -> Result<Self> {
        Extremum::new(period, "min").map(Self)
    }

    /// Pushes a new value and returns the minimum of the window
    pub fn update(&mut self, value: T) -> Option<T> {
        self.0.update(value)
    }

    /// Returns the minimum of the window without pushing a value
    pub fn min(&self) -> Option<T> {
        self.0.value()
    }

    /// Returns the window position (oldest = 0) of the minimum, the most
    /// recent one on ties
    pub fn position(&self) -> Option<usize> {
        self.0.position()
    }

    /// Resets the tracker to its freshly constructed state
    pub fn reset(&mut self) -> &mut Self {
        self.0.reset();
        self
    }
}

impl<T: Copy> Windowed<T> for RollingMin<T> {
    fn window(&self) -> &Window<T> {
        &self.0.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn naive_max(values: &[f64]) -> f64 {
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    fn naive_min(values: &[f64]) -> f64 {
        values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_empty_tracker() {
        let max = RollingMax::<f64>::new(3).unwrap();
        let min = RollingMin::<f64>::new(3).unwrap();
        assert_eq!(max.max(), None);
        assert_eq!(min.min(), None);
        assert_eq!(max.position(), None);
    }

    #[test]
    fn test_zero_period() {
        assert!(RollingMax::<f64>::new(0).is_err());
        assert!(RollingMin::<f64>::new(0).is_err());
    }

    #[test]
    fn test_against_naive_scan() {
        let input = [
            31.0, 4.0, 52.0, 60.0, 61.0, 15.0, 28.0, 2.0, 36.0, 1.0, 4.0, 39.0, 12.0, 96.0, 1.0,
            21.0, 95.0, 20.0, 35.0, 83.0,
        ];

        for period in 1..=6 {
            let mut max = RollingMax::new(period).unwrap();
            let mut min = RollingMin::new(period).unwrap();

            for (i, &v) in input.iter().enumerate() {
                let live = &input[(i + 1).saturating_sub(period)..=i];
                assert_eq!(max.update(v), Some(naive_max(live)));
                assert_eq!(min.update(v), Some(naive_min(live)));
            }
        }
    }

    #[test]
    fn test_descending_then_ascending() {
        let mut max = RollingMax::new(3).unwrap();
        let mut min = RollingMin::new(3).unwrap();
        let input = [9.0, 8.0, 7.0, 6.0, 7.0, 8.0, 9.0];

        let maxes: Vec<_> = input.iter().filter_map(|&v| max.update(v)).collect();
        let mins: Vec<_> = input.iter().filter_map(|&v| min.update(v)).collect();
        assert_eq!(maxes, [9.0, 9.0, 9.0, 8.0, 7.0, 8.0, 9.0]);
        assert_eq!(mins, [9.0, 8.0, 7.0, 6.0, 6.0, 6.0, 7.0]);
    }

    #[test]
    fn test_position_of_extremum() {
        let mut min = RollingMin::new(3).unwrap();
        min.update(5.0);
        min.update(1.0);
        min.update(3.0);
        assert_eq!(min.position(), Some(1));
        min.update(4.0);
        assert_eq!(min.position(), Some(0));
        min.update(6.0);
        assert_eq!(min.min(), Some(3.0));
        assert_eq!(min.position(), Some(0));
        assert_eq!(min.get(0), Ok(3.0));
    }

    #[test]
    fn test_non_finite_gap() {
        let mut max = RollingMax::new(2).unwrap();
        assert_eq!(max.update(1.0), Some(1.0));
        assert_eq!(max.update(f64::NAN), None);
        assert_eq!(max.update(0.5), None);
        assert_eq!(max.update(0.25), Some(0.5));
    }

    #[test]
    fn test_reset() {
        let mut max = RollingMax::new(2).unwrap();
        max.update(10.0);
        max.update(20.0);
        max.reset();
        assert!(max.is_empty());
        assert_eq!(max.update(1.0), Some(1.0));
        assert_eq!(max.position(), Some(0));
    }
}
