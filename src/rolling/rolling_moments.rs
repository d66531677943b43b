use log::{debug, trace};
use num_traits::Float;

use crate::{Kbn, Result, Window, Windowed, helper::is_nan_or_inf};

/// Window plus running power sums shared by [`RollingSkew`] and [`RollingKurt`]
///
/// Central moments are derived from the raw power sums on demand, so each
/// update costs O(1) regardless of the period.
#[derive(Debug, Clone)]
struct PowerSums<T> {
    window: Window<T>,
    /// Sum of inputs
    sum: Kbn<T>,
    /// Sum of squares
    sum_sq: Kbn<T>,
    /// Sum of cubes
    sum_cube: Kbn<T>,
    /// Sum of fourth powers
    sum_quad: Kbn<T>,
    non_finite: usize,
    /// Delta Degrees of Freedom
    ddof: bool,
}

/// Second, third and fourth central moments of the window
struct Central<T> {
    n: T,
    m2: T,
    m3: T,
    m4: T,
}

impl<T: Float + Default> PowerSums<T> {
    fn new(period: usize, kind: &str) -> Result<Self> {
        let window = Window::new(period)?;
        debug!("rolling {kind} created, period={period}");
        Ok(Self {
            window,
            sum: Kbn::default(),
            sum_sq: Kbn::default(),
            sum_cube: Kbn::default(),
            sum_quad: Kbn::default(),
            non_finite: 0,
            ddof: false,
        })
    }

    fn add(&mut self, v: T) {
        let sq = v * v;
        self.sum += v;
        self.sum_sq += sq;
        self.sum_cube += sq * v;
        self.sum_quad += sq * sq;
    }

    fn sub(&mut self, v: T) {
        let sq = v * v;
        self.sum -= v;
        self.sum_sq -= sq;
        self.sum_cube -= sq * v;
        self.sum_quad -= sq * sq;
    }

    fn push(&mut self, value: T) {
        if let Some(evicted) = self.window.push(value) {
            if is_nan_or_inf(evicted) {
                self.non_finite -= 1;
            } else {
                self.sub(evicted);
            }
        }

        if is_nan_or_inf(value) {
            self.non_finite += 1;
        } else {
            self.add(value);
        }
    }

    fn central(&self) -> Option<Central<T>> {
        if self.non_finite > 0 || self.window.is_empty() {
            return None;
        }

        let n = T::from(self.window.len())?;
        let _2 = T::from(2.0)?;
        let _3 = T::from(3.0)?;
        let _4 = T::from(4.0)?;
        let _6 = T::from(6.0)?;

        let m1 = self.sum.total() / n;
        let m2_raw = self.sum_sq.total() / n;
        let m3_raw = self.sum_cube.total() / n;
        let m4_raw = self.sum_quad.total() / n;

        let m1_sq = m1 * m1;
        let m1_cb = m1_sq * m1;

        let m2 = m2_raw - m1_sq;
        if m2 <= T::zero() {
            return None;
        }

        Some(Central {
            n,
            m2,
            m3: m3_raw - _3 * m1 * m2_raw + _2 * m1_cb,
            m4: m4_raw - _4 * m1 * m3_raw + _6 * m1_sq * m2_raw - _3 * m1_cb * m1,
        })
    }

    fn recompute(&mut self, kind: &str) {
        trace!("rolling {kind} rebuilt, len={}", self.window.len());
        self.sum = Kbn::default();
        self.sum_sq = Kbn::default();
        self.sum_cube = Kbn::default();
        self.sum_quad = Kbn::default();

        for &v in self.window.iter() {
            if !is_nan_or_inf(v) {
                let sq = v * v;
                self.sum += v;
                self.sum_sq += sq;
                self.sum_cube += sq * v;
                self.sum_quad += sq * sq;
            }
        }
    }

    fn reset(&mut self) {
        self.window.reset();
        self.sum = Kbn::default();
        self.sum_sq = Kbn::default();
        self.sum_cube = Kbn::default();
        self.sum_quad = Kbn::default();
        self.non_finite = 0;
    }
}

/// # Rolling Skewness
///
/// Skewness of the last `period` values from running sums of the first three
/// powers, O(1) per update.
/// - Positive values indicate a long tail on the right
/// - Negative values indicate a long tail on the left
///
/// Population skewness by default; [`set_ddof`](Self::set_ddof) applies the
/// `sqrt(n (n - 1)) / (n - 2)` sample correction. `None` while the window has
/// no spread, holds a non-finite value, or (sample) fewer than 3 values.
///
/// # Examples
///
/// ```
/// # use ta_rolling::RollingSkew;
/// # use assert_approx_eq::assert_approx_eq;
/// let mut skew = RollingSkew::new(4).unwrap();
/// let inputs = [25.4_f64, 26.2, 26.0, 26.1, 25.8, 25.9, 26.3, 26.2, 26.5];
/// let results: Vec<_> = inputs.iter().map(|&v| skew.update(v)).collect();
///
/// let expected: [f64; 6] = [-0.9794, -0.4347, 0.0, 0.2780, 0.0, -0.3233];
/// for (e, r) in expected.iter().zip(&results[3..]) {
///     assert_approx_eq!(e, r.unwrap(), 0.0001);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RollingSkew<T>(PowerSums<T>);

impl<T: Float + Default> RollingSkew<T> {
    /// Creates a new `RollingSkew` over the last `period` values
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The tracker, or `InvalidConfiguration` if `period` is zero
    pub fn new(period: usize) -> Result<Self> {
        PowerSums::new(period, "skew").map(Self)
    }

    /// Returns the Delta Degrees of Freedom
    pub const fn ddof(&self) -> bool {
        self.0.ddof
    }

    /// Sets the Delta Degrees of Freedom, `true` for the sample estimator
    pub const fn set_ddof(&mut self, ddof: bool) -> &mut Self {
        self.0.ddof = ddof;
        self
    }

    /// Pushes a new value and returns the skewness of the window
    pub fn update(&mut self, value: T) -> Option<T> {
        self.0.push(value);
        self.skew()
    }

    /// Returns the skewness of the window without pushing a value
    pub fn skew(&self) -> Option<T> {
        let Central { n, m2, m3, .. } = self.0.central()?;
        let g1 = m3 / (m2 * m2.sqrt());

        if !self.0.ddof {
            return Some(g1);
        }

        let _2 = T::from(2.0)?;
        if n <= _2 {
            return None;
        }
        Some((n * (n - T::one())).sqrt() / (n - _2) * g1)
    }

    /// Rebuilds the running sums from the window
    pub fn recompute(&mut self) -> &mut Self {
        self.0.recompute("skew");
        self
    }

    /// Resets the tracker, keeping the configured ddof
    pub fn reset(&mut self) -> &mut Self {
        self.0.reset();
        self
    }
}

impl<T: Copy> Windowed<T> for RollingSkew<T> {
    fn window(&self) -> &Window<T> {
        &self.0.window
    }
}

/// # Rolling Kurtosis
///
/// Excess kurtosis of the last `period` values from running sums of the first
/// four powers, O(1) per update. A normal distribution has an excess kurtosis
/// of 0; heavier tails give positive values.
///
/// Population kurtosis by default; [`set_ddof`](Self::set_ddof) applies the
/// unbiased sample correction. `None` while fewer than 4 values are present,
/// the window has no spread, or it holds a non-finite value.
///
/// # Examples
///
/// ```
/// # use ta_rolling::RollingKurt;
/// # use assert_approx_eq::assert_approx_eq;
/// let mut kurt = RollingKurt::new(4).unwrap();
/// kurt.set_ddof(true);
/// let inputs = [25.4_f64, 26.2, 26.0, 26.1, 25.8, 25.9, 26.3, 26.2, 26.5];
/// let results: Vec<_> = inputs.iter().filter_map(|&v| kurt.update(v)).collect();
///
/// let expected: [f64; 6] = [3.0144, 0.3429, -1.2, -1.6995, -4.3391, 0.928];
/// for (e, r) in expected.iter().zip(&results) {
///     assert_approx_eq!(e, r, 0.0001);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RollingKurt<T>(PowerSums<T>);

impl<T: Float + Default> RollingKurt<T> {
    /// Creates a new `RollingKurt` over the last `period` values
    pub fn new(period: usize) -> Result<Self> {
        PowerSums::new(period, "kurtosis").map(Self)
    }

    /// Returns the Delta Degrees of Freedom
    pub const fn ddof(&self) -> bool {
        self.0.ddof
    }

    /// Sets the Delta Degrees of Freedom, `true` for the sample estimator
    pub const fn set_ddof(&mut self, ddof: bool) -> &mut Self {
        self.0.ddof = ddof;
        self
    }

    /// Pushes a new value and returns the excess kurtosis of the window
    pub fn update(&mut self, value: T) -> Option<T> {
        self.0.push(value);
        self.kurt()
    }

    /// Returns the excess kurtosis of the window without pushing a value
    pub fn kurt(&self) -> Option<T> {
        let Central { n, m2, m4, .. } = self.0.central()?;
        let _1 = T::one();
        let _2 = T::from(2.0)?;
        let _3 = T::from(3.0)?;
        if n < T::from(4.0)? {
            return None;
        }

        if !self.0.ddof {
            return Some(m4 / (m2 * m2) - _3);
        }

        let sample_var = m2 * n / (n - _1);
        let numerator = n * n * (n + _1);
        let denominator = (n - _1) * (n - _2) * (n - _3);
        let correction = _3 * (n - _1) * (n - _1) / ((n - _2) * (n - _3));
        Some(numerator / denominator * (m4 / (sample_var * sample_var)) - correction)
    }

    /// Rebuilds the running sums from the window
    pub fn recompute(&mut self) -> &mut Self {
        self.0.recompute("kurtosis");
        self
    }

    /// Resets the tracker, keeping the configured ddof
    pub fn reset(&mut self) -> &mut Self {
        self.0.reset();
        self
    }
}

impl<T: Copy> Windowed<T> for RollingKurt<T> {
    fn window(&self) -> &Window<T> {
        &self.0.window
    }
}
