use core::fmt;

use crate::{
    Result, RollingDelta, RollingKurt, RollingMax, RollingMean, RollingMin, RollingPctChange,
    RollingQuantile, RollingSkew, RollingStdDev, RollingSum, Window, Windowed, Wma,
};

/// Statistic computed by a [`Tracker`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerKind {
    /// [`RollingSum`]
    Sum,
    /// [`RollingMean`]
    Mean,
    /// [`RollingMax`]
    Max,
    /// [`RollingMin`]
    Min,
    /// [`RollingDelta`]
    Delta,
    /// [`RollingPctChange`]
    PctChange,
    /// [`RollingQuantile`] with the quantile fraction in `(0, 1]`
    Quantile(f64),
    /// [`RollingStdDev`], population estimator
    StdDev,
    /// [`RollingSkew`], population estimator
    Skew,
    /// [`RollingKurt`], population excess kurtosis
    Kurt,
    /// [`Wma`]
    Wma,
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => f.write_str("sum"),
            Self::Mean => f.write_str("mean"),
            Self::Max => f.write_str("max"),
            Self::Min => f.write_str("min"),
            Self::Delta => f.write_str("delta"),
            Self::PctChange => f.write_str("pct_change"),
            Self::Quantile(q) => write!(f, "quantile({q})"),
            Self::StdDev => f.write_str("std_dev"),
            Self::Skew => f.write_str("skew"),
            Self::Kurt => f.write_str("kurt"),
            Self::Wma => f.write_str("wma"),
        }
    }
}

/// # Tracker
///
/// Closed set of every rolling tracker behind one `update`/introspection
/// contract, so heterogeneous trackers can live in one collection without
/// dynamic dispatch.
///
/// # Examples
///
/// ```
/// # use ta_rolling::{Tracker, TrackerKind, Windowed};
/// let kinds = [TrackerKind::Sum, TrackerKind::Max, TrackerKind::Quantile(0.5)];
/// let mut trackers: Vec<Tracker<f64>> = kinds
///     .iter()
///     .map(|&kind| Tracker::new(kind, 3))
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// for tracker in &mut trackers {
///     for i in 1..=4 {
///         tracker.update(i as f64).unwrap();
///     }
/// }
///
/// let latest: Vec<_> = trackers.iter().map(|t| t.value().unwrap()).collect();
/// assert_eq!(latest, [Some(9.0), Some(4.0), Some(3.0)]);
/// assert!(trackers.iter().all(|t| t.head() == Ok(2.0)));
/// ```
#[derive(Debug, Clone)]
pub enum Tracker<T> {
    /// Rolling sum
    Sum(RollingSum<T>),
    /// Rolling mean
    Mean(RollingMean<T>),
    /// Rolling maximum
    Max(RollingMax<T>),
    /// Rolling minimum
    Min(RollingMin<T>),
    /// Rolling delta
    Delta(RollingDelta<T>),
    /// Rolling percent change
    PctChange(RollingPctChange<T>),
    /// Rolling quantile
    Quantile(RollingQuantile<T>),
    /// Rolling standard deviation
    StdDev(RollingStdDev<T>),
    /// Rolling skewness
    Skew(RollingSkew<T>),
    /// Rolling excess kurtosis
    Kurt(RollingKurt<T>),
    /// Weighted moving average
    Wma(Wma<T>),
}

impl<T> Tracker<T>
where
    T: num_traits::Float + ordered_float::FloatCore + Default,
{
    /// Creates a tracker of the given kind over the last `period` values
    ///
    /// # Arguments
    ///
    /// * `kind` - The statistic to track
    /// * `period` - The size of the rolling window
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The tracker, or `InvalidConfiguration` if `period` is
    ///   zero or the quantile fraction lies outside `(0, 1]`
    pub fn new(kind: TrackerKind, period: usize) -> Result<Self> {
        Ok(match kind {
            TrackerKind::Sum => Self::Sum(RollingSum::new(period)?),
            TrackerKind::Mean => Self::Mean(RollingMean::new(period)?),
            TrackerKind::Max => Self::Max(RollingMax::new(period)?),
            TrackerKind::Min => Self::Min(RollingMin::new(period)?),
            TrackerKind::Delta => Self::Delta(RollingDelta::new(period)?),
            TrackerKind::PctChange => Self::PctChange(RollingPctChange::new(period)?),
            TrackerKind::Quantile(q) => Self::Quantile(RollingQuantile::new(period, q)?),
            TrackerKind::StdDev => Self::StdDev(RollingStdDev::new(period)?),
            TrackerKind::Skew => Self::Skew(RollingSkew::new(period)?),
            TrackerKind::Kurt => Self::Kurt(RollingKurt::new(period)?),
            TrackerKind::Wma => Self::Wma(Wma::new(period)?),
        })
    }

    /// Returns the kind of statistic this tracker computes
    pub fn kind(&self) -> TrackerKind {
        match self {
            Self::Sum(_) => TrackerKind::Sum,
            Self::Mean(_) => TrackerKind::Mean,
            Self::Max(_) => TrackerKind::Max,
            Self::Min(_) => TrackerKind::Min,
            Self::Delta(_) => TrackerKind::Delta,
            Self::PctChange(_) => TrackerKind::PctChange,
            Self::Quantile(t) => TrackerKind::Quantile(t.q()),
            Self::StdDev(_) => TrackerKind::StdDev,
            Self::Skew(_) => TrackerKind::Skew,
            Self::Kurt(_) => TrackerKind::Kurt,
            Self::Wma(_) => TrackerKind::Wma,
        }
    }

    /// Pushes a new value and returns the current statistic
    ///
    /// # Returns
    ///
    /// * `Result<Option<T>>` - The statistic, `Ok(None)` while it is unavailable,
    ///   or `UndefinedResult` from a percent change over a zero reference value
    pub fn update(&mut self, value: T) -> Result<Option<T>> {
        Ok(match self {
            Self::Sum(t) => t.update(value),
            Self::Mean(t) => t.update(value),
            Self::Max(t) => t.update(value),
            Self::Min(t) => t.update(value),
            Self::Delta(t) => t.update(value),
            Self::PctChange(t) => t.update(value)?,
            Self::Quantile(t) => t.update(value),
            Self::StdDev(t) => t.update(value),
            Self::Skew(t) => t.update(value),
            Self::Kurt(t) => t.update(value),
            Self::Wma(t) => t.update(value),
        })
    }

    /// Returns the current statistic without pushing a value
    pub fn value(&self) -> Result<Option<T>> {
        Ok(match self {
            Self::Sum(t) => t.sum(),
            Self::Mean(t) => t.mean(),
            Self::Max(t) => t.max(),
            Self::Min(t) => t.min(),
            Self::Delta(t) => t.delta(),
            Self::PctChange(t) => t.pct_change()?,
            Self::Quantile(t) => t.quantile(),
            Self::StdDev(t) => t.stddev(),
            Self::Skew(t) => t.skew(),
            Self::Kurt(t) => t.kurt(),
            Self::Wma(t) => t.wma(),
        })
    }

    /// Resets the tracker to its freshly constructed state
    pub fn reset(&mut self) -> &mut Self {
        match self {
            Self::Sum(t) => {
                t.reset();
            }
            Self::Mean(t) => {
                t.reset();
            }
            Self::Max(t) => {
                t.reset();
            }
            Self::Min(t) => {
                t.reset();
            }
            Self::Delta(t) => {
                t.reset();
            }
            Self::PctChange(t) => {
                t.reset();
            }
            Self::Quantile(t) => {
                t.reset();
            }
            Self::StdDev(t) => {
                t.reset();
            }
            Self::Skew(t) => {
                t.reset();
            }
            Self::Kurt(t) => {
                t.reset();
            }
            Self::Wma(t) => {
                t.reset();
            }
        }
        self
    }
}

impl<T: Copy> Windowed<T> for Tracker<T> {
    fn window(&self) -> &Window<T> {
        match self {
            Self::Sum(t) => t.window(),
            Self::Mean(t) => t.window(),
            Self::Max(t) => t.window(),
            Self::Min(t) => t.window(),
            Self::Delta(t) => t.window(),
            Self::PctChange(t) => t.window(),
            Self::Quantile(t) => t.window(),
            Self::StdDev(t) => t.window(),
            Self::Skew(t) => t.window(),
            Self::Kurt(t) => t.window(),
            Self::Wma(t) => t.window(),
        }
    }
}

macro_rules! impl_from_tracker {
    ($($variant:ident($tracker:ident)),+ $(,)?) => {
        $(
            impl<T> From<$tracker<T>> for Tracker<T> {
                fn from(tracker: $tracker<T>) -> Self {
                    Self::$variant(tracker)
                }
            }
        )+
    };
}

impl_from_tracker!(
    Sum(RollingSum),
    Mean(RollingMean),
    Max(RollingMax),
    Min(RollingMin),
    Delta(RollingDelta),
    PctChange(RollingPctChange),
    Quantile(RollingQuantile),
    StdDev(RollingStdDev),
    Skew(RollingSkew),
    Kurt(RollingKurt),
    Wma(Wma),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RollingError;
    use assert_approx_eq::assert_approx_eq;
    use std::{string::ToString, vec::Vec};

    const KINDS: [TrackerKind; 7] = [
        TrackerKind::Sum,
        TrackerKind::Mean,
        TrackerKind::Max,
        TrackerKind::Min,
        TrackerKind::Delta,
        TrackerKind::PctChange,
        TrackerKind::Quantile(0.3),
    ];

    fn replay(kind: TrackerKind) -> Vec<Result<Option<f64>>> {
        let period = match kind {
            TrackerKind::Quantile(_) => 10,
            _ => 3,
        };
        let mut tracker = Tracker::new(kind, period).unwrap();
        (1..=10).map(|i| tracker.update(i as f64)).collect()
    }

    #[test]
    fn test_rolling_demo() {
        let outputs: Vec<Vec<f64>> = KINDS
            .iter()
            .map(|&kind| replay(kind).into_iter().map(|r| r.unwrap().unwrap()).collect())
            .collect();

        assert_eq!(outputs[0], [1.0, 3.0, 6.0, 9.0, 12.0, 15.0, 18.0, 21.0, 24.0, 27.0]);
        assert_eq!(outputs[1], [1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(outputs[2], [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(outputs[3], [1.0, 1.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(outputs[4], [0.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0]);
        let pct = [0.0, 100.0, 200.0, 100.0, 200.0 / 3.0, 50.0, 40.0, 100.0 / 3.0, 200.0 / 7.0, 25.0];
        for (r, e) in outputs[5].iter().zip(pct) {
            assert_approx_eq!(r, e, 1e-9);
        }
        assert_eq!(outputs[6], [1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_replay_is_deterministic() {
        for kind in KINDS {
            assert_eq!(replay(kind), replay(kind));
        }
    }

    #[test]
    fn test_kind_round_trip() {
        let extra = [
            TrackerKind::StdDev,
            TrackerKind::Skew,
            TrackerKind::Kurt,
            TrackerKind::Wma,
        ];
        for kind in KINDS.into_iter().chain(extra) {
            assert_eq!(Tracker::<f64>::new(kind, 4).unwrap().kind(), kind);
        }
        assert_eq!(TrackerKind::Quantile(0.25).to_string(), "quantile(0.25)");
        assert_eq!(TrackerKind::PctChange.to_string(), "pct_change");
        assert_eq!(TrackerKind::Kurt.to_string(), "kurt");
    }

    #[test]
    fn test_moments_through_tracker() {
        let mut skew = Tracker::<f64>::new(TrackerKind::Skew, 4).unwrap();
        let mut kurt = Tracker::<f64>::new(TrackerKind::Kurt, 4).unwrap();
        assert_eq!(skew.update(1.0), Ok(None));
        for v in [1.0, 2.0, 3.0] {
            assert_eq!(kurt.update(v), Ok(None));
        }
        for v in [2.0, 3.0] {
            assert_approx_eq!(skew.update(v).unwrap().unwrap(), 0.0, 1e-12);
        }
        skew.update(10.0).unwrap();
        kurt.update(10.0).unwrap();
        assert!(skew.value().unwrap().unwrap() > 0.0);
        assert!(kurt.value().unwrap().is_some());
        assert_eq!(kurt.iter().copied().collect::<Vec<_>>(), [1.0, 2.0, 3.0, 10.0]);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            Tracker::<f64>::new(TrackerKind::Sum, 0),
            Err(RollingError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Tracker::<f64>::new(TrackerKind::Quantile(0.0), 5),
            Err(RollingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_undefined_pct_change() {
        let mut tracker = Tracker::new(TrackerKind::PctChange, 2).unwrap();
        assert!(matches!(
            tracker.update(0.0),
            Err(RollingError::UndefinedResult(_))
        ));
        assert_eq!(tracker.tail(), Ok(0.0));
        assert!(tracker.value().is_err());
    }

    #[test]
    fn test_introspection_and_reset() {
        let mut tracker: Tracker<f64> = Wma::new(3).unwrap().into();
        for v in [1.0, 2.0, 3.0, 4.0] {
            tracker.update(v).unwrap();
        }
        assert_eq!(tracker.get(0), Ok(2.0));
        assert_eq!(tracker.head(), Ok(2.0));
        assert_eq!(tracker.tail(), Ok(4.0));
        assert_eq!(tracker.iter().copied().collect::<Vec<_>>(), [2.0, 3.0, 4.0]);
        assert!(tracker.is_full());

        tracker.reset();
        assert!(tracker.is_empty());
        assert_eq!(tracker.period(), 3);
        assert_eq!(tracker.update(1.0), Ok(None));
    }
}
