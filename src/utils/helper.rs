//! Numeric helpers shared by the trackers

use num_traits::Float;

/// Returns `true` for NaN and infinite values
///
/// Such values are kept in the window but are never folded into running
/// aggregates.
#[inline]
pub fn is_nan_or_inf<T: Float>(x: T) -> bool {
    !x.is_finite()
}

/// Returns the 1-indexed nearest rank for quantile `q` over `len` values
///
/// The rank is `ceil(q * len)` clamped to `[1, len]`. Products that land within
/// rounding distance of an integer are snapped to it first, so `0.7 * 10`
/// yields rank 7 rather than 8.
///
/// # Arguments
///
/// * `q` - The quantile fraction in `(0, 1]`
/// * `len` - The number of values ranked
///
/// # Returns
///
/// * `Option<usize>` - The rank, or `None` when `len` is zero
///
/// # Examples
///
/// ```
/// # use ta_rolling::helper::nearest_rank;
/// assert_eq!(nearest_rank(0.3, 10), Some(3));
/// assert_eq!(nearest_rank(0.3, 4), Some(2));
/// assert_eq!(nearest_rank(0.7, 10), Some(7));
/// assert_eq!(nearest_rank(0.3, 0), None);
/// ```
#[inline]
pub fn nearest_rank(q: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let pos = q * len as f64;
    let nearest = Float::round(pos);
    let rank = if Float::abs(pos - nearest) <= f64::EPSILON * len as f64 {
        nearest
    } else {
        Float::ceil(pos)
    };

    Some((rank as usize).clamp(1, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_nan_or_inf() {
        assert!(is_nan_or_inf(f64::NAN));
        assert!(is_nan_or_inf(f64::INFINITY));
        assert!(is_nan_or_inf(f64::NEG_INFINITY));
        assert!(!is_nan_or_inf(0.0_f64));
        assert!(!is_nan_or_inf(-1.5_f32));
    }

    #[test]
    fn test_nearest_rank_progression() {
        let ranks: std::vec::Vec<_> = (1..=10).filter_map(|n| nearest_rank(0.3, n)).collect();
        assert_eq!(ranks, [1, 1, 1, 2, 2, 2, 3, 3, 3, 3]);
    }

    #[test]
    fn test_nearest_rank_bounds() {
        assert_eq!(nearest_rank(1.0, 7), Some(7));
        assert_eq!(nearest_rank(1e-9, 7), Some(1));
        assert_eq!(nearest_rank(0.5, 1), Some(1));
        assert_eq!(nearest_rank(0.5, 4), Some(2));
        assert_eq!(nearest_rank(0.5, 5), Some(3));
    }
}
