/// Errors reported by the rolling trackers and their windows.
///
/// Configuration errors are raised by constructors only. Read errors (`Empty`,
/// `IndexOutOfRange`) leave the tracker untouched. A window that is still
/// filling is not an error: `update` reports it as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RollingError {
    /// The period is zero or the quantile fraction lies outside `(0, 1]`
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    /// A read was attempted on a window that holds no values
    #[error("window is empty")]
    Empty,
    /// A positional read went past the newest value
    #[error("index {index} is out of range for a window holding {len} values")]
    IndexOutOfRange {
        /// The requested position, oldest = 0
        index: usize,
        /// The number of live values in the window
        len: usize,
    },
    /// The statistic has no finite value for the current window
    #[error("undefined result: {0}")]
    UndefinedResult(&'static str),
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, RollingError>;

#[cfg(test)]
mod tests {
    use super::RollingError;
    use std::string::ToString;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RollingError::InvalidConfiguration("period can not be zero").to_string(),
            "invalid configuration: period can not be zero"
        );
        assert_eq!(RollingError::Empty.to_string(), "window is empty");
        assert_eq!(
            RollingError::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "index 3 is out of range for a window holding 2 values"
        );
    }
}
