use crate::{Result, Window};

/// Positional introspection shared by every rolling tracker
///
/// Each tracker owns exactly one [`Window`] of the raw values it was fed. This
/// trait exposes that window read-only; none of the provided methods mutate
/// the tracker, and a failed read leaves it untouched.
pub trait Windowed<T: Copy> {
    /// Returns the window of raw values backing the tracker
    fn window(&self) -> &Window<T>;

    /// Returns the value at position `index`, oldest = 0
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The value, `Empty` before the first update, or
    ///   `IndexOutOfRange` if `index >= len()`
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_rolling::{RollingSum, RollingError, Windowed};
    /// let mut sum = RollingSum::new(3).unwrap();
    /// for v in [1.0, 2.0, 3.0, 4.0] {
    ///     sum.update(v);
    /// }
    /// assert_eq!(sum.get(0), Ok(2.0));
    /// assert_eq!(sum.get(2), Ok(4.0));
    /// assert_eq!(sum.get(3), Err(RollingError::IndexOutOfRange { index: 3, len: 3 }));
    /// ```
    fn get(&self, index: usize) -> Result<T> {
        self.window().get(index)
    }

    /// Returns the oldest live value, `Empty` before the first update
    fn head(&self) -> Result<T> {
        self.window().head()
    }

    /// Returns the newest live value, `Empty` before the first update
    fn tail(&self) -> Result<T> {
        self.window().tail()
    }

    /// Returns the number of live values
    fn len(&self) -> usize {
        self.window().len()
    }

    /// Returns `true` before the first update
    fn is_empty(&self) -> bool {
        self.window().is_empty()
    }

    /// Returns the configured window size
    fn period(&self) -> usize {
        self.window().period()
    }

    /// Returns `true` once the window holds `period()` values
    fn is_full(&self) -> bool {
        self.window().is_full()
    }

    /// Returns an iterator over the live values from oldest to newest
    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        self.window().iter()
    }
}
