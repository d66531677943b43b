use alloc::boxed::Box;

use crate::{Result, RollingError};

/// A fixed-capacity circular buffer holding the last `period` observed values.
///
/// Values are evicted in strict FIFO order: once the window is full, every push
/// overwrites the oldest live value. Positions are logical, `0` is the oldest
/// live value and `len() - 1` the newest.
#[derive(Debug, Clone)]
pub struct Window<T> {
    /// The buffer that stores the values
    buf: Box<[T]>,
    /// Physical index of the oldest live value
    head: usize,
    /// Number of live values, never more than `buf.len()`
    len: usize,
    /// Number of values pushed since construction or the last reset
    seq: usize,
}

impl<T: Copy> Window<T> {
    /// Creates a new window with the specified period
    ///
    /// # Arguments
    ///
    /// * `period` - The capacity of the window
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The window, or `InvalidConfiguration` if `period` is zero
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_rolling::{RollingError, Window};
    /// assert!(Window::<f64>::new(3).is_ok());
    /// assert!(matches!(Window::<f64>::new(0), Err(RollingError::InvalidConfiguration(_))));
    /// ```
    pub fn new(period: usize) -> Result<Self>
    where
        T: Default,
    {
        if period == 0 {
            return Err(RollingError::InvalidConfiguration("period can not be zero"));
        }

        Ok(Self {
            buf: alloc::vec![T::default(); period].into_boxed_slice(),
            head: 0,
            len: 0,
            seq: 0,
        })
    }

    /// Returns the capacity of the window
    #[inline]
    pub fn period(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of live values, `min(seq, period)`
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no value has been pushed yet
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` once `period` values have been pushed
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.period()
    }

    /// Returns the number of values pushed so far, including evicted ones
    #[inline]
    pub const fn seq(&self) -> usize {
        self.seq
    }

    /// Pushes a new value into the window and returns the evicted one
    ///
    /// # Arguments
    ///
    /// * `value` - The value to push into the window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The value that fell out of the window, `None` while filling
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_rolling::Window;
    /// let mut window = Window::new(2).unwrap();
    /// assert_eq!(window.push(1), None);
    /// assert_eq!(window.push(2), None);
    /// assert_eq!(window.push(3), Some(1));
    /// ```
    pub fn push(&mut self, value: T) -> Option<T> {
        let period = self.period();
        self.seq += 1;

        if self.is_full() {
            let evicted = core::mem::replace(&mut self.buf[self.head], value);
            self.head = (self.head + 1) % period;
            Some(evicted)
        } else {
            let insert_at = (self.head + self.len) % period;
            self.buf[insert_at] = value;
            self.len += 1;
            None
        }
    }

    /// Returns the value at logical position `index`, oldest = 0
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The value, `Empty` if nothing was pushed yet, or
    ///   `IndexOutOfRange` if `index >= len()`
    pub fn get(&self, index: usize) -> Result<T> {
        if self.is_empty() {
            return Err(RollingError::Empty);
        }
        if index >= self.len {
            return Err(RollingError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(self.buf[(self.head + index) % self.period()])
    }

    /// Returns the oldest live value
    pub fn head(&self) -> Result<T> {
        self.get(0)
    }

    /// Returns the newest live value
    pub fn tail(&self) -> Result<T> {
        match self.len {
            0 => Err(RollingError::Empty),
            len => self.get(len - 1),
        }
    }

    /// Returns an iterator over the live values from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).map(move |i| &self.buf[(self.head + i) % self.period()])
    }

    /// Clears the window, resetting its state
    pub fn reset(&mut self)
    where
        T: Default,
    {
        self.buf.fill(T::default());
        self.head = 0;
        self.len = 0;
        self.seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{vec, vec::Vec};

    #[test]
    fn test_zero_period() {
        assert_eq!(
            Window::<f64>::new(0).unwrap_err(),
            RollingError::InvalidConfiguration("period can not be zero")
        );
    }

    #[test]
    fn test_push_and_len() {
        let mut window = Window::new(3).unwrap();
        assert!(window.is_empty());

        assert_eq!(window.push(10), None);
        assert_eq!(window.len(), 1);
        assert_eq!(window.push(20), None);
        assert_eq!(window.len(), 2);
        assert!(!window.is_full());
        assert_eq!(window.push(30), None);
        assert_eq!(window.len(), 3);
        assert!(window.is_full());

        assert_eq!(window.push(40), Some(10));
        assert_eq!(window.len(), 3);
        assert_eq!(window.seq(), 4);
    }

    #[test]
    fn test_eviction_order() {
        let mut window = Window::new(3).unwrap();
        for v in 1..=4 {
            window.push(v);
        }

        assert_eq!(window.get(0), Ok(2));
        assert_eq!(window.get(1), Ok(3));
        assert_eq!(window.get(2), Ok(4));
        assert_eq!(window.head(), Ok(2));
        assert_eq!(window.tail(), Ok(4));
        assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_reads_on_empty_window() {
        let window = Window::<f64>::new(2).unwrap();
        assert_eq!(window.head(), Err(RollingError::Empty));
        assert_eq!(window.tail(), Err(RollingError::Empty));
        assert_eq!(window.get(0), Err(RollingError::Empty));
    }

    #[test]
    fn test_index_out_of_range() {
        let mut window = Window::new(4).unwrap();
        window.push(1.0);
        window.push(2.0);

        assert_eq!(
            window.get(2),
            Err(RollingError::IndexOutOfRange { index: 2, len: 2 })
        );
        // a failed read leaves the window as it was
        assert_eq!(window.len(), 2);
        assert_eq!(window.tail(), Ok(2.0));
    }

    #[test]
    fn test_size_tracks_seq() {
        let mut window = Window::new(5).unwrap();
        for i in 0..12 {
            window.push(i);
            assert_eq!(window.len(), window.seq().min(window.period()));
        }
    }

    #[test]
    fn test_full_cycles() {
        let mut window = Window::new(3).unwrap();
        window.push(1);
        window.push(2);
        window.push(3);

        assert_eq!(window.push(4), Some(1));
        assert_eq!(window.push(5), Some(2));
        assert_eq!(window.push(6), Some(3));
        assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![4, 5, 6]);

        assert_eq!(window.push(7), Some(4));
        assert_eq!(window.head(), Ok(5));
    }

    #[test]
    fn test_reset() {
        let mut window = Window::new(3).unwrap();
        window.push(1);
        window.push(2);
        window.push(3);
        window.reset();

        assert!(window.is_empty());
        assert_eq!(window.seq(), 0);
        assert_eq!(window.push(42), None);
        assert_eq!(window.head(), Ok(42));
        assert_eq!(window.tail(), Ok(42));
    }
}
