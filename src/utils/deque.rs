use alloc::boxed::Box;

/// A bounded double-ended queue over a flat, pre-allocated buffer
///
/// Slots are addressed by physical index and wrap around, so pushes and pops at
/// either end never allocate.
#[derive(Debug, Clone)]
pub struct Deque<T> {
    /// Backing storage, allocated once
    buf: Box<[T]>,
    /// Physical index of the front element
    front: usize,
    /// Number of stored elements
    len: usize,
}

impl<T: Copy + Default> Deque<T> {
    /// Creates a new `Deque` that can hold `cap` elements
    ///
    /// The caller guarantees `cap > 0`.
    #[inline]
    pub fn new(cap: usize) -> Self {
        debug_assert!(cap > 0, "capacity must be > 0");
        Self {
            buf: alloc::vec![T::default(); cap].into_boxed_slice(),
            front: 0,
            len: 0,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.front + offset) % self.capacity()
    }

    /// Appends `value` at the back
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The front element dropped to make room, if the deque was full
    #[inline]
    pub fn push_back(&mut self, value: T) -> Option<T> {
        if self.len == self.capacity() {
            let dropped = self.buf[self.front];
            self.buf[self.front] = value;
            self.front = self.slot(1);
            return Some(dropped);
        }

        let at = self.slot(self.len);
        self.buf[at] = value;
        self.len += 1;
        None
    }

    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        Some(self.buf[self.slot(self.len)])
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.buf[self.front];
        self.front = self.slot(1);
        self.len -= 1;
        Some(value)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        (!self.is_empty()).then(|| &self.buf[self.front])
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        (!self.is_empty()).then(|| &self.buf[self.slot(self.len - 1)])
    }

    /// Drops every element, keeping the allocation
    #[inline]
    pub fn reset(&mut self) {
        self.front = 0;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::Deque;
    use std::vec::Vec;

    #[test]
    fn test_both_ends() {
        let mut deque = Deque::new(3);
        deque.push_back((0, 1.5));
        deque.push_back((1, 2.5));
        deque.push_back((2, 3.5));

        assert_eq!(deque.front(), Some(&(0, 1.5)));
        assert_eq!(deque.back(), Some(&(2, 3.5)));
        assert_eq!(deque.pop_back(), Some((2, 3.5)));
        assert_eq!(deque.pop_front(), Some((0, 1.5)));
        assert_eq!(deque.front(), deque.back());
        assert_eq!(deque.pop_front(), Some((1, 2.5)));
        assert!(deque.is_empty());
        assert_eq!(deque.pop_back(), None);
        assert_eq!(deque.pop_front(), None);
    }

    #[test]
    fn test_wraparound() {
        let mut deque = Deque::new(3);
        for i in 0..3 {
            deque.push_back(i);
        }
        deque.pop_front();
        deque.pop_front();
        deque.push_back(3);
        deque.push_back(4);

        assert_eq!(deque.back(), Some(&4));
        let drained: Vec<_> = core::iter::from_fn(|| deque.pop_front()).collect();
        assert_eq!(drained, [2, 3, 4]);
    }

    #[test]
    fn test_push_on_full_drops_front() {
        let mut deque = Deque::new(2);
        assert_eq!(deque.push_back(10), None);
        assert_eq!(deque.push_back(20), None);
        assert_eq!(deque.push_back(30), Some(10));
        assert_eq!(deque.len(), 2);
        assert_eq!(deque.front(), Some(&20));
        assert_eq!(deque.back(), Some(&30));
    }

    #[test]
    fn test_capacity_one() {
        let mut deque = Deque::new(1);
        assert_eq!(deque.capacity(), 1);
        deque.push_back(7);
        assert_eq!(deque.front(), Some(&7));
        assert_eq!(deque.push_back(8), Some(7));
        assert_eq!(deque.pop_back(), Some(8));
        assert!(deque.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut deque = Deque::new(4);
        deque.push_back(1);
        deque.push_back(2);
        deque.reset();

        assert!(deque.is_empty());
        assert_eq!(deque.front(), None);
        deque.push_back(42);
        assert_eq!(deque.back(), Some(&42));
    }
}
