use core::marker::PhantomData;

use super::Deque;

/// Order policy deciding which candidates a new value makes obsolete
pub trait OrderPolicy<T> {
    /// Returns true if `existing` can never again be the extremum once `new` arrived
    fn dominated(existing: &T, new: &T) -> bool;
}

/// Order policy for minimum
#[derive(Debug, Clone)]
pub struct Min;

/// Order policy for maximum
#[derive(Debug, Clone)]
pub struct Max;

impl<T: PartialOrd> OrderPolicy<T> for Min {
    #[inline]
    fn dominated(existing: &T, new: &T) -> bool {
        existing >= new
    }
}

impl<T: PartialOrd> OrderPolicy<T> for Max {
    #[inline]
    fn dominated(existing: &T, new: &T) -> bool {
        existing <= new
    }
}

// Pair of (value, sequence number)
type Entry<T> = (T, usize);

/// Sliding-window extremum candidates
///
/// Values are strictly monotonic from front to back (decreasing for [`Max`],
/// increasing for [`Min`]) and the front always holds the extremum of the last
/// `window_size` observations. Every observation is pushed and popped at most
/// once, so updates are amortized O(1).
#[derive(Debug, Clone)]
pub struct MonotonicQueue<T, O> {
    deque: Deque<Entry<T>>,
    window_size: usize,
    seq: usize,
    _order: PhantomData<O>,
}

impl<T, O> MonotonicQueue<T, O>
where
    T: PartialOrd + Copy + Default,
    O: OrderPolicy<T>,
{
    /// Creates a new `MonotonicQueue` for windows of `window_size` observations
    #[inline]
    pub fn new(window_size: usize) -> Self {
        Self {
            deque: Deque::new(window_size),
            window_size,
            seq: 0,
            _order: PhantomData,
        }
    }

    /// Sequence number of the oldest observation still inside the window
    #[inline]
    fn window_start(&self) -> usize {
        self.seq.saturating_sub(self.window_size)
    }

    /// Drops candidates whose observation has left the window
    #[inline]
    fn remove_expired(&mut self) {
        let start = self.window_start();
        while let Some(&(_, seq)) = self.deque.front() {
            if seq >= start {
                break;
            }
            self.deque.pop_front();
        }
    }

    /// Drops candidates dominated by `value`
    #[inline]
    fn remove_dominated(&mut self, value: T) {
        while let Some((existing, _)) = self.deque.back() {
            if !O::dominated(existing, &value) {
                break;
            }
            self.deque.pop_back();
        }
    }

    /// Records a new observation
    #[inline]
    pub fn push(&mut self, value: T) {
        self.seq += 1;
        self.remove_expired();
        self.remove_dominated(value);
        self.deque.push_back((value, self.seq - 1));
        debug_assert!(self.deque.len() <= self.window_size);
    }

    /// Records an observation that can never be a candidate
    ///
    /// The window still slides, so older candidates expire on schedule.
    #[inline]
    pub fn skip(&mut self) {
        self.seq += 1;
        self.remove_expired();
    }

    /// Returns the current extremum
    #[inline]
    pub fn front(&self) -> Option<T> {
        self.deque.front().map(|&(value, _)| value)
    }

    /// Returns the window position (oldest = 0) of the current extremum
    #[inline]
    pub fn front_position(&self) -> Option<usize> {
        let start = self.window_start();
        self.deque.front().map(|&(_, seq)| seq - start)
    }

    /// Resets the queue to its initial state
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        self.deque.reset();
        self.seq = 0;
        self
    }
}
