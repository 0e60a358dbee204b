//! Hierarchical pixel queue
//!
//! One FIFO bucket per integer level in `[h_min, h_max]`. Push and pop are
//! O(1); the flood drains buckets in increasing level order, so the queue
//! never has to search for the lowest non-empty level itself.

use std::collections::VecDeque;

use pitfill_core::{Error, Result};

/// A grid coordinate waiting in a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRef {
    pub row: usize,
    pub col: usize,
}

impl PixelRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Level-bucketed FIFO queue of pixels.
///
/// Buckets are `VecDeque`s, so a bucket's storage is reused across
/// thousands of push/pop cycles instead of allocating per entry.
#[derive(Debug)]
pub struct LevelQueue {
    h_min: i64,
    h_max: i64,
    buckets: Vec<VecDeque<PixelRef>>,
    pending: usize,
    /// Highest level popped so far; lower buckets are never visited again.
    drain_level: i64,
}

impl LevelQueue {
    /// Create an empty queue covering levels `h_min..=h_max`
    pub fn new(h_min: i64, h_max: i64) -> Result<Self> {
        if h_min > h_max {
            return Err(Error::Invariant(format!(
                "empty level range [{}, {}]",
                h_min, h_max
            )));
        }

        let levels = h_max
            .checked_sub(h_min)
            .and_then(|span| usize::try_from(span).ok())
            .and_then(|span| span.checked_add(1))
            .ok_or_else(|| {
                Error::Allocation(format!("level range [{}, {}] is too wide", h_min, h_max))
            })?;

        let mut buckets = Vec::new();
        buckets.try_reserve_exact(levels).map_err(|e| {
            Error::Allocation(format!("{} level buckets: {}", levels, e))
        })?;
        buckets.resize_with(levels, VecDeque::new);

        Ok(Self {
            h_min,
            h_max,
            buckets,
            pending: 0,
            drain_level: h_min,
        })
    }

    /// Lowest level
    pub fn h_min(&self) -> i64 {
        self.h_min
    }

    /// Highest level
    pub fn h_max(&self) -> i64 {
        self.h_max
    }

    /// Number of levels (buckets)
    pub fn levels(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of queued pixels across all levels
    pub fn len(&self) -> usize {
        self.pending
    }

    /// Whether no pixel is queued at any level
    pub fn is_drained(&self) -> bool {
        self.pending == 0
    }

    /// Level the queue is currently being drained at
    pub fn drain_level(&self) -> i64 {
        self.drain_level
    }

    /// Append `pixel` to the bucket for `level`.
    ///
    /// Pushing below the drain level is an [`Error::Invariant`]: that bucket
    /// has already been emptied and the pixel would never be popped.
    pub fn push(&mut self, pixel: PixelRef, level: i64) -> Result<()> {
        let ndx = self.index(level)?;
        if level < self.drain_level {
            return Err(Error::Invariant(format!(
                "push at level {} below drain level {}",
                level, self.drain_level
            )));
        }
        let bucket = &mut self.buckets[ndx];
        bucket.try_reserve(1).map_err(|e| {
            Error::Allocation(format!("queue entry at level {}: {}", level, e))
        })?;
        bucket.push_back(pixel);
        self.pending += 1;
        Ok(())
    }

    /// Remove and return the oldest pixel queued at `level`.
    ///
    /// Raises the drain level to `level`.
    pub fn pop_front(&mut self, level: i64) -> Result<Option<PixelRef>> {
        let ndx = self.index(level)?;
        self.drain_level = self.drain_level.max(level);
        let popped = self.buckets[ndx].pop_front();
        if popped.is_some() {
            self.pending = self.pending.checked_sub(1).ok_or_else(|| {
                Error::Invariant(format!(
                    "bucket at level {} yielded a pixel while the pending count was zero",
                    level
                ))
            })?;
        }
        Ok(popped)
    }

    /// Whether the bucket for `level` is empty
    pub fn is_empty(&self, level: i64) -> Result<bool> {
        let ndx = self.index(level)?;
        Ok(self.buckets[ndx].is_empty())
    }

    fn index(&self, level: i64) -> Result<usize> {
        if level < self.h_min || level > self.h_max {
            return Err(Error::Invariant(format!(
                "level {} outside queue range [{}, {}]",
                level, self.h_min, self.h_max
            )));
        }
        // In range, so the offset is non-negative and below `levels()`.
        Ok((level - self.h_min) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_within_level() {
        let mut q = LevelQueue::new(-5, 5).unwrap();
        q.push(PixelRef::new(0, 0), 2).unwrap();
        q.push(PixelRef::new(0, 1), 2).unwrap();
        q.push(PixelRef::new(0, 2), 2).unwrap();

        assert_eq!(q.pop_front(2).unwrap(), Some(PixelRef::new(0, 0)));
        assert_eq!(q.pop_front(2).unwrap(), Some(PixelRef::new(0, 1)));
        assert_eq!(q.pop_front(2).unwrap(), Some(PixelRef::new(0, 2)));
        assert_eq!(q.pop_front(2).unwrap(), None);
    }

    #[test]
    fn test_levels_are_independent() {
        let mut q = LevelQueue::new(0, 3).unwrap();
        assert_eq!(q.levels(), 4);

        q.push(PixelRef::new(1, 1), 3).unwrap();
        q.push(PixelRef::new(2, 2), 0).unwrap();
        assert_eq!(q.len(), 2);
        assert!(q.is_empty(1).unwrap());
        assert!(!q.is_empty(0).unwrap());

        assert_eq!(q.pop_front(0).unwrap(), Some(PixelRef::new(2, 2)));
        assert_eq!(q.pop_front(3).unwrap(), Some(PixelRef::new(1, 1)));
        assert!(q.is_drained());
    }

    #[test]
    fn test_single_level_range() {
        let mut q = LevelQueue::new(7, 7).unwrap();
        assert_eq!(q.levels(), 1);
        q.push(PixelRef::new(0, 0), 7).unwrap();
        assert_eq!(q.pop_front(7).unwrap(), Some(PixelRef::new(0, 0)));
    }

    #[test]
    fn test_out_of_range_is_invariant_error() {
        let mut q = LevelQueue::new(10, 20).unwrap();
        assert!(matches!(q.push(PixelRef::new(0, 0), 21), Err(Error::Invariant(_))));
        assert!(matches!(q.push(PixelRef::new(0, 0), 9), Err(Error::Invariant(_))));
        assert!(matches!(q.pop_front(30), Err(Error::Invariant(_))));
        assert!(matches!(q.is_empty(-1), Err(Error::Invariant(_))));
        assert!(q.is_drained());
    }

    #[test]
    fn test_push_below_drain_level() {
        let mut q = LevelQueue::new(0, 9).unwrap();
        q.push(PixelRef::new(0, 0), 4).unwrap();
        assert_eq!(q.pop_front(4).unwrap(), Some(PixelRef::new(0, 0)));
        assert_eq!(q.drain_level(), 4);

        // Same level and above are still live.
        q.push(PixelRef::new(0, 1), 4).unwrap();
        q.push(PixelRef::new(0, 2), 6).unwrap();

        let err = q.push(PixelRef::new(0, 3), 3).unwrap_err();
        assert!(matches!(err, Error::Invariant(_)), "got {:?}", err);
        assert_eq!(q.len(), 2);

        // Popping a lower bucket does not lower the drain level.
        assert_eq!(q.pop_front(2).unwrap(), None);
        assert_eq!(q.drain_level(), 4);
    }

    #[test]
    fn test_inverted_range() {
        assert!(matches!(LevelQueue::new(5, 4), Err(Error::Invariant(_))));
    }

    #[test]
    fn test_too_wide_range() {
        assert!(matches!(
            LevelQueue::new(i64::MIN, i64::MAX),
            Err(Error::Allocation(_))
        ));
    }
}
