//! Level-by-level flood propagation
//!
//! The flood height starts at the lowest level and only goes up. Every pixel
//! queued at the current height is drained before the height advances.
//! A popped pixel resolves each of its unresolved valid neighbours to
//! `max(height, own value)` and queues it at that level. Because a neighbour
//! is never queued below the current height, a cell's value is final the
//! moment it is written.

use ndarray::Array2;
use pitfill_core::{Connectivity, Error, RasterElement, Result};

use super::bucket_queue::{LevelQueue, PixelRef};

/// Mutable state of one flood: output values and the resolved flags.
#[derive(Debug)]
pub struct Flood<'a, T: RasterElement> {
    grid: &'a Array2<T>,
    null_mask: &'a Array2<bool>,
    output: Array2<T>,
    resolved: Array2<bool>,
    queue: LevelQueue,
}

impl<'a, T: RasterElement> Flood<'a, T> {
    /// Start a flood over `grid` with every cell unresolved at `h_max`
    pub fn new(grid: &'a Array2<T>, null_mask: &'a Array2<bool>, h_min: T, h_max: T) -> Result<Self> {
        if grid.dim() != null_mask.dim() {
            let (er, ec) = grid.dim();
            let (ar, ac) = null_mask.dim();
            return Err(Error::SizeMismatch { er, ec, ar, ac });
        }

        let queue = LevelQueue::new(h_min.to_level(), h_max.to_level())?;
        Ok(Self {
            grid,
            null_mask,
            output: Array2::from_elem(grid.dim(), h_max),
            resolved: Array2::from_elem(grid.dim(), false),
            queue,
        })
    }

    /// Number of bucket levels
    pub fn levels(&self) -> usize {
        self.queue.levels()
    }

    /// Pin `pixel` to `value` and queue it at that level
    pub fn seed(&mut self, pixel: PixelRef, value: T) -> Result<()> {
        let at = (pixel.row, pixel.col);
        if self.output.get(at).is_none() {
            let (rows, cols) = self.output.dim();
            return Err(Error::IndexOutOfBounds {
                row: pixel.row,
                col: pixel.col,
                rows,
                cols,
            });
        }

        self.output[at] = value;
        self.resolved[at] = true;
        self.queue.push(pixel, value.to_level())
    }

    /// Drain the queue from the lowest level to the highest.
    ///
    /// Returns the number of cells resolved by propagation (seeds excluded).
    pub fn run(&mut self, connectivity: Connectivity) -> Result<usize> {
        let shape = self.grid.dim();
        let mut processed = 0usize;

        for level in self.queue.h_min()..=self.queue.h_max() {
            if self.queue.is_drained() {
                break;
            }

            while let Some(p) = self.queue.pop_front(level)? {
                for (r, c) in connectivity.neighbors(p.row, p.col, shape) {
                    if self.null_mask[(r, c)] || self.resolved[(r, c)] {
                        continue;
                    }

                    let value = level.max(self.grid[(r, c)].to_level());
                    let cell = T::from_level(value).ok_or_else(|| {
                        Error::Invariant(format!(
                            "level {} at ({}, {}) does not fit the cell type",
                            value, r, c
                        ))
                    })?;

                    self.output[(r, c)] = cell;
                    self.resolved[(r, c)] = true;
                    self.queue.push(PixelRef::new(r, c), value)?;
                    processed += 1;
                }
            }
        }

        if !self.queue.is_drained() {
            return Err(Error::Invariant(format!(
                "{} pixels left queued after the last level",
                self.queue.len()
            )));
        }

        Ok(processed)
    }

    /// Finish the flood: write `null_value` over no-data cells and return
    /// the output together with the number of valid cells never reached.
    pub fn finish(self, null_value: T) -> (Array2<T>, usize) {
        let mut output = self.output;
        let mut unreached = 0usize;

        ndarray::Zip::from(&mut output)
            .and(self.null_mask)
            .and(&self.resolved)
            .for_each(|out, &is_null, &done| {
                if is_null {
                    *out = null_value;
                } else if !done {
                    unreached += 1;
                }
            });

        (output, unreached)
    }
}
