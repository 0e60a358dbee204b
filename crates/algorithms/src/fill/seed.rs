//! Boundary seeding
//!
//! Picks the cells the flood starts from. With no-data present these are
//! the valid cells touching a no-data region (3x3 neighbourhood); otherwise
//! they are the grid's outer border.

use std::fmt;

use ndarray::Array2;
use pitfill_core::{RasterElement, Result};

use super::bucket_queue::PixelRef;
use crate::morphology::{dilate_mask, StructuringElement};

/// Where the seed set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    /// Valid cells adjacent to a no-data region
    NullRim,
    /// Cells on the outer border of the grid
    GridBorder,
}

impl fmt::Display for SeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedSource::NullRim => f.write_str("no-data rim"),
            SeedSource::GridBorder => f.write_str("grid border"),
        }
    }
}

/// Compute the seed coordinates, in row-major order.
///
/// Border seeding skips border cells whose value equals `h_max`: the
/// border is copied into an output initialised to `h_max` and only the
/// cells that then differ from it are taken.
pub fn boundary_seeds<T: RasterElement>(
    grid: &Array2<T>,
    null_mask: &Array2<bool>,
    h_max: T,
) -> Result<(Vec<PixelRef>, SeedSource)> {
    if null_mask.iter().any(|&is_null| is_null) {
        let dilated = dilate_mask(null_mask, &StructuringElement::Square(1))?;
        let seeds = dilated
            .indexed_iter()
            .filter(|&((r, c), &grown)| grown && !null_mask[(r, c)])
            .map(|((r, c), _)| PixelRef::new(r, c))
            .collect();
        return Ok((seeds, SeedSource::NullRim));
    }

    let (rows, cols) = grid.dim();
    let seeds = grid
        .indexed_iter()
        .filter(|&((r, c), &value)| {
            let on_border = r == 0 || c == 0 || r + 1 == rows || c + 1 == cols;
            on_border && value != h_max
        })
        .map(|((r, c), _)| PixelRef::new(r, c))
        .collect();
    Ok((seeds, SeedSource::GridBorder))
}
