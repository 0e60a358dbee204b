//! Local minima filling by grayscale reconstruction-by-erosion
//!
//! Raises every pit in an integer grid to the lowest level at which it can
//! be reached from the seed cells, without lowering any cell below its own
//! value. Seeds are pinned to a fixed boundary value; the flood is driven
//! by a level-bucketed queue, so each cell is resolved exactly once.
//!
//! Used ahead of cloud-shadow detection: a pit left unfilled in a band
//! would otherwise look like a shadow candidate.
//!
//! Reference:
//! Soille, P., & Gratin, C. (1994). An efficient algorithm for drainage
//! network extraction on DEMs. *Journal of Visual Communication and Image
//! Representation*, 5(2), 181–189.

use pitfill_core::raster::Raster;
use pitfill_core::{Algorithm, Connectivity, Error, RasterElement, Result};

use super::propagate::Flood;
use super::seed::{boundary_seeds, SeedSource};

/// Parameters for minima filling
#[derive(Debug, Clone)]
pub struct FillMinimaParams<T> {
    /// Value marking no-data cells; restored verbatim in the output
    pub null_value: T,
    /// Flood height every seed cell is pinned to
    pub boundary_value: T,
    /// Neighbour set the flood spreads through
    pub connectivity: Connectivity,
}

impl<T: RasterElement> FillMinimaParams<T> {
    pub fn new(null_value: T, boundary_value: T) -> Self {
        Self {
            null_value,
            boundary_value,
            connectivity: Connectivity::default(),
        }
    }

    /// Builder-style connectivity setter
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }
}

/// Null at the type's minimum, boundary at zero, 8-connected.
///
/// The boundary must lie within the band's valid range, so the default only
/// suits bands whose values span zero. Any other band fails with
/// [`Error::InvalidParameter`]; pass an explicit boundary instead.
impl<T: RasterElement> Default for FillMinimaParams<T> {
    fn default() -> Self {
        Self::new(T::default_nodata(), T::zero())
    }
}

/// What a fill run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillStats {
    /// Lowest valid value in the input
    pub h_min: i64,
    /// Highest valid value in the input (also the unresolved sentinel)
    pub h_max: i64,
    /// Number of queue levels
    pub levels: usize,
    /// How the seeds were chosen
    pub seed_source: SeedSource,
    /// Number of seed cells
    pub seeds: usize,
    /// Cells resolved by propagation, seeds excluded
    pub processed: usize,
    /// Valid cells the flood never reached (left at `h_max`)
    pub unreached: usize,
    /// No-data cells
    pub null_count: usize,
}

impl FillStats {
    /// Number of valid (non-null) cells
    pub fn valid_count(&self) -> usize {
        self.seeds + self.processed + self.unreached
    }
}

/// Result of a fill: the filled grid and the run statistics
#[derive(Debug, Clone)]
pub struct Filled<T: RasterElement> {
    pub raster: Raster<T>,
    pub stats: FillStats,
}

/// Minima filling algorithm over 16-bit band grids
#[derive(Debug, Clone, Default)]
pub struct FillMinima;

impl Algorithm for FillMinima {
    type Input = Raster<i16>;
    type Output = Raster<i16>;
    type Params = FillMinimaParams<i16>;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Fill Minima"
    }

    fn description(&self) -> &'static str {
        "Fill local minima by reconstruction-by-erosion (Soille & Gratin 1994)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        fill_minima(&input, &params).map(|filled| filled.raster)
    }
}

/// Fill all local minima in `grid`.
///
/// # Algorithm
/// 1. Mask cells equal to `null_value`; find `h_min`/`h_max` over the rest
/// 2. Seed from the rim of the no-data region if there is one, else from
///    the grid border; pin every seed to `boundary_value`
/// 3. Flood level by level from `h_min`, resolving each reached cell to
///    `max(level, value)`
/// 4. Write `null_value` back over every no-data cell
///
/// Cells the flood never reaches keep `h_max`.
///
/// # Errors
/// - [`Error::InvalidDimensions`] for a grid with zero rows or columns
/// - [`Error::NoValidData`] when every cell is `null_value`
/// - [`Error::InvalidParameter`] when `boundary_value` is outside `[h_min, h_max]`
/// - [`Error::Invariant`] / [`Error::Allocation`] on internal failure
///
/// Input errors are reported before any output is built.
pub fn fill_minima<T: RasterElement>(
    grid: &Raster<T>,
    params: &FillMinimaParams<T>,
) -> Result<Filled<T>> {
    let (rows, cols) = grid.shape();
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let null_value = params.null_value;
    let data = grid.data();
    let null_mask = grid.null_mask(null_value);

    let (h_min, h_max) = data
        .iter()
        .filter(|&&v| v != null_value)
        .fold(None, |acc: Option<(T, T)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(Error::NoValidData)?;

    let boundary = params.boundary_value;
    if boundary < h_min || boundary > h_max {
        return Err(Error::InvalidParameter {
            name: "boundary_value",
            value: format!("{:?}", boundary),
            reason: format!("must lie within the valid data range [{:?}, {:?}]", h_min, h_max),
        });
    }

    let (seeds, seed_source) = boundary_seeds(data, &null_mask, h_max)?;

    let mut flood = Flood::new(data, &null_mask, h_min, h_max)?;
    for &pixel in &seeds {
        flood.seed(pixel, boundary)?;
    }
    let levels = flood.levels();
    let processed = flood.run(params.connectivity)?;
    let (output, unreached) = flood.finish(null_value);

    let null_count = null_mask.iter().filter(|&&is_null| is_null).count();
    let stats = FillStats {
        h_min: h_min.to_level(),
        h_max: h_max.to_level(),
        levels,
        seed_source,
        seeds: seeds.len(),
        processed,
        unreached,
        null_count,
    };

    Ok(Filled {
        raster: Raster::from_array(output).with_nodata(null_value),
        stats,
    })
}
