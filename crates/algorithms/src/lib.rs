//! # pitfill Algorithms
//!
//! Raster algorithms behind the pitfill tools.
//!
//! ## Available Algorithm Categories
//!
//! - **fill**: Local minima filling (reconstruction-by-erosion), pit depth
//! - **morphology**: Binary mask dilation, structuring elements

pub mod fill;
pub mod morphology;
mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::fill::{
        fill_minima, pit_depth, FillMinima, FillMinimaParams, FillStats, Filled, SeedSource,
    };
    pub use crate::morphology::{dilate_mask, DilateMask, StructuringElement};
    pub use pitfill_core::prelude::*;
}
