//! Local minima filling
//!
//! - Level bucket queue: O(1) FIFO buckets indexed by integer level
//! - Boundary seeding: no-data rim or grid border
//! - Flood propagation: monotone level-by-level reconstruction-by-erosion
//! - Pit depth: filled minus original

mod bucket_queue;
mod fill_minima;
mod pit_depth;
mod propagate;
mod seed;

pub use bucket_queue::{LevelQueue, PixelRef};
pub use fill_minima::{fill_minima, FillMinima, FillMinimaParams, FillStats, Filled};
pub use pit_depth::pit_depth;
pub use propagate::Flood;
pub use seed::{boundary_seeds, SeedSource};
