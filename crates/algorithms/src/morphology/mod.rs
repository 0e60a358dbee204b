//! Mathematical morphology on boolean masks
//!
//! - **Dilation**: grow set regions by a structuring element. The minima
//!   fill uses a 3x3 dilation of the no-data mask to find the rim of valid
//!   cells that borders it.

mod dilate;
mod element;

pub use dilate::{dilate_mask, DilateMask, DilateParams};
pub use element::StructuringElement;
