//! Pit depth: how far filling raised each cell
//!
//! Shadow detection looks at `filled - original` per band; a deep,
//! filled-in pit in both bands is a shadow candidate.

use ndarray::Zip;
use pitfill_core::raster::Raster;
use pitfill_core::{Error, RasterElement, Result};

/// Per-cell `filled - original`.
///
/// Cells that are `null_value` in either input are `null_value` in the
/// result. A difference that does not fit `T` is an error.
pub fn pit_depth<T: RasterElement>(
    original: &Raster<T>,
    filled: &Raster<T>,
    null_value: T,
) -> Result<Raster<T>> {
    if original.shape() != filled.shape() {
        let (er, ec) = original.shape();
        let (ar, ac) = filled.shape();
        return Err(Error::SizeMismatch { er, ec, ar, ac });
    }

    let mut depth = original.like(null_value);
    let mut overflow: Option<i64> = None;

    Zip::from(depth.data_mut())
        .and(original.data())
        .and(filled.data())
        .for_each(|out, &orig, &fill| {
            if orig == null_value || fill == null_value || overflow.is_some() {
                return;
            }
            let diff = fill.to_level() - orig.to_level();
            match T::from_level(diff) {
                Some(v) => *out = v,
                None => overflow = Some(diff),
            }
        });

    if let Some(diff) = overflow {
        return Err(Error::InvalidParameter {
            name: "depth",
            value: diff.to_string(),
            reason: "difference does not fit the cell type".to_string(),
        });
    }

    depth.set_nodata(Some(null_value));
    Ok(depth)
}
