//! Binary mask dilation
//!
//! A cell of the output is set when any cell under the structuring element
//! centred on it is set in the input. Positions that fall outside the grid
//! count as unset, so the mask never grows in from the edges.

use ndarray::Array2;
use crate::maybe_rayon::*;
use pitfill_core::{Algorithm, Error, Result};

use super::element::StructuringElement;

/// Parameters for mask dilation
#[derive(Debug, Clone)]
#[derive(Default)]
pub struct DilateParams {
    /// Structuring element shape
    pub element: StructuringElement,
}


/// Mask dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct DilateMask;

impl Algorithm for DilateMask {
    type Input = Array2<bool>;
    type Output = Array2<bool>;
    type Params = DilateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Dilate Mask"
    }

    fn description(&self) -> &'static str {
        "Binary dilation of a boolean mask over a structuring element"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        dilate_mask(&input, &params.element)
    }
}

/// Dilate a boolean mask
///
/// # Arguments
/// * `mask` - Input mask
/// * `element` - Structuring element defining the neighborhood shape
pub fn dilate_mask(mask: &Array2<bool>, element: &StructuringElement) -> Result<Array2<bool>> {
    element.validate()?;

    let (rows, cols) = mask.dim();
    let offsets = element.offsets();

    let output_data: Vec<bool> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![false; cols];

            for (col, out) in row_data.iter_mut().enumerate() {
                if mask[(row, col)] {
                    *out = true;
                    continue;
                }

                *out = offsets.iter().any(|&(dr, dc)| {
                    match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                        (Some(r), Some(c)) if r < rows && c < cols => mask[(r, c)],
                        _ => false,
                    }
                });
            }

            row_data
        })
        .collect();

    Array2::from_shape_vec((rows, cols), output_data).map_err(|e| Error::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dilate_single_cell_square() {
        let mut mask = Array2::from_elem((5, 5), false);
        mask[(2, 2)] = true;

        let out = dilate_mask(&mask, &StructuringElement::Square(1)).unwrap();
        for r in 0..5 {
            for c in 0..5 {
                let expected = (1..=3).contains(&r) && (1..=3).contains(&c);
                assert_eq!(out[(r, c)], expected, "cell ({}, {})", r, c);
            }
        }
    }

    #[test]
    fn test_dilate_cross_skips_corners() {
        let mut mask = Array2::from_elem((3, 3), false);
        mask[(1, 1)] = true;

        let out = dilate_mask(&mask, &StructuringElement::Cross(1)).unwrap();
        assert!(out[(0, 1)] && out[(1, 0)] && out[(1, 2)] && out[(2, 1)]);
        assert!(!out[(0, 0)] && !out[(2, 2)]);
    }

    #[test]
    fn test_dilate_edge_does_not_grow_inward() {
        let mask = array![[false, false, false], [false, false, false], [false, false, true]];
        let out = dilate_mask(&mask, &StructuringElement::Square(1)).unwrap();
        assert_eq!(
            out,
            array![[false, false, false], [false, true, true], [false, true, true]]
        );
    }

    #[test]
    fn test_dilate_empty_mask() {
        let mask = Array2::from_elem((4, 6), false);
        let out = dilate_mask(&mask, &StructuringElement::Square(1)).unwrap();
        assert!(out.iter().all(|&v| !v));
    }

    #[test]
    fn test_dilate_rejects_zero_radius() {
        let mask = Array2::from_elem((2, 2), true);
        assert!(dilate_mask(&mask, &StructuringElement::Square(0)).is_err());
    }

    #[test]
    fn test_algorithm_trait() {
        let mut mask = Array2::from_elem((3, 3), false);
        mask[(0, 0)] = true;
        let out = DilateMask.execute_default(mask).unwrap();
        assert!(out[(1, 1)]);
        assert!(!out[(2, 2)]);
    }
}
