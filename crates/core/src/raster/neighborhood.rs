//! Neighbour connectivity for flood propagation

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[rustfmt::skip]
const FULL: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Which cells of the surrounding 3x3 ring count as neighbours.
///
/// Connectivity decides which cells a flood can reach from a seed, so it
/// changes the shape of filled regions and is always chosen explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Orthogonal neighbours only (N, W, E, S)
    Four,
    /// The full 3x3 ring
    #[default]
    Eight,
    /// The four corner cells only (NW, NE, SW, SE)
    Diagonal,
}

impl Connectivity {
    /// Relative (row, col) offsets, centre excluded
    pub fn offsets(&self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &ORTHOGONAL,
            Connectivity::Eight => &FULL,
            Connectivity::Diagonal => &DIAGONAL,
        }
    }

    /// Check if a relative position is a neighbour under this connectivity
    pub fn contains(&self, dr: isize, dc: isize) -> bool {
        self.offsets().contains(&(dr, dc))
    }

    /// In-bounds neighbours of (row, col) in a grid of the given shape
    pub fn neighbors(&self, row: usize, col: usize, shape: (usize, usize)) -> NeighborIterator {
        NeighborIterator {
            center_row: row,
            center_col: col,
            rows: shape.0,
            cols: shape.1,
            offsets: self.offsets(),
            index: 0,
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Connectivity::Four => "4",
            Connectivity::Eight => "8",
            Connectivity::Diagonal => "diagonal",
        };
        f.write_str(name)
    }
}

impl FromStr for Connectivity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "4" | "four" | "rook" => Ok(Connectivity::Four),
            "8" | "eight" | "queen" => Ok(Connectivity::Eight),
            "diagonal" | "diag" | "x" => Ok(Connectivity::Diagonal),
            other => Err(Error::InvalidParameter {
                name: "connectivity",
                value: other.to_string(),
                reason: "expected 4, 8 or diagonal".to_string(),
            }),
        }
    }
}

/// Iterator over the in-bounds neighbour coordinates of one cell
#[derive(Debug, Clone)]
pub struct NeighborIterator {
    center_row: usize,
    center_col: usize,
    rows: usize,
    cols: usize,
    offsets: &'static [(isize, isize)],
    index: usize,
}

impl Iterator for NeighborIterator {
    /// (row, col)
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&(dr, dc)) = self.offsets.get(self.index) {
            self.index += 1;

            let (Some(r), Some(c)) = (
                self.center_row.checked_add_signed(dr),
                self.center_col.checked_add_signed(dc),
            ) else {
                continue;
            };

            if r < self.rows && c < self.cols {
                return Some((r, c));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len() - self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_offsets() {
        assert_eq!(Connectivity::Four.offsets().len(), 4);
        assert_eq!(Connectivity::Eight.offsets().len(), 8);
        assert_eq!(Connectivity::Diagonal.offsets().len(), 4);

        assert!(Connectivity::Four.contains(0, 1));
        assert!(!Connectivity::Four.contains(1, 1));
        assert!(Connectivity::Diagonal.contains(1, 1));
        assert!(!Connectivity::Diagonal.contains(0, 1));
        assert!(!Connectivity::Eight.contains(0, 0));
    }

    #[test]
    fn test_full_ring_is_row_major_union() {
        let full = Connectivity::Eight.offsets();
        let mut sorted = full.to_vec();
        sorted.sort();
        assert_eq!(full, sorted.as_slice());

        for off in Connectivity::Four.offsets().iter().chain(Connectivity::Diagonal.offsets()) {
            assert!(full.contains(off), "{:?} missing from the 8-ring", off);
        }
    }

    #[test]
    fn test_neighbors_corner_clipped() {
        let corner: Vec<_> = Connectivity::Eight.neighbors(0, 0, (3, 3)).collect();
        assert_eq!(corner, vec![(0, 1), (1, 0), (1, 1)]);

        let diag: Vec<_> = Connectivity::Diagonal.neighbors(0, 0, (3, 3)).collect();
        assert_eq!(diag, vec![(1, 1)]);
    }

    #[test]
    fn test_neighbors_interior() {
        let n: Vec<_> = Connectivity::Four.neighbors(1, 1, (3, 3)).collect();
        assert_eq!(n, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
        assert_eq!(Connectivity::Eight.neighbors(1, 1, (3, 3)).count(), 8);
    }

    #[test]
    fn test_neighbors_single_cell() {
        assert_eq!(Connectivity::Eight.neighbors(0, 0, (1, 1)).count(), 0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("4".parse::<Connectivity>().unwrap(), Connectivity::Four);
        assert_eq!("Eight".parse::<Connectivity>().unwrap(), Connectivity::Eight);
        assert_eq!("diagonal".parse::<Connectivity>().unwrap(), Connectivity::Diagonal);
        assert!("6".parse::<Connectivity>().is_err());
        assert_eq!(Connectivity::default(), Connectivity::Eight);
        assert_eq!(Connectivity::Diagonal.to_string(), "diagonal");
    }
}
