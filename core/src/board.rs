use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Computed layout for one image: grid shape, which label sits in which cell, and the highlight path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    shape: GridShape,
    labels: Array2<TileId>,
    // cell_of[tile - 1] is the row-major index of the cell showing `tile`
    cell_of: Vec<CellIndex>,
    perimeter: PerimeterPath,
}

impl Board {
    /// Builds a board from labels laid out in row-major order, each of `1..=rows*cols` exactly once.
    pub fn from_row_major_labels(shape: GridShape, labels: Vec<TileId>) -> Result<Self> {
        let total = shape.total_cells() as usize;
        if total == 0 || labels.len() != total {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cell_of = alloc::vec![CellIndex::MAX; total];
        for (index, &tile) in labels.iter().enumerate() {
            let slot = (tile as usize)
                .checked_sub(1)
                .and_then(|i| cell_of.get_mut(i))
                .ok_or(GameError::InvalidBoardShape)?;
            if *slot != CellIndex::MAX {
                return Err(GameError::InvalidBoardShape);
            }
            *slot = index;
        }

        let dim = (usize::from(shape.rows), usize::from(shape.cols));
        let labels =
            Array2::from_shape_vec(dim, labels).map_err(|_| GameError::InvalidBoardShape)?;

        Ok(Self {
            shape,
            labels,
            cell_of,
            perimeter: PerimeterPath::new(shape),
        })
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn total_cells(&self) -> CellCount {
        self.shape.total_cells()
    }

    pub fn perimeter(&self) -> &PerimeterPath {
        &self.perimeter
    }

    pub fn label_at(&self, coords: Coord2) -> Option<TileId> {
        self.labels.get(coords.to_nd_index()).copied()
    }

    pub fn label_at_index(&self, index: CellIndex) -> Option<TileId> {
        self.shape
            .coords_of(index)
            .and_then(|coords| self.label_at(coords))
    }

    /// Cell showing `tile`, the lookup the renderer uses to uncover a revealed label.
    pub fn cell_of(&self, tile: TileId) -> Option<CellIndex> {
        let i = (tile as usize).checked_sub(1)?;
        self.cell_of.get(i).copied()
    }

    pub fn labels(&self) -> &Array2<TileId> {
        &self.labels
    }
}
