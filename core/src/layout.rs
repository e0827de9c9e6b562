use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Row/column layout of the overlay grid.
///
/// `rows * cols` may exceed the tile count that was asked for, every extra cell still gets a label.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: Coord,
    pub cols: Coord,
}

impl GridShape {
    pub const fn new(rows: Coord, cols: Coord) -> Self {
        Self { rows, cols }
    }

    /// Picks the shape whose `cols / rows` is closest to `aspect_ratio` (width over height) while covering at least
    /// `total_items` cells.
    ///
    /// Only factorizations around the square root of `total_items` are scanned, each row count `r` is tried as is
    /// and transposed, the first best candidate wins ties.
    pub fn solve(total_items: CellCount, aspect_ratio: f64) -> Result<Self> {
        validate_tile_count(total_items)?;
        validate_aspect_ratio(aspect_ratio)?;

        let mut best = Self::new(1, axis(total_items));
        let mut min_diff = f64::INFINITY;

        for r in 1..=total_items.isqrt() {
            let c = total_items.div_ceil(r);
            let wide = Self::new(axis(r), axis(c));
            let tall = Self::new(axis(c), axis(r));

            for candidate in [wide, tall] {
                let diff = deviation(candidate.ratio(), aspect_ratio);
                if diff < min_diff {
                    min_diff = diff;
                    best = candidate;
                }
            }
        }

        // grow until every requested tile has a cell
        while best.total_cells() < total_items {
            if best.ratio() < aspect_ratio {
                best.cols += 1;
            } else {
                best.rows += 1;
            }
        }

        log::debug!(
            "grid for {} tiles at ratio {:.3}: {}x{}",
            total_items,
            aspect_ratio,
            best.rows,
            best.cols
        );
        Ok(best)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// Width over height of the grid, in cells.
    pub fn ratio(&self) -> f64 {
        f64::from(self.cols) / f64::from(self.rows)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn index_of(&self, (row, col): Coord2) -> CellIndex {
        usize::from(row) * usize::from(self.cols) + usize::from(col)
    }

    pub fn coords_of(&self, index: CellIndex) -> Option<Coord2> {
        let cols = usize::from(self.cols);
        if cols == 0 || index >= self.total_cells() as usize {
            return None;
        }
        let row = Coord::try_from(index / cols).ok()?;
        let col = Coord::try_from(index % cols).ok()?;
        Some((row, col))
    }
}

pub fn validate_tile_count(total_items: CellCount) -> Result<CellCount> {
    if (1..=MAX_TILE_COUNT).contains(&total_items) {
        Ok(total_items)
    } else {
        Err(GameError::InvalidTileCount {
            max: MAX_TILE_COUNT,
        })
    }
}

pub fn validate_aspect_ratio(aspect_ratio: f64) -> Result<f64> {
    if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        Ok(aspect_ratio)
    } else {
        Err(GameError::InvalidAspectRatio)
    }
}

fn axis(value: CellCount) -> Coord {
    Coord::try_from(value).unwrap_or(Coord::MAX)
}

fn deviation(a: f64, b: f64) -> f64 {
    if a > b { a - b } else { b - a }
}

/// Clockwise walk over the boundary cells of a grid, starting at the top-left corner.
///
/// Drives the highlight animation only, it has nothing to do with reveal order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerimeterPath {
    cells: Vec<CellIndex>,
}

impl PerimeterPath {
    pub fn new(shape: GridShape) -> Self {
        let rows = usize::from(shape.rows);
        let cols = usize::from(shape.cols);
        if rows == 0 || cols == 0 {
            return Self::default();
        }

        let inner_rows = 1..rows - 1;
        let mut cells = Vec::with_capacity(2 * (rows + cols));

        // top row, left to right
        cells.extend(0..cols);
        // right column, downwards
        cells.extend(inner_rows.clone().map(|r| r * cols + (cols - 1)));
        // bottom row, right to left
        if rows > 1 {
            cells.extend((0..cols).rev().map(|c| (rows - 1) * cols + c));
        }
        // left column, upwards
        if cols > 1 {
            cells.extend(inner_rows.rev().map(|r| r * cols));
        }

        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_slice(&self) -> &[CellIndex] {
        &self.cells
    }

    /// Cell highlighted at animation step `tick`, wrapping around the path.
    pub fn cell_at_tick(&self, tick: u32) -> Option<CellIndex> {
        if self.cells.is_empty() {
            return None;
        }
        self.cells.get(tick as usize % self.cells.len()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_single_tile_is_one_by_one() {
        for ratio in [0.01, 0.5, 1.0, 1.777, 40.0] {
            assert_eq!(GridShape::solve(1, ratio).unwrap(), GridShape::new(1, 1));
        }
    }

    #[test]
    fn solve_thirty_square_is_near_square() {
        let shape = GridShape::solve(30, 1.0).unwrap();

        assert!(
            shape == GridShape::new(5, 6) || shape == GridShape::new(6, 5),
            "unexpected shape {:?}",
            shape
        );
    }

    #[test]
    fn solve_always_covers_requested_tiles() {
        let ratios = [0.05, 0.3, 0.75, 1.0, 4.0 / 3.0, 16.0 / 9.0, 3.0, 25.0];
        for total in 1..=400 {
            for &ratio in &ratios {
                let shape = GridShape::solve(total, ratio).unwrap();
                assert!(
                    shape.total_cells() >= total,
                    "{:?} does not cover {} at {}",
                    shape,
                    total,
                    ratio
                );
            }
        }
    }

    #[test]
    fn solve_follows_landscape_and_portrait_images() {
        let wide = GridShape::solve(24, 16.0 / 9.0).unwrap();
        let tall = GridShape::solve(24, 9.0 / 16.0).unwrap();

        assert!(wide.cols > wide.rows);
        assert!(tall.rows > tall.cols);
        assert_eq!(wide, GridShape::new(4, 6));
        assert_eq!(tall, GridShape::new(6, 4));
    }

    #[test]
    fn solve_degenerate_ratio_uses_a_single_line() {
        assert_eq!(GridShape::solve(12, 1000.0).unwrap(), GridShape::new(1, 12));
        assert_eq!(GridShape::solve(12, 0.001).unwrap(), GridShape::new(12, 1));
    }

    #[test]
    fn solve_rejects_bad_configuration() {
        let max = MAX_TILE_COUNT;
        assert_eq!(
            GridShape::solve(0, 1.0),
            Err(GameError::InvalidTileCount { max })
        );
        assert_eq!(
            GridShape::solve(max + 1, 1.0),
            Err(GameError::InvalidTileCount { max })
        );
        assert_eq!(GridShape::solve(4, 0.0), Err(GameError::InvalidAspectRatio));
        assert_eq!(GridShape::solve(4, -2.0), Err(GameError::InvalidAspectRatio));
        assert_eq!(
            GridShape::solve(4, f64::NAN),
            Err(GameError::InvalidAspectRatio)
        );
        assert_eq!(
            GridShape::solve(4, f64::INFINITY),
            Err(GameError::InvalidAspectRatio)
        );
    }

    #[test]
    fn solve_handles_the_largest_board() {
        let shape = GridShape::solve(MAX_TILE_COUNT, 1.5).unwrap();
        assert!(shape.total_cells() >= MAX_TILE_COUNT);
    }

    #[test]
    fn perimeter_of_three_by_three_skips_center() {
        let path = PerimeterPath::new(GridShape::new(3, 3));

        assert_eq!(path.len(), 8);
        assert_eq!(path.as_slice(), &[0, 1, 2, 5, 8, 7, 6, 3]);
        assert!(!path.as_slice().contains(&4));
    }

    #[test]
    fn perimeter_of_single_line_is_every_cell() {
        let row = PerimeterPath::new(GridShape::new(1, 5));
        let col = PerimeterPath::new(GridShape::new(4, 1));

        assert_eq!(row.as_slice(), &[0, 1, 2, 3, 4]);
        assert_eq!(col.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn perimeter_has_no_duplicates() {
        for rows in 1..8 {
            for cols in 1..8 {
                let path = PerimeterPath::new(GridShape::new(rows, cols));
                let mut cells = path.as_slice().to_vec();
                cells.sort_unstable();
                cells.dedup();

                let inner = usize::from(rows.saturating_sub(2)) * usize::from(cols.saturating_sub(2));
                let expected = usize::from(rows) * usize::from(cols) - inner;
                assert_eq!(cells.len(), path.len());
                assert_eq!(path.len(), expected, "{}x{}", rows, cols);
            }
        }
    }

    #[test]
    fn perimeter_ticks_wrap_around() {
        let path = PerimeterPath::new(GridShape::new(2, 2));

        assert_eq!(path.as_slice(), &[0, 1, 3, 2]);
        assert_eq!(path.cell_at_tick(0), Some(0));
        assert_eq!(path.cell_at_tick(4), Some(0));
        assert_eq!(path.cell_at_tick(7), Some(2));
        assert_eq!(PerimeterPath::default().cell_at_tick(3), None);
    }

    #[test]
    fn coords_and_index_agree() {
        let shape = GridShape::new(3, 4);

        assert_eq!(shape.index_of((2, 1)), 9);
        assert_eq!(shape.coords_of(9), Some((2, 1)));
        assert_eq!(shape.coords_of(12), None);
        assert!(shape.contains((2, 3)));
        assert!(!shape.contains((3, 0)));
    }
}
