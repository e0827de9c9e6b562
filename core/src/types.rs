/// Single grid axis used for row and column counts.
pub type Coord = u16;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u32;

/// Label painted on a tile, always in `1..=total_cells`.
pub type TileId = CellCount;

/// Row-major position of a cell inside the grid, `row * cols + col`.
pub type CellIndex = usize;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Largest tile count a board may be asked for, any single axis must fit in [`Coord`].
pub const MAX_TILE_COUNT: CellCount = Coord::MAX as CellCount;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}
