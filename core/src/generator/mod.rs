use crate::*;
pub use random::*;

mod random;

/// Decides which label each cell of a freshly solved grid shows.
pub trait LabelGenerator {
    fn generate(self, shape: GridShape) -> Result<Board>;
}

/// Labels `1..=total` in row-major order, handy for tests and debugging layouts.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OrderedLabelGenerator;

impl LabelGenerator for OrderedLabelGenerator {
    fn generate(self, shape: GridShape) -> Result<Board> {
        Board::from_row_major_labels(shape, (1..=shape.total_cells()).collect())
    }
}
