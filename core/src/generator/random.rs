use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Uniform Fisher-Yates placement of labels over the grid.
///
/// Only decides where numbers are painted, reveal order is sampled separately by the [`RevealSequencer`].
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLabelGenerator {
    seed: u64,
}

impl RandomLabelGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LabelGenerator for RandomLabelGenerator {
    fn generate(self, shape: GridShape) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut labels: Vec<TileId> = (1..=shape.total_cells()).collect();
        labels.shuffle(&mut rng);

        Board::from_row_major_labels(shape, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_layout() {
        let shape = GridShape::new(4, 5);
        let a = RandomLabelGenerator::new(7).generate(shape).unwrap();
        let b = RandomLabelGenerator::new(7).generate(shape).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn every_label_placed_once() {
        let shape = GridShape::new(6, 5);
        let board = RandomLabelGenerator::new(42).generate(shape).unwrap();

        let mut seen: Vec<TileId> = board.labels().iter().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn different_seeds_scramble_differently() {
        let shape = GridShape::new(6, 6);
        let layouts: Vec<Board> = (0..4)
            .map(|seed| RandomLabelGenerator::new(seed).generate(shape).unwrap())
            .collect();
        let ordered = OrderedLabelGenerator.generate(shape).unwrap();

        assert!(layouts.iter().any(|board| board != &ordered));
        assert!(layouts.windows(2).any(|pair| pair[0] != pair[1]));
    }
}
