use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Cadence of the highlight walk that precedes every reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationTiming {
    tick_interval_ms: u32,
    duration_ms: u32,
}

impl AnimationTiming {
    pub const DEFAULT_TICK_INTERVAL_MS: u32 = 50;
    pub const DEFAULT_DURATION_MS: u32 = 2000;

    pub fn new(tick_interval_ms: u32, duration_ms: u32) -> Result<Self> {
        if tick_interval_ms == 0 || duration_ms < tick_interval_ms {
            return Err(GameError::InvalidTiming);
        }
        Ok(Self {
            tick_interval_ms,
            duration_ms,
        })
    }

    pub const fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub const fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Number of highlight steps that fit in one animation, zero for a timing that never ticks.
    pub const fn tick_count(&self) -> u32 {
        match self.duration_ms.checked_div(self.tick_interval_ms) {
            Some(count) => count,
            None => 0,
        }
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS,
            duration_ms: Self::DEFAULT_DURATION_MS,
        }
    }
}

/// Unrevealed and revealed labels of one game.
///
/// Every label of `1..=total` is in exactly one of the two lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePool {
    remaining: Vec<TileId>,
    chosen: Vec<TileId>,
}

impl TilePool {
    pub fn new<R: Rng + ?Sized>(total_cells: CellCount, rng: &mut R) -> Self {
        let mut remaining: Vec<TileId> = (1..=total_cells).collect();
        remaining.shuffle(rng);
        Self {
            remaining,
            chosen: Vec::with_capacity(total_cells as usize),
        }
    }

    pub fn remaining(&self) -> &[TileId] {
        &self.remaining
    }

    /// Revealed labels in reveal order.
    pub fn chosen(&self) -> &[TileId] {
        &self.chosen
    }

    pub fn total_cells(&self) -> CellCount {
        (self.remaining.len() + self.chosen.len()) as CellCount
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Moves one uniformly sampled label from remaining to chosen.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<TileId> {
        if self.remaining.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.remaining.len());
        let tile = self.remaining.swap_remove(index);
        self.chosen.push(tile);
        Some(tile)
    }

    /// Moves everything left into chosen, returning the moved labels.
    pub fn drain_remaining(&mut self) -> Vec<TileId> {
        let forced = core::mem::take(&mut self.remaining);
        self.chosen.extend_from_slice(&forced);
        forced
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerState {
    #[default]
    Idle,
    Animating,
    Complete,
}

impl SequencerState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// What the renderer needs to play the walk before `tile` is uncovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealAnimation {
    pub tile: TileId,
    pub path: PerimeterPath,
    pub timing: AnimationTiming,
}

impl RevealAnimation {
    pub fn highlight_at(&self, tick: u32) -> Option<CellIndex> {
        self.path.cell_at_tick(tick)
    }

    pub fn tick_count(&self) -> u32 {
        self.timing.tick_count()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HighlightStep {
    pub current: CellIndex,
    pub previous: Option<CellIndex>,
}

/// Result of an animation running to completion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RevealReport {
    pub tile: TileId,
    /// Set exactly once per game, on the report for the last label.
    pub complete: bool,
}

/// Per-game reveal state machine: `Idle -> Animating -> Idle ... -> Complete`.
///
/// Reveals never overlap, [`reveal_next`](Self::reveal_next) is ignored until the running animation is finished
/// through [`finish_reveal`](Self::finish_reveal).
#[derive(Clone, Debug)]
pub struct RevealSequencer {
    total_cells: CellCount,
    pool: TilePool,
    perimeter: PerimeterPath,
    timing: AnimationTiming,
    state: SequencerState,
    current: Option<TileId>,
    tick: u32,
    rng: SmallRng,
}

impl RevealSequencer {
    pub fn new(board: &Board, timing: AnimationTiming, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let total_cells = board.total_cells();
        if total_cells == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let pool = TilePool::new(total_cells, &mut rng);
        Ok(Self {
            total_cells,
            pool,
            perimeter: board.perimeter().clone(),
            timing,
            state: SequencerState::Idle,
            current: None,
            tick: 0,
            rng,
        })
    }

    /// Starts over with labels `1..=total_cells`, ignored while an animation is running.
    ///
    /// `total_cells` must be the cell count of the board this sequencer was built for.
    pub fn initialize(&mut self, total_cells: CellCount) -> Result<()> {
        if total_cells != self.total_cells {
            return Err(GameError::InvalidBoardShape);
        }
        if matches!(self.state, SequencerState::Animating) {
            log::debug!("initialize ignored, animation in progress");
            return Ok(());
        }

        self.pool = TilePool::new(total_cells, &mut self.rng);
        self.state = SequencerState::Idle;
        self.current = None;
        self.tick = 0;
        Ok(())
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn timing(&self) -> AnimationTiming {
        self.timing
    }

    pub fn perimeter(&self) -> &PerimeterPath {
        &self.perimeter
    }

    pub fn remaining(&self) -> &[TileId] {
        self.pool.remaining()
    }

    pub fn chosen(&self) -> &[TileId] {
        self.pool.chosen()
    }

    /// Label picked by the running animation, not yet announced.
    pub fn pending_tile(&self) -> Option<TileId> {
        self.current
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, SequencerState::Animating)
    }

    pub fn can_reveal(&self) -> bool {
        self.state.is_idle() && !self.pool.is_exhausted()
    }

    /// Draws the next label and starts its animation, `None` when busy or nothing is left.
    pub fn reveal_next(&mut self) -> Option<RevealAnimation> {
        if !self.can_reveal() {
            log::debug!("reveal ignored in state {:?}", self.state);
            return None;
        }

        let tile = self.pool.draw(&mut self.rng)?;
        self.state = SequencerState::Animating;
        self.current = Some(tile);
        self.tick = 0;
        log::debug!("chose tile {}, {} left", tile, self.pool.remaining().len());

        Some(RevealAnimation {
            tile,
            path: self.perimeter.clone(),
            timing: self.timing,
        })
    }

    /// Advances the highlight by one cell.
    pub fn tick(&mut self) -> Option<HighlightStep> {
        if !self.is_busy() {
            return None;
        }

        let current = self.perimeter.cell_at_tick(self.tick)?;
        let previous = self
            .tick
            .checked_sub(1)
            .and_then(|tick| self.perimeter.cell_at_tick(tick));
        log::trace!("tick {} highlights cell {}", self.tick, current);
        self.tick = self.tick.wrapping_add(1);

        Some(HighlightStep { current, previous })
    }

    /// Ends the running animation and announces its label.
    pub fn finish_reveal(&mut self) -> Option<RevealReport> {
        if !self.is_busy() {
            return None;
        }

        let tile = self.current.take()?;
        let complete = self.pool.is_exhausted();
        self.state = if complete {
            SequencerState::Complete
        } else {
            SequencerState::Idle
        };
        self.tick = 0;

        if complete {
            log::debug!("all {} tiles revealed", self.pool.total_cells());
        }
        Some(RevealReport { tile, complete })
    }

    /// Reveals everything at once, skipping animation; returns the labels that were still hidden.
    pub fn reveal_all(&mut self) -> Vec<TileId> {
        if self.state.is_complete() {
            return Vec::new();
        }

        let forced = self.pool.drain_remaining();
        self.state = SequencerState::Complete;
        self.current = None;
        self.tick = 0;
        log::debug!("forced reveal of {} tiles", forced.len());
        forced
    }
}
