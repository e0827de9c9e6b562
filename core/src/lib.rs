#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use session::*;
pub use store::*;
pub use types::*;

mod board;
mod catalog;
mod engine;
mod error;
mod generator;
mod layout;
mod session;
mod store;
mod types;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMode {
    #[default]
    Single,
    Split,
}

impl PlayerMode {
    pub const fn player_count(self) -> usize {
        self.team_names().len()
    }

    pub const fn team_names(self) -> &'static [&'static str] {
        match self {
            Self::Single => &["Team Name"],
            Self::Split => &["Team 1", "Team 2"],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub tile_count: CellCount,
    pub player_mode: PlayerMode,
    pub timing: AnimationTiming,
}

impl GameConfig {
    pub const DEFAULT_TILE_COUNT: CellCount = 30;

    pub fn new(
        tile_count: CellCount,
        player_mode: PlayerMode,
        timing: AnimationTiming,
    ) -> Result<Self> {
        Ok(Self {
            tile_count: validate_tile_count(tile_count)?,
            player_mode,
            timing,
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_count: Self::DEFAULT_TILE_COUNT,
            player_mode: PlayerMode::default(),
            timing: AnimationTiming::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_zero_tiles() {
        assert_eq!(
            GameConfig::new(0, PlayerMode::Single, AnimationTiming::default()),
            Err(GameError::InvalidTileCount {
                max: MAX_TILE_COUNT
            })
        );
    }

    #[test]
    fn defaults_to_single_player() {
        assert_eq!(PlayerMode::default(), PlayerMode::Single);
        assert_eq!(GameConfig::default().player_mode, PlayerMode::Single);
    }

    #[test]
    fn player_mode_decides_board_count() {
        assert_eq!(PlayerMode::Single.player_count(), 1);
        assert_eq!(PlayerMode::Split.player_count(), 2);
    }
}
