use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Tile count must be between 1 and {max}")]
    InvalidTileCount { max: u32 },
    #[error("Aspect ratio must be a positive finite number")]
    InvalidAspectRatio,
    #[error("Animation must last at least one non-zero tick")]
    InvalidTiming,
    #[error("Labels do not match board shape")]
    InvalidBoardShape,
    #[error("Image has zero width or height")]
    InvalidImageSize,
    #[error("Image catalog is empty")]
    EmptyCatalog,
    #[error("No game instance at index {0}")]
    UnknownGame(usize),
}

pub type Result<T> = core::result::Result<T, GameError>;
