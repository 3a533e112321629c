use thiserror::Error;

use crate::validate::{MAX_SIDE, MIN_SIDE};

/// Errors surfaced by board construction and the command surface.
///
/// The validation variants render the exact message a frontend shows the
/// player, so callers can display them as-is.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board width must be greater than {}.", MIN_SIDE - 1)]
    WidthTooSmall,
    #[error("Board width must be less than {}.", MAX_SIDE + 1)]
    WidthTooLarge,
    #[error("Board height must be greater than {}.", MIN_SIDE - 1)]
    HeightTooSmall,
    #[error("Board height must be less than {}.", MAX_SIDE + 1)]
    HeightTooLarge,
    #[error("Board must contain at least one mine.")]
    NoMines,
    #[error("Mine count must leave at least one safe tile.")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure to parse a `"width,height,mines"` triple.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Expected a \"width,height,mines\" triple, got {0:?}")]
pub struct ParseSizeError(pub(crate) String);
