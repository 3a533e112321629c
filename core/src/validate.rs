//! Pure bounds checks for board configuration. Stateless and thread-safe;
//! callers surface the error display text unchanged.

use crate::BoardSize;
use crate::error::{GameError, Result};
use crate::types::{CellCount, Coord, mult};

/// Smallest accepted board side.
pub const MIN_SIDE: Coord = 8;
/// Largest accepted board side.
pub const MAX_SIDE: Coord = 100;

pub fn width(width: Coord) -> Result<()> {
    if width < MIN_SIDE {
        Err(GameError::WidthTooSmall)
    } else if width > MAX_SIDE {
        Err(GameError::WidthTooLarge)
    } else {
        Ok(())
    }
}

pub fn height(height: Coord) -> Result<()> {
    if height < MIN_SIDE {
        Err(GameError::HeightTooSmall)
    } else if height > MAX_SIDE {
        Err(GameError::HeightTooLarge)
    } else {
        Ok(())
    }
}

/// A board needs at least one mine and at least one safe tile.
pub fn mines(mines: CellCount, width: Coord, height: Coord) -> Result<()> {
    if mines == 0 {
        Err(GameError::NoMines)
    } else if mines > mult(width, height).saturating_sub(1) {
        Err(GameError::TooManyMines)
    } else {
        Ok(())
    }
}

/// Width, then height, then mine count; stops at the first failure.
pub fn board(size: &BoardSize) -> Result<()> {
    width(size.width)?;
    height(size.height)?;
    mines(size.mines, size.width, size.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for size in [
            BoardSize::BEGINNER,
            BoardSize::INTERMEDIATE,
            BoardSize::EXPERT,
        ] {
            assert_eq!(board(&size), Ok(()));
        }
        assert_eq!(board(&BoardSize::new(100, 100, 9_999)), Ok(()));
    }

    #[test]
    fn sides_outside_bounds_are_rejected() {
        assert_eq!(width(7), Err(GameError::WidthTooSmall));
        assert_eq!(width(101), Err(GameError::WidthTooLarge));
        assert_eq!(width(8), Ok(()));
        assert_eq!(width(100), Ok(()));
        assert_eq!(height(0), Err(GameError::HeightTooSmall));
        assert_eq!(height(255), Err(GameError::HeightTooLarge));
    }

    #[test]
    fn mine_count_must_leave_a_safe_tile() {
        assert_eq!(mines(0, 9, 9), Err(GameError::NoMines));
        assert_eq!(mines(81, 9, 9), Err(GameError::TooManyMines));
        assert_eq!(mines(80, 9, 9), Ok(()));
        assert_eq!(mines(1, 9, 9), Ok(()));
    }

    #[test]
    fn board_check_short_circuits_in_order() {
        // bad width wins over bad height and bad mines
        assert_eq!(
            board(&BoardSize::new(7, 101, 0)),
            Err(GameError::WidthTooSmall)
        );
        assert_eq!(
            board(&BoardSize::new(9, 101, 0)),
            Err(GameError::HeightTooLarge)
        );
        assert_eq!(board(&BoardSize::new(9, 9, 0)), Err(GameError::NoMines));
    }

    #[test]
    fn messages_match_the_frontend_strings() {
        assert_eq!(
            width(7).unwrap_err().to_string(),
            "Board width must be greater than 7."
        );
        assert_eq!(
            width(101).unwrap_err().to_string(),
            "Board width must be less than 101."
        );
        assert_eq!(
            height(7).unwrap_err().to_string(),
            "Board height must be greater than 7."
        );
        assert_eq!(
            mines(81, 9, 9).unwrap_err().to_string(),
            "Mine count must leave at least one safe tile."
        );
    }
}
