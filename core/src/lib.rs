//! Minesweeper board engine: validated construction, first-click-safe mine
//! generation, iterative flood-fill reveal, and win/loss tracking.
//!
//! Frontends drive a [`Minesweeper`] through its command surface and redraw
//! from the returned change sets; nothing here knows about rendering.

use std::cmp::Ordering;
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use shared::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod shared;
mod tile;
mod types;
pub mod validate;

use types::{mult, nd};

/// Board dimensions and mine count, the triple a frontend persists as the
/// "last used board size".
///
/// [`Display`](fmt::Display) and [`FromStr`] round-trip the external
/// `"width,height,mines"` form; neither enforces the playable bounds, that
/// is [`validate::board`]'s job at engine construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl BoardSize {
    pub const BEGINNER: Self = Self::new(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new(16, 16, 40);
    pub const EXPERT: Self = Self::new(30, 16, 99);

    pub const fn new(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub const fn dim(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Tiles that carry no mine.
    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.mines)
    }

    /// Human-readable form, e.g. `"9x9, 10 mines"`.
    pub fn describe(&self) -> String {
        format!("{}x{}, {} mines", self.width, self.height, self.mines)
    }
}

/// Sizes order by total area first, then mine count.
impl Ord for BoardSize {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_tiles()
            .cmp(&other.total_tiles())
            .then(self.mines.cmp(&other.mines))
            .then(self.width.cmp(&other.width))
            .then(self.height.cmp(&other.height))
    }
}

impl PartialOrd for BoardSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.width, self.height, self.mines)
    }
}

impl FromStr for BoardSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let err = || ParseSizeError(s.to_owned());
        let mut parts = s.split(',').map(str::trim);
        let (Some(width), Some(height), Some(mines), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };
        Ok(Self {
            width: width.parse().map_err(|_| err())?,
            height: height.parse().map_err(|_| err())?,
            mines: mines.parse().map_err(|_| err())?,
        })
    }
}

/// Where the mines are: a boolean mask over the board plus its count.
///
/// Produced by a [`MinefieldGenerator`], or built from explicit coordinates
/// for forced layouts in tests and replays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mask: Array2<bool>,
    count: CellCount,
}

impl MineLayout {
    pub fn from_mask(mask: Array2<bool>) -> Self {
        let count = mask
            .iter()
            .filter(|&&mine| mine)
            .count()
            .try_into()
            .unwrap();
        Self { mask, count }
    }

    pub fn from_coords(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(nd(size));
        for &pos in mines {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mask[nd(pos)] = true;
        }
        Ok(Self::from_mask(mask))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn board_size(&self) -> BoardSize {
        let (width, height) = self.size();
        BoardSize::new(width, height, self.count)
    }

    pub fn total_tiles(&self) -> CellCount {
        self.mask.len().try_into().unwrap()
    }

    pub fn safe_tiles(&self) -> CellCount {
        self.total_tiles() - self.count
    }

    pub fn mine_count(&self) -> CellCount {
        self.count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mask[nd(coords)]
    }

    /// Coordinates of every mine, column-major.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mask
            .indexed_iter()
            .filter(|&(_, &mine)| mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

/// Outcome of a marker toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    MarkChanged,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::MarkChanged => true,
        }
    }
}

/// Outcome of revealing one or more tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum RevealOutcome {
    #[default]
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when a chord reveals several tiles
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            // an explosion has priority
            (Exploded, _) => Exploded,
            (_, Exploded) => Exploded,
            // then a win
            (Won, _) => Won,
            (_, Won) => Won,
            // then a plain reveal
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            // and no-change only with both
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// The tiles one command changed, plus the merged outcome. Frontends redraw
/// exactly these coordinates instead of the whole board.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardDelta {
    pub outcome: RevealOutcome,
    pub changed: Vec<Coord2>,
}

impl BoardDelta {
    pub(crate) fn none() -> Self {
        Self::default()
    }

    pub(crate) fn merge(&mut self, other: Self) {
        self.outcome = self.outcome | other.outcome;
        self.changed.extend(other.changed);
    }

    pub fn has_update(&self) -> bool {
        self.outcome.has_update()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_order_by_area_then_mines() {
        let mut sizes = [
            BoardSize::EXPERT,
            BoardSize::BEGINNER,
            BoardSize::INTERMEDIATE,
        ];
        sizes.sort();
        assert_eq!(
            sizes,
            [
                BoardSize::BEGINNER,
                BoardSize::INTERMEDIATE,
                BoardSize::EXPERT,
            ]
        );

        // same area, more mines sorts later
        assert!(BoardSize::new(16, 16, 41) > BoardSize::INTERMEDIATE);
    }

    #[test]
    fn size_round_trips_through_display() {
        for size in [
            BoardSize::BEGINNER,
            BoardSize::INTERMEDIATE,
            BoardSize::EXPERT,
            BoardSize::new(77, 13, 256),
        ] {
            assert_eq!(size.to_string().parse(), Ok(size));
        }

        assert_eq!("30,16,99".parse(), Ok(BoardSize::EXPERT));
        assert_eq!(" 9 , 9 , 10 ".parse(), Ok(BoardSize::BEGINNER));
    }

    #[test]
    fn malformed_sizes_do_not_parse() {
        for input in ["", "9,9", "9,9,10,0", "9x9,10", "a,b,c", "300,9,10"] {
            assert!(input.parse::<BoardSize>().is_err(), "parsed {input:?}");
        }
    }

    #[test]
    fn describe_is_the_human_form() {
        assert_eq!(BoardSize::BEGINNER.describe(), "9x9, 10 mines");
        assert_eq!(BoardSize::EXPERT.describe(), "30x16, 99 mines");
    }

    #[test]
    fn layout_from_coords_counts_mines() {
        let layout = MineLayout::from_coords((9, 9), &[(0, 0), (8, 8)]).unwrap();
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_tiles(), 79);
        assert!(layout.contains_mine((0, 0)));
        assert!(!layout.contains_mine((4, 4)));
        assert_eq!(layout.iter_mines().collect::<Vec<_>>(), [(0, 0), (8, 8)]);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_coords((9, 9), &[(9, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn outcomes_merge_by_severity() {
        use RevealOutcome::*;
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(Won | Exploded, Exploded);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
        assert!(Won.has_update());
    }
}
