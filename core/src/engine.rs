use std::collections::VecDeque;

use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::types::{CellCount, Coord2, nd, neighbors};
use crate::{
    BoardDelta, BoardSize, FlagOutcome, Marker, MineLayout, MinefieldGenerator, RevealOutcome,
    SafeZoneGenerator, Tile, TileKind, validate,
};

/// Lifecycle of one game. `NotStarted` also means the minefield has not been
/// generated yet.
///
/// Valid transitions:
/// - NotStarted -> InProgress (first successful reveal)
/// - NotStarted -> Victory | GameOver (the first reveal settles the board)
/// - InProgress -> Victory | GameOver
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameState {
    #[default]
    NotStarted,
    InProgress,
    Victory,
    GameOver,
}

impl GameState {
    /// Indicates the game has not started yet
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Victory | Self::GameOver)
    }
}

/// The board engine for a single game, from construction to a terminal state.
///
/// Commands return the coordinates they changed so a frontend can redraw
/// incrementally. Commands arriving out of turn, on shown tiles, on flagged
/// tiles, or after the game ended, are no-ops rather than errors; a racy
/// caller cannot corrupt the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minesweeper {
    size: BoardSize,
    grid: Array2<Tile>,
    revealed: CellCount,
    flagged: CellCount,
    state: GameState,
    time_elapsed: u32,
    seed: u64,
    generated: bool,
    triggered_mine: Option<Coord2>,
}

impl Minesweeper {
    /// Validated construction. The minefield is not generated here but on the
    /// first reveal, so that tile is guaranteed safe.
    pub fn new(size: BoardSize) -> Result<Self> {
        Self::with_seed(size, rand::random())
    }

    /// Like [`new`](Self::new) with a pinned generator seed.
    pub fn with_seed(size: BoardSize, seed: u64) -> Result<Self> {
        validate::board(&size)?;
        Ok(Self {
            size,
            grid: Array2::default(nd(size.dim())),
            revealed: 0,
            flagged: 0,
            state: GameState::default(),
            time_elapsed: 0,
            seed,
            generated: false,
            triggered_mine: None,
        })
    }

    /// Builds a game over a fixed, pre-generated layout.
    pub fn from_layout(layout: &MineLayout) -> Result<Self> {
        let mut game = Self::with_seed(layout.board_size(), 0)?;
        for pos in layout.iter_mines() {
            game.grid[nd(pos)].kind = TileKind::Mine;
        }
        game.generated = true;
        Ok(game)
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn dimensions(&self) -> Coord2 {
        self.size.dim()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whether commands still do anything.
    pub fn can_interact(&self) -> bool {
        !self.state.is_final()
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.grid[nd(coords)]
    }

    /// Display counter for the frontend: mines minus flags placed. Goes
    /// negative when the player over-flags.
    pub fn mines_remaining(&self) -> isize {
        (self.size.mines as isize) - (self.flagged as isize)
    }

    pub fn time_elapsed(&self) -> u32 {
        self.time_elapsed
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed
    }

    /// The mine that ended the game, when it ended in a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Advances the elapsed-time counter by one unit. The engine owns no
    /// timer; the frontend drives this from its own clock and may pause it.
    pub fn tick(&mut self) {
        if !self.state.is_final() {
            self.time_elapsed = self.time_elapsed.saturating_add(1);
        }
    }

    /// Cycles the marker on a hidden tile through flag and question mark.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.cycle_marker(coords, true)
    }

    /// Marker cycle without the question step, for frontends that disable it.
    pub fn toggle_flag_simple(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.cycle_marker(coords, false)
    }

    fn cycle_marker(&mut self, coords: Coord2, use_question: bool) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_final() {
            return Ok(FlagOutcome::NoChange);
        }

        let tile = &mut self.grid[nd(coords)];
        if tile.shown {
            return Ok(FlagOutcome::NoChange);
        }

        // only the None <-> Flag edges move the mine counter
        Ok(match tile.marker {
            Marker::None => {
                tile.marker = Marker::Flag;
                self.flagged += 1;
                FlagOutcome::MarkChanged
            }
            Marker::Flag => {
                tile.marker = if use_question {
                    Marker::Question
                } else {
                    Marker::None
                };
                self.flagged -= 1;
                FlagOutcome::MarkChanged
            }
            Marker::Question => {
                tile.marker = Marker::None;
                FlagOutcome::MarkChanged
            }
        })
    }

    /// Reveals a hidden, unflagged tile. The first reveal of a game generates
    /// the minefield with a safe zone around `coords`.
    pub fn reveal(&mut self, coords: Coord2) -> Result<BoardDelta> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_final() {
            return Ok(BoardDelta::none());
        }

        let tile = self.grid[nd(coords)];
        if tile.shown || tile.is_flagged() {
            return Ok(BoardDelta::none());
        }

        self.ensure_minefield(coords);
        Ok(self.reveal_tile(coords))
    }

    /// Reveals every unflagged hidden neighbor of a shown number tile whose
    /// flagged-neighbor count matches its number. Anything else is a no-op.
    pub fn chord(&mut self, coords: Coord2) -> Result<BoardDelta> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_final() {
            return Ok(BoardDelta::none());
        }

        let tile = self.grid[nd(coords)];
        let (TileKind::Number(count), true) = (tile.kind, tile.shown) else {
            return Ok(BoardDelta::none());
        };
        if self.count_flagged_neighbors(coords) != count {
            return Ok(BoardDelta::none());
        }

        let mut delta = BoardDelta::none();
        for pos in neighbors(coords, self.size.dim()) {
            let neighbor = self.grid[nd(pos)];
            if neighbor.shown || neighbor.is_flagged() {
                continue;
            }
            delta.merge(self.reveal_tile(pos));
        }
        Ok(delta)
    }

    fn ensure_minefield(&mut self, start: Coord2) {
        if self.generated {
            return;
        }
        let layout = SafeZoneGenerator::new(self.seed, start).generate(&self.size);
        for pos in layout.iter_mines() {
            self.grid[nd(pos)].kind = TileKind::Mine;
        }
        self.generated = true;
    }

    /// Reveals one tile known to be hidden and unflagged, flood-filling from
    /// empty tiles and settling any end-of-game state.
    fn reveal_tile(&mut self, coords: Coord2) -> BoardDelta {
        if self.state.is_final() {
            return BoardDelta::none();
        }

        let tile = self.grid[nd(coords)];
        if tile.shown || tile.is_flagged() {
            return BoardDelta::none();
        }

        if tile.kind.is_mine() {
            self.triggered_mine = Some(coords);
            let changed = self.end_game(false);
            return BoardDelta {
                outcome: RevealOutcome::Exploded,
                changed,
            };
        }

        let mut changed = self.flood_reveal(coords);
        if self.revealed == self.size.safe_tiles() {
            changed.extend(self.end_game(true));
            BoardDelta {
                outcome: RevealOutcome::Won,
                changed,
            }
        } else {
            self.mark_started();
            BoardDelta {
                outcome: RevealOutcome::Revealed,
                changed,
            }
        }
    }

    /// Reveals `start` and, when it has no adjacent mines, the whole
    /// connected empty region plus its number fringe.
    fn flood_reveal(&mut self, start: Coord2) -> Vec<Coord2> {
        let bounds = self.size.dim();
        let mut changed = Vec::new();

        let count = self.adjacent_mines(start);
        self.grid[nd(start)] = Tile::shown(TileKind::from_adjacent(count));
        self.revealed += 1;
        changed.push(start);
        log::debug!("Revealed {:?}, adjacent mines: {}", start, count);

        if count > 0 {
            return changed;
        }

        // explicit worklist, a 100x100 board can hold one huge empty region
        let mut visited: HashSet<Coord2> = HashSet::new();
        visited.insert(start);
        let mut to_visit: VecDeque<Coord2> = neighbors(start, bounds).collect();

        while let Some(pos) = to_visit.pop_front() {
            if !visited.insert(pos) {
                continue;
            }

            // skip flagged and already shown tiles
            let tile = self.grid[nd(pos)];
            if tile.shown || tile.is_flagged() {
                continue;
            }
            debug_assert!(!tile.kind.is_mine());

            let pos_count = self.adjacent_mines(pos);
            self.grid[nd(pos)] = Tile::shown(TileKind::from_adjacent(pos_count));
            self.revealed += 1;
            changed.push(pos);
            log::trace!("Flood revealed {:?}, adjacent mines: {}", pos, pos_count);

            // a zero tile pulls its own neighbors into the worklist
            if pos_count == 0 {
                to_visit.extend(neighbors(pos, bounds).filter(|pos| !visited.contains(pos)));
            }
        }
        changed
    }

    /// Settles the board on game end, returning the tiles it touched. A win
    /// flags every remaining mine; a loss shows every mine.
    fn end_game(&mut self, won: bool) -> Vec<Coord2> {
        self.state = if won {
            GameState::Victory
        } else {
            GameState::GameOver
        };

        let mut changed = Vec::new();
        let (width, height) = self.size.dim();
        for y in 0..height {
            for x in 0..width {
                let pos = (x, y);
                let tile = self.grid[nd(pos)];
                if !tile.kind.is_mine() || tile.shown {
                    continue;
                }
                if won {
                    if !tile.is_flagged() {
                        self.grid[nd(pos)].marker = Marker::Flag;
                        self.flagged += 1;
                        changed.push(pos);
                    }
                } else {
                    self.grid[nd(pos)] = Tile::shown(TileKind::Mine);
                    changed.push(pos);
                }
            }
        }
        changed
    }

    fn mark_started(&mut self) {
        if self.state.is_initial() {
            self.state = GameState::InProgress;
        }
    }

    fn adjacent_mines(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size.dim())
            .filter(|&pos| self.grid[nd(pos)].kind.is_mine())
            .count()
            .try_into()
            .unwrap()
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size.dim())
            .filter(|&pos| self.grid[nd(pos)].is_flagged())
            .count()
            .try_into()
            .unwrap()
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.width && coords.1 < self.size.height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}
