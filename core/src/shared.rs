use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::types::Coord2;
use crate::{BoardDelta, BoardSize, FlagOutcome, GameState, Minesweeper, Tile};

/// Clonable, thread-safe handle around one engine.
///
/// For frontends that run flood fill or generation on a worker thread while
/// the input thread keeps flagging: every call takes the single per-game
/// lock, so the two cannot interleave inside a mutation. Clones share the
/// same game.
#[derive(Clone, Debug)]
pub struct SharedGame {
    inner: Arc<Mutex<Minesweeper>>,
}

impl SharedGame {
    pub fn new(size: BoardSize) -> Result<Self> {
        Minesweeper::new(size).map(Self::from)
    }

    pub fn with_seed(size: BoardSize, seed: u64) -> Result<Self> {
        Minesweeper::with_seed(size, seed).map(Self::from)
    }

    pub fn reveal(&self, coords: Coord2) -> Result<BoardDelta> {
        self.inner.lock().unwrap().reveal(coords)
    }

    pub fn chord(&self, coords: Coord2) -> Result<BoardDelta> {
        self.inner.lock().unwrap().chord(coords)
    }

    pub fn toggle_flag(&self, coords: Coord2) -> Result<FlagOutcome> {
        self.inner.lock().unwrap().toggle_flag(coords)
    }

    pub fn toggle_flag_simple(&self, coords: Coord2) -> Result<FlagOutcome> {
        self.inner.lock().unwrap().toggle_flag_simple(coords)
    }

    pub fn tick(&self) {
        self.inner.lock().unwrap().tick();
    }

    pub fn state(&self) -> GameState {
        self.inner.lock().unwrap().state()
    }

    pub fn can_interact(&self) -> bool {
        self.inner.lock().unwrap().can_interact()
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.inner.lock().unwrap().tile_at(coords)
    }

    pub fn size(&self) -> BoardSize {
        self.inner.lock().unwrap().size()
    }

    pub fn mines_remaining(&self) -> isize {
        self.inner.lock().unwrap().mines_remaining()
    }

    pub fn time_elapsed(&self) -> u32 {
        self.inner.lock().unwrap().time_elapsed()
    }

    /// Full copy of the engine, for whole-board redraws.
    pub fn snapshot(&self) -> Minesweeper {
        self.inner.lock().unwrap().clone()
    }
}

impl From<Minesweeper> for SharedGame {
    fn from(game: Minesweeper) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_share_one_game() {
        let game = SharedGame::with_seed(BoardSize::BEGINNER, 3).unwrap();
        let other = game.clone();

        game.toggle_flag((0, 0)).unwrap();
        assert!(other.tile_at((0, 0)).is_flagged());
        assert_eq!(other.mines_remaining(), 9);
    }

    #[test]
    fn reveal_on_a_worker_thread_lands_in_the_shared_state() {
        let game = SharedGame::with_seed(BoardSize::BEGINNER, 3).unwrap();
        let worker = game.clone();

        thread::spawn(move || worker.reveal((4, 4)).unwrap())
            .join()
            .unwrap();

        assert!(game.tile_at((4, 4)).shown);
        assert!(!game.state().is_initial());
    }
}
