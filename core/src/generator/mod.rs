use crate::{BoardSize, MineLayout};

pub use safe_zone::*;

mod safe_zone;

/// Strategy seam for mine placement. Generators consume themselves, one per
/// board.
pub trait MinefieldGenerator {
    fn generate(self, size: &BoardSize) -> MineLayout;
}
