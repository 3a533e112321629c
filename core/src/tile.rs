use serde::{Deserialize, Serialize};

/// Resolved content of a tile.
///
/// Every tile starts out `Unset`. The generator turns some into `Mine`; the
/// rest resolve to `Empty` or `Number` when reveal logic first touches them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TileKind {
    #[default]
    Unset,
    Empty,
    Mine,
    /// 1 to 8 adjacent mines.
    Number(u8),
}

impl TileKind {
    /// Largest value `Number` can carry, the size of the 8-neighborhood.
    pub const MAX_NUMBER: u8 = 8;

    pub(crate) fn from_adjacent(count: u8) -> Self {
        debug_assert!(count <= Self::MAX_NUMBER);
        match count {
            0 => Self::Empty,
            n => Self::Number(n),
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// Player-placed marker on a hidden tile. Markers are mutually exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Marker {
    #[default]
    None,
    Flag,
    Question,
}

/// One cell of the board. `shown` is permanent once set, and a shown tile
/// carries no marker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Tile {
    pub kind: TileKind,
    pub shown: bool,
    pub marker: Marker,
}

impl Tile {
    pub const fn is_hidden(self) -> bool {
        !self.shown
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.marker, Marker::Flag)
    }

    /// The tile as it looks once revealed.
    pub(crate) const fn shown(kind: TileKind) -> Self {
        Self {
            kind,
            shown: true,
            marker: Marker::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_start_unset_and_hidden() {
        let tile = Tile::default();
        assert_eq!(tile.kind, TileKind::Unset);
        assert!(tile.is_hidden());
        assert!(!tile.is_flagged());
    }

    #[test]
    fn adjacent_counts_resolve_kinds() {
        assert_eq!(TileKind::from_adjacent(0), TileKind::Empty);
        assert_eq!(TileKind::from_adjacent(3), TileKind::Number(3));
        assert_eq!(TileKind::from_adjacent(8), TileKind::Number(8));
    }

    #[test]
    fn shown_tiles_drop_their_marker() {
        let tile = Tile {
            marker: Marker::Question,
            ..Tile::default()
        };
        assert!(tile.is_hidden());
        let shown = Tile::shown(TileKind::Empty);
        assert_eq!(shown.marker, Marker::None);
        assert!(shown.shown);
    }
}
