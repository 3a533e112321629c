use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};
use smallvec::SmallVec;

use super::MinefieldGenerator;
use crate::types::{CellCount, Coord2, nd, neighbors, ring2};
use crate::{BoardSize, MineLayout};

/// Default bounds for the randomized safe-zone size.
pub const MIN_SAFE_ZONE: u8 = 1;
pub const MAX_SAFE_ZONE: u8 = 5;

/// Places mines uniformly at random while reserving a small randomized zone
/// around the first revealed tile, so the opening click is neither a mine nor
/// an isolated single number.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeZoneGenerator {
    seed: u64,
    start: Coord2,
    min_safe: u8,
    max_safe: u8,
}

impl SafeZoneGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self {
            seed,
            start,
            min_safe: MIN_SAFE_ZONE,
            max_safe: MAX_SAFE_ZONE,
        }
    }

    /// Overrides the safe-zone bounds. `min` must not exceed `max`.
    pub fn with_zone(mut self, min: u8, max: u8) -> Self {
        debug_assert!(min <= max);
        self.min_safe = min;
        self.max_safe = max;
        self
    }

    /// The start tile plus up to `k` tiles drawn without replacement from its
    /// 8-neighborhood, widening to the distance-two ring when that runs dry.
    /// `k` is capped so the mines still fit outside the zone.
    fn draw_zone(&self, rng: &mut SmallRng, size: &BoardSize) -> SmallVec<[Coord2; 8]> {
        let spare = size.safe_tiles().saturating_sub(1);
        let k = CellCount::from(rng.random_range(self.min_safe..=self.max_safe)).min(spare);

        let mut zone: SmallVec<[Coord2; 8]> = SmallVec::new();
        zone.push(self.start);

        let mut ring: SmallVec<[Coord2; 16]> = neighbors(self.start, size.dim()).collect();
        let mut widened = false;
        while (zone.len() as CellCount) < k + 1 {
            if ring.is_empty() {
                if widened {
                    break;
                }
                ring = ring2(self.start, size.dim()).collect();
                widened = true;
                continue;
            }
            let pick = ring.swap_remove(rng.random_range(0..ring.len()));
            zone.push(pick);
        }
        zone
    }
}

impl MinefieldGenerator for SafeZoneGenerator {
    fn generate(self, size: &BoardSize) -> MineLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let zone = self.draw_zone(&mut rng, size);

        let (width, height) = size.dim();
        let mut candidates: Vec<Coord2> = Vec::with_capacity(size.total_tiles().into());
        for y in 0..height {
            for x in 0..width {
                if !zone.contains(&(x, y)) {
                    candidates.push((x, y));
                }
            }
        }

        // each draw picks a uniformly random remaining candidate
        let mut mask: Array2<bool> = Array2::default(nd(size.dim()));
        let mut placed: CellCount = 0;
        while placed < size.mines {
            if candidates.is_empty() {
                log::warn!(
                    "Out of mine candidates, requested {} but only placed {}",
                    size.mines,
                    placed
                );
                break;
            }
            let pos = candidates.swap_remove(rng.random_range(0..candidates.len()));
            mask[nd(pos)] = true;
            placed += 1;
        }

        // double check mine count
        let layout = MineLayout::from_mask(mask);
        if layout.mine_count() != size.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                size.mines
            );
        }
        layout
    }
}
