use hashbrown::HashSet;
use ndarray::Array2;
use rand::rngs::SmallRng;

use super::*;
use crate::rng::{self, RandomSource};

/// Uniform placement that never puts a mine in the 3x3 block around the first click.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator<R = SmallRng> {
    rng: R,
}

impl RandomMinefieldGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(rng::seeded(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(rng::from_entropy())
    }
}

impl<R: RandomSource> RandomMinefieldGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource> MinefieldGenerator for RandomMinefieldGenerator<R> {
    fn generate(&mut self, config: &GameConfig, first_click: Position) -> Result<MineLayout> {
        let size = config.size();
        if !first_click.is_within(size) {
            return Err(GameError::InvalidCoords {
                x: first_click.x.into(),
                y: first_click.y.into(),
            });
        }

        let excluded: HashSet<Position> = zone(first_click, size).collect();
        let candidates: Vec<Position> = positions(size)
            .filter(|pos| !excluded.contains(pos))
            .collect();

        let requested = usize::from(config.mines);
        if requested > candidates.len() {
            log::warn!(
                "Cannot keep {} clear, requested {} mines but only {} cells are eligible",
                first_click,
                requested,
                candidates.len()
            );
            return Err(GameError::TooManyMines {
                requested: config.mines,
                available: CellCount::try_from(candidates.len()).unwrap_or(CellCount::MAX),
            });
        }

        let mut mine_mask: Array2<bool> = Array2::default(Position::from(size).to_nd_index());
        for pos in rng::shuffled_prefix(&candidates, requested, &mut self.rng) {
            mine_mask[pos.to_nd_index()] = true;
        }

        log::debug!(
            "Placed {} mines on a {}x{} board, first click at {}",
            requested,
            size.0,
            size.1,
            first_click
        );
        Ok(MineLayout::from_mine_mask(mine_mask))
    }
}
