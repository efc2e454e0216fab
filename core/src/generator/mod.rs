use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Decides where the mines go once the first click is known.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: &GameConfig, first_click: Position) -> Result<MineLayout>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Self {
            mine_mask,
            mine_count: CellCount::try_from(mine_count).unwrap_or(CellCount::MAX),
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Position]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(Position::from(size).to_nd_index());

        for &pos in mine_coords {
            if !pos.is_within(size) {
                return Err(GameError::InvalidCoords {
                    x: pos.x.into(),
                    y: pos.y.into(),
                });
            }
            mine_mask[pos.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (
            Coord::try_from(x).unwrap_or(Coord::MAX),
            Coord::try_from(y).unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, pos: Position) -> bool {
        self[pos]
    }

    pub fn adjacent_mine_count(&self, pos: Position) -> u8 {
        let count = NeighborIter::new(pos, self.size())
            .filter(|&neighbor| self[neighbor])
            .count();
        // at most 8 neighbors
        count as u8
    }

    pub fn mines(&self) -> impl Iterator<Item = Position> + '_ {
        positions(self.size()).filter(|&pos| self[pos])
    }
}

impl Index<Position> for MineLayout {
    type Output = bool;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.mine_mask[pos.to_nd_index()]
    }
}

/// Replays a predetermined layout regardless of the first click.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    layout: MineLayout,
}

impl FixedMinefieldGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig, first_click: Position) -> Result<MineLayout> {
        if self.layout.size() != config.size() {
            return Err(GameError::InvalidBoardShape);
        }
        if self.layout.contains_mine(first_click) {
            log::warn!("Fixed layout puts a mine under the first click {}", first_click);
        }
        Ok(self.layout.clone())
    }
}
