use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// A location on the board, `x` grows to the right and `y` grows downwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Index into an `Array2` laid out as `[x, y]`.
    pub const fn to_nd_index(self) -> [usize; 2] {
        [self.x as usize, self.y as usize]
    }

    pub const fn is_within(self, bounds: Coord2) -> bool {
        self.x < bounds.0 && self.y < bounds.1
    }
}

impl From<Coord2> for Position {
    fn from((x, y): Coord2) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for Coord2 {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

impl TryFrom<(i64, i64)> for Position {
    type Error = GameError;

    fn try_from((x, y): (i64, i64)) -> Result<Self> {
        match (Coord::try_from(x), Coord::try_from(y)) {
            (Ok(x), Ok(y)) => Ok(Self::new(x, y)),
            _ => Err(GameError::InvalidCoords { x, y }),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Position, delta: (i8, i8), bounds: Coord2) -> Option<Position> {
    let next_x = pos.x.checked_add_signed(delta.0)?;
    let next_y = pos.y.checked_add_signed(delta.1)?;
    let next = Position::new(next_x, next_y);
    next.is_within(bounds).then_some(next)
}

/// Edge-clamped 8-neighborhood of a position.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Position,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Position, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

/// The 3x3 block centered on `center`, clipped to `bounds`, centre included.
pub fn zone(center: Position, bounds: Coord2) -> impl Iterator<Item = Position> {
    center
        .is_within(bounds)
        .then_some(center)
        .into_iter()
        .chain(NeighborIter::new(center, bounds))
}

/// Every position of a `bounds`-sized board in column-major order.
pub fn positions(bounds: Coord2) -> impl Iterator<Item = Position> {
    let (width, height) = bounds;
    (0..width).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
}
