use core::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Snapshot;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InferenceKind {
    Safe,
    Mine,
}

/// A deduction that holds for every layout consistent with the snapshot it came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Inference {
    pub kind: InferenceKind,
    pub location: Position,
}

impl Inference {
    pub const fn safe(location: Position) -> Self {
        Self {
            kind: InferenceKind::Safe,
            location,
        }
    }

    pub const fn mine(location: Position) -> Self {
        Self {
            kind: InferenceKind::Mine,
            location,
        }
    }

    /// Replays the deduction on `board`, clicking safe cells and flagging mines.
    pub fn apply<G: MinefieldGenerator>(&self, board: &mut Board<G>) -> Result<()> {
        match self.kind {
            InferenceKind::Safe => board.click(self.location).map(|_| ()),
            InferenceKind::Mine => board.toggle_flag(self.location).map(|_| ()),
        }
    }
}

impl fmt::Display for Inference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self.kind {
            InferenceKind::Safe => "safe",
            InferenceKind::Mine => "a mine",
        };
        write!(f, "{} is {}", self.location, description)
    }
}

type Deductions = SmallVec<[Inference; 8]>;

/// First-order deductions around a single numbered cell.
fn infer_at(snapshot: &Snapshot, pos: Position) -> Deductions {
    let Some(CellStatus::Revealed(count)) = snapshot.get(pos) else {
        return Deductions::new();
    };
    if count == 0 {
        return Deductions::new();
    }

    let mut known_mines = 0u8;
    let mut unknowns: SmallVec<[Position; 8]> = SmallVec::new();
    for (neighbor, status) in snapshot.neighbors(pos) {
        if status.is_mine() {
            known_mines += 1;
        } else if status.is_unknown() {
            unknowns.push(neighbor);
        }
    }

    if unknowns.is_empty() {
        return Deductions::new();
    }

    let remaining = i16::from(count) - i16::from(known_mines);
    let make: fn(Position) -> Inference = if remaining == unknowns.len() as i16 {
        Inference::mine
    } else if remaining == 0 {
        Inference::safe
    } else {
        return Deductions::new();
    };

    unknowns.into_iter().map(make).collect()
}

/// Lazily yields every first-order deduction in column-major scan order, skipping
/// duplicates. Each call starts a fresh pass over `snapshot`.
pub fn infer_iter(snapshot: &Snapshot) -> impl Iterator<Item = Inference> + '_ {
    let mut seen = HashSet::new();
    positions(snapshot.size())
        .flat_map(move |pos| infer_at(snapshot, pos))
        .filter(move |inference| seen.insert(*inference))
}

pub fn infer(snapshot: &Snapshot) -> Vec<Inference> {
    infer_iter(snapshot).collect()
}
