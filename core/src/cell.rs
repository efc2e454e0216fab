use serde::{Deserialize, Serialize};

use crate::CellStatus;

/// Per-location state owned by a [`Board`](crate::Board).
///
/// A cell is never clicked and flagged at the same time, and its mine bit and neighbor
/// count are fixed once the layout has been installed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    neighbor_mine_count: Option<u8>,
    is_clicked: bool,
    is_flagged: bool,
    is_end_revealed: bool,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// `None` until mines have been placed.
    pub const fn neighbor_mine_count(&self) -> Option<u8> {
        self.neighbor_mine_count
    }

    pub const fn is_clicked(&self) -> bool {
        self.is_clicked
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Set by the end-of-game reveal only, never during play.
    pub const fn is_end_revealed(&self) -> bool {
        self.is_end_revealed
    }

    pub const fn status(&self) -> CellStatus {
        match (self.is_clicked, self.is_flagged) {
            (true, _) if self.is_mine => CellStatus::Exploded,
            (true, _) => match self.neighbor_mine_count {
                Some(count) => CellStatus::Revealed(count),
                None => CellStatus::Revealed(0),
            },
            (false, true) => CellStatus::Flagged,
            (false, false) => CellStatus::Hidden,
        }
    }

    pub(crate) fn place_mine(&mut self) {
        self.is_mine = true;
    }

    pub(crate) fn set_neighbor_mine_count(&mut self, count: u8) {
        match self.neighbor_mine_count {
            None => self.neighbor_mine_count = Some(count),
            Some(existing) => {
                log::warn!(
                    "Neighbor count already set to {}, ignoring {}",
                    existing,
                    count
                );
            }
        }
    }

    /// Returns whether the cell went from unclicked to clicked.
    pub(crate) fn click(&mut self) -> bool {
        if self.is_clicked || self.is_flagged {
            return false;
        }
        self.is_clicked = true;
        true
    }

    /// Returns the new flag bit, or `None` when the cell is already clicked.
    pub(crate) fn toggle_flagged(&mut self) -> Option<bool> {
        if self.is_clicked {
            return None;
        }
        self.is_flagged = !self.is_flagged;
        Some(self.is_flagged)
    }

    /// Shows the mine hiding behind this cell, used on loss.
    pub(crate) fn reveal_mine(&mut self) {
        if self.is_mine {
            self.is_end_revealed = true;
        }
    }

    /// Shows a flag on this cell if it hides a mine, used on win.
    pub(crate) fn flag_mine(&mut self) {
        if self.is_mine && !self.is_clicked {
            self.is_flagged = true;
            self.is_end_revealed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cell_is_hidden_without_count() {
        let cell = Cell::default();

        assert_eq!(cell.status(), CellStatus::Hidden);
        assert_eq!(cell.neighbor_mine_count(), None);
        assert!(!cell.is_mine());
    }

    #[test]
    fn click_and_flag_exclude_each_other() {
        let mut flagged = Cell::default();
        assert_eq!(flagged.toggle_flagged(), Some(true));
        assert!(!flagged.click());
        assert_eq!(flagged.status(), CellStatus::Flagged);

        let mut clicked = Cell::default();
        clicked.set_neighbor_mine_count(3);
        assert!(clicked.click());
        assert!(!clicked.click());
        assert_eq!(clicked.toggle_flagged(), None);
        assert_eq!(clicked.status(), CellStatus::Revealed(3));
    }

    #[test]
    fn neighbor_count_is_set_once() {
        let mut cell = Cell::default();
        cell.set_neighbor_mine_count(2);
        cell.set_neighbor_mine_count(5);

        assert_eq!(cell.neighbor_mine_count(), Some(2));
    }

    #[test]
    fn clicked_mine_is_exploded() {
        let mut cell = Cell::default();
        cell.place_mine();
        cell.set_neighbor_mine_count(0);
        cell.click();

        assert_eq!(cell.status(), CellStatus::Exploded);
    }

    #[test]
    fn end_reveal_only_touches_mines() {
        let mut safe = Cell::default();
        safe.reveal_mine();
        safe.flag_mine();
        assert!(!safe.is_end_revealed());
        assert!(!safe.is_flagged());

        let mut mine = Cell::default();
        mine.place_mine();
        mine.flag_mine();
        assert!(mine.is_end_revealed());
        assert_eq!(mine.status(), CellStatus::Flagged);
    }
}
