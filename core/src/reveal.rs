//! Cascading reveal of zero-count regions.

use std::collections::VecDeque;

use hashbrown::HashSet;
use ndarray::Array2;

use crate::*;

pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (x, y) = grid.dim();
    (
        Coord::try_from(x).unwrap_or(Coord::MAX),
        Coord::try_from(y).unwrap_or(Coord::MAX),
    )
}

fn can_enter(cell: &Cell) -> bool {
    !cell.is_clicked() && !cell.is_flagged() && !cell.is_mine()
}

/// Clicks every cell reachable from `start` through zero-count cells, plus the numbered
/// cells bordering that region.
///
/// `start` must already be clicked and have no neighboring mines. Returns the newly
/// clicked positions in visit order. Cells are marked visited when queued, so each one is
/// clicked at most once even on wide open boards.
pub(crate) fn flood_fill(cells: &mut Array2<Cell>, start: Position) -> Vec<Position> {
    let bounds = grid_size(cells);
    let mut revealed = Vec::new();

    if cells[start.to_nd_index()].neighbor_mine_count() != Some(0) {
        log::trace!("Flood fill from {} skipped, not a zero cell", start);
        return revealed;
    }

    let mut visited = HashSet::new();
    visited.insert(start);
    let mut to_visit: VecDeque<Position> = NeighborIter::new(start, bounds)
        .filter(|&pos| can_enter(&cells[pos.to_nd_index()]) && visited.insert(pos))
        .collect();

    while let Some(pos) = to_visit.pop_front() {
        let cell = &mut cells[pos.to_nd_index()];
        if !cell.click() {
            continue;
        }
        revealed.push(pos);

        if cell.neighbor_mine_count() == Some(0) {
            for neighbor in NeighborIter::new(pos, bounds) {
                if can_enter(&cells[neighbor.to_nd_index()]) && visited.insert(neighbor) {
                    to_visit.push_back(neighbor);
                }
            }
        }
    }

    log::debug!("Flood fill from {} revealed {} cells", start, revealed.len());
    revealed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: Coord2, mines: &[Position]) -> Array2<Cell> {
        let layout = MineLayout::from_mine_coords(size, mines).unwrap();
        let mut cells: Array2<Cell> = Array2::default(Position::from(size).to_nd_index());
        for pos in positions(size) {
            let cell = &mut cells[pos.to_nd_index()];
            if layout.contains_mine(pos) {
                cell.place_mine();
            }
            cell.set_neighbor_mine_count(layout.adjacent_mine_count(pos));
        }
        cells
    }

    fn clicked(cells: &Array2<Cell>) -> Vec<Position> {
        let mut out: Vec<_> = positions(grid_size(cells))
            .filter(|&pos| cells[pos.to_nd_index()].is_clicked())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn opens_zero_region_and_numbered_border() {
        // mine in the far corner, everything else connects through zeros
        let mut cells = grid((3, 3), &[Position::new(2, 2)]);
        let start = Position::new(0, 0);
        cells[start.to_nd_index()].click();

        let revealed = flood_fill(&mut cells, start);

        assert_eq!(revealed.len(), 7);
        assert!(!cells[[2, 2]].is_clicked());
        assert_eq!(cells[[1, 1]].status(), CellStatus::Revealed(1));
    }

    #[test]
    fn stops_at_numbered_cells() {
        // a wall of mines at x = 2 splits the 5x3 board
        let mines = [
            Position::new(2, 0),
            Position::new(2, 1),
            Position::new(2, 2),
        ];
        let mut cells = grid((5, 3), &mines);
        let start = Position::new(0, 1);
        cells[start.to_nd_index()].click();

        flood_fill(&mut cells, start);

        let expected: Vec<_> = (0..2)
            .flat_map(|x| (0..3).map(move |y| Position::new(x, y)))
            .collect();
        assert_eq!(clicked(&cells), expected);
    }

    #[test]
    fn leaves_flags_alone() {
        let mut cells = grid((4, 1), &[Position::new(3, 0)]);
        cells[[1, 0]].toggle_flagged();
        let start = Position::new(0, 0);
        cells[start.to_nd_index()].click();

        let revealed = flood_fill(&mut cells, start);

        assert!(revealed.is_empty());
        assert!(cells[[1, 0]].is_flagged());
        assert!(!cells[[2, 0]].is_clicked());
    }

    #[test]
    fn visits_each_cell_once_on_open_board() {
        let mut cells = grid((200, 200), &[Position::new(199, 199)]);
        let start = Position::new(0, 0);
        cells[start.to_nd_index()].click();

        let revealed = flood_fill(&mut cells, start);

        let unique: HashSet<_> = revealed.iter().copied().collect();
        assert_eq!(unique.len(), revealed.len());
        assert_eq!(revealed.len(), 200 * 200 - 2);
    }

    #[test]
    fn skips_numbered_start() {
        let mut cells = grid((3, 1), &[Position::new(0, 0)]);
        let start = Position::new(1, 0);
        cells[start.to_nd_index()].click();

        assert!(flood_fill(&mut cells, start).is_empty());
    }
}
