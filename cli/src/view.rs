use std::fmt;

use sweeper_core::{Board, CellStatus, Position, Snapshot};

/// Text rendering of a board with coordinate rulers, one row per line.
///
/// Hidden mines are drawn as `M` once the game is lost, or always with `show_mines`.
pub struct BoardView<'a, G> {
    board: &'a Board<G>,
    show_mines: bool,
}

impl<'a, G> BoardView<'a, G> {
    pub fn new(board: &'a Board<G>, show_mines: bool) -> Self {
        Self { board, show_mines }
    }

    fn glyph(&self, snapshot: &Snapshot, pos: Position) -> char {
        let status = snapshot.get(pos).unwrap_or_default();
        let exposed = self
            .board
            .cell(pos)
            .is_ok_and(|cell| cell.is_mine() && (self.show_mines || cell.is_end_revealed()));
        if status == CellStatus::Hidden && exposed {
            'M'
        } else {
            status.to_char()
        }
    }
}

impl<G> fmt::Display for BoardView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.board.snapshot();
        let (width, height) = snapshot.size();

        write!(f, "    ")?;
        for x in 0..width {
            write!(f, "{}", x % 10)?;
        }
        for y in 0..height {
            writeln!(f)?;
            write!(f, "{:>3} ", y)?;
            for x in 0..width {
                write!(f, "{}", self.glyph(&snapshot, Position::new(x, y)))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{FixedMinefieldGenerator, MineLayout};

    fn board() -> Board<FixedMinefieldGenerator> {
        let layout = MineLayout::from_mine_coords((4, 4), &[Position::new(3, 3)]).unwrap();
        Board::from_layout(layout).unwrap()
    }

    #[test]
    fn draws_rulers_and_cells() {
        let mut board = board();
        board.toggle_flag(Position::new(0, 0)).unwrap();

        let text = BoardView::new(&board, false).to_string();

        assert_eq!(text, "    0123\n  0 F???\n  1 ????\n  2 ????\n  3 ????");
    }

    fn corridor() -> Board<FixedMinefieldGenerator> {
        let mines = [Position::new(0, 1), Position::new(4, 0)];
        let layout = MineLayout::from_mine_coords((5, 2), &mines).unwrap();
        let mut board = Board::from_layout(layout).unwrap();
        board.click(Position::new(2, 0)).unwrap();
        board
    }

    #[test]
    fn hidden_mines_stay_hidden_during_play() {
        let board = corridor();

        let text = BoardView::new(&board, false).to_string();

        assert_eq!(text, "    01234\n  0 ?1 1?\n  1 ?1 1?");
    }

    #[test]
    fn show_mines_exposes_hidden_mines() {
        let board = corridor();

        let text = BoardView::new(&board, true).to_string();

        assert_eq!(text, "    01234\n  0 ?1 1M\n  1 M1 1?");
    }

    #[test]
    fn lost_board_exposes_mines() {
        let mut board = corridor();
        board.click(Position::new(0, 1)).unwrap();

        let text = BoardView::new(&board, false).to_string();

        assert_eq!(text, "    01234\n  0 ?1 1M\n  1 *1 1?");
    }
}
