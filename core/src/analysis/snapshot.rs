use core::fmt;
use core::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::reveal::grid_size;
use crate::*;

/// Player-visible state of one cell, as written in the status-char alphabet.
///
/// Serialized as its status char, so only the alphabet below can be read back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum CellStatus {
    /// `*`, a clicked mine.
    Exploded,
    /// ` ` for zero, `1` to `8` otherwise.
    Revealed(u8),
    /// `?`
    Hidden,
    /// `F`
    Flagged,
}

impl CellStatus {
    pub const fn to_char(self) -> char {
        match self {
            Self::Exploded => '*',
            Self::Revealed(0) => ' ',
            Self::Revealed(count @ 1..=8) => (b'0' + count) as char,
            // counts above 8 cannot occur on a board
            Self::Revealed(_) => '?',
            Self::Hidden => '?',
            Self::Flagged => 'F',
        }
    }

    /// Known mine, either flagged or exploded.
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Exploded | Self::Flagged)
    }

    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Hidden
    }
}

impl TryFrom<char> for CellStatus {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            '*' => Ok(Self::Exploded),
            ' ' => Ok(Self::Revealed(0)),
            '1'..='8' => Ok(Self::Revealed(c as u8 - b'0')),
            '?' => Ok(Self::Hidden),
            'F' => Ok(Self::Flagged),
            other => Err(GameError::InvalidStatusChar(other)),
        }
    }
}

impl From<CellStatus> for char {
    fn from(status: CellStatus) -> Self {
        status.to_char()
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Read-only copy of a board, detached from the live cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    cells: Array2<CellStatus>,
}

impl Snapshot {
    pub fn from_board<G>(board: &Board<G>) -> Self {
        let (width, height) = board.config().size();
        let shape = [usize::from(width), usize::from(height)];
        let cells = Array2::from_shape_fn(shape, |(x, y)| {
            board.cell_at(Position::new(x as Coord, y as Coord)).status()
        });
        Self { cells }
    }

    /// Parses one string per row, top row first.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let parsed: Vec<Vec<CellStatus>> = rows
            .iter()
            .map(|row| row.as_ref().chars().map(CellStatus::try_from).collect())
            .collect::<Result<_>>()?;

        let height = parsed.len();
        let width = parsed.first().map_or(0, Vec::len);
        if width == 0
            || width > usize::from(Coord::MAX)
            || height > usize::from(Coord::MAX)
            || parsed.iter().any(|row| row.len() != width)
        {
            return Err(GameError::InvalidBoardShape);
        }

        let cells = Array2::from_shape_fn([width, height], |(x, y)| parsed[y][x]);
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn get(&self, pos: Position) -> Option<CellStatus> {
        self.cells.get(pos.to_nd_index()).copied()
    }

    pub fn cells(&self) -> &Array2<CellStatus> {
        &self.cells
    }

    pub(crate) fn neighbors(
        &self,
        pos: Position,
    ) -> impl Iterator<Item = (Position, CellStatus)> + '_ {
        NeighborIter::new(pos, self.size())
            .map(|neighbor| (neighbor, self.cells[neighbor.to_nd_index()]))
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        for y in 0..height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..width {
                write!(f, "{}", self.cells[Position::new(x, y).to_nd_index()])?;
            }
        }
        Ok(())
    }
}

impl FromStr for Snapshot {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s.lines().collect();
        Self::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_chars_round_trip() {
        for c in ['*', ' ', '1', '5', '8', '?', 'F'] {
            assert_eq!(CellStatus::try_from(c).unwrap().to_char(), c);
        }
        assert_eq!(CellStatus::try_from('9'), Err(GameError::InvalidStatusChar('9')));
        assert_eq!(CellStatus::try_from('0'), Err(GameError::InvalidStatusChar('0')));
    }

    #[test]
    fn rows_are_indexed_by_x_then_y() {
        let snapshot = Snapshot::from_rows(&["1?", "F "]).unwrap();

        assert_eq!(snapshot.size(), (2, 2));
        assert_eq!(snapshot.get(Position::new(0, 0)), Some(CellStatus::Revealed(1)));
        assert_eq!(snapshot.get(Position::new(1, 0)), Some(CellStatus::Hidden));
        assert_eq!(snapshot.get(Position::new(0, 1)), Some(CellStatus::Flagged));
        assert_eq!(snapshot.get(Position::new(1, 1)), Some(CellStatus::Revealed(0)));
        assert_eq!(snapshot.get(Position::new(2, 0)), None);
    }

    #[test]
    fn rejects_ragged_or_empty_rows() {
        assert_eq!(
            Snapshot::from_rows(&["12", "1"]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            Snapshot::from_rows::<&str>(&[]),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn serializes_through_status_chars() {
        let snapshot = Snapshot::from_rows(&["*1?", "F 8"]).unwrap();

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, snapshot);
        assert_eq!(serde_json::to_string(&CellStatus::Revealed(3)).unwrap(), "\"3\"");
    }

    #[test]
    fn rejects_counts_outside_the_alphabet() {
        assert!(serde_json::from_str::<CellStatus>("\"9\"").is_err());
        assert!(serde_json::from_str::<CellStatus>(r#"{"Revealed":250}"#).is_err());

        let forged = r#"{"cells":{"v":1,"dim":[1,1],"data":[{"Revealed":250}]}}"#;
        assert!(serde_json::from_str::<Snapshot>(forged).is_err());
        let forged = r#"{"cells":{"v":1,"dim":[1,1],"data":["9"]}}"#;
        assert!(serde_json::from_str::<Snapshot>(forged).is_err());
    }

    #[test]
    fn display_never_overflows() {
        assert_eq!(CellStatus::Revealed(9).to_char(), '?');
        assert_eq!(CellStatus::Revealed(250).to_char(), '?');
    }

    #[test]
    fn display_matches_input() {
        let text = "?1 \nF2 \n?1 ";
        let snapshot: Snapshot = text.parse().unwrap();

        assert_eq!(snapshot.to_string(), text);
    }

    #[test]
    fn from_board_tracks_flags_and_clicks() {
        let layout = MineLayout::from_mine_coords((4, 4), &[Position::new(3, 3)]).unwrap();
        let config = GameConfig::new(4, 4, 1).unwrap();
        let mut board =
            Board::with_generator(config, FixedMinefieldGenerator::new(layout)).unwrap();

        board.toggle_flag(Position::new(3, 3)).unwrap();
        board.click(Position::new(3, 0)).unwrap();

        let snapshot = board.snapshot();
        assert_eq!(snapshot.get(Position::new(3, 3)), Some(CellStatus::Flagged));
        assert_eq!(snapshot.get(Position::new(2, 2)), Some(CellStatus::Revealed(1)));
        assert_eq!(snapshot.get(Position::new(0, 0)), Some(CellStatus::Revealed(0)));
    }
}
