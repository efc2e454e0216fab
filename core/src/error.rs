use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: Coord, height: Coord },
    #[error("Board needs at least one mine")]
    NoMines,
    #[error("Too many mines, requested {requested} but only {available} cells can hold one")]
    TooManyMines {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Invalid coordinates ({x}, {y})")]
    InvalidCoords { x: i64, y: i64 },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unrecognized cell status character {0:?}")]
    InvalidStatusChar(char),
    #[error("Out of flags")]
    OutOfFlags,
}

/// Coarse classification of a [`GameError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The board cannot be built as requested. Fatal at construction.
    Configuration,
    /// A malformed or out-of-range value was passed to a single call.
    InvalidArgument,
    /// Recoverable, the flag budget is exhausted.
    OutOfFlags,
}

impl GameError {
    pub const fn kind(self) -> ErrorKind {
        use GameError::*;
        match self {
            EmptyBoard { .. } | NoMines | TooManyMines { .. } => ErrorKind::Configuration,
            InvalidCoords { .. } | InvalidBoardShape | InvalidStatusChar(_) => {
                ErrorKind::InvalidArgument
            }
            OutOfFlags => ErrorKind::OutOfFlags,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_onto_kinds() {
        assert_eq!(GameError::NoMines.kind(), ErrorKind::Configuration);
        assert_eq!(
            GameError::InvalidCoords { x: -1, y: 0 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(GameError::OutOfFlags.kind(), ErrorKind::OutOfFlags);
    }

    #[test]
    fn messages_are_readable() {
        let err = GameError::TooManyMines {
            requested: 1,
            available: 0,
        };

        assert_eq!(
            err.to_string(),
            "Too many mines, requested 1 but only 0 cells can hold one"
        );
    }
}
