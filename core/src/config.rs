use serde::{Deserialize, Serialize};

use crate::*;

/// Cells in the mine-free block around the first click.
const EXCLUSION_ZONE_CELLS: CellCount = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// Validates that the board can keep the first click and its neighborhood mine-free.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    /// Skips validation, callers must go through [`GameConfig::validate`] before use.
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            width,
            height,
            mines,
        } = *self;
        if width == 0 || height == 0 {
            return Err(GameError::EmptyBoard { width, height });
        }
        if mines == 0 {
            return Err(GameError::NoMines);
        }

        let available = mult(width, height).saturating_sub(EXCLUSION_ZONE_CELLS);
        if mines > available {
            return Err(GameError::TooManyMines {
                requested: mines,
                available,
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn area(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Number of clicks needed to win.
    pub const fn safe_cells(&self) -> CellCount {
        self.area() - self.mines
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        let (width, height, mines) = difficulty.dimensions();
        Self::new_unchecked(width, height, mines)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const fn dimensions(self) -> (Coord, Coord, CellCount) {
        match self {
            Self::Beginner => (9, 9, 10),
            Self::Intermediate => (16, 16, 40),
            Self::Expert => (30, 16, 99),
        }
    }
}

/// Feature switches handed to the board driver at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub show_status: bool,
    pub autoplay: AutoplaySettings,
    pub debug: DebugSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_status: true,
            autoplay: AutoplaySettings::default(),
            debug: DebugSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(source: &str) -> core::result::Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplaySettings {
    pub enabled: bool,
    /// Pause between autoplay moves, honoured by the caller.
    pub delay_ms: u64,
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: 100,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    pub show_mines: bool,
    pub log_inferences: bool,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            show_mines: false,
            log_inferences: true,
        }
    }
}
