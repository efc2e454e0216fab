use core::fmt;
use core::num::Saturating;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::reveal;
use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Playing => "Playing",
            Self::Won => "Won",
            Self::Lost => "Lost",
        };
        f.write_str(text)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Notification for whoever draws the board, drained with [`Board::take_events`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CellsRevealed(Vec<Position>),
    FlagToggled { position: Position, flagged: bool },
    Won,
    Lost { triggered: Position },
    Reset,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStatus {
    pub mine_count: CellCount,
    pub flagged_count: CellCount,
    pub clicked_count: CellCount,
    pub game_state: GameState,
}

impl BoardStatus {
    pub const fn remaining_flags(&self) -> CellCount {
        self.mine_count - self.flagged_count
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mines    {} flags left    {}",
            self.mine_count,
            self.remaining_flags(),
            self.game_state
        )
    }
}

/// Minesweeper game state, the only thing allowed to mutate its cells.
///
/// Mines are placed lazily on the first click so that click and its neighborhood are
/// always safe.
#[derive(Clone, Debug)]
pub struct Board<G = RandomMinefieldGenerator> {
    config: GameConfig,
    cells: Array2<Cell>,
    generator: G,
    mines_placed: bool,
    clicked_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: GameState,
    triggered_mine: Option<Position>,
    events: Vec<GameEvent>,
}

impl Board {
    /// Board with mines drawn from system entropy.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = GameConfig::new(width, height, mines)?;
        Self::with_generator(config, RandomMinefieldGenerator::from_entropy())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::from_seed(seed))
    }
}

impl Board<FixedMinefieldGenerator> {
    /// Board replaying a known layout, sized and counted from the layout itself.
    ///
    /// The mine-free block around the first click is not guaranteed here, any click can
    /// land on a mine.
    pub fn from_layout(layout: MineLayout) -> Result<Self> {
        let (width, height) = layout.size();
        if width == 0 || height == 0 {
            return Err(GameError::EmptyBoard { width, height });
        }
        if layout.mine_count() == 0 {
            return Err(GameError::NoMines);
        }

        let config = GameConfig::new_unchecked(width, height, layout.mine_count());
        Ok(Self::build(config, FixedMinefieldGenerator::new(layout)))
    }
}

impl<G> Board<G> {
    /// Rejects configurations that could not keep the first click safe.
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, generator))
    }

    fn build(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            cells: Array2::default(Position::from(config.size()).to_nd_index()),
            generator,
            mines_placed: false,
            clicked_count: Saturating(0),
            flagged_count: Saturating(0),
            state: GameState::default(),
            triggered_mine: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Position> {
        self.triggered_mine
    }

    pub fn status(&self) -> BoardStatus {
        BoardStatus {
            mine_count: self.config.mines,
            flagged_count: self.flagged_count.0,
            clicked_count: self.clicked_count.0,
            game_state: self.state,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_board(self)
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell> {
        let pos = self.validate(pos)?;
        Ok(self.cell_at(pos))
    }

    pub(crate) fn cell_at(&self, pos: Position) -> &Cell {
        &self.cells[pos.to_nd_index()]
    }

    /// Drains the notifications produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    /// Starts a new game with the same dimensions, mines are placed again on the next click.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
        self.mines_placed = false;
        self.clicked_count = Saturating(0);
        self.flagged_count = Saturating(0);
        self.state = GameState::Playing;
        self.triggered_mine = None;
        self.events.push(GameEvent::Reset);
        log::debug!("Board reset");
    }

    pub fn toggle_flag(&mut self, pos: Position) -> Result<FlagOutcome> {
        let pos = self.validate(pos)?;
        if self.state.is_finished() {
            log::trace!("Flag at {} ignored, game is over", pos);
            return Ok(FlagOutcome::NoChange);
        }

        let cell = &mut self.cells[pos.to_nd_index()];
        if cell.is_clicked() {
            return Ok(FlagOutcome::NoChange);
        }
        if !cell.is_flagged() && self.flagged_count.0 >= self.config.mines {
            log::debug!("Out of flags, cannot flag {}", pos);
            return Err(GameError::OutOfFlags);
        }

        let outcome = match cell.toggle_flagged() {
            Some(true) => {
                self.flagged_count += 1;
                FlagOutcome::Flagged
            }
            Some(false) => {
                self.flagged_count -= 1;
                FlagOutcome::Unflagged
            }
            None => return Ok(FlagOutcome::NoChange),
        };

        self.events.push(GameEvent::FlagToggled {
            position: pos,
            flagged: outcome == FlagOutcome::Flagged,
        });
        Ok(outcome)
    }

    fn validate(&self, pos: Position) -> Result<Position> {
        if pos.is_within(self.config.size()) {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords {
                x: pos.x.into(),
                y: pos.y.into(),
            })
        }
    }

    fn install_layout(&mut self, layout: &MineLayout) -> Result<()> {
        if layout.size() != self.config.size() || layout.mine_count() != self.config.mines {
            log::warn!(
                "Generated layout does not fit the board, got {:?} with {} mines, expected {:?} with {}",
                layout.size(),
                layout.mine_count(),
                self.config.size(),
                self.config.mines
            );
            return Err(GameError::InvalidBoardShape);
        }

        // every cell gets its count only after the whole layout is known
        for pos in positions(self.config.size()) {
            let cell = &mut self.cells[pos.to_nd_index()];
            if layout.contains_mine(pos) {
                cell.place_mine();
            }
            cell.set_neighbor_mine_count(layout.adjacent_mine_count(pos));
        }
        self.mines_placed = true;
        Ok(())
    }

    fn lose(&mut self, triggered: Position) {
        self.state = GameState::Lost;
        self.triggered_mine = Some(triggered);
        self.cells.iter_mut().for_each(Cell::reveal_mine);
        self.events.push(GameEvent::Lost { triggered });
        log::debug!("Mine hit at {}, game lost", triggered);
    }

    fn check_win(&mut self) -> bool {
        if self.clicked_count.0 != self.config.safe_cells() {
            return false;
        }

        self.state = GameState::Won;
        // display only, the flag count stays as the player left it
        self.cells.iter_mut().for_each(Cell::flag_mine);
        self.events.push(GameEvent::Won);
        log::debug!("All {} safe cells clicked, game won", self.clicked_count.0);
        true
    }
}

impl<G: MinefieldGenerator> Board<G> {
    pub fn click(&mut self, pos: Position) -> Result<ClickOutcome> {
        let pos = self.validate(pos)?;
        if self.state.is_finished() {
            log::trace!("Click at {} ignored, game is over", pos);
            return Ok(ClickOutcome::NoChange);
        }

        let cell = self.cell_at(pos);
        if cell.is_clicked() || cell.is_flagged() {
            return Ok(ClickOutcome::NoChange);
        }

        if !self.mines_placed {
            let layout = self.generator.generate(&self.config, pos)?;
            self.install_layout(&layout)?;
        }

        let cell = &mut self.cells[pos.to_nd_index()];
        cell.click();
        self.clicked_count += 1;

        if cell.is_mine() {
            self.lose(pos);
            return Ok(ClickOutcome::HitMine);
        }

        let mut revealed = vec![pos];
        if cell.neighbor_mine_count() == Some(0) {
            let cascade = reveal::flood_fill(&mut self.cells, pos);
            self.clicked_count += CellCount::try_from(cascade.len()).unwrap_or(CellCount::MAX);
            revealed.extend(cascade);
        }
        self.events.push(GameEvent::CellsRevealed(revealed));

        if self.check_win() {
            Ok(ClickOutcome::Won)
        } else {
            Ok(ClickOutcome::Revealed)
        }
    }
}
