//! Rules engine for Minesweeper: lazy minefield generation with a safe first click,
//! flood-fill reveal, a win/loss state machine and a first-order deduction engine.

pub use analysis::*;
pub use autoplay::*;
pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use rng::RandomSource;
pub use types::*;

mod analysis;
mod autoplay;
mod board;
mod cell;
mod config;
mod error;
mod generator;
mod reveal;
pub mod rng;
mod types;
