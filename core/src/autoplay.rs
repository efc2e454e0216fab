//! Feeds certain deductions back into a board, one move at a time.

use crate::*;

#[derive(Clone, Debug, Default)]
pub struct AutoPlayer {
    settings: Settings,
}

impl AutoPlayer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Applies the first deduction available on `board` and returns it.
    ///
    /// Returns `None` once the game is over or nothing is certain. Pacing between steps is
    /// left to the caller.
    pub fn step<G: MinefieldGenerator>(&self, board: &mut Board<G>) -> Result<Option<Inference>> {
        if board.is_finished() {
            return Ok(None);
        }

        let snapshot = board.snapshot();
        let next = if self.settings.debug.log_inferences {
            let inferences = infer(&snapshot);
            log::debug!("Board:\n{}", snapshot);
            for inference in &inferences {
                log::info!("{}", inference);
            }
            inferences.first().copied()
        } else {
            infer_iter(&snapshot).next()
        };

        let Some(inference) = next else {
            log::debug!("No certain move left");
            return Ok(None);
        };

        inference.apply(board)?;
        Ok(Some(inference))
    }

    /// Steps until nothing is certain, calling `on_step` after every applied move.
    /// Returns how many moves were made.
    pub fn run<G, F>(&self, board: &mut Board<G>, mut on_step: F) -> Result<usize>
    where
        G: MinefieldGenerator,
        F: FnMut(&Board<G>, &Inference),
    {
        let mut moves = 0;
        while let Some(inference) = self.step(board)? {
            moves += 1;
            on_step(board, &inference);
        }
        Ok(moves)
    }
}
