//! Observer port - abstraction for run observation
//!
//! Observers can be composed to collect data during training or evaluation
//! without coupling the pipeline to specific output formats.
//!
//! # Event Sequence
//!
//! 1. `on_run_start(total_games)` - once at the beginning
//! 2. `on_game_end(game_num, outcome)` - after each episode
//! 3. `on_run_end()` - once at the end

use crate::{Result, episode::Outcome};

/// Observer trait for monitoring training and evaluation runs.
///
/// All methods have no-op defaults; implementations override only the
/// events they care about.
pub trait Observer {
    /// Called when a run starts with the total number of games to play.
    fn on_run_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode completes.
    fn on_game_end(&mut self, _game_num: usize, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    /// Called when the run completes.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
