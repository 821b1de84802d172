//! Observer pattern for training and evaluation runs
//!
//! Observers allow composable progress reporting and metric collection
//! without coupling the pipeline to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{Result, episode::Outcome, ports::Observer};

/// Progress bar observer - shows run progress with a live W/D/L tally
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::AgentWin => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::OpponentWin => self.losses += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64);
            pb.set_message(format!("{} D:{} L:{}", self.wins, self.draws, self.losses));
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{} D:{} L:{}", self.wins, self.draws, self.losses));
        }
        Ok(())
    }
}

/// Metrics observer - tracks outcome counts during a run
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    total_games: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            wins: 0,
            draws: 0,
            losses: 0,
            total_games: 0,
        }
    }

    /// Get current win rate
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_games as f64
        }
    }

    /// Get current draw rate
    pub fn draw_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.draws as f64 / self.total_games as f64
        }
    }

    /// Get current loss rate
    pub fn loss_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.losses as f64 / self.total_games as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: self.win_rate(),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
        }
    }
}

/// Summary of run metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, outcome: Outcome) -> Result<()> {
        self.total_games += 1;
        match outcome {
            Outcome::AgentWin => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::OpponentWin => self.losses += 1,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();

        assert_eq!(observer.win_rate(), 0.0);

        observer.on_game_end(0, Outcome::AgentWin).unwrap();
        observer.on_game_end(1, Outcome::Draw).unwrap();
        observer.on_game_end(2, Outcome::AgentWin).unwrap();

        assert_eq!(observer.total_games, 3);
        assert_eq!(observer.wins, 2);
        assert_eq!(observer.draws, 1);
        assert_eq!(observer.losses, 0);
        assert!((observer.win_rate() - 0.666).abs() < 0.01);

        let summary = observer.summary();
        assert_eq!(summary.total_games, 3);
        assert!((summary.draw_rate - 1.0 / 3.0).abs() < 1e-12);
    }
}
