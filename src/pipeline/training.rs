//! Training and evaluation runs

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    episode::{EpisodeRunner, Outcome},
    game::Board,
    ports::{MoveSource, Observer},
    q_learning::QLearningAgent,
};

/// Run configuration shared by training and evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of games to play
    pub num_games: usize,

    /// Random seed; the opponent is seeded with `seed + 1` so the two
    /// random streams never overlap
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_games: 5000,
            seed: None,
        }
    }
}

/// Aggregate outcome counts of a run, from the agent's perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total games played
    pub total_games: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,
}

impl RunSummary {
    /// Create a new run summary
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Fraction of games not lost (wins plus draws)
    pub fn non_loss_rate(&self) -> f64 {
        self.win_rate + self.draw_rate
    }

    /// Save summary to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load summary from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let summary = serde_json::from_reader(file)?;
        Ok(summary)
    }
}

/// Drives repeated episodes of the agent against an opponent.
///
/// The same pipeline handles both training (learning enabled, ε-greedy)
/// and evaluation (policy frozen, greedy). Observers are notified at run
/// start, after each game, and at run end.
pub struct Pipeline {
    config: RunConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl Pipeline {
    /// Create a new pipeline
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training games with learning enabled
    pub fn train(
        &mut self,
        agent: &mut QLearningAgent,
        opponent: &mut dyn MoveSource,
    ) -> Result<RunSummary> {
        self.run(EpisodeRunner::learning(), agent, opponent)
    }

    /// Run evaluation games with the policy frozen
    pub fn evaluate(
        &mut self,
        agent: &mut QLearningAgent,
        opponent: &mut dyn MoveSource,
    ) -> Result<RunSummary> {
        self.run(EpisodeRunner::frozen(), agent, opponent)
    }

    fn run(
        &mut self,
        runner: EpisodeRunner,
        agent: &mut QLearningAgent,
        opponent: &mut dyn MoveSource,
    ) -> Result<RunSummary> {
        self.seed_pair(agent, opponent);

        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;
        let mut board = Board::new();

        for observer in &mut self.observers {
            observer.on_run_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            let outcome = runner.run(&mut board, agent, opponent)?;

            match outcome {
                Outcome::AgentWin => wins += 1,
                Outcome::Draw => draws += 1,
                Outcome::OpponentWin => losses += 1,
            }

            for observer in &mut self.observers {
                observer.on_game_end(game_num, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(RunSummary::new(self.config.num_games, wins, draws, losses))
    }

    fn seed_pair(&self, agent: &mut QLearningAgent, opponent: &mut dyn MoveSource) {
        if let Some(seed) = self.config.seed {
            agent.reseed(seed);
            opponent.set_rng_seed(seed.wrapping_add(1));
        }
    }
}
