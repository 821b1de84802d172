//! Train command - train a fresh agent against the random opponent

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::RandomOpponent,
    cli::output,
    pipeline::{Pipeline, ProgressObserver, RunConfig},
    q_learning::{Hyperparameters, QLearningAgent, SavedAgent, TrainingMetadata},
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent against a random opponent")]
pub struct TrainArgs {
    /// Number of training episodes
    #[arg(long, short = 'g', default_value_t = 5000)]
    pub episodes: usize,

    /// Output file for the trained agent
    #[arg(long, short = 'O', default_value = "oxo-agent.bin")]
    pub output: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Learning rate α (0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    pub alpha: f64,

    /// Discount factor γ (0.0-1.0)
    #[arg(long, default_value_t = 0.99)]
    pub gamma: f64,

    /// Initial exploration rate ε
    #[arg(long, default_value_t = 0.5)]
    pub epsilon: f64,

    /// Multiplicative ε decay per learning update
    #[arg(long, default_value_t = 0.995)]
    pub epsilon_decay: f64,

    /// Exploration rate floor
    #[arg(long, default_value_t = 0.01)]
    pub min_epsilon: f64,

    /// Number of post-training validation games (policy frozen)
    #[arg(long, short = 'v', default_value_t = 100)]
    pub validation_games: usize,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

// Mirrors the clap defaults above so the interactive menu can construct
// the command without going through argument parsing.
impl Default for TrainArgs {
    fn default() -> Self {
        Self {
            episodes: 5000,
            output: PathBuf::from("oxo-agent.bin"),
            seed: None,
            alpha: 0.5,
            gamma: 0.99,
            epsilon: 0.5,
            epsilon_decay: 0.995,
            min_epsilon: 0.01,
            validation_games: 100,
            summary: None,
            progress: true,
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let params = Hyperparameters {
        alpha: args.alpha,
        gamma: args.gamma,
        epsilon: args.epsilon,
        epsilon_decay: args.epsilon_decay,
        min_epsilon: args.min_epsilon,
    };

    let mut agent = QLearningAgent::new(params)?;
    let mut opponent = RandomOpponent::default();

    output::print_section("Training");
    output::print_kv("Episodes", &output::format_number(args.episodes));
    output::print_kv("Opponent", "Random");
    if let Some(seed) = args.seed {
        output::print_kv("Seed", &seed.to_string());
    }
    println!();

    let mut pipeline = Pipeline::new(RunConfig {
        num_games: args.episodes,
        seed: args.seed,
    });
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let training = pipeline.train(&mut agent, &mut opponent)?;

    output::print_section("Training Complete");
    output::print_summary(&training);
    output::print_kv(
        "Q-table states",
        &output::format_number(agent.q_table_size()),
    );
    output::print_kv("Final epsilon", &format!("{:.4}", agent.epsilon()));

    // Frozen validation pass against a fresh random opponent
    let validation = if args.validation_games > 0 {
        output::print_section("Validation (policy frozen)");

        let validation_seed = args.seed.map(|s| s.wrapping_add(2));
        let mut validation_pipeline = Pipeline::new(RunConfig {
            num_games: args.validation_games,
            seed: validation_seed,
        });
        if args.progress {
            validation_pipeline =
                validation_pipeline.with_observer(Box::new(ProgressObserver::new()));
        }

        let summary = validation_pipeline.evaluate(&mut agent, &mut opponent)?;
        output::print_summary(&summary);
        Some(summary)
    } else {
        None
    };

    let metadata = TrainingMetadata {
        episodes_trained: Some(training.total_games),
        opponent: Some("random".to_string()),
        seed: args.seed,
    };

    let saved = SavedAgent::from_agent(&agent, metadata);
    saved.save_to_file(&args.output)?;
    println!("\nAgent saved to: {}", args.output.display());

    if let Some(summary_path) = &args.summary {
        let summary = validation.unwrap_or(training);
        summary.save(summary_path)?;
        println!("Summary written to: {}", summary_path.display());
    }

    Ok(())
}
