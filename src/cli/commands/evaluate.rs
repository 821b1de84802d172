//! Evaluate command - run a saved agent against the random opponent

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::RandomOpponent,
    cli::output,
    pipeline::{Pipeline, ProgressObserver, RunConfig},
    q_learning::SavedAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent with its policy frozen")]
pub struct EvaluateArgs {
    /// Path to the saved agent
    #[arg(default_value = "oxo-agent.bin")]
    pub agent: PathBuf,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Default for EvaluateArgs {
    fn default() -> Self {
        Self {
            agent: PathBuf::from("oxo-agent.bin"),
            games: 100,
            seed: None,
            export: None,
        }
    }
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let saved = SavedAgent::load_from_file(&args.agent)?;
    let mut agent = saved.to_agent()?;

    output::print_section("Evaluation");
    output::print_kv("Agent", &args.agent.display().to_string());
    if let Some(episodes) = saved.metadata.episodes_trained {
        output::print_kv("Episodes trained", &output::format_number(episodes));
    }
    if let Some(opponent) = &saved.metadata.opponent {
        output::print_kv("Trained against", opponent);
    }
    output::print_kv("Games", &output::format_number(args.games));
    println!();

    let mut opponent = RandomOpponent::default();
    let mut pipeline = Pipeline::new(RunConfig {
        num_games: args.games,
        seed: args.seed,
    })
    .with_observer(Box::new(ProgressObserver::new()));

    let summary = pipeline.evaluate(&mut agent, &mut opponent)?;

    output::print_section("Evaluation Results");
    output::print_summary(&summary);

    if let Some(export_path) = &args.export {
        summary.save(export_path)?;
        println!("\nResults exported to: {}", export_path.display());
    }

    Ok(())
}
