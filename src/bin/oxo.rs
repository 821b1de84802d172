//! oxo CLI - train, evaluate, and play against a tabular Q-learning
//! Tic-Tac-Toe agent. Without a subcommand, drops into an interactive menu.

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Tabular Q-learning Tic-Tac-Toe agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent against a random opponent
    Train(oxo::cli::commands::train::TrainArgs),

    /// Evaluate a trained agent with its policy frozen
    Evaluate(oxo::cli::commands::evaluate::EvaluateArgs),

    /// Play interactive games against a trained agent
    Play(oxo::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Train(args)) => oxo::cli::commands::train::execute(args),
        Some(Commands::Evaluate(args)) => oxo::cli::commands::evaluate::execute(args),
        Some(Commands::Play(args)) => oxo::cli::commands::play::execute(args),
        None => oxo::cli::menu::run(),
    }
}
