//! Play command - interactive games against a saved agent

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::ConsoleInput,
    cli::output,
    episode::{EpisodeRunner, Outcome},
    game::Board,
    q_learning::SavedAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Play against a trained agent")]
pub struct PlayArgs {
    /// Path to the saved agent
    #[arg(default_value = "oxo-agent.bin")]
    pub agent: PathBuf,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            agent: PathBuf::from("oxo-agent.bin"),
        }
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let saved = SavedAgent::load_from_file(&args.agent)?;
    let mut agent = saved.to_agent()?;

    output::print_section("Play");
    output::print_kv("Agent", &args.agent.display().to_string());
    if let Some(episodes) = saved.metadata.episodes_trained {
        output::print_kv("Episodes trained", &output::format_number(episodes));
    }
    println!("\nThe agent plays X and moves first. You play O.");
    println!("Cells are numbered 0-8, left to right, top to bottom.");

    let runner = EpisodeRunner::frozen();
    let mut board = Board::new();

    loop {
        // The console adapter holds the stdin lock, so it is scoped to one
        // game and released before the play-again prompt below.
        let outcome = {
            let mut human = ConsoleInput::stdin();
            runner.run(&mut board, &mut agent, &mut human)?
        };

        println!("\nFinal board:\n{board}");
        match outcome {
            Outcome::AgentWin => println!("The agent wins."),
            Outcome::OpponentWin => println!("You win!"),
            Outcome::Draw => println!("It's a draw."),
        }

        if !prompt_play_again()? {
            break;
        }
    }

    Ok(())
}

fn prompt_play_again() -> Result<bool> {
    loop {
        print!("\nPlay again? (y/n): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            return Ok(false);
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer 'y' or 'n'."),
        }
    }
}
