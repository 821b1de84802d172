//! Interactive menu
//!
//! Entry point when the binary is run without a subcommand. Command errors
//! (a missing saved agent, for example) are reported and the menu keeps
//! running.

use std::io::Write;

use anyhow::Result;

use crate::cli::commands::{evaluate, play, train};

pub fn run() -> Result<()> {
    println!("oxo - tabular Q-learning Tic-Tac-Toe");

    loop {
        println!("\n1. Train a new agent");
        println!("2. Evaluate the saved agent");
        println!("3. Play against the saved agent");
        println!("q. Quit");

        let Some(choice) = prompt("> ")? else {
            return Ok(());
        };

        let result = match choice.as_str() {
            "1" => prompt_episodes().and_then(|episodes| {
                episodes.map_or(Ok(()), |episodes| {
                    train::execute(train::TrainArgs {
                        episodes,
                        ..train::TrainArgs::default()
                    })
                })
            }),
            "2" => evaluate::execute(evaluate::EvaluateArgs::default()),
            "3" => play::execute(play::PlayArgs::default()),
            "q" | "quit" | "exit" => return Ok(()),
            "" => continue,
            other => {
                println!("Unknown choice '{other}'.");
                continue;
            }
        };

        if let Err(e) = result {
            eprintln!("Error: {e:#}");
        }
    }
}

/// Ask for a positive episode count, re-prompting on invalid input.
/// Returns `None` if the input stream closes.
fn prompt_episodes() -> Result<Option<usize>> {
    loop {
        let Some(input) = prompt("Number of training episodes: ")? else {
            return Ok(None);
        };

        match input.parse::<usize>() {
            Ok(n) if n > 0 => return Ok(Some(n)),
            _ => println!("Enter a positive whole number."),
        }
    }
}

fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
