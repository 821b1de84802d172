//! Output formatting for CLI

use crate::pipeline::RunSummary;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print the win/draw/loss breakdown of a run
pub fn print_summary(summary: &RunSummary) {
    print_kv("Total games", &format_number(summary.total_games));
    print_kv(
        "Wins",
        &format!("{} ({:.1}%)", summary.wins, summary.win_rate * 100.0),
    );
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", summary.draws, summary.draw_rate * 100.0),
    );
    print_kv(
        "Losses",
        &format!("{} ({:.1}%)", summary.losses, summary.loss_rate * 100.0),
    );
}
