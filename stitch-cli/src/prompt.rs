//! Minimal interactive input
//!
//! Setup prompts are a thin boundary around stdin; an empty answer takes
//! the default.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Ask a question on stdout and read one line from stdin
pub fn input(question: &str, default: &str) -> Result<String> {
    print!("{question} ({default}): ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    let answer = line.trim();
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}
