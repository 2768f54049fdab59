//! Terminal rendering of command results.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a confirmation line.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print `label: value` rows with the values lined up.
pub fn fields(rows: &[(&str, String)]) {
    let width = rows.iter().map(|(label, _)| label.len() + 1).max().unwrap_or(0);
    for (label, value) in rows {
        // Pad before coloring; escape codes would throw the width off.
        let label = format!("{:<width$}", format!("{}:", label), width = width);
        println!("{} {}", label.dimmed(), value);
    }
}

/// Print an API response or any other serializable value as indented JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
