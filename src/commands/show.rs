use anyhow::{anyhow, Result};
use colored::Colorize;

use super::{display_title, format_time, Workspace};

pub fn run(id: &str, shared: bool, json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let note = if shared {
        ws.store.get_shared(id)?
    } else {
        ws.store.get(ws.owner(), id)?
    }
    .ok_or_else(|| anyhow!("note not found: {}", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
        return Ok(());
    }

    let star = if note.favorite { " ★".yellow() } else { "".normal() };
    println!("{}{}", display_title(&note).bold(), star);
    if shared {
        println!("{}", "Shared note (read-only)".dimmed());
    }
    println!(
        "{}",
        format!(
            "Created {} · Updated {}",
            format_time(&note.created),
            format_time(&note.updated)
        )
        .dimmed()
    );
    println!("{}", "-".repeat(60));
    println!("{}", note.body);
    Ok(())
}
