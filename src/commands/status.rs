use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::{format_time, Workspace};

#[derive(Serialize)]
struct StatusJson {
    owner: String,
    notes: usize,
    favorites: usize,
    last_updated: Option<String>,
    provider: String,
    db_path: String,
    file_size_bytes: u64,
}

pub fn run(json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let stats = ws.store.stats(ws.owner())?;
    let file_size = std::fs::metadata(&ws.paths.db)
        .map(|m| m.len())
        .unwrap_or(0);
    let provider = ws.config.embedding.provider.as_str().to_string();

    if json {
        let status = StatusJson {
            owner: ws.owner().to_string(),
            notes: stats.notes,
            favorites: stats.favorites,
            last_updated: stats.last_updated.map(|t| t.to_rfc3339()),
            provider,
            db_path: ws.paths.db.display().to_string(),
            file_size_bytes: file_size,
        };
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Workspace Status".bold());
    println!();
    println!("  {} Owner: {}", "→".dimmed(), ws.owner().cyan());
    println!(
        "  {} {} notes ({} favorites)",
        "→".dimmed(),
        stats.notes.to_string().cyan(),
        stats.favorites.to_string().yellow()
    );
    println!("  {} Embedding provider: {}", "→".dimmed(), provider);
    println!(
        "  {} Size: {:.2} KB",
        "→".dimmed(),
        file_size as f64 / 1024.0
    );
    if let Some(ts) = stats.last_updated {
        println!("  {} Last updated: {}", "→".dimmed(), format_time(&ts));
    }

    Ok(())
}
