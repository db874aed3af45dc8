use anyhow::Result;
use colored::Colorize;

use super::{display_title, Workspace};

pub fn run(id: &str) -> Result<()> {
    let ws = Workspace::open()?;
    let note = ws.store.toggle_favorite(ws.owner(), id)?;

    if note.favorite {
        println!("{} {} added to favorites", "★".yellow(), display_title(&note).cyan());
    } else {
        println!("{} {} removed from favorites", "☆".dimmed(), display_title(&note).cyan());
    }
    Ok(())
}
