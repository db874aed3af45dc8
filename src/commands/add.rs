use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use semnote::core::note::NoteDraft;

use super::{read_body, Workspace};

pub fn run(title: String, body: Option<String>, body_file: Option<PathBuf>, favorite: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let draft = NoteDraft {
        title: Some(title),
        body: read_body(body, body_file)?,
        favorite,
    };

    let note = ws.store.create(ws.owner(), &draft)?;

    println!("{} Created {}", "✓".green().bold(), note.title.cyan());
    println!("  {} {}", "→".dimmed(), note.id);
    Ok(())
}
