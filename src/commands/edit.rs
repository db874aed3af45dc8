use std::path::PathBuf;

use anyhow::{bail, Result};
use colored::Colorize;
use semnote::core::note::NotePatch;

use super::{read_body, Workspace};

pub fn run(id: &str, title: Option<String>, body: Option<String>, body_file: Option<PathBuf>) -> Result<()> {
    let patch = NotePatch {
        title,
        body: read_body(body, body_file)?,
    };
    if patch.is_empty() {
        bail!("nothing to change; pass --title, --body or --body-file");
    }

    let ws = Workspace::open()?;
    let note = ws.store.update(ws.owner(), id, &patch)?;

    println!("{} Updated {}", "✓".green().bold(), note.title.cyan());
    Ok(())
}
