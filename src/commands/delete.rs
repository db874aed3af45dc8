use anyhow::Result;
use colored::Colorize;

use super::Workspace;

pub fn run(id: &str) -> Result<()> {
    let ws = Workspace::open()?;
    ws.store.delete(ws.owner(), id)?;

    println!("{} Deleted {}", "✓".green().bold(), id);
    Ok(())
}
