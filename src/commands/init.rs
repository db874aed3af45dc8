use anyhow::Result;
use colored::*;
use std::fs;

use semnote::core::config::Config;
use semnote::core::paths::WorkspacePaths;
use semnote::store::NoteStore;

pub fn run() -> Result<()> {
    let paths = WorkspacePaths::discover()?;

    println!("{}", "semnote workspace".bold());
    println!("{}", "=".repeat(50));
    println!();

    if paths.data.exists() {
        println!("{} {} exists", "✓".green(), paths.data.display());
    } else {
        fs::create_dir_all(&paths.data)?;
        println!("{} Created {}", "✓".green(), paths.data.display());
    }

    if paths.config.exists() {
        // Validate an existing config
        Config::load(&paths.config)?;
        println!("{} {} exists", "✓".green(), paths.config.display());
    } else {
        Config::default().save(&paths.config)?;
        println!("{} Wrote default {}", "✓".green(), paths.config.display());
    }

    NoteStore::open(&paths.db)?;
    println!("{} Note store at {}", "✓".green(), paths.db.display());

    println!();
    println!("{}", "✓ Workspace is ready".green());
    Ok(())
}
