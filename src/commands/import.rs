//! Import command - Save markdown files as notes

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Result};
use colored::Colorize;

use semnote::core::note::{collect_markdown_paths, MarkdownFile};
use semnote::store::NoteStore;

use super::Workspace;

#[derive(Debug, Default, PartialEq)]
struct ImportSummary {
    imported: usize,
    failed: usize,
}

pub fn run(dir: &Path, json: bool) -> Result<()> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let ws = Workspace::open()?;
    let start = Instant::now();

    let summary = import_paths(&ws.store, ws.owner(), &collect_markdown_paths(dir));

    let duration_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        imported = summary.imported,
        failed = summary.failed,
        duration_ms,
        "import finished"
    );

    if json {
        println!(
            "{}",
            serde_json::json!({
                "imported": summary.imported,
                "failed": summary.failed,
                "duration_ms": duration_ms,
            })
        );
    } else {
        println!(
            "{} Imported {} notes in {:.2}s",
            "✓".green().bold(),
            summary.imported.to_string().cyan(),
            duration_ms as f64 / 1000.0
        );
        if summary.failed > 0 {
            println!("  {} {} files failed", "✗".red(), summary.failed);
        }
    }

    Ok(())
}

/// Save every file as a note; files that cannot be read or saved are
/// counted and skipped.
fn import_paths(store: &NoteStore, owner: &str, paths: &[PathBuf]) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for path in paths {
        let saved = MarkdownFile::load(path)
            .and_then(|file| Ok(store.create(owner, &file.draft)?));

        match saved {
            Ok(_) => summary.imported += 1,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping file");
                summary.failed += 1;
            }
        }
    }

    summary
}
