pub mod add;
pub mod delete;
pub mod edit;
pub mod favorite;
pub mod import;
pub mod init;
pub mod list;
pub mod search;
pub mod show;
pub mod status;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use semnote::core::config::Config;
use semnote::core::note::Note;
use semnote::core::paths::WorkspacePaths;
use semnote::store::NoteStore;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Everything a command needs: paths, config and an open store
pub struct Workspace {
    pub paths: WorkspacePaths,
    pub config: Config,
    pub store: NoteStore,
}

impl Workspace {
    pub fn open() -> Result<Self> {
        let paths = WorkspacePaths::discover()?;
        if !paths.is_initialized() {
            bail!(
                "no workspace at {}; run `semnote init` first",
                paths.root.display()
            );
        }

        let config = Config::load_or_default(&paths.config)?;
        let store = NoteStore::open(&paths.db)
            .with_context(|| format!("failed to open {}", paths.db.display()))?;

        Ok(Self {
            paths,
            config,
            store,
        })
    }

    pub fn owner(&self) -> &str {
        &self.config.owner
    }
}

/// Body from `--body`, `--body-file`, or neither
pub fn read_body(body: Option<String>, body_file: Option<PathBuf>) -> Result<Option<String>> {
    match (body, body_file) {
        (Some(body), _) => Ok(Some(body)),
        (None, Some(path)) => fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("failed to read {}", path.display())),
        (None, None) => Ok(None),
    }
}

/// Cut `s` to at most `max` terminal columns, marking the cut with "…"
pub fn truncate_width(s: &str, max: usize) -> String {
    let line = s.lines().next().unwrap_or("");
    if line.width() <= max && !s.contains('\n') {
        return line.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Right-pad to `width` terminal columns
pub fn pad_width(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

pub fn format_time(note_time: &chrono::DateTime<chrono::Utc>) -> String {
    note_time
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub fn display_title(note: &Note) -> &str {
    if note.title.is_empty() {
        "(untitled)"
    } else {
        &note.title
    }
}
