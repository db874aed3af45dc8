use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use walkdir::WalkDir;

use super::frontmatter::Frontmatter;
use crate::search::NoteText;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    pub owner: String,
    pub favorite: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl NoteText for Note {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.body
    }
}

/// Fields supplied when saving a new note; missing text becomes ""
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub body: Option<String>,
    pub favorite: bool,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            favorite: false,
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

impl NoteText for NoteDraft {
    fn title(&self) -> &str {
        NoteDraft::title(self)
    }

    fn body(&self) -> &str {
        NoteDraft::body(self)
    }
}

/// Changes applied by an edit; `None` leaves the field as is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Title,
    Created,
    #[default]
    Updated,
    Favorite,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Stable sort; notes comparing equal keep their relative order.
/// `false < true` for favorites, so descending puts favorites first.
pub fn sort_notes(notes: &mut [Note], field: SortField, order: SortOrder) {
    notes.sort_by(|a, b| {
        let ord = match field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Created => a.created.cmp(&b.created),
            SortField::Updated => a.updated.cmp(&b.updated),
            SortField::Favorite => a.favorite.cmp(&b.favorite),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

/// A markdown file read from disk, ready to be saved as a note
pub struct MarkdownFile {
    pub path: PathBuf,
    pub draft: NoteDraft,
}

impl MarkdownFile {
    /// Title comes from frontmatter `title:` or the file stem; the body is
    /// everything after the frontmatter block.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let (frontmatter, body) = Frontmatter::split(&content);
        let frontmatter = frontmatter.unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            draft: NoteDraft {
                title: Some(frontmatter.title.unwrap_or(stem)),
                body: Some(body.trim_start_matches(['\r', '\n']).to_string()),
                favorite: frontmatter.favorite,
            },
        })
    }
}

/// All `*.md` files under `dir`, recursively, sorted by path
pub fn collect_markdown_paths(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().map(|e| e == "md").unwrap_or(false))
        .collect();

    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn note(id: &str, title: &str, favorite: bool, created: i64, updated: i64) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            body: String::new(),
            owner: "local".to_string(),
            favorite,
            created: Utc.timestamp_opt(created, 0).unwrap(),
            updated: Utc.timestamp_opt(updated, 0).unwrap(),
        }
    }

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.id.as_str()).collect()
    }

    fn sample() -> Vec<Note> {
        vec![
            note("a", "Beta", false, 1, 30),
            note("b", "Alpha", true, 2, 10),
            note("c", "Gamma", false, 3, 20),
            note("d", "Delta", true, 4, 40),
        ]
    }

    #[test]
    fn test_sort_by_updated_desc_default() {
        let mut notes = sample();
        sort_notes(&mut notes, SortField::default(), SortOrder::default());
        assert_eq!(ids(&notes), vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn test_sort_by_title_asc() {
        let mut notes = sample();
        sort_notes(&mut notes, SortField::Title, SortOrder::Asc);
        assert_eq!(ids(&notes), vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn test_sort_by_created() {
        let mut notes = sample();
        sort_notes(&mut notes, SortField::Created, SortOrder::Desc);
        assert_eq!(ids(&notes), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_sort_by_favorite_is_stable() {
        let mut notes = sample();
        sort_notes(&mut notes, SortField::Favorite, SortOrder::Desc);
        assert_eq!(ids(&notes), vec!["b", "d", "a", "c"]);

        let mut notes = sample();
        sort_notes(&mut notes, SortField::Favorite, SortOrder::Asc);
        assert_eq!(ids(&notes), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_draft_defaults_missing_fields() {
        let draft = NoteDraft::default();
        assert_eq!(draft.title(), "");
        assert_eq!(draft.body(), "");
        assert_eq!(draft.comparison_text(), " ");
    }

    #[test]
    fn test_markdown_file_with_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weekly sync.md");
        fs::write(
            &path,
            "---\ntitle: Weekly Sync\nfavorite: true\n---\n\n# Agenda\n- deadlines\n",
        )
        .unwrap();

        let file = MarkdownFile::load(&path).unwrap();
        assert_eq!(file.draft.title(), "Weekly Sync");
        assert_eq!(file.draft.body(), "# Agenda\n- deadlines\n");
        assert!(file.draft.favorite);
    }

    #[test]
    fn test_markdown_file_without_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pasta.md");
        fs::write(&path, "Pasta with basil").unwrap();

        let file = MarkdownFile::load(&path).unwrap();
        assert_eq!(file.draft.title(), "pasta");
        assert_eq!(file.draft.body(), "Pasta with basil");
        assert!(!file.draft.favorite);
    }

    #[test]
    fn test_collect_markdown_paths_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("nested/a.md"), "a").unwrap();
        fs::write(dir.path().join("nested/deeper/c.md"), "c").unwrap();
        fs::write(dir.path().join("nested/skip.txt"), "x").unwrap();

        let paths = collect_markdown_paths(dir.path());
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["b.md", "nested/a.md", "nested/deeper/c.md"]);
    }
}
