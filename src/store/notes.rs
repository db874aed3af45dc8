//! Note storage using SQLite
//!
//! Every read and write is scoped to an owner. A note owned by someone else
//! is indistinguishable from a missing one, except through
//! [`NoteStore::get_shared`], the read-only share path.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use uuid::Uuid;

use crate::core::note::{Note, NoteDraft, NotePatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("note not found: {0}")]
    NotFound(String),

    #[error("stored timestamp {0} is out of range")]
    InvalidTimestamp(i64),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Which notes a listing includes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteFilter {
    #[default]
    All,
    Favorites,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    pub notes: usize,
    pub favorites: usize,
    pub last_updated: Option<DateTime<Utc>>,
}

pub struct NoteStore {
    conn: Connection,
}

const COLUMNS: &str = "id, title, body, owner, favorite, created_ms, updated_ms";

impl NoteStore {
    /// Open or create database at path
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS notes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                owner TEXT NOT NULL,
                favorite INTEGER NOT NULL DEFAULT 0,
                created_ms INTEGER NOT NULL,
                updated_ms INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes(owner);
            "#,
        )?;

        Ok(())
    }

    /// Save a new note; missing title or body are stored as ""
    pub fn create(&self, owner: &str, draft: &NoteDraft) -> Result<Note> {
        let id = Uuid::new_v4().to_string();
        let now = now_ms();

        self.conn.execute(
            r#"
            INSERT INTO notes (id, title, body, owner, favorite, created_ms, updated_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
            params![id, draft.title(), draft.body(), owner, draft.favorite, now],
        )?;
        tracing::info!(%id, owner, "created note");

        self.require(owner, &id)
    }

    pub fn get(&self, owner: &str, id: &str) -> Result<Option<Note>> {
        let sql = format!("SELECT {} FROM notes WHERE id = ?1 AND owner = ?2", COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![id, owner], raw_note)
            .optional()?;
        row.map(RawNote::into_note).transpose()
    }

    /// Read a note regardless of owner
    pub fn get_shared(&self, id: &str) -> Result<Option<Note>> {
        let sql = format!("SELECT {} FROM notes WHERE id = ?1", COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![id], raw_note)
            .optional()?;
        row.map(RawNote::into_note).transpose()
    }

    pub fn update(&self, owner: &str, id: &str, patch: &NotePatch) -> Result<Note> {
        let changed = self.conn.execute(
            r#"
            UPDATE notes SET
                title = COALESCE(?3, title),
                body = COALESCE(?4, body),
                updated_ms = ?5
            WHERE id = ?1 AND owner = ?2
            "#,
            params![id, owner, patch.title, patch.body, now_ms()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        tracing::info!(id, owner, "updated note");

        self.require(owner, id)
    }

    pub fn toggle_favorite(&self, owner: &str, id: &str) -> Result<Note> {
        let changed = self.conn.execute(
            "UPDATE notes SET favorite = NOT favorite, updated_ms = ?3 WHERE id = ?1 AND owner = ?2",
            params![id, owner, now_ms()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let note = self.require(owner, id)?;
        tracing::info!(id, owner, favorite = note.favorite, "toggled favorite");
        Ok(note)
    }

    pub fn delete(&self, owner: &str, id: &str) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND owner = ?2",
            params![id, owner],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        tracing::info!(id, owner, "deleted note");
        Ok(())
    }

    /// Owner's notes in creation order
    pub fn list(&self, owner: &str, filter: NoteFilter) -> Result<Vec<Note>> {
        let favorites_only = filter == NoteFilter::Favorites;
        let sql = format!(
            "SELECT {} FROM notes WHERE owner = ?1 AND (?2 = 0 OR favorite = 1) ORDER BY created_ms, rowid",
            COLUMNS
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![owner, favorites_only], raw_note)?;

        let mut notes = Vec::new();
        for row in rows {
            notes.push(row?.into_note()?);
        }
        Ok(notes)
    }

    pub fn stats(&self, owner: &str) -> Result<StoreStats> {
        let (notes, favorites, last_updated): (i64, i64, Option<i64>) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(favorite), 0), MAX(updated_ms) FROM notes WHERE owner = ?1",
            params![owner],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(StoreStats {
            notes: notes as usize,
            favorites: favorites as usize,
            last_updated: last_updated.map(from_ms).transpose()?,
        })
    }

    fn require(&self, owner: &str, id: &str) -> Result<Note> {
        self.get(owner, id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Row as stored, before timestamp conversion
struct RawNote {
    id: String,
    title: String,
    body: String,
    owner: String,
    favorite: bool,
    created_ms: i64,
    updated_ms: i64,
}

impl RawNote {
    fn into_note(self) -> Result<Note> {
        Ok(Note {
            id: self.id,
            title: self.title,
            body: self.body,
            owner: self.owner,
            favorite: self.favorite,
            created: from_ms(self.created_ms)?,
            updated: from_ms(self.updated_ms)?,
        })
    }
}

fn raw_note(row: &Row<'_>) -> rusqlite::Result<RawNote> {
    Ok(RawNote {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        owner: row.get(3)?,
        favorite: row.get(4)?,
        created_ms: row.get(5)?,
        updated_ms: row.get(6)?,
    })
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn from_ms(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or(StoreError::InvalidTimestamp(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(notes: &[(&str, &str, &str)]) -> (NoteStore, Vec<Note>) {
        let store = NoteStore::open_in_memory().unwrap();
        let created = notes
            .iter()
            .map(|(owner, title, body)| store.create(owner, &NoteDraft::new(*title, *body)).unwrap())
            .collect();
        (store, created)
    }

    #[test]
    fn test_create_and_get() -> Result<()> {
        let store = NoteStore::open_in_memory()?;
        let note = store.create("alice", &NoteDraft::new("Meeting", "Discuss Q3 deadlines"))?;

        assert_eq!(note.title, "Meeting");
        assert_eq!(note.body, "Discuss Q3 deadlines");
        assert_eq!(note.owner, "alice");
        assert!(!note.favorite);
        assert_eq!(note.created, note.updated);

        assert_eq!(store.get("alice", &note.id)?, Some(note));
        Ok(())
    }

    #[test]
    fn test_missing_fields_default_to_empty() -> Result<()> {
        let store = NoteStore::open_in_memory()?;
        let note = store.create("alice", &NoteDraft::default())?;

        assert_eq!(note.title, "");
        assert_eq!(note.body, "");
        Ok(())
    }

    #[test]
    fn test_ownership_is_enforced() {
        let (store, notes) = store_with(&[("alice", "Private", "secret")]);
        let id = &notes[0].id;

        assert_eq!(store.get("bob", id).unwrap(), None);
        assert!(matches!(
            store.update("bob", id, &NotePatch { title: Some("x".into()), body: None }),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.toggle_favorite("bob", id), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete("bob", id), Err(StoreError::NotFound(_))));
        assert!(store.list("bob", NoteFilter::All).unwrap().is_empty());

        assert_eq!(store.get("alice", id).unwrap().unwrap().title, "Private");
    }

    #[test]
    fn test_shared_read_bypasses_owner() {
        let (store, notes) = store_with(&[("alice", "Shared", "read me")]);

        let shared = store.get_shared(&notes[0].id).unwrap().unwrap();
        assert_eq!(shared.owner, "alice");
        assert_eq!(shared.body, "read me");
        assert_eq!(store.get_shared("missing").unwrap(), None);
    }

    #[test]
    fn test_update_patch() -> Result<()> {
        let (store, notes) = store_with(&[("alice", "Draft", "first body")]);
        let id = &notes[0].id;

        let updated = store.update(
            "alice",
            id,
            &NotePatch {
                title: None,
                body: Some("second body".to_string()),
            },
        )?;

        assert_eq!(updated.title, "Draft");
        assert_eq!(updated.body, "second body");
        assert_eq!(updated.created, notes[0].created);
        assert!(updated.updated >= notes[0].updated);
        Ok(())
    }

    #[test]
    fn test_toggle_favorite_twice() -> Result<()> {
        let (store, notes) = store_with(&[("alice", "Fav", "")]);
        let id = &notes[0].id;

        assert!(store.toggle_favorite("alice", id)?.favorite);
        assert!(!store.toggle_favorite("alice", id)?.favorite);
        Ok(())
    }

    #[test]
    fn test_list_filter_and_order() -> Result<()> {
        let (store, notes) = store_with(&[
            ("alice", "one", ""),
            ("alice", "two", ""),
            ("bob", "other", ""),
            ("alice", "three", ""),
        ]);
        store.toggle_favorite("alice", &notes[1].id)?;

        let all: Vec<_> = store
            .list("alice", NoteFilter::All)?
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(all, vec!["one", "two", "three"]);

        let favorites = store.list("alice", NoteFilter::Favorites)?;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].title, "two");
        Ok(())
    }

    #[test]
    fn test_delete() -> Result<()> {
        let (store, notes) = store_with(&[("alice", "gone", "")]);

        store.delete("alice", &notes[0].id)?;
        assert_eq!(store.get("alice", &notes[0].id)?, None);
        assert!(matches!(
            store.delete("alice", &notes[0].id),
            Err(StoreError::NotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_stats() -> Result<()> {
        let (store, notes) = store_with(&[("alice", "a", ""), ("alice", "b", ""), ("bob", "c", "")]);
        store.toggle_favorite("alice", &notes[0].id)?;

        let stats = store.stats("alice")?;
        assert_eq!(stats.notes, 2);
        assert_eq!(stats.favorites, 1);
        assert!(stats.last_updated.is_some());

        let empty = store.stats("carol")?;
        assert_eq!(empty.notes, 0);
        assert_eq!(empty.favorites, 0);
        assert_eq!(empty.last_updated, None);
        Ok(())
    }

    #[test]
    fn test_reopen_file_database() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.db");

        let id = {
            let store = NoteStore::open(&path)?;
            store.create("alice", &NoteDraft::new("Persisted", "body"))?.id
        };

        let store = NoteStore::open(&path)?;
        assert_eq!(store.get("alice", &id)?.unwrap().title, "Persisted");
        Ok(())
    }
}
