//! Local note persistence

pub mod notes;

pub use notes::{NoteFilter, NoteStore, StoreError, StoreStats};
