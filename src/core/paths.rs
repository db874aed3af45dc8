use std::path::PathBuf;

use anyhow::{Context, Result};

/// Name of the per-workspace data directory
pub const DATA_DIR: &str = ".semnote";

pub struct WorkspacePaths {
    pub root: PathBuf,
    pub data: PathBuf,
    pub db: PathBuf,
    pub config: PathBuf,
}

impl WorkspacePaths {
    /// Paths rooted at `SEMNOTE_HOME` if set, else the current directory
    pub fn discover() -> Result<Self> {
        let root = match std::env::var_os("SEMNOTE_HOME") {
            Some(home) => PathBuf::from(home),
            None => std::env::current_dir().context("failed to get current directory")?,
        };
        Ok(Self::from_root(root))
    }

    pub fn from_root(root: PathBuf) -> Self {
        let data = root.join(DATA_DIR);
        Self {
            db: data.join("notes.db"),
            config: data.join("config.yaml"),
            data,
            root,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.data.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = WorkspacePaths::from_root(PathBuf::from("/tmp/ws"));
        assert_eq!(paths.data, PathBuf::from("/tmp/ws/.semnote"));
        assert_eq!(paths.db, PathBuf::from("/tmp/ws/.semnote/notes.db"));
        assert_eq!(paths.config, PathBuf::from("/tmp/ws/.semnote/config.yaml"));
        assert!(!paths.is_initialized());
    }
}
