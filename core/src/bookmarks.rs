//! Named locations persisted as a small JSON object (`name -> "/NT/John"`).
//!
//! The whole map is rewritten on every save; there is a single writer.

use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct Bookmarks {
    path: Option<PathBuf>,
    marks: BTreeMap<String, String>,
}

impl Bookmarks {
    /// In-memory store that never touches disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads `path`. A missing, unreadable or malformed file gives an empty
    /// store that will still save back to `path`.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let marks = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed bookmark file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read bookmark file");
                BTreeMap::new()
            }
        };
        tracing::debug!(path = %path.display(), count = marks.len(), "bookmarks loaded");
        Self {
            path: Some(path),
            marks,
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.marks.get(name).map(String::as_str)
    }

    /// Records `name -> target` and writes the full map out.
    pub fn set(&mut self, name: &str, target: &str) -> CoreResult<()> {
        self.marks.insert(name.to_string(), target.to_string());
        self.save()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.marks.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    fn save(&self) -> CoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = serde_json::to_string_pretty(&self.marks)?;
        std::fs::write(path, data).map_err(|source| CoreError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), count = self.marks.len(), "bookmarks saved");
        Ok(())
    }
}
