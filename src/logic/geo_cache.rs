use crate::error::Result;
use crate::models::Coordinates;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Cache key for a place name: lower-cased and trimmed
pub fn cache_key(place: &str) -> String {
    place.trim().to_lowercase()
}

/// Append-only place → coordinates cache backed by a JSON file.
///
/// Loaded once on construction and rewritten in full after every insert, so
/// an interrupted batch keeps everything resolved so far. There is no locking:
/// two processes writing the same file will lose each other's entries.
#[derive(Debug, Default)]
pub struct GeoCache {
    path: Option<PathBuf>,
    entries: BTreeMap<String, Coordinates>,
}

impl GeoCache {
    pub fn load(path: &Path) -> Self {
        let entries = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Ignoring unreadable geo cache: {}", e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to read geo cache: {}", e);
                BTreeMap::new()
            }
        };

        tracing::debug!(entries = entries.len(), "Loaded geo cache");

        Self {
            path: Some(path.to_path_buf()),
            entries,
        }
    }

    /// A cache that is never written to disk
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self, place: &str) -> Option<Coordinates> {
        self.entries.get(&cache_key(place)).copied()
    }

    /// Store an entry and persist the whole cache
    pub fn insert(&mut self, place: &str, coords: Coordinates) -> Result<()> {
        self.entries.insert(cache_key(place), coords);
        self.save()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
