use serde::{Deserialize, Serialize};

pub const DEFAULT_OPT_OUT_CAPACITY: usize = 30;

/// Paths that must not be promoted to reader mode automatically.
///
/// Ordered oldest first. Each path appears at most once; when the list grows
/// past its capacity the oldest entry (index 0) is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptOutList {
    paths: Vec<String>,
}

impl OptOutList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Remove `path` if present. Returns whether anything was removed.
    pub fn remove(&mut self, path: &str) -> bool {
        match self.paths.iter().position(|p| p == path) {
            Some(idx) => {
                self.paths.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Append `path` as the newest entry, moving it if it was already listed,
    /// then evict from the front until at most `capacity` entries remain.
    pub fn insert(&mut self, path: &str, capacity: usize) {
        self.remove(path);
        self.paths.push(path.to_string());
        self.truncate_front(capacity);
    }

    /// Drop the oldest entries until `len() <= capacity`.
    pub fn truncate_front(&mut self, capacity: usize) {
        if self.paths.len() > capacity {
            let excess = self.paths.len() - capacity;
            self.paths.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}
