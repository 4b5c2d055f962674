use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::Result;
use crate::app::domain::settings::ReaderSettings;

pub const SETTINGS_FILE_NAME: &str = "TextReader.json";

/// Durable home of [`ReaderSettings`].
///
/// `load` never fails: a missing or unreadable store yields defaults.
pub trait SettingsStore {
    fn load(&self) -> ReaderSettings;
    fn save(&self, settings: &ReaderSettings) -> Result<()>;
}

/// Settings kept as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonSettingsFile {
    path: PathBuf,
}

impl JsonSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The per-user location (cross-platform)
    pub fn user_default() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("text-reader");
        path.push(SETTINGS_FILE_NAME);
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsFile {
    /// Load settings from disk, or create default if not exists
    fn load(&self) -> ReaderSettings {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<ReaderSettings>(&contents) {
                Ok(mut settings) => {
                    settings.normalize();
                    log::debug!(
                        "Loaded reader settings from {} ({} history entries)",
                        self.path.display(),
                        settings.history.len()
                    );
                    settings
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse {}: {}. Using defaults.",
                        self.path.display(),
                        e
                    );
                    ReaderSettings::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let default = ReaderSettings::default();
                // Try to save defaults for next time
                let _ = self.save(&default);
                default
            }
            Err(e) => {
                // Leave an existing file alone, the user may recover it
                log::warn!(
                    "Failed to read {}: {}. Using defaults.",
                    self.path.display(),
                    e
                );
                ReaderSettings::default()
            }
        }
    }

    fn save(&self, settings: &ReaderSettings) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::document::Viewport;

    #[test]
    fn test_missing_file_yields_defaults_and_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsFile::new(dir.path().join("nested").join(SETTINGS_FILE_NAME));

        let settings = store.load();
        assert_eq!(settings, ReaderSettings::default());
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsFile::new(dir.path().join(SETTINGS_FILE_NAME));

        let mut settings = ReaderSettings::default();
        settings
            .history
            .insert("f1".to_string(), Viewport::new(100, 400));
        settings.not_use_reader.insert("/books/a.txt", 30);
        store.save(&settings).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, settings);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"f1\": [\n"));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "{ this is not json").unwrap();

        let loaded = JsonSettingsFile::new(&path).load();
        assert_eq!(loaded, ReaderSettings::default());
        // A corrupt file is left for the user to inspect
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ this is not json");
    }

    #[test]
    fn test_unreadable_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let bytes = b"{\"history\": {\"abc\": [1, 2]}, \"not_use_reader\": [\"/x\xff.txt\"]}".to_vec();
        fs::write(&path, &bytes).unwrap();

        let loaded = JsonSettingsFile::new(&path).load();
        assert_eq!(loaded, ReaderSettings::default());
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_load_trims_oversized_opt_out_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(
            &path,
            r#"{"max_not_use_reader": 2, "not_use_reader": ["/a", "/b", "/c"]}"#,
        )
        .unwrap();

        let loaded = JsonSettingsFile::new(&path).load();
        assert_eq!(
            loaded.not_use_reader.iter().collect::<Vec<_>>(),
            vec!["/b", "/c"]
        );
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let store = JsonSettingsFile::new(blocker.join(SETTINGS_FILE_NAME));
        assert!(store.save(&ReaderSettings::default()).is_err());
    }

    #[test]
    fn test_default_path_ends_with_file_name() {
        let path = JsonSettingsFile::default_path();
        assert!(path.ends_with(Path::new("text-reader").join(SETTINGS_FILE_NAME)));
    }
}
