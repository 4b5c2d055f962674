use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::document::Viewport;
use super::opt_out::{DEFAULT_OPT_OUT_CAPACITY, OptOutList};
use crate::app::services::text_ops::has_extension;

/// Size threshold for reader mode, and the fingerprint window.
pub const MIN_FILE_SIZE: usize = 10240;

/// Everything the reader keeps on disk: user-tunable knobs plus the viewport
/// history and the opt-out list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderSettings {
    /// Documents smaller than this stay in their normal syntax.
    #[serde(default = "default_min_file_size")]
    pub min_file_size: usize,

    #[serde(default = "default_max_not_use_reader")]
    pub max_not_use_reader: usize,

    #[serde(default = "default_plain_text_syntax")]
    pub plain_text_syntax: String,

    #[serde(default = "default_reader_syntax")]
    pub reader_syntax: String,

    /// File extensions (without the dot, compared case-insensitively) that
    /// count as plain text. Unsaved buffers are always accepted.
    #[serde(default = "default_plain_text_extensions")]
    pub plain_text_extensions: Vec<String>,

    /// The host's fallback encoding; a document still in it is treated as
    /// not yet detected.
    #[serde(default = "default_fallback_encoding")]
    pub fallback_encoding: String,

    /// Install location of the encoding detector. `None` means no detector.
    #[serde(default)]
    pub detector_path: Option<PathBuf>,

    #[serde(default = "default_encoding_wait_ticks")]
    pub encoding_wait_ticks: u32,

    #[serde(default = "default_restore_delay_ms")]
    pub restore_delay_ms: u64,

    /// Fingerprint -> last visible region.
    #[serde(default)]
    pub history: HashMap<String, Viewport>,

    #[serde(default)]
    pub not_use_reader: OptOutList,
}

fn default_min_file_size() -> usize {
    MIN_FILE_SIZE
}

fn default_max_not_use_reader() -> usize {
    DEFAULT_OPT_OUT_CAPACITY
}

fn default_plain_text_syntax() -> String {
    "Packages/Text/Plain text.tmLanguage".to_string()
}

fn default_reader_syntax() -> String {
    "Packages/Text Reader/TextReader.tmLanguage".to_string()
}

fn default_plain_text_extensions() -> Vec<String> {
    vec!["txt".to_string()]
}

fn default_fallback_encoding() -> String {
    "Western (Windows 1252)".to_string()
}

fn default_encoding_wait_ticks() -> u32 {
    10
}

fn default_restore_delay_ms() -> u64 {
    500
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            min_file_size: default_min_file_size(),
            max_not_use_reader: default_max_not_use_reader(),
            plain_text_syntax: default_plain_text_syntax(),
            reader_syntax: default_reader_syntax(),
            plain_text_extensions: default_plain_text_extensions(),
            fallback_encoding: default_fallback_encoding(),
            detector_path: None,
            encoding_wait_ticks: default_encoding_wait_ticks(),
            restore_delay_ms: default_restore_delay_ms(),
            history: HashMap::new(),
            not_use_reader: OptOutList::new(),
        }
    }
}

impl ReaderSettings {
    pub fn restore_delay(&self) -> Duration {
        Duration::from_millis(self.restore_delay_ms)
    }

    /// Whether a path's extension is one of the plain-text extensions.
    pub fn accepts_extension(&self, path: &str) -> bool {
        has_extension(path, &self.plain_text_extensions)
    }

    /// Bring a freshly loaded file back within its own bounds.
    pub fn normalize(&mut self) {
        self.not_use_reader.truncate_front(self.max_not_use_reader);
    }
}
