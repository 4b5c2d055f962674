//! Reader mode for large plain-text documents.
//!
//! A host editor forwards its document lifecycle events to a
//! [`ReaderController`]. Large plain-text documents are switched into a
//! read-only reader syntax, and the last visible region of each document is
//! remembered by content fingerprint so it can be restored on reopen.

pub mod app;

pub use app::controllers::reader::{DocumentEvents, ReaderController};
pub use app::domain::{
    DocumentId, DocumentSettings, DocumentView, OptOutList, ReaderSettings, ReaderState, Viewport,
};
pub use app::infrastructure::error::{ReaderError, Result};
pub use app::infrastructure::memory_view::MemoryView;
pub use app::infrastructure::store::{JsonSettingsFile, SettingsStore};
pub use app::services::fingerprint::{Fingerprint, fingerprint_text, fingerprint_view};
