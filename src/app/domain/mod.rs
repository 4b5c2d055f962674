//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - The host document contract (DocumentView, DocumentId, Viewport)
//! - Persisted reader settings and the opt-out list
//! - The per-document reader state machine

pub mod document;
pub mod opt_out;
pub mod settings;
pub mod state;

pub use document::{DocumentId, DocumentSettings, DocumentView, Viewport};
pub use opt_out::OptOutList;
pub use settings::ReaderSettings;
pub use state::ReaderState;
