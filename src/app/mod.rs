//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (DocumentView contract, ReaderSettings, OptOutList)
//! - `controllers/` - Orchestration (ReaderController)
//! - `services/` - Pure operations (fingerprint, encoding checks, text_ops)
//! - `infrastructure/` - External integrations (settings file, in-memory host view, error)

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
