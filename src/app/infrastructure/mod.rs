//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Settings persistence (JSON file)
//! - An in-memory document view for hosts without their own
//! - Error types

pub mod error;
pub mod memory_view;
pub mod store;
