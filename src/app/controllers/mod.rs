//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the host editor:
//! - Reader mode (event handling, position memory, opt-out tracking)

pub mod reader;
