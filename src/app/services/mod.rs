//! Services layer - pure operations used by the controller.
//!
//! This module contains stateless helpers:
//! - Content fingerprints
//! - Encoding detector checks
//! - Text and path operations

pub mod encoding;
pub mod fingerprint;
pub mod text_ops;
