//! Utility functions shared across layers.
//!
//! - [`key_generator`] - Deterministic short key derivation
//! - [`long_url`] - Long URL validation

pub mod key_generator;
pub mod long_url;
