//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod length_budget;
pub mod ollama;
pub mod ports;
pub mod settings;
pub mod story_bundle;
