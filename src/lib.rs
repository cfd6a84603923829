//! rock-ai
//!
//! Sends a rock photograph to Gemini and turns the structured answer into a
//! geology report.

pub mod analyzer;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod progress;
pub mod report;

pub use error::{Result, RockAiError};
