//! Terminal progress
//!
//! Step lines and a spinner go to stderr so stdout carries only reports.

use crate::analyzer::VisionModel;
use crate::error::Result;
use crate::loader::ImagePayload;
use indicatif::{ProgressBar, ProgressStyle};
use rock_ai_common::AnalysisMode;
use std::time::Duration;

/// Wraps a model and shows a spinner while each call is in flight
pub struct Spinner<M> {
    inner: M,
}

impl<M: VisionModel> Spinner<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: VisionModel> VisionModel for Spinner<M> {
    fn generate(&self, image: &ImagePayload, prompt: &str, mode: AnalysisMode) -> Result<String> {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Waiting for the model ({} mode)...", mode));
        pb.enable_steady_tick(Duration::from_millis(120));

        let result = self.inner.generate(image, prompt, mode);
        pb.finish_and_clear();
        result
    }
}

/// `[n/total] message`
pub fn step(index: usize, total: usize, message: &str) {
    eprintln!("[{}/{}] {}", index, total, message);
}

/// `✔ message`
pub fn done(message: &str) {
    eprintln!("✔ {}", message);
}
