//! Model client
//!
//! [`VisionModel`] is the seam between the pipeline and the remote service.
//! [`GeminiClient`] is the production implementation.

mod gemini;

pub use gemini::{ClientSettings, GeminiClient};

use crate::error::Result;
use crate::loader::ImagePayload;
use rock_ai_common::AnalysisMode;

/// A multimodal model that answers an image + prompt with JSON text
///
/// Implementations perform exactly one remote call per invocation and never
/// cache: identical inputs may produce different outputs.
pub trait VisionModel {
    fn generate(&self, image: &ImagePayload, prompt: &str, mode: AnalysisMode) -> Result<String>;
}

impl<T: VisionModel + ?Sized> VisionModel for &T {
    fn generate(&self, image: &ImagePayload, prompt: &str, mode: AnalysisMode) -> Result<String> {
        (**self).generate(image, prompt, mode)
    }
}
