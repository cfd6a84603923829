//! Gemini API client
//!
//! One blocking `generateContent` call per analysis: inline image, prompt
//! text, and a `responseSchema` built from the categorical tables. No retry.

use super::VisionModel;
use crate::error::{Result, RockAiError};
use crate::loader::ImagePayload;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use rock_ai_common::{response_schema, AnalysisMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Everything the client needs, resolved from [`crate::config::Config`]
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: String,
    pub base_url: String,
    pub detailed_model: String,
    pub quick_model: String,
    pub detailed_thinking_budget: u32,
    pub quick_thinking_budget: u32,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
}

impl ClientSettings {
    fn model(&self, mode: AnalysisMode) -> &str {
        match mode {
            AnalysisMode::Detailed => &self.detailed_model,
            AnalysisMode::Quick => &self.quick_model,
        }
    }

    fn thinking_budget(&self, mode: AnalysisMode) -> u32 {
        match mode {
            AnalysisMode::Detailed => self.detailed_thinking_budget,
            AnalysisMode::Quick => self.quick_thinking_budget,
        }
    }
}

/// Gemini API request
#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    thinking_config: ThinkingConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

/// Gemini API response
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
    thought: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Error envelope: `{"error": {"code": 400, "message": "...", "status": "..."}}`
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

pub struct GeminiClient {
    settings: ClientSettings,
    http: Client,
}

impl GeminiClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| RockAiError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { settings, http })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            model
        )
    }

    fn build_request<'a>(&self, image: &ImagePayload, prompt: &'a str, mode: AnalysisMode) -> GeminiRequest<'a> {
        GeminiRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type,
                            data: image.to_base64(),
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                thinking_config: ThinkingConfig {
                    thinking_budget: self.settings.thinking_budget(mode),
                },
                temperature: self.settings.temperature,
            },
        }
    }
}

impl VisionModel for GeminiClient {
    fn generate(&self, image: &ImagePayload, prompt: &str, mode: AnalysisMode) -> Result<String> {
        let model = self.settings.model(mode);
        let url = self.endpoint(model);
        let request = self.build_request(image, prompt, mode);

        info!("calling {} ({} mode, {} image bytes)", model, mode, image.bytes.len());
        let started = Instant::now();

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&request)
            .send()
            .map_err(|e| RockAiError::Transport(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| RockAiError::Transport(format!("failed to read response body: {}", e)))?;

        info!("response {} in {:.2}s", status, started.elapsed().as_secs_f64());

        if !status.is_success() {
            return Err(classify_http_error(status, &body));
        }

        extract_text(&body)
    }
}

/// Map a non-success status to an error kind
fn classify_http_error(status: StatusCode, body: &str) -> RockAiError {
    let (message, api_status) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.chars().take(300).collect(), String::new()),
    };

    let key_rejected = body.contains("API_KEY_INVALID") || message.contains("API key not valid");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RockAiError::Authentication(message),
        StatusCode::BAD_REQUEST if key_rejected => RockAiError::Authentication(message),
        _ if api_status.is_empty() => RockAiError::Transport(format!("HTTP {}: {}", status, message)),
        _ => RockAiError::Transport(format!("HTTP {} ({}): {}", status, api_status, message)),
    }
}

/// Concatenate the answer text of the first candidate, skipping thought parts
fn extract_text(body: &str) -> Result<String> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| RockAiError::Transport(format!("unreadable response body: {}", e)))?;

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(RockAiError::Transport(format!("prompt blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| RockAiError::Transport("response contains no candidates".into()))?;

    let text: String = candidate
        .content
        .as_ref()
        .map(|c| {
            c.parts
                .iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(RockAiError::Transport(format!(
            "empty response (finish reason: {})",
            reason
        )));
    }

    debug!("response text: {} chars", text.len());
    Ok(text)
}
