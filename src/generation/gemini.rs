//! Gemini `generateContent` client.
//!
//! Sends inline image parts plus one text instruction and asks for an
//! image-only response. The first candidate part carrying inline image data
//! is the result; anything else is a failure.

use std::time::Instant;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::ImageAsset;
use crate::utils::{GenerationError, GenerationResult};
use super::{GenerationRequest, ImageGenerator};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// MIME type assumed when the service omits one.
const DEFAULT_RESPONSE_MIME: &str = "image/png";
/// Longest error body kept from a failed response.
const MAX_ERROR_BODY: usize = 512;

// ── Wire types ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "inline_data")]
    inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default, alias = "mime_type")]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

// ── Request / response mapping ──────────────────────────────────────────────────

/// Images first, in payload order, then the instruction.
fn build_request_body(request: &GenerationRequest) -> GenerateContentRequest {
    let mut parts: Vec<Part> = request
        .images
        .iter()
        .map(|image| Part {
            inline_data: Some(InlineData {
                mime_type: Some(image.mime_type().to_string()),
                data: image.to_base64(),
            }),
            text: None,
        })
        .collect();

    parts.push(Part {
        inline_data: None,
        text: Some(request.instruction.clone()),
    });

    GenerateContentRequest {
        contents: vec![RequestContent { parts }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE"],
        },
    }
}

fn extract_image(response: GenerateContentResponse) -> GenerationResult<ImageAsset> {
    let inline = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| {
            content
                .parts
                .into_iter()
                .find_map(|part| part.inline_data.filter(|inline| !inline.data.is_empty()))
        })
        .ok_or(GenerationError::NoImage)?;

    let bytes = BASE64.decode(inline.data.as_bytes())?;
    let mime_type = inline
        .mime_type
        .unwrap_or_else(|| DEFAULT_RESPONSE_MIME.to_string());

    Ok(ImageAsset::new(mime_type, bytes))
}

fn truncate_body(bytes: &[u8]) -> String {
    let body = String::from_utf8_lossy(bytes);
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.into_owned(),
    }
}

// ── Client ──────────────────────────────────────────────────────────────────────

/// REST client for the Gemini image model.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Builds the HTTP client once with the configured timeout.
    pub fn new(config: &Config) -> GenerationResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl ImageGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<ImageAsset> {
        let body = build_request_body(request);
        debug!(
            "Dispatching generateContent to {} with {} image part(s)",
            self.model,
            request.images.len()
        );

        let start = Instant::now();
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(
            "generateContent answered {} ({} bytes) in {}ms",
            status,
            bytes.len(),
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            warn!("Image service returned {}", status);
            return Err(GenerationError::Service {
                status: status.as_u16(),
                body: truncate_body(&bytes),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)
            .map_err(|e| GenerationError::malformed(format!("invalid JSON: {e}")))?;

        extract_image(parsed)
    }
}
