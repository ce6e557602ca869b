//! Google Gemini API client.
//!
//! Supports:
//! - Content generation (text, schema-constrained JSON, inline images)
//! - Streamed responses with grounding metadata
//! - Long-running video operations (submit, poll, download)
//!
//! A missing API key is not an error: the client is constructed in offline
//! mode and every integration consults [`GeminiClient::is_live`] before
//! talking to the platform.

use std::env;

use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GEMINI_API_URL;
use crate::{Error, Result};

/// Read the Gemini credential from the environment, if any.
///
/// `GEMINI_API_KEY` is preferred; `GOOGLE_API_KEY` is accepted as a
/// fallback. Blank values count as absent.
pub fn api_key_from_env() -> Option<String> {
    for var in ["GEMINI_API_KEY", "GOOGLE_API_KEY"] {
        if let Ok(value) = env::var(var) {
            let value = value.trim().to_string();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// Google Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client from the environment. A missing key yields an
    /// offline client rather than an error.
    pub fn from_env(model: &str) -> Result<Self> {
        Self::new(api_key_from_env(), model)
    }

    /// Create a client with an optional API key and a model.
    pub fn new(api_key: Option<String>, model: &str) -> Result<Self> {
        let api_key = api_key.and_then(|key| {
            let key = key.trim().to_string();
            if key.is_empty() {
                None
            } else {
                Some(key)
            }
        });

        let http = Client::builder()
            .user_agent("gentry_concierge/0.1.0")
            .build()
            .map_err(|e| Error::ConnectionError(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            base_url: GEMINI_API_URL.to_string(),
            model: model.to_string(),
        })
    }

    /// Set the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Point the client at a different API host (mock servers, proxies).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Whether a live credential is configured. The single capability
    /// check consulted by every integration before going online.
    pub fn is_live(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::GeminiError("API key is not configured".to_string()))
    }

    /// Single-shot content generation.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            self.key()?
        );

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::ConnectionError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::ConnectionError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::GeminiError(format!("{}: {}", status, text)));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::SerializationError(format!("Invalid Gemini response: {} - {}", e, text))
        })
    }

    /// Streamed content generation. Each parsed chunk envelope is handed to
    /// `on_chunk` in arrival order; the call returns once the stream ends.
    pub async fn stream_generate_content<F>(
        &self,
        request: &GenerateContentRequest,
        mut on_chunk: F,
    ) -> Result<()>
    where
        F: FnMut(GenerateContentResponse),
    {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse&key={}",
            self.base_url,
            self.model,
            self.key()?
        );

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::ConnectionError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::GeminiError(format!("{}: {}", status, text)));
        }

        // Line-framed SSE/NDJSON; chunks may split anywhere, so buffer
        // partial lines between reads.
        let mut buf = String::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let bytes =
                chunk.map_err(|e| Error::ConnectionError(format!("Gemini stream error: {}", e)))?;
            buf.push_str(&String::from_utf8_lossy(&bytes));

            while let Some(pos) = buf.find('\n') {
                let line: String = buf.drain(..=pos).collect();
                if let Some(parsed) = parse_stream_line(line.trim_end()) {
                    on_chunk(parsed);
                }
            }
        }

        // Trailing line without a newline terminator
        if let Some(parsed) = parse_stream_line(buf.trim_end()) {
            on_chunk(parsed);
        }

        Ok(())
    }

    /// Submit a long-running video generation job. Returns the operation
    /// handle to poll.
    pub async fn start_video_generation(
        &self,
        body: &serde_json::Value,
    ) -> Result<VideoOperation> {
        let url = format!(
            "{}/models/{}:predictLongRunning?key={}",
            self.base_url,
            self.model,
            self.key()?
        );

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::ConnectionError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::ConnectionError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::GeminiError(format!("{}: {}", status, text)));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::SerializationError(format!("Invalid operation response: {} - {}", e, text))
        })
    }

    /// Fetch the current state of a long-running operation by name.
    pub async fn get_video_operation(&self, name: &str) -> Result<VideoOperation> {
        let url = format!(
            "{}/{}?key={}",
            self.base_url,
            name.trim_start_matches('/'),
            self.key()?
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::ConnectionError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::ConnectionError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::GeminiError(format!("{}: {}", status, text)));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::SerializationError(format!("Invalid operation response: {} - {}", e, text))
        })
    }

    /// Download a platform-hosted binary, authenticating with the API key.
    pub async fn download(&self, uri: &str) -> Result<Vec<u8>> {
        let separator = if uri.contains('?') { '&' } else { '?' };
        let url = format!("{}{}key={}", uri, separator, self.key()?);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::ConnectionError(format!("Download failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::GeminiError(format!(
                "Failed to fetch video bytes: {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::ConnectionError(format!("Failed to read bytes: {}", e)))?;

        Ok(bytes.to_vec())
    }
}

fn parse_stream_line(line: &str) -> Option<GenerateContentResponse> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    // Server prefixes payload lines with "data: " in SSE framing
    let line = line.strip_prefix("data: ").unwrap_or(line);
    serde_json::from_str(line).ok()
}

// === Request structures ===

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "generationConfig")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "systemInstruction")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<serde_json::Value>>,
}

impl GenerateContentRequest {
    pub fn from_contents(contents: Vec<Content>) -> Self {
        Self {
            contents,
            generation_config: None,
            system_instruction: None,
            tools: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseMimeType")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseSchema")]
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

impl SystemInstruction {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

// === Response structures ===

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A single response part. Fields are optional because the platform mixes
/// text, inline media and tool parts freely within one candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(rename = "inlineData")]
    pub inline_data: Option<InlineData>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let mut out = String::new();
        for part in &content.parts {
            if let Some(text) = &part.text {
                out.push_str(text);
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    /// First inline media payload of the first candidate, if any.
    pub fn inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }

    pub fn grounding_metadata(&self) -> Option<&GroundingMetadata> {
        self.candidates.first()?.grounding_metadata.as_ref()
    }
}

// === Grounding metadata (maps/web citations) ===

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundingMetadata {
    #[serde(default, rename = "groundingChunks")]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps: Option<MapsSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapsSource {
    pub title: Option<String>,
    pub uri: Option<String>,
    #[serde(rename = "placeId")]
    pub place_id: Option<String>,
}

// === Long-running video operations ===

/// Handle for an in-flight video generation job. Polled by name until
/// `done` flips, then either `error` or `response` is populated.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoOperation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub error: Option<OperationError>,
    pub response: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperationError {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub status: Option<String>,
}

impl VideoOperation {
    /// URI of the first generated video. The platform has shipped two
    /// response layouts, so both are probed.
    pub fn first_video_uri(&self) -> Option<String> {
        let response = self.response.as_ref()?;

        let candidates = [
            &response["generateVideoResponse"]["generatedSamples"],
            &response["generatedVideos"],
        ];

        for videos in candidates {
            if let Some(uri) = videos[0]["video"]["uri"].as_str() {
                if !uri.is_empty() {
                    return Some(uri.to_string());
                }
            }
        }
        None
    }
}
