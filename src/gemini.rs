//! Utilities for querying the Gemini API via the `generateContent` endpoint.
//!
//! For specific details on request/response schemas, see the [Gemini API generateContent docs](https://ai.google.dev/api/generate-content).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::cli::{Model, DEFAULT_BASE_URL};
use crate::errors::{CallError, ExtractError};

/// Printed in place of a reply when a response has no usable text.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process that.";

/// A `generateContent` text part
#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A `generateContent` content, either sent in `contents` or returned in a candidate
#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A `generateContent` request body
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A request with one content holding exactly one text part.
    pub fn from_text(text: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(text.to_string()),
                }],
            }],
        }
    }
}

/// A `generateContent` response candidate
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

/// A `generateContent` success response
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Error envelope the API returns alongside non-2xx statuses
#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Status and raw body of an HTTP response
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Sends a JSON POST and hands back the raw reply. Non-2xx statuses are not errors at this level.
pub trait Transport {
    fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &GenerateContentRequest,
    ) -> Result<HttpReply, reqwest::Error>;
}

/// Blocking `reqwest` transport
///
/// Errors are stripped of their URL since it carries the `key` query parameter.
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        ReqwestTransport {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Use a preconfigured client, e.g. one with a timeout or proxy settings.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        ReqwestTransport { client }
    }
}

impl Transport for ReqwestTransport {
    fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &GenerateContentRequest,
    ) -> Result<HttpReply, reqwest::Error> {
        let response = self
            .client
            .post(url)
            .query(query)
            .json(body)
            .send()
            .map_err(reqwest::Error::without_url)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(reqwest::Error::without_url)?;
        Ok(HttpReply { status, body })
    }
}

/// Client for one model, authenticated with one API key
pub struct GeminiClient<T: Transport> {
    transport: T,
    api_key: String,
    model: Model,
    base_url: String,
}

impl<T: Transport> GeminiClient<T> {
    pub fn new(transport: T, api_key: impl Into<String>, model: Model) -> Self {
        GeminiClient {
            transport,
            api_key: api_key.into(),
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The underlying transport, for inspecting a stub after a chat.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The endpoint URL, without the `key` query parameter.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send `text` as a single-turn request and return the decoded JSON response.
    ///
    /// Logs one entry for the request and one for the outcome. The API key is never logged.
    pub fn generate(&self, text: &str) -> Result<Value, CallError> {
        let request = GenerateContentRequest::from_text(text);
        info!("API Request: {}", serde_json::to_string(&request)?);
        debug!(model = %self.model, "POST {}", self.endpoint());

        match self.send(&request) {
            Ok((raw, response)) => {
                info!("API Response: {}", raw);
                Ok(response)
            }
            Err(e) => {
                error!("API Error: {}", e);
                Err(e)
            }
        }
    }

    fn send(&self, request: &GenerateContentRequest) -> Result<(String, Value), CallError> {
        let reply = self.transport.post_json(
            &self.endpoint(),
            &[("key", self.api_key.as_str())],
            request,
        )?;
        if !(200..300).contains(&reply.status) {
            return Err(status_error(&reply));
        }
        let response = serde_json::from_str(&reply.body)?;
        Ok((reply.body, response))
    }
}

/// Build a status error, preferring the message from the API's error envelope.
fn status_error(reply: &HttpReply) -> CallError {
    let reason = reqwest::StatusCode::from_u16(reply.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
        .to_string();
    let message = serde_json::from_str::<ApiErrorResponse>(&reply.body)
        .map(|r| r.error.message)
        .unwrap_or_else(|_| reply.body.trim().to_string());
    CallError::Status {
        status: reply.status,
        reason,
        message,
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a decoded response
pub fn first_text(response: &Value) -> Result<String, ExtractError> {
    let response = GenerateContentResponse::deserialize(response)?;
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ExtractError::NoCandidates)?;
    let content = candidate.content.ok_or(ExtractError::NoContent)?;
    let part = content
        .parts
        .into_iter()
        .next()
        .ok_or(ExtractError::NoParts)?;
    part.text.ok_or(ExtractError::NoText)
}

/// The reply text of a response, or [`FALLBACK_REPLY`] if it has none
pub fn extract_text(response: &Value) -> String {
    first_text(response).unwrap_or_else(|e| {
        error!("Error extracting text: {}", e);
        FALLBACK_REPLY.to_string()
    })
}
