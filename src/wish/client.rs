//! Text-generation client for holiday wishes.

use serde::{Deserialize, Serialize};

use crate::constants::wish_text;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Sampling parameters sent with every request.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_output_tokens: 60,
        }
    }
}

/// Why a wish could not be generated. Every variant is recovered by showing
/// the fallback greeting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WishError {
    #[error("API key missing")]
    MissingCredential,

    #[error("request failed: {0}")]
    Request(String),

    #[error("service returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response contained no text")]
    EmptyResponse,
}

/// Anything that turns a prompt into a one-sentence wish.
pub trait WishGenerator: Send + Sync + 'static {
    fn generate(&self, prompt: &str) -> Result<String, WishError>;
}

/// Build the user prompt for `input`, substituting the default interest when
/// the input is blank.
pub fn compose_prompt(input: &str) -> String {
    let interest = input.trim();
    let interest = if interest.is_empty() {
        wish_text::DEFAULT_INTEREST
    } else {
        interest
    };
    format!("{}{}", wish_text::PROMPT_PREFIX, interest)
}

/// Map a generation result to the sentence to display and an optional error
/// description for diagnostics.
pub fn resolve_wish(result: Result<String, WishError>) -> (String, Option<String>) {
    match result {
        Ok(text) if !text.trim().is_empty() => (text.trim().to_string(), None),
        Ok(_) => (
            wish_text::FALLBACK.to_string(),
            Some(WishError::EmptyResponse.to_string()),
        ),
        Err(e) => (wish_text::FALLBACK.to_string(), Some(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Serialize the request body for `prompt`.
pub fn request_body(prompt: &str, config: GenerationConfig) -> Result<String, WishError> {
    let request = GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: wish_text::SYSTEM_INSTRUCTION,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: prompt }],
        }],
        generation_config: config,
    };
    serde_json::to_string(&request).map_err(|e| WishError::Malformed(e.to_string()))
}

/// Pull the trimmed text of the first candidate out of a response body.
pub fn extract_text(body: &str) -> Result<String, WishError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| WishError::Malformed(e.to_string()))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(WishError::EmptyResponse);
    }
    Ok(text.to_string())
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    pub config: GenerationConfig,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            config: GenerationConfig::default(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.model)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WishGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, WishError> {
        if self.api_key.is_empty() {
            return Err(WishError::MissingCredential);
        }

        let body = request_body(prompt, self.config)?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("bevy_holiday_tree/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WishError::Request(format!("client error: {}", e)))?;

        let response = client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .map_err(|e| WishError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| WishError::Request(format!("failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(WishError::Status {
                code: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        extract_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_uses_input() {
        assert_eq!(
            compose_prompt("  snowy mountains "),
            "Create a luxurious, magical holiday wish for someone who loves: snowy mountains"
        );
    }

    #[test]
    fn blank_prompt_uses_default_interest() {
        assert_eq!(
            compose_prompt("   "),
            format!("{}{}", wish_text::PROMPT_PREFIX, wish_text::DEFAULT_INTEREST)
        );
    }

    #[test]
    fn request_body_carries_generation_config() {
        let body = request_body("hello", GenerationConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        let config = &value["generationConfig"];
        assert!((config["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
        assert_eq!(config["maxOutputTokens"], 60);
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            wish_text::SYSTEM_INSTRUCTION
        );
        assert!(value["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn extracts_and_trims_first_candidate() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "  May gold " }, { "text": "light your way.\n" } ] } },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        }"#;
        assert_eq!(extract_text(body).unwrap(), "May gold light your way.");
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        assert_eq!(extract_text("{}"), Err(WishError::EmptyResponse));
        assert_eq!(
            extract_text(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#),
            Err(WishError::EmptyResponse)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(extract_text("<html>"), Err(WishError::Malformed(_))));
    }

    #[test]
    fn resolve_trims_success() {
        let (text, error) = resolve_wish(Ok("  Shine on.  ".into()));
        assert_eq!(text, "Shine on.");
        assert_eq!(error, None);
    }

    #[test]
    fn resolve_falls_back_on_error() {
        let (text, error) = resolve_wish(Err(WishError::Request("timed out".into())));
        assert_eq!(text, "May elegance guide your way into the New Year.");
        assert_eq!(error.as_deref(), Some("request failed: timed out"));
    }

    #[test]
    fn resolve_falls_back_on_blank_success() {
        let (text, error) = resolve_wish(Ok("   ".into()));
        assert_eq!(text, wish_text::FALLBACK);
        assert!(error.is_some());
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new("key", "gemini-2.5-flash");
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(!format!("{client:?}").contains("api_key"));
    }

    #[test]
    fn empty_key_never_hits_the_network() {
        let client = GeminiClient::new("", "gemini-2.5-flash");
        assert_eq!(client.generate("hi"), Err(WishError::MissingCredential));
    }
}
