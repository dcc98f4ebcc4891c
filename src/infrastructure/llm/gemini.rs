//! Gemini model provider
//!
//! Calls the Generative Language REST API (`models/{model}:generateContent`)
//! in JSON response mode, passing the flow's output schema as
//! `responseSchema` and media parts as inline data.

use crate::core::{ModelConfig, ModelError};
use crate::domain::repositories::{LanguageModel, ModelRequest, PromptPart};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// Header carrying the API key; request URLs stay key-free
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini-backed [`LanguageModel`]
pub struct GeminiModel {
    client: Client,
    model: String,
    base_url: Url,
    api_version: String,
}

impl GeminiModel {
    /// Creates the provider from configuration
    ///
    /// Fails without an API key or with an unparsable base URL.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ModelError::MissingApiKey)?;

        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| ModelError::Unavailable(format!("invalid base url: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path().trim_end_matches('/'));
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(&api_key)
            .map_err(|_| ModelError::Unavailable("api key is not a valid header value".into()))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ModelError::Unavailable(format!("client build failed: {e}")))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url,
            api_version: config.api_version.clone(),
        })
    }

    fn endpoint(&self) -> Result<Url, ModelError> {
        let version = self.api_version.trim_matches('/');
        let path = format!("{version}/models/{}:generateContent", self.model);
        self.base_url
            .join(&path)
            .map_err(|e| ModelError::Unavailable(format!("endpoint build failed: {e}")))
    }
}

/// Builds the `generateContent` request body
pub(crate) fn request_body(request: &ModelRequest) -> Value {
    let parts: Vec<Value> = request
        .parts
        .iter()
        .map(|part| match part {
            PromptPart::Text(text) => json!({ "text": text }),
            PromptPart::Media { mime_type, data } => json!({
                "inlineData": { "mimeType": mime_type, "data": data }
            }),
        })
        .collect();

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": request.output_schema,
        }
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Extracts the structured answer from a `generateContent` response
pub(crate) fn parse_answer(body: Value) -> Result<Value, ModelError> {
    let response: GenerateContentResponse =
        serde_json::from_value(body).map_err(|e| ModelError::Decode(e.to_string()))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        return match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(ModelError::Blocked(reason)),
            None => Err(ModelError::EmptyResponse),
        };
    };

    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return match candidate.finish_reason {
            Some(reason) if reason != "STOP" => Err(ModelError::Blocked(reason)),
            _ => Err(ModelError::EmptyResponse),
        };
    }

    serde_json::from_str(strip_code_fence(&text)).map_err(|e| ModelError::Decode(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn map_http_error(status: StatusCode, body: String) -> ModelError {
    match status {
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            ModelError::Unavailable(format!("HTTP {}: {body}", status.as_u16()))
        }
        _ => ModelError::Http {
            status: status.as_u16(),
            body,
        },
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: ModelRequest) -> Result<Value, ModelError> {
        let endpoint = self.endpoint()?;
        let body = request_body(&request);

        let response = self
            .client
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Unavailable(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unavailable>".into());
            tracing::warn!(flow = %request.flow, status = status.as_u16(), "model request rejected");
            return Err(map_http_error(status, body));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.without_url().to_string()))?;
        parse_answer(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_schema_and_inline_media() {
        let request = ModelRequest {
            flow: "f".into(),
            parts: vec![
                PromptPart::Text("look at ".into()),
                PromptPart::Media {
                    mime_type: "text/plain".into(),
                    data: "b2s=".into(),
                },
            ],
            output_schema: json!({"type": "OBJECT"}),
        };
        let body = request_body(&request);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "look at ");
        assert_eq!(body["contents"][0]["parts"][1]["inlineData"]["data"], "b2s=");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn parses_candidate_text_as_json() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"summary\":" }, { "text": "\"ok\"}" }] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(parse_answer(body).unwrap(), json!({"summary": "ok"}));
    }

    #[test]
    fn fenced_answer_is_accepted() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "```json\n{\"a\":1}\n```" }] } }]
        });
        assert_eq!(parse_answer(body).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn blocked_prompt_is_reported() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(matches!(parse_answer(body), Err(ModelError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn endpoint_carries_no_query() {
        let config = ModelConfig {
            api_key: Some("SUPERSECRETKEY123".into()),
            ..ModelConfig::default()
        };
        let model = GeminiModel::from_config(&config).unwrap();
        let url = model.endpoint().unwrap();
        assert!(url.query().is_none());
        assert!(url.path().ends_with(":generateContent"));
        assert!(!url.as_str().contains("SUPERSECRETKEY123"));
    }

    #[test]
    fn missing_key_is_rejected() {
        let config = ModelConfig::default();
        assert!(matches!(
            GeminiModel::from_config(&config),
            Err(ModelError::MissingApiKey)
        ));
    }
}
