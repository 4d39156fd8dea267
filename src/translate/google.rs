use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::{languages, TranslateError, Translation, TranslationRequest, Translator};
use crate::config::TranslationConfig;

/// Longest input the public endpoint accepts in one request
pub const MAX_INPUT_CHARS: usize = 5000;

/// Client for the public Google Translate endpoint (`client=gtx`).
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(config: &TranslationConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Check the request before spending a network round trip on it.
    /// Returns the provider's code for the target language.
    fn validate(request: &TranslationRequest) -> Result<&'static str, TranslateError> {
        if request.text.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let chars = request.text.chars().count();
        if chars > MAX_INPUT_CHARS {
            return Err(TranslateError::TooLong {
                chars,
                limit: MAX_INPUT_CHARS,
            });
        }

        languages::resolve(&request.target)
            .ok_or_else(|| TranslateError::UnsupportedLanguage(request.target.clone()))
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        let target = Self::validate(request)?;
        let url = format!("{}/translate_a/single", self.base_url);

        debug!(
            "Translating {} chars {} -> {}",
            request.text.chars().count(),
            request.source,
            target
        );

        // Text goes in the form body so long documents don't exceed URL limits
        let response = self
            .client
            .post(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", request.source),
                ("tl", target),
                ("dt", "t"),
            ])
            .form(&[("q", request.text.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Translation provider rate limit hit");
            return Err(TranslateError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Translation provider error: {} - {}", status, body);
            return Err(TranslateError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        let translation = parse_response(&body)?;

        debug!(
            "Translated into {} chars (detected source: {:?})",
            translation.text.chars().count(),
            translation.detected_source
        );
        Ok(translation)
    }
}

/// The endpoint answers with nested arrays: `[0][*][0]` are the translated
/// segments, `[2]` the detected source language.
fn parse_response(body: &Value) -> Result<Translation, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::MalformedResponse("missing segment array".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(TranslateError::MalformedResponse(
            "empty translation".to_string(),
        ));
    }

    let detected_source = body.get(2).and_then(Value::as_str).map(str::to_string);

    Ok(Translation {
        text,
        detected_source,
    })
}
