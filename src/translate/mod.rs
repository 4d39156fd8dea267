pub mod google;
pub mod languages;

use async_trait::async_trait;
use thiserror::Error;

pub use google::GoogleTranslator;

/// Source language sent to the provider; detection is always left to it.
pub const AUTO_DETECT: &str = "auto";

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("text to translate is empty")]
    EmptyInput,

    #[error("text is too long ({chars} characters, limit {limit})")]
    TooLong { chars: usize, limit: usize },

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("translation service rate limit reached, try again later")]
    RateLimited,

    #[error("translation service error ({status}): {body}")]
    Provider { status: u16, body: String },

    #[error("request to translation service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response from translation service: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    /// Target language as given by the user
    pub target: String,
    pub source: &'static str,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
            source: AUTO_DETECT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Source language reported by the provider, if any
    pub detected_source: Option<String>,
}

/// A machine-translation provider
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError>;
}
