//! Base scorer trait and common types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::request::FormAnalysisRequest;

/// Result type for scorer operations
pub type ScorerResult<T> = Result<T, ScorerError>;

/// Scorer error types
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error("LLM inference error: {0}")]
    Llm(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ScorerError {
    fn from(e: serde_json::Error) -> Self {
        ScorerError::Serialization(e.to_string())
    }
}

impl ScorerError {
    /// Connectivity failures, reported to the patient differently
    pub fn is_network(&self) -> bool {
        matches!(self, ScorerError::Network(_))
    }
}

/// Turns a form analysis request into raw feedback text.
///
/// Implementations return text rather than typed feedback: remote models
/// answer in free form, and parsing happens once in the service.
#[async_trait]
pub trait FormScorer: Send + Sync {
    /// Scorer name/identifier
    fn name(&self) -> &str;

    async fn score(&self, request: &FormAnalysisRequest) -> ScorerResult<String>;

    /// Optional: validate the request before scoring
    fn validate(&self, request: &FormAnalysisRequest) -> ScorerResult<()> {
        if request.pose_metrics.frames == 0 {
            Err(ScorerError::InvalidInput("Metrics cover no frames".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Scorer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Model to use (e.g., "gemini-2.0-flash-exp")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-exp".to_string(),
            temperature: 0.5,
            max_tokens: 1500,
            timeout_ms: 30_000,
        }
    }
}
