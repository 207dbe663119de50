//! Remote text-generation seam for LLM-backed scoring.

use async_trait::async_trait;

use crate::request::FormAnalysisRequest;
use crate::scorer::{FormScorer, ScorerConfig, ScorerResult};

/// Hosted model that turns a JSON payload into free-form text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, payload: &str, config: &ScorerConfig) -> ScorerResult<String>;
}

/// Scorer that forwards the serialized request to a [`TextGenerator`]
pub struct GeneratorScorer<G> {
    generator: G,
    config: ScorerConfig,
    name: String,
}

impl<G: TextGenerator> GeneratorScorer<G> {
    pub fn new(generator: G, config: ScorerConfig) -> Self {
        let name = format!("Generator({})", config.model);
        Self {
            generator,
            config,
            name,
        }
    }
}

#[async_trait]
impl<G: TextGenerator> FormScorer for GeneratorScorer<G> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn score(&self, request: &FormAnalysisRequest) -> ScorerResult<String> {
        self.validate(request)?;

        let payload = serde_json::to_string(request)?;
        tracing::debug!(
            "Sending {} byte form analysis payload to {}",
            payload.len(),
            self.config.model
        );

        self.generator.generate(&payload, &self.config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::ScorerError;
    use motion_core::{Frame, Timestamp};
    use motion_metrics::compute_metrics;

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, payload: &str, config: &ScorerConfig) -> ScorerResult<String> {
            Ok(format!("model={} payload={}", config.model, payload))
        }
    }

    struct OfflineGenerator;

    #[async_trait]
    impl TextGenerator for OfflineGenerator {
        async fn generate(&self, _payload: &str, _config: &ScorerConfig) -> ScorerResult<String> {
            Err(ScorerError::Network("connection refused".to_string()))
        }
    }

    fn request() -> FormAnalysisRequest {
        let metrics = compute_metrics(&[Frame::empty(Timestamp(0.0))], None).unwrap();
        FormAnalysisRequest::new(metrics)
    }

    #[tokio::test]
    async fn test_payload_forwarded_as_json() {
        let scorer = GeneratorScorer::new(EchoGenerator, ScorerConfig::default());
        let text = scorer.score(&request()).await.unwrap();

        assert!(text.starts_with("model=gemini-2.0-flash-exp"));
        assert!(text.contains(r#""poseMetrics":{"frames":1"#));
        assert_eq!(scorer.name(), "Generator(gemini-2.0-flash-exp)");
    }

    #[tokio::test]
    async fn test_generator_error_propagates() {
        let scorer = GeneratorScorer::new(OfflineGenerator, ScorerConfig::default());
        let err = scorer.score(&request()).await.unwrap_err();
        assert!(err.is_network());
    }
}
