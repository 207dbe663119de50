//! Feedback service tying metrics extraction to a form scorer.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use motion_core::{ExerciseDescriptor, Frame, SessionId};
use motion_metrics::{compute_metrics, MetricsRecord};
use serde::{Deserialize, Serialize};

use crate::feedback::FormFeedback;
use crate::parse::parse_feedback_or;
use crate::request::{CaptureSession, ExercisePlan, FormAnalysisRequest, InjuryContext};
use crate::scorer::{FormScorer, ScorerConfig, ScorerError, ScorerResult};

/// Outcome of analysing one exercise attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnalysis {
    pub session_id: SessionId,
    pub generated_at: DateTime<Utc>,
    /// Absent when nothing was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsRecord>,
    pub feedback: FormFeedback,
}

/// Stateless front door for form analysis
pub struct FeedbackService {
    scorer: Arc<dyn FormScorer>,
    timeout: Duration,
}

impl FeedbackService {
    pub fn new(scorer: Arc<dyn FormScorer>, config: &ScorerConfig) -> Self {
        Self {
            scorer,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Analyse one attempt.
    ///
    /// Never fails: an empty history, a scorer error or an unreadable
    /// scorer reply each map to their canned feedback.
    pub async fn analyze(
        &self,
        history: &[Frame],
        exercise: Option<&ExerciseDescriptor>,
        plan: Option<ExercisePlan>,
        injury: Option<InjuryContext>,
    ) -> FormAnalysis {
        let session_id = SessionId::new();

        tracing::info!(
            "Analyzing exercise form for session {:?} with {} pose frames",
            session_id,
            history.len()
        );

        if history.is_empty() {
            tracing::warn!("No pose data captured for session {:?}", session_id);
            return Self::package(session_id, None, FormFeedback::no_pose_data());
        }

        let metrics = match compute_metrics(history, exercise) {
            Ok(metrics) => metrics,
            Err(e) => {
                tracing::error!("Metrics extraction failed: {}", e);
                let feedback = FormFeedback::analysis_failed(&e.to_string(), false);
                return Self::package(session_id, None, feedback);
            }
        };

        tracing::debug!(
            "Metrics: {} frames over {:.1}s, {:.0}% visibility, {} joint ranges",
            metrics.frames,
            metrics.duration,
            metrics.avg_visibility,
            metrics.angle_ranges().len()
        );

        let request = FormAnalysisRequest::new(metrics)
            .with_plan(plan)
            .with_injury(injury);

        let feedback = match self.score_with_timeout(&request).await {
            Ok(text) => {
                parse_feedback_or(&text, FormFeedback::tracking_default(&request.pose_metrics))
            }
            Err(e) => {
                tracing::warn!("Scorer {} failed: {}", self.scorer.name(), e);
                FormFeedback::analysis_failed(&e.to_string(), e.is_network())
            }
        };

        tracing::info!(
            "Form analysis complete for session {:?}: score {}",
            session_id,
            feedback.overall_score
        );

        Self::package(session_id, Some(request.pose_metrics), feedback)
    }

    /// Analyse a recorded capture session
    pub async fn analyze_session(&self, session: &CaptureSession) -> FormAnalysis {
        self.analyze(
            &session.history,
            session.exercise.as_ref(),
            session.exercise_plan.clone(),
            session.injury_analysis.clone(),
        )
        .await
    }

    async fn score_with_timeout(&self, request: &FormAnalysisRequest) -> ScorerResult<String> {
        match tokio::time::timeout(self.timeout, self.scorer.score(request)).await {
            Ok(result) => result,
            Err(_) => Err(ScorerError::Timeout(self.timeout.as_millis() as u64)),
        }
    }

    fn package(
        session_id: SessionId,
        metrics: Option<MetricsRecord>,
        feedback: FormFeedback,
    ) -> FormAnalysis {
        FormAnalysis {
            session_id,
            generated_at: Utc::now(),
            metrics,
            feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::HeuristicScorer;
    use async_trait::async_trait;
    use motion_core::{Landmark, PoseLandmark, Timestamp};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scorer returning a fixed reply and counting calls
    struct CannedScorer {
        reply: ScorerResult<String>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl CannedScorer {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }

        fn failing(err: ScorerError) -> Self {
            Self {
                reply: Err(err),
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl FormScorer for CannedScorer {
        fn name(&self) -> &str {
            "Canned"
        }

        async fn score(&self, _request: &FormAnalysisRequest) -> ScorerResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(ScorerError::Network(msg)) => Err(ScorerError::Network(msg.clone())),
                Err(e) => Err(ScorerError::Llm(e.to_string())),
            }
        }
    }

    fn history() -> Vec<Frame> {
        (0..3)
            .map(|i| {
                let mut frame = Frame::empty(Timestamp(i as f64 * 500.0));
                frame.set(PoseLandmark::LeftHip, Landmark::new(0.5, 0.2).with_visibility(1.0));
                frame.set(PoseLandmark::LeftKnee, Landmark::new(0.5, 0.5).with_visibility(1.0));
                frame.set(PoseLandmark::LeftAnkle, Landmark::new(0.8, 0.5).with_visibility(1.0));
                frame
            })
            .collect()
    }

    fn service(scorer: Arc<dyn FormScorer>) -> FeedbackService {
        FeedbackService::new(scorer, &ScorerConfig::default())
    }

    #[tokio::test]
    async fn test_empty_history_skips_scorer() {
        let scorer = Arc::new(CannedScorer::replying(r#"{"overallScore": 99}"#));
        let analysis = service(scorer.clone()).analyze(&[], None, None, None).await;

        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);
        assert!(analysis.metrics.is_none());
        assert_eq!(analysis.feedback.overall_score, 0.0);
        assert!(analysis.feedback.error);
        assert!(!analysis.feedback.improvements.is_empty());
    }

    #[tokio::test]
    async fn test_scorer_reply_relayed() {
        let scorer = Arc::new(CannedScorer::replying(
            "```json\n{\"overallScore\": 91, \"encouragement\": \"Great depth\"}\n```",
        ));
        let exercise = ExerciseDescriptor::new("Squat");
        let analysis = service(scorer.clone())
            .analyze(&history(), Some(&exercise), None, None)
            .await;

        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(analysis.feedback.overall_score, 91.0);
        assert_eq!(analysis.feedback.encouragement, "Great depth");

        let metrics = analysis.metrics.unwrap();
        assert_eq!(metrics.frames, 3);
        assert_eq!(metrics.exercise_name, "Squat");
        assert!((metrics.knee_range.unwrap().avg - 90.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_unparseable_reply_uses_tracking_default() {
        let scorer = Arc::new(CannedScorer::replying("Sorry, I can't score this."));
        let analysis = service(scorer).analyze(&history(), None, None, None).await;

        assert_eq!(analysis.feedback.overall_score, 75.0);
        assert!(!analysis.feedback.error);
        assert_eq!(
            analysis.feedback.specific_feedback.as_deref(),
            Some("Movement detected across 3 frames over 1.0 seconds.")
        );
    }

    #[tokio::test]
    async fn test_network_failure() {
        let scorer = Arc::new(CannedScorer::failing(ScorerError::Network("offline".to_string())));
        let analysis = service(scorer).analyze(&history(), None, None, None).await;

        assert!(analysis.feedback.error);
        assert_eq!(analysis.feedback.network_issue, Some(true));
        assert!(analysis.metrics.is_some());
    }

    #[tokio::test]
    async fn test_timeout() {
        let mut scorer = CannedScorer::replying(r#"{"overallScore": 50}"#);
        scorer.delay = Duration::from_millis(200);
        let config = ScorerConfig {
            timeout_ms: 10,
            ..ScorerConfig::default()
        };
        let analysis = FeedbackService::new(Arc::new(scorer), &config)
            .analyze(&history(), None, None, None)
            .await;

        assert!(analysis.feedback.error);
        assert_eq!(analysis.feedback.network_issue, Some(false));
        assert!(analysis.feedback.improvements[0].contains("Timeout after 10ms"));
    }

    #[tokio::test]
    async fn test_session_with_heuristic_scorer() {
        let session = CaptureSession {
            history: history(),
            exercise: Some(ExerciseDescriptor::new("Wall Sit")),
            exercise_plan: None,
            injury_analysis: Some(InjuryContext {
                injury_type: "Tendinopathy".to_string(),
                pain_location: "left knee".to_string(),
            }),
        };

        let service = service(Arc::new(HeuristicScorer::default()));
        let analysis = service.analyze_session(&session).await;

        assert_eq!(service.scorer_name(), "Heuristic");
        assert!(!analysis.feedback.error);
        assert_eq!(analysis.feedback.exercise_performed.as_deref(), Some("Wall Sit"));
        assert!(analysis.feedback.overall_score > 0.0);
    }
}
