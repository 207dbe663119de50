//! Form feedback returned to the patient.

use motion_metrics::MetricsRecord;
use serde::{Deserialize, Serialize};

/// Feedback on one exercise attempt.
///
/// Every field has a default so a partial scorer reply still parses; the
/// values are relayed as the scorer produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormFeedback {
    /// 0-100; 0 also marks the canned error results
    pub overall_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_performed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_correct_exercise: Option<bool>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub safety_checks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_feedback: Option<String>,
    pub encouragement: String,
    pub next_steps: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_issue: Option<bool>,
}

impl FormFeedback {
    /// Result for an attempt where the camera captured nothing
    pub fn no_pose_data() -> Self {
        Self {
            overall_score: 0.0,
            error: true,
            network_issue: Some(false),
            improvements: vec![
                "No pose data was captured during the exercise".to_string(),
                "Make sure you are visible in the camera".to_string(),
                "Try recording again with better lighting".to_string(),
            ],
            safety_checks: vec![
                "Ensure camera has permission to access webcam".to_string(),
                "Check that you are within camera frame".to_string(),
            ],
            encouragement: "Let's try again! Make sure your full body is visible.".to_string(),
            next_steps: "Record your exercise again, ensuring you are fully visible in the frame."
                .to_string(),
            ..Self::default()
        }
    }

    /// Result for a scorer that failed outright
    pub fn analysis_failed(reason: &str, network_issue: bool) -> Self {
        let improvement = if network_issue {
            "No internet connection detected. Please check your network and try again.".to_string()
        } else {
            format!("Analysis failed: {}. Please try recording your exercise again.", reason)
        };

        Self {
            overall_score: 0.0,
            error: true,
            network_issue: Some(network_issue),
            improvements: vec![improvement],
            safety_checks: vec![
                "Make sure you have a stable internet connection".to_string(),
                "Ensure proper lighting and camera positioning".to_string(),
            ],
            encouragement: "Don't give up! Technical issues happen.".to_string(),
            next_steps: "Try again when your connection is stable.".to_string(),
            ..Self::default()
        }
    }

    /// Generic feedback for a tracked attempt whose scorer reply could not
    /// be read
    pub fn tracking_default(metrics: &MetricsRecord) -> Self {
        Self {
            overall_score: 75.0,
            exercise_performed: Some(metrics.exercise_name.clone()),
            was_correct_exercise: Some(true),
            strengths: vec![
                "Completed the exercise".to_string(),
                "Good effort in performing movements".to_string(),
            ],
            improvements: vec![
                "Focus on maintaining proper form throughout".to_string(),
                "Work on movement consistency".to_string(),
            ],
            safety_checks: vec!["Continue monitoring pain levels during exercise".to_string()],
            form_analysis: Some(
                "Exercise completed with reasonable form based on pose tracking data.".to_string(),
            ),
            specific_feedback: Some(format!(
                "Movement detected across {} frames over {:.1} seconds.",
                metrics.frames, metrics.duration
            )),
            encouragement:
                "Great work! Keep practicing and you'll see improvement in your rehabilitation."
                    .to_string(),
            next_steps:
                "Continue with prescribed exercises and gradually increase intensity as pain allows."
                    .to_string(),
            ..Self::default()
        }
    }
}
