//! Payload handed to form scorers.

use motion_core::{ExerciseDescriptor, Frame};
use motion_metrics::MetricsRecord;
use serde::{Deserialize, Serialize};

/// Prescribed exercise details from the patient's plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePlan {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Patient injury context from the photo assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjuryContext {
    pub injury_type: String,
    pub pain_location: String,
}

/// Everything a scorer sees for one attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnalysisRequest {
    pub pose_metrics: MetricsRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_plan: Option<ExercisePlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury_analysis: Option<InjuryContext>,
}

impl FormAnalysisRequest {
    pub fn new(pose_metrics: MetricsRecord) -> Self {
        Self {
            pose_metrics,
            exercise_plan: None,
            injury_analysis: None,
        }
    }

    pub fn with_plan(mut self, plan: Option<ExercisePlan>) -> Self {
        self.exercise_plan = plan;
        self
    }

    pub fn with_injury(mut self, injury: Option<InjuryContext>) -> Self {
        self.injury_analysis = injury;
        self
    }

    /// Name of the exercise the patient was asked to perform
    pub fn exercise_name(&self) -> &str {
        match &self.exercise_plan {
            Some(plan) if self.pose_metrics.exercise_name == motion_metrics::UNKNOWN_EXERCISE => {
                &plan.name
            }
            _ => &self.pose_metrics.exercise_name,
        }
    }

    pub fn pain_location(&self) -> Option<&str> {
        self.injury_analysis.as_ref().map(|i| i.pain_location.as_str())
    }
}

/// A recorded capture session, as written by the capture layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSession {
    #[serde(default)]
    pub history: Vec<Frame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_plan: Option<ExercisePlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury_analysis: Option<InjuryContext>,
}
