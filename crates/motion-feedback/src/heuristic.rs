//! Local rule-based form scorer.
//!
//! Scores an attempt from the metrics record alone, without a remote model.
//! Only joints relevant to the injury location are discussed. The overall
//! score weighs form quality 40%, safety 30%, movement amplitude 20% and
//! consistency 10%.

use async_trait::async_trait;
use motion_metrics::{Joint, MetricsRecord, ANGLE_JOINTS};
use serde::{Deserialize, Serialize};

use crate::feedback::FormFeedback;
use crate::request::FormAnalysisRequest;
use crate::scorer::{FormScorer, ScorerResult};

/// Thresholds for the heuristic scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicThresholds {
    /// Visibility percentage below which tracking is considered poor
    pub min_visibility: f64,
    /// Angle span (degrees) below which a joint barely moved
    pub min_span_degrees: f64,
    /// Angle span (degrees) earning full amplitude credit
    pub full_span_degrees: f64,
    /// Body stability above which hips are considered swaying
    pub max_body_stability: f64,
    /// Body stability at which safety credit reaches zero
    pub unstable_body_stability: f64,
    /// Shortest capture worth scoring as a full set
    pub min_duration_secs: f64,
    /// Frames earning full consistency credit
    pub consistent_frames: usize,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            min_visibility: 50.0,
            min_span_degrees: 15.0,
            full_span_degrees: 90.0,
            max_body_stability: 0.01,
            unstable_body_stability: 0.05,
            min_duration_secs: 5.0,
            consistent_frames: 30,
        }
    }
}

/// Joints worth discussing for an injury at `pain_location`
pub fn relevant_joints(pain_location: Option<&str>) -> Vec<Joint> {
    const RULES: &[(&[&str], [Joint; 2])] = &[
        (&["wrist", "hand", "finger", "thumb", "forearm", "carpal"], [Joint::Wrist, Joint::Elbow]),
        (&["elbow", "epicondyl", "humerus", "bicep", "tricep", "arm"], [Joint::Elbow, Joint::Wrist]),
        (&["shoulder", "rotator", "deltoid", "scapula", "clavicle"], [Joint::Elbow, Joint::Hip]),
        (&["ankle", "foot", "heel", "achilles", "calf", "toe"], [Joint::Ankle, Joint::Knee]),
        (&["knee", "patella", "leg", "thigh", "quad", "hamstring", "tibia"], [Joint::Knee, Joint::Ankle]),
        (&["hip", "back", "spine", "lumbar", "glute", "pelvi", "core"], [Joint::Hip, Joint::Knee]),
    ];

    let Some(location) = pain_location else {
        return ANGLE_JOINTS.to_vec();
    };
    let location = location.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| location.contains(k)))
        .map(|(_, joints)| joints.to_vec())
        .unwrap_or_else(|| ANGLE_JOINTS.to_vec())
}

/// Rule-based scorer over the metrics record
pub struct HeuristicScorer {
    thresholds: HeuristicThresholds,
    name: String,
}

impl HeuristicScorer {
    pub fn new(thresholds: HeuristicThresholds) -> Self {
        Self {
            thresholds,
            name: "Heuristic".to_string(),
        }
    }

    /// Typed feedback for a request
    pub fn evaluate(&self, request: &FormAnalysisRequest) -> FormFeedback {
        let t = &self.thresholds;
        let metrics = &request.pose_metrics;
        let joints = relevant_joints(request.pain_location());

        let mut strengths = Vec::new();
        let mut improvements = Vec::new();
        let mut safety_checks = Vec::new();
        let mut joint_notes = Vec::new();

        if metrics.avg_visibility >= t.min_visibility {
            strengths.push(format!(
                "Clear camera tracking ({:.0}% landmark visibility)",
                metrics.avg_visibility
            ));
        } else {
            improvements.push(format!(
                "Improve lighting and stay fully in frame (only {:.0}% landmark visibility)",
                metrics.avg_visibility
            ));
        }

        let mut tracked = 0usize;
        let mut amplitude_sum = 0.0;
        for &joint in &joints {
            let Some(range) = metrics.angle_range(joint) else {
                improvements.push(format!(
                    "Keep your {} visible to the camera so it can be tracked",
                    joint.name()
                ));
                continue;
            };

            tracked += 1;
            amplitude_sum += (range.span() / t.full_span_degrees).min(1.0);
            joint_notes.push(format!(
                "{} angles: {:.1}° → {:.1}° (avg {:.1}°, movement {:.2})",
                joint.label(),
                range.min,
                range.max,
                range.avg,
                metrics.movement(joint)
            ));

            if range.span() >= t.min_span_degrees {
                strengths.push(format!(
                    "{} moved through {:.1}° → {:.1}°",
                    joint.label(),
                    range.min,
                    range.max
                ));
            } else {
                improvements.push(format!(
                    "Increase {} range of motion; it only covered {:.1}°",
                    joint.name(),
                    range.span()
                ));
            }
        }

        if joints.contains(&Joint::Hip) && metrics.hips_tracked() {
            if metrics.body_stability <= t.max_body_stability {
                strengths.push("Steady hips throughout the movement".to_string());
            } else {
                safety_checks.push("Hips shifted side to side; slow down and brace your core".to_string());
            }
        }

        if metrics.duration < t.min_duration_secs {
            improvements.push(format!(
                "Perform the exercise for longer (only {:.1} s captured)",
                metrics.duration
            ));
        }

        if let Some(location) = request.pain_location() {
            safety_checks.push(format!("Stop if pain increases around your {}", location));
        }
        safety_checks.extend(metrics.exercise_safety_tips.iter().cloned());

        let overall_score = self.overall_score(metrics, tracked, amplitude_sum);

        let encouragement = if overall_score >= 80.0 {
            "Excellent work! Your form is looking strong."
        } else if overall_score >= 60.0 {
            "Good effort! A few adjustments will make a big difference."
        } else {
            "Keep going! Every session builds strength and control."
        }
        .to_string();

        let next_steps = match improvements.first() {
            Some(first) => format!("Next session, focus on: {}", first),
            None => "Continue with the prescribed plan and progress as pain allows.".to_string(),
        };

        FormFeedback {
            overall_score,
            exercise_performed: Some(request.exercise_name().to_string()),
            was_correct_exercise: None,
            strengths,
            improvements,
            safety_checks,
            form_analysis: Some(format!(
                "{} of {} relevant joints tracked over {} frames ({:.1} s).",
                tracked,
                joints.len(),
                metrics.frames,
                metrics.duration
            )),
            specific_feedback: Some(joint_notes.join("\n")),
            encouragement,
            next_steps,
            error: false,
            network_issue: None,
        }
    }

    fn overall_score(&self, metrics: &MetricsRecord, tracked: usize, amplitude_sum: f64) -> f64 {
        let t = &self.thresholds;

        let form = metrics.avg_visibility.clamp(0.0, 100.0);
        let safety = 100.0 * (1.0 - (metrics.body_stability / t.unstable_body_stability).min(1.0));
        let amplitude = if tracked > 0 {
            100.0 * amplitude_sum / tracked as f64
        } else {
            0.0
        };
        let consistency = 100.0 * (metrics.frames as f64 / t.consistent_frames as f64).min(1.0);

        (0.4 * form + 0.3 * safety + 0.2 * amplitude + 0.1 * consistency).round()
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(HeuristicThresholds::default())
    }
}

#[async_trait]
impl FormScorer for HeuristicScorer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn score(&self, request: &FormAnalysisRequest) -> ScorerResult<String> {
        self.validate(request)?;
        Ok(serde_json::to_string(&self.evaluate(request))?)
    }
}
