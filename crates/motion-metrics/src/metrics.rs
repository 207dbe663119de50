//! Summary metrics over one exercise attempt.

use motion_core::{AngleAccumulator, AngleRange, Error, ExerciseDescriptor, Frame, Result};
use serde::{Deserialize, Serialize};

use crate::joints::{Joint, ANGLE_JOINTS, MOVEMENT_JOINTS, SCORED_MOVEMENT_JOINTS, STABILITY_JOINT};

/// Exercise name reported when the caller supplies no named descriptor
pub const UNKNOWN_EXERCISE: &str = "Unknown exercise";

/// Flat metrics record handed to the form scorer.
///
/// Movement totals are cumulative displacements in normalized image units.
/// An angle range is present only if its joint was trackable in at least
/// one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRecord {
    pub frames: usize,
    /// Seconds between first and last frame
    pub duration: f64,
    /// Mean landmark visibility as a percentage (0-100)
    pub avg_visibility: f64,

    pub shoulder_movement: f64,
    pub elbow_movement: f64,
    pub knee_movement: f64,
    pub wrist_movement: f64,
    pub ankle_movement: f64,
    /// Always 0; hip sway is accumulated into `body_stability` instead
    pub hip_movement: f64,

    /// Horizontal hip sway per frame
    pub body_stability: f64,
    /// Frame pairs in which both hips were tracked
    #[serde(skip)]
    pub stability_samples: usize,
    /// Shoulder, elbow, knee, wrist and ankle movement per frame
    pub movement_score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knee_range: Option<AngleRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elbow_range: Option<AngleRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hip_range: Option<AngleRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrist_range: Option<AngleRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ankle_range: Option<AngleRange>,

    pub exercise_name: String,
    #[serde(default)]
    pub exercise_focus_points: Vec<String>,
    #[serde(default)]
    pub exercise_safety_tips: Vec<String>,
}

impl MetricsRecord {
    /// Angle range for a joint, if it was trackable
    pub fn angle_range(&self, joint: Joint) -> Option<&AngleRange> {
        match joint {
            Joint::Knee => self.knee_range.as_ref(),
            Joint::Elbow => self.elbow_range.as_ref(),
            Joint::Hip => self.hip_range.as_ref(),
            Joint::Wrist => self.wrist_range.as_ref(),
            Joint::Ankle => self.ankle_range.as_ref(),
            Joint::Shoulder => None,
        }
    }

    /// Present angle ranges in report order
    pub fn angle_ranges(&self) -> Vec<(Joint, AngleRange)> {
        ANGLE_JOINTS
            .iter()
            .filter_map(|&joint| self.angle_range(joint).map(|range| (joint, *range)))
            .collect()
    }

    pub fn movement(&self, joint: Joint) -> f64 {
        match joint {
            Joint::Shoulder => self.shoulder_movement,
            Joint::Elbow => self.elbow_movement,
            Joint::Knee => self.knee_movement,
            Joint::Wrist => self.wrist_movement,
            Joint::Ankle => self.ankle_movement,
            Joint::Hip => self.hip_movement,
        }
    }

    /// All six movement totals in report order
    pub fn movement_totals(&self) -> Vec<(Joint, f64)> {
        MOVEMENT_JOINTS
            .iter()
            .map(|&joint| (joint, self.movement(joint)))
            .collect()
    }

    /// Whether `body_stability` was measured rather than defaulted to 0
    pub fn hips_tracked(&self) -> bool {
        self.stability_samples > 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Reduce a landmark history to its metrics record.
///
/// Landmarks missing from a frame are skipped for the computations that
/// need them. An empty history is rejected: callers are expected to handle
/// "nothing captured" before getting here.
pub fn compute_metrics(
    history: &[Frame],
    exercise: Option<&ExerciseDescriptor>,
) -> Result<MetricsRecord> {
    let (first, last) = match (history.first(), history.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(Error::InvalidInput(
                "pose history must contain at least one frame".to_string(),
            ))
        }
    };

    let frames = history.len();
    let duration = last.timestamp.secs_since(first.timestamp);

    let mut visibility_sum = 0.0;
    let mut visibility_count = 0usize;
    let mut angles = [AngleAccumulator::new(); ANGLE_JOINTS.len()];
    let mut movement = [0.0f64; SCORED_MOVEMENT_JOINTS.len()];
    let mut hip_sway = 0.0;
    let mut stability_samples = 0usize;

    for (i, frame) in history.iter().enumerate() {
        for visibility in frame.landmarks.iter().flatten().filter_map(|lm| lm.visibility) {
            visibility_sum += visibility;
            visibility_count += 1;
        }

        for (acc, joint) in angles.iter_mut().zip(ANGLE_JOINTS) {
            if let Some(angle) = joint.angle_in(frame) {
                acc.push(angle);
            }
        }

        if i == 0 {
            continue;
        }

        let prev = &history[i - 1];
        for (total, joint) in movement.iter_mut().zip(SCORED_MOVEMENT_JOINTS) {
            if let Some(moved) = joint.movement_between(prev, frame) {
                *total += moved;
            }
        }
        if let Some(sway) = STABILITY_JOINT.movement_between(prev, frame) {
            hip_sway += sway;
            stability_samples += 1;
        }
    }

    let avg_visibility = if visibility_count > 0 {
        visibility_sum / visibility_count as f64 * 100.0
    } else {
        0.0
    };

    let [knee_range, elbow_range, hip_range, wrist_range, ankle_range] = angles.map(|acc| acc.finish());
    let [shoulder_movement, elbow_movement, knee_movement, wrist_movement, ankle_movement] = movement;

    let n = frames as f64;
    let body_stability = hip_sway / n;
    let movement_score =
        (shoulder_movement + elbow_movement + knee_movement + wrist_movement + ankle_movement) / n;

    let exercise_name = exercise
        .map(|ex| ex.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_EXERCISE)
        .to_string();
    let (exercise_focus_points, exercise_safety_tips) = match exercise {
        Some(ex) => (ex.focus_points.clone(), ex.safety_tips.clone()),
        None => (Vec::new(), Vec::new()),
    };

    Ok(MetricsRecord {
        frames,
        duration,
        avg_visibility,
        shoulder_movement,
        elbow_movement,
        knee_movement,
        wrist_movement,
        ankle_movement,
        hip_movement: 0.0,
        body_stability,
        stability_samples,
        movement_score,
        knee_range,
        elbow_range,
        hip_range,
        wrist_range,
        ankle_range,
        exercise_name,
        exercise_focus_points,
        exercise_safety_tips,
    })
}
