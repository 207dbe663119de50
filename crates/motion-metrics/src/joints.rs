//! Joint definitions over the 33-point topology.

use motion_core::{Frame, Landmark, PoseLandmark};
use serde::{Deserialize, Serialize};

/// Tracked body joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Joint {
    Shoulder,
    Elbow,
    Knee,
    Wrist,
    Ankle,
    Hip,
}

/// Joints with an angle range, in report order
pub const ANGLE_JOINTS: [Joint; 5] = [Joint::Knee, Joint::Elbow, Joint::Hip, Joint::Wrist, Joint::Ankle];

/// Joints with a movement total, in report order
pub const MOVEMENT_JOINTS: [Joint; 6] = [
    Joint::Shoulder,
    Joint::Elbow,
    Joint::Knee,
    Joint::Wrist,
    Joint::Ankle,
    Joint::Hip,
];

/// Joints whose displacement feeds the movement score
pub const SCORED_MOVEMENT_JOINTS: [Joint; 5] =
    [Joint::Shoulder, Joint::Elbow, Joint::Knee, Joint::Wrist, Joint::Ankle];

/// Joint whose sideways sway feeds body stability
pub const STABILITY_JOINT: Joint = Joint::Hip;

/// Axes contributing to frame-to-frame displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplacementAxes {
    /// |Δy|
    Vertical,
    /// |Δx|
    Horizontal,
    /// |Δx| + |Δy|
    Planar,
}

impl DisplacementAxes {
    pub fn displacement(&self, prev: &Landmark, curr: &Landmark) -> f64 {
        let dx = (curr.x - prev.x).abs();
        let dy = (curr.y - prev.y).abs();
        match self {
            DisplacementAxes::Vertical => dy,
            DisplacementAxes::Horizontal => dx,
            DisplacementAxes::Planar => dx + dy,
        }
    }
}

impl Joint {
    pub fn name(&self) -> &'static str {
        match self {
            Joint::Shoulder => "shoulder",
            Joint::Elbow => "elbow",
            Joint::Knee => "knee",
            Joint::Wrist => "wrist",
            Joint::Ankle => "ankle",
            Joint::Hip => "hip",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Joint::Shoulder => "Shoulder",
            Joint::Elbow => "Elbow",
            Joint::Knee => "Knee",
            Joint::Wrist => "Wrist",
            Joint::Ankle => "Ankle",
            Joint::Hip => "Hip",
        }
    }

    /// Proximal, vertex and distal landmarks of the joint angle.
    /// Measured on the left side of the body.
    pub fn angle_triple(&self) -> Option<[PoseLandmark; 3]> {
        use PoseLandmark::*;
        match self {
            Joint::Knee => Some([LeftHip, LeftKnee, LeftAnkle]),
            Joint::Elbow => Some([LeftShoulder, LeftElbow, LeftWrist]),
            Joint::Hip => Some([LeftShoulder, LeftHip, LeftKnee]),
            Joint::Wrist => Some([LeftElbow, LeftWrist, LeftIndex]),
            Joint::Ankle => Some([LeftKnee, LeftAnkle, LeftFootIndex]),
            Joint::Shoulder => None,
        }
    }

    /// Left/right landmark pair tracked for movement
    pub fn bilateral_pair(&self) -> (PoseLandmark, PoseLandmark) {
        use PoseLandmark::*;
        match self {
            Joint::Shoulder => (LeftShoulder, RightShoulder),
            Joint::Elbow => (LeftElbow, RightElbow),
            Joint::Knee => (LeftKnee, RightKnee),
            Joint::Wrist => (LeftWrist, RightWrist),
            Joint::Ankle => (LeftAnkle, RightAnkle),
            Joint::Hip => (LeftHip, RightHip),
        }
    }

    pub fn displacement_axes(&self) -> DisplacementAxes {
        match self {
            Joint::Wrist => DisplacementAxes::Planar,
            Joint::Hip => DisplacementAxes::Horizontal,
            _ => DisplacementAxes::Vertical,
        }
    }

    /// Angle at this joint for one frame; `None` unless all three
    /// landmarks were detected
    pub fn angle_in(&self, frame: &Frame) -> Option<f64> {
        let [a, b, c] = self.angle_triple()?;
        let a = frame.landmark(a)?;
        let b = frame.landmark(b)?;
        let c = frame.landmark(c)?;
        Some(motion_core::calculate_angle(a, b, c))
    }

    /// Displacement of both sides between two frames; `None` unless the
    /// pair was detected in both
    pub fn movement_between(&self, prev: &Frame, curr: &Frame) -> Option<f64> {
        let (left, right) = self.bilateral_pair();
        let prev_left = prev.landmark(left)?;
        let prev_right = prev.landmark(right)?;
        let curr_left = curr.landmark(left)?;
        let curr_right = curr.landmark(right)?;

        let axes = self.displacement_axes();
        Some(axes.displacement(prev_left, curr_left) + axes.displacement(prev_right, curr_right))
    }
}
