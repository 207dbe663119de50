//! Fundamental types for the MotionCare system.

use nalgebra::Point2;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Identifier for one analysed exercise attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Capture timestamp in monotonic milliseconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> f64 {
        self.0
    }

    /// Seconds elapsed since `earlier`
    pub fn secs_since(&self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0) / 1000.0
    }
}

/// A single pose landmark in normalized image space.
///
/// `x` and `y` lie in [0, 1] relative to the image, `z` is the optional
/// relative depth and `visibility` the detector's confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    pub fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_depth(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Planar position, ignoring depth
    pub fn to_point2(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// 33-point body pose topology.
///
/// The discriminants are the positional indices used by the capture layer
/// and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    pub const COUNT: usize = 33;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        use PoseLandmark::*;
        const ALL: [PoseLandmark; PoseLandmark::COUNT] = [
            Nose,
            LeftEyeInner,
            LeftEye,
            LeftEyeOuter,
            RightEyeInner,
            RightEye,
            RightEyeOuter,
            LeftEar,
            RightEar,
            MouthLeft,
            MouthRight,
            LeftShoulder,
            RightShoulder,
            LeftElbow,
            RightElbow,
            LeftWrist,
            RightWrist,
            LeftPinky,
            RightPinky,
            LeftIndex,
            RightIndex,
            LeftThumb,
            RightThumb,
            LeftHip,
            RightHip,
            LeftKnee,
            RightKnee,
            LeftAnkle,
            RightAnkle,
            LeftHeel,
            RightHeel,
            LeftFootIndex,
            RightFootIndex,
        ];
        ALL.get(idx).copied()
    }
}

/// One captured frame of pose landmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub timestamp: Timestamp,
    /// Positional landmarks; `None` where the detector lost the point
    #[serde(default, deserialize_with = "null_as_empty")]
    pub landmarks: Vec<Option<Landmark>>,
}

impl Frame {
    pub fn new(timestamp: Timestamp, landmarks: Vec<Option<Landmark>>) -> Self {
        Self {
            timestamp,
            landmarks,
        }
    }

    /// Frame with all 33 positions undetected
    pub fn empty(timestamp: Timestamp) -> Self {
        Self::new(timestamp, vec![None; PoseLandmark::COUNT])
    }

    /// Landmark at a topology position, if it was detected this frame.
    /// Positions beyond a short landmark list count as undetected.
    pub fn landmark(&self, point: PoseLandmark) -> Option<&Landmark> {
        self.landmarks.get(point.index()).and_then(Option::as_ref)
    }

    pub fn set(&mut self, point: PoseLandmark, landmark: Landmark) {
        if self.landmarks.len() < PoseLandmark::COUNT {
            self.landmarks.resize(PoseLandmark::COUNT, None);
        }
        self.landmarks[point.index()] = Some(landmark);
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Option<Landmark>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Option<Landmark>>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Exercise being performed, as prescribed by the plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub focus_points: Vec<String>,
    #[serde(default)]
    pub safety_tips: Vec<String>,
}

impl ExerciseDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_landmark_roundtrip() {
        for i in 0..PoseLandmark::COUNT {
            let point = PoseLandmark::from_index(i).unwrap();
            assert_eq!(point.index(), i);
        }
        assert!(PoseLandmark::from_index(33).is_none());
    }

    #[test]
    fn test_fixed_indices() {
        assert_eq!(PoseLandmark::LeftShoulder.index(), 11);
        assert_eq!(PoseLandmark::LeftIndex.index(), 19);
        assert_eq!(PoseLandmark::LeftHip.index(), 23);
        assert_eq!(PoseLandmark::LeftKnee.index(), 25);
        assert_eq!(PoseLandmark::LeftAnkle.index(), 27);
        assert_eq!(PoseLandmark::RightFootIndex.index(), 32);
    }

    #[test]
    fn test_short_landmark_list_reads_as_missing() {
        let frame = Frame::new(Timestamp(0.0), vec![Some(Landmark::new(0.5, 0.5))]);
        assert!(frame.landmark(PoseLandmark::Nose).is_some());
        assert!(frame.landmark(PoseLandmark::LeftKnee).is_none());
    }

    #[test]
    fn test_frame_deserializes_nulls() {
        let json = r#"{"timestamp": 16.5, "landmarks": [null, {"x": 0.1, "y": 0.2, "visibility": 0.9}]}"#;
        let frame: Frame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.landmarks.len(), 2);
        assert!(frame.landmarks[0].is_none());
        assert_eq!(frame.landmarks[1].unwrap().visibility, Some(0.9));

        let frame: Frame = serde_json::from_str(r#"{"timestamp": 0, "landmarks": null}"#).unwrap();
        assert!(frame.landmarks.is_empty());
    }

    #[test]
    fn test_timestamp_seconds() {
        let start = Timestamp::from_millis(1_000.0);
        let end = Timestamp::from_millis(3_500.0);
        assert!((end.secs_since(start) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_exercise_descriptor_defaults() {
        let exercise: ExerciseDescriptor = serde_json::from_str(r#"{"name": "Squat"}"#).unwrap();
        assert_eq!(exercise.name, "Squat");
        assert!(exercise.focus_points.is_empty());
        assert!(exercise.safety_tips.is_empty());
    }

    #[test]
    fn test_exercise_descriptor_without_name() {
        let exercise: ExerciseDescriptor =
            serde_json::from_str(r#"{"focusPoints": ["Slow"]}"#).unwrap();
        assert!(exercise.name.is_empty());
        assert_eq!(exercise.focus_points, vec!["Slow".to_string()]);
    }
}
