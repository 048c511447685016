use crate::InferError;
use footy_base::BoundingBox;
use serde::{Serialize, Serializer};

/// Number of body keypoints the pose model emits.
pub const KEYPOINT_COUNT: usize = 17;

/// Keypoints in the model's output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const ALL: [KeypointIndex; KEYPOINT_COUNT] = [
        KeypointIndex::Nose,
        KeypointIndex::LeftEye,
        KeypointIndex::RightEye,
        KeypointIndex::LeftEar,
        KeypointIndex::RightEar,
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftElbow,
        KeypointIndex::RightElbow,
        KeypointIndex::LeftWrist,
        KeypointIndex::RightWrist,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
        KeypointIndex::LeftKnee,
        KeypointIndex::RightKnee,
        KeypointIndex::LeftAnkle,
        KeypointIndex::RightAnkle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KeypointIndex::Nose => "nose",
            KeypointIndex::LeftEye => "left_eye",
            KeypointIndex::RightEye => "right_eye",
            KeypointIndex::LeftEar => "left_ear",
            KeypointIndex::RightEar => "right_ear",
            KeypointIndex::LeftShoulder => "left_shoulder",
            KeypointIndex::RightShoulder => "right_shoulder",
            KeypointIndex::LeftElbow => "left_elbow",
            KeypointIndex::RightElbow => "right_elbow",
            KeypointIndex::LeftWrist => "left_wrist",
            KeypointIndex::RightWrist => "right_wrist",
            KeypointIndex::LeftHip => "left_hip",
            KeypointIndex::RightHip => "right_hip",
            KeypointIndex::LeftKnee => "left_knee",
            KeypointIndex::RightKnee => "right_knee",
            KeypointIndex::LeftAnkle => "left_ankle",
            KeypointIndex::RightAnkle => "right_ankle",
        }
    }
}

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for KeypointIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        KeypointIndex::ALL.get(value).copied().ok_or_else(|| {
            format!("Invalid keypoint index: {value}. Must be in range 0-16.")
        })
    }
}

impl Serialize for KeypointIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One body keypoint in normalized display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Keypoint {
    #[serde(rename = "name")]
    pub index: KeypointIndex,
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

/// A person, reported only when at least one keypoint is confident.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseDetection {
    pub tag: &'static str,
    pub confidence: f32,
    pub keypoints: [Keypoint; KEYPOINT_COUNT],
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
}

impl PoseDetection {
    pub fn keypoint(&self, index: KeypointIndex) -> &Keypoint {
        &self.keypoints[usize::from(index)]
    }
}

/// Everything decoded from one pose output. `keypoints` is always complete;
/// `detection` is `None` when no keypoint was confident enough.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseFrame {
    pub keypoints: [Keypoint; KEYPOINT_COUNT],
    pub detection: Option<PoseDetection>,
}

/// Per-frame pose payload. `keypoints` carries the raw decoded keypoints even
/// when no person is reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseFrameResult {
    pub detections: Vec<PoseDetection>,
    pub keypoints: Vec<Keypoint>,
    pub processing_time_ms: u64,
    pub inference_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PoseFrameResult {
    pub fn failed(error: impl ToString, processing_time_ms: u64) -> Self {
        Self {
            processing_time_ms,
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, InferError> {
        serde_json::to_value(self).map_err(|e| InferError::Runtime(e.to_string()))
    }
}
