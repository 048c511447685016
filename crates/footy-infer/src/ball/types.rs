use crate::InferError;
use footy_base::BoundingBox;
use serde::Serialize;

/// The ball found in one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallDetection {
    pub tag: String,
    pub confidence: f32,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
}

/// Per-frame detector payload. An empty list with no `error` means no ball
/// was seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BallFrameResult {
    pub detections: Vec<BallDetection>,
    pub processing_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BallFrameResult {
    pub fn failed(error: impl ToString, processing_time_ms: u64) -> Self {
        Self {
            detections: Vec::new(),
            processing_time_ms,
            error: Some(error.to_string()),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, InferError> {
        serde_json::to_value(self).map_err(|e| InferError::Runtime(e.to_string()))
    }
}
