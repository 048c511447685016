//! Model side of the footy pipeline: packing frames into model inputs,
//! decoding ball and pose outputs, and owning the loaded models.

pub mod backend;
pub mod backends;
pub mod ball;
pub mod config;
pub mod detector;
pub mod error;
pub mod estimator;
pub mod frame;
pub mod labels;
pub mod latency;
pub mod lifecycle;
pub mod modelsource;
pub mod pack;
pub mod pose;
pub mod session;
pub mod vision;

pub use backend::Backend;
pub use ball::{BallDetection, BallFrameResult};
pub use config::{DetectorConfig, PoseConfig};
pub use detector::BallDetector;
pub use error::InferError;
pub use estimator::PoseEstimator;
pub use frame::FrameRequest;
pub use latency::LatencyStats;
pub use lifecycle::{load_plan, ExecutionTier, ModelHandle, ModelSlot, SessionConfig};
pub use modelsource::ModelSource;
pub use pack::{pack, validate_input_spec, ElementType, PackedTensor};
pub use pose::{Keypoint, KeypointIndex, PoseDetection, PoseFrame, PoseFrameResult, KEYPOINT_COUNT};
pub use session::{InputSpec, Session};
pub use vision::Vision;

#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;
