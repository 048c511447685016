pub mod decode;
pub mod types;

pub use decode::{check_output_shape, decode};
pub use types::{
    Keypoint, KeypointIndex, PoseDetection, PoseFrame, PoseFrameResult, KEYPOINT_COUNT,
};
