pub mod decode;
pub mod types;

pub use decode::{decode, output_layout};
pub use types::{BallDetection, BallFrameResult};
