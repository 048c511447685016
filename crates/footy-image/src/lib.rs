//! Sensor-frame handling for the footy pipeline.
//!
//! Converts planar camera data into RGB images (`convert`) and brings those
//! images into the orientation and resolution a model expects (`transform`).
//!
//! All images use HWC layout: `[height, width, 3]`.

pub mod convert;
pub mod error;
pub mod planes;
pub mod rgb;
pub mod transform;

pub use convert::{luma_to_rgb, planes_to_rgb, yuv_planes_to_rgb, yuv_to_rgb};
pub use error::ImageError;
pub use planes::FramePlanes;
pub use rgb::RgbImage;
pub use transform::{normalize, rotate_then_scale, scale_only, Filter, Rotation};
