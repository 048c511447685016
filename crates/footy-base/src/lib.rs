pub mod bbox;
pub mod logging;
pub mod mat3;
pub mod tensor;
pub mod vec2;

pub use bbox::BoundingBox;
pub use logging::{init_file_logger, init_stdout_logger, FileLogger, StdoutLogger};
pub use mat3::Mat3;
pub use tensor::{Tensor, TensorError};
pub use vec2::Vec2;

// Re-export log crate so downstream crates can use footy_base::log::*
pub use log;
