use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ImageError {
    InvalidDimensions { width: usize, height: usize },
    PlaneTooShort { plane: &'static str, needed: usize, got: usize },
    InvalidStride(String),
    Allocation(usize),
    InvalidRotation(i32),
    Tensor(footy_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            ImageError::PlaneTooShort { plane, needed, got } => {
                write!(f, "{plane} plane too short: need {needed} bytes, got {got}")
            }
            ImageError::InvalidStride(msg) => write!(f, "invalid stride: {msg}"),
            ImageError::Allocation(bytes) => write!(f, "failed to allocate {bytes} bytes"),
            ImageError::InvalidRotation(degrees) => {
                write!(f, "unsupported rotation: {degrees} degrees")
            }
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<footy_base::TensorError> for ImageError {
    fn from(err: footy_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
