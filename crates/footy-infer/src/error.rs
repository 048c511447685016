use footy_base::TensorError;
use footy_image::ImageError;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    ModelLoad(String),
    Io(String),
    Shape(String),
    ChannelCount(usize),
    UnsupportedDtype(String),
    NotLoaded,
    Runtime(String),
    Image(ImageError),
    Tensor(TensorError),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
            InferError::Shape(msg) => write!(f, "shape error: {msg}"),
            InferError::ChannelCount(channels) => {
                write!(f, "model expects {channels} input channels, only 3 are supported")
            }
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::NotLoaded => write!(f, "model not loaded"),
            InferError::Runtime(msg) => write!(f, "runtime error: {msg}"),
            InferError::Image(err) => write!(f, "image error: {err}"),
            InferError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<ImageError> for InferError {
    fn from(err: ImageError) -> Self {
        InferError::Image(err)
    }
}

impl From<TensorError> for InferError {
    fn from(err: TensorError) -> Self {
        InferError::Tensor(err)
    }
}
