use crate::InferError;
use crate::pack::{ElementType, PackedTensor};
use footy_base::Tensor;

/// Declared input of a model, NHWC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSpec {
    pub batch: usize,
    pub height: usize,
    pub width: usize,
    pub channels: usize,
    pub element_type: ElementType,
}

impl InputSpec {
    /// Reads a `[batch, height, width, channels]` shape.
    pub fn from_nhwc(shape: &[usize], element_type: ElementType) -> Result<Self, InferError> {
        match *shape {
            [batch, height, width, channels] => Ok(Self {
                batch,
                height,
                width,
                channels,
                element_type,
            }),
            _ => Err(InferError::Shape(format!(
                "expected NHWC input shape, got {shape:?}"
            ))),
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        vec![self.batch, self.height, self.width, self.channels]
    }
}

/// A loaded model, owned by exactly one role. Not reentrant: every call takes
/// `&mut self`.
pub trait Session: Send {
    fn input_spec(&self) -> &InputSpec;

    /// Declared output shapes; dimensions the model leaves dynamic are 0.
    fn output_shapes(&self) -> &[Vec<usize>];

    fn run(&mut self, input: &PackedTensor) -> Result<Vec<Tensor<f32>>, InferError>;
}
