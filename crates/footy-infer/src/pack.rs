use crate::InferError;
use crate::session::InputSpec;
use footy_image::{ImageError, RgbImage};

/// Element type a model declares for its input tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    U8,
    I8,
    F32,
}

impl ElementType {
    pub fn size_of(self) -> usize {
        match self {
            ElementType::U8 | ElementType::I8 => 1,
            ElementType::F32 => 4,
        }
    }

    pub fn is_quantized(self) -> bool {
        !matches!(self, ElementType::F32)
    }
}

/// Model input in the engine's byte layout. Floats are in native byte order.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedTensor {
    pub shape: Vec<usize>,
    pub element_type: ElementType,
    pub bytes: Vec<u8>,
}

impl PackedTensor {
    /// Decodes the payload as floats, `None` for quantized tensors.
    pub fn as_f32(&self) -> Option<Vec<f32>> {
        if self.element_type != ElementType::F32 {
            return None;
        }
        Some(
            self.bytes
                .chunks_exact(4)
                .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
        )
    }

    pub fn element_count(&self) -> usize {
        self.bytes.len() / self.element_type.size_of()
    }
}

/// Rejects input layouts the packer cannot fill. Called once per load.
pub fn validate_input_spec(spec: &InputSpec) -> Result<(), InferError> {
    if spec.channels != 3 {
        return Err(InferError::ChannelCount(spec.channels));
    }
    if spec.batch == 0 || spec.height == 0 || spec.width == 0 {
        return Err(InferError::Shape(format!(
            "input shape {:?} has an empty dimension",
            spec.shape()
        )));
    }
    Ok(())
}

/// Serializes `image` into the layout `spec` declares: interleaved RGB, row
/// major, raw bytes for quantized models and `value / 255.0` for float ones.
/// Batches beyond the first repeat the frame.
pub fn pack(image: &RgbImage, spec: &InputSpec) -> Result<PackedTensor, InferError> {
    validate_input_spec(spec)?;
    if image.width() != spec.width || image.height() != spec.height {
        return Err(InferError::Shape(format!(
            "image is {}x{}, model expects {}x{}",
            image.width(),
            image.height(),
            spec.width,
            spec.height
        )));
    }

    let frame = image.as_raw();
    let len = frame
        .len()
        .checked_mul(spec.batch)
        .and_then(|n| n.checked_mul(spec.element_type.size_of()))
        .ok_or_else(|| InferError::Shape(format!("input shape {:?} overflows", spec.shape())))?;
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(len)
        .map_err(|_| ImageError::Allocation(len))?;

    for _ in 0..spec.batch {
        match spec.element_type {
            ElementType::U8 | ElementType::I8 => bytes.extend_from_slice(frame),
            ElementType::F32 => {
                for &v in frame {
                    bytes.extend_from_slice(&(v as f32 / 255.0).to_ne_bytes());
                }
            }
        }
    }

    Ok(PackedTensor {
        shape: spec.shape(),
        element_type: spec.element_type,
        bytes,
    })
}
