use crate::InferError;
use footy_base::{BoundingBox, Tensor};

use super::types::BallDetection;

/// Splits a `[1, 4 + classes, candidates]` shape into `(rows, candidates)`.
pub fn output_layout(shape: &[usize]) -> Result<(usize, usize), InferError> {
    match *shape {
        [1, rows, candidates] if rows > 4 => Ok((rows, candidates)),
        _ => Err(InferError::Shape(format!(
            "expected [1, 4+C, N] detector output, got {shape:?}"
        ))),
    }
}

/// Decodes a single-class detector output.
///
/// Rows 0..4 hold the candidate centre box `(x, y, w, h)`, row `4 + c` the
/// score of class `c`. Candidates are scanned in order and the first whose
/// score for `class_index` is strictly above `threshold` is the result; later
/// candidates are not looked at, even if they score higher.
///
/// A missing or out-of-range class index yields `None`, as does a frame where
/// nothing passes the threshold.
pub fn decode(
    output: &Tensor<f32>,
    class_index: Option<usize>,
    threshold: f32,
    front_camera: bool,
    tag: &str,
) -> Result<Option<BallDetection>, InferError> {
    let (rows, n) = output_layout(&output.shape)?;
    let data = &output.data;
    if data.len() < rows * n {
        return Err(InferError::Shape(format!(
            "detector output holds {} values, shape {:?} needs {}",
            data.len(),
            output.shape,
            rows * n
        )));
    }

    let Some(class) = class_index.filter(|&c| c < rows - 4) else {
        return Ok(None);
    };
    let scores = &data[(4 + class) * n..(5 + class) * n];
    let Some(i) = scores.iter().position(|&score| score > threshold) else {
        return Ok(None);
    };

    let mut bbox = BoundingBox::from_center(data[i], data[n + i], data[2 * n + i], data[3 * n + i]);
    if front_camera {
        bbox = bbox.mirrored();
    }

    Ok(Some(BallDetection {
        tag: tag.to_string(),
        confidence: scores[i],
        bbox: bbox.clipped(),
    }))
}
