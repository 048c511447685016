use crate::InferError;
use footy_base::{BoundingBox, Tensor, Vec2};

use super::types::{Keypoint, KeypointIndex, PoseDetection, PoseFrame, KEYPOINT_COUNT};

const OUTPUT_SHAPE: [usize; 4] = [1, 1, KEYPOINT_COUNT, 3];

/// Accepts `[1, 1, 17, 3]`. Zero dimensions are taken as dynamic and pass.
pub fn check_output_shape(shape: &[usize]) -> Result<(), InferError> {
    let matches = shape.len() == OUTPUT_SHAPE.len()
        && shape
            .iter()
            .zip(OUTPUT_SHAPE)
            .all(|(&got, want)| got == want || got == 0);
    if matches {
        Ok(())
    } else {
        Err(InferError::Shape(format!(
            "expected {OUTPUT_SHAPE:?} pose output, got {shape:?}"
        )))
    }
}

/// Decodes a `[1, 1, 17, 3]` pose output whose rows are `(y, x, score)`.
///
/// All 17 keypoints are returned whatever their score. The person box spans
/// the keypoints scoring above `visibility_threshold`, grown by `padding` and
/// clipped to `[0, 1]`.
pub fn decode(
    output: &Tensor<f32>,
    front_camera: bool,
    visibility_threshold: f32,
    padding: f32,
) -> Result<PoseFrame, InferError> {
    if output.shape != OUTPUT_SHAPE || output.data.len() != KEYPOINT_COUNT * 3 {
        return Err(InferError::Shape(format!(
            "expected {OUTPUT_SHAPE:?} pose output, got {:?}",
            output.shape
        )));
    }

    let keypoints = KeypointIndex::ALL.map(|index| {
        let row = &output.data[usize::from(index) * 3..][..3];
        let x = if front_camera { 1.0 - row[1] } else { row[1] };
        Keypoint {
            index,
            x,
            y: row[0],
            score: row[2],
        }
    });

    let visible = keypoints
        .iter()
        .filter(|k| k.score > visibility_threshold)
        .map(|k| Vec2::new(k.x, k.y));
    let detection = BoundingBox::enclosing(visible).map(|bbox| PoseDetection {
        tag: "person",
        confidence: 1.0,
        keypoints,
        bbox: bbox.expanded(padding).clipped(),
    });

    Ok(PoseFrame {
        keypoints,
        detection,
    })
}
