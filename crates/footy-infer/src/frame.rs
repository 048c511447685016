use crate::lifecycle::ModelHandle;
use crate::pack::{PackedTensor, pack};
use crate::InferError;
use footy_base::{Tensor, Vec2};
use footy_image::{planes_to_rgb, normalize, Filter, FramePlanes, Rotation};
use std::time::{Duration, Instant};

/// One frame handed to a role: sensor planes plus how the device was held.
#[derive(Debug, Clone, Copy)]
pub struct FrameRequest<'a> {
    pub planes: FramePlanes<'a>,
    pub rotation: Rotation,
    pub front_camera: bool,
}

impl<'a> FrameRequest<'a> {
    pub fn new(planes: FramePlanes<'a>) -> Self {
        Self {
            planes,
            rotation: Rotation::Deg0,
            front_camera: false,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_front_camera(mut self, front_camera: bool) -> Self {
        self.front_camera = front_camera;
        self
    }
}

/// Sensor planes to model input: convert, rotate and scale, pack.
pub(crate) fn prepare_input(
    request: &FrameRequest,
    handle: &ModelHandle,
    filter: Filter,
) -> Result<PackedTensor, InferError> {
    let spec = handle.input_spec();
    let rgb = planes_to_rgb(&request.planes)?;
    let resized = normalize(rgb, request.rotation, Vec2::new(spec.width, spec.height), filter)?;
    pack(&resized, spec)
}

/// Runs the engine once and reports how long it took.
pub(crate) fn run_timed(
    handle: &mut ModelHandle,
    input: &PackedTensor,
) -> Result<(Vec<Tensor<f32>>, Duration), InferError> {
    let start = Instant::now();
    let outputs = handle.run(input)?;
    Ok((outputs, start.elapsed()))
}

pub(crate) fn millis(duration: Duration) -> u64 {
    duration.as_millis().min(u64::MAX as u128) as u64
}
