use crate::ball::{self, BallDetection, BallFrameResult};
use crate::config::DetectorConfig;
use crate::frame::{FrameRequest, millis, prepare_input, run_timed};
use crate::latency::LatencyStats;
use crate::lifecycle::{ModelHandle, ModelSlot};
use crate::pack::validate_input_spec;
use crate::{labels, Backend, InferError, ModelSource};
use log::{debug, error, info, warn};
use std::time::Instant;

/// Owns the ball detector model and everything tied to its lifetime.
pub struct BallDetector {
    slot: ModelSlot,
    class_index: Option<usize>,
    config: DetectorConfig,
    latency: LatencyStats,
}

impl BallDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            slot: ModelSlot::new(),
            class_index: None,
            config,
            latency: LatencyStats::new(),
        }
    }

    /// Replaces the current model. The old model is released before the new
    /// one is loaded, so a failed load leaves the detector unloaded.
    pub fn load(
        &mut self,
        backend: &dyn Backend,
        model: &ModelSource,
        labels: &[String],
        use_accelerator: bool,
    ) -> Result<(), InferError> {
        self.dispose();

        let handle = ModelHandle::load(backend, model, use_accelerator)?;
        validate_input_spec(handle.input_spec())?;
        let classes = detector_classes(handle.output_shapes())?;

        let class_index = match labels::find_ball_class(labels) {
            Some(index) if classes.is_some_and(|c| index >= c) => {
                warn!(
                    "ball label {} is outside the model's {} classes, nothing will be detected",
                    index,
                    classes.unwrap_or(0)
                );
                None
            }
            Some(index) => Some(index),
            None => {
                warn!("no ball label among {} labels, nothing will be detected", labels.len());
                None
            }
        };

        info!(
            "ball detector ready: input {:?} {:?}, class {:?}, tier {}",
            handle.input_spec().shape(),
            handle.input_spec().element_type,
            class_index,
            handle.tier()
        );
        self.class_index = class_index;
        self.latency.reset();
        self.slot.install(handle);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.is_loaded()
    }

    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn latency(&self) -> &LatencyStats {
        &self.latency
    }

    /// Runs one frame. Only a missing model is an `Err`; conversion and
    /// inference failures come back as an empty payload with `error` set and
    /// leave the model loaded.
    pub fn detect(&mut self, request: &FrameRequest) -> Result<BallFrameResult, InferError> {
        let start = Instant::now();
        let handle = self.slot.get_mut()?;

        let outcome = prepare_input(request, handle, self.config.filter)
            .and_then(|input| run_timed(handle, &input))
            .and_then(|(outputs, elapsed)| {
                self.latency.record(elapsed);
                let output = outputs
                    .first()
                    .ok_or_else(|| InferError::Runtime("detector produced no output".into()))?;
                ball::decode(
                    output,
                    self.class_index,
                    self.config.threshold,
                    request.front_camera,
                    &self.config.tag,
                )
            });

        let processing_time_ms = millis(start.elapsed());
        match outcome {
            Ok(detection) => {
                debug!(
                    "ball frame: {:?} in {} ms (mean inference {:.1} ms)",
                    detection.as_ref().map(|d: &BallDetection| d.bbox),
                    processing_time_ms,
                    self.latency.mean_ms()
                );
                Ok(BallFrameResult {
                    detections: detection.into_iter().collect(),
                    processing_time_ms,
                    error: None,
                })
            }
            Err(e) => {
                error!("ball frame failed: {}", e);
                Ok(BallFrameResult::failed(e, processing_time_ms))
            }
        }
    }

    /// Releases the model. Safe to call when nothing is loaded.
    pub fn dispose(&mut self) {
        if self.slot.dispose() {
            info!("ball detector disposed");
        }
        self.class_index = None;
    }
}

impl Default for BallDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

/// Class count declared by the first output, `None` when left dynamic.
fn detector_classes(shapes: &[Vec<usize>]) -> Result<Option<usize>, InferError> {
    let shape = shapes
        .first()
        .ok_or_else(|| InferError::Shape("detector declares no outputs".into()))?;
    match shape.as_slice() {
        [_, 0, _] => Ok(None),
        [0 | 1, rows, _] if *rows > 4 => Ok(Some(rows - 4)),
        _ => Err(InferError::Shape(format!(
            "expected [1, 4+C, N] detector output, got {shape:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_classes() {
        assert_eq!(detector_classes(&[vec![1, 84, 8400]]).unwrap(), Some(80));
        assert_eq!(detector_classes(&[vec![0, 6, 0]]).unwrap(), Some(2));
        assert_eq!(detector_classes(&[vec![1, 0, 0]]).unwrap(), None);
        assert!(detector_classes(&[vec![1, 4, 10]]).is_err());
        assert!(detector_classes(&[]).is_err());
    }
}
