use crate::config::PoseConfig;
use crate::frame::{FrameRequest, millis, prepare_input, run_timed};
use crate::latency::LatencyStats;
use crate::lifecycle::{ModelHandle, ModelSlot};
use crate::pack::validate_input_spec;
use crate::pose::{self, PoseFrameResult};
use crate::{Backend, InferError, ModelSource};
use log::{debug, error, info};
use std::time::Instant;

/// Owns the pose model and its latency statistics.
pub struct PoseEstimator {
    slot: ModelSlot,
    config: PoseConfig,
    latency: LatencyStats,
}

impl PoseEstimator {
    pub fn new(config: PoseConfig) -> Self {
        Self {
            slot: ModelSlot::new(),
            config,
            latency: LatencyStats::new(),
        }
    }

    /// Replaces the current model; on failure the estimator stays unloaded.
    pub fn load(
        &mut self,
        backend: &dyn Backend,
        model: &ModelSource,
        use_accelerator: bool,
    ) -> Result<(), InferError> {
        self.dispose();

        let handle = ModelHandle::load(backend, model, use_accelerator)?;
        validate_input_spec(handle.input_spec())?;
        let output = handle
            .output_shapes()
            .first()
            .ok_or_else(|| InferError::Shape("pose model declares no outputs".into()))?;
        pose::check_output_shape(output)?;

        info!(
            "pose estimator ready: input {:?} {:?}, tier {}",
            handle.input_spec().shape(),
            handle.input_spec().element_type,
            handle.tier()
        );
        self.latency.reset();
        self.slot.install(handle);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.is_loaded()
    }

    pub fn config(&self) -> &PoseConfig {
        &self.config
    }

    pub fn latency(&self) -> &LatencyStats {
        &self.latency
    }

    pub fn detect(&mut self, request: &FrameRequest) -> Result<PoseFrameResult, InferError> {
        let start = Instant::now();
        let handle = self.slot.get_mut()?;

        let outcome = prepare_input(request, handle, self.config.filter)
            .and_then(|input| run_timed(handle, &input))
            .and_then(|(outputs, elapsed)| {
                self.latency.record(elapsed);
                let output = outputs
                    .first()
                    .ok_or_else(|| InferError::Runtime("pose model produced no output".into()))?;
                let frame = pose::decode(
                    output,
                    request.front_camera,
                    self.config.visibility_threshold,
                    self.config.padding,
                )?;
                Ok((frame, elapsed))
            });

        let processing_time_ms = millis(start.elapsed());
        match outcome {
            Ok((frame, elapsed)) => {
                debug!(
                    "pose frame: person={} in {} ms, inference {} ms (mean {:.1} ms)",
                    frame.detection.is_some(),
                    processing_time_ms,
                    millis(elapsed),
                    self.latency.mean_ms()
                );
                Ok(PoseFrameResult {
                    detections: frame.detection.into_iter().collect(),
                    keypoints: frame.keypoints.to_vec(),
                    processing_time_ms,
                    inference_time_ms: millis(elapsed),
                    error: None,
                })
            }
            Err(e) => {
                error!("pose frame failed: {}", e);
                Ok(PoseFrameResult::failed(e, processing_time_ms))
            }
        }
    }

    /// Releases the model. Safe to call when nothing is loaded.
    pub fn dispose(&mut self) {
        if self.slot.dispose() {
            info!("pose estimator disposed");
        }
    }
}

impl Default for PoseEstimator {
    fn default() -> Self {
        Self::new(PoseConfig::default())
    }
}
