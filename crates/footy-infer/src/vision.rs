use crate::ball::BallFrameResult;
use crate::config::{DetectorConfig, PoseConfig};
use crate::detector::BallDetector;
use crate::estimator::PoseEstimator;
use crate::frame::FrameRequest;
use crate::pose::PoseFrameResult;
use crate::{labels, Backend, InferError, ModelSource};
use footy_image::{FramePlanes, Rotation};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Entry point for callers holding camera frames.
///
/// Each role sits behind its own lock: ball and pose frames may be processed
/// at the same time, calls on the same role run one after another.
pub struct Vision {
    detector: Mutex<BallDetector>,
    pose: Mutex<PoseEstimator>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Vision {
    pub fn new(detector: DetectorConfig, pose: PoseConfig) -> Self {
        Self {
            detector: Mutex::new(BallDetector::new(detector)),
            pose: Mutex::new(PoseEstimator::new(pose)),
        }
    }

    pub fn load_detector(
        &self,
        backend: &dyn Backend,
        model: &ModelSource,
        labels_path: impl AsRef<Path>,
        use_accelerator: bool,
    ) -> Result<(), InferError> {
        let mut detector = lock(&self.detector);
        // a bad label file still unloads the previous model
        let labels = match labels::load_labels(labels_path) {
            Ok(labels) => labels,
            Err(e) => {
                detector.dispose();
                return Err(e);
            }
        };
        detector.load(backend, model, &labels, use_accelerator)
    }

    pub fn load_pose(
        &self,
        backend: &dyn Backend,
        model: &ModelSource,
        use_accelerator: bool,
    ) -> Result<(), InferError> {
        lock(&self.pose).load(backend, model, use_accelerator)
    }

    /// `rotation_degrees` must be a multiple of 90; anything else is reported
    /// in the payload like any other bad frame.
    pub fn detect_ball(
        &self,
        planes: FramePlanes,
        rotation_degrees: i32,
        front_camera: bool,
    ) -> Result<BallFrameResult, InferError> {
        let mut detector = lock(&self.detector);
        match Rotation::from_degrees(rotation_degrees) {
            Ok(rotation) => detector.detect(
                &FrameRequest::new(planes)
                    .with_rotation(rotation)
                    .with_front_camera(front_camera),
            ),
            Err(_) if !detector.is_loaded() => Err(InferError::NotLoaded),
            Err(e) => Ok(BallFrameResult::failed(InferError::from(e), 0)),
        }
    }

    pub fn detect_pose(
        &self,
        planes: FramePlanes,
        rotation_degrees: i32,
        front_camera: bool,
    ) -> Result<PoseFrameResult, InferError> {
        let mut pose = lock(&self.pose);
        match Rotation::from_degrees(rotation_degrees) {
            Ok(rotation) => pose.detect(
                &FrameRequest::new(planes)
                    .with_rotation(rotation)
                    .with_front_camera(front_camera),
            ),
            Err(_) if !pose.is_loaded() => Err(InferError::NotLoaded),
            Err(e) => Ok(PoseFrameResult::failed(InferError::from(e), 0)),
        }
    }

    pub fn dispose_detector(&self) {
        lock(&self.detector).dispose();
    }

    pub fn dispose_pose(&self) {
        lock(&self.pose).dispose();
    }

    pub fn is_detector_loaded(&self) -> bool {
        lock(&self.detector).is_loaded()
    }

    pub fn is_pose_loaded(&self) -> bool {
        lock(&self.pose).is_loaded()
    }

    /// Mean inference time per role in milliseconds, `(ball, pose)`.
    pub fn mean_inference_ms(&self) -> (f64, f64) {
        let ball = lock(&self.detector).latency().mean_ms();
        let pose = lock(&self.pose).latency().mean_ms();
        (ball, pose)
    }
}

impl Default for Vision {
    fn default() -> Self {
        Self::new(DetectorConfig::default(), PoseConfig::default())
    }
}
