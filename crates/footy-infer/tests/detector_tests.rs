mod support;

use footy_image::{FramePlanes, Rotation};
use footy_infer::{
    BallDetector, DetectorConfig, ElementType, ExecutionTier, FrameRequest, InferError,
};
use std::sync::atomic::Ordering;
use support::{assert_box_near, detector_output, labels, model, rgb_spec, FakeBackend};

const BALL_LABELS: &[&str] = &["person", "bicycle", "sports ball", "kite"];

fn backend(element_type: ElementType) -> FakeBackend {
    let output = detector_output(
        &[[0.1, 0.1, 0.1, 0.1], [0.2, 0.2, 0.1, 0.1], [0.5, 0.5, 0.2, 0.2]],
        &[vec![0.0; 3], vec![0.0; 3], vec![0.05, 0.05, 0.4], vec![0.0; 3]],
    );
    FakeBackend::new(rgb_spec(4, element_type), output)
}

fn loaded(backend: &FakeBackend) -> BallDetector {
    let mut detector = BallDetector::default();
    detector.load(backend, &model(), &labels(BALL_LABELS), true).unwrap();
    detector
}

#[test]
fn test_detect_before_load_is_not_loaded() {
    let mut detector = BallDetector::default();
    let y = [0u8; 16];
    let result = detector.detect(&FrameRequest::new(FramePlanes::new(&y, 4, 4)));
    assert!(matches!(result, Err(InferError::NotLoaded)));
}

#[test]
fn test_load_resolves_class_and_detects() {
    let backend = backend(ElementType::U8);
    let mut detector = loaded(&backend);
    assert!(detector.is_loaded());
    assert_eq!(detector.class_index(), Some(2));

    let y = [128u8; 16];
    let result = detector.detect(&FrameRequest::new(FramePlanes::new(&y, 4, 4))).unwrap();
    assert_eq!(result.error, None);
    assert_eq!(result.detections.len(), 1);
    assert_eq!(result.detections[0].tag, "soccer_ball");
    assert_box_near(result.detections[0].bbox.to_array(), [0.4, 0.4, 0.6, 0.6]);
    assert_eq!(detector.latency().frame_count(), 1);
}

#[test]
fn test_frame_reaches_model_as_packed_input() {
    let backend = backend(ElementType::F32);
    let mut detector = loaded(&backend);
    // 8x8 grey frame scaled down to the 4x4 model input
    let y = [255u8; 64];
    detector.detect(&FrameRequest::new(FramePlanes::new(&y, 8, 8))).unwrap();

    let input = backend.recorder.last_input().unwrap();
    assert_eq!(input.shape, vec![1, 4, 4, 3]);
    assert_eq!(input.element_type, ElementType::F32);
    assert!(input.as_f32().unwrap().iter().all(|&v| v == 1.0));
}

#[test]
fn test_front_camera_mirrors_result() {
    let output = detector_output(&[[0.2, 0.5, 0.2, 0.2]], &[vec![0.0], vec![0.0], vec![0.9]]);
    let backend = FakeBackend::new(rgb_spec(2, ElementType::U8), output);
    let mut detector = loaded(&backend);
    let y = [0u8; 4];
    let request = FrameRequest::new(FramePlanes::new(&y, 2, 2))
        .with_rotation(Rotation::Deg90)
        .with_front_camera(true);
    let result = detector.detect(&request).unwrap();
    assert_box_near(result.detections[0].bbox.to_array(), [0.7, 0.4, 0.9, 0.6]);
}

#[test]
fn test_missing_ball_label_gives_empty_results() {
    let backend = backend(ElementType::U8);
    let mut detector = BallDetector::default();
    detector
        .load(&backend, &model(), &labels(&["person", "car"]), false)
        .unwrap();
    assert_eq!(detector.class_index(), None);

    let y = [0u8; 16];
    let result = detector.detect(&FrameRequest::new(FramePlanes::new(&y, 4, 4))).unwrap();
    assert!(result.detections.is_empty());
    assert_eq!(result.error, None);
}

#[test]
fn test_label_beyond_model_classes_is_ignored() {
    let backend = backend(ElementType::U8);
    let mut detector = BallDetector::default();
    let names = ["a", "b", "c", "d", "e", "ball"];
    detector.load(&backend, &model(), &labels(&names), false).unwrap();
    assert_eq!(detector.class_index(), None);
}

#[test]
fn test_custom_threshold_and_tag() {
    let backend = backend(ElementType::U8);
    let config = DetectorConfig::default().with_threshold(0.5).with_tag("ball");
    let mut detector = BallDetector::new(config);
    detector.load(&backend, &model(), &labels(BALL_LABELS), false).unwrap();
    let y = [0u8; 16];
    let result = detector.detect(&FrameRequest::new(FramePlanes::new(&y, 4, 4))).unwrap();
    assert!(result.detections.is_empty());
    assert_eq!(detector.config().tag, "ball");
}

#[test]
fn test_bad_frame_is_reported_in_payload() {
    let backend = backend(ElementType::U8);
    let mut detector = loaded(&backend);
    let y = [0u8; 3];
    let result = detector.detect(&FrameRequest::new(FramePlanes::new(&y, 4, 4))).unwrap();
    assert!(result.detections.is_empty());
    assert!(result.error.unwrap().contains("too short"));
    assert!(detector.is_loaded());
    assert_eq!(backend.recorder.runs.load(Ordering::SeqCst), 0);
    assert_eq!(detector.latency().frame_count(), 0);
}

#[test]
fn test_inference_error_keeps_model_loaded() {
    let backend = backend(ElementType::U8).with_run_error("engine exploded");
    let mut detector = loaded(&backend);
    let y = [0u8; 16];
    let request = FrameRequest::new(FramePlanes::new(&y, 4, 4));

    let first = detector.detect(&request).unwrap();
    assert!(first.detections.is_empty());
    assert!(first.error.unwrap().contains("engine exploded"));

    let second = detector.detect(&request).unwrap();
    assert!(second.error.is_some());
    assert_eq!(backend.recorder.runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_reload_resets_latency() {
    let backend = backend(ElementType::U8);
    let mut detector = loaded(&backend);
    let y = [0u8; 16];
    let request = FrameRequest::new(FramePlanes::new(&y, 4, 4));
    detector.detect(&request).unwrap();
    detector.detect(&request).unwrap();
    assert_eq!(detector.latency().frame_count(), 2);

    detector.load(&backend, &model(), &labels(BALL_LABELS), true).unwrap();
    assert_eq!(detector.latency().frame_count(), 0);
    assert_eq!(backend.recorder.drops(), 1);

    detector.detect(&request).unwrap();
    assert_eq!(detector.latency().frame_count(), 1);
}

#[test]
fn test_dispose_is_idempotent_and_unloads() {
    let backend = backend(ElementType::U8);
    let mut detector = loaded(&backend);
    detector.dispose();
    detector.dispose();
    assert_eq!(backend.recorder.drops(), 1);
    assert!(!detector.is_loaded());

    let y = [0u8; 16];
    let result = detector.detect(&FrameRequest::new(FramePlanes::new(&y, 4, 4)));
    assert!(matches!(result, Err(InferError::NotLoaded)));
}

#[test]
fn test_channel_mismatch_fails_load() {
    let mut backend = backend(ElementType::U8);
    backend.input_spec.channels = 4;
    let mut detector = BallDetector::default();
    let result = detector.load(&backend, &model(), &labels(BALL_LABELS), true);
    assert!(matches!(result, Err(InferError::ChannelCount(4))));
    assert!(!detector.is_loaded());
    assert_eq!(backend.recorder.drops(), 1);
}

#[test]
fn test_failed_reload_leaves_role_unloaded() {
    let backend = backend(ElementType::U8);
    let mut detector = loaded(&backend);
    let broken = self::backend(ElementType::U8).failing(&[
        ExecutionTier::Accelerated,
        ExecutionTier::PlatformAssisted,
        ExecutionTier::Minimal,
    ]);
    let result = detector.load(&broken, &model(), &labels(BALL_LABELS), true);
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
    assert!(!detector.is_loaded());
    assert_eq!(backend.recorder.drops(), 1);
}

#[test]
fn test_bad_output_shape_fails_load() {
    let backend = backend(ElementType::U8).with_output_shapes(vec![vec![1, 1, 17, 3]]);
    let mut detector = BallDetector::default();
    let result = detector.load(&backend, &model(), &labels(BALL_LABELS), true);
    assert!(matches!(result, Err(InferError::Shape(_))));
    assert!(!detector.is_loaded());
}

#[test]
fn test_payload_json_keys() {
    let backend = backend(ElementType::U8);
    let mut detector = loaded(&backend);
    let y = [0u8; 16];
    let result = detector.detect(&FrameRequest::new(FramePlanes::new(&y, 4, 4))).unwrap();
    let json = result.to_json().unwrap();
    assert!(json.get("processingTimeMs").is_some());
    assert!(json.get("error").is_none());
    assert_eq!(json["detections"][0]["tag"], "soccer_ball");
}
