mod sensor;

use footy_infer::{Backend, ModelSource, Vision};
use log::{error, info};
use sensor::SensorFrame;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

#[cfg(feature = "onnx")]
fn onnx_backend() -> Option<Box<dyn Backend>> {
    Some(Box::new(footy_infer::OnnxBackend))
}

#[cfg(not(feature = "onnx"))]
fn onnx_backend() -> Option<Box<dyn Backend>> {
    None
}

fn env_path(name: &str, default: &str) -> PathBuf {
    env::var(name).unwrap_or_else(|_| default.to_string()).into()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match env::var("FOOTY_LOG_DIR") {
        Ok(dir) => footy_base::init_file_logger(dir)?,
        Err(_) => footy_base::init_stdout_logger(),
    }

    let mut args = env::args().skip(1);
    let image_path: PathBuf = args.next().unwrap_or_else(|| "frame.jpg".to_string()).into();
    let rotation: i32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(0);
    let front_camera = args.next().as_deref() == Some("front");

    let detector_model = env_path("FOOTY_DETECTOR_MODEL", "models/ball.onnx");
    let detector_labels = env_path("FOOTY_DETECTOR_LABELS", "models/labels.txt");
    let pose_model = env_path("FOOTY_POSE_MODEL", "models/movenet.onnx");
    let use_accelerator = env::var("FOOTY_USE_ACCELERATOR").map_or(true, |v| v != "0");

    let Some(backend) = onnx_backend() else {
        footy_base::log_fatal!("no onnx backend in this build, rebuild with --features onnx");
    };
    let backend = backend.as_ref();

    let vision = Arc::new(Vision::default());
    if let Err(e) = vision.load_detector(
        backend,
        &ModelSource::File(detector_model),
        &detector_labels,
        use_accelerator,
    ) {
        error!("ball detector not loaded: {}", e);
    }
    if let Err(e) = vision.load_pose(backend, &ModelSource::File(pose_model), use_accelerator) {
        error!("pose estimator not loaded: {}", e);
    }

    let rgb = crates_image::open(&image_path)?.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    info!("{}: {}x{}, rotation {}, front {}", image_path.display(), width, height, rotation, front_camera);
    let frame = Arc::new(SensorFrame::from_rgb(rgb.as_raw(), width, height));

    let ball = tokio::task::spawn_blocking({
        let (vision, frame) = (vision.clone(), frame.clone());
        move || match vision.detect_ball(frame.planes(), rotation, front_camera) {
            Ok(result) => result.to_json().map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        }
    });
    let pose = tokio::task::spawn_blocking({
        let (vision, frame) = (vision.clone(), frame.clone());
        move || match vision.detect_pose(frame.planes(), rotation, front_camera) {
            Ok(result) => result.to_json().map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        }
    });
    let (ball, pose) = tokio::join!(ball, pose);

    let payload = |result: Result<serde_json::Value, String>| {
        result.unwrap_or_else(|e| serde_json::json!({ "error": e }))
    };
    let output = serde_json::json!({
        "ball": payload(ball?),
        "pose": payload(pose?),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    let (ball_ms, pose_ms) = vision.mean_inference_ms();
    info!("mean inference: ball {:.1} ms, pose {:.1} ms", ball_ms, pose_ms);

    vision.dispose_detector();
    vision.dispose_pose();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onnx_backend_follows_feature() {
        let backend = onnx_backend();
        assert_eq!(backend.is_some(), cfg!(feature = "onnx"));
        if let Some(backend) = backend {
            assert_eq!(backend.name(), "onnx");
        }
    }
}
