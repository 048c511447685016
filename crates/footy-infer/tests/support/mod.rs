#![allow(dead_code)]

use footy_base::Tensor;
use footy_infer::{
    Backend, ElementType, ExecutionTier, InferError, InputSpec, ModelSource, PackedTensor,
    Session, SessionConfig,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// State shared between a fake backend, the sessions it hands out, and the
/// test that inspects them afterwards.
#[derive(Default)]
pub struct Recorder {
    pub attempts: Mutex<Vec<ExecutionTier>>,
    pub inputs: Mutex<Vec<PackedTensor>>,
    pub runs: AtomicUsize,
    pub drops: AtomicUsize,
}

impl Recorder {
    pub fn attempts(&self) -> Vec<ExecutionTier> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn last_input(&self) -> Option<PackedTensor> {
        self.inputs.lock().unwrap().last().cloned()
    }

    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

pub struct FakeBackend {
    pub recorder: Arc<Recorder>,
    pub failing_tiers: Vec<ExecutionTier>,
    pub input_spec: InputSpec,
    pub output_shapes: Vec<Vec<usize>>,
    pub output: Result<Tensor<f32>, String>,
}

impl FakeBackend {
    pub fn new(input_spec: InputSpec, output: Tensor<f32>) -> Self {
        Self {
            recorder: Arc::new(Recorder::default()),
            failing_tiers: Vec::new(),
            input_spec,
            output_shapes: vec![output.shape.clone()],
            output: Ok(output),
        }
    }

    pub fn failing(mut self, tiers: &[ExecutionTier]) -> Self {
        self.failing_tiers = tiers.to_vec();
        self
    }

    pub fn with_run_error(mut self, msg: &str) -> Self {
        self.output = Err(msg.to_string());
        self
    }

    pub fn with_output_shapes(mut self, shapes: Vec<Vec<usize>>) -> Self {
        self.output_shapes = shapes;
        self
    }
}

impl Backend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    fn load_model(
        &self,
        _model: &ModelSource,
        config: &SessionConfig,
    ) -> Result<Box<dyn Session>, InferError> {
        self.recorder.attempts.lock().unwrap().push(config.tier);
        if self.failing_tiers.contains(&config.tier) {
            return Err(InferError::ModelLoad(format!("{} unavailable", config.tier)));
        }
        Ok(Box::new(FakeSession {
            recorder: self.recorder.clone(),
            input_spec: self.input_spec,
            output_shapes: self.output_shapes.clone(),
            output: self.output.clone(),
        }))
    }
}

pub struct FakeSession {
    recorder: Arc<Recorder>,
    input_spec: InputSpec,
    output_shapes: Vec<Vec<usize>>,
    output: Result<Tensor<f32>, String>,
}

impl Session for FakeSession {
    fn input_spec(&self) -> &InputSpec {
        &self.input_spec
    }

    fn output_shapes(&self) -> &[Vec<usize>] {
        &self.output_shapes
    }

    fn run(&mut self, input: &PackedTensor) -> Result<Vec<Tensor<f32>>, InferError> {
        self.recorder.runs.fetch_add(1, Ordering::SeqCst);
        self.recorder.inputs.lock().unwrap().push(input.clone());
        match &self.output {
            Ok(tensor) => Ok(vec![tensor.clone()]),
            Err(msg) => Err(InferError::Runtime(msg.clone())),
        }
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.recorder.drops.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn rgb_spec(size: usize, element_type: ElementType) -> InputSpec {
    InputSpec {
        batch: 1,
        height: size,
        width: size,
        channels: 3,
        element_type,
    }
}

pub fn model() -> ModelSource {
    ModelSource::Memory(vec![0u8; 16])
}

/// Detector output `[1, 4 + classes, n]` from per-candidate boxes and a
/// per-class score matrix `scores[class][candidate]`.
pub fn detector_output(boxes: &[[f32; 4]], scores: &[Vec<f32>]) -> Tensor<f32> {
    let n = boxes.len();
    let mut data = Vec::with_capacity((4 + scores.len()) * n);
    for row in 0..4 {
        data.extend(boxes.iter().map(|b| b[row]));
    }
    for class in scores {
        assert_eq!(class.len(), n);
        data.extend_from_slice(class);
    }
    Tensor::new(vec![1, 4 + scores.len(), n], data).unwrap()
}

/// Pose output from `(y, x, score)` rows.
pub fn pose_output(rows: &[(f32, f32, f32); 17]) -> Tensor<f32> {
    let data = rows.iter().flat_map(|&(y, x, s)| [y, x, s]).collect();
    Tensor::new(vec![1, 1, 17, 3], data).unwrap()
}

pub fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn assert_box_near(actual: [f32; 4], expected: [f32; 4]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-6, "box {actual:?} != {expected:?}");
    }
}
