use crate::lifecycle::{ExecutionTier, SessionConfig};
use crate::pack::{ElementType, PackedTensor};
use crate::session::InputSpec;
use crate::{Backend, InferError, ModelSource, Session};
use footy_base::Tensor;
use log::debug;
use ndarray::{ArrayD, IxDyn};
use ort::execution_providers::ExecutionProviderDispatch;
use ort::session::Session as OrtSession;
use ort::tensor::TensorElementType;
use ort::value::{DynValue, Tensor as OrtTensor, ValueType};

/// ONNX Runtime. Models are expected to take a single NHWC image input.
pub struct OnnxBackend;

/// Execution providers for one tier. Providers are registered with
/// `error_on_failure` so an unavailable provider fails the tier instead of
/// silently running on CPU.
fn execution_providers(tier: ExecutionTier) -> Result<Vec<ExecutionProviderDispatch>, InferError> {
    match tier {
        #[cfg(feature = "cuda")]
        ExecutionTier::Accelerated => {
            use ort::execution_providers::CUDAExecutionProvider;
            Ok(vec![CUDAExecutionProvider::default().build().error_on_failure()])
        }
        #[cfg(not(feature = "cuda"))]
        ExecutionTier::Accelerated => Err(InferError::ModelLoad(
            "built without an accelerator execution provider".to_string(),
        )),
        #[cfg(target_os = "android")]
        ExecutionTier::PlatformAssisted => {
            use ort::execution_providers::NNAPIExecutionProvider;
            Ok(vec![NNAPIExecutionProvider::default().build().error_on_failure()])
        }
        #[cfg(not(target_os = "android"))]
        ExecutionTier::PlatformAssisted => {
            use ort::execution_providers::XNNPACKExecutionProvider;
            Ok(vec![XNNPACKExecutionProvider::default().build().error_on_failure()])
        }
        ExecutionTier::Minimal => Ok(Vec::new()),
    }
}

/// Element type and dimensions of a tensor input or output. Dynamic
/// dimensions are reported as negative numbers.
fn tensor_meta(value_type: &ValueType) -> Result<(TensorElementType, Vec<i64>), InferError> {
    match value_type {
        ValueType::Tensor { ty, shape, .. } => Ok((*ty, shape.iter().copied().collect())),
        other => Err(InferError::UnsupportedDtype(format!(
            "expected a tensor, got {other:?}"
        ))),
    }
}

/// Dynamic dimensions become 0, except a dynamic leading dimension which
/// becomes `batch`.
fn static_dims(dims: &[i64], batch: usize) -> Vec<usize> {
    dims.iter()
        .enumerate()
        .map(|(i, &d)| match d {
            d if d > 0 => d as usize,
            _ if i == 0 => batch,
            _ => 0,
        })
        .collect()
}

fn element_type(ty: TensorElementType) -> Result<ElementType, InferError> {
    match ty {
        TensorElementType::Uint8 => Ok(ElementType::U8),
        TensorElementType::Int8 => Ok(ElementType::I8),
        TensorElementType::Float32 => Ok(ElementType::F32),
        other => Err(InferError::UnsupportedDtype(format!("input element type {other:?}"))),
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(
        &self,
        model: &ModelSource,
        config: &SessionConfig,
    ) -> Result<Box<dyn Session>, InferError> {
        let builder = OrtSession::builder()
            .and_then(|b| b.with_intra_threads(config.num_threads))
            .map_err(|e| InferError::ModelLoad(format!("failed to create session builder: {e}")))?
            .with_execution_providers(execution_providers(config.tier)?)
            .map_err(|e| {
                InferError::ModelLoad(format!("{} execution provider unavailable: {e}", config.tier))
            })?;

        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(path),
            ModelSource::Memory(bytes) => builder.commit_from_memory(bytes),
        }
        .map_err(|e| InferError::ModelLoad(format!("failed to load {model}: {e}")))?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| InferError::ModelLoad(format!("{model} declares no inputs")))?;
        let (ty, dims) = tensor_meta(&input.input_type)?;
        let input_spec = InputSpec::from_nhwc(&static_dims(&dims, 1), element_type(ty)?)?;
        let input_name = input.name.clone();

        let mut output_names = Vec::with_capacity(session.outputs.len());
        let mut output_shapes = Vec::with_capacity(session.outputs.len());
        for output in &session.outputs {
            let (_, dims) = tensor_meta(&output.output_type)?;
            output_names.push(output.name.clone());
            output_shapes.push(static_dims(&dims, 0));
        }

        debug!(
            "[onnx] {} input '{}' {:?}, outputs {:?} {:?}",
            model, input_name, input_spec, output_names, output_shapes
        );

        Ok(Box::new(OnnxSession {
            session,
            input_name,
            input_spec,
            output_names,
            output_shapes,
        }))
    }
}

/// Field order is drop order: the runtime session, and with it any provider
/// it holds, is released first.
pub struct OnnxSession {
    session: OrtSession,
    input_name: String,
    input_spec: InputSpec,
    output_names: Vec<String>,
    output_shapes: Vec<Vec<usize>>,
}

fn to_value(input: &PackedTensor) -> Result<DynValue, InferError> {
    let shape = IxDyn(&input.shape);
    let value = match input.element_type {
        ElementType::U8 => {
            let array = ArrayD::from_shape_vec(shape, input.bytes.clone())
                .map_err(|e| InferError::Shape(e.to_string()))?;
            OrtTensor::from_array(array).map(|t| t.into_dyn())
        }
        ElementType::I8 => {
            let data = input.bytes.iter().map(|&b| b as i8).collect();
            let array = ArrayD::from_shape_vec(shape, data)
                .map_err(|e| InferError::Shape(e.to_string()))?;
            OrtTensor::from_array(array).map(|t| t.into_dyn())
        }
        ElementType::F32 => {
            let data = input.as_f32().unwrap_or_default();
            let array = ArrayD::from_shape_vec(shape, data)
                .map_err(|e| InferError::Shape(e.to_string()))?;
            OrtTensor::from_array(array).map(|t| t.into_dyn())
        }
    };
    value.map_err(|e| InferError::Runtime(format!("failed to create input tensor: {e}")))
}

fn ndarray_to_tensor(array: ndarray::ArrayViewD<'_, f32>) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}

impl Session for OnnxSession {
    fn input_spec(&self) -> &InputSpec {
        &self.input_spec
    }

    fn output_shapes(&self) -> &[Vec<usize>] {
        &self.output_shapes
    }

    fn run(&mut self, input: &PackedTensor) -> Result<Vec<Tensor<f32>>, InferError> {
        let value = to_value(input)?;
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => value])
            .map_err(|e| InferError::Runtime(format!("inference failed: {e}")))?;

        self.output_names
            .iter()
            .map(|name| {
                let array = outputs[name.as_str()].try_extract_array::<f32>().map_err(|e| {
                    InferError::UnsupportedDtype(format!("output '{name}' is not f32: {e}"))
                })?;
                ndarray_to_tensor(array)
            })
            .collect()
    }
}
