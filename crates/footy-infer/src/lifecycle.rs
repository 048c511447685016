use crate::pack::PackedTensor;
use crate::session::InputSpec;
use crate::{Backend, InferError, ModelSource, Session};
use footy_base::Tensor;
use log::{info, warn};
use std::fmt;

/// Execution configurations tried when loading, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionTier {
    /// Dedicated accelerator (GPU).
    Accelerated,
    /// The platform's own neural-network path.
    PlatformAssisted,
    /// Single-threaded CPU.
    Minimal,
}

impl fmt::Display for ExecutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionTier::Accelerated => write!(f, "accelerated"),
            ExecutionTier::PlatformAssisted => write!(f, "platform-assisted"),
            ExecutionTier::Minimal => write!(f, "minimal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub tier: ExecutionTier,
    pub num_threads: usize,
}

impl SessionConfig {
    pub fn for_tier(tier: ExecutionTier) -> Self {
        let num_threads = match tier {
            ExecutionTier::Accelerated | ExecutionTier::PlatformAssisted => 4,
            ExecutionTier::Minimal => 1,
        };
        Self { tier, num_threads }
    }
}

/// Ordered load attempts. Without `use_accelerator` the accelerated tier is
/// never tried.
pub fn load_plan(use_accelerator: bool) -> Vec<SessionConfig> {
    let tiers: &[ExecutionTier] = if use_accelerator {
        &[
            ExecutionTier::Accelerated,
            ExecutionTier::PlatformAssisted,
            ExecutionTier::Minimal,
        ]
    } else {
        &[ExecutionTier::PlatformAssisted, ExecutionTier::Minimal]
    };
    tiers.iter().copied().map(SessionConfig::for_tier).collect()
}

/// A loaded model together with everything the engine allocated for it.
/// Dropping the handle releases all of it.
pub struct ModelHandle {
    session: Box<dyn Session>,
    tier: ExecutionTier,
}

impl ModelHandle {
    /// Walks the load plan and keeps the first session that loads. Failed
    /// tiers leave nothing behind.
    pub fn load(
        backend: &dyn Backend,
        model: &ModelSource,
        use_accelerator: bool,
    ) -> Result<Self, InferError> {
        load_plan(use_accelerator)
            .into_iter()
            .find_map(|config| match backend.load_model(model, &config) {
                Ok(session) => {
                    info!(
                        "{}: loaded {} on {} tier ({} threads)",
                        backend.name(),
                        model,
                        config.tier,
                        config.num_threads
                    );
                    Some(ModelHandle {
                        session,
                        tier: config.tier,
                    })
                }
                Err(e) => {
                    warn!("{}: {} tier failed for {}: {}", backend.name(), config.tier, model, e);
                    None
                }
            })
            .ok_or_else(|| {
                InferError::ModelLoad(format!("{model}: every execution tier failed"))
            })
    }

    pub fn tier(&self) -> ExecutionTier {
        self.tier
    }

    pub fn input_spec(&self) -> &InputSpec {
        self.session.input_spec()
    }

    pub fn output_shapes(&self) -> &[Vec<usize>] {
        self.session.output_shapes()
    }

    pub fn run(&mut self, input: &PackedTensor) -> Result<Vec<Tensor<f32>>, InferError> {
        self.session.run(input)
    }
}

/// The single active model of one role.
#[derive(Default)]
pub struct ModelSlot {
    handle: Option<ModelHandle>,
}

impl ModelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// Stores `handle`, releasing the previous one first.
    pub fn install(&mut self, handle: ModelHandle) {
        self.dispose();
        self.handle = Some(handle);
    }

    /// Releases the current handle. Returns whether there was one; calling it
    /// on an empty slot is a no-op.
    pub fn dispose(&mut self) -> bool {
        self.handle.take().is_some()
    }

    pub fn get(&self) -> Result<&ModelHandle, InferError> {
        self.handle.as_ref().ok_or(InferError::NotLoaded)
    }

    pub fn get_mut(&mut self) -> Result<&mut ModelHandle, InferError> {
        self.handle.as_mut().ok_or(InferError::NotLoaded)
    }
}
