use crate::lifecycle::SessionConfig;
use crate::{InferError, ModelSource, Session};

/// An inference engine that can turn a model blob into a runnable session.
pub trait Backend {
    fn name(&self) -> &str;

    /// Loads `model` with the execution settings of one tier. A failure here
    /// makes the caller move on to the next tier.
    fn load_model(
        &self,
        model: &ModelSource,
        config: &SessionConfig,
    ) -> Result<Box<dyn Session>, InferError>;
}
