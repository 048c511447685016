use std::fmt;
use std::path::PathBuf;

/// Where a model blob comes from.
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::File(path) => write!(f, "{}", path.display()),
            ModelSource::Memory(bytes) => write!(f, "<{} bytes in memory>", bytes.len()),
        }
    }
}
