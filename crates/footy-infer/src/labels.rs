use crate::InferError;
use std::fs;
use std::path::Path;

/// Reads a label file: one label per line, surrounding whitespace trimmed,
/// blank lines skipped. Order is the model's class order.
pub fn load_labels(path: impl AsRef<Path>) -> Result<Vec<String>, InferError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| InferError::Io(format!("{}: {e}", path.display())))?;
    Ok(parse_labels(&text))
}

pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Index of the first label naming a ball, case-insensitive: contains
/// "soccer", contains "sports ball", or is exactly "ball".
pub fn find_ball_class(labels: &[String]) -> Option<usize> {
    labels.iter().position(|label| {
        let label = label.to_lowercase();
        label.contains("soccer") || label.contains("sports ball") || label == "ball"
    })
}
