use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading line height configuration.
pub enum LineHeightError {
    #[error("line height config parse error: {0}")]
    /// The JSON payload could not be parsed.
    Json(#[from] serde_json::Error),

    #[error("default line height must be positive")]
    /// A default line height of zero was requested.
    ZeroDefaultHeight,
}
