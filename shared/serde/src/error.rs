use thiserror::Error;

/// Returned when a buffer cannot be read back into the requested type,
/// either because it ended early or because it held an out-of-range value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to deserialize: buffer is malformed or truncated")]
pub struct SerdeErr;
