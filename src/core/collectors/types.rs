use super::error::CollectorError;

/// Result alias used throughout the collector system.
///
/// Anything that touches a pseudo-file, spawns a report command, or parses
/// captured text returns this, keeping the error surface uniform for the
/// snapshot layer.
pub type CollectorResult<T> = std::result::Result<T, CollectorError>;
