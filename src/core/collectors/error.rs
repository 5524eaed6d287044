use thiserror::Error;

use crate::core::parse::ParseError;

/// Error type shared by every inventory collector.
///
/// The taxonomy separates three situations the snapshot layer treats
/// differently: a report that violates a required line shape (fatal for
/// that one source), a missing pseudo-file or external command (an
/// environment concern, logged and skipped), and registry lookups gone
/// wrong.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// A pseudo-file or system table could not be read.
    #[error("failed to read {path}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A single field could not be extracted from otherwise readable text.
    #[error("failed to parse {metric} from {location}: {reason}")]
    ParseError {
        metric: String,
        location: String,
        reason: String,
    },

    /// The report text violated a line shape the parser requires with no
    /// fallback. Fatal for the one source, never retried.
    #[error("invalid format in {location}: {reason}")]
    InvalidFormat { location: String, reason: String },

    /// A syscall-level query (statvfs and friends) failed.
    #[error("system call failed: {syscall} - {reason}")]
    SystemCall { syscall: String, reason: String },

    /// An external report command could not be spawned or exited badly.
    #[error("command '{command}' failed: {source}")]
    CommandExecution {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A collector name was requested that is not in the registry.
    #[error("collector not found: {0}")]
    CollectorNotFound(String),

    /// The collector exists but cannot run here (non-Linux build).
    #[error("unsupported collector: {0}")]
    Unsupported(String),
}

impl CollectorError {
    /// Wraps a core parse failure with the report location it came from.
    pub fn from_parse(location: &str, err: ParseError) -> Self {
        CollectorError::InvalidFormat {
            location: location.to_string(),
            reason: err.to_string(),
        }
    }
}
