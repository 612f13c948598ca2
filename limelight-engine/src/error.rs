//! Engine errors

use alloc::string::String;
use core::fmt;

/// Engine error.
///
/// Cross-origin frame inaccessibility is deliberately not represented
/// here: it is an expected condition handled inside the frame walk and is
/// never surfaced to callers.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Malformed `on` registration (unknown event name, mismatched
    /// handler shape).
    InvalidArgument(String),
    /// The inspector overlay could not be resolved.
    Resolution(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            EngineError::Resolution(msg) => write!(f, "inspector resolution failed: {}", msg),
        }
    }
}
