//! Error types for the field core.

use thiserror::Error;

/// Failures reported by an output surface while drawing or resizing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface was lost and must be reconfigured.
    #[error("output surface lost")]
    Lost,
    /// The surface no longer matches the window and must be reconfigured.
    #[error("output surface outdated")]
    Outdated,
    #[error("out of memory while acquiring a frame")]
    OutOfMemory,
    #[error("timed out acquiring a frame")]
    Timeout,
    #[error("surface error: {0}")]
    Other(String),
}

/// Reasons an amplitude frame is rejected before reaching the physics step.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SignalError {
    #[error("amplitude frame is empty")]
    EmptySample,
    #[error("amplitude frame has a non-finite value at index {index}")]
    NonFinite { index: usize },
}

/// Errors produced by configuration checks and render loop transitions.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid field config: {0}")]
    InvalidConfig(String),

    /// A lifecycle call arrived in a state that does not allow it.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_both_states() {
        let err = FieldError::InvalidTransition {
            from: "stopped",
            to: "running",
        };
        let msg = format!("{err}");
        assert!(msg.contains("stopped"), "missing source state in: {msg}");
        assert!(msg.contains("running"), "missing target state in: {msg}");
    }

    #[test]
    fn non_finite_reports_index() {
        let msg = format!("{}", SignalError::NonFinite { index: 17 });
        assert!(msg.contains("17"), "missing index in: {msg}");
    }

    #[test]
    fn surface_error_converts_into_field_error() {
        let err: FieldError = SurfaceError::OutOfMemory.into();
        assert!(matches!(err, FieldError::Surface(SurfaceError::OutOfMemory)));
    }
}
