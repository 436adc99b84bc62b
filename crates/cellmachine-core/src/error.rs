//! Error types for the automaton engine

/// Errors raised while constructing a grid-backed engine.
///
/// Steady-state operations (painting, stepping, queries) never fail; out of
/// range coordinates are silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = AutomatonError::InvalidDimensions {
            width: 0,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "invalid grid dimensions 0x5: both must be at least 1"
        );
    }
}
