//! Error types for chain model construction and terminal resolution.

use thiserror::Error;

use crate::resolver::Direction;

/// Errors raised while normalizing a chain description or resolving a
/// terminal reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A named terminal reference matched zero or more than one terminal
    /// declaration. This is the only recoverable compilation error: the
    /// driver reports it and moves on to the next chain in the batch.
    #[error("'{operator}.{terminal}' ({direction}). {count} definitions found. Expected exactly 1")]
    Terminal {
        /// Operator the reference names.
        operator: String,
        /// Terminal the reference names.
        terminal: String,
        /// Whether a sink or a source was requested.
        direction: Direction,
        /// Number of matching declarations (0 or > 1).
        count: usize,
    },

    /// An endpoint or connection reference did not split into exactly an
    /// operator and a terminal component. Well-formed input never produces
    /// this; it indicates a defective chain description.
    #[error("terminal reference '{text}' must be of the form 'operator.terminal'")]
    MalformedRef {
        /// The offending reference text.
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_error_display_matches_reporting_format() {
        let err = ModelError::Terminal {
            operator: "op1".to_string(),
            terminal: "sink0".to_string(),
            direction: Direction::Sink,
            count: 0,
        };
        assert_eq!(
            err.to_string(),
            "'op1.sink0' (sink). 0 definitions found. Expected exactly 1"
        );
    }

    #[test]
    fn terminal_error_display_reports_duplicates() {
        let err = ModelError::Terminal {
            operator: "mixer".to_string(),
            terminal: "out".to_string(),
            direction: Direction::Source,
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "'mixer.out' (source). 2 definitions found. Expected exactly 1"
        );
    }

    #[test]
    fn malformed_ref_display() {
        let err = ModelError::MalformedRef {
            text: "op1-sink0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("op1-sink0"), "got: {msg}");
        assert!(msg.contains("operator.terminal"), "got: {msg}");
    }
}
