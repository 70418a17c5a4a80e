//! Symbolic-to-numeric terminal resolution.

use std::fmt;

use crate::error::ModelError;
use crate::model::Operator;

/// Which side of an operator a terminal reference names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// An input terminal of an operator.
    Sink,
    /// An output terminal of an operator.
    Source,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Sink => f.write_str("sink"),
            Direction::Source => f.write_str("source"),
        }
    }
}

/// Resolves `(operator name, terminal name, direction)` to a numeric
/// terminal index.
///
/// This is the sole point of symbolic-to-numeric translation in the
/// compiler. Resolution succeeds only when exactly one terminal declaration
/// matches; zero or multiple matches produce [`ModelError::Terminal`] with
/// the match count, which the driver reports against the failing chain.
pub struct TerminalResolver<'a> {
    operators: &'a [Operator],
}

impl<'a> TerminalResolver<'a> {
    /// Create a resolver over a chain's operator declarations.
    pub fn new(operators: &'a [Operator]) -> Self {
        Self { operators }
    }

    /// Resolve a terminal reference to its numeric index.
    ///
    /// All operator declarations are searched, so a duplicated operator name
    /// counts as multiple matches just like a duplicated terminal name.
    pub fn resolve(
        &self,
        operator: &str,
        terminal: &str,
        direction: Direction,
    ) -> Result<u32, ModelError> {
        let matches: Vec<u32> = self
            .operators
            .iter()
            .filter(|op| op.name == operator)
            .flat_map(|op| match direction {
                Direction::Sink => op.sinks.iter(),
                Direction::Source => op.sources.iter(),
            })
            .filter(|t| t.name == terminal)
            .map(|t| t.index)
            .collect();

        if matches.len() == 1 {
            Ok(matches[0])
        } else {
            Err(ModelError::Terminal {
                operator: operator.to_string(),
                terminal: terminal.to_string(),
                direction,
                count: matches.len(),
            })
        }
    }
}
