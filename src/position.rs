//! Source locations attached to definition elements and validation errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A location in the schema source (1-based line and column).
///
/// `name` is the source file or document name when the parser knows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            name: None,
            line,
            column,
        }
    }

    /// Creates a position inside a named source.
    pub fn in_source(name: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            name: Some(name.into()),
            line,
            column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}({},{})", name, self.line, self.column),
            None => write!(f, "({},{})", self.line, self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SourcePosition;

    #[test]
    fn display_includes_source_name_when_known() {
        let pos = SourcePosition::in_source("widgets.fsd", 12, 3);
        assert_eq!(pos.to_string(), "widgets.fsd(12,3)");
        assert_eq!(SourcePosition::new(4, 1).to_string(), "(4,1)");
    }

    #[test]
    fn positions_order_by_source_then_line() {
        let a = SourcePosition::new(2, 9);
        let b = SourcePosition::new(3, 1);
        assert!(a < b);
    }
}
