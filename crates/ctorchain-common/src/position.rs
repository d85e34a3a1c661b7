use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based line/column position inside a named source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    #[serde(default = "default_line")]
    pub line: u32,
    #[serde(default = "default_line")]
    pub column: u32,
}

const fn default_line() -> u32 {
    1
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
