//! Source code location types

use serde::{Deserialize, Serialize};

/// Position of a declaration or diagnostic in a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path
    pub file: String,
    /// Line (1-based)
    pub line: u32,
    /// Column (0-based)
    pub column: u32,
}

impl Location {
    /// Create a new location
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Same position shifted down by `lines`, used when a fragment of a file
    /// is lexed on its own.
    pub fn offset_lines(mut self, lines: u32) -> Self {
        self.line += lines;
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_offset() {
        let loc = Location::new("wrapper.c", 3, 0).offset_lines(10);
        assert_eq!(loc.line, 13);
        assert_eq!(loc.to_string(), "wrapper.c:13:0");
    }
}
