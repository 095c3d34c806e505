//! Core type definitions

use crate::location::Location;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One extracted function declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Return type spelling, normalized (`char *` becomes `char*`)
    pub return_type: String,
    /// Function name
    pub name: String,
    /// Raw parameter fragments in declaration order
    pub parameters: Vec<String>,
    /// Where the declaration starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Signature {
    pub fn new(
        return_type: impl Into<String>,
        name: impl Into<String>,
        parameters: Vec<String>,
    ) -> Self {
        Self {
            return_type: return_type.into(),
            name: name.into(),
            parameters,
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// Which extraction pipeline a source file goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// C++ source; only `extern "C"` blocks are scanned
    LinkageBlock,
    /// Plain C source scanned line by line
    Heuristic,
}

impl SourceKind {
    /// Resolve the kind from a file name. Extensions are compared exactly.
    pub fn for_path(path: &Path, block_extensions: &[String]) -> Self {
        let is_block = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| block_extensions.iter().any(|candidate| candidate == ext))
            .unwrap_or(false);

        if is_block {
            SourceKind::LinkageBlock
        } else {
            SourceKind::Heuristic
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::LinkageBlock => write!(f, "linkage-block"),
            SourceKind::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// The text of one input file and the pipeline chosen for it
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: String,
    pub text: String,
    pub kind: SourceKind,
}

impl SourceDocument {
    pub fn new(path: impl Into<String>, text: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            kind,
        }
    }
}

/// Non-fatal problem found while matching a declaration head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// `type name (` with no closing parenthesis before end of text
    UnterminatedParameterList,
    /// `type name (` whose return type is not in the configured table
    UnsupportedReturnType(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub location: Location,
    pub kind: DiagnosticKind,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::UnterminatedParameterList => {
                write!(f, "{}: unterminated parameter list", self.location)
            }
            DiagnosticKind::UnsupportedReturnType(spelling) => {
                write!(f, "{}: unsupported return type `{}`", self.location, spelling)
            }
        }
    }
}

/// Result of running one extractor over one document
#[derive(Debug, Default, Clone)]
pub struct Extraction {
    /// Signatures in order of appearance
    pub signatures: Vec<Signature>,
    /// Parse diagnostics (non-fatal)
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// Append another extraction, keeping order
    pub fn merge(&mut self, other: Extraction) {
        self.signatures.extend(other.signatures);
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_source_kind_routing() {
        let exts = vec!["cc".to_string()];
        assert_eq!(
            SourceKind::for_path(&PathBuf::from("src/plugin-pinyin.cc"), &exts),
            SourceKind::LinkageBlock
        );
        assert_eq!(
            SourceKind::for_path(&PathBuf::from("src/stb_wrapper.c"), &exts),
            SourceKind::Heuristic
        );
        assert_eq!(
            SourceKind::for_path(&PathBuf::from("src/thing.cpp"), &exts),
            SourceKind::Heuristic
        );
        assert_eq!(
            SourceKind::for_path(&PathBuf::from("Makefile"), &exts),
            SourceKind::Heuristic
        );
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut first = Extraction {
            signatures: vec![Signature::new("int", "a", vec![])],
            diagnostics: vec![],
        };
        first.merge(Extraction {
            signatures: vec![Signature::new("int", "b", vec![])],
            diagnostics: vec![],
        });
        let names: Vec<_> = first.signatures.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_signature_location() {
        let sig = Signature::new("char*", "dup", vec!["const char* s".into()]);
        assert!(sig.location.is_none());
        let sig = sig.with_location(Location::new("dup.c", 4, 0));
        assert_eq!(sig.location.unwrap().line, 4);
    }
}
