//! Configuration types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extraction and rendering configuration.
///
/// The defaults reproduce the behaviour of the original build script, so an
/// empty config file and no config file at all give the same header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Return type spellings a declaration may start with. Pointer stars are
    /// written without spaces (`char*`).
    pub return_types: Vec<String>,

    /// Name prefixes of library-private helpers that never reach the header
    pub internal_prefixes: Vec<String>,

    /// Type names replaced in the rendered header
    pub opaque_types: Vec<OpaqueType>,

    /// File extensions routed to the `extern "C"` block extractor
    pub block_extensions: Vec<String>,

    /// Render `int foo(const char*)` instead of `int foo(const char* path)`
    pub strip_parameter_names: bool,
}

/// A type that is hidden from header consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueType {
    /// Type name as written in the library source
    pub name: String,
    /// Spelling used in the header instead
    pub replacement: String,
}

impl OpaqueType {
    pub fn new(name: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replacement: replacement.into(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            return_types: [
                "void", "void*", "char", "uint32_t", "uint32_t*", "size_t*", "size_t", "char*",
                "int", "int*", "float", "float*", "double", "double*",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            internal_prefixes: vec!["stbi_".into(), "stbir_".into(), "WebP".into()],
            opaque_types: vec![OpaqueType::new("PopplerDocument", "void")],
            block_extensions: vec!["cc".into()],
            strip_parameter_names: false,
        }
    }
}

impl ExtractConfig {
    /// Load a configuration file. `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config: ExtractConfig = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the tables for spellings the matcher could never produce
    pub fn validate(&self) -> Result<()> {
        if self.return_types.is_empty() {
            return Err(Error::Config("return_types must not be empty".into()));
        }
        for spelling in &self.return_types {
            let base = spelling.trim_end_matches('*');
            if !is_identifier(base) {
                return Err(Error::Config(format!(
                    "invalid return type `{}`: expected an identifier followed by `*`s",
                    spelling
                )));
            }
        }
        if self.internal_prefixes.iter().any(|p| p.is_empty()) {
            return Err(Error::Config(
                "internal_prefixes must not contain an empty prefix".into(),
            ));
        }
        for opaque in &self.opaque_types {
            if !is_identifier(&opaque.name) {
                return Err(Error::Config(format!(
                    "invalid opaque type name `{}`",
                    opaque.name
                )));
            }
        }
        Ok(())
    }

    pub fn is_return_type(&self, spelling: &str) -> bool {
        self.return_types.iter().any(|t| t == spelling)
    }

    /// Whether `ident` is the base of some configured return type
    /// (`char` for `char*`). Used to spot lines that open a definition.
    pub fn is_base_type(&self, ident: &str) -> bool {
        self.return_types
            .iter()
            .any(|t| t.trim_end_matches('*') == ident)
    }

    pub fn is_internal(&self, name: &str) -> bool {
        self.internal_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

/// C identifier check: `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
