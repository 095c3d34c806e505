//! hdrgen Render
//!
//! Turns extracted signatures into header text.

use hdrgen_core::{Error, ExtractConfig, Result, Signature};
use hdrgen_parser::params::strip_parameter_name;
use regex::{NoExpand, Regex};
use serde::Serialize;
use tracing::debug;

/// Shared library extension removed from the declared library name
const SHARED_LIBRARY_SUFFIX: &str = ".so";

/// Library identifier for a declared library name: `libfoo.so` → `libfoo`
pub fn library_identifier(library: &str) -> &str {
    library
        .strip_suffix(SHARED_LIBRARY_SUFFIX)
        .unwrap_or(library)
}

/// The generated header
#[derive(Debug, Clone, Serialize)]
pub struct RenderedHeader {
    /// Library identifier derived from the declared name. Not part of the
    /// text.
    pub library: String,
    /// Signatures that made it into the header, in output order
    pub signatures: Vec<Signature>,
    /// Header text, one `...;` line per signature
    pub text: String,
}

impl RenderedHeader {
    /// Pretty JSON listing of the rendered signatures
    pub fn manifest_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Signature renderer
pub struct Renderer {
    config: ExtractConfig,
    substitutions: Vec<(Regex, String)>,
}

impl Renderer {
    /// Build a renderer from the configuration. Fails if an opaque type name
    /// does not compile into a pattern.
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let substitutions = config
            .opaque_types
            .iter()
            .map(|opaque| {
                let pattern = format!(r"\b{}\b", regex::escape(&opaque.name));
                Regex::new(&pattern)
                    .map(|re| (re, opaque.replacement.clone()))
                    .map_err(|e| Error::Config(format!("opaque type `{}`: {}", opaque.name, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config: config.clone(),
            substitutions,
        })
    }

    /// Render one declaration line, before opaque-type substitution
    pub fn render_declaration(&self, signature: &Signature) -> String {
        let parameters = if self.config.strip_parameter_names {
            signature
                .parameters
                .iter()
                .map(|p| strip_parameter_name(p))
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            signature.parameters.join(", ")
        };
        format!("{} {}({});\n", signature.return_type, signature.name, parameters)
    }

    /// Render the header for `library`. Order is kept; nothing is sorted or
    /// deduplicated.
    pub fn render(&self, signatures: &[Signature], library: &str) -> RenderedHeader {
        let library = library_identifier(library).to_string();

        let kept: Vec<Signature> = signatures
            .iter()
            .filter(|signature| {
                let internal = self.config.is_internal(&signature.name);
                if internal {
                    debug!("Dropping internal function {}", signature.name);
                }
                !internal
            })
            .cloned()
            .collect();

        let mut text: String = kept.iter().map(|s| self.render_declaration(s)).collect();
        for (pattern, replacement) in &self.substitutions {
            text = pattern
                .replace_all(&text, NoExpand(replacement.as_str()))
                .into_owned();
        }

        debug!(
            "Rendered {} of {} signatures for {}",
            kept.len(),
            signatures.len(),
            library
        );

        RenderedHeader {
            library,
            signatures: kept,
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdrgen_core::config::OpaqueType;
    use pretty_assertions::assert_eq;

    fn sig(return_type: &str, name: &str, params: &[&str]) -> Signature {
        Signature::new(return_type, name, params.iter().map(|p| p.to_string()).collect())
    }

    fn render(signatures: &[Signature]) -> String {
        Renderer::new(&ExtractConfig::default())
            .unwrap()
            .render(signatures, "libwrapper.so")
            .text
    }

    #[test]
    fn test_library_identifier() {
        assert_eq!(library_identifier("libstb.so"), "libstb");
        assert_eq!(library_identifier("libstb"), "libstb");
        assert_eq!(library_identifier("libstb.so.1"), "libstb.so.1");
    }

    #[test]
    fn test_render_declaration_line() {
        let text = render(&[sig("void", "foo", &["int x", "char* y"])]);
        assert_eq!(text, "void foo(int x, char* y);\n");
    }

    #[test]
    fn test_empty_parameters() {
        assert_eq!(render(&[sig("int", "now", &[])]), "int now();\n");
    }

    #[test]
    fn test_internal_prefixes_dropped() {
        let text = render(&[
            sig("int", "stbi_load_impl", &[]),
            sig("int", "wrap_stbi_load", &[]),
            sig("int", "stbir_resize", &[]),
            sig("void", "WebPFree", &["void* p"]),
        ]);
        assert_eq!(text, "int wrap_stbi_load();\n");
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let shared = sig("int", "shared", &["void"]);
        let text = render(&[shared.clone(), sig("char", "first", &[]), shared]);
        assert_eq!(text, "int shared(void);\nchar first();\nint shared(void);\n");
    }

    #[test]
    fn test_opaque_type_whole_words_only() {
        let text = render(&[
            sig("void", "render", &["PopplerDocument* doc", "PopplerDocumentInfo* info"]),
            sig("int", "pages", &["const PopplerDocument *doc"]),
        ]);
        assert_eq!(
            text,
            "void render(void* doc, PopplerDocumentInfo* info);\nint pages(const void *doc);\n"
        );
    }

    #[test]
    fn test_replacement_is_literal() {
        let config = ExtractConfig {
            opaque_types: vec![OpaqueType::new("Handle", "$0_t")],
            ..Default::default()
        };
        let header = Renderer::new(&config)
            .unwrap()
            .render(&[sig("void", "close", &["Handle h"])], "libh.so");
        assert_eq!(header.text, "void close($0_t h);\n");
    }

    #[test]
    fn test_strip_parameter_names() {
        let config = ExtractConfig {
            strip_parameter_names: true,
            ..Default::default()
        };
        let header = Renderer::new(&config).unwrap().render(
            &[
                sig("int", "open", &["const char *path", "int flags"]),
                sig("void", "reset", &["void"]),
            ],
            "libio.so",
        );
        assert_eq!(header.text, "int open(const char*, int);\nvoid reset(void);\n");
    }

    #[test]
    fn test_header_metadata_and_manifest() {
        let header = Renderer::new(&ExtractConfig::default()).unwrap().render(
            &[sig("int", "stbi_hidden", &[]), sig("int", "shown", &["int a"])],
            "libstb.so",
        );
        assert_eq!(header.library, "libstb");
        assert_eq!(header.signatures.len(), 1);

        let json: serde_json::Value = serde_json::from_str(&header.manifest_json().unwrap()).unwrap();
        assert_eq!(json["library"], "libstb");
        assert_eq!(json["signatures"][0]["name"], "shown");
        assert_eq!(json["signatures"][0]["parameters"][0], "int a");
    }
}
