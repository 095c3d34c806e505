//! `extern "C"` block extractor
//!
//! Used for C++ sources, where only the functions inside a C linkage block
//! are meant to be visible from C. The block body runs up to the first `}`,
//! so a block containing function bodies is cut short at the first closing
//! brace. Flat declaration lists are what this is meant for.

use crate::comments::strip_comments;
use crate::matcher::DeclarationMatcher;
use crate::Extractor;
use hdrgen_core::{Extraction, ExtractConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static LINKAGE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"extern\s+"C"\s*\{([^}]*)\}"#).expect("linkage block pattern"));

/// A located linkage block body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockBody<'a> {
    pub text: &'a str,
    /// Number of lines before the body starts in the source
    pub line_offset: u32,
}

/// Find every `extern "C" { ... }` body, in order
pub fn find_blocks(source: &str) -> Vec<BlockBody<'_>> {
    LINKAGE_BLOCK
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|body| BlockBody {
            text: body.as_str(),
            line_offset: source[..body.start()].matches('\n').count() as u32,
        })
        .collect()
}

pub struct BlockExtractor<'c> {
    config: &'c ExtractConfig,
}

impl<'c> BlockExtractor<'c> {
    pub fn new(config: &'c ExtractConfig) -> Self {
        Self { config }
    }
}

impl Extractor for BlockExtractor<'_> {
    fn extract(&self, source: &str, filename: &str) -> Extraction {
        let blocks = find_blocks(source);
        if blocks.is_empty() {
            debug!("No extern \"C\" block in {}", filename);
            return Extraction::default();
        }

        let matcher = DeclarationMatcher::new(self.config).with_extern();
        let mut extraction = Extraction::default();

        for block in blocks {
            let cleaned = strip_comments(block.text);
            let scan = matcher.scan(&cleaned, filename);

            extraction.signatures.extend(scan.declarations.into_iter().map(|decl| {
                let mut signature = decl.into_signature();
                signature.location = signature
                    .location
                    .map(|loc| loc.offset_lines(block.line_offset));
                signature
            }));
            extraction
                .diagnostics
                .extend(scan.diagnostics.into_iter().map(|mut diagnostic| {
                    diagnostic.location = diagnostic.location.offset_lines(block.line_offset);
                    diagnostic
                }));
        }

        extraction
    }

    fn name(&self) -> &str {
        "linkage-block"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(extraction: &Extraction) -> Vec<&str> {
        extraction.signatures.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_no_block_means_nothing() {
        let config = ExtractConfig::default();
        let source = "int visible(void);\nint also_visible(int x) { return x; }\n";
        let extraction = BlockExtractor::new(&config).extract(source, "plain.cc");
        assert!(extraction.is_empty());
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_find_blocks_offsets() {
        let source = "#include <x.h>\n\nextern \"C\" {\nint a(void);\n}\nextern \"C\"{int b(void);}";
        let blocks = find_blocks(source);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].line_offset, 2);
        assert_eq!(blocks[0].text, "\nint a(void);\n");
        assert_eq!(blocks[1].text, "int b(void);");
    }

    #[test]
    fn test_multiple_blocks_in_order() {
        let config = ExtractConfig::default();
        let source = r#"
static int helper(int a) { return a; }

extern "C" {
// Public API
int first(const char* path);
/* deprecated:
int ghost(void);
*/
extern void second(void);
}

namespace impl { void hidden(); }

extern "C" {
size_t* third(size_t n);
}
"#;
        let extraction = BlockExtractor::new(&config).extract(source, "api.cc");
        assert_eq!(names(&extraction), vec!["first", "second", "third"]);
        assert_eq!(extraction.signatures[0].parameters, vec!["const char* path".to_string()]);
        assert_eq!(extraction.signatures[2].return_type, "size_t*");

        let first = extraction.signatures[0].location.as_ref().unwrap();
        assert_eq!(first.line, 6);
        let third = extraction.signatures[2].location.as_ref().unwrap();
        assert_eq!(third.line, 16);
    }

    #[test]
    fn test_multiline_comment_keeps_following_code_on_its_own_line() {
        let config = ExtractConfig::default();
        let source = "extern \"C\" {\nx /*\n*/int b(void);\n}\n";
        let extraction = BlockExtractor::new(&config).extract(source, "api.cc");
        assert_eq!(names(&extraction), vec!["b"]);
        assert_eq!(extraction.signatures[0].location.as_ref().unwrap().line, 3);
    }

    #[test]
    fn test_block_stops_at_first_closing_brace() {
        let config = ExtractConfig::default();
        let source = "extern \"C\" {\nint one(void) { return 1; }\nint two(void) { return 2; }\n}\n";
        let extraction = BlockExtractor::new(&config).extract(source, "defs.cc");
        assert_eq!(names(&extraction), vec!["one"]);
    }
}
