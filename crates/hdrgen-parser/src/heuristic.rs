//! Line-based function extractor for plain C sources
//!
//! Walks the source once, cleaning comments out of the lines that belong to
//! a function head, then runs the declaration matcher over the rebuilt text.
//! Matches whose (return type, name) pair is also declared `static` anywhere
//! in the file are dropped. `extern` prototypes name functions defined
//! elsewhere and are never matched.

use crate::comments::{clean_line, strip_comments};
use crate::lexer::{tokenize, Lexer, TokenKind};
use crate::matcher::{skip_newlines, DeclarationMatcher};
use crate::Extractor;
use hdrgen_core::{Extraction, ExtractConfig};
use std::collections::HashSet;
use tracing::debug;

/// Words that may sit between `static` and the return type
const LINKAGE_MODIFIERS: &[&str] = &["inline", "__inline", "__inline__"];

pub struct HeuristicExtractor<'c> {
    config: &'c ExtractConfig,
}

impl<'c> HeuristicExtractor<'c> {
    pub fn new(config: &'c ExtractConfig) -> Self {
        Self { config }
    }

    /// Rebuild the source with comments removed from function-head lines.
    ///
    /// A head opens on a line whose first token is a known base type and
    /// which contains `(`. Lines stay "inside" until a line holding `{`
    /// brings the running brace balance to zero or below. Line count is
    /// preserved.
    pub fn reconstruct(&self, source: &str) -> String {
        let mut inside = false;
        let mut depth: i64 = 0;
        let mut lines = Vec::new();

        for line in source.split('\n') {
            if !inside && self.opens_function(line) {
                inside = true;
                depth = 0;
            }

            if inside {
                lines.push(clean_line(line));
                depth += line.matches('{').count() as i64 - line.matches('}').count() as i64;
                if depth <= 0 && line.contains('{') {
                    inside = false;
                }
            } else {
                lines.push(line.to_string());
            }
        }

        lines.join("\n")
    }

    fn opens_function(&self, line: &str) -> bool {
        if !line.contains('(') {
            return false;
        }
        Lexer::new(line)
            .next()
            .map_or(false, |t| t.kind == TokenKind::Ident && self.config.is_base_type(t.text))
    }

    /// Collect every `static [inline] return_type name (` head in the source,
    /// ignoring comments
    pub fn internal_keys(&self, source: &str) -> HashSet<(String, String)> {
        let matcher = DeclarationMatcher::new(self.config);
        let code = strip_comments(source);
        let tokens = tokenize(&code);
        let mut keys = HashSet::new();

        for (i, token) in tokens.iter().enumerate() {
            if !token.is_ident("static") {
                continue;
            }
            let mut j = skip_newlines(&tokens, i + 1);
            while tokens
                .get(j)
                .map_or(false, |t| LINKAGE_MODIFIERS.iter().any(|m| t.is_ident(m)))
            {
                j = skip_newlines(&tokens, j + 1);
            }
            if let Some(head) = matcher.head_at(&tokens, j) {
                keys.insert((head.return_type, head.name.to_string()));
            }
        }

        keys
    }
}

impl Extractor for HeuristicExtractor<'_> {
    fn extract(&self, source: &str, filename: &str) -> Extraction {
        let rebuilt = self.reconstruct(source);
        let scan = DeclarationMatcher::new(self.config).scan(&rebuilt, filename);
        let internal = self.internal_keys(source);

        let signatures = scan
            .declarations
            .into_iter()
            .filter(|decl| {
                let key = (decl.return_type.clone(), decl.name.clone());
                let keep = !internal.contains(&key);
                if !keep {
                    debug!("Skipping static {} {}() in {}", decl.return_type, decl.name, filename);
                }
                keep
            })
            .map(|decl| decl.into_signature())
            .collect();

        Extraction {
            signatures,
            diagnostics: scan.diagnostics,
        }
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
