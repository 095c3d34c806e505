//! Declaration matcher
//!
//! Recognizes the restricted grammar
//!
//! ```text
//! declaration := ["extern"] return_type IDENT param_group
//! return_type := IDENT "*"*
//! param_group := "(" balanced tokens ")"
//! ```
//!
//! at the start of a line (column 0). The return type spelling, with stars
//! glued to the base identifier, has to appear in the configured table.
//! The leading `extern` is only accepted when the matcher is built with
//! [`DeclarationMatcher::with_extern`].

use crate::lexer::{tokenize, Token, TokenKind};
use crate::params::normalize_fragment;
use hdrgen_core::{Diagnostic, DiagnosticKind, ExtractConfig, Location, Signature};
use tracing::trace;

/// A matched declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<String>,
    pub location: Location,
}

impl Declaration {
    pub fn into_signature(self) -> Signature {
        Signature::new(self.return_type, self.name, self.parameters).with_location(self.location)
    }
}

/// Everything one scan over a text produced
#[derive(Debug, Default, Clone)]
pub struct Scan {
    pub declarations: Vec<Declaration>,
    pub diagnostics: Vec<Diagnostic>,
}

/// `return_type name (`
#[derive(Debug, Clone)]
pub(crate) struct Head<'a> {
    pub return_type: String,
    pub name: &'a str,
    pub start: Token<'a>,
    /// Index of the opening parenthesis
    pub lparen: usize,
}

pub struct DeclarationMatcher<'c> {
    config: &'c ExtractConfig,
    allow_extern: bool,
}

impl<'c> DeclarationMatcher<'c> {
    pub fn new(config: &'c ExtractConfig) -> Self {
        Self {
            config,
            allow_extern: false,
        }
    }

    /// Also match heads prefixed with `extern`
    pub fn with_extern(mut self) -> Self {
        self.allow_extern = true;
        self
    }

    /// Match declarations at every line start of `text`.
    ///
    /// Locations are relative to `text`; callers that scan a slice of a file
    /// shift them afterwards.
    pub fn scan(&self, text: &str, file: &str) -> Scan {
        let tokens = tokenize(text);
        let mut scan = Scan::default();
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];
            if token.kind == TokenKind::Newline || token.column != 0 {
                i += 1;
                continue;
            }

            match self.match_declaration(text, &tokens, i, file) {
                Ok(Some((declaration, next))) => {
                    trace!("Matched {} {}()", declaration.return_type, declaration.name);
                    scan.declarations.push(declaration);
                    i = next;
                }
                Ok(None) => i += 1,
                Err(diagnostic) => {
                    scan.diagnostics.push(diagnostic);
                    i += 1;
                }
            }
        }

        scan
    }

    /// Try to match one declaration starting at `tokens[start]`. On success
    /// returns the declaration and the index just past its parameter group.
    fn match_declaration(
        &self,
        text: &str,
        tokens: &[Token<'_>],
        start: usize,
        file: &str,
    ) -> Result<Option<(Declaration, usize)>, Diagnostic> {
        let mut i = start;
        if self.allow_extern && tokens[i].is_ident("extern") {
            i = skip_newlines(tokens, i + 1);
        }

        let head = match self.head_at(tokens, i) {
            Some(head) => head,
            None => return Ok(None),
        };

        if !self.config.is_return_type(&head.return_type) {
            return Err(Diagnostic {
                location: location_of(&head.start, file),
                kind: DiagnosticKind::UnsupportedReturnType(head.return_type),
            });
        }

        let (parameters, rparen) = split_parameter_group(text, tokens, head.lparen)
            .ok_or_else(|| Diagnostic {
                location: location_of(&tokens[head.lparen], file),
                kind: DiagnosticKind::UnterminatedParameterList,
            })?;

        let declaration = Declaration {
            return_type: head.return_type,
            name: head.name.to_string(),
            parameters,
            location: location_of(&tokens[start], file),
        };
        Ok(Some((declaration, rparen + 1)))
    }

    /// Parse `return_type IDENT (` at `tokens[i]`, without checking the
    /// spelling against the table. Newlines between the parts are allowed.
    pub(crate) fn head_at<'a>(&self, tokens: &[Token<'a>], i: usize) -> Option<Head<'a>> {
        let base = tokens.get(i)?;
        if base.kind != TokenKind::Ident || !self.config.is_base_type(base.text) {
            return None;
        }

        let mut return_type = base.text.to_string();
        let mut j = skip_newlines(tokens, i + 1);
        while tokens.get(j)?.kind == TokenKind::Star {
            return_type.push('*');
            j = skip_newlines(tokens, j + 1);
        }

        let name = tokens.get(j)?;
        if name.kind != TokenKind::Ident {
            return None;
        }

        let lparen = skip_newlines(tokens, j + 1);
        if tokens.get(lparen)?.kind != TokenKind::LParen {
            return None;
        }

        Some(Head {
            return_type,
            name: name.text,
            start: *base,
            lparen,
        })
    }
}

pub(crate) fn skip_newlines(tokens: &[Token<'_>], mut i: usize) -> usize {
    while tokens.get(i).map_or(false, |t| t.kind == TokenKind::Newline) {
        i += 1;
    }
    i
}

/// Walk a balanced parenthesis group starting at `tokens[lparen]` and split
/// its contents on top-level commas. Returns the fragments and the index of
/// the closing parenthesis, or `None` if the group never closes.
fn split_parameter_group(
    text: &str,
    tokens: &[Token<'_>],
    lparen: usize,
) -> Option<(Vec<String>, usize)> {
    let mut depth = 0usize;
    let mut fragment_start = tokens[lparen].end();
    let mut fragments = Vec::new();

    for (k, token) in tokens.iter().enumerate().skip(lparen) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth -= 1;
                if depth == 0 {
                    fragments.push(normalize_fragment(&text[fragment_start..token.offset]));
                    fragments.retain(|f| !f.is_empty());
                    return Some((fragments, k));
                }
            }
            TokenKind::Comma if depth == 1 => {
                fragments.push(normalize_fragment(&text[fragment_start..token.offset]));
                fragment_start = token.end();
            }
            _ => {}
        }
    }

    None
}

fn location_of(token: &Token<'_>, file: &str) -> Location {
    Location::new(file, token.line, token.column)
}
