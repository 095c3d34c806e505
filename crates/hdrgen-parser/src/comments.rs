//! Comment stripping
//!
//! Nested block comments are not a thing in C, so non-greedy matches are
//! enough. Comment markers inside string literals are not recognized.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern"));

static SAME_LINE_BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*.*?\*/").expect("same-line block comment pattern"));

static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)//.*$").expect("line comment pattern"));

/// Remove block and line comments from a text. Newlines inside block
/// comments are kept so line numbers do not move.
pub fn strip_comments(text: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(text, |caps: &regex::Captures<'_>| {
        "\n".repeat(caps[0].matches('\n').count())
    });
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// Remove a `//` comment and any block comments that open and close on this
/// line, then trim. Line comments go first, so `/* a // b */` loses
/// everything from `//` on.
pub fn clean_line(line: &str) -> String {
    let line = LINE_COMMENT.replace(line, "");
    SAME_LINE_BLOCK_COMMENT
        .replace_all(&line, "")
        .trim()
        .to_string()
}
