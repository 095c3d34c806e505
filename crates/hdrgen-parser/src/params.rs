//! Parameter fragment helpers

use crate::lexer::{tokenize, TokenKind};

/// Qualifier and modifier words that never name a parameter
const MODIFIERS: &[&str] = &[
    "const", "volatile", "restrict", "signed", "unsigned", "long", "short",
];

/// Builtin type words that never name a parameter
const BUILTIN_TYPES: &[&str] = &[
    "void", "char", "int", "float", "double", "_Bool", "bool",
];

const TAG_KEYWORDS: &[&str] = &["struct", "union", "enum"];

/// Trim a raw fragment and collapse internal whitespace runs
pub fn normalize_fragment(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove the declarator name from one parameter fragment.
///
/// `const char *path` becomes `const char*`. Fragments without a name
/// (`void`, `unsigned int`, `struct stat`, `...`) come back unchanged apart
/// from star spacing. Function pointer fragments are returned as is.
pub fn strip_parameter_name(fragment: &str) -> String {
    let tokens: Vec<_> = tokenize(fragment)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Newline)
        .collect();

    if tokens
        .iter()
        .any(|t| matches!(t.kind, TokenKind::LParen | TokenKind::RParen))
    {
        return normalize_fragment(fragment);
    }

    let mut bracket_depth = 0usize;
    let mut name_index = None;
    let mut seen_type_word = false;
    let mut previous_ident: Option<&str> = None;

    for (i, token) in tokens.iter().enumerate() {
        match (token.kind, token.text) {
            (TokenKind::Punct, "[") => bracket_depth += 1,
            (TokenKind::Punct, "]") => bracket_depth = bracket_depth.saturating_sub(1),
            (TokenKind::Ident, text) if bracket_depth == 0 => {
                let after_tag = previous_ident.map_or(false, |p| TAG_KEYWORDS.contains(&p));
                let is_candidate = seen_type_word
                    && !after_tag
                    && !MODIFIERS.contains(&text)
                    && !BUILTIN_TYPES.contains(&text)
                    && !TAG_KEYWORDS.contains(&text);

                if is_candidate {
                    name_index = Some(i);
                } else if !matches!(text, "const" | "volatile" | "restrict") {
                    seen_type_word = true;
                }
                previous_ident = Some(text);
            }
            _ => {}
        }
    }

    let mut out = String::new();
    let mut glue_next = false;
    let mut in_brackets = false;
    for (i, token) in tokens.iter().enumerate() {
        if Some(i) == name_index {
            continue;
        }
        let glue = glue_next
            || in_brackets
            || matches!(token.kind, TokenKind::Star)
            || matches!(token.text, "[" | "]" | ":");
        if !glue && !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token.text);

        match token.text {
            "[" => in_brackets = true,
            "]" => in_brackets = false,
            _ => {}
        }
        glue_next = token.text == ":";
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fragment() {
        assert_eq!(normalize_fragment("  const char *\n   path "), "const char * path");
        assert_eq!(normalize_fragment(" \t "), "");
    }

    #[test]
    fn test_strips_trailing_name() {
        assert_eq!(strip_parameter_name("const char* path"), "const char*");
        assert_eq!(strip_parameter_name("char *s"), "char*");
        assert_eq!(strip_parameter_name("int x"), "int");
        assert_eq!(strip_parameter_name("unsigned char* out"), "unsigned char*");
        assert_eq!(strip_parameter_name("const ime_pinyin::char16* utf16"), "const ime_pinyin::char16*");
        assert_eq!(strip_parameter_name("size_t **lens"), "size_t**");
        assert_eq!(strip_parameter_name("char * const p"), "char* const");
        assert_eq!(strip_parameter_name("PopplerDocument *doc"), "PopplerDocument*");
    }

    #[test]
    fn test_keeps_unnamed_fragments() {
        assert_eq!(strip_parameter_name("void"), "void");
        assert_eq!(strip_parameter_name("size_t"), "size_t");
        assert_eq!(strip_parameter_name("unsigned int"), "unsigned int");
        assert_eq!(strip_parameter_name("long long"), "long long");
        assert_eq!(strip_parameter_name("struct stat"), "struct stat");
        assert_eq!(strip_parameter_name("const void*"), "const void*");
        assert_eq!(strip_parameter_name("..."), "...");
    }

    #[test]
    fn test_struct_and_arrays() {
        assert_eq!(strip_parameter_name("struct stat *st"), "struct stat*");
        assert_eq!(strip_parameter_name("int values[N]"), "int[N]");
        assert_eq!(strip_parameter_name("char name[32]"), "char[32]");
    }

    #[test]
    fn test_function_pointer_untouched() {
        assert_eq!(
            strip_parameter_name("void (*cb)(int,  void*)"),
            "void (*cb)(int, void*)"
        );
    }
}
