//! Tokenizer for C declaration text
//!
//! Only the handful of token kinds the declaration matcher cares about are
//! distinguished. Everything else comes through as `Punct`, one character at
//! a time. Newlines are tokens so callers can tell where lines begin.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Star,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semi,
    /// Number, string or character literal
    Literal,
    Punct,
    Newline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset into the lexed text
    pub offset: usize,
    /// Line (1-based)
    pub line: u32,
    /// Byte column (0-based)
    pub column: u32,
}

impl<'a> Token<'a> {
    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == text
    }

    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_at(&self, skip: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(skip)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += c.len_utf8() as u32;
        }
        Some(c)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    /// Consume a quoted literal. Stops at the closing quote or, for an
    /// unterminated literal, before the end of the line.
    fn bump_quoted(&mut self, quote: char) {
        self.bump();
        while let Some(c) = self.peek() {
            match c {
                '\\' => {
                    self.bump();
                    if self.peek() != Some('\n') {
                        self.bump();
                    }
                }
                '\n' => break,
                c if c == quote => {
                    self.bump();
                    break;
                }
                _ => {
                    self.bump();
                }
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.bump_while(|c| c != '\n' && c.is_whitespace());

        let start = self.pos;
        let line = self.line;
        let column = self.column;
        let c = self.peek()?;

        let kind = match c {
            '\n' => {
                self.bump();
                TokenKind::Newline
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                self.bump_while(|c| c.is_ascii_alphanumeric() || c == '_');
                TokenKind::Ident
            }
            c if c.is_ascii_digit() => {
                self.bump_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
                TokenKind::Literal
            }
            '"' | '\'' => {
                self.bump_quoted(c);
                TokenKind::Literal
            }
            '.' if self.peek_at(1) == Some('.') && self.peek_at(2) == Some('.') => {
                self.bump();
                self.bump();
                self.bump();
                TokenKind::Punct
            }
            _ => {
                self.bump();
                match c {
                    '*' => TokenKind::Star,
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semi,
                    _ => TokenKind::Punct,
                }
            }
        };

        Some(Token {
            kind,
            text: &self.source[start..self.pos],
            offset: start,
            line,
            column,
        })
    }
}

/// Tokenize a whole text
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_declaration_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("char* dup(const char *s);"),
            vec![Ident, Star, Ident, LParen, Ident, Ident, Star, Ident, RParen, Semi]
        );
    }

    #[test]
    fn test_positions_track_lines() {
        let tokens = tokenize("int a;\n  void\tb()");
        let b = tokens.iter().find(|t| t.text == "b").unwrap();
        assert_eq!(b.line, 2);
        assert_eq!(b.column, 7);
        assert_eq!(b.offset, 14);

        let void = tokens.iter().find(|t| t.text == "void").unwrap();
        assert_eq!(void.column, 2);
    }

    #[test]
    fn test_literals_and_variadic() {
        let tokens = tokenize(r#"printf("a(b", ...); x = 0x1F;"#);
        let texts: Vec<_> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(
            texts,
            vec!["printf", "(", "\"a(b\"", ",", "...", ")", ";", "x", "=", "0x1F", ";"]
        );
        assert_eq!(tokens[2].kind, TokenKind::Literal);
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let tokens = tokenize("\"abc\nint");
        assert_eq!(tokens[0].text, "\"abc");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert!(tokens[2].is_ident("int"));
    }

    #[test]
    fn test_non_ascii_is_punct() {
        let tokens = tokenize("é int");
        assert_eq!(tokens[0].kind, TokenKind::Punct);
        assert_eq!(tokens[1].column, 3);
    }
}
