//! Lexer for the pattern language.
//!
//! Tokens are kind + byte range; text is sliced from the source on demand.
//! Consecutive unrecognized characters coalesce into one `Garbage` token.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("|")]
    Pipe,

    #[token("&")]
    Amp,

    #[token("?")]
    Question,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("!")]
    Bang,

    #[token("=")]
    Equals,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("$")]
    Dollar,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    /// Double-quoted, backslash escapes.
    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Unrecognized input; produced by [`lex`], never by logos directly.
    Garbage,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        self == TokenKind::Whitespace
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range<usize>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, range: Range<usize>) -> Self {
        Self { kind, range }
    }

    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.range.clone()]
    }
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut garbage_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = garbage_start.take() {
                    tokens.push(Token::new(TokenKind::Garbage, start..lexer.span().start));
                }
                tokens.push(Token::new(kind, lexer.span()));
            }
            Some(Err(())) => {
                if garbage_start.is_none() {
                    garbage_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = garbage_start.take() {
                    tokens.push(Token::new(TokenKind::Garbage, start..source.len()));
                }
                break;
            }
        }
    }

    tokens
}

/// Decodes a string literal token, quotes included.
///
/// `\n`, `\t` and `\r` map to control characters; any other escaped character stands for itself.
pub fn unescape(literal: &str) -> String {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
