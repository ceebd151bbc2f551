//! logos-based tokenizer for inline style declarations.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `#fff` as HexColor beats a stray `#`)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `#ff00aa` matches [`Token::HexColor`]
//! - `50%` matches [`Token::Dimension`], not `Number` followed by garbage

use logos::Logos;

use super::StyleError;

/// Token produced by the style lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `!important` flag. Kept verbatim in the value.
    #[token("!important")]
    Important,

    /// Hex color: `#fff`, `#ff00aa`, `#ff00aa80`.
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// Number with a unit suffix: `50%`, `1fr`, `12px`, `2em`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?(%|[a-zA-Z]+)")]
    Dimension,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Integer or float, possibly negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Property names and keyword values.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,
}

/// A token together with its source slice and byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<'a> {
    pub token: Token,
    pub text: &'a str,
    pub position: usize,
}

/// Tokenize a declaration string.
///
/// Unlike a stylesheet lexer this one is strict: any character that does not
/// start a token is reported with its byte offset.
pub fn tokenize(input: &str) -> Result<Vec<Spanned<'_>>, StyleError> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok(Spanned {
                token,
                text: &input[span.clone()],
                position: span.start,
            }),
            Err(()) => Err(StyleError::InvalidCharacter {
                position: span.start,
                found: input[span].to_string(),
            }),
        })
        .collect()
}
