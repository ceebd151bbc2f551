//! Declaration parser: `prop: value; prop: value value`.
//!
//! Values are opaque to the builder, so the parser only checks shape: a
//! property name, a colon, at least one value token, then `;` or end of input.

use super::tokenizer::{tokenize, Spanned, Token};
use super::{Style, StyleError};

/// Parse a declaration list into a [`Style`].
///
/// Later declarations of the same property replace earlier ones.
pub fn parse_declarations(input: &str) -> Result<Style, StyleError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let mut style = Style::new();
    while !parser.at_end() {
        // Tolerate stray separators: `a: b;; c: d;`
        if parser.peek_is(Token::Semicolon) {
            parser.pos += 1;
            continue;
        }
        let (name, value) = parser.declaration()?;
        style.set(name, value);
    }
    Ok(style)
}

struct Parser<'a> {
    tokens: Vec<Spanned<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Spanned<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_is(&self, token: Token) -> bool {
        self.peek().is_some_and(|s| s.token == token)
    }

    fn next(&mut self) -> Option<Spanned<'a>> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn declaration(&mut self) -> Result<(String, String), StyleError> {
        let name = match self.next() {
            Some(Spanned {
                token: Token::Ident,
                text,
                ..
            }) => text.to_string(),
            Some(other) => {
                return Err(StyleError::UnexpectedToken {
                    position: other.position,
                    message: format!("expected property name, found `{}`", other.text),
                })
            }
            None => return Err(StyleError::UnexpectedEnd("property name".into())),
        };

        match self.next() {
            Some(s) if s.token == Token::Colon => {}
            Some(other) => {
                return Err(StyleError::UnexpectedToken {
                    position: other.position,
                    message: format!("expected `:` after `{name}`, found `{}`", other.text),
                })
            }
            None => return Err(StyleError::UnexpectedEnd(format!("`:` after `{name}`"))),
        }

        let mut value = String::new();
        let mut last = None;
        while let Some(item) = self.peek() {
            match item.token {
                Token::Semicolon => {
                    self.pos += 1;
                    break;
                }
                Token::Colon => {
                    return Err(StyleError::UnexpectedToken {
                        position: item.position,
                        message: format!("unexpected `:` in value of `{name}`"),
                    })
                }
                token => {
                    if needs_space(last, token) {
                        value.push(' ');
                    }
                    value.push_str(item.text);
                    last = Some(token);
                    self.pos += 1;
                }
            }
        }

        if value.is_empty() {
            return Err(StyleError::EmptyValue(name));
        }
        Ok((name, value))
    }
}

/// Whitespace between value tokens is normalized to a single space, except
/// around commas and parentheses: `rgb(1, 2, 3)`.
fn needs_space(last: Option<Token>, next: Token) -> bool {
    match (last, next) {
        (None, _) => false,
        (Some(Token::ParenOpen), _) => false,
        (_, Token::Comma) | (_, Token::ParenClose) | (_, Token::ParenOpen) => false,
        _ => true,
    }
}
