//! Style attribute storage: an ordered property → value map.
//!
//! The builder never interprets style values; it stores them for the runtime.
//! Declarations can be written inline and parsed with [`Style::parse`].

pub mod parser;
pub mod tokenizer;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Failure while parsing a declaration string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("invalid character `{found}` at position {position}")]
    InvalidCharacter { position: usize, found: String },
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: expected {0}")]
    UnexpectedEnd(String),
    #[error("property `{0}` has no value")]
    EmptyValue(String),
}

/// Property → value mapping attached to screens and widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    properties: BTreeMap<String, String>,
}

impl Style {
    /// An empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration list such as `"color: red; width: 50%"`.
    pub fn parse(input: &str) -> Result<Self, StyleError> {
        parser::parse_declarations(input)
    }

    /// Set a property (builder).
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property, returning the previous value if any.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.properties.insert(property.into(), value.into())
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.properties.remove(property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for Style {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::parse(s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (k, v) in iter {
            style.set(k, v);
        }
        style
    }
}

/// Renders as `name: value;` pairs separated by spaces.
///
/// Values are written as stored. A style built by [`Style::parse`] renders to
/// text that parses back to an equal style; values set through `with` or
/// `set` may contain characters the parser rejects.
impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{k}: {v};")?;
        }
        Ok(())
    }
}
