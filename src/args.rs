//! Keyword arguments: string shorthand or an attributes bag.
//!
//! Every keyword funnels its argument through [`normalize`], so the defaulting
//! rules live in exactly one place.

use std::fmt;
use std::rc::Rc;

use crate::ast::node::{Callback, NodeData, NodeKind};
use crate::config::IdConvention;
use crate::style::Style;

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Explicit keyword attributes. Omitted fields get their defaults on
/// normalization: empty `id`, empty `text`, empty `style`, no `onclick`.
#[derive(Clone, Default)]
pub struct Attributes {
    pub id: Option<String>,
    pub text: Option<String>,
    pub style: Option<Style>,
    pub onclick: Option<Callback>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Attach a click callback. Only buttons are expected to carry one.
    pub fn with_onclick(mut self, onclick: impl Fn() + 'static) -> Self {
        self.onclick = Some(Rc::new(onclick));
        self
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attributes")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("style", &self.style)
            .field("onclick", &self.onclick.as_ref().map(|_| "Fn()"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// WidgetArgs
// ---------------------------------------------------------------------------

/// The argument accepted by every keyword.
///
/// `"text"` converts to [`WidgetArgs::Text`], an [`Attributes`] value to
/// [`WidgetArgs::Attributes`] and `()` to an empty attributes bag.
#[derive(Debug, Clone)]
pub enum WidgetArgs {
    Text(String),
    Attributes(Attributes),
}

impl Default for WidgetArgs {
    fn default() -> Self {
        WidgetArgs::Attributes(Attributes::default())
    }
}

impl From<&str> for WidgetArgs {
    fn from(text: &str) -> Self {
        WidgetArgs::Text(text.to_owned())
    }
}

impl From<String> for WidgetArgs {
    fn from(text: String) -> Self {
        WidgetArgs::Text(text)
    }
}

impl From<&String> for WidgetArgs {
    fn from(text: &String) -> Self {
        WidgetArgs::Text(text.clone())
    }
}

impl From<Attributes> for WidgetArgs {
    fn from(attrs: Attributes) -> Self {
        WidgetArgs::Attributes(attrs)
    }
}

impl From<()> for WidgetArgs {
    fn from(_: ()) -> Self {
        WidgetArgs::default()
    }
}

/// Resolve keyword arguments into node data of the given kind.
///
/// String shorthand sets the text and, for widgets, derives the id with
/// `convention`. Screens never derive an id.
pub fn normalize(args: WidgetArgs, kind: NodeKind, convention: IdConvention) -> NodeData {
    match args {
        WidgetArgs::Text(text) => {
            let id = match &kind {
                NodeKind::Screen => String::new(),
                NodeKind::Widget(widget) => convention.derive(widget.as_str(), &text),
            };
            NodeData::new(kind).with_id(id).with_text(text)
        }
        WidgetArgs::Attributes(attrs) => {
            let mut data = NodeData::new(kind);
            data.id = attrs.id.unwrap_or_default();
            data.text = attrs.text.unwrap_or_default();
            data.style = attrs.style.unwrap_or_default();
            data.onclick = attrs.onclick;
            data
        }
    }
}
