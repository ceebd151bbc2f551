//! Node types: NodeId, NodeKind, WidgetKind, NodeData.

use std::fmt;
use std::rc::Rc;

use slotmap::new_key_type;

use crate::runtime::{Unbound, WidgetRuntime};
use crate::style::Style;

new_key_type! {
    /// Unique identifier for a screen or widget node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Zero-argument click callback, stored verbatim and never invoked by the builder.
pub type Callback = Rc<dyn Fn()>;

/// Type tag of a widget node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Label,
    Textbox,
    PasswordField,
    Button,
    Table,
    Row,
    /// Any other type name, for runtimes that understand more widgets.
    Custom(String),
}

impl WidgetKind {
    /// The keyword name, which is also the `type` attribute of the node.
    pub fn as_str(&self) -> &str {
        match self {
            WidgetKind::Label => "label",
            WidgetKind::Textbox => "textbox",
            WidgetKind::PasswordField => "passwordfield",
            WidgetKind::Button => "button",
            WidgetKind::Table => "table",
            WidgetKind::Row => "row",
            WidgetKind::Custom(name) => name,
        }
    }
}

impl From<&str> for WidgetKind {
    fn from(name: &str) -> Self {
        match name {
            "label" => WidgetKind::Label,
            "textbox" => WidgetKind::Textbox,
            "passwordfield" => WidgetKind::PasswordField,
            "button" => WidgetKind::Button,
            "table" => WidgetKind::Table,
            "row" => WidgetKind::Row,
            other => WidgetKind::Custom(other.to_owned()),
        }
    }
}

impl From<String> for WidgetKind {
    fn from(name: String) -> Self {
        WidgetKind::from(name.as_str())
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a node is a top-level screen or a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Screen,
    Widget(WidgetKind),
}

impl NodeKind {
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::Screen => "screen",
            NodeKind::Widget(kind) => kind.as_str(),
        }
    }

    pub fn widget_kind(&self) -> Option<&WidgetKind> {
        match self {
            NodeKind::Screen => None,
            NodeKind::Widget(kind) => Some(kind),
        }
    }
}

/// Data associated with a single node. Screens use `text` as their title.
#[derive(Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    pub id: String,
    pub text: String,
    pub style: Style,
    /// Only meaningful on buttons, but stored for any widget that was given one.
    pub onclick: Option<Callback>,
    /// Behaviour handle. Fails with `NotImplemented` until a runtime binds it.
    pub runtime: Rc<dyn WidgetRuntime>,
}

impl NodeData {
    /// Create node data with every attribute defaulted.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: String::new(),
            text: String::new(),
            style: Style::new(),
            onclick: None,
            runtime: Rc::new(Unbound),
        }
    }

    pub fn screen(title: impl Into<String>) -> Self {
        Self::new(NodeKind::Screen).with_text(title)
    }

    pub fn widget(kind: impl Into<WidgetKind>) -> Self {
        Self::new(NodeKind::Widget(kind.into()))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_onclick(mut self, onclick: Callback) -> Self {
        self.onclick = Some(onclick);
        self
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    pub fn is_screen(&self) -> bool {
        self.kind == NodeKind::Screen
    }
}

impl fmt::Debug for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeData")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("text", &self.text)
            .field("style", &self.style)
            .field("onclick", &self.onclick.as_ref().map(|_| "Fn()"))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = NodeData::widget(WidgetKind::Label);
        assert_eq!(data.type_name(), "label");
        assert!(data.id.is_empty());
        assert!(data.text.is_empty());
        assert!(data.style.is_empty());
        assert!(data.onclick.is_none());
        assert!(!data.is_screen());
    }

    #[test]
    fn default_runtime_is_unbound() {
        let data = NodeData::widget("button");
        assert!(data.runtime.text().is_err());
        assert!(data.runtime.click().is_err());
    }

    #[test]
    fn screen_title_is_text() {
        let data = NodeData::screen("Login");
        assert!(data.is_screen());
        assert_eq!(data.text, "Login");
        assert_eq!(data.type_name(), "screen");
    }

    #[test]
    fn kind_round_trips_through_names() {
        for name in ["label", "textbox", "passwordfield", "button", "table", "row"] {
            assert_eq!(WidgetKind::from(name).as_str(), name);
        }
        assert_eq!(
            WidgetKind::from("slider"),
            WidgetKind::Custom("slider".into())
        );
    }

    #[test]
    fn debug_hides_callbacks() {
        let data = NodeData::widget("button").with_onclick(Rc::new(|| {}));
        let dbg = format!("{data:?}");
        assert!(dbg.contains("Fn()"));
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
