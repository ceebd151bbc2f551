//! Borrowed views over tree nodes: [`ScreenRef`] and [`WidgetRef`].

use std::fmt;
use std::ops::Deref;

use super::node::{Callback, NodeData, NodeId, WidgetKind};
use super::tree::Ast;
use crate::error::{Result, WorkstationError};
use crate::runtime::WidgetRuntime;
use crate::style::Style;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// An index accepted by positional accessors.
///
/// Signed integers are accepted so that a negative index is a reported
/// `IndexOutOfRange` error rather than a type error.
pub trait Position: Copy {
    /// Check the index against `len`.
    fn resolve(self, len: usize) -> Result<usize>;
}

macro_rules! impl_position {
    ($($ty:ty),*) => {
        $(
            impl Position for $ty {
                fn resolve(self, len: usize) -> Result<usize> {
                    usize::try_from(self)
                        .ok()
                        .filter(|&index| index < len)
                        .ok_or(WorkstationError::IndexOutOfRange {
                            index: self as i128,
                            len,
                        })
                }
            }
        )*
    };
}

impl_position!(usize, u8, u16, u32, u64, isize, i8, i16, i32, i64);

// ---------------------------------------------------------------------------
// NodeRef
// ---------------------------------------------------------------------------

/// Read access to one node and its children.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    ast: &'a Ast,
    node: NodeId,
    data: &'a NodeData,
}

impl<'a> NodeRef<'a> {
    fn new(ast: &'a Ast, node: NodeId) -> Self {
        // Refs are only built from ids the tree just handed out.
        let data = &ast.nodes[node];
        Self { ast, node, data }
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    pub fn data(&self) -> &'a NodeData {
        self.data
    }

    pub fn id(&self) -> &'a str {
        &self.data.id
    }

    pub fn text(&self) -> &'a str {
        &self.data.text
    }

    pub fn style(&self) -> &'a Style {
        &self.data.style
    }

    /// The `type` attribute: `screen`, `label`, `table`, ...
    pub fn type_name(&self) -> &'a str {
        self.data.type_name()
    }

    pub fn number_of_widgets(&self) -> usize {
        self.ast.children(self.node).len()
    }

    /// The child widget at `index`.
    pub fn widget(&self, index: impl Position) -> Result<WidgetRef<'a>> {
        self.ast.widget(self.node, index)
    }

    /// Child widgets in order.
    pub fn widgets(&self) -> impl Iterator<Item = WidgetRef<'a>> + 'a {
        let ast = self.ast;
        ast.children(self.node)
            .iter()
            .map(move |&id| WidgetRef::new(ast, id))
    }
}

// ---------------------------------------------------------------------------
// ScreenRef / WidgetRef
// ---------------------------------------------------------------------------

/// A top-level screen.
#[derive(Clone, Copy)]
pub struct ScreenRef<'a>(NodeRef<'a>);

impl<'a> ScreenRef<'a> {
    pub(crate) fn new(ast: &'a Ast, node: NodeId) -> Self {
        Self(NodeRef::new(ast, node))
    }

    /// Same as `text()`.
    pub fn title(&self) -> &'a str {
        self.0.text()
    }
}

impl<'a> Deref for ScreenRef<'a> {
    type Target = NodeRef<'a>;

    fn deref(&self) -> &NodeRef<'a> {
        &self.0
    }
}

/// A widget anywhere below a screen.
#[derive(Clone, Copy)]
pub struct WidgetRef<'a>(NodeRef<'a>);

impl<'a> WidgetRef<'a> {
    pub(crate) fn new(ast: &'a Ast, node: NodeId) -> Self {
        Self(NodeRef::new(ast, node))
    }

    pub fn kind(&self) -> Option<&'a WidgetKind> {
        self.0.data.kind.widget_kind()
    }

    pub fn onclick(&self) -> Option<&'a Callback> {
        self.0.data.onclick.as_ref()
    }

    /// The behaviour handle bound to this widget.
    pub fn runtime(&self) -> &'a dyn WidgetRuntime {
        self.0.data.runtime.as_ref()
    }

    /// The screen or container this widget belongs to.
    pub fn parent(&self) -> Option<NodeId> {
        self.0.ast.parent(self.0.node)
    }
}

impl<'a> Deref for WidgetRef<'a> {
    type Target = NodeRef<'a>;

    fn deref(&self) -> &NodeRef<'a> {
        &self.0
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("node", &self.node)
            .field("data", self.data)
            .finish()
    }
}

impl fmt::Debug for ScreenRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScreenRef").field(&self.0).finish()
    }
}

impl fmt::Debug for WidgetRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetRef").field(&self.0).finish()
    }
}
