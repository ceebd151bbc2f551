//! The AST: slotmap-backed screen and widget tree with positional access and queries.

pub mod node;
pub mod query;
pub mod refs;
pub mod tree;

pub use node::{Callback, NodeData, NodeId, NodeKind, WidgetKind};
pub use refs::{NodeRef, Position, ScreenRef, WidgetRef};
pub use tree::Ast;
