//! Tree operations: screens, widget attachment, positional access, reset.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, info, warn};

use super::node::{NodeData, NodeId, NodeKind, WidgetKind};
use super::refs::{Position, ScreenRef, WidgetRef};
use crate::args::{normalize, WidgetArgs};
use crate::config::IdConvention;
use crate::context::Context;
use crate::error::{Ordering, Result, WorkstationError};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The screen and widget tree, backed by a slotmap arena.
///
/// Screens are kept in declaration order. Every widget has exactly one parent,
/// either a screen or a container widget. The [`Context`] decides where the
/// next widget goes.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    screens: Vec<NodeId>,
    pub(crate) context: Context,
    convention: IdConvention,
    /// Bumped on every `clear`, so rollbacks can tell a reset happened.
    generation: u64,
}

/// State captured before a keyword runs its block, for [`Ast::rollback`].
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    screens: usize,
    context: Context,
    generation: u64,
}

impl Ast {
    /// Create an empty tree with the default id convention.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree that derives shorthand ids with `convention`.
    pub fn with_convention(convention: IdConvention) -> Self {
        Self {
            convention,
            ..Self::default()
        }
    }

    pub fn convention(&self) -> IdConvention {
        self.convention
    }

    pub fn set_convention(&mut self, convention: IdConvention) {
        self.convention = convention;
    }

    /// Routing state: current screen and open containers.
    pub fn context(&self) -> &Context {
        &self.context
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Append a screen and make it current. Open containers are closed.
    ///
    /// A string is the title; an attributes bag must carry the title in `text`.
    pub fn add_screen(&mut self, args: impl Into<WidgetArgs>) -> Result<NodeId> {
        let data = normalize(args.into(), NodeKind::Screen, self.convention);
        if data.text.is_empty() {
            return Err(WorkstationError::InvalidArguments(
                "screen requires a title".into(),
            ));
        }
        let title = data.text.clone();
        let id = self.insert(data);
        self.screens.push(id);
        self.context.set_screen(id);
        debug!(%title, index = self.screens.len() - 1, "screen added");
        Ok(id)
    }

    /// Create a widget of type `kind` directly under `parent`.
    ///
    /// Bypasses context routing; `parent` may be any screen or widget.
    pub fn add_widget(
        &mut self,
        parent: NodeId,
        args: impl Into<WidgetArgs>,
        kind: impl Into<WidgetKind>,
    ) -> Result<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(WorkstationError::UnknownNode);
        }
        let data = normalize(args.into(), NodeKind::Widget(kind.into()), self.convention);
        Ok(self.insert_child(parent, data))
    }

    /// Create a widget and attach it wherever the context points.
    ///
    /// Fails without touching the tree when no screen is current, or when a
    /// `row` is added with no open container and `strict_rows` is set.
    pub fn append_widget(
        &mut self,
        kind: WidgetKind,
        args: impl Into<WidgetArgs>,
        strict_rows: bool,
    ) -> Result<NodeId> {
        let Some(screen) = self.context.current_screen() else {
            warn!(widget = %kind, "widget declared before any screen");
            return Err(Ordering::ScreenRequired {
                widget: kind.as_str().to_owned(),
            }
            .into());
        };
        let parent = match (&kind, self.context.current_container()) {
            (_, Some(container)) => container,
            (WidgetKind::Row, None) if strict_rows => {
                warn!("row declared outside of a table");
                return Err(Ordering::ContainerRequired {
                    widget: kind.as_str().to_owned(),
                }
                .into());
            }
            (_, None) => screen,
        };
        let data = normalize(args.into(), NodeKind::Widget(kind), self.convention);
        debug!(
            widget = data.type_name(),
            id = %data.id,
            parent = ?parent,
            "widget added"
        );
        Ok(self.insert_child(parent, data))
    }

    /// Remove every screen and widget and reset the context.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.children.clear();
        self.parent.clear();
        self.screens.clear();
        self.context.reset();
        self.generation += 1;
        info!("tree cleared");
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            screens: self.screens.len(),
            context: self.context.clone(),
            generation: self.generation,
        }
    }

    /// Undo a keyword whose block failed: drop `node` with its subtree, drop
    /// screens declared since the checkpoint, and restore the old context.
    ///
    /// A no-op if the tree was cleared in between.
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint, node: NodeId) {
        if checkpoint.generation != self.generation {
            return;
        }
        self.remove(node);
        while self.screens.len() > checkpoint.screens {
            if let Some(screen) = self.screens.pop() {
                self.remove(screen);
            }
        }
        self.context = checkpoint.context;
    }

    fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.insert(data);
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        id
    }

    /// Remove a node and all its descendants.
    fn remove(&mut self, id: NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }
        self.screens.retain(|&screen| screen != id);

        let mut to_remove = VecDeque::from([id]);
        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            self.nodes.remove(current);
        }
    }

    // ── Screens ──────────────────────────────────────────────────────

    /// The screen at `index` in declaration order.
    pub fn screen(&self, index: impl Position) -> Result<ScreenRef<'_>> {
        let index = index.resolve(self.screens.len())?;
        Ok(ScreenRef::new(self, self.screens[index]))
    }

    /// The most recently added screen, or `None` on an empty tree.
    pub fn last_screen(&self) -> Option<ScreenRef<'_>> {
        self.screens.last().map(|&id| ScreenRef::new(self, id))
    }

    /// The screen stored under `node`, if `node` is a live screen.
    pub fn screen_by_node(&self, node: NodeId) -> Option<ScreenRef<'_>> {
        self.nodes
            .get(node)
            .filter(|data| data.is_screen())
            .map(|_| ScreenRef::new(self, node))
    }

    /// The first screen whose title equals `title`.
    pub fn screen_by_title(&self, title: &str) -> Option<ScreenRef<'_>> {
        self.screens()
            .find(|screen| screen.title() == title)
    }

    pub fn number_of_screens(&self) -> usize {
        self.screens.len()
    }

    /// Call `visitor` once per screen, in declaration order.
    pub fn each_screen<'a>(&'a self, mut visitor: impl FnMut(ScreenRef<'a>)) {
        for &id in &self.screens {
            visitor(ScreenRef::new(self, id));
        }
    }

    /// Iterate screens in declaration order.
    pub fn screens(&self) -> impl Iterator<Item = ScreenRef<'_>> + '_ {
        self.screens.iter().map(move |&id| ScreenRef::new(self, id))
    }

    /// The widget at `index` under `parent` (a screen or a widget).
    pub fn widget(&self, parent: NodeId, index: impl Position) -> Result<WidgetRef<'_>> {
        let kids = self.children(parent);
        let index = index.resolve(kids.len())?;
        Ok(WidgetRef::new(self, kids[index]))
    }

    // ── Raw node access ──────────────────────────────────────────────

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Children of a node. Empty if the node has none or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Total number of nodes, screens included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// Every node in document order: each screen followed by its subtree.
    pub fn walk(&self) -> Vec<NodeId> {
        self.screens
            .iter()
            .flat_map(|&screen| self.walk_depth_first(screen))
            .collect()
    }
}
