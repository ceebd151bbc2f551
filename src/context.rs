//! Current context: which screen and which open container receive new widgets.
//!
//! Declaration blocks push a [`Scope`] on entry and hand it back on exit. The
//! [`ContextGuard`] does the handing back in `Drop`, so the context is restored
//! on normal return, on an `Err` return, and while unwinding from a panic.

use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::ast::node::NodeId;
use crate::workstation::Workstation;

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Routing state of an [`Ast`](crate::Ast).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    screen: Option<NodeId>,
    containers: Vec<NodeId>,
}

/// Token returned when a declaration block is entered.
#[derive(Debug)]
#[must_use = "a scope must be passed back to `Context::exit`"]
pub enum Scope {
    /// A screen block. Leaving it drops back to screen level.
    Screen,
    /// A container block. Leaving it restores the containers open before it,
    /// as long as the block did not switch to a different screen.
    Container {
        screen: Option<NodeId>,
        saved: Vec<NodeId>,
    },
}

impl Context {
    /// The most recently declared screen since the last reset.
    pub fn current_screen(&self) -> Option<NodeId> {
        self.screen
    }

    /// The innermost open container, if any.
    pub fn current_container(&self) -> Option<NodeId> {
        self.containers.last().copied()
    }

    /// Number of open containers.
    pub fn depth(&self) -> usize {
        self.containers.len()
    }

    /// Where a new widget goes: innermost container, else the current screen.
    pub fn target(&self) -> Option<NodeId> {
        self.current_container().or(self.screen)
    }

    /// Make `screen` current and close every open container.
    pub(crate) fn set_screen(&mut self, screen: NodeId) {
        self.screen = Some(screen);
        self.containers.clear();
    }

    pub(crate) fn enter_screen(&mut self) -> Scope {
        trace!(screen = ?self.screen, "enter screen block");
        Scope::Screen
    }

    pub(crate) fn enter_container(&mut self, container: NodeId) -> Scope {
        let saved = self.containers.clone();
        self.containers.push(container);
        trace!(?container, depth = self.containers.len(), "enter container block");
        Scope::Container {
            screen: self.screen,
            saved,
        }
    }

    pub(crate) fn exit(&mut self, scope: Scope) {
        match scope {
            Scope::Screen => self.containers.clear(),
            Scope::Container { screen, saved } => {
                if self.screen == screen {
                    self.containers = saved;
                } else {
                    // The block declared another screen (or reset the tree);
                    // containers of the old screen must not receive widgets.
                    self.containers.clear();
                }
            }
        }
        trace!(depth = self.containers.len(), "exit block");
    }

    pub(crate) fn reset(&mut self) {
        self.screen = None;
        self.containers.clear();
    }
}

// ---------------------------------------------------------------------------
// ContextGuard
// ---------------------------------------------------------------------------

/// Scoped access to a [`Workstation`] inside a declaration block.
///
/// Derefs to the workstation so blocks can keep calling keywords. Dropping the
/// guard exits the scope it was created with.
pub struct ContextGuard<'a> {
    workstation: &'a mut Workstation,
    scope: Option<Scope>,
}

impl<'a> ContextGuard<'a> {
    pub(crate) fn screen(workstation: &'a mut Workstation) -> Self {
        let scope = workstation.ast.context.enter_screen();
        Self {
            workstation,
            scope: Some(scope),
        }
    }

    pub(crate) fn container(workstation: &'a mut Workstation, container: NodeId) -> Self {
        let scope = workstation.ast.context.enter_container(container);
        Self {
            workstation,
            scope: Some(scope),
        }
    }
}

impl Deref for ContextGuard<'_> {
    type Target = Workstation;

    fn deref(&self) -> &Workstation {
        self.workstation
    }
}

impl DerefMut for ContextGuard<'_> {
    fn deref_mut(&mut self) -> &mut Workstation {
        self.workstation
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        if let Some(scope) = self.scope.take() {
            self.workstation.ast.context.exit(scope);
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn empty_context_has_no_target() {
        let ctx = Context::default();
        assert!(ctx.current_screen().is_none());
        assert!(ctx.target().is_none());
    }

    #[test]
    fn container_overrides_screen_until_exit() {
        let n = ids(2);
        let mut ctx = Context::default();
        ctx.set_screen(n[0]);
        let scope = ctx.enter_container(n[1]);
        assert_eq!(ctx.target(), Some(n[1]));
        ctx.exit(scope);
        assert_eq!(ctx.target(), Some(n[0]));
    }

    #[test]
    fn nested_containers_restore_in_order() {
        let n = ids(3);
        let mut ctx = Context::default();
        ctx.set_screen(n[0]);
        let outer = ctx.enter_container(n[1]);
        let inner = ctx.enter_container(n[2]);
        assert_eq!(ctx.depth(), 2);
        ctx.exit(inner);
        assert_eq!(ctx.current_container(), Some(n[1]));
        ctx.exit(outer);
        assert_eq!(ctx.current_container(), None);
    }

    #[test]
    fn screen_switch_inside_container_drops_old_containers() {
        let n = ids(3);
        let mut ctx = Context::default();
        ctx.set_screen(n[0]);
        let scope = ctx.enter_container(n[1]);
        ctx.set_screen(n[2]);
        ctx.exit(scope);
        assert_eq!(ctx.current_screen(), Some(n[2]));
        assert_eq!(ctx.current_container(), None);
    }

    #[test]
    fn screen_scope_exit_returns_to_screen_level() {
        let n = ids(2);
        let mut ctx = Context::default();
        ctx.set_screen(n[0]);
        let scope = ctx.enter_screen();
        let _table = ctx.enter_container(n[1]);
        ctx.exit(scope);
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.current_screen(), Some(n[0]));
    }

    #[test]
    fn reset_clears_everything() {
        let n = ids(2);
        let mut ctx = Context::default();
        ctx.set_screen(n[0]);
        let _scope = ctx.enter_container(n[1]);
        ctx.reset();
        assert_eq!(ctx, Context::default());
    }
}
