//! The runtime seam: whatever actually renders or executes a finished tree.
//!
//! The builder only guarantees the shape of this seam. [`Runtime::run`] is
//! called by `app`, and [`Runtime::bind`] supplies each widget's behaviour
//! handle. Until a runtime binds something, every handle is [`Unbound`] and
//! fails with `NotImplemented`.

use std::rc::Rc;

use crate::ast::node::{NodeData, NodeId};
use crate::ast::refs::ScreenRef;
use crate::ast::Ast;
use crate::error::{Result, WorkstationError};

// ---------------------------------------------------------------------------
// Widget behaviour
// ---------------------------------------------------------------------------

/// Per-widget behaviour exposed to callers once a runtime is bound.
pub trait WidgetRuntime {
    /// Current text as displayed by the runtime.
    fn text(&self) -> Result<String>;

    /// Simulate or perform a click.
    fn click(&self) -> Result<()>;
}

/// The default handle: no concrete behaviour is bound yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbound;

impl WidgetRuntime for Unbound {
    fn text(&self) -> Result<String> {
        Err(WorkstationError::NotImplemented { operation: "text" })
    }

    fn click(&self) -> Result<()> {
        Err(WorkstationError::NotImplemented { operation: "click" })
    }
}

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

/// What `app` hands to [`Runtime::run`].
#[derive(Clone, Copy)]
pub struct RunContext<'a> {
    /// The finished tree.
    pub ast: &'a Ast,
    /// The screen selected by `app`, or `None` when the tree has no screens.
    pub entry: Option<NodeId>,
    /// Application title from the session config.
    pub title: Option<&'a str>,
}

impl<'a> RunContext<'a> {
    /// The entry screen, if one was resolved.
    pub fn entry_screen(&self) -> Option<ScreenRef<'a>> {
        self.entry.and_then(|id| self.ast.screen_by_node(id))
    }
}

/// A swappable collaborator that executes a finished tree.
pub trait Runtime {
    /// Execute the tree starting at `ctx.entry`.
    fn run(&mut self, ctx: RunContext<'_>) -> Result<()>;

    /// Behaviour handle for a freshly created widget. Defaults to [`Unbound`].
    fn bind(&self, _widget: &NodeData) -> Rc<dyn WidgetRuntime> {
        Rc::new(Unbound)
    }
}

/// A runtime built from a closure. See [`from_fn`].
pub struct FnRuntime<F> {
    run: F,
}

/// Wrap a closure as a [`Runtime`] that binds nothing.
///
/// ```ignore
/// ws.set_runtime(runtime::from_fn(|ctx| {
///     println!("{} screens", ctx.ast.number_of_screens());
///     Ok(())
/// }));
/// ```
pub fn from_fn<F>(run: F) -> FnRuntime<F>
where
    F: FnMut(RunContext<'_>) -> Result<()>,
{
    FnRuntime { run }
}

impl<F> Runtime for FnRuntime<F>
where
    F: FnMut(RunContext<'_>) -> Result<()>,
{
    fn run(&mut self, ctx: RunContext<'_>) -> Result<()> {
        (self.run)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_text_fails() {
        let err = Unbound.text().unwrap_err();
        assert!(err.to_string().contains("not implemented"));
    }

    #[test]
    fn unbound_click_fails() {
        let err = Unbound.click().unwrap_err();
        assert!(matches!(
            err,
            WorkstationError::NotImplemented { operation: "click" }
        ));
    }

    #[test]
    fn closure_runtime_runs() {
        let ast = Ast::new();
        let mut calls = 0;
        {
            let mut runtime = from_fn(|ctx| {
                assert!(ctx.entry.is_none());
                calls += 1;
                Ok(())
            });
            runtime
                .run(RunContext {
                    ast: &ast,
                    entry: None,
                    title: None,
                })
                .unwrap();
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn default_bind_is_unbound() {
        let runtime = from_fn(|_| Ok(()));
        let handle = runtime.bind(&NodeData::widget("label"));
        assert!(handle.text().is_err());
    }
}
