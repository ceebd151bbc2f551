//! Free keyword functions over a thread-local default [`Workstation`].
//!
//! These mirror the methods on [`Workstation`] for code that wants to read as
//! a plain declaration script:
//!
//! ```ignore
//! use workstation::dsl::*;
//!
//! screen_with("Login", || {
//!     label("Username")?;
//!     textbox(Attributes::new().with_id("txtUser"))?;
//!     table_with("Options", || {
//!         row("Yes")?;
//!         row("No")?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//! app("Login")?;
//! ```
//!
//! The default instance is only borrowed for the duration of each keyword,
//! never while a block, a runtime run or a click callback runs. Those may call
//! keywords and [`with_ast`] freely. Calling a keyword from inside [`with`]
//! panics, since the instance is already borrowed.

use std::cell::RefCell;

use tracing::{info, warn};

use crate::args::WidgetArgs;
use crate::ast::node::{NodeId, WidgetKind};
use crate::ast::tree::{Ast, Checkpoint};
use crate::context::Scope;
use crate::error::{Result, WorkstationError};
use crate::runtime::{RunContext, Runtime};
use crate::workstation::{ScreenSelector, Workstation};

pub use crate::args::Attributes;
pub use crate::style::Style;

thread_local! {
    static DEFAULT: RefCell<Workstation> = RefCell::new(Workstation::new());
}

/// Run `f` with exclusive access to this thread's default workstation.
pub fn with<R>(f: impl FnOnce(&mut Workstation) -> R) -> R {
    DEFAULT.with(|cell| f(&mut cell.borrow_mut()))
}

/// Read the default workstation's tree.
pub fn with_ast<R>(f: impl FnOnce(&Ast) -> R) -> R {
    DEFAULT.with(|cell| f(cell.borrow().ast()))
}

/// Clear the default tree. The installed runtime is kept.
pub fn reset() {
    with(Workstation::reset);
}

/// Install a runtime on the default workstation.
pub fn set_runtime(runtime: impl Runtime + 'static) -> Option<Box<dyn Runtime>> {
    with(|ws| ws.set_runtime(runtime))
}

/// Hand the default tree to the installed runtime.
///
/// The runtime is taken out of the default instance for the run and sees a
/// snapshot of the tree, so it may declare more UI through this module.
/// Widgets declared during the run are bound once the runtime is put back.
pub fn app(selector: impl Into<ScreenSelector>) -> Result<()> {
    let selector = selector.into();
    let (mut runtime, snapshot, entry, title) = with(|ws| -> Result<_> {
        if !ws.has_runtime() {
            warn!("app called with no runtime installed");
            return Err(WorkstationError::RuntimeUnavailable);
        }
        let entry = selector.resolve(ws.ast())?;
        let title = ws.config().title.clone();
        let runtime = ws.take_runtime().ok_or(WorkstationError::RuntimeUnavailable)?;
        Ok((runtime, ws.ast().clone(), entry, title))
    })?;

    info!(%selector, screens = snapshot.number_of_screens(), "starting runtime");
    let outcome = runtime.run(RunContext {
        ast: &snapshot,
        entry,
        title: title.as_deref(),
    });
    with(|ws| ws.restore_runtime(runtime, &snapshot));
    outcome
}

/// Click a widget of the default tree. The callback runs after the default
/// instance is released, so it may call keywords.
pub fn click(widget: NodeId) -> Result<()> {
    with(|ws| ws.widget_runtime(widget))?.click()
}

/// Read a widget's text through its bound behaviour handle.
pub fn widget_text(widget: NodeId) -> Result<String> {
    with(|ws| ws.widget_runtime(widget))?.text()
}

pub fn screen(args: impl Into<WidgetArgs>) -> Result<NodeId> {
    let args = args.into();
    with(|ws| ws.screen(args))
}

pub fn screen_with(args: impl Into<WidgetArgs>, block: impl FnOnce() -> Result<()>) -> Result<NodeId> {
    let args = args.into();
    let (checkpoint, node, scope) = with(|ws| -> Result<_> {
        let checkpoint = ws.ast.checkpoint();
        let node = ws.ast.add_screen(args)?;
        Ok((checkpoint, node, ws.ast.context.enter_screen()))
    })?;
    run_block(checkpoint, node, scope, block)
}

pub fn label(args: impl Into<WidgetArgs>) -> Result<NodeId> {
    widget(WidgetKind::Label, args)
}

pub fn textbox(args: impl Into<WidgetArgs>) -> Result<NodeId> {
    widget(WidgetKind::Textbox, args)
}

pub fn passwordfield(args: impl Into<WidgetArgs>) -> Result<NodeId> {
    widget(WidgetKind::PasswordField, args)
}

pub fn button(args: impl Into<WidgetArgs>) -> Result<NodeId> {
    widget(WidgetKind::Button, args)
}

pub fn table(args: impl Into<WidgetArgs>) -> Result<NodeId> {
    widget(WidgetKind::Table, args)
}

pub fn table_with(args: impl Into<WidgetArgs>, block: impl FnOnce() -> Result<()>) -> Result<NodeId> {
    let args = args.into();
    let (checkpoint, node, scope) = with(|ws| -> Result<_> {
        let checkpoint = ws.ast.checkpoint();
        let node = ws.widget(WidgetKind::Table, args)?;
        Ok((checkpoint, node, ws.ast.context.enter_container(node)))
    })?;
    run_block(checkpoint, node, scope, block)
}

pub fn row(args: impl Into<WidgetArgs>) -> Result<NodeId> {
    widget(WidgetKind::Row, args)
}

pub fn widget(kind: impl Into<WidgetKind>, args: impl Into<WidgetArgs>) -> Result<NodeId> {
    let (kind, args) = (kind.into(), args.into());
    with(|ws| ws.widget(kind, args))
}

/// Exits its scope on the default workstation when dropped.
struct DefaultScope(Option<Scope>);

impl Drop for DefaultScope {
    fn drop(&mut self) {
        if let Some(scope) = self.0.take() {
            // During thread teardown or a re-entrant panic the instance may be
            // gone or borrowed; there is nothing left to restore then.
            let _ = DEFAULT.try_with(|cell| {
                if let Ok(mut ws) = cell.try_borrow_mut() {
                    ws.ast.context.exit(scope);
                }
            });
        }
    }
}

fn run_block(
    checkpoint: Checkpoint,
    node: NodeId,
    scope: Scope,
    block: impl FnOnce() -> Result<()>,
) -> Result<NodeId> {
    let outcome = {
        let _scope = DefaultScope(Some(scope));
        block()
    };
    match outcome {
        Ok(()) => Ok(node),
        Err(err) => {
            with(|ws| ws.ast.rollback(checkpoint, node));
            Err(err)
        }
    }
}
