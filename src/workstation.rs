//! The keyword session: `screen`, `label`, `textbox`, `passwordfield`,
//! `button`, `table`, `row` and `app`.
//!
//! [`Workstation`] owns the [`Ast`], the installed [`Runtime`] and the
//! [`WorkstationConfig`]. Keywords that take a block hand it a
//! [`ContextGuard`] that derefs to the workstation, so nested calls route to
//! the right parent and the context is restored however the block exits.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::args::WidgetArgs;
use crate::ast::node::{NodeId, WidgetKind};
use crate::ast::tree::{Ast, Checkpoint};
use crate::config::WorkstationConfig;
use crate::context::ContextGuard;
use crate::error::{Result, WorkstationError};
use crate::runtime::{RunContext, Runtime, WidgetRuntime};

// ---------------------------------------------------------------------------
// ScreenSelector
// ---------------------------------------------------------------------------

/// How `app` picks the entry screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenSelector {
    /// The first screen. This is the default entry.
    First,
    /// The screen at a position in declaration order.
    Index(usize),
    /// The first screen with this title.
    Title(String),
}

impl ScreenSelector {
    /// The entry screen in `ast`, or `None` when `ast` has no screens.
    pub fn resolve(&self, ast: &Ast) -> Result<Option<NodeId>> {
        if ast.number_of_screens() == 0 {
            return Ok(None);
        }
        let screen = match self {
            ScreenSelector::First => ast.screen(0usize).ok(),
            ScreenSelector::Index(i) => ast.screen(*i).ok(),
            ScreenSelector::Title(t) => ast.screen_by_title(t),
        };
        screen
            .map(|screen| Some(screen.node_id()))
            .ok_or_else(|| WorkstationError::ScreenNotFound(self.to_string()))
    }
}

impl From<&str> for ScreenSelector {
    fn from(title: &str) -> Self {
        ScreenSelector::Title(title.to_owned())
    }
}

impl From<String> for ScreenSelector {
    fn from(title: String) -> Self {
        ScreenSelector::Title(title)
    }
}

impl From<usize> for ScreenSelector {
    fn from(index: usize) -> Self {
        ScreenSelector::Index(index)
    }
}

impl From<()> for ScreenSelector {
    fn from(_: ()) -> Self {
        ScreenSelector::First
    }
}

impl fmt::Display for ScreenSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenSelector::First => f.write_str("the first screen"),
            ScreenSelector::Index(i) => write!(f, "index {i}"),
            ScreenSelector::Title(t) => write!(f, "title {t:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Workstation
// ---------------------------------------------------------------------------

/// A declaration session.
///
/// # Examples
///
/// ```ignore
/// let mut ws = Workstation::new();
/// ws.screen_with("Login", |ws| {
///     ws.label("Username")?;
///     ws.textbox(Attributes::new().with_id("txtUser"))?;
///     ws.table_with("Options", |ws| {
///         ws.row("Yes")?;
///         ws.row("No")?;
///         Ok(())
///     })?;
///     Ok(())
/// })?;
/// ```
pub struct Workstation {
    pub(crate) ast: Ast,
    runtime: Option<Box<dyn Runtime>>,
    config: WorkstationConfig,
}

impl Workstation {
    /// Create a session with the default config and no runtime.
    pub fn new() -> Self {
        Self::with_config(WorkstationConfig::default())
    }

    pub fn with_config(config: WorkstationConfig) -> Self {
        Self {
            ast: Ast::with_convention(config.id_convention),
            runtime: None,
            config,
        }
    }

    pub fn config(&self) -> &WorkstationConfig {
        &self.config
    }

    /// The tree built so far.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Direct tree access, bypassing keyword routing.
    pub fn ast_mut(&mut self) -> &mut Ast {
        &mut self.ast
    }

    /// Clear the tree and the context. The runtime stays installed.
    pub fn reset(&mut self) {
        self.ast.clear();
    }

    // ── Runtime ──────────────────────────────────────────────────────

    /// Install a runtime, returning the previous one.
    ///
    /// Every existing widget is re-bound through [`Runtime::bind`]; widgets
    /// declared later are bound when they are created.
    pub fn set_runtime(&mut self, runtime: impl Runtime + 'static) -> Option<Box<dyn Runtime>> {
        let runtime: Box<dyn Runtime> = Box::new(runtime);
        let mut rebound = 0usize;
        for data in self.ast.nodes.values_mut() {
            if !data.is_screen() {
                data.runtime = runtime.bind(data);
                rebound += 1;
            }
        }
        debug!(rebound, "runtime installed");
        self.runtime.replace(runtime)
    }

    /// Remove the installed runtime. Existing bindings are kept.
    pub fn take_runtime(&mut self) -> Option<Box<dyn Runtime>> {
        self.runtime.take()
    }

    pub fn has_runtime(&self) -> bool {
        self.runtime.is_some()
    }

    /// Hand the tree to the installed runtime, starting at `selector`.
    ///
    /// With an empty tree the runtime runs with no entry screen. Otherwise the
    /// selector must match a screen.
    pub fn app(&mut self, selector: impl Into<ScreenSelector>) -> Result<()> {
        let selector = selector.into();
        let Some(runtime) = self.runtime.as_mut() else {
            warn!("app called with no runtime installed");
            return Err(WorkstationError::RuntimeUnavailable);
        };
        let entry = selector.resolve(&self.ast)?;
        info!(%selector, screens = self.ast.number_of_screens(), "starting runtime");
        runtime.run(RunContext {
            ast: &self.ast,
            entry,
            title: self.config.title.as_deref(),
        })
    }

    /// Put back a runtime taken out for a run, unless another one was
    /// installed meanwhile. Widgets that are not in `before` were declared
    /// while the runtime was out and get bound now.
    pub(crate) fn restore_runtime(&mut self, runtime: Box<dyn Runtime>, before: &Ast) {
        if self.runtime.is_some() {
            return;
        }
        for (id, data) in self.ast.nodes.iter_mut() {
            if !data.is_screen() && !before.contains(id) {
                data.runtime = runtime.bind(data);
            }
        }
        self.runtime = Some(runtime);
    }

    /// The behaviour handle bound to `widget`.
    pub fn widget_runtime(&self, widget: NodeId) -> Result<Rc<dyn WidgetRuntime>> {
        self.ast
            .get(widget)
            .map(|data| Rc::clone(&data.runtime))
            .ok_or(WorkstationError::UnknownNode)
    }

    /// Click a widget through its bound behaviour handle.
    pub fn click(&self, widget: NodeId) -> Result<()> {
        self.widget_runtime(widget)?.click()
    }

    /// Read a widget's text through its bound behaviour handle.
    pub fn widget_text(&self, widget: NodeId) -> Result<String> {
        self.widget_runtime(widget)?.text()
    }

    // ── Keywords ─────────────────────────────────────────────────────

    /// Declare a screen with no block.
    pub fn screen(&mut self, args: impl Into<WidgetArgs>) -> Result<NodeId> {
        self.ast.add_screen(args)
    }

    /// Declare a screen and run `block` with it as the current screen.
    ///
    /// Screens never nest: a `screen` call inside the block adds another
    /// top-level screen. If the block fails, everything it declared is
    /// removed again and the error is returned.
    pub fn screen_with<F>(&mut self, args: impl Into<WidgetArgs>, block: F) -> Result<NodeId>
    where
        F: FnOnce(&mut Workstation) -> Result<()>,
    {
        let checkpoint = self.ast.checkpoint();
        let screen = self.ast.add_screen(args)?;
        let outcome = {
            let mut guard = ContextGuard::screen(self);
            block(&mut guard)
        };
        self.settle(checkpoint, screen, outcome)
    }

    pub fn label(&mut self, args: impl Into<WidgetArgs>) -> Result<NodeId> {
        self.widget(WidgetKind::Label, args)
    }

    pub fn textbox(&mut self, args: impl Into<WidgetArgs>) -> Result<NodeId> {
        self.widget(WidgetKind::Textbox, args)
    }

    pub fn passwordfield(&mut self, args: impl Into<WidgetArgs>) -> Result<NodeId> {
        self.widget(WidgetKind::PasswordField, args)
    }

    pub fn button(&mut self, args: impl Into<WidgetArgs>) -> Result<NodeId> {
        self.widget(WidgetKind::Button, args)
    }

    /// Declare a table with no block.
    pub fn table(&mut self, args: impl Into<WidgetArgs>) -> Result<NodeId> {
        self.widget(WidgetKind::Table, args)
    }

    /// Declare a table and run `block` with it as the innermost container.
    ///
    /// Pass `()` as `args` for an anonymous table.
    pub fn table_with<F>(&mut self, args: impl Into<WidgetArgs>, block: F) -> Result<NodeId>
    where
        F: FnOnce(&mut Workstation) -> Result<()>,
    {
        self.container_with(WidgetKind::Table, args, block)
    }

    /// Declare a row in the innermost open table.
    pub fn row(&mut self, args: impl Into<WidgetArgs>) -> Result<NodeId> {
        self.widget(WidgetKind::Row, args)
    }

    /// Declare a widget of any type, including custom ones.
    pub fn widget(&mut self, kind: impl Into<WidgetKind>, args: impl Into<WidgetArgs>) -> Result<NodeId> {
        let node = self
            .ast
            .append_widget(kind.into(), args, self.config.strict_rows)?;
        self.bind(node);
        Ok(node)
    }

    /// Declare a container widget of any type and run `block` inside it.
    pub fn container_with<F>(
        &mut self,
        kind: impl Into<WidgetKind>,
        args: impl Into<WidgetArgs>,
        block: F,
    ) -> Result<NodeId>
    where
        F: FnOnce(&mut Workstation) -> Result<()>,
    {
        let checkpoint = self.ast.checkpoint();
        let container = self.widget(kind, args)?;
        let outcome = {
            let mut guard = ContextGuard::container(self, container);
            block(&mut guard)
        };
        self.settle(checkpoint, container, outcome)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn bind(&mut self, node: NodeId) {
        if let Some(runtime) = self.runtime.as_ref() {
            if let Some(data) = self.ast.nodes.get_mut(node) {
                data.runtime = runtime.bind(data);
            }
        }
    }

    fn settle(&mut self, checkpoint: Checkpoint, node: NodeId, outcome: Result<()>) -> Result<NodeId> {
        match outcome {
            Ok(()) => Ok(node),
            Err(err) => {
                warn!(error = %err, "declaration block failed, rolling back");
                self.ast.rollback(checkpoint, node);
                Err(err)
            }
        }
    }
}

impl Default for Workstation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Workstation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workstation")
            .field("ast", &self.ast)
            .field("runtime", &self.runtime.as_ref().map(|_| "dyn Runtime"))
            .field("config", &self.config)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
