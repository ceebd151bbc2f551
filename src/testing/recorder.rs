//! RecordingRuntime: a headless runtime that records runs and binds real
//! widget behaviour.
//!
//! Widgets bound by it answer `text()` with their declared text and turn
//! `click()` into a call of their `onclick` callback. Every `run` is appended
//! to a shared [`RunLog`] that stays readable after the runtime has been moved
//! into a [`Workstation`](crate::Workstation).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::ast::node::{Callback, NodeData};
use crate::error::{Result, WorkstationError};
use crate::runtime::{RunContext, Runtime, WidgetRuntime};
use crate::testing::snapshot::ast_to_string;

// ---------------------------------------------------------------------------
// RunLog
// ---------------------------------------------------------------------------

/// One recorded call to `run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    /// Title of the entry screen, if one was resolved.
    pub entry: Option<String>,
    /// Application title passed along by the session.
    pub title: Option<String>,
    /// The whole tree rendered with [`ast_to_string`].
    pub tree: String,
}

/// Shared, cloneable view of the runs a [`RecordingRuntime`] has seen.
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    records: Rc<RefCell<Vec<RunRecord>>>,
}

impl RunLog {
    /// Number of times `run` was called.
    pub fn runs(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn last(&self) -> Option<RunRecord> {
        self.records.borrow().last().cloned()
    }

    pub fn records(&self) -> Vec<RunRecord> {
        self.records.borrow().clone()
    }
}

// ---------------------------------------------------------------------------
// RecordingRuntime
// ---------------------------------------------------------------------------

/// A runtime for tests: records each run and binds widgets to [`Recorded`]
/// handles.
///
/// # Examples
///
/// ```ignore
/// let runtime = RecordingRuntime::new();
/// let log = runtime.log();
/// ws.set_runtime(runtime);
/// ws.app("Login")?;
/// assert_eq!(log.runs(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingRuntime {
    log: RunLog,
    fail_with: Option<String>,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `run` fail with `InvalidArguments(message)` after recording.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            log: RunLog::default(),
            fail_with: Some(message.into()),
        }
    }

    /// A handle on the run log that outlives the runtime.
    pub fn log(&self) -> RunLog {
        self.log.clone()
    }
}

impl Runtime for RecordingRuntime {
    fn run(&mut self, ctx: RunContext<'_>) -> Result<()> {
        let record = RunRecord {
            entry: ctx.entry_screen().map(|s| s.title().to_owned()),
            title: ctx.title.map(str::to_owned),
            tree: ast_to_string(ctx.ast),
        };
        self.log.records.borrow_mut().push(record);
        match &self.fail_with {
            Some(message) => Err(WorkstationError::InvalidArguments(message.clone())),
            None => Ok(()),
        }
    }

    fn bind(&self, widget: &NodeData) -> Rc<dyn WidgetRuntime> {
        Rc::new(Recorded {
            text: widget.text.clone(),
            onclick: widget.onclick.clone(),
            clicks: Cell::new(0),
        })
    }
}

// ---------------------------------------------------------------------------
// Recorded
// ---------------------------------------------------------------------------

/// Behaviour handle bound by [`RecordingRuntime`].
pub struct Recorded {
    text: String,
    onclick: Option<Callback>,
    clicks: Cell<usize>,
}

impl Recorded {
    pub fn clicks(&self) -> usize {
        self.clicks.get()
    }
}

impl WidgetRuntime for Recorded {
    fn text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn click(&self) -> Result<()> {
        self.clicks.set(self.clicks.get() + 1);
        if let Some(onclick) = &self.onclick {
            onclick();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Attributes;
    use crate::workstation::Workstation;

    #[test]
    fn records_runs() {
        let runtime = RecordingRuntime::new();
        let log = runtime.log();
        let mut ws = Workstation::new();
        ws.screen("Login").unwrap();
        ws.set_runtime(runtime);
        ws.app("Login").unwrap();

        assert_eq!(log.runs(), 1);
        let record = log.last().unwrap();
        assert_eq!(record.entry.as_deref(), Some("Login"));
        assert_eq!(record.tree, "screen \"Login\"");
    }

    #[test]
    fn failing_runtime_still_records() {
        let runtime = RecordingRuntime::failing("display unavailable");
        let log = runtime.log();
        let mut ws = Workstation::new();
        ws.set_runtime(runtime);
        assert!(ws.app(()).is_err());
        assert_eq!(log.runs(), 1);
        assert_eq!(log.records()[0].entry, None);
    }

    #[test]
    fn bound_handle_reports_text_and_clicks() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let data = NodeData::widget("button")
            .with_text("OK")
            .with_onclick(Rc::new(move || counter.set(counter.get() + 1)));
        let handle = Recorded {
            text: data.text.clone(),
            onclick: data.onclick.clone(),
            clicks: Cell::new(0),
        };
        assert_eq!(handle.text().unwrap(), "OK");
        handle.click().unwrap();
        handle.click().unwrap();
        assert_eq!(handle.clicks(), 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn click_without_callback_is_ok() {
        let mut ws = Workstation::new();
        ws.set_runtime(RecordingRuntime::new());
        ws.screen("s").unwrap();
        let button = ws.button(Attributes::new().with_text("noop")).unwrap();
        assert!(ws.click(button).is_ok());
    }
}
