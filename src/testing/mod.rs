//! Headless testing helpers: a recording runtime and tree snapshots.
//!
//! Install a [`RecordingRuntime`] to observe `app` calls and to give widgets
//! working `text()`/`click()` handles. Use [`ast_to_string`] to capture a tree
//! as plain text for snapshot-style assertions.

pub mod recorder;
pub mod snapshot;

pub use recorder::{RecordingRuntime, RunLog, RunRecord};
pub use snapshot::ast_to_string;
