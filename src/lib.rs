//! # workstation
//!
//! A declarative keyword DSL for describing screens and widgets. Keyword calls
//! build an in-memory tree; a pluggable runtime then renders or executes it.
//!
//! ```ignore
//! use workstation::{Attributes, Workstation};
//!
//! let mut ws = Workstation::new();
//! ws.screen_with("Login", |ws| {
//!     ws.label("Username")?;
//!     ws.textbox(Attributes::new().with_id("txtUser"))?;
//!     ws.passwordfield(Attributes::new().with_id("txtPassword"))?;
//!     ws.button(Attributes::new().with_text("Login").with_onclick(|| println!("clicked")))?;
//!     Ok(())
//! })?;
//! ws.set_runtime(my_runtime);
//! ws.app("Login")?;
//! ```
//!
//! ## Core Systems
//!
//! - **[`ast`]**: Slotmap-backed screen/widget arena with positional access and queries
//! - **[`workstation`]**: The keyword session (`screen`, `label`, `table`, `row`, `app`, ...)
//! - **[`dsl`]**: The same keywords as free functions over a thread-local default session
//! - **[`context`]**: Current screen / open container tracking with scoped restore
//! - **[`args`]**: String-or-attributes keyword arguments and their normalization
//! - **[`style`]**: Opaque style storage with a logos-based declaration parser
//! - **[`runtime`]**: The `Runtime` and `WidgetRuntime` seams, unbound by default
//! - **[`config`]**: Session configuration and id conventions
//! - **[`testing`]**: Recording runtime and tree snapshots for tests

// Tree
pub mod ast;
pub mod context;

// Keywords
pub mod args;
pub mod dsl;
pub mod workstation;

// Attributes and collaborators
pub mod config;
pub mod error;
pub mod runtime;
pub mod style;

// Test support
pub mod testing;

pub use args::{Attributes, WidgetArgs};
pub use ast::{Ast, NodeId, ScreenRef, WidgetKind, WidgetRef};
pub use config::{IdConvention, WorkstationConfig};
pub use error::{Ordering, Result, WorkstationError};
pub use runtime::{Runtime, RunContext, WidgetRuntime};
pub use style::Style;
pub use workstation::{ScreenSelector, Workstation};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use workstation_macros::{style, view};
