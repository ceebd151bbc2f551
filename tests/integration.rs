//! Integration tests for workstation.
//!
//! These tests exercise the public API from outside the crate: keyword calls
//! on a session and through the `dsl` free functions, positional access,
//! runtime hand-off, and the recording runtime used for headless checks.

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use workstation::runtime::from_fn;
use workstation::testing::{ast_to_string, RecordingRuntime};
use workstation::{Attributes, IdConvention, Style, Workstation, WorkstationConfig, WorkstationError};

/// Route library logs to the test output. Set `RUST_LOG=workstation=debug`
/// to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn login_screen(ws: &mut Workstation) -> workstation::Result<()> {
    ws.screen_with("Login", |ws| {
        ws.label("Username")?;
        ws.textbox(Attributes::new().with_id("txtUser"))?;
        ws.passwordfield(Attributes::new().with_id("txtPassword"))?;
        ws.button(Attributes::new().with_id("btnLogin").with_text("Login"))?;
        Ok(())
    })?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Positional access
// ---------------------------------------------------------------------------

#[test]
fn test_widget_index_out_of_range() {
    let mut ws = Workstation::new();
    ws.screen_with("screen 1", |ws| {
        ws.label("my label")?;
        Ok(())
    })
    .unwrap();

    let screen = ws.ast().last_screen().unwrap();
    for index in [-1i64, 100] {
        let err = screen.widget(index).unwrap_err();
        assert_eq!(err.to_string(), "Index out of range.");
    }
    assert!(screen.widget(0).is_ok());
}

#[test]
fn test_each_screen_visits_every_screen() {
    let mut ws = Workstation::new();
    ws.screen("screen 1").unwrap();
    ws.screen("screen 2").unwrap();

    let mut touched = 0;
    ws.ast().each_screen(|_| touched += 1);
    assert_eq!(touched, ws.ast().number_of_screens());
    assert_eq!(touched, 2);
}

#[test]
fn test_screens_keep_declaration_order() {
    let mut ws = Workstation::new();
    ws.screen("screen 1").unwrap();
    ws.screen("screen 2").unwrap();

    assert_eq!(ws.ast().screen(0usize).unwrap().title(), "screen 1");
    assert_eq!(ws.ast().last_screen().unwrap().title(), "screen 2");
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

#[test]
fn test_label_string_convention() {
    let mut ws = Workstation::new();
    ws.screen_with("screen 1", |ws| {
        ws.label("test")?;
        Ok(())
    })
    .unwrap();

    let label = ws.ast().screen(0usize).unwrap().widget(0usize).unwrap();
    assert_eq!(label.id(), "labeltest");
    assert_eq!(label.text(), "test");
    assert_eq!(label.type_name(), "label");
    assert!(label.style().is_empty());
}

#[test]
fn test_empty_attributes_define_every_field() {
    let mut ws = Workstation::new();
    ws.screen_with("screen 1", |ws| {
        ws.label(Attributes::new())?;
        ws.textbox(())?;
        ws.button(Attributes::new())?;
        Ok(())
    })
    .unwrap();

    for widget in ws.ast().last_screen().unwrap().widgets() {
        assert_eq!(widget.id(), "");
        assert_eq!(widget.text(), "");
        assert!(widget.style().is_empty());
    }
}

#[test]
fn test_textbox_and_button_attributes() {
    let mut ws = Workstation::new();
    ws.screen_with("screen 1", |ws| {
        ws.textbox(Attributes::new().with_id("Username"))?;
        ws.textbox(())?;
        ws.textbox(Attributes::new().with_style(Style::new().with("color", "red")))?;
        ws.button(Attributes::new().with_text("Click me"))?;
        ws.button("Click me to")?;
        Ok(())
    })
    .unwrap();

    let screen = ws.ast().last_screen().unwrap();
    assert_eq!(screen.number_of_widgets(), 5);
    assert_eq!(screen.widget(0usize).unwrap().id(), "Username");
    assert_eq!(screen.widget(2usize).unwrap().style().get("color"), Some("red"));
    assert_eq!(screen.widget(3usize).unwrap().text(), "Click me");
    assert_eq!(screen.widget(4usize).unwrap().id(), "buttonClickmeto");
}

#[test]
fn test_widget_before_screen_is_ordering_error() {
    let mut ws = Workstation::new();
    let err = ws.label(()).unwrap_err();
    assert!(err.is_ordering());
    assert_eq!(err.to_string(), "screen must be defined before label can be added");
    assert!(ws.ast().is_empty());
}

#[test]
fn test_row_outside_table_is_ordering_error() {
    let mut ws = Workstation::new();
    ws.screen("s").unwrap();
    let err = ws.row("Yes").unwrap_err();
    assert_eq!(err.to_string(), "table must be defined before row can be added");
}

#[test]
fn test_lenient_rows_attach_to_screen() {
    let mut ws = Workstation::with_config(WorkstationConfig::new().strict_rows(false));
    ws.screen("s").unwrap();
    ws.row("Yes").unwrap();
    assert_eq!(ws.ast().last_screen().unwrap().widget(0usize).unwrap().type_name(), "row");
}

#[test]
fn test_tables_and_rows() {
    let mut ws = Workstation::new();
    ws.screen_with("Menu", |ws| {
        ws.table(())?;
        ws.table_with("Options", |ws| {
            ws.row("Yes")?;
            ws.row(Attributes::new().with_id("rowNo").with_text("No"))?;
            Ok(())
        })?;
        ws.label("after")?;
        Ok(())
    })
    .unwrap();

    let screen = ws.ast().last_screen().unwrap();
    assert_eq!(screen.number_of_widgets(), 3);
    let options = screen.widget(1usize).unwrap();
    assert_eq!(options.text(), "Options");
    assert_eq!(options.number_of_widgets(), 2);
    assert_eq!(options.widget(1usize).unwrap().id(), "rowNo");
    assert_eq!(screen.widget(2usize).unwrap().type_name(), "label");
}

#[test]
fn test_tree_snapshot() {
    let mut ws = Workstation::new();
    login_screen(&mut ws).unwrap();
    ws.screen_with("Menu", |ws| {
        ws.table_with("Options", |ws| {
            ws.row("Yes")?;
            ws.row("No")?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();

    insta::assert_snapshot!(ast_to_string(ws.ast()), @r###"
    screen "Login"
      label#labelUsername "Username"
      textbox#txtUser
      passwordfield#txtPassword
      button#btnLogin "Login"
    screen "Menu"
      table#tableOptions "Options"
        row#rowYes "Yes"
        row#rowNo "No"
    "###);
}

#[test]
fn test_verbatim_id_convention() {
    let config = WorkstationConfig::new().with_id_convention(IdConvention::Verbatim);
    let mut ws = Workstation::with_config(config);
    ws.screen_with("s", |ws| {
        ws.label("hello world")?;
        Ok(())
    })
    .unwrap();
    assert_eq!(ws.ast().last_screen().unwrap().widget(0usize).unwrap().id(), "labelhello world");
}

#[test]
fn test_failed_block_leaves_no_trace() {
    init_tracing();
    let mut ws = Workstation::new();
    ws.screen("kept").unwrap();
    let result = ws.screen_with("dropped", |ws| {
        ws.label("x")?;
        ws.row("outside a table")?;
        Ok(())
    });

    assert!(result.unwrap_err().is_ordering());
    assert_eq!(ws.ast().number_of_screens(), 1);
    assert_eq!(ws.ast().last_screen().unwrap().title(), "kept");
    assert!(ws.ast().context().current_container().is_none());
}

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

#[test]
fn test_unbound_widgets_are_not_implemented() {
    let mut ws = Workstation::new();
    let mut nodes = Vec::new();
    ws.screen_with("screen 1", |ws| {
        nodes.push(ws.label(Attributes::new().with_text("hello"))?);
        nodes.push(ws.textbox(Attributes::new().with_text("hello"))?);
        nodes.push(ws.button(Attributes::new().with_text("hello"))?);
        Ok(())
    })
    .unwrap();

    for node in nodes {
        assert_eq!(ws.widget_text(node).unwrap_err().to_string(), "text not implemented");
        assert_eq!(ws.click(node).unwrap_err().to_string(), "click not implemented");
    }
}

#[test]
fn test_app_invokes_runtime() {
    let mut ws = Workstation::new();
    let invoked = Rc::new(Cell::new(false));
    let flag = Rc::clone(&invoked);
    ws.set_runtime(from_fn(move |_| {
        flag.set(true);
        Ok(())
    }));

    ws.app("screen 1").unwrap();
    assert!(invoked.get());
}

#[test]
fn test_app_without_runtime() {
    let mut ws = Workstation::new();
    assert!(matches!(ws.app(()), Err(WorkstationError::RuntimeUnavailable)));
}

#[test]
fn test_app_with_unknown_screen() {
    let mut ws = Workstation::new();
    ws.set_runtime(RecordingRuntime::new());
    ws.screen("Login").unwrap();
    let err = ws.app("Settings").unwrap_err();
    assert!(matches!(err, WorkstationError::ScreenNotFound(_)));
}

#[test]
fn test_recording_runtime_sees_entry_and_tree() {
    init_tracing();
    let runtime = RecordingRuntime::new();
    let log = runtime.log();
    let mut ws = Workstation::with_config(WorkstationConfig::new().with_title("Demo"));
    login_screen(&mut ws).unwrap();
    ws.screen("Menu").unwrap();
    ws.set_runtime(runtime);

    ws.app(1usize).unwrap();

    let record = log.last().unwrap();
    assert_eq!(log.runs(), 1);
    assert_eq!(record.entry.as_deref(), Some("Menu"));
    assert_eq!(record.title.as_deref(), Some("Demo"));
    assert_eq!(record.tree, ast_to_string(ws.ast()));
}

#[test]
fn test_button_onclick_through_runtime() {
    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    let mut ws = Workstation::new();
    ws.set_runtime(RecordingRuntime::new());

    let mut login = None;
    ws.screen_with("Login", |ws| {
        login = Some(ws.button(
            Attributes::new()
                .with_text("Login")
                .with_onclick(move || counter.set(counter.get() + 1)),
        )?);
        Ok(())
    })
    .unwrap();

    let login = login.unwrap();
    ws.click(login).unwrap();
    ws.click(login).unwrap();
    assert_eq!(clicks.get(), 2);
    assert_eq!(ws.widget_text(login).unwrap(), "Login");
}

// ---------------------------------------------------------------------------
// Default session
// ---------------------------------------------------------------------------

mod default_session {
    use pretty_assertions::assert_eq;
    use workstation::dsl::*;

    #[test]
    fn test_keywords_share_one_tree() {
        reset();
        screen("screen 1").unwrap();
        screen_with("screen 2", || {
            label("hello world")?;
            Ok(())
        })
        .unwrap();

        with_ast(|ast| {
            assert_eq!(ast.number_of_screens(), 2);
            let label = ast.last_screen().unwrap().widget(0usize).unwrap();
            assert_eq!(label.id(), "labelhelloworld");
        });
    }

    #[test]
    fn test_onclick_declares_through_default_session() {
        reset();
        set_runtime(workstation::testing::RecordingRuntime::new());
        let mut next = None;
        screen_with("Login", || {
            next = Some(button(
                Attributes::new()
                    .with_text("Next")
                    .with_onclick(|| {
                        screen("Next").unwrap();
                    }),
            )?);
            Ok(())
        })
        .unwrap();

        click(next.unwrap()).unwrap();
        with_ast(|ast| assert_eq!(ast.last_screen().unwrap().title(), "Next"));
    }

    #[test]
    fn test_reset_clears_previous_declarations() {
        reset();
        screen("old").unwrap();
        reset();
        with_ast(|ast| assert!(ast.is_empty()));
        assert!(label("too early").is_err());
    }
}

// ---------------------------------------------------------------------------
// Macros
// ---------------------------------------------------------------------------

#[cfg(feature = "macros")]
mod macros {
    use pretty_assertions::assert_eq;
    use workstation::testing::ast_to_string;
    use workstation::{style, view, Workstation};

    #[test]
    fn test_view_builds_tree() {
        let mut ws = Workstation::new();
        view!(&mut ws,
            <screen title="Login">
                <label text="Username" />
                <textbox id="txtUser" style="color: red" />
                <table title="Options">
                    <row text="Yes" />
                </table>
            </screen>
        )
        .unwrap();

        assert_eq!(
            ast_to_string(ws.ast()),
            "screen \"Login\"\n  label#labelUsername \"Username\"\n  textbox#txtUser {color: red;}\n  table#tableOptions \"Options\"\n    row#rowYes \"Yes\""
        );
    }

    #[test]
    fn test_view_propagates_ordering_errors() {
        let mut ws = Workstation::new();
        let result = view!(&mut ws, <screen title="s" /> <row text="Yes" />);
        assert!(result.unwrap_err().is_ordering());
    }

    #[test]
    fn test_style_macro() {
        let style = style! {
            color: red;
            padding: 1 2;
            background: rgb(1, 2, 3);
            border-color: #1e1e1e;
        };
        assert_eq!(style.get("border-color"), Some("#1e1e1e"));
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("padding"), Some("1 2"));
        assert_eq!(
            style,
            workstation::Style::parse(
                "color: red; padding: 1 2; background: rgb(1, 2, 3); border-color: #1e1e1e"
            )
            .unwrap()
        );
    }
}
