//! Builder configuration: id convention, row strictness, app title.

// ---------------------------------------------------------------------------
// IdConvention
// ---------------------------------------------------------------------------

/// How a widget id is derived when a keyword receives a bare string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdConvention {
    /// Type name followed by the alphanumeric characters of the text:
    /// `button("Click me!")` gets the id `buttonClickme`.
    #[default]
    Alphanumeric,
    /// Type name followed by the text, unchanged: `labelhello world`.
    Verbatim,
    /// Leave the id empty.
    Disabled,
}

impl IdConvention {
    /// Derive an id for a widget of type `type_name` shown with `text`.
    pub fn derive(self, type_name: &str, text: &str) -> String {
        match self {
            IdConvention::Alphanumeric => {
                let mut id = String::with_capacity(type_name.len() + text.len());
                id.push_str(type_name);
                id.extend(text.chars().filter(|c| c.is_alphanumeric()));
                id
            }
            IdConvention::Verbatim => format!("{type_name}{text}"),
            IdConvention::Disabled => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// WorkstationConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Workstation`](crate::Workstation) session.
#[derive(Debug, Clone)]
pub struct WorkstationConfig {
    /// Optional application title, handed to the runtime on `app`.
    pub title: Option<String>,
    /// Id derivation for string-shorthand widgets.
    pub id_convention: IdConvention,
    /// When `true`, `row` outside a table is an ordering violation. When
    /// `false` the row is attached to the current screen instead.
    pub strict_rows: bool,
}

impl Default for WorkstationConfig {
    fn default() -> Self {
        Self {
            title: None,
            id_convention: IdConvention::default(),
            strict_rows: true,
        }
    }
}

impl WorkstationConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the id convention (builder).
    pub fn with_id_convention(mut self, convention: IdConvention) -> Self {
        self.id_convention = convention;
        self
    }

    /// Set row strictness (builder).
    pub fn strict_rows(mut self, strict: bool) -> Self {
        self.strict_rows = strict;
        self
    }
}
