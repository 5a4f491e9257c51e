//! Source diagnostics rendered with `annotate-snippets`.

use annotate_snippets::{Level, Message, Snippet};
pub use annotate_snippets::Renderer;
pub use text_size::{TextRange, TextSize};

/// An error about one span of a source text, with optional help lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
    label: String,
    help: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range, label: String::new(), help: Vec::new() }
    }

    /// Text shown next to the underlined span.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn help(&self) -> &[String] {
        &self.help
    }

    /// Builds the snippet for `text`, the source `range` points into, shown as coming
    /// from `origin`. Hand the result to a [`Renderer`].
    pub fn to_message<'a>(&'a self, origin: &'a str, text: &'a str) -> Message<'a> {
        let span = Level::Error.span(self.range.into()).label(&self.label);
        let snippet = Snippet::source(text).origin(origin).annotation(span).fold(true);

        self.help.iter().fold(Level::Error.title(&self.message).snippet(snippet), |message, help| {
            message.footer(Level::Help.title(help))
        })
    }
}
