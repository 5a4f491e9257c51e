//! Brace templates: `with {tmpl}.` renders as `with >>tmpl<<.`, nesting included.

mod grammar;
mod lexer;
mod process;
#[cfg(test)]
mod tests;

use thiserror::Error;
use tracing::debug;
use weft_errors::{Diagnostic, TextRange, TextSize};
use weft_lex::{StateFn, StateLexer};
use weft_tree::{ParseFn, Tree};

pub use process::{PROCESS, PROCESS_NODE, process, process_node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextToken {
    #[default]
    Eof,
    Error,
    Ident,
    TemplateOpen,
    TemplateClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated template starting at position {pos}")]
    Unterminated { pos: isize },
    #[error("unexpected `}}` at position {pos}")]
    UnexpectedClose { pos: isize },
}

impl TemplateError {
    pub fn pos(self) -> isize {
        match self {
            Self::Unterminated { pos } | Self::UnexpectedClose { pos } => pos,
        }
    }

    /// Points at the offending brace in `text`, the source the template was lexed from.
    pub fn diagnostic(self, text: &str) -> Diagnostic {
        let (offset, len) = usize::try_from(self.pos())
            .ok()
            .and_then(|pos| text.char_indices().nth(pos))
            .map_or((text.len(), 0), |(offset, c)| (offset, c.len_utf8()));
        let range = TextRange::at(TextSize::new(offset as u32), TextSize::new(len as u32));

        let (label, help) = match self {
            Self::Unterminated { .. } => ("opened here", "close the template with `}`"),
            Self::UnexpectedClose { .. } => {
                ("no template to close", "remove it, or open a template before it with `{`")
            }
        };
        Diagnostic::error(self.to_string(), range).with_label(label).with_help(help)
    }
}

/// A tree over `input` that has not been parsed yet.
pub fn tree(input: &[char]) -> Tree<'_, TextToken, char> {
    let lexer = StateLexer::new(StateFn::new(lexer::text), input);
    Tree::new(lexer, ParseFn::new(grammar::start), TextToken::Eof, [])
}

pub fn render(text: &str) -> Result<String, TemplateError> {
    let input = text.chars().collect::<Vec<_>>();
    let rendered = weft_tree::run(
        &input,
        StateFn::new(lexer::text),
        ParseFn::new(grammar::start),
        PROCESS,
    );
    debug!(chars = input.len(), ok = rendered.is_ok(), "render");
    rendered
}
