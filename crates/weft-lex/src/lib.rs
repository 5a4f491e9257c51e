//! Classified lexical items and the pull interface a tree builder consumes them through.
//!
//! A tokenizer only has to hand out one [`Item`] at a time via [`Lexer::next_item`], and
//! must eventually produce an item carrying the caller's end kind. [`StateLexer`] is a
//! ready-made tokenizer driven by state functions over a slice of input elements.

mod state;
#[cfg(test)]
mod tests;

pub use state::{StateFn, StateLexer};

/// One classified lexeme: where it starts, what it is and the elements it spans.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item<K, V> {
    pub pos: isize,
    pub kind: K,
    pub value: Vec<V>,
}

impl<K, V> Item<K, V> {
    /// Position given to synthetic items that do not come from the input, such as a tree root.
    pub const ROOT_POS: isize = -1;

    pub fn new(pos: isize, kind: K, value: impl Into<Vec<V>>) -> Self {
        Self { pos, kind, value: value.into() }
    }

    pub fn is(&self, kind: &K) -> bool
    where
        K: PartialEq,
    {
        self.kind == *kind
    }
}

/// Pull side of a tokenizer.
///
/// Implementations may do arbitrary work per call, but once the end kind has been
/// returned every further call should keep returning it.
pub trait Lexer<K, V> {
    fn next_item(&mut self) -> Item<K, V>;
}

impl<K, V, F> Lexer<K, V> for F
where
    F: FnMut() -> Item<K, V>,
{
    fn next_item(&mut self) -> Item<K, V> {
        self()
    }
}
