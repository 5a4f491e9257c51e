use std::fmt;

use weft_lex::{StateFn, StateLexer};

use crate::{NodeRef, Tree};

/// A parsing routine: advances the tree by one step and returns the routine to run next,
/// or `None` when parsing is done.
///
/// Routines hand control back to [`Tree::parse`] instead of calling each other, so deeply
/// nested input does not grow the call stack.
pub struct ParseFn<K, V>(Routine<K, V>);

type Routine<K, V> = fn(&mut Tree<'_, K, V>) -> Option<ParseFn<K, V>>;

impl<K, V> ParseFn<K, V> {
    pub const fn new(f: Routine<K, V>) -> Self {
        Self(f)
    }

    pub(crate) fn call(self, tree: &mut Tree<'_, K, V>) -> Option<Self> {
        (self.0)(tree)
    }
}

impl<K, V> Clone for ParseFn<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for ParseFn<K, V> {}

impl<K, V> PartialEq for ParseFn<K, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.0, other.0)
    }
}

impl<K, V> fmt::Debug for ParseFn<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParseFn").field(&(self.0 as *const ())).finish()
    }
}

/// Turns a finished tree into a result.
pub type ProcessFn<K, V, R, E> = fn(&Tree<'_, K, V>) -> Result<R, E>;

/// Turns a single node of a finished tree into a partial result.
pub type NodeFn<K, V, R, E> = fn(NodeRef<'_, K, V>) -> Result<R, E>;

/// Lexes `input` starting from `init_state`, parses it starting from `init_parse`, and
/// hands the finished tree to `process`.
///
/// The tree's end kind is `K::default()`, which is also what [`StateLexer`] yields once
/// its states run out. Errors from `process` are returned as they are.
pub fn run<K, V, R, E>(
    input: &[V],
    init_state: StateFn<K, V>,
    init_parse: ParseFn<K, V>,
    process: ProcessFn<K, V, R, E>,
) -> Result<R, E>
where
    K: Default,
{
    let lexer = StateLexer::new(init_state, input);
    let mut tree = Tree::new(lexer, init_parse, K::default(), Vec::new());
    tree.parse();
    process(&tree)
}
