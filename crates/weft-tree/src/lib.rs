//! Incremental parse-tree construction driven by parsing routines.
//!
//! A [`Tree`] pulls [`Item`]s from a [`Lexer`](weft_lex::Lexer) on demand, buffers a few of
//! them for lookahead and backup, and grows nodes under a movable cursor. Parsing routines
//! ([`ParseFn`]) are run by a trampoline until one of them signals the end, after which the
//! finished tree is handed to a post-processing routine ([`ProcessFn`], [`NodeFn`]).

mod error;
mod node;
mod parse;
mod slot;
mod tree;
mod walk;

pub use error::TreeError;
pub use node::{Node, NodeId};
pub use parse::{NodeFn, ParseFn, ProcessFn, run};
pub use slot::Slot;
pub use tree::{LOOKAHEAD_CAPACITY, MAX_LOOKAHEAD, Tree};
pub use walk::{NodeRef, Preorder, WalkEvent};
pub use weft_lex::Item;
