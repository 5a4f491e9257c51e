use std::sync::atomic::{AtomicU64, Ordering};

use la_arena::{Idx, RawIdx};
use weft_lex::Item;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique tag of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TreeId(u64);

impl TreeId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a [`Node`] inside the tree that created it.
///
/// Ids are tagged with their tree, so an id handed to a different tree is never mistaken
/// for one of its own nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: TreeId,
    raw: RawIdx,
}

impl NodeId {
    pub(crate) fn new<K, V>(tree: TreeId, idx: Idx<Node<K, V>>) -> Self {
        Self { tree, raw: idx.into_raw() }
    }

    pub(crate) fn tree(self) -> TreeId {
        self.tree
    }

    pub(crate) fn idx<K, V>(self) -> Idx<Node<K, V>> {
        Idx::from_raw(self.raw)
    }

    pub(crate) fn index(self) -> usize {
        u32::from(self.raw) as usize
    }
}

/// A tree vertex wrapping one [`Item`].
///
/// The parent link is an index set once at creation and never owns anything; children
/// are kept in the order they were created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K, V> {
    item: Item<K, V>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(item: Item<K, V>, parent: Option<NodeId>) -> Self {
        Self { item, parent, children: Vec::new() }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub fn item(&self) -> &Item<K, V> {
        &self.item
    }

    pub fn kind(&self) -> &K {
        &self.item.kind
    }

    pub fn value(&self) -> &[V] {
        &self.item.value
    }

    pub fn pos(&self) -> isize {
        self.item.pos
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
