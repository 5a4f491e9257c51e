use std::fmt;

use la_arena::Arena;
use weft_lex::Item;

use crate::{Node, NodeId};

/// Read-only view of a node together with the tree it lives in.
pub struct NodeRef<'t, K, V> {
    nodes: &'t Arena<Node<K, V>>,
    id: NodeId,
}

impl<'t, K, V> NodeRef<'t, K, V> {
    pub(crate) fn new(nodes: &'t Arena<Node<K, V>>, id: NodeId) -> Self {
        Self { nodes, id }
    }

    fn with(self, id: NodeId) -> Self {
        Self { nodes: self.nodes, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn node(self) -> &'t Node<K, V> {
        &self.nodes[self.id.idx()]
    }

    pub fn item(self) -> &'t Item<K, V> {
        self.node().item()
    }

    pub fn kind(self) -> &'t K {
        self.node().kind()
    }

    pub fn value(self) -> &'t [V] {
        self.node().value()
    }

    pub fn pos(self) -> isize {
        self.node().pos()
    }

    pub fn is_root(self) -> bool {
        self.node().parent().is_none()
    }

    pub fn parent(self) -> Option<Self> {
        self.node().parent().map(|parent| self.with(parent))
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        self.node().children().iter().map(move |&child| self.with(child))
    }

    pub fn first_child(self) -> Option<Self> {
        self.node().children().first().map(|&child| self.with(child))
    }

    pub fn last_child(self) -> Option<Self> {
        self.node().children().last().map(|&child| self.with(child))
    }

    /// This node followed by its parent, its grandparent, and so on up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = Self> {
        std::iter::successors(Some(self), |node| node.parent())
    }

    pub fn depth(self) -> usize {
        self.ancestors().count() - 1
    }

    pub fn preorder(self) -> Preorder<'t, K, V> {
        Preorder::new(self)
    }

    pub(crate) fn debug_dump(self) -> String
    where
        K: fmt::Debug,
        V: fmt::Display,
    {
        let mut buf = String::new();
        let mut indent = 0;

        for event in self.preorder() {
            match event {
                WalkEvent::Enter(node) => {
                    let value = node.value().iter().map(ToString::to_string).collect::<String>();
                    buf.push_str(&format!(
                        "{:indent$}{:?}@{} {value:?}\n",
                        "",
                        node.kind(),
                        node.pos(),
                    ));
                    indent += 2;
                }
                WalkEvent::Leave(_) => indent -= 2,
            }
        }

        buf
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K, V> PartialEq for NodeRef<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K, V> Eq for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef").field("id", &self.id).field("item", self.item()).finish()
    }
}

/// Depth-first walk over a subtree, entering each node before its children and leaving
/// it after them.
pub struct Preorder<'t, K, V> {
    start: NodeRef<'t, K, V>,
    /// Entered nodes and the index of the next child to visit.
    stack: Vec<(NodeRef<'t, K, V>, usize)>,
    started: bool,
    skip_subtree: bool,
}

impl<'t, K, V> Preorder<'t, K, V> {
    fn new(start: NodeRef<'t, K, V>) -> Self {
        Self { start, stack: Vec::new(), started: false, skip_subtree: false }
    }

    /// Skips the children of the node just entered; the next event leaves it.
    pub fn skip_subtree(&mut self) {
        self.skip_subtree = true;
    }
}

impl<'t, K, V> Iterator for Preorder<'t, K, V> {
    type Item = WalkEvent<'t, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            self.stack.push((self.start, 0));
            return Some(WalkEvent::Enter(self.start));
        }

        if std::mem::take(&mut self.skip_subtree) {
            let (node, _) = self.stack.pop()?;
            return Some(WalkEvent::Leave(node));
        }

        let (node, next_child) = self.stack.last_mut()?;
        let node = *node;

        match node.node().children().get(*next_child) {
            Some(&child) => {
                *next_child += 1;
                let child = node.with(child);
                self.stack.push((child, 0));
                Some(WalkEvent::Enter(child))
            }
            None => {
                self.stack.pop();
                Some(WalkEvent::Leave(node))
            }
        }
    }
}

#[derive(Debug)]
pub enum WalkEvent<'t, K, V> {
    Enter(NodeRef<'t, K, V>),
    Leave(NodeRef<'t, K, V>),
}

impl<'t, K, V> WalkEvent<'t, K, V> {
    pub fn node(&self) -> NodeRef<'t, K, V> {
        match *self {
            Self::Enter(node) | Self::Leave(node) => node,
        }
    }
}
