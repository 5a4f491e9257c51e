use std::fmt;
use std::ops::Index;

use la_arena::Arena;
use smallvec::SmallVec;
use tracing::{debug, trace};
use weft_lex::{Item, Lexer};

use crate::node::TreeId;
use crate::slot::Slots;
use crate::{Node, NodeId, NodeRef, ParseFn, Slot, TreeError};

/// Size of the item buffer, counting the item just pulled from the lexer.
pub const LOOKAHEAD_CAPACITY: usize = 5;
/// Most items that can sit in the buffer unconsumed.
pub const MAX_LOOKAHEAD: usize = LOOKAHEAD_CAPACITY - 1;

/// Parse tree built in lock-step with a [`Lexer`].
///
/// Parsing routines pull items through [`next`](Tree::next) and [`peek`](Tree::peek),
/// and shape the tree through a cursor: [`node`](Tree::node) nests a new node under the
/// cursor and moves the cursor onto it, so a routine that finishes a subtree has to move
/// the cursor back up itself ([`up`](Tree::up), [`set`](Tree::set) or a saved [`Slot`]).
///
/// All nodes live in an arena owned by the tree; parent links are plain ids.
pub struct Tree<'a, K, V> {
    id: TreeId,
    nodes: Arena<Node<K, V>>,
    root: NodeId,
    cursor: NodeId,
    /// Pending items, next one last.
    lookahead: SmallVec<[Item<K, V>; MAX_LOOKAHEAD]>,
    slots: Slots,
    lexer: Box<dyn Lexer<K, V> + 'a>,
    parse_fn: Option<ParseFn<K, V>>,
}

impl<'a, K, V> Tree<'a, K, V> {
    /// Creates a tree whose root carries `end_kind` and `end_values` at [`Item::ROOT_POS`].
    pub fn new(
        lexer: impl Lexer<K, V> + 'a,
        init: ParseFn<K, V>,
        end_kind: K,
        end_values: impl Into<Vec<V>>,
    ) -> Self {
        let id = TreeId::fresh();
        let mut nodes = Arena::new();
        let root_item = Item::new(Item::<K, V>::ROOT_POS, end_kind, end_values);
        let root = NodeId::new(id, nodes.alloc(Node::new(root_item, None)));

        Self {
            id,
            nodes,
            root,
            cursor: root,
            lookahead: SmallVec::new(),
            slots: Slots::default(),
            lexer: Box::new(lexer),
            parse_fn: Some(init),
        }
    }

    /// Runs parsing routines until one of them returns `None`.
    pub fn parse(&mut self) {
        let mut steps = 0usize;

        while let Some(parse_fn) = self.parse_fn.take() {
            self.parse_fn = parse_fn.call(self);
            steps += 1;
        }

        debug!(steps, nodes = self.len(), "parse finished");
    }

    /// Like [`parse`](Self::parse), but gives up after `limit` routine calls.
    ///
    /// On [`TreeError::StepLimit`] the pending routine is kept, so calling either method
    /// again resumes where parsing stopped.
    pub fn parse_bounded(&mut self, limit: usize) -> Result<usize, TreeError> {
        let mut steps = 0usize;

        while steps < limit {
            let Some(parse_fn) = self.parse_fn.take() else {
                debug!(steps, nodes = self.len(), "parse finished");
                return Ok(steps);
            };
            self.parse_fn = parse_fn.call(self);
            steps += 1;
        }

        if self.parse_fn.is_none() {
            debug!(steps, nodes = self.len(), "parse finished");
            return Ok(steps);
        }

        debug!(limit, "parse step limit reached");
        Err(TreeError::StepLimit { limit })
    }

    pub fn is_parsed(&self) -> bool {
        self.parse_fn.is_none()
    }

    fn pull(&mut self) -> Item<K, V> {
        let item = self.lexer.next_item();
        trace!(pos = item.pos, "pull");
        item
    }

    /// Consumes the next item, taking it from the buffer when something was peeked or
    /// backed up.
    pub fn next(&mut self) -> Item<K, V> {
        match self.lookahead.pop() {
            Some(item) => item,
            None => self.pull(),
        }
    }

    /// Returns the next item without consuming it. Repeated calls return the same item.
    pub fn peek(&mut self) -> &Item<K, V> {
        if self.lookahead.is_empty() {
            let item = self.pull();
            self.lookahead.push(item);
        }

        &self.lookahead[self.lookahead.len() - 1]
    }

    /// Puts already consumed items back; the following [`next`](Self::next) calls return
    /// them in the order given, then whatever was still pending.
    ///
    /// At most [`MAX_LOOKAHEAD`] items are kept. Excess items are dropped from the tail of
    /// `items`, and pending items furthest ahead are dropped to make room.
    pub fn backup(&mut self, items: impl IntoIterator<Item = Item<K, V>>) {
        let mut items = items.into_iter();
        let mut injected: SmallVec<[Item<K, V>; MAX_LOOKAHEAD]> =
            items.by_ref().take(MAX_LOOKAHEAD).collect();
        let excess = items.count();

        let room = MAX_LOOKAHEAD - injected.len();
        let evicted = self.lookahead.len().saturating_sub(room);
        self.lookahead.drain(..evicted);

        if excess > 0 || evicted > 0 {
            debug!(excess, evicted, "lookahead buffer full, dropping items");
        }
        trace!(count = injected.len(), pending = self.lookahead.len(), "backup");

        while let Some(item) = injected.pop() {
            self.lookahead.push(item);
        }
    }

    /// Number of items buffered but not yet consumed.
    pub fn pending(&self) -> usize {
        self.lookahead.len()
    }

    /// Creates a node for `item` under the cursor and moves the cursor onto it.
    pub fn node(&mut self, item: Item<K, V>) -> NodeId {
        let parent = self.cursor;
        trace!(pos = item.pos, ?parent, "node");

        let id = NodeId::new(self.id, self.nodes.alloc(Node::new(item, Some(parent))));
        self.nodes[parent.idx()].push_child(id);
        self.cursor = id;
        id
    }

    /// Saves the cursor in `slot`, replacing what was there.
    pub fn store(&mut self, slot: Slot) {
        if let Some(previous) = self.slots.store(slot, self.cursor) {
            trace!(?slot, ?previous, "slot overwritten");
        }
    }

    /// Takes the node saved in `slot`, leaving the slot empty.
    pub fn load(&mut self, slot: Slot) -> Option<NodeId> {
        self.slots.take(slot)
    }

    /// Moves the cursor to the node saved in `slot` and empties the slot. Returns `false`,
    /// leaving the cursor alone, if the slot was empty.
    pub fn jump(&mut self, slot: Slot) -> bool {
        match self.slots.take(slot) {
            Some(node) => {
                trace!(?slot, ?node, "jump");
                self.cursor = node;
                true
            }
            None => false,
        }
    }

    /// Moves the cursor to `node` if it is reachable from the root of this tree.
    pub fn set(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.reaches_root(node)?;
        trace!(?node, "set");
        self.cursor = node;
        Ok(())
    }

    /// Moves the cursor to its parent. Returns `false` at the root.
    pub fn up(&mut self) -> bool {
        match self.parent() {
            Some(parent) => {
                self.cursor = parent;
                true
            }
            None => false,
        }
    }

    fn reaches_root(&self, node: NodeId) -> Result<(), TreeError> {
        let mut current = self.get(node).ok_or(TreeError::NotFound)?;
        let mut id = node;

        for _ in 0..self.nodes.len() {
            match current.parent() {
                Some(parent) => {
                    id = parent;
                    current = &self.nodes[parent.idx()];
                }
                None if id == self.root => return Ok(()),
                None => return Err(TreeError::NotFound),
            }
        }

        Err(TreeError::CyclicalEdge)
    }

    /// Top-level nodes, in the order they were created.
    pub fn list(&self) -> &[NodeId] {
        self.nodes[self.root.idx()].children()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn cur(&self) -> NodeId {
        self.cursor
    }

    /// Parent of the cursor, `None` at the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.nodes[self.cursor.idx()].parent()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        if id.tree() != self.id || id.index() >= self.nodes.len() {
            return None;
        }
        Some(&self.nodes[id.idx()])
    }

    pub fn node_ref(&self, id: NodeId) -> Result<NodeRef<'_, K, V>, TreeError> {
        self.get(id).ok_or(TreeError::InvalidId)?;
        Ok(NodeRef::new(&self.nodes, id))
    }

    pub fn root_ref(&self) -> NodeRef<'_, K, V> {
        NodeRef::new(&self.nodes, self.root)
    }

    pub fn cur_ref(&self) -> NodeRef<'_, K, V> {
        NodeRef::new(&self.nodes, self.cursor)
    }

    /// Kind the tree was created with; the lexer signals the end of input with it.
    pub fn end_kind(&self) -> &K {
        self.nodes[self.root.idx()].kind()
    }

    pub fn is_end(&self, item: &Item<K, V>) -> bool
    where
        K: PartialEq,
    {
        item.kind == *self.end_kind()
    }

    /// Number of nodes, root included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Renders the tree one node per line, indented by depth, as `kind@pos "value"`.
    pub fn debug_dump(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Display,
    {
        self.root_ref().debug_dump()
    }
}

impl<K, V> Index<NodeId> for Tree<'_, K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(node) => node,
            None => panic!("{id:?} does not belong to this tree"),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Tree<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("cursor", &self.cursor)
            .field("nodes", &self.nodes.len())
            .field("lookahead", &self.lookahead)
            .field("slots", &self.slots)
            .field("parsed", &self.parse_fn.is_none())
            .finish_non_exhaustive()
    }
}
