use std::collections::VecDeque;
use std::fmt;

use tracing::trace;

use crate::{Item, Lexer};

/// A lexing state: scans some input and returns the state to continue with, or `None` once
/// the input is exhausted.
pub struct StateFn<K, V>(LexRoutine<K, V>);

type LexRoutine<K, V> = fn(&mut StateLexer<'_, K, V>) -> Option<StateFn<K, V>>;

impl<K, V> StateFn<K, V> {
    pub const fn new(f: LexRoutine<K, V>) -> Self {
        Self(f)
    }

    fn call(self, lexer: &mut StateLexer<'_, K, V>) -> Option<Self> {
        (self.0)(lexer)
    }
}

impl<K, V> Clone for StateFn<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for StateFn<K, V> {}

impl<K, V> fmt::Debug for StateFn<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateFn").field(&(self.0 as *const ())).finish()
    }
}

/// Tokenizer over a slice of elements, driven by [`StateFn`]s.
///
/// The pending lexeme is `input[start..pos]`. States move `pos` with [`next`](Self::next)
/// and friends, then either [`emit`](Self::emit) the lexeme as an item or
/// [`ignore`](Self::ignore) it. When the states run out the lexer yields end items, with
/// `K::default()` as the end kind, at `input.len()`.
pub struct StateLexer<'a, K, V> {
    input: &'a [V],
    start: usize,
    pos: usize,
    state: Option<StateFn<K, V>>,
    items: VecDeque<Item<K, V>>,
}

impl<'a, K, V> StateLexer<'a, K, V> {
    pub fn new(init: StateFn<K, V>, input: &'a [V]) -> Self {
        Self { input, start: 0, pos: 0, state: Some(init), items: VecDeque::with_capacity(2) }
    }

    pub fn input(&self) -> &'a [V] {
        self.input
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Length of the pending lexeme.
    pub fn width(&self) -> usize {
        self.pos - self.start
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The pending lexeme.
    pub fn extract(&self) -> &'a [V] {
        &self.input[self.start..self.pos]
    }

    pub fn peek(&self) -> Option<&'a V> {
        self.input.get(self.pos)
    }

    pub fn next(&mut self) -> Option<&'a V> {
        let element = self.input.get(self.pos)?;
        self.pos += 1;
        Some(element)
    }

    /// Steps back over the last consumed element. Never moves before the pending lexeme.
    pub fn backup(&mut self) {
        if self.pos > self.start {
            self.pos -= 1;
        }
    }

    /// Drops the pending lexeme without emitting it.
    pub fn ignore(&mut self) {
        self.start = self.pos;
    }

    pub fn check(&self, f: impl Fn(&V) -> bool) -> bool {
        self.peek().is_some_and(f)
    }

    pub fn accept(&mut self, f: impl Fn(&V) -> bool) -> bool {
        if self.check(f) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn accept_run(&mut self, f: impl Fn(&V) -> bool + Copy) -> usize {
        let start = self.pos;
        while self.accept(f) {}
        self.pos - start
    }
}

impl<K: fmt::Debug, V: Clone> StateLexer<'_, K, V> {
    pub fn emit(&mut self, kind: K) {
        trace!(start = self.start, pos = self.pos, ?kind, "emit");
        let value = self.extract().to_vec();
        self.items.push_back(Item { pos: self.start as isize, kind, value });
        self.start = self.pos;
    }
}

impl<K: Default, V> StateLexer<'_, K, V> {
    fn end(&self) -> Item<K, V> {
        Item { pos: self.input.len() as isize, kind: K::default(), value: Vec::new() }
    }
}

impl<K: Default, V> Lexer<K, V> for StateLexer<'_, K, V> {
    fn next_item(&mut self) -> Item<K, V> {
        loop {
            if let Some(item) = self.items.pop_front() {
                return item;
            }

            match self.state.take() {
                Some(state) => self.state = state.call(self),
                None => return self.end(),
            }
        }
    }
}

impl<K, V> fmt::Debug for StateLexer<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateLexer")
            .field("start", &self.start)
            .field("pos", &self.pos)
            .field("len", &self.input.len())
            .field("queued", &self.items.len())
            .finish()
    }
}
