use crate::types::Label;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Handle to a node inside a flow, typed by the node's outcome
///
/// The action type lets [`Flow::add_edge`](crate::Flow::add_edge) check at
/// compile time that an edge is keyed by an outcome the source node can return.
pub struct NodeId<A> {
    pub(crate) flow: u64,
    pub(crate) index: usize,
    _action: PhantomData<fn() -> A>,
}

impl<A> NodeId<A> {
    pub(crate) fn new(flow: u64, index: usize) -> Self {
        Self {
            flow,
            index,
            _action: PhantomData,
        }
    }

    /// Position of the node in its flow, in insertion order.
    pub fn index(&self) -> usize {
        self.index
    }
}

// Manual impls so that `A` needs none of these traits
impl<A> Clone for NodeId<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for NodeId<A> {}

impl<A> PartialEq for NodeId<A> {
    fn eq(&self, other: &Self) -> bool {
        self.flow == other.flow && self.index == other.index
    }
}

impl<A> Eq for NodeId<A> {}

impl<A> Hash for NodeId<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.flow.hash(state);
        self.index.hash(state);
    }
}

impl<A> Debug for NodeId<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_tuple("NodeId").field(&self.index).finish()
    }
}

/// Outgoing transitions of one node, at most one per label
#[derive(Debug, Clone, Default)]
pub(crate) struct Successors {
    targets: BTreeMap<Label, usize>,
}

impl Successors {
    /// Register `label -> to`, returning the target it replaced.
    pub(crate) fn insert(&mut self, label: Label, to: usize) -> Option<usize> {
        self.targets.insert(label, to)
    }

    pub(crate) fn get(&self, label: &Label) -> Option<usize> {
        self.targets.get(label).copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Label, usize)> {
        self.targets.iter().map(|(label, to)| (label, *to))
    }
}

/// A registered transition, as reported by [`Flow::edges`](crate::Flow::edges)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<'a> {
    pub from: &'a str,
    pub label: &'a Label,
    pub to: &'a str,
}
