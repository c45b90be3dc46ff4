//! Materialised, insertion-ordered sets with a maximum size.

use std::fmt;
use std::hash::Hash;

use hashbrown::HashSet;
use log::warn;

use crate::debug_invariants::DebugInvariants;
use crate::diagnostics::WarningThrottle;
use crate::graph_error::GraphError;
use crate::set::ElementSet;

/// A hash-indexed set that keeps insertion order and refuses members past
/// `maximum_size`.
///
/// A refused insertion is not an error: `add` returns `false` and the first
/// refusal on a set logs a warning. Mutation needs `&mut self`, so a set has
/// one writer at a time and any number of readers.
#[derive(Clone)]
pub struct CappedSet<T> {
    order: Vec<T>,
    members: HashSet<T>,
    maximum_size: usize,
    overflow: WarningThrottle,
}

impl<T: Clone + Eq + Hash> CappedSet<T> {
    pub fn new(maximum_size: usize) -> Self {
        Self {
            order: Vec::new(),
            members: HashSet::new(),
            maximum_size,
            overflow: WarningThrottle::once(),
        }
    }

    pub fn maximum_size(&self) -> usize {
        self.maximum_size
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_full(&self) -> bool {
        self.order.len() >= self.maximum_size
    }

    /// Inserts `item`. Returns `false` when it was already present or the
    /// set is full.
    pub fn add(&mut self, item: T) -> bool {
        if self.members.contains(&item) {
            return false;
        }
        if self.is_full() {
            if self.overflow.should_log() {
                warn!(
                    "set reached its maximum size of {}; further members are dropped",
                    self.maximum_size
                );
            }
            return false;
        }
        self.members.insert(item.clone());
        self.order.push(item);
        true
    }

    /// Adds every item; returns how many were inserted.
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, items: I) -> usize {
        items.into_iter().filter(|item| self.add(item.clone())).count()
    }

    /// Number of refused insertions of new members so far.
    pub fn overflow_count(&self) -> u64 {
        self.overflow.occurrences()
    }

    pub fn members(&self) -> std::slice::Iter<'_, T> {
        self.order.iter()
    }
}

impl<T: Clone + Eq + Hash> ElementSet for CappedSet<T> {
    type Item = T;

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.order.iter().cloned())
    }

    fn contains(&self, item: &T) -> bool {
        self.members.contains(item)
    }

    fn count(&self) -> usize {
        self.order.len()
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<T: Clone + Eq + Hash> Extend<T> for CappedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: fmt::Debug> fmt::Debug for CappedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.order.iter()).finish()
    }
}

impl<T: Clone + Eq + Hash> DebugInvariants for CappedSet<T> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "CappedSet invalid");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        if self.order.len() != self.members.len() {
            return Err(GraphError::InvariantViolation(format!(
                "{} ordered members but {} hashed members",
                self.order.len(),
                self.members.len()
            )));
        }
        if self.order.len() > self.maximum_size {
            return Err(GraphError::InvariantViolation(format!(
                "{} members exceed the maximum size {}",
                self.order.len(),
                self.maximum_size
            )));
        }
        if let Some(position) = self.order.iter().position(|item| !self.members.contains(item)) {
            return Err(GraphError::InvariantViolation(format!(
                "ordered member {position} is not hashed"
            )));
        }
        Ok(())
    }
}
