//! Materialised edge sets and the queries shared by every edge set or view.

use std::fmt;

use once_cell::sync::OnceCell;

use crate::debug_invariants::DebugInvariants;
use crate::element::Edge;
use crate::geometry::{Angle, Chirality, Distance, Rectangle};
use crate::graph_error::GraphError;
use crate::set::{CappedSet, ElementSet};

/// A capped, insertion-ordered set of edges with a cached bounding box.
#[derive(Clone)]
pub struct EdgeSet<'g> {
    members: CappedSet<Edge<'g>>,
    bounds: OnceCell<Option<Rectangle>>,
}

impl<'g> EdgeSet<'g> {
    pub fn new(maximum_size: usize) -> Self {
        Self {
            members: CappedSet::new(maximum_size),
            bounds: OnceCell::new(),
        }
    }

    /// Inserts `edge`; `false` when present already or the set is full.
    pub fn add(&mut self, edge: Edge<'g>) -> bool {
        let added = self.members.add(edge);
        if added {
            self.bounds.take();
        }
        added
    }

    pub fn add_all<I: IntoIterator<Item = Edge<'g>>>(&mut self, edges: I) -> usize {
        edges.into_iter().filter(|edge| self.add(edge.clone())).count()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn maximum_size(&self) -> usize {
        self.members.maximum_size()
    }

    /// Union of member bounds, computed once until the next insertion.
    pub fn bounds(&self) -> Option<Rectangle> {
        *self.bounds.get_or_init(|| self.compute_bounds())
    }

    pub fn members(&self) -> std::slice::Iter<'_, Edge<'g>> {
        self.members.members()
    }
}

impl<'g> ElementSet for EdgeSet<'g> {
    type Item = Edge<'g>;

    fn iter(&self) -> Box<dyn Iterator<Item = Edge<'g>> + '_> {
        self.members.iter()
    }

    fn contains(&self, edge: &Edge<'g>) -> bool {
        self.members.contains(edge)
    }

    fn count(&self) -> usize {
        self.members.len()
    }

    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'g> Extend<Edge<'g>> for EdgeSet<'g> {
    fn extend<I: IntoIterator<Item = Edge<'g>>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl fmt::Debug for EdgeSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.members, f)
    }
}

impl DebugInvariants for EdgeSet<'_> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "EdgeSet invalid");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        self.members.validate_invariants()?;
        if let Some(cached) = self.bounds.get() {
            if *cached != self.compute_bounds() {
                return Err(GraphError::InvariantViolation(
                    "cached edge set bounds are stale".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Queries over any set or view of edges.
pub trait EdgeSetExt<'g>: ElementSet<Item = Edge<'g>> {
    /// The member ranking highest in the importance order.
    fn most_important(&self) -> Option<Edge<'g>> {
        let mut best: Option<(crate::algs::Importance, Edge<'g>)> = None;
        for edge in self.iter() {
            let importance = edge.importance();
            if best.as_ref().is_none_or(|(kept, _)| importance > *kept) {
                best = Some((importance, edge));
            }
        }
        best.map(|(_, edge)| edge)
    }

    /// The member whose heading deviates least from `edge`'s, if that
    /// deviation is within `tolerance`. `edge` itself is skipped; on ties
    /// the first member wins.
    fn parallel_to(&self, edge: &Edge<'_>, tolerance: Angle) -> Option<Edge<'g>> {
        let heading = edge.heading();
        let mut best: Option<(f64, Edge<'g>)> = None;
        for candidate in self.iter() {
            if candidate.identifier() == edge.identifier() {
                continue;
            }
            let deviation = heading
                .difference(candidate.heading(), Chirality::Smallest)
                .abs();
            if !deviation.is_within(tolerance) {
                continue;
            }
            let deviation = deviation.as_degrees();
            if best.as_ref().is_none_or(|(kept, _)| deviation < *kept) {
                best = Some((deviation, candidate));
            }
        }
        best.map(|(_, edge)| edge)
    }

    fn compute_bounds(&self) -> Option<Rectangle> {
        self.iter()
            .map(|edge| edge.bounds())
            .reduce(|a, b| a.union(&b))
    }

    fn total_length(&self) -> Distance {
        self.iter().map(|edge| edge.length()).sum()
    }

    /// Copies the members into a new capped set.
    fn materialize(&self, maximum_size: usize) -> EdgeSet<'g> {
        let mut set = EdgeSet::new(maximum_size);
        set.add_all(self.iter());
        set
    }
}

impl<'g, S> EdgeSetExt<'g> for S where S: ElementSet<Item = Edge<'g>> + ?Sized {}
