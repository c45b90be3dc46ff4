//! Routes: immutable, connectivity-checked chains of directed edges.
//!
//! A route is a persistent binary tree. Leaves hold one edge; join nodes
//! hold a head and a tail sub-route that meet end to start. Appending two
//! routes allocates one join node and shares both operands, so
//! concatenation is O(1) and never copies edges. Join nodes memoise their
//! last edge, length and travel time; nodes are immutable, so each cache is
//! written once with a fully computed value.
//!
//! Traversal and drop use explicit work stacks rather than recursion, so a
//! route built by appending tens of thousands of single edges (a tree as
//! deep as it is long) is as safe to walk and free as a balanced one.
//!
//! A route also carries start and end offsets: how much of the first and
//! last edge is trimmed away. Offsets only affect length and travel time.

pub mod discovery;
pub mod iter;
pub mod limiter;
pub mod navigator;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use itertools::Itertools;
use log::warn;
use once_cell::sync::OnceCell;

use crate::debug_invariants::DebugInvariants;
use crate::element::{Edge, Vertex, VertexIdentifier};
use crate::geometry::{Distance, Location, Polyline, Rectangle};
use crate::graph::Graph;
use crate::graph_error::GraphError;
use crate::set::ElementSet;

pub use iter::RouteEdges;
pub use limiter::{
    AllLimiters, EdgeCountLimiter, LengthLimiter, LengthPolicy, PredicateLimiter, RouteLimiter,
};
pub use navigator::{
    Direction, Navigator, NonBranchingNavigator, SameWayNavigator, StraightestNavigator,
};

pub(crate) enum RouteNode<'g> {
    Leaf(Edge<'g>),
    Join(Join<'g>),
}

pub(crate) struct Join<'g> {
    pub(crate) head: Arc<RouteNode<'g>>,
    pub(crate) tail: Arc<RouteNode<'g>>,
    size: usize,
    first: Edge<'g>,
    last: OnceCell<Edge<'g>>,
    length: OnceCell<Distance>,
    travel_time: OnceCell<Duration>,
}

impl<'g> Join<'g> {
    fn new(head: Arc<RouteNode<'g>>, tail: Arc<RouteNode<'g>>) -> Self {
        Self {
            size: head.size() + tail.size(),
            first: head.first().clone(),
            head,
            tail,
            last: OnceCell::new(),
            length: OnceCell::new(),
            travel_time: OnceCell::new(),
        }
    }
}

impl<'g> RouteNode<'g> {
    #[inline]
    pub(crate) fn size(&self) -> usize {
        match self {
            RouteNode::Leaf(_) => 1,
            RouteNode::Join(join) => join.size,
        }
    }

    #[inline]
    fn first(&self) -> &Edge<'g> {
        match self {
            RouteNode::Leaf(edge) => edge,
            RouteNode::Join(join) => &join.first,
        }
    }

    /// Follows tail links down to the last leaf, stopping early at any
    /// join that already knows its last edge.
    fn last(&self) -> Edge<'g> {
        match self {
            RouteNode::Leaf(edge) => edge.clone(),
            RouteNode::Join(join) => join
                .last
                .get_or_init(|| {
                    let mut node: &RouteNode<'g> = &join.tail;
                    loop {
                        match node {
                            RouteNode::Leaf(edge) => break edge.clone(),
                            RouteNode::Join(inner) => match inner.last.get() {
                                Some(edge) => break edge.clone(),
                                None => node = &inner.tail,
                            },
                        }
                    }
                })
                .clone(),
        }
    }

    fn length(&self) -> Distance {
        match self {
            RouteNode::Leaf(edge) => edge.length(),
            RouteNode::Join(join) => *join
                .length
                .get_or_init(|| self.aggregate(|join| join.length.get().copied(), Edge::length)),
        }
    }

    fn travel_time(&self) -> Duration {
        match self {
            RouteNode::Leaf(edge) => edge.travel_time(),
            RouteNode::Join(join) => *join.travel_time.get_or_init(|| {
                self.aggregate(|join| join.travel_time.get().copied(), Edge::travel_time)
            }),
        }
    }

    /// Sums `leaf` over the tree, taking a join's cached total instead of
    /// descending into it whenever one is set.
    fn aggregate<T, C, L>(&self, cached: C, leaf: L) -> T
    where
        T: std::iter::Sum<T>,
        C: Fn(&Join<'g>) -> Option<T>,
        L: Fn(&Edge<'g>) -> T,
    {
        let mut parts = Vec::new();
        let mut pending: Vec<&RouteNode<'g>> = match self {
            RouteNode::Leaf(_) => vec![self],
            RouteNode::Join(join) => vec![&*join.tail, &*join.head],
        };
        while let Some(node) = pending.pop() {
            match node {
                RouteNode::Leaf(edge) => parts.push(leaf(edge)),
                RouteNode::Join(join) => match cached(join) {
                    Some(total) => parts.push(total),
                    None => {
                        pending.push(&*join.tail);
                        pending.push(&*join.head);
                    }
                },
            }
        }
        parts.into_iter().sum()
    }
}

/// A connected chain of directed edges.
///
/// For every pair of consecutive edges `a`, `b`: `a.to() == b.from()`.
#[derive(Clone)]
pub struct Route<'g> {
    root: Arc<RouteNode<'g>>,
    start_offset: Distance,
    end_offset: Distance,
}

impl<'g> Route<'g> {
    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    pub fn from_edge(edge: Edge<'g>) -> Self {
        Self {
            root: Arc::new(RouteNode::Leaf(edge)),
            start_offset: Distance::ZERO,
            end_offset: Distance::ZERO,
        }
    }

    /// Route over `edges` in the given order and direction.
    ///
    /// Fails with [`GraphError::EmptyRoute`] for no edges and with
    /// [`GraphError::DisconnectedRoute`] at the first pair that does not
    /// meet end to start. Edges are never reversed to make them fit.
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = Edge<'g>>,
    {
        let edges: Vec<Edge<'g>> = edges.into_iter().collect();
        if let Some(pair) = edges.windows(2).find(|pair| !pair[0].leads_to(&pair[1])) {
            return Err(GraphError::DisconnectedRoute {
                end: pair[0].to_vertex_identifier(),
                start: pair[1].from_vertex_identifier(),
            });
        }
        Self::assemble(edges).ok_or(GraphError::EmptyRoute)
    }

    /// Balanced tree over edges already known to connect.
    fn assemble<I>(edges: I) -> Option<Self>
    where
        I: IntoIterator<Item = Edge<'g>>,
    {
        let mut level: Vec<Arc<RouteNode<'g>>> = edges
            .into_iter()
            .map(|edge| Arc::new(RouteNode::Leaf(edge)))
            .collect();
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut nodes = level.into_iter();
            while let Some(head) = nodes.next() {
                match nodes.next() {
                    Some(tail) => next.push(Arc::new(RouteNode::Join(Join::new(head, tail)))),
                    None => next.push(head),
                }
            }
            level = next;
        }
        level.pop().map(|root| Self {
            root,
            start_offset: Distance::ZERO,
            end_offset: Distance::ZERO,
        })
    }

    fn joined(head: &Route<'g>, tail: &Route<'g>) -> Self {
        Self {
            root: Arc::new(RouteNode::Join(Join::new(
                head.root.clone(),
                tail.root.clone(),
            ))),
            start_offset: head.start_offset,
            end_offset: tail.end_offset,
        }
    }

    /// `self` followed by `other`, reversing `other` when only its reverse
    /// connects.
    ///
    /// When the result would have more than `maximum` edges, `self` is
    /// returned unchanged and a rate-limited warning is logged. Offsets
    /// between the two routes are dropped.
    pub fn append(&self, maximum: usize, other: &Route<'g>) -> Result<Route<'g>, GraphError> {
        let last = self.last();
        let other = if last.leads_to(other.first_edge()) {
            other.clone()
        } else {
            match other.reversed() {
                Some(reversed) if last.leads_to(reversed.first_edge()) => reversed,
                _ => {
                    return Err(GraphError::DisconnectedRoute {
                        end: last.to_vertex_identifier(),
                        start: other.first_edge().from_vertex_identifier(),
                    });
                }
            }
        };
        let size = self.size() + other.size();
        if size > maximum {
            if self.graph().route_cap_warnings().should_log() {
                warn!(
                    "route of {} edges not extended by {} edges: {size} exceeds the maximum of {maximum}",
                    self.size(),
                    other.size()
                );
            }
            return Ok(self.clone());
        }
        Ok(Route::joined(self, &other))
    }

    /// [`append`](Self::append) with the graph's maximum route size.
    pub fn append_default(&self, other: &Route<'g>) -> Result<Route<'g>, GraphError> {
        self.append(self.graph().limits().maximum_route_size, other)
    }

    /// `other` followed by `self`.
    pub fn prepend(&self, maximum: usize, other: &Route<'g>) -> Result<Route<'g>, GraphError> {
        other.append(maximum, self)
    }

    /// Joins the two routes in whichever orientation connects: as given,
    /// `other` reversed, `self` reversed, or both.
    pub fn connect(&self, other: &Route<'g>) -> Option<Route<'g>> {
        let maximum = self.graph().limits().maximum_route_size;
        if let Ok(route) = self.append(maximum, other) {
            return Some(route);
        }
        self.reversed()?.append(maximum, other).ok()
    }

    /// This route trimmed by `start` on its first edge and `end` on its
    /// last. Each offset is clamped to its edge's length.
    pub fn with_offsets(&self, start: Distance, end: Distance) -> Route<'g> {
        Route {
            root: self.root.clone(),
            start_offset: start.min(self.first_edge().length()),
            end_offset: end.min(self.last().length()),
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn graph(&self) -> &'g Graph {
        self.first_edge().graph()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.root.size()
    }

    #[inline]
    fn first_edge(&self) -> &Edge<'g> {
        self.root.first()
    }

    pub fn first(&self) -> Edge<'g> {
        self.first_edge().clone()
    }

    pub fn last(&self) -> Edge<'g> {
        self.root.last()
    }

    /// The edge at zero-based `position`, by descending the tree.
    pub fn get(&self, position: usize) -> Option<Edge<'g>> {
        if position >= self.size() {
            return None;
        }
        let mut remaining = position;
        let mut node: &RouteNode<'g> = &self.root;
        loop {
            match node {
                RouteNode::Leaf(edge) => return Some(edge.clone()),
                RouteNode::Join(join) => {
                    let head_size = join.head.size();
                    if remaining < head_size {
                        node = &join.head;
                    } else {
                        remaining -= head_size;
                        node = &join.tail;
                    }
                }
            }
        }
    }

    pub fn iter(&self) -> RouteEdges<'_, 'g> {
        RouteEdges::new(&self.root)
    }

    pub fn edges(&self) -> Vec<Edge<'g>> {
        self.iter().cloned().collect()
    }

    pub fn start_offset(&self) -> Distance {
        self.start_offset
    }

    pub fn end_offset(&self) -> Distance {
        self.end_offset
    }

    /// The first vertex. If the second edge touches the first edge's `from`
    /// vertex but not its `to` vertex, the first edge is taken to be
    /// traversed backwards and its `to` vertex is the start.
    pub fn start(&self) -> Vertex<'g> {
        let first = self.first_edge();
        if let Some(second) = self.get(1) {
            let (from, to) = (first.from_vertex_identifier(), first.to_vertex_identifier());
            if touches(&second, from) && !touches(&second, to) {
                return first.to();
            }
        }
        first.from()
    }

    /// The last vertex, with the same boundary rule as [`start`](Self::start).
    pub fn end(&self) -> Vertex<'g> {
        let last = self.last();
        if self.size() > 1 {
            if let Some(previous) = self.get(self.size() - 2) {
                let (from, to) = (last.from_vertex_identifier(), last.to_vertex_identifier());
                if touches(&previous, to) && !touches(&previous, from) {
                    return last.from();
                }
            }
        }
        last.to()
    }

    /// Sum of edge lengths less both offsets.
    pub fn length(&self) -> Distance {
        self.root.length() - self.start_offset - self.end_offset
    }

    /// Sum of edge travel times less the time spent on the trimmed parts.
    pub fn travel_time(&self) -> Duration {
        let trimmed = self.first_edge().speed().travel_time(self.start_offset)
            + self.last().speed().travel_time(self.end_offset);
        self.root.travel_time().saturating_sub(trimmed)
    }

    /// The route driven backwards; `None` if any edge is one-way.
    pub fn reversed(&self) -> Option<Route<'g>> {
        let mut reversed = Vec::with_capacity(self.size());
        for edge in self.iter() {
            reversed.push(edge.reversed()?);
        }
        reversed.reverse();
        let mut route = Route::assemble(reversed)?;
        route.start_offset = self.end_offset;
        route.end_offset = self.start_offset;
        Some(route)
    }

    pub fn contains(&self, edge: &Edge<'_>) -> bool {
        let identifier = edge.identifier();
        self.iter().any(|member| member.identifier() == identifier)
    }

    /// Start vertex followed by the `to` vertex of every edge.
    pub fn vertices(&self) -> Vec<Vertex<'g>> {
        std::iter::once(self.start())
            .chain(self.iter().map(Edge::to))
            .collect()
    }

    /// Concatenated edge shapes, without repeating shared vertices.
    pub fn polyline(&self) -> Polyline {
        let mut locations: Vec<Location> = Vec::new();
        for edge in self.iter() {
            let shape = edge.road_shape();
            let mut points = shape.locations().iter().copied().peekable();
            if locations.last() == points.peek() {
                points.next();
            }
            locations.extend(points);
        }
        Polyline::new(locations)
    }

    pub fn bounds(&self) -> Rectangle {
        let first = self.first_edge().bounds();
        self.iter()
            .skip(1)
            .fold(first, |bounds, edge| bounds.union(&edge.bounds()))
    }

    /// Whether the route ends where it starts.
    pub fn is_loop(&self) -> bool {
        self.start() == self.end()
    }

    pub fn starts_with(&self, other: &Route<'_>) -> bool {
        other.size() <= self.size() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }

    pub fn ends_with(&self, other: &Route<'_>) -> bool {
        other.size() <= self.size()
            && self
                .iter()
                .skip(self.size() - other.size())
                .zip(other.iter())
                .all(|(a, b)| a == b)
    }

    /// Whether `other` starts where this route ends.
    pub fn leads_to(&self, other: &Route<'_>) -> bool {
        self.end().identifier() == other.start().identifier()
    }

    /// `None` for a single-edge route.
    pub fn without_first_edge(&self) -> Option<Route<'g>> {
        let mut route = Route::assemble(self.iter().skip(1).cloned())?;
        route.end_offset = self.end_offset;
        Some(route)
    }

    /// `None` for a single-edge route.
    pub fn without_last_edge(&self) -> Option<Route<'g>> {
        let mut route = Route::assemble(self.iter().take(self.size() - 1).cloned())?;
        route.start_offset = self.start_offset;
        Some(route)
    }

    /// Leading part of the route up to and including the first edge
    /// arriving at `vertex`.
    pub fn prefix_to(&self, vertex: VertexIdentifier) -> Option<Route<'g>> {
        let end = self.iter().position(|edge| edge.to_vertex_identifier() == vertex)?;
        let mut route = Route::assemble(self.iter().take(end + 1).cloned())?;
        route.start_offset = self.start_offset;
        if end + 1 == self.size() {
            route.end_offset = self.end_offset;
        }
        Some(route)
    }

    /// Trailing part of the route from the first edge leaving `vertex`.
    pub fn suffix_from(&self, vertex: VertexIdentifier) -> Option<Route<'g>> {
        let start = self.iter().position(|edge| edge.from_vertex_identifier() == vertex)?;
        let mut route = Route::assemble(self.iter().skip(start).cloned())?;
        route.end_offset = self.end_offset;
        if start == 0 {
            route.start_offset = self.start_offset;
        }
        Some(route)
    }
}

fn touches(edge: &Edge<'_>, vertex: VertexIdentifier) -> bool {
    edge.from_vertex_identifier() == vertex || edge.to_vertex_identifier() == vertex
}

/// Frees join nodes with an explicit stack. Only the nodes this route
/// holds the last reference to are dismantled; shared sub-trees are left
/// to their other owners.
impl Drop for Route<'_> {
    fn drop(&mut self) {
        if let RouteNode::Leaf(_) = *self.root {
            return;
        }
        let placeholder = Arc::new(RouteNode::Leaf(self.first_edge().clone()));
        let mut pending = vec![std::mem::replace(&mut self.root, placeholder)];
        while let Some(node) = pending.pop() {
            if let Some(RouteNode::Join(join)) = Arc::into_inner(node) {
                pending.push(join.head);
                pending.push(join.tail);
            }
        }
    }
}

impl<'r, 'g> IntoIterator for &'r Route<'g> {
    type Item = &'r Edge<'g>;
    type IntoIter = RouteEdges<'r, 'g>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'g> ElementSet for Route<'g> {
    type Item = Edge<'g>;

    fn iter(&self) -> Box<dyn Iterator<Item = Edge<'g>> + '_> {
        Box::new(Route::iter(self).cloned())
    }

    fn contains(&self, edge: &Edge<'g>) -> bool {
        Route::contains(self, edge)
    }

    fn count(&self) -> usize {
        self.size()
    }

    fn is_empty(&self) -> bool {
        false
    }
}

/// Same edges in the same order, with the same offsets.
impl PartialEq for Route<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && self.start_offset == other.start_offset
            && self.end_offset == other.end_offset
            && self.iter().eq(other.iter())
    }
}

impl Eq for Route<'_> {}

impl fmt::Display for Route<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter().join(", "))
    }
}

impl fmt::Debug for Route<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("edges", &format_args!("{self}"))
            .field("start_offset", &self.start_offset)
            .field("end_offset", &self.end_offset)
            .finish()
    }
}

impl DebugInvariants for Route<'_> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Route invalid");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        if let Some((a, b)) = self.iter().tuple_windows().find(|(a, b)| !a.leads_to(b)) {
            return Err(GraphError::DisconnectedRoute {
                end: a.to_vertex_identifier(),
                start: b.from_vertex_identifier(),
            });
        }
        let counted = self.iter().count();
        if counted != self.size() {
            return Err(GraphError::InvariantViolation(format!(
                "route reports {} edges but holds {counted}",
                self.size()
            )));
        }
        if self.iter().last() != Some(&self.last()) {
            return Err(GraphError::InvariantViolation(
                "cached last edge differs from the last edge".to_string(),
            ));
        }
        if self.start_offset > self.first_edge().length()
            || self.end_offset > self.last().length()
        {
            return Err(GraphError::InvariantViolation(format!(
                "offsets {} / {} exceed their boundary edges",
                self.start_offset, self.end_offset
            )));
        }
        Ok(())
    }
}
