//! The graph: element factory, schema and bulk accessors over a store.

pub mod builder;

use log::debug;

use crate::config::GraphLimits;
use crate::diagnostics::WarningThrottle;
use crate::element::attributes::{Attribute, DataSpecification};
use crate::element::identifier::{
    EdgeIdentifier, ElementIndex, PlaceIdentifier, RelationIdentifier, VertexIdentifier,
    WayIdentifier,
};
use crate::element::{Edge, EdgeRelation, Place, Vertex};
use crate::geometry::Rectangle;
use crate::graph_error::GraphError;
use crate::route::Route;
use crate::set::EdgeSet;
use crate::store::GraphStore;

pub use builder::GraphBuilder;

/// A road network: a store of attribute columns plus the schema it follows.
///
/// All element handles borrow the graph, so a graph outlives every edge,
/// vertex, relation, place, set and route produced from it.
pub struct Graph {
    name: String,
    specification: DataSpecification,
    limits: GraphLimits,
    store: Box<dyn GraphStore>,
    route_cap_warnings: WarningThrottle,
}

static_assertions::assert_impl_all!(Graph: Send, Sync);
static_assertions::assert_impl_all!(Edge<'static>: Send, Sync);
static_assertions::assert_impl_all!(Route<'static>: Send, Sync);

impl Graph {
    pub fn new(
        name: impl Into<String>,
        specification: DataSpecification,
        limits: GraphLimits,
        store: impl GraphStore + 'static,
    ) -> Self {
        let route_cap_warnings = WarningThrottle::every(limits.route_warning_interval);
        Self {
            name: name.into(),
            specification,
            limits,
            store: Box::new(store),
            route_cap_warnings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specification(&self) -> DataSpecification {
        self.specification
    }

    pub fn limits(&self) -> &GraphLimits {
        &self.limits
    }

    /// Whether elements of this graph carry `attribute`.
    pub fn supports(&self, attribute: Attribute) -> bool {
        self.specification.supports(attribute)
    }

    /// `Ok` when `attribute` is supported, [`GraphError::Unsupported`] otherwise.
    pub fn require(&self, attribute: Attribute) -> Result<(), GraphError> {
        if self.supports(attribute) {
            Ok(())
        } else {
            Err(GraphError::Unsupported {
                attribute,
                specification: self.specification,
            })
        }
    }

    #[inline]
    pub(crate) fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }

    pub(crate) fn route_cap_warnings(&self) -> &WarningThrottle {
        &self.route_cap_warnings
    }

    // ---------------------------------------------------------------------
    // Factory
    // ---------------------------------------------------------------------

    /// The edge with `identifier`, which may name the reverse of a two-way edge.
    pub fn edge_for_identifier(&self, identifier: EdgeIdentifier) -> Option<Edge<'_>> {
        let index = self.store.edge_index(identifier.forward())?;
        if !identifier.is_forward() && self.store.edge_is_one_way(index) {
            return None;
        }
        Some(Edge::resolved(self, identifier, index))
    }

    /// The forward edge stored at `index`.
    pub fn edge_for_index(&self, index: ElementIndex) -> Option<Edge<'_>> {
        (index.position() < self.store.edge_count()).then(|| Edge::from_index(self, index))
    }

    pub fn vertex_for_identifier(&self, identifier: VertexIdentifier) -> Option<Vertex<'_>> {
        self.store
            .contains_vertex(identifier)
            .then(|| Vertex::new(self, identifier))
    }

    pub fn relation_for_identifier(
        &self,
        identifier: RelationIdentifier,
    ) -> Option<EdgeRelation<'_>> {
        let index = self.store.relation_index(identifier)?;
        Some(EdgeRelation::resolved(self, identifier, index))
    }

    pub fn relation_for_index(&self, index: ElementIndex) -> Option<EdgeRelation<'_>> {
        (index.position() < self.store.relation_count())
            .then(|| EdgeRelation::from_index(self, index))
    }

    pub fn place_for_identifier(&self, identifier: PlaceIdentifier) -> Option<Place<'_>> {
        let index = self.store.place_index(identifier)?;
        Some(Place::resolved(self, identifier, index))
    }

    pub fn place_for_index(&self, index: ElementIndex) -> Option<Place<'_>> {
        (index.position() < self.store.place_count()).then(|| Place::from_index(self, index))
    }

    /// Handle for an identifier the store itself handed out.
    pub(crate) fn edge_unchecked(&self, identifier: EdgeIdentifier) -> Edge<'_> {
        #[cfg(feature = "check-invariants")]
        assert!(
            self.store.contains_edge(identifier.forward()),
            "[invariants] edge {identifier} is not in graph {:?}",
            self.name
        );
        Edge::new(self, identifier)
    }

    pub(crate) fn vertex_unchecked(&self, identifier: VertexIdentifier) -> Vertex<'_> {
        #[cfg(feature = "check-invariants")]
        assert!(
            self.store.contains_vertex(identifier),
            "[invariants] vertex {identifier} is not in graph {:?}",
            self.name
        );
        Vertex::new(self, identifier)
    }

    pub(crate) fn relation_unchecked(&self, identifier: RelationIdentifier) -> EdgeRelation<'_> {
        #[cfg(feature = "check-invariants")]
        assert!(
            self.store.contains_relation(identifier),
            "[invariants] relation {identifier} is not in graph {:?}",
            self.name
        );
        EdgeRelation::new(self, identifier)
    }

    // ---------------------------------------------------------------------
    // Bulk accessors
    // ---------------------------------------------------------------------

    /// Every forward edge, in store order.
    pub fn forward_edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        (0..self.store.edge_count())
            .filter_map(|position| ElementIndex::from_position(position).ok())
            .map(move |index| Edge::from_index(self, index))
    }

    /// Every edge: each forward edge followed by its reverse when two-way.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.forward_edges()
            .flat_map(|edge| {
                let reverse = edge.reversed();
                std::iter::once(edge).chain(reverse)
            })
    }

    /// Forward edges in parallel.
    #[cfg(feature = "rayon")]
    pub fn par_forward_edges(&self) -> impl rayon::iter::ParallelIterator<Item = Edge<'_>> + '_ {
        use rayon::prelude::*;
        (0..self.store.edge_count())
            .into_par_iter()
            .filter_map(|position| ElementIndex::from_position(position).ok())
            .map(move |index| Edge::from_index(self, index))
    }

    /// Edges (both directions) whose bounds intersect `rectangle`.
    ///
    /// The set is sized from the store's answer, so no intersecting edge is
    /// dropped by `maximum_edge_set_size`.
    pub fn edges_intersecting(&self, rectangle: &Rectangle) -> EdgeSet<'_> {
        let identifiers = self.store.edges_intersecting(rectangle);
        let mut set = EdgeSet::new(identifiers.len().saturating_mul(2));
        for identifier in identifiers {
            let edge = self.edge_unchecked(identifier);
            let reverse = edge.reversed();
            set.add(edge);
            if let Some(reverse) = reverse {
                set.add(reverse);
            }
        }
        set
    }

    /// Edges (both directions) satisfying `predicate`.
    pub fn edges_matching<'g, F>(&'g self, predicate: F) -> impl Iterator<Item = Edge<'g>> + 'g
    where
        F: Fn(&Edge<'g>) -> bool + 'g,
    {
        self.edges().filter(move |edge| predicate(edge))
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex<'_>> + '_ {
        self.store
            .vertex_identifiers()
            .map(move |identifier| Vertex::new(self, identifier))
    }

    /// Every relation, in store order.
    pub fn relations(&self) -> impl Iterator<Item = EdgeRelation<'_>> + '_ {
        (0..self.store.relation_count())
            .filter_map(|position| ElementIndex::from_position(position).ok())
            .map(move |index| EdgeRelation::from_index(self, index))
    }

    pub fn places(&self) -> impl Iterator<Item = Place<'_>> + '_ {
        (0..self.store.place_count())
            .filter_map(|position| ElementIndex::from_position(position).ok())
            .map(move |index| Place::from_index(self, index))
    }

    /// Sections 1, 2, ... of `way`, stopping at the first missing section.
    pub fn way_edges(&self, way: WayIdentifier) -> Vec<Edge<'_>> {
        let mut sections = Vec::new();
        for section in 1.. {
            let Ok(identifier) = EdgeIdentifier::from_way_section(way, section) else {
                break;
            };
            match self.edge_for_identifier(identifier) {
                Some(edge) => sections.push(edge),
                None => break,
            }
        }
        sections
    }

    /// Reassembles the sections of `way` into one forward route.
    ///
    /// When the sections do not connect the first section is returned on its
    /// own. `None` when the way has no first section in this graph.
    pub fn route_for_way(&self, way: WayIdentifier) -> Option<Route<'_>> {
        let sections = self.way_edges(way);
        let first = sections.first()?.clone();
        match Route::from_edges(sections) {
            Ok(route) => Some(route),
            Err(error) => {
                debug!("way {way} does not form a route ({error}); using its first section");
                Some(Route::from_edge(first))
            }
        }
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("name", &self.name)
            .field("specification", &self.specification)
            .field("edges", &self.store.edge_count())
            .field("vertices", &self.store.vertex_count())
            .finish()
    }
}
