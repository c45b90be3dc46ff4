//! Assembles a [`Graph`] backed by an [`InMemoryStore`] from heavyweight elements.

use log::debug;

use crate::config::GraphLimits;
use crate::element::attributes::DataSpecification;
use crate::element::heavy::{
    HeavyweightEdge, HeavyweightPlace, HeavyweightRelation, HeavyweightVertex,
};
use crate::graph::Graph;
use crate::graph_error::GraphError;
use crate::store::{EdgeStore, InMemoryStore, PlaceStore, RelationStore, VertexStore};

/// Collects heavyweight elements into an in-memory graph.
///
/// Insertion fails fast on invalid or duplicate identifiers; [`build`](Self::build)
/// checks that every edge endpoint was added.
///
/// ```rust
/// use road_graph::prelude::*;
///
/// let a = Location::degrees(47.0, 8.0);
/// let b = a.moved(Heading::EAST, Distance::meters(100.0));
/// let mut builder = GraphBuilder::new("demo", DataSpecification::Osm);
/// builder.add_vertex(HeavyweightVertex::new(VertexIdentifier::new(1), a)).unwrap();
/// builder.add_vertex(HeavyweightVertex::new(VertexIdentifier::new(2), b)).unwrap();
/// builder
///     .add_edge(HeavyweightEdge::new(
///         EdgeIdentifier::new(1_000_001),
///         VertexIdentifier::new(1),
///         VertexIdentifier::new(2),
///         Polyline::segment(a, b),
///     ))
///     .unwrap();
/// let graph = builder.build().unwrap();
/// assert_eq!(graph.edges().count(), 2);
/// ```
#[derive(Debug)]
pub struct GraphBuilder {
    name: String,
    specification: DataSpecification,
    limits: GraphLimits,
    store: InMemoryStore,
}

impl GraphBuilder {
    pub fn new(name: impl Into<String>, specification: DataSpecification) -> Self {
        Self {
            name: name.into(),
            specification,
            limits: GraphLimits::default(),
            store: InMemoryStore::new(),
        }
    }

    pub fn with_limits(mut self, limits: GraphLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn add_edge(&mut self, edge: HeavyweightEdge) -> Result<&mut Self, GraphError> {
        self.store.insert_edge(edge)?;
        Ok(self)
    }

    pub fn add_vertex(&mut self, vertex: HeavyweightVertex) -> Result<&mut Self, GraphError> {
        self.store.insert_vertex(vertex)?;
        Ok(self)
    }

    pub fn add_relation(&mut self, relation: HeavyweightRelation) -> Result<&mut Self, GraphError> {
        self.store.insert_relation(relation)?;
        Ok(self)
    }

    pub fn add_place(&mut self, place: HeavyweightPlace) -> Result<&mut Self, GraphError> {
        self.store.insert_place(place)?;
        Ok(self)
    }

    pub fn build(mut self) -> Result<Graph, GraphError> {
        self.store.finish()?;
        debug!(
            "built graph {:?}: {} edges, {} vertices, {} relations, {} places",
            self.name,
            self.store.edge_count(),
            self.store.vertex_count(),
            self.store.relation_count(),
            self.store.place_count(),
        );
        Ok(Graph::new(self.name, self.specification, self.limits, self.store))
    }
}
