//! Attribute store boundary.
//!
//! A store holds the attribute columns of one graph and resolves between
//! identifiers and dense 1-based indices. Element handles only ever talk to
//! these traits, so a compressed or memory-mapped store can replace
//! [`InMemoryStore`] without touching the object model.
//!
//! Contract:
//! - Edges are stored in their forward direction only. Reverse edges share
//!   the index of their forward edge.
//! - Vertex indices equal vertex identifiers.
//! - An index always resolves to the same identifier for the lifetime of the
//!   store.
//! - Attribute lookups by an index the store did not hand out may panic.
//! - Reads are safe to perform concurrently.

pub mod memory;

use crate::element::attributes::{
    FormOfWay, FunctionalClass, PlaceType, RelationMember, RoadName, RoadSubType, RoadType, Tags,
};
use crate::element::identifier::{
    EdgeIdentifier, ElementIndex, PlaceIdentifier, RelationIdentifier, VertexIdentifier,
};
use crate::geometry::{Distance, Location, Polyline, Rectangle, Speed};

pub use memory::InMemoryStore;

/// Edge attribute columns, keyed by the index of the forward edge.
pub trait EdgeStore {
    /// Number of forward edges.
    fn edge_count(&self) -> usize;
    /// Whether the forward edge `identifier` exists.
    fn contains_edge(&self, identifier: EdgeIdentifier) -> bool;
    fn edge_index(&self, identifier: EdgeIdentifier) -> Option<ElementIndex>;
    fn edge_identifier(&self, index: ElementIndex) -> EdgeIdentifier;
    fn edge_from(&self, index: ElementIndex) -> VertexIdentifier;
    fn edge_to(&self, index: ElementIndex) -> VertexIdentifier;
    /// Shape in the forward direction.
    fn edge_shape(&self, index: ElementIndex) -> Polyline;
    fn edge_length(&self, index: ElementIndex) -> Distance;
    fn edge_names(&self, index: ElementIndex) -> Vec<RoadName>;
    fn edge_road_type(&self, index: ElementIndex) -> RoadType;
    fn edge_sub_type(&self, index: ElementIndex) -> RoadSubType;
    fn edge_functional_class(&self, index: ElementIndex) -> FunctionalClass;
    fn edge_speed_limit(&self, index: ElementIndex) -> Option<Speed>;
    fn edge_is_one_way(&self, index: ElementIndex) -> bool;
    fn edge_lane_count(&self, index: ElementIndex) -> Option<u8>;
    fn edge_form_of_way(&self, index: ElementIndex) -> Option<FormOfWay>;
    fn edge_tags(&self, index: ElementIndex) -> Tags;
    /// Relations listing this edge (or its way) as a member.
    fn edge_relations(&self, index: ElementIndex) -> Vec<RelationIdentifier>;
    /// Forward edges whose bounds intersect `rectangle`.
    fn edges_intersecting(&self, rectangle: &Rectangle) -> Vec<EdgeIdentifier>;
}

pub trait VertexStore {
    fn vertex_count(&self) -> usize;
    fn contains_vertex(&self, identifier: VertexIdentifier) -> bool;
    fn vertex_identifiers(&self) -> Box<dyn Iterator<Item = VertexIdentifier> + '_>;
    fn vertex_location(&self, index: ElementIndex) -> Location;
    /// Forward edges starting or ending at the vertex.
    fn vertex_edges(&self, index: ElementIndex) -> Vec<EdgeIdentifier>;
    fn vertex_tags(&self, index: ElementIndex) -> Tags;
}

pub trait RelationStore {
    fn relation_count(&self) -> usize;
    fn contains_relation(&self, identifier: RelationIdentifier) -> bool;
    fn relation_index(&self, identifier: RelationIdentifier) -> Option<ElementIndex>;
    fn relation_identifier(&self, index: ElementIndex) -> RelationIdentifier;
    /// Type as recorded by the source data, if any.
    fn relation_type(&self, index: ElementIndex) -> Option<String>;
    fn relation_members(&self, index: ElementIndex) -> Vec<RelationMember>;
    fn relation_tags(&self, index: ElementIndex) -> Tags;
}

pub trait PlaceStore {
    fn place_count(&self) -> usize;
    fn contains_place(&self, identifier: PlaceIdentifier) -> bool;
    fn place_index(&self, identifier: PlaceIdentifier) -> Option<ElementIndex>;
    fn place_identifier(&self, index: ElementIndex) -> PlaceIdentifier;
    fn place_location(&self, index: ElementIndex) -> Location;
    fn place_name(&self, index: ElementIndex) -> Option<String>;
    fn place_population(&self, index: ElementIndex) -> Option<u64>;
    fn place_type(&self, index: ElementIndex) -> PlaceType;
}

/// Everything a [`Graph`](crate::graph::Graph) needs from its store.
pub trait GraphStore: EdgeStore + VertexStore + RelationStore + PlaceStore + Send + Sync {}

impl<T> GraphStore for T where
    T: EdgeStore + VertexStore + RelationStore + PlaceStore + Send + Sync
{
}
