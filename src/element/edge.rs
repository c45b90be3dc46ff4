//! Directed edge handles.

use std::time::Duration;

use crate::element::attributes::{
    Attribute, FormOfWay, FunctionalClass, RoadName, RoadSubType, RoadType, Tags,
};
use crate::element::heavy::HeavyweightEdge;
use crate::element::identifier::{EdgeIdentifier, ElementIndex, VertexIdentifier, WayIdentifier};
use crate::element::vertex::Vertex;
use crate::element::{ElementKind, Flyweight, GraphElement, element_identity};
use crate::geometry::{Distance, Heading, Location, Polyline, Rectangle, Speed};
use crate::graph::Graph;
use crate::graph_error::GraphError;
use crate::set::{EdgeSet, RelationSet, SetAlgebra, Without};

/// A directed edge of a graph.
///
/// A two-way road is stored once, as its forward edge; the reverse edge
/// shares the forward edge's store index and negates its identifier. Every
/// direction-dependent accessor (`from`, `to`, `road_shape`, headings) is
/// swapped for reverse edges.
#[derive(Clone)]
pub struct Edge<'g> {
    graph: &'g Graph,
    flyweight: Flyweight<EdgeIdentifier>,
}

element_identity!(Edge);

impl<'g> Edge<'g> {
    pub(crate) fn new(graph: &'g Graph, identifier: EdgeIdentifier) -> Self {
        Self {
            graph,
            flyweight: Flyweight::from_identifier(identifier),
        }
    }

    pub(crate) fn from_index(graph: &'g Graph, index: ElementIndex) -> Self {
        Self {
            graph,
            flyweight: Flyweight::from_index(index),
        }
    }

    pub(crate) fn resolved(
        graph: &'g Graph,
        identifier: EdgeIdentifier,
        index: ElementIndex,
    ) -> Self {
        Self {
            graph,
            flyweight: Flyweight::resolved(identifier, index),
        }
    }

    #[inline]
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    #[inline]
    pub fn identifier(&self) -> EdgeIdentifier {
        self.flyweight
            .identifier(|index| self.graph.store().edge_identifier(index))
    }

    /// Store index of the forward edge; resolved once.
    #[inline]
    pub fn index(&self) -> ElementIndex {
        self.flyweight.index(|identifier| {
            self.graph
                .store()
                .edge_index(identifier.forward())
                .unwrap_or_else(|| {
                    panic!("edge {identifier} is not in graph {:?}", self.graph.name())
                })
        })
    }

    pub fn is_forward(&self) -> bool {
        self.identifier().is_forward()
    }

    pub fn way(&self) -> WayIdentifier {
        self.identifier().way()
    }

    pub fn section(&self) -> u32 {
        self.identifier().section()
    }

    /// The forward direction of this edge (itself when already forward).
    pub fn forward(&self) -> Edge<'g> {
        if self.is_forward() {
            self.clone()
        } else {
            Edge::resolved(self.graph, self.identifier().forward(), self.index())
        }
    }

    /// The opposite direction; `None` for one-way edges.
    pub fn reversed(&self) -> Option<Edge<'g>> {
        if self.is_one_way() {
            return None;
        }
        Some(Edge::resolved(
            self.graph,
            self.identifier().reversed(),
            self.index(),
        ))
    }

    pub fn to_heavyweight(&self) -> HeavyweightEdge {
        let store = self.graph.store();
        let index = self.index();
        HeavyweightEdge {
            identifier: self.identifier(),
            from: self.from_vertex_identifier(),
            to: self.to_vertex_identifier(),
            shape: self.road_shape(),
            length: Some(store.edge_length(index)),
            names: store.edge_names(index),
            road_type: store.edge_road_type(index),
            sub_type: store.edge_sub_type(index),
            functional_class: store.edge_functional_class(index),
            speed_limit: store.edge_speed_limit(index),
            one_way: store.edge_is_one_way(index),
            lane_count: store.edge_lane_count(index),
            form_of_way: store.edge_form_of_way(index),
            tags: store.edge_tags(index),
        }
    }

    // ---------------------------------------------------------------------
    // Endpoints and geometry
    // ---------------------------------------------------------------------

    pub fn from_vertex_identifier(&self) -> VertexIdentifier {
        let index = self.index();
        if self.is_forward() {
            self.graph.store().edge_from(index)
        } else {
            self.graph.store().edge_to(index)
        }
    }

    pub fn to_vertex_identifier(&self) -> VertexIdentifier {
        let index = self.index();
        if self.is_forward() {
            self.graph.store().edge_to(index)
        } else {
            self.graph.store().edge_from(index)
        }
    }

    pub fn from(&self) -> Vertex<'g> {
        self.graph.vertex_unchecked(self.from_vertex_identifier())
    }

    pub fn to(&self) -> Vertex<'g> {
        self.graph.vertex_unchecked(self.to_vertex_identifier())
    }

    /// Shape in travel direction. Falls back to the straight line between
    /// the endpoints when the store has no shape.
    pub fn road_shape(&self) -> Polyline {
        let shape = self.graph.store().edge_shape(self.index());
        let shape = if shape.len() < 2 {
            let from = self.graph.store().edge_from(self.index());
            let to = self.graph.store().edge_to(self.index());
            Polyline::segment(self.vertex_location(from), self.vertex_location(to))
        } else {
            shape
        };
        if self.is_forward() { shape } else { shape.reversed() }
    }

    fn vertex_location(&self, vertex: VertexIdentifier) -> Location {
        self.graph.vertex_unchecked(vertex).location()
    }

    pub fn length(&self) -> Distance {
        self.graph.store().edge_length(self.index())
    }

    pub fn bounds(&self) -> Rectangle {
        let shape = self.road_shape();
        match shape.bounds() {
            Some(bounds) => bounds,
            None => Rectangle::from_locations(self.from().location(), self.to().location()),
        }
    }

    pub fn initial_heading(&self) -> Heading {
        self.road_shape().initial_heading()
    }

    pub fn final_heading(&self) -> Heading {
        self.road_shape().final_heading()
    }

    /// Heading from the start of the edge to its end.
    pub fn heading(&self) -> Heading {
        self.road_shape().heading()
    }

    // ---------------------------------------------------------------------
    // Road attributes
    // ---------------------------------------------------------------------

    pub fn road_names(&self) -> Vec<RoadName> {
        self.graph.store().edge_names(self.index())
    }

    /// The first road name.
    pub fn road_name(&self) -> Option<RoadName> {
        self.road_names().into_iter().next()
    }

    /// Whether the two edges share a normalised road name.
    pub fn shares_road_name_with(&self, other: &Edge<'_>) -> bool {
        let ours: Vec<String> = self.road_names().iter().map(RoadName::base_name).collect();
        other
            .road_names()
            .iter()
            .any(|name| ours.contains(&name.base_name()))
    }

    pub fn road_type(&self) -> RoadType {
        self.graph.store().edge_road_type(self.index())
    }

    pub fn road_sub_type(&self) -> RoadSubType {
        self.graph.store().edge_sub_type(self.index())
    }

    pub fn functional_class(&self) -> FunctionalClass {
        self.graph.store().edge_functional_class(self.index())
    }

    pub fn speed_limit(&self) -> Option<Speed> {
        self.graph.store().edge_speed_limit(self.index())
    }

    /// Speed limit, or the road type's default speed.
    pub fn speed(&self) -> Speed {
        self.speed_limit()
            .filter(|speed| speed.is_positive())
            .unwrap_or_else(|| self.road_type().default_speed())
    }

    pub fn travel_time(&self) -> Duration {
        self.speed().travel_time(self.length())
    }

    pub fn is_one_way(&self) -> bool {
        self.graph.store().edge_is_one_way(self.index())
    }

    pub fn is_two_way(&self) -> bool {
        !self.is_one_way()
    }

    pub fn is_roundabout(&self) -> bool {
        self.road_sub_type() == RoadSubType::Roundabout
            || self.tag_value("junction").as_deref() == Some("roundabout")
    }

    pub fn lane_count(&self) -> Result<Option<u8>, GraphError> {
        self.graph.require(Attribute::LaneCount)?;
        Ok(self.graph.store().edge_lane_count(self.index()))
    }

    /// The OSM `highway` tag value.
    pub fn highway_tag(&self) -> Result<Option<String>, GraphError> {
        self.graph.require(Attribute::HighwayTag)?;
        Ok(self.tag_value("highway"))
    }

    /// The UniDB form of way.
    pub fn form_of_way(&self) -> Result<Option<FormOfWay>, GraphError> {
        self.graph.require(Attribute::FormOfWay)?;
        Ok(self.graph.store().edge_form_of_way(self.index()))
    }

    pub fn tags(&self) -> Tags {
        self.graph.store().edge_tags(self.index())
    }

    pub fn tag_value(&self, key: &str) -> Option<String> {
        self.tags().value(key).map(str::to_string)
    }

    /// Relations this edge is a member of.
    pub fn relations(&self) -> RelationSet<'g> {
        let mut set = RelationSet::new(self.graph.limits().maximum_relation_set_size);
        for identifier in self.graph.store().edge_relations(self.index()) {
            set.add(self.graph.relation_unchecked(identifier));
        }
        set
    }

    // ---------------------------------------------------------------------
    // Connectivity
    // ---------------------------------------------------------------------

    /// `self.to() == other.from()`.
    pub fn leads_to(&self, other: &Edge<'_>) -> bool {
        self.to_vertex_identifier() == other.from_vertex_identifier()
    }

    /// Whether the edges share any endpoint.
    pub fn is_connected_to(&self, other: &Edge<'_>) -> bool {
        self.vertex_connecting(other).is_some()
    }

    pub fn is_connected_to_vertex(&self, vertex: &Vertex<'_>) -> bool {
        let identifier = vertex.identifier();
        self.from_vertex_identifier() == identifier || self.to_vertex_identifier() == identifier
    }

    /// A vertex shared by both edges, preferring `self.to()`.
    pub fn vertex_connecting(&self, other: &Edge<'_>) -> Option<Vertex<'g>> {
        let theirs = [other.from_vertex_identifier(), other.to_vertex_identifier()];
        [self.to_vertex_identifier(), self.from_vertex_identifier()]
            .into_iter()
            .find(|vertex| theirs.contains(vertex))
            .map(|vertex| self.graph.vertex_unchecked(vertex))
    }

    /// Whether `other` is this edge in either direction.
    pub fn is_forward_or_reverse_of(&self, other: &Edge<'_>) -> bool {
        self.identifier().forward() == other.identifier().forward()
    }

    pub fn is_reverse_of(&self, other: &Edge<'_>) -> bool {
        self.identifier() == other.identifier().reversed()
    }

    /// Edges ending where this edge starts.
    pub fn in_edges(&self) -> EdgeSet<'g> {
        self.from().in_edges()
    }

    /// Edges starting where this edge ends.
    pub fn out_edges(&self) -> EdgeSet<'g> {
        self.to().out_edges()
    }

    /// In-edges other than this edge's own reverse.
    pub fn in_edges_without_reverse(&self) -> Without<EdgeSet<'g>, Option<Edge<'g>>> {
        self.in_edges().without(self.reversed())
    }

    /// Out-edges other than this edge's own reverse.
    pub fn out_edges_without_reverse(&self) -> Without<EdgeSet<'g>, Option<Edge<'g>>> {
        self.out_edges().without(self.reversed())
    }
}

impl<'g> GraphElement<'g> for Edge<'g> {
    type Identifier = EdgeIdentifier;

    const KIND: ElementKind = ElementKind::Edge;

    fn graph(&self) -> &'g Graph {
        self.graph
    }

    fn identifier(&self) -> EdgeIdentifier {
        Edge::identifier(self)
    }

    fn index(&self) -> ElementIndex {
        Edge::index(self)
    }

    fn identifier_as_long(&self) -> i64 {
        Edge::identifier(self).get()
    }
}
