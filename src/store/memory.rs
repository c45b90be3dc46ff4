//! Columnar in-memory attribute store.
//!
//! One dense `Vec` per attribute, addressed by `index - 1`, with `hashbrown`
//! maps from identifier to index. Vertices are addressed by identifier
//! directly, so their columns are sized by the largest vertex identifier.
//!
//! Stores are filled through [`GraphBuilder`](crate::graph::GraphBuilder):
//! insertion validates identifiers and rejects duplicates, and
//! [`InMemoryStore::finish`] checks edge endpoints and derives the
//! edge-to-relation back references.

use hashbrown::HashMap;

use crate::debug_invariants::DebugInvariants;
use crate::element::ElementKind;
use crate::element::attributes::{
    FormOfWay, FunctionalClass, MemberReference, PlaceType, RelationMember, RoadName,
    RoadSubType, RoadType, Tags,
};
use crate::element::heavy::{
    HeavyweightEdge, HeavyweightPlace, HeavyweightRelation, HeavyweightVertex,
};
use crate::element::identifier::{
    EdgeIdentifier, ElementIndex, PlaceIdentifier, RelationIdentifier, VertexIdentifier,
    WayIdentifier,
};
use crate::geometry::{Distance, Location, Polyline, Rectangle, Speed};
use crate::graph_error::GraphError;
use crate::store::{EdgeStore, PlaceStore, RelationStore, VertexStore};

#[derive(Clone, Debug, Default)]
struct EdgeColumns {
    identifiers: Vec<EdgeIdentifier>,
    from: Vec<VertexIdentifier>,
    to: Vec<VertexIdentifier>,
    shapes: Vec<Polyline>,
    lengths: Vec<Distance>,
    bounds: Vec<Option<Rectangle>>,
    names: Vec<Vec<RoadName>>,
    road_types: Vec<RoadType>,
    sub_types: Vec<RoadSubType>,
    functional_classes: Vec<FunctionalClass>,
    speed_limits: Vec<Option<Speed>>,
    one_way: Vec<bool>,
    lane_counts: Vec<Option<u8>>,
    forms_of_way: Vec<Option<FormOfWay>>,
    tags: Vec<Tags>,
    relations: Vec<Vec<RelationIdentifier>>,
}

#[derive(Clone, Debug, Default)]
struct VertexColumns {
    locations: Vec<Option<Location>>,
    edges: Vec<Vec<EdgeIdentifier>>,
    tags: Vec<Tags>,
    count: usize,
}

impl VertexColumns {
    fn grow_to(&mut self, position: usize) {
        if self.locations.len() <= position {
            self.locations.resize(position + 1, None);
            self.edges.resize_with(position + 1, Vec::new);
            self.tags.resize_with(position + 1, Tags::new);
        }
    }
}

#[derive(Clone, Debug, Default)]
struct RelationColumns {
    identifiers: Vec<RelationIdentifier>,
    types: Vec<Option<String>>,
    members: Vec<Vec<RelationMember>>,
    tags: Vec<Tags>,
}

#[derive(Clone, Debug, Default)]
struct PlaceColumns {
    identifiers: Vec<PlaceIdentifier>,
    locations: Vec<Location>,
    names: Vec<Option<String>>,
    populations: Vec<Option<u64>>,
    types: Vec<PlaceType>,
}

/// Reference [`GraphStore`](crate::store::GraphStore) holding every column in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    edges: EdgeColumns,
    edge_lookup: HashMap<EdgeIdentifier, ElementIndex>,
    way_sections: HashMap<WayIdentifier, Vec<ElementIndex>>,
    vertices: VertexColumns,
    relations: RelationColumns,
    relation_lookup: HashMap<RelationIdentifier, ElementIndex>,
    places: PlaceColumns,
    place_lookup: HashMap<PlaceIdentifier, ElementIndex>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a forward edge. Endpoints are checked by [`finish`](Self::finish).
    pub fn insert_edge(&mut self, edge: HeavyweightEdge) -> Result<ElementIndex, GraphError> {
        let identifier = edge.identifier;
        if !identifier.is_forward() || identifier.section() == 0 {
            return Err(GraphError::InvalidIdentifier(identifier.get()));
        }
        if self.edge_lookup.contains_key(&identifier) {
            return Err(GraphError::DuplicateElement {
                kind: ElementKind::Edge,
                identifier: identifier.get(),
            });
        }
        let index = ElementIndex::from_position(self.edges.identifiers.len())?;
        for vertex in [edge.from, edge.to] {
            let position = vertex.as_index()?.position();
            self.vertices.grow_to(position);
            let incident = &mut self.vertices.edges[position];
            if !incident.contains(&identifier) {
                incident.push(identifier);
            }
        }

        let length = edge.effective_length();
        let columns = &mut self.edges;
        columns.identifiers.push(identifier);
        columns.from.push(edge.from);
        columns.to.push(edge.to);
        columns.bounds.push(edge.shape.bounds());
        columns.shapes.push(edge.shape);
        columns.lengths.push(length);
        columns.names.push(edge.names);
        columns.road_types.push(edge.road_type);
        columns.sub_types.push(edge.sub_type);
        columns.functional_classes.push(edge.functional_class);
        columns.speed_limits.push(edge.speed_limit);
        columns.one_way.push(edge.one_way);
        columns.lane_counts.push(edge.lane_count);
        columns.forms_of_way.push(edge.form_of_way);
        columns.tags.push(edge.tags);
        columns.relations.push(Vec::new());

        self.edge_lookup.insert(identifier, index);
        self.way_sections
            .entry(identifier.way())
            .or_default()
            .push(index);
        Ok(index)
    }

    pub fn insert_vertex(&mut self, vertex: HeavyweightVertex) -> Result<ElementIndex, GraphError> {
        let index = vertex.identifier.as_index()?;
        let position = index.position();
        self.vertices.grow_to(position);
        if self.vertices.locations[position].is_some() {
            return Err(GraphError::DuplicateElement {
                kind: ElementKind::Vertex,
                identifier: vertex.identifier.get(),
            });
        }
        self.vertices.locations[position] = Some(vertex.location);
        self.vertices.tags[position] = vertex.tags;
        self.vertices.count += 1;
        Ok(index)
    }

    pub fn insert_relation(
        &mut self,
        relation: HeavyweightRelation,
    ) -> Result<ElementIndex, GraphError> {
        if self.relation_lookup.contains_key(&relation.identifier) {
            return Err(GraphError::DuplicateElement {
                kind: ElementKind::Relation,
                identifier: relation.identifier.get(),
            });
        }
        let index = ElementIndex::from_position(self.relations.identifiers.len())?;
        self.relations.identifiers.push(relation.identifier);
        self.relations.types.push(relation.relation_type);
        self.relations.members.push(relation.members);
        self.relations.tags.push(relation.tags);
        self.relation_lookup.insert(relation.identifier, index);
        Ok(index)
    }

    pub fn insert_place(&mut self, place: HeavyweightPlace) -> Result<ElementIndex, GraphError> {
        if self.place_lookup.contains_key(&place.identifier) {
            return Err(GraphError::DuplicateElement {
                kind: ElementKind::Place,
                identifier: place.identifier.get(),
            });
        }
        let index = ElementIndex::from_position(self.places.identifiers.len())?;
        self.places.identifiers.push(place.identifier);
        self.places.locations.push(place.location);
        self.places.names.push(place.name);
        self.places.populations.push(place.population);
        self.places.types.push(place.place_type);
        self.place_lookup.insert(place.identifier, index);
        Ok(index)
    }

    /// Checks that every edge endpoint exists and records, for each edge,
    /// the relations naming it (directly or through its way).
    ///
    /// Relation members that are not in the store are kept as they are:
    /// resolving them is the caller's business and may legitimately fail.
    pub fn finish(&mut self) -> Result<(), GraphError> {
        for (&from, &to) in self.edges.from.iter().zip(&self.edges.to) {
            for vertex in [from, to] {
                if !self.contains_vertex(vertex) {
                    return Err(GraphError::MissingElement {
                        kind: ElementKind::Vertex,
                        identifier: vertex.get(),
                    });
                }
            }
        }

        for column in &mut self.edges.relations {
            column.clear();
        }
        for (relation, members) in self.relations.identifiers.iter().zip(&self.relations.members) {
            for member in members {
                let indices: &[ElementIndex] = match member.reference {
                    MemberReference::Edge(edge) => match self.edge_lookup.get(&edge.forward()) {
                        Some(index) => std::slice::from_ref(index),
                        None => &[],
                    },
                    MemberReference::Way(way) => self
                        .way_sections
                        .get(&way)
                        .map(Vec::as_slice)
                        .unwrap_or_default(),
                    MemberReference::Vertex(_) | MemberReference::Relation(_) => &[],
                };
                for index in indices {
                    let listed = &mut self.edges.relations[index.position()];
                    if !listed.contains(relation) {
                        listed.push(*relation);
                    }
                }
            }
        }
        self.debug_assert_invariants();
        Ok(())
    }
}

impl EdgeStore for InMemoryStore {
    fn edge_count(&self) -> usize {
        self.edges.identifiers.len()
    }

    fn contains_edge(&self, identifier: EdgeIdentifier) -> bool {
        self.edge_lookup.contains_key(&identifier)
    }

    fn edge_index(&self, identifier: EdgeIdentifier) -> Option<ElementIndex> {
        self.edge_lookup.get(&identifier).copied()
    }

    fn edge_identifier(&self, index: ElementIndex) -> EdgeIdentifier {
        self.edges.identifiers[index.position()]
    }

    fn edge_from(&self, index: ElementIndex) -> VertexIdentifier {
        self.edges.from[index.position()]
    }

    fn edge_to(&self, index: ElementIndex) -> VertexIdentifier {
        self.edges.to[index.position()]
    }

    fn edge_shape(&self, index: ElementIndex) -> Polyline {
        self.edges.shapes[index.position()].clone()
    }

    fn edge_length(&self, index: ElementIndex) -> Distance {
        self.edges.lengths[index.position()]
    }

    fn edge_names(&self, index: ElementIndex) -> Vec<RoadName> {
        self.edges.names[index.position()].clone()
    }

    fn edge_road_type(&self, index: ElementIndex) -> RoadType {
        self.edges.road_types[index.position()]
    }

    fn edge_sub_type(&self, index: ElementIndex) -> RoadSubType {
        self.edges.sub_types[index.position()]
    }

    fn edge_functional_class(&self, index: ElementIndex) -> FunctionalClass {
        self.edges.functional_classes[index.position()]
    }

    fn edge_speed_limit(&self, index: ElementIndex) -> Option<Speed> {
        self.edges.speed_limits[index.position()]
    }

    fn edge_is_one_way(&self, index: ElementIndex) -> bool {
        self.edges.one_way[index.position()]
    }

    fn edge_lane_count(&self, index: ElementIndex) -> Option<u8> {
        self.edges.lane_counts[index.position()]
    }

    fn edge_form_of_way(&self, index: ElementIndex) -> Option<FormOfWay> {
        self.edges.forms_of_way[index.position()]
    }

    fn edge_tags(&self, index: ElementIndex) -> Tags {
        self.edges.tags[index.position()].clone()
    }

    fn edge_relations(&self, index: ElementIndex) -> Vec<RelationIdentifier> {
        self.edges.relations[index.position()].clone()
    }

    fn edges_intersecting(&self, rectangle: &Rectangle) -> Vec<EdgeIdentifier> {
        self.edges
            .bounds
            .iter()
            .zip(&self.edges.identifiers)
            .filter(|(bounds, _)| bounds.is_some_and(|b| b.intersects(rectangle)))
            .map(|(_, identifier)| *identifier)
            .collect()
    }
}

impl VertexStore for InMemoryStore {
    fn vertex_count(&self) -> usize {
        self.vertices.count
    }

    fn contains_vertex(&self, identifier: VertexIdentifier) -> bool {
        identifier
            .as_index()
            .ok()
            .and_then(|index| self.vertices.locations.get(index.position()))
            .is_some_and(Option::is_some)
    }

    fn vertex_identifiers(&self) -> Box<dyn Iterator<Item = VertexIdentifier> + '_> {
        Box::new(
            self.vertices
                .locations
                .iter()
                .enumerate()
                .filter(|(_, location)| location.is_some())
                .map(|(position, _)| VertexIdentifier::new(position as i64 + 1)),
        )
    }

    fn vertex_location(&self, index: ElementIndex) -> Location {
        self.vertices.locations[index.position()]
            .unwrap_or_else(|| panic!("vertex {index} is not in the store"))
    }

    fn vertex_edges(&self, index: ElementIndex) -> Vec<EdgeIdentifier> {
        self.vertices.edges[index.position()].clone()
    }

    fn vertex_tags(&self, index: ElementIndex) -> Tags {
        self.vertices.tags[index.position()].clone()
    }
}

impl RelationStore for InMemoryStore {
    fn relation_count(&self) -> usize {
        self.relations.identifiers.len()
    }

    fn contains_relation(&self, identifier: RelationIdentifier) -> bool {
        self.relation_lookup.contains_key(&identifier)
    }

    fn relation_index(&self, identifier: RelationIdentifier) -> Option<ElementIndex> {
        self.relation_lookup.get(&identifier).copied()
    }

    fn relation_identifier(&self, index: ElementIndex) -> RelationIdentifier {
        self.relations.identifiers[index.position()]
    }

    fn relation_type(&self, index: ElementIndex) -> Option<String> {
        self.relations.types[index.position()].clone()
    }

    fn relation_members(&self, index: ElementIndex) -> Vec<RelationMember> {
        self.relations.members[index.position()].clone()
    }

    fn relation_tags(&self, index: ElementIndex) -> Tags {
        self.relations.tags[index.position()].clone()
    }
}

impl PlaceStore for InMemoryStore {
    fn place_count(&self) -> usize {
        self.places.identifiers.len()
    }

    fn contains_place(&self, identifier: PlaceIdentifier) -> bool {
        self.place_lookup.contains_key(&identifier)
    }

    fn place_index(&self, identifier: PlaceIdentifier) -> Option<ElementIndex> {
        self.place_lookup.get(&identifier).copied()
    }

    fn place_identifier(&self, index: ElementIndex) -> PlaceIdentifier {
        self.places.identifiers[index.position()]
    }

    fn place_location(&self, index: ElementIndex) -> Location {
        self.places.locations[index.position()]
    }

    fn place_name(&self, index: ElementIndex) -> Option<String> {
        self.places.names[index.position()].clone()
    }

    fn place_population(&self, index: ElementIndex) -> Option<u64> {
        self.places.populations[index.position()]
    }

    fn place_type(&self, index: ElementIndex) -> PlaceType {
        self.places.types[index.position()]
    }
}

impl DebugInvariants for InMemoryStore {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "InMemoryStore invalid");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        let edges = &self.edges;
        let count = edges.identifiers.len();

        // 1) every edge column has one entry per edge
        let lengths = [
            edges.from.len(),
            edges.to.len(),
            edges.shapes.len(),
            edges.lengths.len(),
            edges.bounds.len(),
            edges.names.len(),
            edges.road_types.len(),
            edges.sub_types.len(),
            edges.functional_classes.len(),
            edges.speed_limits.len(),
            edges.one_way.len(),
            edges.lane_counts.len(),
            edges.forms_of_way.len(),
            edges.tags.len(),
            edges.relations.len(),
        ];
        if let Some(len) = lengths.iter().find(|&&len| len != count) {
            return Err(GraphError::InvariantViolation(format!(
                "edge column has {len} entries for {count} edges"
            )));
        }

        // 2) identifier and index agree both ways
        if self.edge_lookup.len() != count {
            return Err(GraphError::InvariantViolation(format!(
                "{} edge identifiers indexed for {count} edges",
                self.edge_lookup.len()
            )));
        }
        for (position, identifier) in edges.identifiers.iter().enumerate() {
            if !identifier.is_forward() {
                return Err(GraphError::InvalidIdentifier(identifier.get()));
            }
            let index = self.edge_lookup.get(identifier).copied();
            if index.map(ElementIndex::position) != Some(position) {
                return Err(GraphError::InvariantViolation(format!(
                    "edge {identifier} stored at {position} but indexed as {index:?}"
                )));
            }
        }
        for (position, identifier) in self.relations.identifiers.iter().enumerate() {
            let index = self.relation_lookup.get(identifier).copied();
            if index.map(ElementIndex::position) != Some(position) {
                return Err(GraphError::InvariantViolation(format!(
                    "relation {identifier} stored at {position} but indexed as {index:?}"
                )));
            }
        }
        for (position, identifier) in self.places.identifiers.iter().enumerate() {
            let index = self.place_lookup.get(identifier).copied();
            if index.map(ElementIndex::position) != Some(position) {
                return Err(GraphError::InvariantViolation(format!(
                    "place {identifier} stored at {position} but indexed as {index:?}"
                )));
            }
        }

        // 3) vertex incidence lists only name edges touching the vertex
        for (position, incident) in self.vertices.edges.iter().enumerate() {
            let vertex = VertexIdentifier::new(position as i64 + 1);
            for edge in incident {
                let touches = self.edge_lookup.get(edge).is_some_and(|index| {
                    edges.from[index.position()] == vertex || edges.to[index.position()] == vertex
                });
                if !touches {
                    return Err(GraphError::InvariantViolation(format!(
                        "vertex {vertex} lists edge {edge} which does not touch it"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Heading;

    fn edge(id: i64, from: i64, to: i64) -> HeavyweightEdge {
        let a = Location::degrees(0.0, 0.0);
        HeavyweightEdge::new(
            EdgeIdentifier::new(id),
            VertexIdentifier::new(from),
            VertexIdentifier::new(to),
            Polyline::segment(a, a.moved(Heading::EAST, Distance::meters(10.0))),
        )
    }

    fn vertex(id: i64) -> HeavyweightVertex {
        HeavyweightVertex::new(VertexIdentifier::new(id), Location::degrees(0.0, id as f64 * 1e-4))
    }

    #[test]
    fn edge_columns_round_trip() {
        let mut store = InMemoryStore::new();
        store.insert_vertex(vertex(1)).unwrap();
        store.insert_vertex(vertex(2)).unwrap();
        let index = store.insert_edge(edge(5_000_001, 1, 2).with_name("Oak Ave")).unwrap();
        store.finish().unwrap();
        assert_eq!(index.get(), 1);
        assert_eq!(store.edge_index(EdgeIdentifier::new(5_000_001)), Some(index));
        assert_eq!(store.edge_identifier(index), EdgeIdentifier::new(5_000_001));
        assert_eq!(store.edge_from(index), VertexIdentifier::new(1));
        assert_eq!(store.edge_names(index), vec![RoadName::new("Oak Ave")]);
        assert_eq!(store.vertex_edges(VertexIdentifier::new(2).as_index().unwrap()).len(), 1);
        assert!(store.validate_invariants().is_ok());
    }

    #[test]
    fn duplicates_and_reverse_identifiers_rejected() {
        let mut store = InMemoryStore::new();
        store.insert_edge(edge(1_000_001, 1, 2)).unwrap();
        assert!(matches!(
            store.insert_edge(edge(1_000_001, 2, 3)),
            Err(GraphError::DuplicateElement { kind: ElementKind::Edge, .. })
        ));
        assert_eq!(
            store.insert_edge(edge(-2_000_001, 1, 2)),
            Err(GraphError::InvalidIdentifier(-2_000_001))
        );
        store.insert_vertex(vertex(1)).unwrap();
        assert!(store.insert_vertex(vertex(1)).is_err());
    }

    #[test]
    fn finish_requires_endpoints() {
        let mut store = InMemoryStore::new();
        store.insert_vertex(vertex(1)).unwrap();
        store.insert_edge(edge(1_000_001, 1, 2)).unwrap();
        assert_eq!(
            store.finish(),
            Err(GraphError::MissingElement {
                kind: ElementKind::Vertex,
                identifier: 2
            })
        );
    }

    #[test]
    fn finish_links_way_members_to_every_section() {
        let mut store = InMemoryStore::new();
        for v in 1..=3 {
            store.insert_vertex(vertex(v)).unwrap();
        }
        store.insert_edge(edge(7_000_001, 1, 2)).unwrap();
        store.insert_edge(edge(7_000_002, 2, 3)).unwrap();
        store
            .insert_relation(
                HeavyweightRelation::new(RelationIdentifier::new(40)).with_member(
                    RelationMember::new(MemberReference::Way(WayIdentifier::new(7)), "from"),
                ),
            )
            .unwrap();
        store.finish().unwrap();
        for id in [7_000_001, 7_000_002] {
            let index = store.edge_index(EdgeIdentifier::new(id)).unwrap();
            assert_eq!(store.edge_relations(index), vec![RelationIdentifier::new(40)]);
        }
    }

    #[test]
    fn intersecting_is_a_linear_scan_over_bounds() {
        let mut store = InMemoryStore::new();
        store.insert_vertex(vertex(1)).unwrap();
        store.insert_vertex(vertex(2)).unwrap();
        store.insert_edge(edge(1_000_001, 1, 2)).unwrap();
        let near = Rectangle::from_locations(
            Location::degrees(-0.001, -0.001),
            Location::degrees(0.001, 0.001),
        );
        let far =
            Rectangle::from_locations(Location::degrees(1.0, 1.0), Location::degrees(2.0, 2.0));
        assert_eq!(store.edges_intersecting(&near), vec![EdgeIdentifier::new(1_000_001)]);
        assert!(store.edges_intersecting(&far).is_empty());
    }
}
