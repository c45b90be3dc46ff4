mod util;
use std::collections::HashSet;

use road_graph::prelude::*;
use util::*;

fn named_chain() -> Graph {
    chain_with(2, |edge| {
        edge.with_name("Main Street North")
            .with_road_type(RoadType::ThroughwayRoad)
            .with_functional_class(FunctionalClass::Third)
            .with_tag("highway", "secondary")
            .with_lane_count(2)
    })
}

#[test]
fn handles_from_identifier_and_index_are_equal() {
    let graph = chain(3);
    let by_identifier = graph.edge_for_identifier(eid(2_000_001)).unwrap();
    let by_index = graph.edge_for_index(by_identifier.index()).unwrap();
    assert_eq!(by_identifier, by_index);
    assert_eq!(by_index.identifier(), eid(2_000_001));

    let mut seen = HashSet::new();
    seen.insert(by_identifier.clone());
    assert!(seen.contains(&by_index));
    assert_eq!(format!("{by_index:?}"), "Edge(2000001)");
}

#[test]
fn reverse_edges_share_the_forward_index() {
    let graph = chain(1);
    let forward = chain_edge(&graph, 1);
    let reverse = forward.reversed().unwrap();
    assert_eq!(reverse.identifier(), eid(-1_000_001));
    assert_eq!(reverse.index(), forward.index());
    assert_ne!(reverse, forward);
    assert!(reverse.is_reverse_of(&forward));
    assert!(reverse.is_forward_or_reverse_of(&forward));
    assert_eq!(reverse.from(), forward.to());
    assert_eq!(reverse.to(), forward.from());
    assert_eq!(reverse.forward(), forward);
    assert_eq!(reverse.road_shape(), forward.road_shape().reversed());
    assert_eq!(graph.edge_for_identifier(eid(-1_000_001)), Some(reverse));
}

#[test]
fn one_way_edges_have_no_reverse() {
    let graph = chain_with(1, |edge| edge.one_way());
    let edge = chain_edge(&graph, 1);
    assert!(edge.is_one_way());
    assert!(edge.reversed().is_none());
    assert!(graph.edge_for_identifier(eid(-1_000_001)).is_none());
    assert_eq!(graph.edges().count(), 1);
}

#[test]
fn unknown_identifiers_yield_nothing() {
    let graph = chain(1);
    assert!(graph.edge_for_identifier(eid(9_000_001)).is_none());
    assert!(graph.vertex_for_identifier(vid(42)).is_none());
    assert!(graph.relation_for_identifier(RelationIdentifier::new(1)).is_none());
}

#[test]
fn attributes_read_through_to_the_store() {
    let graph = named_chain();
    let edge = chain_edge(&graph, 1);
    assert_eq!(edge.road_name().unwrap().as_str(), "Main Street North");
    assert_eq!(edge.road_type(), RoadType::ThroughwayRoad);
    assert_eq!(edge.functional_class(), FunctionalClass::Third);
    assert_eq!(edge.way(), WayIdentifier::new(1));
    assert_eq!(edge.section(), 1);
    assert!((edge.length().as_meters() - 10.0).abs() < 0.1);
    assert_eq!(edge.tag_value("highway").as_deref(), Some("secondary"));
    assert!(edge.shares_road_name_with(&chain_edge(&graph, 2)));
    assert_eq!(edge.to_heavyweight().names, edge.road_names());
}

#[test]
fn schema_checked_accessors() {
    let osm = named_chain();
    let edge = chain_edge(&osm, 1);
    assert_eq!(edge.highway_tag().unwrap().as_deref(), Some("secondary"));
    assert_eq!(
        edge.form_of_way().unwrap_err(),
        GraphError::Unsupported {
            attribute: Attribute::FormOfWay,
            specification: DataSpecification::Osm,
        }
    );

    let mut sketch = Sketch::with_specification(DataSpecification::UniDb);
    sketch
        .vertex(1, 0.0, 0.0)
        .vertex(2, 50.0, 0.0)
        .road_with(1_000_001, 1, 2, |edge| edge.with_form_of_way(FormOfWay::Roundabout));
    let unidb = sketch.build();
    let edge = unidb.edge_for_identifier(eid(1_000_001)).unwrap();
    assert_eq!(edge.form_of_way().unwrap(), Some(FormOfWay::Roundabout));
    assert!(edge.highway_tag().is_err());
}

#[test]
fn vertices_know_their_edges() {
    let graph = chain(2);
    let middle = graph.vertex_for_identifier(vid(2)).unwrap();
    assert_eq!(middle.in_edges().len(), 2);
    assert_eq!(middle.out_edges().len(), 2);
    assert_eq!(middle.edges().len(), 4);
    assert!(middle.is_through());
    assert!(graph.vertex_for_identifier(vid(1)).unwrap().is_dead_end());
    let edge = chain_edge(&graph, 1);
    assert!(edge.is_connected_to_vertex(&middle));
    assert_eq!(edge.vertex_connecting(&chain_edge(&graph, 2)), Some(middle));
    assert!(edge.leads_to(&chain_edge(&graph, 2)));
    assert!(!chain_edge(&graph, 2).leads_to(&edge));
}

#[test]
fn edges_without_reverse_exclude_the_u_turn() {
    let graph = chain(2);
    let edge = chain_edge(&graph, 1);
    let out = edge.out_edges_without_reverse().to_vec();
    assert_eq!(out, vec![chain_edge(&graph, 2)]);
    let into = chain_edge(&graph, 2).in_edges_without_reverse().to_vec();
    assert_eq!(into, vec![edge]);
}

#[test]
fn bulk_accessors() {
    let graph = chain(3);
    assert_eq!(graph.forward_edges().count(), 3);
    assert_eq!(graph.edges().count(), 6);
    assert_eq!(graph.vertices().count(), 4);
    let area = Rectangle::from_locations(at(-1.0, -1.0), at(5.0, 1.0));
    let near = graph.edges_intersecting(&area);
    assert!(near.contains(&chain_edge(&graph, 1)));
    assert!(!near.contains(&chain_edge(&graph, 3)));
    assert_eq!(
        graph
            .edges_matching(|edge| edge.is_forward() && edge.way() == WayIdentifier::new(2))
            .count(),
        1
    );
}

#[test]
fn intersecting_edges_are_not_cut_by_the_edge_set_cap() {
    let mut sketch = Sketch::new().with_limits(GraphLimits {
        maximum_edge_set_size: 1,
        ..GraphLimits::default()
    });
    sketch
        .vertex(1, 0.0, 0.0)
        .vertex(2, 10.0, 0.0)
        .vertex(3, 20.0, 0.0)
        .vertex(4, 30.0, 0.0)
        .road(1_000_001, 1, 2)
        .road(2_000_001, 2, 3)
        .road(3_000_001, 3, 4);
    let graph = sketch.build();
    let area = Rectangle::from_locations(at(-1.0, -1.0), at(31.0, 1.0));
    let near = graph.edges_intersecting(&area);
    assert_eq!(near.len(), 6);
    for edge in graph.edges() {
        assert!(near.contains(&edge));
    }
}

#[test]
fn ways_reassemble_from_sections() {
    let mut sketch = Sketch::new();
    sketch
        .vertex(1, 0.0, 0.0)
        .vertex(2, 30.0, 0.0)
        .vertex(3, 60.0, 0.0)
        .road(7_000_001, 1, 2)
        .road(7_000_002, 2, 3);
    let graph = sketch.build();
    assert_eq!(graph.way_edges(WayIdentifier::new(7)).len(), 2);
    let route = graph.route_for_way(WayIdentifier::new(7)).unwrap();
    assert_eq!(identifiers(route.edges()), vec![7_000_001, 7_000_002]);
    assert!(graph.route_for_way(WayIdentifier::new(8)).is_none());
}

#[test]
fn relations_and_places() {
    let mut sketch = Sketch::new();
    sketch
        .vertex(1, 0.0, 0.0)
        .vertex(2, 30.0, 0.0)
        .road(1_000_001, 1, 2)
        .relation(
            HeavyweightRelation::new(RelationIdentifier::new(5))
                .with_type("route")
                .with_member(RelationMember::new(MemberReference::Edge(eid(1_000_001)), ""))
                .with_tag("name", "Bus 7"),
        );
    let graph = sketch.build();
    let relation = graph.relation_for_identifier(RelationIdentifier::new(5)).unwrap();
    assert_eq!(relation.relation_type(), RelationType::Route);
    assert_eq!(relation.tag_value("name").as_deref(), Some("Bus 7"));
    assert_eq!(relation.edges().len(), 1);
    assert_eq!(relation.as_route().unwrap().size(), 1);
    let edge = chain_edge(&graph, 1);
    assert!(edge.relations().contains(&relation));
    assert_eq!(graph.relations().count(), 1);
    assert_eq!(graph.places().count(), 0);
}

#[test]
fn heavyweight_edges_serialize() {
    let graph = named_chain();
    let heavy = chain_edge(&graph, 1).to_heavyweight();
    let json = serde_json::to_string(&heavy).unwrap();
    let back: HeavyweightEdge = serde_json::from_str(&json).unwrap();
    assert_eq!(back, heavy);
    let bytes = bincode::serialize(&heavy.identifier).unwrap();
    let identifier: EdgeIdentifier = bincode::deserialize(&bytes).unwrap();
    assert_eq!(identifier, eid(1_000_001));
}

#[test]
fn locations_survive_text_and_binary_serialization() {
    let location = Location::degrees(47.600089831528414, -122.29986677917924);
    let json = serde_json::to_string(&location).unwrap();
    assert_eq!(serde_json::from_str::<Location>(&json).unwrap(), location);
    let shape = chain_edge(&named_chain(), 2).to_heavyweight().shape;
    let bytes = bincode::serialize(&shape).unwrap();
    assert_eq!(bincode::deserialize::<Polyline>(&bytes).unwrap(), shape);
}
