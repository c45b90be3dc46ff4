mod util;
use road_graph::prelude::*;
use util::*;

fn ids(route: &Route<'_>) -> Vec<i64> {
    identifiers(route.edges())
}

/// Eastbound approach A -> B with exits north, east, south and south-east.
fn crossroads() -> Graph {
    let mut sketch = Sketch::new();
    sketch
        .vertex(1, 0.0, 0.0)
        .vertex(2, 100.0, 0.0)
        .vertex(3, 100.0, 100.0)
        .vertex(4, 200.0, 0.0)
        .vertex(5, 100.0, -100.0)
        .vertex(6, 150.0, -100.0)
        .road(1_000_001, 1, 2)
        .road(2_000_001, 2, 3)
        .road(3_000_001, 2, 4)
        .road(4_000_001, 2, 5)
        .road(5_000_001, 2, 6);
    sketch.build()
}

#[test]
fn non_branching_route_covers_the_whole_chain() {
    let graph = chain(5);
    let route = chain_edge(&graph, 3).non_branching_route(5).unwrap();
    assert_eq!(ids(&route), vec![1_000_001, 2_000_001, 3_000_001, 4_000_001, 5_000_001]);
    assert!(chain_edge(&graph, 3).non_branching_route(3).is_none());
}

/// Five chained roads in a graph whose routes hold at most three edges.
fn capped_chain() -> Graph {
    let mut sketch = Sketch::new().with_limits(GraphLimits {
        maximum_route_size: 3,
        ..GraphLimits::default()
    });
    for vertex in 1..=6 {
        sketch.vertex(vertex, (vertex - 1) as f64 * 10.0, 0.0);
    }
    for way in 1..=5 {
        sketch.road(way * 1_000_000 + 1, way, way + 1);
    }
    sketch.build()
}

#[test]
fn non_branching_route_fails_past_the_graph_route_cap() {
    let graph = capped_chain();
    assert!(chain_edge(&graph, 1).non_branching_route(10).is_none());
    let route = chain_edge(&graph, 1).route(NonBranchingNavigator, EdgeCountLimiter::new(10));
    assert_eq!(ids(&route), vec![1_000_001, 2_000_001, 3_000_001]);
}

#[test]
fn non_branching_route_stops_at_junctions() {
    let graph = crossroads();
    let approach = graph.edge_for_identifier(eid(1_000_001)).unwrap();
    let route = approach.non_branching_route(100).unwrap();
    assert_eq!(ids(&route), vec![1_000_001]);
}

#[test]
fn non_branching_route_returns_loops_whole() {
    let mut sketch = Sketch::new();
    sketch
        .vertex(1, 0.0, 0.0)
        .vertex(2, 100.0, 0.0)
        .vertex(3, 50.0, 80.0)
        .road(1_000_001, 1, 2)
        .road(2_000_001, 2, 3)
        .road(3_000_001, 3, 1);
    let graph = sketch.build();
    let route = graph
        .edge_for_identifier(eid(2_000_001))
        .unwrap()
        .non_branching_route(10)
        .unwrap();
    assert_eq!(ids(&route), vec![2_000_001, 3_000_001, 1_000_001]);
    assert!(route.is_loop());
}

#[test]
fn same_name_route_stops_where_the_name_changes() {
    let graph = chain_with(5, |edge| {
        let name = if edge.identifier.get() < 4_000_000 { "A St" } else { "B St" };
        edge.with_name(name)
    });
    let route = chain_edge(&graph, 2).non_branching_route_with_same_name(10);
    assert_eq!(ids(&route), vec![1_000_001, 2_000_001, 3_000_001]);

    let short = chain_edge(&graph, 2).non_branching_route_with_same_name(1);
    assert_eq!(ids(&short), vec![2_000_001, 3_000_001]);
}

#[test]
fn route_matching_takes_accepted_edges_only() {
    let graph = chain(4);
    let route = chain_edge(&graph, 1).route_matching(|edge| edge.way() != WayIdentifier::new(3));
    assert_eq!(ids(&route), vec![1_000_001, 2_000_001]);
    let all = chain_edge(&graph, 2).route_matching(|_| true);
    assert_eq!(all.size(), 4);
    assert_eq!(all.start().identifier(), vid(1));
}

#[test]
fn straightest_navigator_goes_straight_through() {
    let graph = crossroads();
    let approach = graph.edge_for_identifier(eid(1_000_001)).unwrap();
    let route = approach.route(StraightestNavigator::default(), EdgeCountLimiter::new(10));
    assert_eq!(ids(&route), vec![1_000_001, 3_000_001]);

    let narrow = StraightestNavigator::new(Angle::degrees(10.0));
    // nothing arrives at B within 10 degrees of the south-east exit
    let south_east = graph.edge_for_identifier(eid(5_000_001)).unwrap();
    assert!(narrow.next(&south_east, Direction::In).is_none());
    assert_eq!(narrow.next(&approach, Direction::Out).unwrap().identifier(), eid(3_000_001));
}

#[test]
fn same_way_navigator_follows_sections() {
    let mut sketch = Sketch::new();
    sketch
        .vertex(1, 0.0, 0.0)
        .vertex(2, 50.0, 0.0)
        .vertex(3, 100.0, 0.0)
        .vertex(4, 50.0, 50.0)
        .road(7_000_001, 1, 2)
        .road(7_000_002, 2, 3)
        .road(8_000_001, 2, 4);
    let graph = sketch.build();
    let first = graph.edge_for_identifier(eid(7_000_001)).unwrap();
    let route = first.route(SameWayNavigator, EdgeCountLimiter::new(10));
    assert_eq!(ids(&route), vec![7_000_001, 7_000_002]);
}

#[test]
fn edge_count_limiter_caps_the_route() {
    let graph = chain(5);
    let route = chain_edge(&graph, 1).route(NonBranchingNavigator, EdgeCountLimiter::new(3));
    assert_eq!(ids(&route), vec![1_000_001, 2_000_001, 3_000_001]);
}

#[test]
fn length_limiter_policies() {
    let graph = chain(5);
    let seed = chain_edge(&graph, 1);
    let strict = seed.route(
        NonBranchingNavigator,
        LengthLimiter::new(Distance::meters(25.0), LengthPolicy::Strict),
    );
    assert_eq!(strict.size(), 2);
    assert!(strict.length() <= Distance::meters(25.0));

    let lenient = seed.route(
        NonBranchingNavigator,
        LengthLimiter::new(Distance::meters(25.0), LengthPolicy::Lenient),
    );
    assert_eq!(lenient.size(), 3);
    assert!(lenient.length() > Distance::meters(25.0));
}

#[test]
fn combined_limiters_apply_both() {
    let graph = chain(6);
    let avoid_way_five =
        PredicateLimiter::new(|edge: &Edge<'_>, _| edge.way() != WayIdentifier::new(5));
    let limiter = AllLimiters(avoid_way_five, EdgeCountLimiter::new(10));
    let route = chain_edge(&graph, 2).route(NonBranchingNavigator, &limiter);
    assert_eq!(ids(&route), vec![1_000_001, 2_000_001, 3_000_001, 4_000_001]);
}

#[test]
fn turn_types_at_a_junction() {
    let graph = crossroads();
    let edge = |raw| graph.edge_for_identifier(eid(raw)).unwrap();
    let approach = edge(1_000_001);
    assert_eq!(approach.turn_type_to(&edge(2_000_001)), TurnType::Left);
    assert_eq!(approach.turn_type_to(&edge(3_000_001)), TurnType::Straight);
    assert_eq!(approach.turn_type_to(&edge(4_000_001)), TurnType::Right);
    assert_eq!(approach.turn_type_to(&approach.reversed().unwrap()), TurnType::UTurn);
    assert_eq!(edge(2_000_001).turn_type_to(&edge(3_000_001)), TurnType::Invalid);

    let tolerance = Angle::degrees(45.0);
    assert_eq!(approach.hardest_right_out_edge(tolerance).unwrap().identifier(), eid(4_000_001));
    assert_eq!(approach.hardest_left_out_edge(tolerance).unwrap().identifier(), eid(2_000_001));
    assert!(edge(3_000_001).hardest_left_out_edge(tolerance).is_none());
}
