mod util;
use proptest::prelude::*;
use road_graph::prelude::*;
use util::*;

#[test]
fn from_edges_keeps_order_and_connectivity() {
    let graph = chain(4);
    let edges: Vec<_> = (1..=4).map(|way| chain_edge(&graph, way)).collect();
    let route = Route::from_edges(edges.clone()).unwrap();
    assert_eq!(route.size(), 4);
    assert_eq!(route.first(), edges[0]);
    assert_eq!(route.last(), edges[3]);
    assert_eq!(route.get(2), Some(edges[2].clone()));
    assert_eq!(route.get(4), None);
    assert_eq!(route.start().identifier(), vid(1));
    assert_eq!(route.end().identifier(), vid(5));
    assert_eq!(route.edges(), edges);
    assert!(route.validate_invariants().is_ok());
}

#[test]
fn from_edges_rejects_gaps_and_empty_input() {
    let graph = chain(3);
    let err = Route::from_edges([chain_edge(&graph, 1), chain_edge(&graph, 3)]).unwrap_err();
    assert_eq!(
        err,
        GraphError::DisconnectedRoute {
            end: vid(2),
            start: vid(3)
        }
    );
    assert_eq!(
        Route::from_edges(Vec::new()).unwrap_err(),
        GraphError::EmptyRoute
    );
}

#[test]
fn append_joins_connected_routes() {
    let graph = chain(3);
    let first = Route::from_edge(chain_edge(&graph, 1));
    let rest = Route::from_edges([chain_edge(&graph, 2), chain_edge(&graph, 3)]).unwrap();
    let route = first.append(10, &rest).unwrap();
    assert_eq!(route.size(), first.size() + rest.size());
    assert_eq!(identifiers(route.edges()), vec![1_000_001, 2_000_001, 3_000_001]);
    assert_eq!(route.to_string(), "[1000001, 2000001, 3000001]");
}

#[test]
fn append_reverses_other_when_only_its_reverse_fits() {
    let graph = chain(2);
    let first = Route::from_edge(chain_edge(&graph, 1));
    let backwards = Route::from_edge(chain_edge(&graph, 2).reversed().unwrap());
    let route = first.append(10, &backwards).unwrap();
    assert_eq!(identifiers(route.edges()), vec![1_000_001, 2_000_001]);
}

#[test]
fn append_of_disconnected_routes_fails() {
    let graph = chain(3);
    let first = Route::from_edge(chain_edge(&graph, 1));
    let third = Route::from_edge(chain_edge(&graph, 3));
    assert!(matches!(
        first.append(10, &third),
        Err(GraphError::DisconnectedRoute { .. })
    ));
}

#[test]
fn append_past_the_cap_returns_the_receiver() {
    let graph = chain(3);
    let first = Route::from_edges([chain_edge(&graph, 1), chain_edge(&graph, 2)]).unwrap();
    let third = Route::from_edge(chain_edge(&graph, 3));
    let capped = first.append(2, &third).unwrap();
    assert_eq!(capped, first);
    let grown = first.append(3, &third).unwrap();
    assert_eq!(grown.size(), 3);
}

#[test]
fn prepend_and_connect() {
    let graph = chain(3);
    let middle = Route::from_edge(chain_edge(&graph, 2));
    let first = Route::from_edge(chain_edge(&graph, 1));
    let route = middle.prepend(10, &first).unwrap();
    assert_eq!(identifiers(route.edges()), vec![1_000_001, 2_000_001]);

    // both operands backwards
    let second_back = Route::from_edge(chain_edge(&graph, 2).reversed().unwrap());
    let third_back = Route::from_edge(chain_edge(&graph, 3).reversed().unwrap());
    let joined = second_back.connect(&third_back).unwrap();
    assert_eq!(joined.size(), 2);
    assert!(joined.validate_invariants().is_ok());
    assert!(Route::from_edge(chain_edge(&graph, 1))
        .connect(&Route::from_edge(chain_edge(&graph, 3)))
        .is_none());
}

#[test]
fn reversal_round_trips() {
    let graph = chain(5);
    let route = Route::from_edges((1..=5).map(|way| chain_edge(&graph, way))).unwrap();
    let reversed = route.reversed().unwrap();
    assert_eq!(reversed.start(), route.end());
    assert_eq!(reversed.end(), route.start());
    assert_eq!(reversed.first(), route.last().reversed().unwrap());
    assert_eq!(reversed.reversed().unwrap(), route);
}

#[test]
fn reversal_needs_every_edge_two_way() {
    let graph = chain_with(2, |edge| edge.one_way());
    let route = Route::from_edges([chain_edge(&graph, 1), chain_edge(&graph, 2)]).unwrap();
    assert!(route.reversed().is_none());
}

#[test]
fn fifty_thousand_appended_edges_iterate_and_drop() {
    let count = 50_000;
    let graph = chain(count);
    let mut route = Route::from_edge(chain_edge(&graph, 1));
    for way in 2..=count {
        route = route
            .append(1_000_000, &Route::from_edge(chain_edge(&graph, way)))
            .unwrap();
    }
    assert_eq!(route.size(), count as usize);
    assert_eq!(route.iter().len(), count as usize);
    assert_eq!(route.iter().count(), count as usize);
    assert_eq!(route.last(), chain_edge(&graph, count));
    assert_eq!(route.get(25_000), Some(chain_edge(&graph, 25_001)));
    assert!(route.iter().zip(route.iter().skip(1)).all(|(a, b)| a.leads_to(b)));
    drop(route);
}

#[test]
fn length_and_travel_time_subtract_offsets() {
    let graph = chain_with(2, |edge| {
        edge.with_length(Distance::meters(100.0))
            .with_speed_limit(Speed::kilometers_per_hour(36.0))
    });
    let route = Route::from_edges([chain_edge(&graph, 1), chain_edge(&graph, 2)]).unwrap();
    assert_eq!(route.length(), Distance::meters(200.0));
    assert!((route.travel_time().as_secs_f64() - 20.0).abs() < 0.01);

    let trimmed = route.with_offsets(Distance::meters(25.0), Distance::meters(500.0));
    assert_eq!(trimmed.start_offset(), Distance::meters(25.0));
    // clamped to the last edge
    assert_eq!(trimmed.end_offset(), Distance::meters(100.0));
    assert_eq!(trimmed.length(), Distance::meters(75.0));
    assert!((trimmed.travel_time().as_secs_f64() - 7.5).abs() < 0.01);
}

#[test]
fn lengths_measured_while_growing_match_the_edge_sum() {
    let count = 20_000;
    let graph = chain_with(count, |edge| {
        edge.with_length(Distance::meters(100.0))
            .with_speed_limit(Speed::kilometers_per_hour(36.0))
    });
    let mut route = Route::from_edge(chain_edge(&graph, 1));
    for way in 2..=count {
        route = route
            .append(1_000_000, &Route::from_edge(chain_edge(&graph, way)))
            .unwrap();
        assert_eq!(route.length(), Distance::meters(100.0 * way as f64));
    }
    assert!((route.travel_time().as_secs_f64() - 10.0 * count as f64).abs() < 1.0);

    // a measured head joined to an unmeasured tail
    let head = Route::from_edges((1..=3).map(|way| chain_edge(&graph, way))).unwrap();
    assert_eq!(head.length(), Distance::meters(300.0));
    let tail = Route::from_edges((4..=6).map(|way| chain_edge(&graph, way))).unwrap();
    let joined = head.append(1_000_000, &tail).unwrap();
    assert_eq!(joined.length(), Distance::meters(600.0));
    assert_eq!(tail.length(), Distance::meters(300.0));
}

#[test]
fn prefix_suffix_and_trimming() {
    let graph = chain(4);
    let route = Route::from_edges((1..=4).map(|way| chain_edge(&graph, way))).unwrap();
    let prefix = route.prefix_to(vid(3)).unwrap();
    assert_eq!(identifiers(prefix.edges()), vec![1_000_001, 2_000_001]);
    let suffix = route.suffix_from(vid(3)).unwrap();
    assert_eq!(identifiers(suffix.edges()), vec![3_000_001, 4_000_001]);
    assert!(route.prefix_to(vid(1)).is_none());
    assert!(route.starts_with(&prefix));
    assert!(route.ends_with(&suffix));
    assert!(prefix.leads_to(&suffix));
    assert!(!route.ends_with(&prefix));

    assert_eq!(route.without_first_edge().unwrap().first(), chain_edge(&graph, 2));
    assert_eq!(route.without_last_edge().unwrap().last(), chain_edge(&graph, 3));
    assert!(Route::from_edge(chain_edge(&graph, 1)).without_first_edge().is_none());
}

#[test]
fn geometry_and_membership() {
    let graph = chain(3);
    let route = Route::from_edges((1..=3).map(|way| chain_edge(&graph, way))).unwrap();
    assert_eq!(route.polyline().len(), 4);
    assert_eq!(route.vertices().len(), 4);
    assert!(route.contains(&chain_edge(&graph, 2)));
    assert!(!route.contains(&chain_edge(&graph, 2).reversed().unwrap()));
    let bounds = route.bounds();
    assert!(bounds.contains(&graph.vertex_for_identifier(vid(1)).unwrap().location()));
    assert!(bounds.contains(&graph.vertex_for_identifier(vid(4)).unwrap().location()));
    assert!(!route.is_loop());
}

#[test]
fn loops_end_where_they_start() {
    let mut sketch = Sketch::new();
    sketch
        .vertex(1, 0.0, 0.0)
        .vertex(2, 100.0, 0.0)
        .vertex(3, 50.0, 80.0)
        .road(1_000_001, 1, 2)
        .road(2_000_001, 2, 3)
        .road(3_000_001, 3, 1);
    let graph = sketch.build();
    let route = Route::from_edges(
        [1_000_001, 2_000_001, 3_000_001].map(|id| graph.edge_for_identifier(eid(id)).unwrap()),
    )
    .unwrap();
    assert!(route.is_loop());
}

#[test]
fn routes_are_element_sets() {
    let graph = chain(3);
    let route = Route::from_edges((1..=3).map(|way| chain_edge(&graph, way))).unwrap();
    let set: &dyn ElementSet<Item = Edge<'_>> = &route;
    assert_eq!(set.count(), 3);
    assert!(set.contains(&chain_edge(&graph, 3)));
    assert_eq!(route.total_length(), route.length());
}

#[derive(Clone, Debug)]
enum Growth {
    Append,
    Prepend,
    Reverse,
    PrefixTo(usize),
}

fn growth() -> impl Strategy<Value = Growth> {
    prop_oneof![
        Just(Growth::Append),
        Just(Growth::Prepend),
        Just(Growth::Reverse),
        (0usize..16).prop_map(Growth::PrefixTo),
    ]
}

fn grown<'g>(route: &Route<'g>, step: &Growth) -> Route<'g> {
    match step {
        Growth::Append => match route.last().out_edges_without_reverse().to_vec().first() {
            Some(next) => route.append(usize::MAX, &Route::from_edge(next.clone())).unwrap(),
            None => route.clone(),
        },
        Growth::Prepend => match route.first().in_edges_without_reverse().to_vec().first() {
            Some(previous) => {
                route.prepend(usize::MAX, &Route::from_edge(previous.clone())).unwrap()
            }
            None => route.clone(),
        },
        Growth::Reverse => route.reversed().unwrap(),
        Growth::PrefixTo(position) => {
            let edge = route.get(position % route.size()).unwrap();
            route.prefix_to(edge.to_vertex_identifier()).unwrap()
        }
    }
}

proptest! {
    #[test]
    fn grown_routes_stay_connected(
        start in 1i64..=8,
        steps in prop::collection::vec(growth(), 0..40),
    ) {
        let graph = chain(8);
        let mut route = Route::from_edge(chain_edge(&graph, start));
        for step in &steps {
            route = grown(&route, step);
            let edges = route.edges();
            for pair in edges.windows(2) {
                prop_assert!(pair[0].leads_to(&pair[1]));
            }
            prop_assert_eq!(route.size(), route.iter().count());
            prop_assert_eq!(route.size(), edges.len());
            prop_assert!(route.size() <= 8);
            prop_assert!(route.validate_invariants().is_ok());
        }
        let round_trip = route.reversed().unwrap().reversed().unwrap();
        prop_assert_eq!(round_trip, route);
    }
}
