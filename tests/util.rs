#![allow(dead_code)]
use road_graph::prelude::*;

pub const ORIGIN: Location = Location::degrees(47.6, -122.3);

pub fn vid(raw: i64) -> VertexIdentifier {
    VertexIdentifier::new(raw)
}

pub fn eid(raw: i64) -> EdgeIdentifier {
    EdgeIdentifier::new(raw)
}

/// A location `east` and `north` metres from [`ORIGIN`]; negative values go
/// west and south.
pub fn at(east: f64, north: f64) -> Location {
    let (heading, east) = if east < 0.0 {
        (Heading::WEST, -east)
    } else {
        (Heading::EAST, east)
    };
    let step = ORIGIN.moved(heading, Distance::meters(east));
    let (heading, north) = if north < 0.0 {
        (Heading::SOUTH, -north)
    } else {
        (Heading::NORTH, north)
    };
    step.moved(heading, Distance::meters(north))
}

/// Small graphs laid out on a local metric grid.
pub struct Sketch {
    builder: GraphBuilder,
    locations: Vec<(i64, Location)>,
}

impl Sketch {
    pub fn new() -> Self {
        Self::with_specification(DataSpecification::Osm)
    }

    pub fn with_specification(specification: DataSpecification) -> Self {
        Self {
            builder: GraphBuilder::new("sketch", specification),
            locations: Vec::new(),
        }
    }

    pub fn with_limits(mut self, limits: GraphLimits) -> Self {
        self.builder = self.builder.with_limits(limits);
        self
    }

    pub fn vertex(&mut self, id: i64, east: f64, north: f64) -> &mut Self {
        let location = at(east, north);
        self.builder
            .add_vertex(HeavyweightVertex::new(vid(id), location))
            .unwrap();
        self.locations.push((id, location));
        self
    }

    pub fn location(&self, id: i64) -> Location {
        self.locations
            .iter()
            .find(|(vertex, _)| *vertex == id)
            .map(|(_, location)| *location)
            .unwrap()
    }

    /// A two-way local road drawn straight between its endpoints.
    pub fn road(&mut self, id: i64, from: i64, to: i64) -> &mut Self {
        self.road_with(id, from, to, |edge| edge)
    }

    pub fn road_with<F>(&mut self, id: i64, from: i64, to: i64, customize: F) -> &mut Self
    where
        F: FnOnce(HeavyweightEdge) -> HeavyweightEdge,
    {
        let shape = Polyline::segment(self.location(from), self.location(to));
        let edge = customize(HeavyweightEdge::new(eid(id), vid(from), vid(to), shape));
        self.builder.add_edge(edge).unwrap();
        self
    }

    pub fn relation(&mut self, relation: HeavyweightRelation) -> &mut Self {
        self.builder.add_relation(relation).unwrap();
        self
    }

    pub fn build(self) -> Graph {
        self.builder.build().unwrap()
    }
}

/// `count` two-way roads end to end, heading east 10 m apart. Edge `i`
/// (from 1) has identifier `i * 1_000_000 + 1` and runs from vertex `i` to
/// vertex `i + 1`.
pub fn chain(count: i64) -> Graph {
    chain_with(count, |edge| edge)
}

pub fn chain_with<F>(count: i64, customize: F) -> Graph
where
    F: Fn(HeavyweightEdge) -> HeavyweightEdge,
{
    let mut sketch = Sketch::new().with_limits(GraphLimits {
        maximum_route_size: 1_000_000,
        ..GraphLimits::default()
    });
    for vertex in 1..=count + 1 {
        sketch.vertex(vertex, (vertex - 1) as f64 * 10.0, 0.0);
    }
    for way in 1..=count {
        sketch.road_with(way * 1_000_000 + 1, way, way + 1, &customize);
    }
    sketch.build()
}

pub fn chain_edge(graph: &Graph, way: i64) -> Edge<'_> {
    graph.edge_for_identifier(eid(way * 1_000_000 + 1)).unwrap()
}

pub fn identifiers<'g, I>(edges: I) -> Vec<i64>
where
    I: IntoIterator<Item = Edge<'g>>,
{
    edges.into_iter().map(|edge| edge.identifier().get()).collect()
}
