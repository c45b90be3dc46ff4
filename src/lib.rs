#![cfg_attr(docsrs, feature(doc_cfg))]
//! # road-graph
//!
//! road-graph is an in-memory object model for road networks: directed
//! edges, vertices, relations and places backed by a columnar attribute
//! store, with lazily composed element sets, persistent routes, and the
//! topology algorithms built on them (turn classification, turn-restriction
//! resolution, non-branching route discovery, double-digitisation
//! detection).
//!
//! ## Features
//! - Flyweight element handles that borrow their [`Graph`](graph::Graph) and
//!   read every attribute through the store
//! - Lazy set algebra ([`set::SetAlgebra`]) over capped, insertion-ordered sets
//! - Persistent [`Route`](route::Route)s with O(1) concatenation and
//!   stack-safe traversal at any depth
//! - Navigator / limiter strategies for growing routes from a seed edge
//! - Runtime invariant checks behind the `check-invariants` feature
//! - Parallel edge scans behind the `rayon` feature
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! road-graph = "0.4"
//! # Optional features:
//! # features = ["rayon", "check-invariants"]
//! ```
//!
//! ## Lifetimes
//! Every handle, set and route carries the lifetime `'g` of the graph it was
//! produced from. Handles are cheap to clone: a graph reference plus a
//! lazily resolved identifier and index.

pub mod algs;
pub mod config;
pub mod debug_invariants;
pub mod diagnostics;
pub mod element;
pub mod geometry;
pub mod graph;
pub mod graph_error;
pub mod route;
pub mod set;
pub mod store;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::{
        ConnectorKind, EdgePair, Importance, Maneuver, RestrictionKind, TurnRestriction, TurnType,
        Via,
    };
    pub use crate::config::{DoubleDigitizationConfig, GraphLimits};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::element::attributes::{
        Attribute, DataSpecification, FormOfWay, FunctionalClass, MemberReference, PlaceType,
        RelationMember, RelationType, RoadName, RoadSubType, RoadType, Tags,
    };
    pub use crate::element::{
        Edge, EdgeIdentifier, EdgeRelation, ElementIndex, ElementKind, GraphElement,
        HeavyweightEdge, HeavyweightPlace, HeavyweightRelation, HeavyweightVertex, Place,
        PlaceIdentifier, RelationIdentifier, Vertex, VertexIdentifier, WayIdentifier,
    };
    pub use crate::geometry::{
        Angle, Chirality, Distance, Heading, Location, Polyline, Rectangle, Speed,
    };
    pub use crate::graph::{Graph, GraphBuilder};
    pub use crate::graph_error::GraphError;
    pub use crate::route::{
        AllLimiters, Direction, EdgeCountLimiter, LengthLimiter, LengthPolicy, Navigator,
        NonBranchingNavigator, PredicateLimiter, Route, RouteLimiter, SameWayNavigator,
        StraightestNavigator,
    };
    pub use crate::set::{CappedSet, EdgeSet, EdgeSetExt, ElementSet, RelationSet, SetAlgebra};
    pub use crate::store::{GraphStore, InMemoryStore};
}
