//! Topology algorithms layered on edges, routes and relations.

pub mod connector;
pub mod double_digitized;
pub mod importance;
pub mod turn;
pub mod turn_restriction;

pub use connector::ConnectorKind;
pub use double_digitized::EdgePair;
pub use importance::Importance;
pub use turn::TurnType;
pub use turn_restriction::{Maneuver, RestrictionKind, TurnRestriction, Via};
