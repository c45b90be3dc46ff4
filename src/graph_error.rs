//! GraphError: Unified error type for road-graph public APIs
//!
//! Capacity conditions (a capped set or route reaching its maximum size) and
//! resolution failures (a turn restriction that does not connect) are not
//! errors: they are recovered locally and reported through `log`. Everything
//! that reaches this type is either a programming error on the caller's side
//! or a schema mismatch.

use thiserror::Error;

use crate::element::ElementKind;
use crate::element::attributes::{Attribute, DataSpecification};
use crate::element::identifier::VertexIdentifier;

/// Unified error type for road-graph operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two routes (or two edges) were joined at endpoints that do not meet.
    #[error("Disconnected route: end vertex {end} does not meet start vertex {start}")]
    DisconnectedRoute {
        /// `to` vertex of the last edge of the leading route.
        end: VertexIdentifier,
        /// `from` vertex of the first edge of the trailing route.
        start: VertexIdentifier,
    },
    /// A route was requested from an empty sequence of edges.
    #[error("A route needs at least one edge")]
    EmptyRoute,
    /// The attribute is not available under the graph's data specification.
    #[error("Attribute {attribute:?} is not supported by the {specification} data specification")]
    Unsupported {
        attribute: Attribute,
        specification: DataSpecification,
    },
    /// An element referenced by a builder or a resolver is not in the graph.
    #[error("{kind:?} {identifier} is not in the graph")]
    MissingElement { kind: ElementKind, identifier: i64 },
    /// Two elements of the same kind were added with the same identifier.
    #[error("{kind:?} {identifier} was added twice")]
    DuplicateElement { kind: ElementKind, identifier: i64 },
    /// Identifier outside its valid space (negative forward edge, zero way section, ...).
    #[error("Invalid identifier `{0}`")]
    InvalidIdentifier(i64),
    /// Element indices are 1-based; 0 is reserved as "unresolved".
    #[error("Element index must be non-zero (0 is reserved as unresolved)")]
    InvalidIndex,
    /// A structural invariant does not hold.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}
