//! Flyweight graph elements.
//!
//! An element handle is a borrowed graph reference plus whichever of
//! identifier or store index it was created from. The other half is resolved
//! through the store on first use and memoised. Handles never own attribute
//! data: every accessor reads through to the graph's store.
//!
//! Identity is the identifier alone. Two handles of the same kind with the
//! same identifier are equal and hash the same whether or not either has
//! resolved its index.
//!
//! Handles are created by the graph's factory methods only
//! ([`Graph::edge_for_identifier`](crate::graph::Graph::edge_for_identifier)
//! and friends), which check existence first. A handle whose identifier is
//! not in its graph panics on first attribute access.

pub mod attributes;
pub mod edge;
pub mod heavy;
pub mod identifier;
pub mod place;
pub mod relation;
pub mod vertex;

use std::fmt;
use std::hash::Hash;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::graph::Graph;
pub use edge::Edge;
pub use heavy::{HeavyweightEdge, HeavyweightPlace, HeavyweightRelation, HeavyweightVertex};
pub use identifier::{
    EdgeIdentifier, ElementIndex, PlaceIdentifier, RelationIdentifier, VertexIdentifier,
    WayIdentifier,
};
pub use place::Place;
pub use relation::EdgeRelation;
pub use vertex::Vertex;

/// The four element kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Edge,
    Vertex,
    Relation,
    Place,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Edge => "edge",
            ElementKind::Vertex => "vertex",
            ElementKind::Relation => "relation",
            ElementKind::Place => "place",
        };
        f.write_str(name)
    }
}

/// Behaviour shared by every element handle.
pub trait GraphElement<'g> {
    type Identifier: Copy + Eq + Hash + fmt::Debug;

    const KIND: ElementKind;

    fn graph(&self) -> &'g Graph;

    fn identifier(&self) -> Self::Identifier;

    /// Store index, resolved on first call.
    fn index(&self) -> ElementIndex;

    /// The identifier as a raw 64-bit value.
    fn identifier_as_long(&self) -> i64;
}

/// Identifier/index pair of which at least one half is always known.
///
/// Each half is published once through a [`OnceCell`], so concurrent readers
/// either see nothing or a fully resolved value.
#[derive(Clone)]
pub(crate) struct Flyweight<I> {
    identifier: OnceCell<I>,
    index: OnceCell<ElementIndex>,
}

impl<I: Copy> Flyweight<I> {
    #[inline]
    pub(crate) fn from_identifier(identifier: I) -> Self {
        Self {
            identifier: OnceCell::with_value(identifier),
            index: OnceCell::new(),
        }
    }

    #[inline]
    pub(crate) fn from_index(index: ElementIndex) -> Self {
        Self {
            identifier: OnceCell::new(),
            index: OnceCell::with_value(index),
        }
    }

    #[inline]
    pub(crate) fn resolved(identifier: I, index: ElementIndex) -> Self {
        Self {
            identifier: OnceCell::with_value(identifier),
            index: OnceCell::with_value(index),
        }
    }

    #[inline]
    pub(crate) fn identifier(&self, resolve: impl FnOnce(ElementIndex) -> I) -> I {
        match self.index.get() {
            Some(index) => *self.identifier.get_or_init(|| resolve(*index)),
            // constructed from an identifier, so it is already set
            None => *self
                .identifier
                .get()
                .unwrap_or_else(|| unreachable!("flyweight without identifier or index")),
        }
    }

    #[inline]
    pub(crate) fn index(&self, resolve: impl FnOnce(I) -> ElementIndex) -> ElementIndex {
        match self.identifier.get() {
            Some(identifier) => *self.index.get_or_init(|| resolve(*identifier)),
            None => *self
                .index
                .get()
                .unwrap_or_else(|| unreachable!("flyweight without identifier or index")),
        }
    }

    #[inline]
    pub(crate) fn resolved_index(&self) -> Option<ElementIndex> {
        self.index.get().copied()
    }
}

/// Derives identity traits (`PartialEq`, `Eq`, `Hash`, `Debug`, `Display`)
/// for a handle type from its identifier.
macro_rules! element_identity {
    ($handle:ident) => {
        impl PartialEq for $handle<'_> {
            fn eq(&self, other: &Self) -> bool {
                self.identifier() == other.identifier()
            }
        }

        impl Eq for $handle<'_> {}

        impl std::hash::Hash for $handle<'_> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.identifier().hash(state)
            }
        }

        impl std::fmt::Debug for $handle<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($handle))
                    .field(&self.identifier().get())
                    .finish()
            }
        }

        impl std::fmt::Display for $handle<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.identifier())
            }
        }
    };
}
pub(crate) use element_identity;
