//! Identifier and index newtypes shared by every element kind.
//!
//! Identifiers are the stable, externally meaningful names of elements
//! (64-bit signed). Indices are dense, 1-based handles into the attribute
//! store; they are only meaningful for the graph that produced them.
//!
//! Edge identifiers embed the way they were sectioned from:
//! `way * 1_000_000 + section`, with `section` in `1..=999_999`. A negative
//! edge identifier names the reverse direction of a two-way edge.

use std::{fmt, num::NonZeroU32};

use serde::{Deserialize, Serialize};

use crate::graph_error::GraphError;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(i64);

        impl $name {
            #[inline]
            pub const fn new(raw: i64) -> Self {
                $name(raw)
            }

            /// Returns the raw 64-bit identifier.
            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(raw: i64) -> Self {
                $name(raw)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier!(
    /// Identifier of a directed edge; negative for the reverse of a two-way edge.
    EdgeIdentifier
);
identifier!(
    /// Identifier of a vertex. Vertex identifiers double as store indices.
    VertexIdentifier
);
identifier!(
    /// Identifier of an edge relation.
    RelationIdentifier
);
identifier!(
    /// Identifier of a place.
    PlaceIdentifier
);
identifier!(
    /// Identifier of the source way an edge was sectioned from.
    WayIdentifier
);

impl EdgeIdentifier {
    /// Multiplier separating the way number from the section number.
    pub const SECTIONS_PER_WAY: i64 = 1_000_000;

    /// Builds the forward identifier of section `section` of `way`.
    pub fn from_way_section(way: WayIdentifier, section: u32) -> Result<Self, GraphError> {
        let section = i64::from(section);
        if way.get() < 0 {
            return Err(GraphError::InvalidIdentifier(way.get()));
        }
        if section < 1 || section >= Self::SECTIONS_PER_WAY {
            return Err(GraphError::InvalidIdentifier(section));
        }
        way.get()
            .checked_mul(Self::SECTIONS_PER_WAY)
            .and_then(|base| base.checked_add(section))
            .map(EdgeIdentifier)
            .ok_or(GraphError::InvalidIdentifier(way.get()))
    }

    #[inline]
    pub const fn is_forward(self) -> bool {
        self.0 >= 0
    }

    /// The identifier of the opposite direction.
    #[inline]
    pub const fn reversed(self) -> Self {
        EdgeIdentifier(-self.0)
    }

    /// The forward-direction identifier (absolute value).
    #[inline]
    pub const fn forward(self) -> Self {
        EdgeIdentifier(self.0.abs())
    }

    #[inline]
    pub const fn way(self) -> WayIdentifier {
        WayIdentifier(self.0.abs() / Self::SECTIONS_PER_WAY)
    }

    #[inline]
    pub const fn section(self) -> u32 {
        (self.0.abs() % Self::SECTIONS_PER_WAY) as u32
    }
}

impl VertexIdentifier {
    /// The store index of this vertex, which is the identifier itself.
    pub fn as_index(self) -> Result<ElementIndex, GraphError> {
        u32::try_from(self.0)
            .ok()
            .and_then(NonZeroU32::new)
            .map(ElementIndex)
            .ok_or(GraphError::InvalidIdentifier(self.0))
    }
}

/// A dense, 1-based index into an attribute store.
///
/// `Option<ElementIndex>` is the same size as `u32`; `None` plays the role
/// of the reserved "unresolved" index 0.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ElementIndex(NonZeroU32);

impl ElementIndex {
    /// Fails with [`GraphError::InvalidIndex`] for `0`.
    #[inline]
    pub fn new(raw: u32) -> Result<Self, GraphError> {
        NonZeroU32::new(raw)
            .map(ElementIndex)
            .ok_or(GraphError::InvalidIndex)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Zero-based position in a dense column.
    #[inline]
    pub const fn position(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Index of the element stored at zero-based `position`.
    #[inline]
    pub(crate) fn from_position(position: usize) -> Result<Self, GraphError> {
        u32::try_from(position + 1)
            .map_err(|_| GraphError::InvalidIndex)
            .and_then(ElementIndex::new)
    }
}

impl fmt::Debug for ElementIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementIndex").field(&self.get()).finish()
    }
}

impl fmt::Display for ElementIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn way_section_encoding() {
        let id = EdgeIdentifier::from_way_section(WayIdentifier::new(42), 3).unwrap();
        assert_eq!(id.get(), 42_000_003);
        assert_eq!(id.way(), WayIdentifier::new(42));
        assert_eq!(id.section(), 3);
        assert_eq!(id.reversed().way(), WayIdentifier::new(42));
        assert_eq!(id.reversed().section(), 3);
    }

    #[test]
    fn invalid_sections_are_rejected() {
        let way = WayIdentifier::new(1);
        assert!(EdgeIdentifier::from_way_section(way, 0).is_err());
        assert!(EdgeIdentifier::from_way_section(way, 1_000_000).is_err());
        assert!(EdgeIdentifier::from_way_section(WayIdentifier::new(-1), 1).is_err());
    }

    #[test]
    fn reversal_negates() {
        let id = EdgeIdentifier::new(7_000_001);
        assert!(id.is_forward());
        assert!(!id.reversed().is_forward());
        assert_eq!(id.reversed().reversed(), id);
        assert_eq!(id.reversed().forward(), id);
    }

    #[test]
    fn zero_index_is_invalid() {
        assert_eq!(ElementIndex::new(0), Err(GraphError::InvalidIndex));
        let index = ElementIndex::new(5).unwrap();
        assert_eq!(index.position(), 4);
        assert_eq!(ElementIndex::from_position(4).unwrap(), index);
    }

    #[test]
    fn vertex_identifier_is_its_index() {
        assert_eq!(VertexIdentifier::new(9).as_index().unwrap().get(), 9);
        assert!(VertexIdentifier::new(0).as_index().is_err());
        assert!(VertexIdentifier::new(-4).as_index().is_err());
    }

    #[test]
    fn debug_and_display() {
        let v = VertexIdentifier::new(7);
        assert_eq!(format!("{:?}", v), "VertexIdentifier(7)");
        assert_eq!(format!("{}", v), "7");
    }
}
