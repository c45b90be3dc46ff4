//! Total importance order over edges.

use std::cmp::{Ordering, Reverse};

use crate::element::Edge;

/// Sort key ranking edges by functional class, then road type. Exact ties
/// fall back to the identifier, lowest first, so the order is total and
/// stable across runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Importance {
    functional_class: u8,
    road_type: u8,
    identifier: Reverse<i64>,
}

impl<'g> Edge<'g> {
    pub fn importance(&self) -> Importance {
        Importance {
            functional_class: self.functional_class().importance(),
            road_type: self.road_type().importance(),
            identifier: Reverse(self.identifier().get()),
        }
    }

    pub fn is_more_important_than(&self, other: &Edge<'_>) -> bool {
        self.importance().cmp(&other.importance()) == Ordering::Greater
    }
}
