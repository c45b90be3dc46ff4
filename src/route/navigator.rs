//! Next-edge policies for route discovery.

use crate::element::Edge;
use crate::geometry::{Angle, Chirality};
use crate::set::ElementSet;

/// Which end of a route is being extended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Prepending edges that lead into the route.
    In,
    /// Appending edges that leave the route.
    Out,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }
}

/// Chooses the single edge to follow from `edge` in `direction`.
///
/// Navigators are stateless beyond their configuration; cycle detection
/// belongs to the walk that drives them.
pub trait Navigator {
    fn next<'g>(&self, edge: &Edge<'g>, direction: Direction) -> Option<Edge<'g>>;
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn next<'g>(&self, edge: &Edge<'g>, direction: Direction) -> Option<Edge<'g>> {
        (**self).next(edge, direction)
    }
}

/// Candidate edges at the end of `edge` facing `direction`, excluding
/// `edge`'s own reverse.
fn candidates<'g>(edge: &Edge<'g>, direction: Direction) -> Vec<Edge<'g>> {
    match direction {
        Direction::Out => edge.out_edges_without_reverse().to_vec(),
        Direction::In => edge.in_edges_without_reverse().to_vec(),
    }
}

/// Follows 1-to-1 chains: the next edge must be the only candidate, and
/// `edge` must be the only candidate seen from it looking back.
#[derive(Copy, Clone, Debug, Default)]
pub struct NonBranchingNavigator;

impl Navigator for NonBranchingNavigator {
    fn next<'g>(&self, edge: &Edge<'g>, direction: Direction) -> Option<Edge<'g>> {
        let next = candidates(edge, direction).only()?;
        let back = candidates(&next, direction.opposite()).only()?;
        (back == *edge).then_some(next)
    }
}

/// Continues along the same way, preferring the adjacent section.
#[derive(Copy, Clone, Debug, Default)]
pub struct SameWayNavigator;

impl Navigator for SameWayNavigator {
    fn next<'g>(&self, edge: &Edge<'g>, direction: Direction) -> Option<Edge<'g>> {
        let way = edge.way();
        let section = edge.section();
        candidates(edge, direction)
            .into_iter()
            .filter(|candidate| candidate.way() == way)
            .min_by_key(|candidate| candidate.section().abs_diff(section))
    }
}

/// Takes the candidate with the smallest turn angle, provided it is within
/// `tolerance`. Never makes a u-turn.
#[derive(Copy, Clone, Debug)]
pub struct StraightestNavigator {
    pub tolerance: Angle,
}

impl StraightestNavigator {
    pub fn new(tolerance: Angle) -> Self {
        Self { tolerance }
    }
}

impl Default for StraightestNavigator {
    fn default() -> Self {
        Self::new(Angle::degrees(45.0))
    }
}

impl Navigator for StraightestNavigator {
    fn next<'g>(&self, edge: &Edge<'g>, direction: Direction) -> Option<Edge<'g>> {
        let mut best: Option<(f64, Edge<'g>)> = None;
        for candidate in candidates(edge, direction) {
            let turn = match direction {
                Direction::Out => edge.turn_angle_to(&candidate, Chirality::Smallest),
                Direction::In => candidate.turn_angle_to(edge, Chirality::Smallest),
            }
            .abs();
            if !turn.is_within(self.tolerance) {
                continue;
            }
            let turn = turn.as_degrees();
            if best.as_ref().is_none_or(|(kept, _)| turn < *kept) {
                best = Some((turn, candidate));
            }
        }
        best.map(|(_, edge)| edge)
    }
}
