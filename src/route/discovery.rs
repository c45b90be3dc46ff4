//! Growing routes outward from a seed edge.
//!
//! Every walk extends the out end first, then the in end. Edges are
//! visited at most once in either direction, so walks terminate on cyclic
//! graphs; a walk that comes back to the seed edge returns the loop as is.

use hashbrown::HashSet;
use log::trace;

use crate::element::{Edge, EdgeIdentifier};
use crate::route::{Direction, Navigator, NonBranchingNavigator, Route, RouteLimiter};
use crate::set::ElementSet;

enum Step {
    Extend,
    Stop,
    Abort,
}

/// Drives one walk. `next` proposes a candidate; `admit` rules on it.
fn walk<'g, N, A>(seed: &Edge<'g>, mut next: N, mut admit: A) -> Option<Route<'g>>
where
    N: FnMut(&Edge<'g>, Direction, &HashSet<EdgeIdentifier>) -> Option<Edge<'g>>,
    A: FnMut(&Route<'g>, &Edge<'g>, Direction) -> Step,
{
    let maximum = seed.graph().limits().maximum_route_size;
    let mut route = Route::from_edge(seed.clone());
    let mut visited: HashSet<EdgeIdentifier> = HashSet::new();
    visited.insert(seed.identifier().forward());

    for direction in [Direction::Out, Direction::In] {
        let mut current = seed.clone();
        while let Some(candidate) = next(&current, direction, &visited) {
            if direction == Direction::Out && candidate == *seed {
                trace!("route from {seed} closes into a loop of {} edges", route.size());
                return Some(route);
            }
            if visited.contains(&candidate.identifier().forward()) {
                break;
            }
            match admit(&route, &candidate, direction) {
                Step::Extend => {}
                Step::Stop => break,
                Step::Abort => return None,
            }
            if route.size() >= maximum {
                break;
            }
            let single = Route::from_edge(candidate.clone());
            route = match direction {
                Direction::Out => route.append(maximum, &single),
                Direction::In => route.prepend(maximum, &single),
            }
            .ok()?;
            visited.insert(candidate.identifier().forward());
            current = candidate;
        }
    }
    Some(route)
}

impl<'g> Edge<'g> {
    /// The maximal 1-to-1 chain through this edge, or `None` when it would
    /// need more than `maximum_edges` edges. The graph's maximum route size
    /// caps `maximum_edges`: a chain running past it is also `None`.
    pub fn non_branching_route(&self, maximum_edges: usize) -> Option<Route<'g>> {
        let maximum_edges = maximum_edges.min(self.graph().limits().maximum_route_size);
        walk(
            self,
            |edge, direction, _| NonBranchingNavigator.next(edge, direction),
            |route, _, _| {
                if route.size() < maximum_edges {
                    Step::Extend
                } else {
                    Step::Abort
                }
            },
        )
    }

    /// The 1-to-1 chain through this edge restricted to edges sharing a
    /// road name with it, extended by at most `maximum_extension` edges.
    /// Stops early instead of failing.
    pub fn non_branching_route_with_same_name(&self, maximum_extension: usize) -> Route<'g> {
        let route = walk(
            self,
            |edge, direction, _| NonBranchingNavigator.next(edge, direction),
            |route, candidate, _| {
                if route.size() > maximum_extension || !candidate.shares_road_name_with(self) {
                    Step::Stop
                } else {
                    Step::Extend
                }
            },
        );
        route.unwrap_or_else(|| Route::from_edge(self.clone()))
    }

    /// Greedy walk through unvisited edges accepted by `matcher`, taking
    /// the first match at each end.
    pub fn route_matching<F>(&self, matcher: F) -> Route<'g>
    where
        F: Fn(&Edge<'g>) -> bool,
    {
        let route = walk(
            self,
            |edge, direction, visited| {
                let candidates = match direction {
                    Direction::Out => edge.out_edges_without_reverse().to_vec(),
                    Direction::In => edge.in_edges_without_reverse().to_vec(),
                };
                candidates.into_iter().find(|candidate| {
                    (*candidate == *self || !visited.contains(&candidate.identifier().forward()))
                        && matcher(candidate)
                })
            },
            |_, _, _| Step::Extend,
        );
        route.unwrap_or_else(|| Route::from_edge(self.clone()))
    }

    /// Follows `navigator` at both ends while `limiter` allows.
    pub fn route<N, L>(&self, navigator: N, limiter: L) -> Route<'g>
    where
        N: Navigator,
        L: RouteLimiter,
    {
        let route = walk(
            self,
            |edge, direction, _| navigator.next(edge, direction),
            |route, candidate, direction| {
                if limiter.can_extend(route, candidate, direction) {
                    Step::Extend
                } else {
                    Step::Stop
                }
            },
        );
        route.unwrap_or_else(|| Route::from_edge(self.clone()))
    }
}
