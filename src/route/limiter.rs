//! Termination policies for route discovery.

use crate::element::Edge;
use crate::geometry::Distance;
use crate::route::{Direction, Route};

/// Decides whether `route` may grow by `candidate` at its `direction` end.
pub trait RouteLimiter {
    fn can_extend(&self, route: &Route<'_>, candidate: &Edge<'_>, direction: Direction) -> bool;
}

impl<L: RouteLimiter + ?Sized> RouteLimiter for &L {
    fn can_extend(&self, route: &Route<'_>, candidate: &Edge<'_>, direction: Direction) -> bool {
        (**self).can_extend(route, candidate, direction)
    }
}

/// At most `maximum` edges in total.
#[derive(Copy, Clone, Debug)]
pub struct EdgeCountLimiter {
    pub maximum: usize,
}

impl EdgeCountLimiter {
    pub fn new(maximum: usize) -> Self {
        Self { maximum }
    }
}

impl RouteLimiter for EdgeCountLimiter {
    fn can_extend(&self, route: &Route<'_>, _: &Edge<'_>, _: Direction) -> bool {
        route.size() < self.maximum
    }
}

/// What to do with the edge that crosses a length threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LengthPolicy {
    /// Refuse it: the route never exceeds the maximum.
    Strict,
    /// Accept it: the route stops after first reaching the maximum.
    Lenient,
}

/// Bounds the cumulative route length.
#[derive(Copy, Clone, Debug)]
pub struct LengthLimiter {
    pub maximum: Distance,
    pub policy: LengthPolicy,
}

impl LengthLimiter {
    pub fn new(maximum: Distance, policy: LengthPolicy) -> Self {
        Self { maximum, policy }
    }
}

impl RouteLimiter for LengthLimiter {
    fn can_extend(&self, route: &Route<'_>, candidate: &Edge<'_>, _: Direction) -> bool {
        match self.policy {
            LengthPolicy::Strict => route.length() + candidate.length() <= self.maximum,
            LengthPolicy::Lenient => route.length() < self.maximum,
        }
    }
}

/// Admits candidates accepted by a closure.
#[derive(Clone)]
pub struct PredicateLimiter<F>(pub F);

impl<F> PredicateLimiter<F>
where
    F: Fn(&Edge<'_>, Direction) -> bool,
{
    pub fn new(predicate: F) -> Self {
        Self(predicate)
    }
}

impl<F> RouteLimiter for PredicateLimiter<F>
where
    F: Fn(&Edge<'_>, Direction) -> bool,
{
    fn can_extend(&self, _: &Route<'_>, candidate: &Edge<'_>, direction: Direction) -> bool {
        (self.0)(candidate, direction)
    }
}

/// Admits a candidate only when both limiters do.
#[derive(Clone, Debug)]
pub struct AllLimiters<A, B>(pub A, pub B);

impl<A: RouteLimiter, B: RouteLimiter> RouteLimiter for AllLimiters<A, B> {
    fn can_extend(&self, route: &Route<'_>, candidate: &Edge<'_>, direction: Direction) -> bool {
        self.0.can_extend(route, candidate, direction)
            && self.1.can_extend(route, candidate, direction)
    }
}
