//! Turn restrictions resolved from tagged relations.
//!
//! A restriction relation names a `from` member, a `to` member and
//! optionally `via` members: a single vertex or one or more edges/ways.
//! Resolution orients `from` to end at the via point and `to` to start
//! there. Ways are stored in sections, so a via vertex can sit in the
//! interior of a member route; `from` is then cut after the first edge
//! arriving at the via vertex and `to` is cut before the first edge leaving
//! it.
//!
//! Restrictions that cannot be resolved into connected pieces are kept and
//! flagged bad, with whichever members did resolve.

use std::fmt;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::element::attributes::MemberReference;
use crate::element::{Edge, EdgeRelation, Vertex, VertexIdentifier};
use crate::graph::Graph;
use crate::route::Route;
use crate::set::ElementSet;

/// The manoeuvre a restriction tag names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Maneuver {
    LeftTurn,
    RightTurn,
    StraightOn,
    UTurn,
    /// Present but not one of the above, or absent.
    Unspecified,
}

impl Maneuver {
    fn parse(value: &str) -> Self {
        match value {
            "left_turn" => Maneuver::LeftTurn,
            "right_turn" => Maneuver::RightTurn,
            "straight_on" => Maneuver::StraightOn,
            "u_turn" => Maneuver::UTurn,
            _ => Maneuver::Unspecified,
        }
    }
}

/// Whether the manoeuvre is forbidden or the only one allowed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestrictionKind {
    /// `no_*`: this manoeuvre may not be made.
    Prohibited(Maneuver),
    /// `only_*`: this manoeuvre is the only one allowed.
    Mandatory(Maneuver),
}

impl RestrictionKind {
    /// Parses an OSM `restriction` value. Anything that is not `only_*`
    /// is a prohibition.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(value) => match value.strip_prefix("only_") {
                Some(maneuver) => RestrictionKind::Mandatory(Maneuver::parse(maneuver)),
                None => RestrictionKind::Prohibited(Maneuver::parse(
                    value.strip_prefix("no_").unwrap_or(value),
                )),
            },
            None => RestrictionKind::Prohibited(Maneuver::Unspecified),
        }
    }

    pub fn maneuver(self) -> Maneuver {
        match self {
            RestrictionKind::Prohibited(maneuver) | RestrictionKind::Mandatory(maneuver) => {
                maneuver
            }
        }
    }
}

/// Where a restriction's `from` and `to` meet.
#[derive(Clone, Debug)]
pub enum Via<'g> {
    Vertex(Vertex<'g>),
    Route(Route<'g>),
}

/// A restriction relation resolved against the graph.
#[derive(Clone, Debug)]
pub struct TurnRestriction<'g> {
    relation: EdgeRelation<'g>,
    kind: RestrictionKind,
    from: Option<Route<'g>>,
    via: Option<Via<'g>>,
    to: Option<Route<'g>>,
    bad: bool,
}

impl<'g> TurnRestriction<'g> {
    pub fn relation(&self) -> &EdgeRelation<'g> {
        &self.relation
    }

    pub fn kind(&self) -> RestrictionKind {
        self.kind
    }

    pub fn is_prohibition(&self) -> bool {
        matches!(self.kind, RestrictionKind::Prohibited(_))
    }

    /// Oriented to end at the via point.
    pub fn from(&self) -> Option<&Route<'g>> {
        self.from.as_ref()
    }

    pub fn via(&self) -> Option<&Via<'g>> {
        self.via.as_ref()
    }

    /// Oriented to start at the via point.
    pub fn to(&self) -> Option<&Route<'g>> {
        self.to.as_ref()
    }

    /// Whether resolution failed for any part.
    pub fn is_bad(&self) -> bool {
        self.bad
    }

    /// `from`, the via route if any, and `to`, joined end to start.
    pub fn route(&self) -> Option<Route<'g>> {
        let edges = self.restriction_edges()?;
        Route::from_edges(edges).ok()
    }

    /// Whether every edge of the restriction leads to the next.
    pub fn is_valid_osm_turn_restriction(&self) -> bool {
        match self.restriction_edges() {
            Some(edges) => edges.windows(2).all(|pair| pair[0].leads_to(&pair[1])),
            None => false,
        }
    }

    fn restriction_edges(&self) -> Option<Vec<Edge<'g>>> {
        let mut edges = self.from.as_ref()?.edges();
        if let Some(Via::Route(via)) = &self.via {
            edges.extend(via.iter().cloned());
        }
        edges.extend(self.to.as_ref()?.iter().cloned());
        Some(edges)
    }

    /// Whether this restriction forbids turning from `from` straight onto
    /// `to` at a single vertex.
    fn forbids(&self, from: &Edge<'_>, to: &Edge<'_>) -> bool {
        if self.bad || matches!(self.via, Some(Via::Route(_))) {
            return false;
        }
        let (Some(own_from), Some(own_to)) = (&self.from, &self.to) else {
            return false;
        };
        if own_from.last().identifier() != from.identifier() || !from.leads_to(to) {
            return false;
        }
        let onto_own_to = own_to.first().identifier() == to.identifier();
        match self.kind {
            RestrictionKind::Prohibited(_) => onto_own_to,
            RestrictionKind::Mandatory(_) => !onto_own_to,
        }
    }
}

impl fmt::Display for TurnRestriction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |route: &Option<Route<'_>>| match route {
            Some(route) => route.to_string(),
            None => "?".to_string(),
        };
        write!(f, "{} {:?} from {}", self.relation, self.kind, part(&self.from))?;
        match &self.via {
            Some(Via::Vertex(vertex)) => write!(f, " via {vertex}")?,
            Some(Via::Route(route)) => write!(f, " via {route}")?,
            None => {}
        }
        write!(f, " to {}", part(&self.to))?;
        if self.bad {
            f.write_str(" (bad)")?;
        }
        Ok(())
    }
}

/// `route` or its reverse, cut after the first edge arriving at `vertex`.
fn ending_at<'g>(route: &Route<'g>, vertex: VertexIdentifier) -> Option<Route<'g>> {
    route
        .prefix_to(vertex)
        .or_else(|| route.reversed()?.prefix_to(vertex))
}

/// `route` or its reverse, cut before the first edge leaving `vertex`.
fn starting_at<'g>(route: &Route<'g>, vertex: VertexIdentifier) -> Option<Route<'g>> {
    route
        .suffix_from(vertex)
        .or_else(|| route.reversed()?.suffix_from(vertex))
}

/// `route`, then its reverse when it has one.
fn orientations<'g>(route: &Route<'g>) -> Vec<Route<'g>> {
    std::iter::once(route.clone()).chain(route.reversed()).collect()
}

impl<'g> EdgeRelation<'g> {
    /// Resolves this relation as a turn restriction; `None` when it is of
    /// another type.
    pub fn turn_restriction(&self) -> Option<TurnRestriction<'g>> {
        if !self.is_turn_restriction() {
            return None;
        }
        let graph = self.graph();
        let member_route = |role: &str| {
            self.members_with_role(role)
                .first()
                .and_then(|member| self.member_route(member))
        };
        let from = member_route("from");
        let to = member_route("to");
        let via_members = self.members_with_role("via");
        let kind = RestrictionKind::parse(self.tag_value("restriction").as_deref());

        let via_vertex = via_members.iter().find_map(|member| match member.reference {
            MemberReference::Vertex(vertex) => Some(vertex),
            _ => None,
        });
        let via_routes: Vec<Option<Route<'g>>> = via_members
            .iter()
            .filter(|member| {
                matches!(
                    member.reference,
                    MemberReference::Edge(_) | MemberReference::Way(_)
                )
            })
            .map(|member| self.member_route(member))
            .collect();

        let restriction = if let Some(vertex) = via_vertex {
            self.resolve_vertex_via(graph, kind, from, vertex, to)
        } else if !via_routes.is_empty() {
            self.resolve_route_via(kind, from, via_routes, to)
        } else {
            self.resolve_direct(kind, from, to)
        };
        if restriction.bad {
            debug!("bad turn restriction {restriction}");
        }
        Some(restriction)
    }

    fn resolve_vertex_via(
        &self,
        graph: &'g Graph,
        kind: RestrictionKind,
        from: Option<Route<'g>>,
        vertex: VertexIdentifier,
        to: Option<Route<'g>>,
    ) -> TurnRestriction<'g> {
        let via = graph.vertex_for_identifier(vertex);
        let oriented_from = from.as_ref().and_then(|route| ending_at(route, vertex));
        let oriented_to = to.as_ref().and_then(|route| starting_at(route, vertex));
        let bad = via.is_none() || oriented_from.is_none() || oriented_to.is_none();
        TurnRestriction {
            relation: self.clone(),
            kind,
            from: oriented_from.or(from),
            via: via.map(Via::Vertex),
            to: oriented_to.or(to),
            bad,
        }
    }

    fn resolve_route_via(
        &self,
        kind: RestrictionKind,
        from: Option<Route<'g>>,
        via_routes: Vec<Option<Route<'g>>>,
        to: Option<Route<'g>>,
    ) -> TurnRestriction<'g> {
        let via = via_routes
            .into_iter()
            .try_fold(None::<Route<'g>>, |joined, next| {
                let next = next?;
                match joined {
                    None => Some(Some(next)),
                    Some(joined) => joined.connect(&next).map(Some),
                }
            })
            .flatten();
        if let (Some(via), Some(from_route), Some(to_route)) = (&via, &from, &to) {
            for via in orientations(via) {
                let oriented_from = ending_at(from_route, via.start().identifier());
                let oriented_to = starting_at(to_route, via.end().identifier());
                if let (Some(oriented_from), Some(oriented_to)) = (oriented_from, oriented_to) {
                    return TurnRestriction {
                        relation: self.clone(),
                        kind,
                        from: Some(oriented_from),
                        via: Some(Via::Route(via)),
                        to: Some(oriented_to),
                        bad: false,
                    };
                }
            }
        }
        TurnRestriction {
            relation: self.clone(),
            kind,
            from,
            via: via.map(Via::Route),
            to,
            bad: true,
        }
    }

    /// No via member: `from` and `to` must meet directly.
    fn resolve_direct(
        &self,
        kind: RestrictionKind,
        from: Option<Route<'g>>,
        to: Option<Route<'g>>,
    ) -> TurnRestriction<'g> {
        let meeting = match (&from, &to) {
            (Some(from), Some(to)) => orientations(from)
                .into_iter()
                .cartesian_product(orientations(to))
                .find(|(from, to)| from.leads_to(to)),
            _ => None,
        };
        match meeting {
            Some((from, to)) => TurnRestriction {
                relation: self.clone(),
                kind,
                via: Some(Via::Vertex(from.end())),
                from: Some(from),
                to: Some(to),
                bad: false,
            },
            None => TurnRestriction {
                relation: self.clone(),
                kind,
                from,
                via: None,
                to,
                bad: true,
            },
        }
    }
}

impl Graph {
    /// Every turn-restriction relation, resolved. Bad restrictions are
    /// included.
    pub fn turn_restrictions(&self) -> Vec<TurnRestriction<'_>> {
        self.relations()
            .filter_map(|relation| relation.turn_restriction())
            .collect()
    }
}

impl<'g> Edge<'g> {
    /// Whether a vertex-via restriction on this edge forbids turning onto
    /// `other`. A mandatory restriction forbids every other turn at its via
    /// vertex.
    pub fn is_turn_restricted_to(&self, other: &Edge<'_>) -> bool {
        self.relations()
            .turn_restrictions()
            .iter()
            .filter_map(|relation| relation.turn_restriction())
            .any(|restriction| restriction.forbids(self, other))
    }
}
