//! Edge relation handles: ordered member lists over ways, edges, vertices and
//! other relations.

use crate::element::attributes::{MemberReference, RelationMember, RelationType, Tags};
use crate::element::heavy::HeavyweightRelation;
use crate::element::identifier::{ElementIndex, RelationIdentifier};
use crate::element::{ElementKind, Flyweight, GraphElement, element_identity};
use crate::graph::Graph;
use crate::route::Route;
use crate::set::EdgeSet;

#[derive(Clone)]
pub struct EdgeRelation<'g> {
    graph: &'g Graph,
    flyweight: Flyweight<RelationIdentifier>,
}

element_identity!(EdgeRelation);

impl<'g> EdgeRelation<'g> {
    pub(crate) fn new(graph: &'g Graph, identifier: RelationIdentifier) -> Self {
        Self {
            graph,
            flyweight: Flyweight::from_identifier(identifier),
        }
    }

    pub(crate) fn from_index(graph: &'g Graph, index: ElementIndex) -> Self {
        Self {
            graph,
            flyweight: Flyweight::from_index(index),
        }
    }

    pub(crate) fn resolved(
        graph: &'g Graph,
        identifier: RelationIdentifier,
        index: ElementIndex,
    ) -> Self {
        Self {
            graph,
            flyweight: Flyweight::resolved(identifier, index),
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn identifier(&self) -> RelationIdentifier {
        self.flyweight
            .identifier(|index| self.graph.store().relation_identifier(index))
    }

    pub fn index(&self) -> ElementIndex {
        self.flyweight.index(|identifier| {
            self.graph
                .store()
                .relation_index(identifier)
                .unwrap_or_else(|| {
                    panic!("relation {identifier} is not in graph {:?}", self.graph.name())
                })
        })
    }

    /// Classified from the stored type, or from the `type` tag when the
    /// store has none.
    pub fn relation_type(&self) -> RelationType {
        match self.graph.store().relation_type(self.index()) {
            Some(value) => RelationType::classify(&value),
            None => RelationType::classify(self.tags().value("type").unwrap_or_default()),
        }
    }

    pub fn is_turn_restriction(&self) -> bool {
        self.relation_type() == RelationType::TurnRestriction
    }

    pub fn members(&self) -> Vec<RelationMember> {
        self.graph.store().relation_members(self.index())
    }

    /// Members with `role`, in member order.
    pub fn members_with_role(&self, role: &str) -> Vec<RelationMember> {
        self.members()
            .into_iter()
            .filter(|member| member.has_role(role))
            .collect()
    }

    pub fn tags(&self) -> Tags {
        self.graph.store().relation_tags(self.index())
    }

    pub fn tag_value(&self, key: &str) -> Option<String> {
        self.tags().value(key).map(str::to_string)
    }

    pub fn to_heavyweight(&self) -> HeavyweightRelation {
        HeavyweightRelation {
            identifier: self.identifier(),
            relation_type: self.graph.store().relation_type(self.index()),
            members: self.members(),
            tags: self.tags(),
        }
    }

    /// Every edge named by an edge or way member. Way members contribute
    /// all their sections, in forward direction.
    pub fn edges(&self) -> EdgeSet<'g> {
        let mut set = EdgeSet::new(self.graph.limits().maximum_edge_set_size);
        for member in self.members() {
            match member.reference {
                MemberReference::Edge(identifier) => {
                    if let Some(edge) = self.graph.edge_for_identifier(identifier) {
                        set.add(edge);
                    }
                }
                MemberReference::Way(way) => {
                    for edge in self.graph.way_edges(way) {
                        set.add(edge);
                    }
                }
                MemberReference::Vertex(_) | MemberReference::Relation(_) => {}
            }
        }
        set
    }

    /// The route a member resolves to, if it names an edge or a way present
    /// in the graph.
    pub(crate) fn member_route(&self, member: &RelationMember) -> Option<Route<'g>> {
        match member.reference {
            MemberReference::Edge(identifier) => {
                self.graph.edge_for_identifier(identifier).map(Route::from_edge)
            }
            MemberReference::Way(way) => self.graph.route_for_way(way),
            MemberReference::Vertex(_) | MemberReference::Relation(_) => None,
        }
    }

    /// Edge and way members joined in member order, each oriented to
    /// continue the previous one. `None` when there are no such members or
    /// two consecutive members do not meet.
    pub fn as_route(&self) -> Option<Route<'g>> {
        let mut routes = self
            .members()
            .into_iter()
            .filter(|member| {
                matches!(
                    member.reference,
                    MemberReference::Edge(_) | MemberReference::Way(_)
                )
            })
            .map(|member| self.member_route(&member));
        let mut route = routes.next()??;
        for next in routes {
            route = route.connect(&next?)?;
        }
        Some(route)
    }
}

impl<'g> GraphElement<'g> for EdgeRelation<'g> {
    type Identifier = RelationIdentifier;

    const KIND: ElementKind = ElementKind::Relation;

    fn graph(&self) -> &'g Graph {
        self.graph
    }

    fn identifier(&self) -> RelationIdentifier {
        EdgeRelation::identifier(self)
    }

    fn index(&self) -> ElementIndex {
        EdgeRelation::index(self)
    }

    fn identifier_as_long(&self) -> i64 {
        EdgeRelation::identifier(self).get()
    }
}
