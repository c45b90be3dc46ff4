//! Materialised relation sets.

use std::fmt;

use crate::element::EdgeRelation;
use crate::element::attributes::RelationType;
use crate::set::{CappedSet, ElementSet, SetAlgebra, Subset};

/// A capped, insertion-ordered set of relations.
#[derive(Clone)]
pub struct RelationSet<'g> {
    members: CappedSet<EdgeRelation<'g>>,
}

impl<'g> RelationSet<'g> {
    pub fn new(maximum_size: usize) -> Self {
        Self {
            members: CappedSet::new(maximum_size),
        }
    }

    pub fn add(&mut self, relation: EdgeRelation<'g>) -> bool {
        self.members.add(relation)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn maximum_size(&self) -> usize {
        self.members.maximum_size()
    }

    /// Members of the given type, as a lazy view.
    pub fn of_type(
        &self,
        relation_type: RelationType,
    ) -> Subset<&Self, impl Fn(&EdgeRelation<'g>) -> bool + use<'g>> {
        self.matching(move |relation| relation.relation_type() == relation_type)
    }

    /// Turn-restriction members, as a lazy view.
    pub fn turn_restrictions(&self) -> Subset<&Self, impl Fn(&EdgeRelation<'g>) -> bool + use<'g>> {
        self.of_type(RelationType::TurnRestriction)
    }
}

impl<'g> ElementSet for RelationSet<'g> {
    type Item = EdgeRelation<'g>;

    fn iter(&self) -> Box<dyn Iterator<Item = EdgeRelation<'g>> + '_> {
        self.members.iter()
    }

    fn contains(&self, relation: &EdgeRelation<'g>) -> bool {
        self.members.contains(relation)
    }

    fn count(&self) -> usize {
        self.members.len()
    }

    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'g> Extend<EdgeRelation<'g>> for RelationSet<'g> {
    fn extend<I: IntoIterator<Item = EdgeRelation<'g>>>(&mut self, iter: I) {
        self.members.add_all(iter);
    }
}

impl fmt::Debug for RelationSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.members, f)
    }
}
