//! Classification of short connector routes.

use serde::{Deserialize, Serialize};

use crate::algs::EdgePair;
use crate::config::DoubleDigitizationConfig;
use crate::element::Edge;
use crate::route::Route;
use crate::set::ElementSet;

/// What a short connector route joins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorKind {
    /// Continues one road.
    SameRoad,
    /// Links the two carriageways of a divided road.
    DoubleDigitizedLink,
    /// Joins different roads.
    Junction,
}

impl<'g> Route<'g> {
    /// Edges entering the route's start, excluding route members and their
    /// reverses.
    fn feeding_edges(&self) -> Vec<Edge<'g>> {
        self.first()
            .in_edges_without_reverse()
            .to_vec()
            .into_iter()
            .filter(|edge| !self.contains(edge) && !self.contains_reverse_of(edge))
            .collect()
    }

    /// Edges leaving the route's end, excluding route members and their
    /// reverses.
    fn continuing_edges(&self) -> Vec<Edge<'g>> {
        self.last()
            .out_edges_without_reverse()
            .to_vec()
            .into_iter()
            .filter(|edge| !self.contains(edge) && !self.contains_reverse_of(edge))
            .collect()
    }

    fn contains_reverse_of(&self, edge: &Edge<'_>) -> bool {
        self.iter().any(|member| member.is_reverse_of(edge))
    }

    /// Whether `test` holds for some edge entering the route and some edge
    /// leaving it.
    fn any_crossing_pair<F>(&self, test: F) -> bool
    where
        F: Fn(&Edge<'g>, &Edge<'g>) -> bool,
    {
        let continuing = self.continuing_edges();
        for before in self.feeding_edges() {
            for after in &continuing {
                if test(&before, after) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether an edge entering the route and an edge leaving it belong to
    /// the same way or share a road name.
    pub fn connects_to_same_road(&self) -> bool {
        self.any_crossing_pair(|before, after| {
            before.way() == after.way() || before.shares_road_name_with(after)
        })
    }

    /// Whether the route links the two carriageways of one divided road.
    pub fn connects_two_double_digitized_roads(&self, config: &DoubleDigitizationConfig) -> bool {
        self.any_crossing_pair(|before, after| {
            EdgePair::new(before.clone(), after.clone()).is_double_digitized(config)
        })
    }

    pub fn classify_connector(&self, config: &DoubleDigitizationConfig) -> ConnectorKind {
        if self.connects_two_double_digitized_roads(config) {
            ConnectorKind::DoubleDigitizedLink
        } else if self.connects_to_same_road() {
            ConnectorKind::SameRoad
        } else {
            ConnectorKind::Junction
        }
    }
}
