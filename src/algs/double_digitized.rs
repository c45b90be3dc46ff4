//! Detection of divided roads digitised as two one-way carriageways.

use crate::config::DoubleDigitizationConfig;
use crate::element::Edge;
use crate::set::ElementSet;

/// Two edges considered together.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgePair<'g> {
    pub first: Edge<'g>,
    pub second: Edge<'g>,
}

impl<'g> EdgePair<'g> {
    pub fn new(first: Edge<'g>, second: Edge<'g>) -> Self {
        Self { first, second }
    }

    /// Larger of the two directed closeness percentages.
    pub fn closeness(&self, config: &DoubleDigitizationConfig) -> f64 {
        let first = self.first.road_shape();
        let second = self.second.road_shape();
        let forward = first.closeness(&second, config.maximum_separation, config.sample_spacing);
        let backward = second.closeness(&first, config.maximum_separation, config.sample_spacing);
        forward.max(backward)
    }

    /// Whether the two edges look like the opposite carriageways of one
    /// road: both one-way, opposite headings, close together over most of
    /// their length, and either sharing a base name or both unnamed.
    pub fn is_double_digitized(&self, config: &DoubleDigitizationConfig) -> bool {
        if !self.is_geometric_candidate(config) {
            return false;
        }
        self.first.shares_road_name_with(&self.second) || self.both_unnamed()
    }

    /// Like [`is_double_digitized`](Self::is_double_digitized), but when the
    /// names do not match the edges must carry the same `ref` tag.
    pub fn is_double_digitized_strict(&self, config: &DoubleDigitizationConfig) -> bool {
        if !self.is_geometric_candidate(config) {
            return false;
        }
        if self.first.shares_road_name_with(&self.second) {
            return true;
        }
        match (self.first.tag_value("ref"), self.second.tag_value("ref")) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    fn both_unnamed(&self) -> bool {
        self.first.road_names().is_empty() && self.second.road_names().is_empty()
    }

    fn is_geometric_candidate(&self, config: &DoubleDigitizationConfig) -> bool {
        let (a, b) = (&self.first, &self.second);
        if a.is_forward_or_reverse_of(b) {
            return false;
        }
        if !a.is_one_way() || !b.is_one_way() || a.is_roundabout() || b.is_roundabout() {
            return false;
        }
        let too_long = |edge: &Edge<'_>| {
            edge.road_type().is_low_importance()
                && edge.length() > config.maximum_low_importance_length
        };
        if too_long(a) || too_long(b) {
            return false;
        }
        if !a.heading().is_opposite(b.heading(), config.heading_tolerance) {
            return false;
        }
        self.closeness(config) >= config.minimum_closeness
    }
}

impl<'g> Edge<'g> {
    /// The closest opposite carriageway of this edge, if any.
    pub fn double_digitized_partner(&self, config: &DoubleDigitizationConfig) -> Option<Edge<'g>> {
        let area = self.bounds().expanded(config.maximum_separation);
        let mut best: Option<(f64, Edge<'g>)> = None;
        for candidate in self.graph().edges_intersecting(&area).iter() {
            let pair = EdgePair::new(self.clone(), candidate);
            if !pair.is_double_digitized(config) {
                continue;
            }
            let closeness = pair.closeness(config);
            if best.as_ref().is_none_or(|(kept, _)| closeness > *kept) {
                best = Some((closeness, pair.second));
            }
        }
        best.map(|(_, edge)| edge)
    }

    pub fn is_double_digitized_with(
        &self,
        other: &Edge<'g>,
        config: &DoubleDigitizationConfig,
    ) -> bool {
        EdgePair::new(self.clone(), other.clone()).is_double_digitized(config)
    }
}
