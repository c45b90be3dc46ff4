//! Tunable limits and heuristic thresholds.
//!
//! Both structs deserialize from partial documents: any field left out keeps
//! its [`Default`] value.

use serde::{Deserialize, Serialize};

use crate::geometry::{Angle, Distance};

/// Capacity guards applied by materialised sets and route construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphLimits {
    /// Cap for a materialised [`EdgeSet`](crate::set::EdgeSet).
    pub maximum_edge_set_size: usize,
    /// Cap for a materialised [`RelationSet`](crate::set::RelationSet).
    pub maximum_relation_set_size: usize,
    /// Largest route `append`/`prepend` will build.
    pub maximum_route_size: usize,
    /// Log one in this many over-cap route appends.
    pub route_warning_interval: u64,
}

impl Default for GraphLimits {
    fn default() -> Self {
        Self {
            maximum_edge_set_size: 100_000,
            maximum_relation_set_size: 10_000,
            maximum_route_size: 100_000,
            route_warning_interval: 1_000,
        }
    }
}

/// Thresholds for detecting the two carriageways of a divided road.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubleDigitizationConfig {
    /// How far from exactly opposite the two headings may be.
    pub heading_tolerance: Angle,
    /// Largest lateral distance between the carriageways.
    pub maximum_separation: Distance,
    /// Percentage of either shape that must lie within `maximum_separation`.
    pub minimum_closeness: f64,
    /// Low-importance roads longer than this are never paired.
    pub maximum_low_importance_length: Distance,
    /// Distance between closeness samples.
    pub sample_spacing: Distance,
}

impl Default for DoubleDigitizationConfig {
    fn default() -> Self {
        Self {
            heading_tolerance: Angle::degrees(30.0),
            maximum_separation: Distance::meters(50.0),
            minimum_closeness: 60.0,
            maximum_low_importance_length: Distance::meters(500.0),
            sample_spacing: Distance::meters(10.0),
        }
    }
}
