//! Turn angles and turn classification between consecutive edges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::Edge;
use crate::geometry::{Angle, Chirality};
use crate::set::ElementSet;

/// Largest deviation still driven as straight on.
const STRAIGHT: f64 = 20.0;
const SLIGHT: f64 = 45.0;
const NORMAL: f64 = 120.0;
/// Smallest deviation treated as turning back.
const U_TURN: f64 = 170.0;

/// Kind of manoeuvre going from one edge onto the next.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnType {
    Straight,
    SlightRight,
    SlightLeft,
    Right,
    Left,
    SharpRight,
    SharpLeft,
    UTurn,
    /// The edges do not meet.
    Invalid,
}

impl TurnType {
    /// Classifies a smallest-magnitude angle; positive turns right.
    pub fn from_angle(angle: Angle) -> Self {
        let degrees = angle.as_degrees();
        let magnitude = degrees.abs();
        let right = degrees > 0.0;
        if magnitude >= U_TURN {
            TurnType::UTurn
        } else if magnitude <= STRAIGHT {
            TurnType::Straight
        } else if magnitude <= SLIGHT {
            if right { TurnType::SlightRight } else { TurnType::SlightLeft }
        } else if magnitude <= NORMAL {
            if right { TurnType::Right } else { TurnType::Left }
        } else if right {
            TurnType::SharpRight
        } else {
            TurnType::SharpLeft
        }
    }

    pub fn is_right(self) -> bool {
        matches!(
            self,
            TurnType::SlightRight | TurnType::Right | TurnType::SharpRight
        )
    }

    pub fn is_left(self) -> bool {
        matches!(self, TurnType::SlightLeft | TurnType::Left | TurnType::SharpLeft)
    }
}

impl fmt::Display for TurnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TurnType::Straight => "straight",
            TurnType::SlightRight => "slight right",
            TurnType::SlightLeft => "slight left",
            TurnType::Right => "right",
            TurnType::Left => "left",
            TurnType::SharpRight => "sharp right",
            TurnType::SharpLeft => "sharp left",
            TurnType::UTurn => "u-turn",
            TurnType::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

impl<'g> Edge<'g> {
    /// Angle from this edge's final heading to `other`'s initial heading.
    pub fn turn_angle_to(&self, other: &Edge<'_>, chirality: Chirality) -> Angle {
        self.final_heading()
            .difference(other.initial_heading(), chirality)
    }

    /// [`TurnType::Invalid`] unless this edge leads to `other`.
    pub fn turn_type_to(&self, other: &Edge<'_>) -> TurnType {
        if !self.leads_to(other) {
            return TurnType::Invalid;
        }
        TurnType::from_angle(self.turn_angle_to(other, Chirality::Smallest))
    }

    /// The out-edge turning furthest right while staying within
    /// `tolerance` of a right angle.
    pub fn hardest_right_out_edge(&self, tolerance: Angle) -> Option<Edge<'g>> {
        self.hardest_out_edge(Chirality::Clockwise, tolerance)
    }

    /// The out-edge turning furthest left while staying within
    /// `tolerance` of a right angle.
    pub fn hardest_left_out_edge(&self, tolerance: Angle) -> Option<Edge<'g>> {
        self.hardest_out_edge(Chirality::CounterClockwise, tolerance)
    }

    fn hardest_out_edge(&self, chirality: Chirality, tolerance: Angle) -> Option<Edge<'g>> {
        let mut best: Option<(f64, Edge<'g>)> = None;
        for candidate in self.out_edges_without_reverse().to_vec() {
            let angle = self.turn_angle_to(&candidate, chirality).as_degrees();
            if !Angle::degrees(angle - 90.0).is_within(tolerance) {
                continue;
            }
            if best.as_ref().is_none_or(|(kept, _)| angle > *kept) {
                best = Some((angle, candidate));
            }
        }
        best.map(|(_, edge)| edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_magnitude_and_side() {
        assert_eq!(TurnType::from_angle(Angle::degrees(5.0)), TurnType::Straight);
        assert_eq!(TurnType::from_angle(Angle::degrees(-20.0)), TurnType::Straight);
        assert_eq!(TurnType::from_angle(Angle::degrees(30.0)), TurnType::SlightRight);
        assert_eq!(TurnType::from_angle(Angle::degrees(-30.0)), TurnType::SlightLeft);
        assert_eq!(TurnType::from_angle(Angle::degrees(90.0)), TurnType::Right);
        assert_eq!(TurnType::from_angle(Angle::degrees(-90.0)), TurnType::Left);
        assert_eq!(TurnType::from_angle(Angle::degrees(150.0)), TurnType::SharpRight);
        assert_eq!(TurnType::from_angle(Angle::degrees(-150.0)), TurnType::SharpLeft);
        assert_eq!(TurnType::from_angle(Angle::degrees(180.0)), TurnType::UTurn);
        assert_eq!(TurnType::from_angle(Angle::degrees(-175.0)), TurnType::UTurn);
    }

    #[test]
    fn sides() {
        assert!(TurnType::SharpRight.is_right());
        assert!(!TurnType::Straight.is_right());
        assert!(TurnType::SlightLeft.is_left());
        assert!(!TurnType::UTurn.is_left());
    }
}
