//! Headings, signed angles and turn chirality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which way round an angular difference is measured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chirality {
    /// Measured turning right, in `[0, 360)`.
    Clockwise,
    /// Measured turning left, in `[0, 360)`.
    CounterClockwise,
    /// Smallest magnitude, in `(-180, 180]`; positive is clockwise.
    Smallest,
}

/// Compass heading in degrees, normalised to `[0, 360)`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heading(f64);

impl Heading {
    pub const NORTH: Heading = Heading(0.0);
    pub const EAST: Heading = Heading(90.0);
    pub const SOUTH: Heading = Heading(180.0);
    pub const WEST: Heading = Heading(270.0);

    #[inline]
    pub fn degrees(degrees: f64) -> Self {
        Heading(normalize(degrees))
    }

    #[inline]
    pub const fn as_degrees(self) -> f64 {
        self.0
    }

    /// The opposite heading.
    pub fn reversed(self) -> Heading {
        Heading::degrees(self.0 + 180.0)
    }

    /// Angle turned going from `self` to `other`.
    pub fn difference(self, other: Heading, chirality: Chirality) -> Angle {
        let clockwise = normalize(other.0 - self.0);
        match chirality {
            Chirality::Clockwise => Angle(clockwise),
            Chirality::CounterClockwise => Angle(normalize(self.0 - other.0)),
            Chirality::Smallest => {
                if clockwise > 180.0 {
                    Angle(clockwise - 360.0)
                } else {
                    Angle(clockwise)
                }
            }
        }
    }

    /// Whether `other` points the other way within `tolerance`.
    pub fn is_opposite(self, other: Heading, tolerance: Angle) -> bool {
        let magnitude = self.difference(other, Chirality::Smallest).abs();
        magnitude.as_degrees() >= 180.0 - tolerance.abs().as_degrees()
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Signed angle in degrees.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    #[inline]
    pub const fn degrees(degrees: f64) -> Self {
        Angle(degrees)
    }

    #[inline]
    pub const fn as_degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn abs(self) -> Angle {
        Angle(self.0.abs())
    }

    #[inline]
    pub fn is_within(self, tolerance: Angle) -> bool {
        self.0.abs() <= tolerance.0.abs()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

#[inline]
fn normalize(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    if d >= 360.0 { 0.0 } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_normalizes() {
        assert_eq!(Heading::degrees(-90.0).as_degrees(), 270.0);
        assert_eq!(Heading::degrees(725.0).as_degrees(), 5.0);
    }

    #[test]
    fn difference_by_chirality() {
        let north = Heading::NORTH;
        let west = Heading::WEST;
        assert_eq!(north.difference(west, Chirality::Clockwise).as_degrees(), 270.0);
        assert_eq!(north.difference(west, Chirality::CounterClockwise).as_degrees(), 90.0);
        assert_eq!(north.difference(west, Chirality::Smallest).as_degrees(), -90.0);
        assert_eq!(north.difference(Heading::EAST, Chirality::Smallest).as_degrees(), 90.0);
        assert_eq!(north.difference(Heading::SOUTH, Chirality::Smallest).as_degrees(), 180.0);
    }

    #[test]
    fn opposite_within_tolerance() {
        let a = Heading::degrees(1.0);
        let b = Heading::degrees(179.0);
        assert!(a.is_opposite(b, Angle::degrees(5.0)));
        assert!(!a.is_opposite(Heading::degrees(120.0), Angle::degrees(5.0)));
    }
}
