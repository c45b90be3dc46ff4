//! Geographic primitives used by edge shapes and the topology algorithms.
//!
//! Distances are stored in whole millimetres so that route offsets and
//! aggregated lengths add up exactly. Great-circle distance uses the
//! haversine formula; short point-to-segment distances use a local
//! equirectangular projection, which is accurate to well under a metre at
//! road-junction scale.

pub mod angle;
pub mod polyline;

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use angle::{Angle, Chirality, Heading};
pub use polyline::Polyline;

/// Mean earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Metres per degree of latitude.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// A non-negative length, stored in millimetres.
#[derive(
    Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Distance {
    millimeters: u64,
}

impl Distance {
    pub const ZERO: Distance = Distance { millimeters: 0 };
    pub const MAXIMUM: Distance = Distance {
        millimeters: u64::MAX,
    };

    #[inline]
    pub const fn millimeters(millimeters: u64) -> Self {
        Self { millimeters }
    }

    /// Negative and NaN inputs clamp to zero.
    #[inline]
    pub fn meters(meters: f64) -> Self {
        let mm = (meters * 1000.0).round();
        Self {
            millimeters: if mm.is_nan() || mm <= 0.0 { 0 } else { mm as u64 },
        }
    }

    #[inline]
    pub fn kilometers(kilometers: f64) -> Self {
        Self::meters(kilometers * 1000.0)
    }

    #[inline]
    pub const fn as_millimeters(self) -> u64 {
        self.millimeters
    }

    #[inline]
    pub fn as_meters(self) -> f64 {
        self.millimeters as f64 / 1000.0
    }
}

impl Add for Distance {
    type Output = Distance;
    fn add(self, rhs: Distance) -> Distance {
        Distance::millimeters(self.millimeters.saturating_add(rhs.millimeters))
    }
}

/// Saturates at zero.
impl Sub for Distance {
    type Output = Distance;
    fn sub(self, rhs: Distance) -> Distance {
        Distance::millimeters(self.millimeters.saturating_sub(rhs.millimeters))
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Distance {
        iter.fold(Distance::ZERO, Add::add)
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({}mm)", self.millimeters)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}m", self.as_meters())
    }
}

/// Travel speed in kilometres per hour.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speed {
    kilometers_per_hour: f64,
}

impl Speed {
    #[inline]
    pub const fn kilometers_per_hour(kilometers_per_hour: f64) -> Self {
        Self {
            kilometers_per_hour,
        }
    }

    #[inline]
    pub const fn as_kilometers_per_hour(self) -> f64 {
        self.kilometers_per_hour
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.kilometers_per_hour > 0.0
    }

    /// Time needed to cover `distance`; zero for a non-positive speed.
    pub fn travel_time(self, distance: Distance) -> Duration {
        if !self.is_positive() {
            return Duration::ZERO;
        }
        let meters_per_second = self.kilometers_per_hour / 3.6;
        Duration::from_secs_f64(distance.as_meters() / meters_per_second)
    }
}

/// A point on the earth in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[inline]
    pub const fn degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance to `other`.
    pub fn distance_to(&self, other: &Location) -> Distance {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Distance::meters(EARTH_RADIUS_M * c)
    }

    /// Initial great-circle bearing towards `other`.
    pub fn heading_to(&self, other: &Location) -> Heading {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
        Heading::degrees(y.atan2(x).to_degrees())
    }

    /// Location `distance` away along `heading`, on a local flat-earth approximation.
    pub fn moved(&self, heading: Heading, distance: Distance) -> Location {
        let meters = distance.as_meters();
        let radians = heading.as_degrees().to_radians();
        let north = meters * radians.cos();
        let east = meters * radians.sin();
        Location::degrees(
            self.latitude + north / METERS_PER_DEGREE,
            self.longitude + east / (METERS_PER_DEGREE * self.latitude.to_radians().cos()),
        )
    }

    /// Projects onto a plane tangent at `origin_latitude`, in metres.
    #[inline]
    pub(crate) fn project(&self, origin_latitude: f64) -> (f64, f64) {
        let x = self.longitude * METERS_PER_DEGREE * origin_latitude.to_radians().cos();
        let y = self.latitude * METERS_PER_DEGREE;
        (x, y)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.7},{:.7}", self.latitude, self.longitude)
    }
}

/// Axis-aligned latitude/longitude bounds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub bottom_left: Location,
    pub top_right: Location,
}

impl Rectangle {
    /// Smallest rectangle containing both corners, in any order.
    pub fn from_locations(a: Location, b: Location) -> Self {
        Self {
            bottom_left: Location::degrees(
                a.latitude.min(b.latitude),
                a.longitude.min(b.longitude),
            ),
            top_right: Location::degrees(a.latitude.max(b.latitude), a.longitude.max(b.longitude)),
        }
    }

    /// Bounds of `locations`, or `None` when empty.
    pub fn bounding<'a, I>(locations: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Location>,
    {
        let mut iter = locations.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Rectangle::from_locations(first, first), |r, l| {
            r.including(*l)
        }))
    }

    pub fn including(&self, location: Location) -> Self {
        Rectangle::from_locations(
            Location::degrees(
                self.bottom_left.latitude.min(location.latitude),
                self.bottom_left.longitude.min(location.longitude),
            ),
            Location::degrees(
                self.top_right.latitude.max(location.latitude),
                self.top_right.longitude.max(location.longitude),
            ),
        )
    }

    pub fn union(&self, other: &Rectangle) -> Self {
        self.including(other.bottom_left).including(other.top_right)
    }

    pub fn contains(&self, location: &Location) -> bool {
        location.latitude >= self.bottom_left.latitude
            && location.latitude <= self.top_right.latitude
            && location.longitude >= self.bottom_left.longitude
            && location.longitude <= self.top_right.longitude
    }

    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.bottom_left.latitude <= other.top_right.latitude
            && other.bottom_left.latitude <= self.top_right.latitude
            && self.bottom_left.longitude <= other.top_right.longitude
            && other.bottom_left.longitude <= self.top_right.longitude
    }

    /// Grows every side by `distance`.
    pub fn expanded(&self, distance: Distance) -> Self {
        let meters = distance.as_meters();
        let center_latitude = (self.bottom_left.latitude + self.top_right.latitude) / 2.0;
        let delta_lat = meters / METERS_PER_DEGREE;
        let delta_lon = meters / (METERS_PER_DEGREE * center_latitude.to_radians().cos());
        Rectangle {
            bottom_left: Location::degrees(
                self.bottom_left.latitude - delta_lat,
                self.bottom_left.longitude - delta_lon,
            ),
            top_right: Location::degrees(
                self.top_right.latitude + delta_lat,
                self.top_right.longitude + delta_lon,
            ),
        }
    }
}
