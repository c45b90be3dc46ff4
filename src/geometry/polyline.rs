//! Road shapes.

use serde::{Deserialize, Serialize};

use super::{Distance, Heading, Location, Rectangle};

/// An ordered sequence of locations describing a road's shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    locations: Vec<Location>,
}

impl Polyline {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// Straight segment from `from` to `to`.
    pub fn segment(from: Location, to: Location) -> Self {
        Self {
            locations: vec![from, to],
        }
    }

    #[inline]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn start(&self) -> Option<Location> {
        self.locations.first().copied()
    }

    pub fn end(&self) -> Option<Location> {
        self.locations.last().copied()
    }

    pub fn length(&self) -> Distance {
        self.locations
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    /// Heading of the first segment; north for a degenerate shape.
    pub fn initial_heading(&self) -> Heading {
        match self.locations.as_slice() {
            [a, b, ..] => a.heading_to(b),
            _ => Heading::NORTH,
        }
    }

    /// Heading of the last segment; north for a degenerate shape.
    pub fn final_heading(&self) -> Heading {
        match self.locations.as_slice() {
            [.., a, b] => a.heading_to(b),
            _ => Heading::NORTH,
        }
    }

    /// Heading from the first to the last location.
    pub fn heading(&self) -> Heading {
        match (self.locations.first(), self.locations.last()) {
            (Some(a), Some(b)) if self.locations.len() > 1 => a.heading_to(b),
            _ => Heading::NORTH,
        }
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        Rectangle::bounding(&self.locations)
    }

    pub fn reversed(&self) -> Polyline {
        let mut locations = self.locations.clone();
        locations.reverse();
        Polyline { locations }
    }

    /// Appends `other`, dropping its first location when it repeats our last one.
    pub fn joined(&self, other: &Polyline) -> Polyline {
        let mut locations = self.locations.clone();
        let skip = match (locations.last(), other.locations.first()) {
            (Some(a), Some(b)) if a == b => 1,
            _ => 0,
        };
        locations.extend(other.locations.iter().skip(skip).copied());
        Polyline { locations }
    }

    /// Shortest distance from `location` to any segment of this shape.
    pub fn distance_to(&self, location: &Location) -> Distance {
        match self.locations.as_slice() {
            [] => Distance::MAXIMUM,
            [only] => only.distance_to(location),
            segments => segments
                .windows(2)
                .map(|pair| segment_distance(&pair[0], &pair[1], location))
                .min()
                .unwrap_or(Distance::MAXIMUM),
        }
    }

    /// Percentage (0-100) of this shape lying within `max_separation` of `other`.
    ///
    /// The shape is sampled every `spacing` along its length (every vertex is
    /// sampled too) and each sample is tested against `other`.
    pub fn closeness(&self, other: &Polyline, max_separation: Distance, spacing: Distance) -> f64 {
        let samples = self.samples(spacing);
        if samples.is_empty() {
            return 0.0;
        }
        let close = samples
            .iter()
            .filter(|sample| other.distance_to(sample) <= max_separation)
            .count();
        close as f64 * 100.0 / samples.len() as f64
    }

    fn samples(&self, spacing: Distance) -> Vec<Location> {
        let mut samples = Vec::new();
        let step = spacing.as_meters();
        for pair in self.locations.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            samples.push(a);
            let length = a.distance_to(&b).as_meters();
            if step <= 0.0 || length <= step {
                continue;
            }
            let count = (length / step).floor() as usize;
            for i in 1..=count {
                let t = (i as f64 * step) / length;
                if t >= 1.0 {
                    break;
                }
                samples.push(Location::degrees(
                    a.latitude + (b.latitude - a.latitude) * t,
                    a.longitude + (b.longitude - a.longitude) * t,
                ));
            }
        }
        if let Some(last) = self.locations.last() {
            samples.push(*last);
        }
        samples
    }
}

impl From<Vec<Location>> for Polyline {
    fn from(locations: Vec<Location>) -> Self {
        Polyline::new(locations)
    }
}

fn segment_distance(a: &Location, b: &Location, p: &Location) -> Distance {
    let origin = (a.latitude + b.latitude + p.latitude) / 3.0;
    let (ax, ay) = a.project(origin);
    let (bx, by) = b.project(origin);
    let (px, py) = p.project(origin);
    let (dx, dy) = (bx - ax, by - ay);
    let length_squared = dx * dx + dy * dy;
    let t = if length_squared == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / length_squared).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    Distance::meters(((px - cx).powi(2) + (py - cy).powi(2)).sqrt())
}
