//! Attribute value types and the data-specification schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::identifier::{
    EdgeIdentifier, RelationIdentifier, VertexIdentifier, WayIdentifier,
};
use crate::geometry::Speed;

/// The schema a graph was built from. Fixed at graph construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSpecification {
    Osm,
    UniDb,
}

impl DataSpecification {
    /// Whether elements of a graph with this schema carry `attribute`.
    pub fn supports(self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::HighwayTag => self == DataSpecification::Osm,
            Attribute::FormOfWay => self == DataSpecification::UniDb,
            _ => true,
        }
    }
}

impl fmt::Display for DataSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSpecification::Osm => f.write_str("OSM"),
            DataSpecification::UniDb => f.write_str("UniDB"),
        }
    }
}

/// Attributes an element may expose.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    FromVertex,
    ToVertex,
    RoadShape,
    Length,
    RoadNames,
    RoadType,
    RoadSubType,
    FunctionalClass,
    SpeedLimit,
    OneWay,
    LaneCount,
    Tags,
    Relations,
    /// OSM `highway=*` value.
    HighwayTag,
    /// UniDB form of way.
    FormOfWay,
    Location,
    Population,
    PlaceType,
    RelationMembers,
}

/// Road classification, most important first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoadType {
    Freeway,
    UrbanHighway,
    Highway,
    ThroughwayRoad,
    LocalRoad,
    FrontageRoad,
    LowSpeedRoad,
    PrivateRoad,
    Walkway,
    NonNavigable,
    Ferry,
}

impl RoadType {
    /// Larger is more important.
    pub fn importance(self) -> u8 {
        match self {
            RoadType::Freeway => 10,
            RoadType::UrbanHighway => 9,
            RoadType::Highway => 8,
            RoadType::ThroughwayRoad => 7,
            RoadType::LocalRoad => 6,
            RoadType::FrontageRoad => 5,
            RoadType::LowSpeedRoad => 4,
            RoadType::PrivateRoad => 3,
            RoadType::Walkway => 2,
            RoadType::NonNavigable => 1,
            RoadType::Ferry => 0,
        }
    }

    /// Low-speed roads and everything below them.
    pub fn is_low_importance(self) -> bool {
        self.importance() <= RoadType::LowSpeedRoad.importance()
    }

    /// Speed assumed when an edge has no speed limit.
    pub fn default_speed(self) -> Speed {
        let kph = match self {
            RoadType::Freeway => 100.0,
            RoadType::UrbanHighway => 80.0,
            RoadType::Highway => 70.0,
            RoadType::ThroughwayRoad => 60.0,
            RoadType::LocalRoad => 40.0,
            RoadType::FrontageRoad => 40.0,
            RoadType::LowSpeedRoad => 20.0,
            RoadType::PrivateRoad => 15.0,
            RoadType::Walkway => 5.0,
            RoadType::NonNavigable => 5.0,
            RoadType::Ferry => 20.0,
        };
        Speed::kilometers_per_hour(kph)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadSubType {
    MainRoad,
    Ramp,
    ConnectingRoad,
    Roundabout,
    ServiceRoad,
}

/// Functional class, `First` being the most important.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FunctionalClass {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Unknown,
}

impl FunctionalClass {
    /// Larger is more important.
    pub fn importance(self) -> u8 {
        match self {
            FunctionalClass::First => 5,
            FunctionalClass::Second => 4,
            FunctionalClass::Third => 3,
            FunctionalClass::Fourth => 2,
            FunctionalClass::Fifth => 1,
            FunctionalClass::Unknown => 0,
        }
    }
}

/// UniDB form of way.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormOfWay {
    Motorway,
    MultipleCarriageway,
    SingleCarriageway,
    Roundabout,
    SlipRoad,
    ServiceRoad,
    Pedestrian,
    Other,
}

const DIRECTION_WORDS: &[&str] = &[
    "n", "s", "e", "w", "ne", "nw", "se", "sw", "north", "south", "east", "west", "northeast",
    "northwest", "southeast", "southwest", "nb", "sb", "eb", "wb", "northbound", "southbound",
    "eastbound", "westbound",
];

/// A road name as stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoadName(String);

impl RoadName {
    pub fn new(name: impl Into<String>) -> Self {
        RoadName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name with case, punctuation and direction words removed, so that
    /// "Main St N" and "main st southbound" compare equal.
    pub fn base_name(&self) -> String {
        self.0
            .split(|c: char| c.is_whitespace() || c == '-' || c == ',')
            .map(|word| word.trim_matches('.').to_lowercase())
            .filter(|word| !word.is_empty() && !DIRECTION_WORDS.contains(&word.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for RoadName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoadName {
    fn from(name: &str) -> Self {
        RoadName::new(name)
    }
}

/// Key/value tags in store order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<(String, String)>);

impl Tags {
    pub fn new() -> Self {
        Tags(Vec::new())
    }

    /// Value of the first tag named `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Sets `key`, replacing an existing value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for (k, v) in iter {
            tags.insert(k, v);
        }
        tags
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceType {
    City,
    Town,
    Village,
    Hamlet,
    Suburb,
    Locality,
}

/// What a relation describes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    TurnRestriction,
    Route,
    /// Supplier-specific type, kept verbatim.
    Other(String),
}

impl RelationType {
    /// Classifies an OSM/UniDB relation type string.
    pub fn classify(value: &str) -> Self {
        match value {
            "restriction" | "turn_restriction" => RelationType::TurnRestriction,
            "route" => RelationType::Route,
            other => RelationType::Other(other.to_string()),
        }
    }
}

/// Element a relation member points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberReference {
    /// Every section of a source way.
    Way(WayIdentifier),
    Edge(EdgeIdentifier),
    Vertex(VertexIdentifier),
    Relation(RelationIdentifier),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationMember {
    pub reference: MemberReference,
    pub role: String,
}

impl RelationMember {
    pub fn new(reference: MemberReference, role: impl Into<String>) -> Self {
        Self {
            reference,
            role: role.into(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }
}
