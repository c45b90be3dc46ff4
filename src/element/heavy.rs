//! Heavyweight elements: detached, fully materialised and mutable copies.
//!
//! These are what a [`GraphBuilder`](crate::graph::GraphBuilder) consumes and
//! what `to_heavyweight()` on a handle produces. Once created they have no
//! link to any graph.

use serde::{Deserialize, Serialize};

use crate::element::attributes::{
    FormOfWay, FunctionalClass, PlaceType, RelationMember, RoadName, RoadSubType, RoadType, Tags,
};
use crate::element::identifier::{
    EdgeIdentifier, PlaceIdentifier, RelationIdentifier, VertexIdentifier,
};
use crate::geometry::{Distance, Location, Polyline, Speed};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeavyweightEdge {
    pub identifier: EdgeIdentifier,
    pub from: VertexIdentifier,
    pub to: VertexIdentifier,
    pub shape: Polyline,
    /// Falls back to the shape length when absent.
    pub length: Option<Distance>,
    pub names: Vec<RoadName>,
    pub road_type: RoadType,
    pub sub_type: RoadSubType,
    pub functional_class: FunctionalClass,
    pub speed_limit: Option<Speed>,
    pub one_way: bool,
    pub lane_count: Option<u8>,
    pub form_of_way: Option<FormOfWay>,
    pub tags: Tags,
}

impl HeavyweightEdge {
    /// A two-way local road with no names or tags.
    pub fn new(
        identifier: EdgeIdentifier,
        from: VertexIdentifier,
        to: VertexIdentifier,
        shape: Polyline,
    ) -> Self {
        Self {
            identifier,
            from,
            to,
            shape,
            length: None,
            names: Vec::new(),
            road_type: RoadType::LocalRoad,
            sub_type: RoadSubType::MainRoad,
            functional_class: FunctionalClass::Fifth,
            speed_limit: None,
            one_way: false,
            lane_count: None,
            form_of_way: None,
            tags: Tags::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<RoadName>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn with_road_type(mut self, road_type: RoadType) -> Self {
        self.road_type = road_type;
        self
    }

    pub fn with_sub_type(mut self, sub_type: RoadSubType) -> Self {
        self.sub_type = sub_type;
        self
    }

    pub fn with_functional_class(mut self, functional_class: FunctionalClass) -> Self {
        self.functional_class = functional_class;
        self
    }

    pub fn with_speed_limit(mut self, speed: Speed) -> Self {
        self.speed_limit = Some(speed);
        self
    }

    pub fn with_length(mut self, length: Distance) -> Self {
        self.length = Some(length);
        self
    }

    pub fn one_way(mut self) -> Self {
        self.one_way = true;
        self
    }

    pub fn with_lane_count(mut self, lanes: u8) -> Self {
        self.lane_count = Some(lanes);
        self
    }

    pub fn with_form_of_way(mut self, form_of_way: FormOfWay) -> Self {
        self.form_of_way = Some(form_of_way);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }

    /// Stored length, or the shape's when none was given.
    pub fn effective_length(&self) -> Distance {
        self.length.unwrap_or_else(|| self.shape.length())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeavyweightVertex {
    pub identifier: VertexIdentifier,
    pub location: Location,
    pub tags: Tags,
}

impl HeavyweightVertex {
    pub fn new(identifier: VertexIdentifier, location: Location) -> Self {
        Self {
            identifier,
            location,
            tags: Tags::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeavyweightRelation {
    pub identifier: RelationIdentifier,
    /// Type recorded by the source data; the `type` tag is used when absent.
    pub relation_type: Option<String>,
    pub members: Vec<RelationMember>,
    pub tags: Tags,
}

impl HeavyweightRelation {
    pub fn new(identifier: RelationIdentifier) -> Self {
        Self {
            identifier,
            relation_type: None,
            members: Vec::new(),
            tags: Tags::new(),
        }
    }

    pub fn with_type(mut self, relation_type: impl Into<String>) -> Self {
        self.relation_type = Some(relation_type.into());
        self
    }

    pub fn with_member(mut self, member: RelationMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeavyweightPlace {
    pub identifier: PlaceIdentifier,
    pub location: Location,
    pub name: Option<String>,
    pub population: Option<u64>,
    pub place_type: PlaceType,
}

impl HeavyweightPlace {
    pub fn new(identifier: PlaceIdentifier, location: Location, place_type: PlaceType) -> Self {
        Self {
            identifier,
            location,
            name: None,
            population: None,
            place_type,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Heading;

    #[test]
    fn effective_length_prefers_stored_value() {
        let a = Location::degrees(10.0, 10.0);
        let b = a.moved(Heading::EAST, Distance::meters(100.0));
        let edge = HeavyweightEdge::new(
            EdgeIdentifier::new(1_000_001),
            VertexIdentifier::new(1),
            VertexIdentifier::new(2),
            Polyline::segment(a, b),
        );
        assert!((edge.effective_length().as_meters() - 100.0).abs() < 1.0);
        let edge = edge.with_length(Distance::meters(250.0));
        assert_eq!(edge.effective_length(), Distance::meters(250.0));
    }

    #[test]
    fn builder_methods_set_fields() {
        let edge = HeavyweightEdge::new(
            EdgeIdentifier::new(1_000_001),
            VertexIdentifier::new(1),
            VertexIdentifier::new(2),
            Polyline::new(Vec::new()),
        )
        .with_name("Main St")
        .one_way()
        .with_tag("ref", "US 1");
        assert!(edge.one_way);
        assert_eq!(edge.names, vec![RoadName::new("Main St")]);
        assert_eq!(edge.tags.value("ref"), Some("US 1"));
    }
}
