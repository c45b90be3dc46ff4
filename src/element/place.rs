//! Place handles: named points (cities, towns, ...) independent of the road topology.

use crate::element::attributes::PlaceType;
use crate::element::heavy::HeavyweightPlace;
use crate::element::identifier::{ElementIndex, PlaceIdentifier};
use crate::element::{ElementKind, Flyweight, GraphElement, element_identity};
use crate::geometry::Location;
use crate::graph::Graph;

#[derive(Clone)]
pub struct Place<'g> {
    graph: &'g Graph,
    flyweight: Flyweight<PlaceIdentifier>,
}

element_identity!(Place);

impl<'g> Place<'g> {
    pub(crate) fn from_index(graph: &'g Graph, index: ElementIndex) -> Self {
        Self {
            graph,
            flyweight: Flyweight::from_index(index),
        }
    }

    pub(crate) fn resolved(
        graph: &'g Graph,
        identifier: PlaceIdentifier,
        index: ElementIndex,
    ) -> Self {
        Self {
            graph,
            flyweight: Flyweight::resolved(identifier, index),
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn identifier(&self) -> PlaceIdentifier {
        self.flyweight
            .identifier(|index| self.graph.store().place_identifier(index))
    }

    pub fn index(&self) -> ElementIndex {
        self.flyweight.index(|identifier| {
            self.graph
                .store()
                .place_index(identifier)
                .unwrap_or_else(|| {
                    panic!("place {identifier} is not in graph {:?}", self.graph.name())
                })
        })
    }

    pub fn location(&self) -> Location {
        self.graph.store().place_location(self.index())
    }

    pub fn name(&self) -> Option<String> {
        self.graph.store().place_name(self.index())
    }

    pub fn population(&self) -> Option<u64> {
        self.graph.store().place_population(self.index())
    }

    pub fn place_type(&self) -> PlaceType {
        self.graph.store().place_type(self.index())
    }

    pub fn to_heavyweight(&self) -> HeavyweightPlace {
        HeavyweightPlace {
            identifier: self.identifier(),
            location: self.location(),
            name: self.name(),
            population: self.population(),
            place_type: self.place_type(),
        }
    }
}

impl<'g> GraphElement<'g> for Place<'g> {
    type Identifier = PlaceIdentifier;

    const KIND: ElementKind = ElementKind::Place;

    fn graph(&self) -> &'g Graph {
        self.graph
    }

    fn identifier(&self) -> PlaceIdentifier {
        Place::identifier(self)
    }

    fn index(&self) -> ElementIndex {
        Place::index(self)
    }

    fn identifier_as_long(&self) -> i64 {
        Place::identifier(self).get()
    }
}
