//! Vertex handles. A vertex's store index is its identifier, so a vertex
//! handle needs no lazy resolution.

use crate::element::attributes::Tags;
use crate::element::heavy::HeavyweightVertex;
use crate::element::identifier::{ElementIndex, VertexIdentifier};
use crate::element::{ElementKind, GraphElement, element_identity};
use crate::geometry::Location;
use crate::graph::Graph;
use crate::set::{EdgeSet, EdgeSetExt, SetAlgebra};

#[derive(Clone)]
pub struct Vertex<'g> {
    graph: &'g Graph,
    identifier: VertexIdentifier,
}

element_identity!(Vertex);

impl<'g> Vertex<'g> {
    pub(crate) fn new(graph: &'g Graph, identifier: VertexIdentifier) -> Self {
        Self { graph, identifier }
    }

    #[inline]
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    #[inline]
    pub fn identifier(&self) -> VertexIdentifier {
        self.identifier
    }

    #[inline]
    pub fn index(&self) -> ElementIndex {
        self.identifier
            .as_index()
            .unwrap_or_else(|error| panic!("vertex handle with unusable identifier: {error}"))
    }

    pub fn location(&self) -> Location {
        self.graph.store().vertex_location(self.index())
    }

    pub fn tags(&self) -> Tags {
        self.graph.store().vertex_tags(self.index())
    }

    pub fn to_heavyweight(&self) -> HeavyweightVertex {
        HeavyweightVertex {
            identifier: self.identifier,
            location: self.location(),
            tags: self.tags(),
        }
    }

    /// Edges arriving at this vertex, reverse edges of two-way roads included.
    pub fn in_edges(&self) -> EdgeSet<'g> {
        let mut set = EdgeSet::new(self.graph.limits().maximum_edge_set_size);
        for identifier in self.graph.store().vertex_edges(self.index()) {
            let edge = self.graph.edge_unchecked(identifier);
            if edge.to_vertex_identifier() == self.identifier {
                set.add(edge.clone());
            }
            if edge.from_vertex_identifier() == self.identifier {
                if let Some(reverse) = edge.reversed() {
                    set.add(reverse);
                }
            }
        }
        set
    }

    /// Edges leaving this vertex, reverse edges of two-way roads included.
    pub fn out_edges(&self) -> EdgeSet<'g> {
        let mut set = EdgeSet::new(self.graph.limits().maximum_edge_set_size);
        for identifier in self.graph.store().vertex_edges(self.index()) {
            let edge = self.graph.edge_unchecked(identifier);
            if edge.from_vertex_identifier() == self.identifier {
                set.add(edge.clone());
            }
            if edge.to_vertex_identifier() == self.identifier {
                if let Some(reverse) = edge.reversed() {
                    set.add(reverse);
                }
            }
        }
        set
    }

    /// In- and out-edges.
    pub fn edges(&self) -> EdgeSet<'g> {
        self.in_edges()
            .union(self.out_edges())
            .materialize(self.graph.limits().maximum_edge_set_size)
    }

    /// Number of distinct roads (forward edges) meeting here.
    pub fn valence(&self) -> usize {
        self.graph.store().vertex_edges(self.index()).len()
    }

    /// Exactly one road ends here.
    pub fn is_dead_end(&self) -> bool {
        self.valence() == 1
    }

    /// Exactly two roads meet here.
    pub fn is_through(&self) -> bool {
        self.valence() == 2
    }

    /// Three or more roads meet here.
    pub fn is_intersection(&self) -> bool {
        self.valence() >= 3
    }
}

impl<'g> GraphElement<'g> for Vertex<'g> {
    type Identifier = VertexIdentifier;

    const KIND: ElementKind = ElementKind::Vertex;

    fn graph(&self) -> &'g Graph {
        self.graph
    }

    fn identifier(&self) -> VertexIdentifier {
        self.identifier
    }

    fn index(&self) -> ElementIndex {
        Vertex::index(self)
    }

    fn identifier_as_long(&self) -> i64 {
        self.identifier.get()
    }
}
