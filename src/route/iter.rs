//! Stack-safe traversal of a route tree.
//!
//! Descends into `head` while pushing `tail` onto an explicit work stack, so
//! the call depth stays constant however deep the concatenation tree is.

use std::iter::FusedIterator;

use crate::element::Edge;
use crate::route::RouteNode;

/// Edges of a route in travel order.
pub struct RouteEdges<'r, 'g> {
    pending: Vec<&'r RouteNode<'g>>,
    remaining: usize,
}

impl<'r, 'g> RouteEdges<'r, 'g> {
    pub(crate) fn new(root: &'r RouteNode<'g>) -> Self {
        Self {
            pending: vec![root],
            remaining: root.size(),
        }
    }
}

impl<'r, 'g> Iterator for RouteEdges<'r, 'g> {
    type Item = &'r Edge<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.pending.pop()?;
        loop {
            match node {
                RouteNode::Leaf(edge) => {
                    self.remaining -= 1;
                    return Some(edge);
                }
                RouteNode::Join(join) => {
                    self.pending.push(&*join.tail);
                    node = &*join.head;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RouteEdges<'_, '_> {}

impl FusedIterator for RouteEdges<'_, '_> {}
