//! Element sets: materialised capped sets and lazy algebraic views.
//!
//! [`ElementSet`] is the read-only interface every set and view shares.
//! [`SetAlgebra`] composes sets into [`Union`], [`Intersection`], [`Without`]
//! and [`Subset`] views. Views borrow or own their operands, hold no caches
//! and re-evaluate on every traversal, so composing them is O(1) and the
//! cost is paid only when iterated. Only materialised sets ([`CappedSet`],
//! [`EdgeSet`], [`RelationSet`]) can be mutated.
//!
//! ```rust
//! use road_graph::set::{ElementSet, SetAlgebra};
//!
//! let a = [1, 2, 3];
//! let b = [3, 4];
//! let union = a.as_slice().union(b.as_slice());
//! assert_eq!(union.to_vec(), vec![1, 2, 3, 4]);
//! assert_eq!(a.as_slice().without(b.as_slice()).to_vec(), vec![1, 2]);
//! assert_eq!(a.as_slice().intersection(b.as_slice()).count(), 1);
//! ```

pub mod capped;
pub mod edge_set;
pub mod relation_set;
pub mod views;

use std::hash::Hash;

pub use capped::CappedSet;
pub use edge_set::{EdgeSet, EdgeSetExt};
pub use relation_set::RelationSet;
pub use views::{Intersection, Subset, Union, Without};

/// Read-only access to a set of elements.
pub trait ElementSet {
    type Item: Clone + Eq + Hash;

    /// Members in the set's iteration order.
    fn iter(&self) -> Box<dyn Iterator<Item = Self::Item> + '_>;

    /// Linear scan unless overridden by a hash-indexed set.
    fn contains(&self, item: &Self::Item) -> bool {
        self.iter().any(|member| member == *item)
    }

    fn count(&self) -> usize {
        self.iter().count()
    }

    fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn to_vec(&self) -> Vec<Self::Item> {
        self.iter().collect()
    }

    /// The only member, when there is exactly one.
    fn only(&self) -> Option<Self::Item> {
        let mut iter = self.iter();
        let first = iter.next()?;
        iter.next().is_none().then_some(first)
    }
}

/// Lazy set composition, available on every [`ElementSet`].
pub trait SetAlgebra: ElementSet + Sized {
    /// Members of `self`, then members of `other` not in `self`.
    fn union<B>(self, other: B) -> Union<Self, B>
    where
        B: ElementSet<Item = Self::Item>,
    {
        Union::new(self, other)
    }

    /// Members of `self` also in `other`.
    fn intersection<B>(self, other: B) -> Intersection<Self, B>
    where
        B: ElementSet<Item = Self::Item>,
    {
        Intersection::new(self, other)
    }

    /// Members of `self` not in `excluded`.
    fn without<B>(self, excluded: B) -> Without<Self, B>
    where
        B: ElementSet<Item = Self::Item>,
    {
        Without::new(self, excluded)
    }

    /// Members of `self` satisfying `predicate`.
    fn matching<F>(self, predicate: F) -> Subset<Self, F>
    where
        F: Fn(&Self::Item) -> bool,
    {
        Subset::new(self, predicate)
    }
}

impl<S: ElementSet> SetAlgebra for S {}

impl<S: ElementSet + ?Sized> ElementSet for &S {
    type Item = S::Item;

    fn iter(&self) -> Box<dyn Iterator<Item = S::Item> + '_> {
        (**self).iter()
    }

    fn contains(&self, item: &S::Item) -> bool {
        (**self).contains(item)
    }

    fn count(&self) -> usize {
        (**self).count()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

/// Slices, so that vectors and arrays can take part through `as_slice()`.
impl<T: Clone + Eq + Hash> ElementSet for [T] {
    type Item = T;

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(<[T]>::iter(self).cloned())
    }

    fn contains(&self, item: &T) -> bool {
        <[T]>::contains(self, item)
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        <[T]>::is_empty(self)
    }
}

/// Empty or singleton set.
impl<T: Clone + Eq + Hash> ElementSet for Option<T> {
    type Item = T;

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.as_ref().into_iter().cloned())
    }

    fn contains(&self, item: &T) -> bool {
        self.as_ref() == Some(item)
    }

    fn count(&self) -> usize {
        usize::from(self.is_some())
    }

    fn is_empty(&self) -> bool {
        self.is_none()
    }
}
