//! Lazy set views. None of them caches: membership and iteration read
//! through to the operands every time.

use std::fmt;

use crate::set::ElementSet;

/// Members of `A`, then members of `B` not in `A`.
#[derive(Clone)]
pub struct Union<A, B> {
    first: A,
    second: B,
}

impl<A, B> Union<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> ElementSet for Union<A, B>
where
    A: ElementSet,
    B: ElementSet<Item = A::Item>,
{
    type Item = A::Item;

    fn iter(&self) -> Box<dyn Iterator<Item = A::Item> + '_> {
        let rest = self
            .second
            .iter()
            .filter(move |item| !self.first.contains(item));
        Box::new(self.first.iter().chain(rest))
    }

    fn contains(&self, item: &A::Item) -> bool {
        self.first.contains(item) || self.second.contains(item)
    }

    fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }
}

/// Members of `A` also in `B`.
#[derive(Clone)]
pub struct Intersection<A, B> {
    first: A,
    second: B,
}

impl<A, B> Intersection<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> ElementSet for Intersection<A, B>
where
    A: ElementSet,
    B: ElementSet<Item = A::Item>,
{
    type Item = A::Item;

    fn iter(&self) -> Box<dyn Iterator<Item = A::Item> + '_> {
        Box::new(
            self.first
                .iter()
                .filter(move |item| self.second.contains(item)),
        )
    }

    fn contains(&self, item: &A::Item) -> bool {
        self.first.contains(item) && self.second.contains(item)
    }
}

/// Members of `A` not in `excluded`.
#[derive(Clone)]
pub struct Without<A, B> {
    base: A,
    excluded: B,
}

impl<A, B> Without<A, B> {
    pub fn new(base: A, excluded: B) -> Self {
        Self { base, excluded }
    }
}

impl<A, B> ElementSet for Without<A, B>
where
    A: ElementSet,
    B: ElementSet<Item = A::Item>,
{
    type Item = A::Item;

    fn iter(&self) -> Box<dyn Iterator<Item = A::Item> + '_> {
        Box::new(
            self.base
                .iter()
                .filter(move |item| !self.excluded.contains(item)),
        )
    }

    fn contains(&self, item: &A::Item) -> bool {
        self.base.contains(item) && !self.excluded.contains(item)
    }
}

/// Members of `A` satisfying a predicate.
#[derive(Clone)]
pub struct Subset<A, F> {
    base: A,
    predicate: F,
}

impl<A, F> Subset<A, F> {
    pub fn new(base: A, predicate: F) -> Self {
        Self { base, predicate }
    }
}

impl<A, F> ElementSet for Subset<A, F>
where
    A: ElementSet,
    F: Fn(&A::Item) -> bool,
{
    type Item = A::Item;

    fn iter(&self) -> Box<dyn Iterator<Item = A::Item> + '_> {
        Box::new(self.base.iter().filter(move |item| (self.predicate)(item)))
    }

    fn contains(&self, item: &A::Item) -> bool {
        (self.predicate)(item) && self.base.contains(item)
    }
}

macro_rules! view_debug {
    ($view:ident, $bound:ident) => {
        impl<A, $bound> fmt::Debug for $view<A, $bound>
        where
            Self: ElementSet,
            <Self as ElementSet>::Item: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set().entries(self.iter()).finish()
            }
        }
    };
}

view_debug!(Union, B);
view_debug!(Intersection, B);
view_debug!(Without, B);
view_debug!(Subset, F);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::SetAlgebra;

    #[test]
    fn union_yields_first_then_new_members() {
        let a = [1, 2, 3];
        let b = [5, 3, 4];
        assert_eq!(a.as_slice().union(b.as_slice()).to_vec(), vec![1, 2, 3, 5, 4]);
        assert!(a.as_slice().union(b.as_slice()).contains(&4));
        assert_eq!(a.as_slice().union(b.as_slice()).count(), 5);
    }

    #[test]
    fn views_compose_without_materialising() {
        let a = [1, 2, 3, 4, 5, 6];
        let b = [2, 4, 6, 8];
        let view = a
            .as_slice()
            .intersection(b.as_slice())
            .without(Some(4))
            .matching(|x| *x > 2);
        assert_eq!(view.to_vec(), vec![6]);
        assert!(!view.contains(&4));
        assert!(!view.contains(&2));
    }

    #[test]
    fn views_see_later_changes_to_operands() {
        let mut a = vec![1, 2];
        {
            let view = a.as_slice().without(Some(2));
            assert_eq!(view.to_vec(), vec![1]);
        }
        a.push(3);
        let view = a.as_slice().without(Some(2));
        assert_eq!(view.to_vec(), vec![1, 3]);
    }

    #[test]
    fn only_needs_exactly_one() {
        assert_eq!(ElementSet::only(&[7][..]), Some(7));
        assert_eq!(ElementSet::only(&Vec::<i32>::new()[..]), None);
        assert_eq!(Some(3).only(), Some(3));
        assert_eq!(ElementSet::only(&[1, 2][..]), None);
    }

    #[test]
    fn debug_lists_members() {
        let a = [1, 2];
        assert_eq!(format!("{:?}", a.as_slice().without(Some(1))), "{2}");
    }
}
