use std::iter::FusedIterator;

use super::forward_list::ForwardList;
use super::node::{Link, NodePtr};
use crate::infra::storage::{Allocator, Global};

/// An iterator over the elements of a [`ForwardList`].
///
/// The iterator is useful for immutable access to the list. If the list needs
/// to be modified while walking it, use [`Position`](super::Position) instead.
pub struct Iter<'a, T, A: Allocator = Global> {
    list: &'a ForwardList<T, A>,
    curr: Option<NodePtr<T>>,
    remaining: usize,
}

impl<'a, T, A: Allocator> Iter<'a, T, A> {
    pub(super) fn new(list: &'a ForwardList<T, A>, head: Option<NodePtr<T>>, len: usize) -> Self {
        Self {
            list,
            curr: head,
            remaining: len,
        }
    }
}

impl<T, A: Allocator> Clone for Iter<'_, T, A> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            curr: self.curr,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, A: Allocator> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.curr?)?;
        self.curr = node.next();
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<T, A: Allocator> ExactSizeIterator for Iter<'_, T, A> {}

impl<T, A: Allocator> FusedIterator for Iter<'_, T, A> {}

/// An owning iterator over the elements of a [`ForwardList`].
///
/// Elements are popped from the front one by one, the rest are dropped with
/// the iterator.
pub struct IntoIter<T, A: Allocator = Global> {
    list: ForwardList<T, A>,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(super) fn new(list: ForwardList<T, A>) -> Self { Self { list } }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> { self.list.pop_front() }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.list.len(), Some(self.list.len())) }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter() {
        let list = ForwardList::from([1, 2, 3]);

        let mut iter = list.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);

        assert_eq!((&list).into_iter().sum::<i32>(), 6);
    }

    #[test]
    fn test_iter_empty() {
        let list = ForwardList::<String>::new();
        assert_eq!(list.iter().next(), None);
        assert_eq!(list.iter().size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_into_iter() {
        let list = ForwardList::from([String::from("a"), String::from("b")]);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next().as_deref(), Some("a"));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next().as_deref(), Some("b"));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_into_iter_drops_rest() {
        let list = ForwardList::from([1, 2, 3]);
        let first: Vec<_> = list.into_iter().take(1).collect();
        assert_eq!(first, vec![1]);
    }
}
