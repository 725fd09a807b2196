use std::fmt;
use std::hash::{Hash, Hasher};

use super::error::ListError;
use super::forward_list::ForwardList;
use super::node::{Link, NodePtr};
use crate::infra::storage::Allocator;

/// Where a [`Position`] points to.
pub(super) enum PositionKind<T> {
    /// The sentinel, before the first element.
    BeforeBegin,
    /// A value node.
    Node(NodePtr<T>),
    /// Past the last element.
    End,
}

impl<T> Clone for PositionKind<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for PositionKind<T> {}

impl<T> PartialEq for PositionKind<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::BeforeBegin, Self::BeforeBegin) | (Self::End, Self::End) => true,
            (Self::Node(a), Self::Node(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> Eq for PositionKind<T> {}

/// A forward-only position in a [`ForwardList`].
///
/// A position is one of:
///
/// - the [before-begin](ForwardList::before_begin) position, which is the
///   anchor for inserting at the front and holds no value,
/// - a value node,
/// - the [end](ForwardList::end) position.
///
/// There is no lifetime parameter for the position, because the position does
/// not reference to the list directly. Every operation takes the list it was
/// produced by. Erasing the node a position refers to invalidates the
/// position, using it afterwards yields [`ListError::Dangling`], even after a
/// later insertion has reused the storage of the erased node.
pub struct Position<T> {
    kind: PositionKind<T>,
}

impl<T> Position<T> {
    pub(super) fn before_begin() -> Self {
        Self {
            kind: PositionKind::BeforeBegin,
        }
    }

    pub(super) fn end() -> Self { Self { kind: PositionKind::End } }

    pub(super) fn node(ptr: NodePtr<T>) -> Self {
        Self {
            kind: PositionKind::Node(ptr),
        }
    }

    /// The position a `next` link points to.
    pub(super) fn from_link(next: Option<NodePtr<T>>) -> Self {
        match next {
            Some(ptr) => Self::node(ptr),
            None => Self::end(),
        }
    }

    pub(super) fn kind(self) -> PositionKind<T> { self.kind }

    /// If this is the before-begin position.
    pub fn is_before_begin(self) -> bool { self.kind == PositionKind::BeforeBegin }

    /// If this is the end position.
    pub fn is_end(self) -> bool { self.kind == PositionKind::End }

    /// Get the position after this one.
    ///
    /// The position after the end is the end. A dangling position also
    /// advances to the end.
    pub fn next<A: Allocator>(self, list: &ForwardList<T, A>) -> Self {
        match self.kind {
            PositionKind::BeforeBegin => list.begin(),
            PositionKind::Node(ptr) => match list.node(ptr) {
                Some(node) => Self::from_link(node.next()),
                None => Self::end(),
            },
            PositionKind::End => Self::end(),
        }
    }

    /// Move to the next position.
    pub fn advance<A: Allocator>(&mut self, list: &ForwardList<T, A>) { *self = self.next(list); }

    /// Move to the next position and return the position before the move.
    pub fn post_advance<A: Allocator>(&mut self, list: &ForwardList<T, A>) -> Self {
        let old = *self;
        self.advance(list);
        old
    }

    /// Get the value at this position.
    ///
    /// # Returns
    ///
    /// - `Ok(&T)` if the position refers to a live value node.
    /// - [`ListError::BeforeBegin`] or [`ListError::End`] for the two
    ///   positions that hold no value.
    /// - [`ListError::Dangling`] if the node has been erased.
    pub fn get<A: Allocator>(self, list: &ForwardList<T, A>) -> Result<&T, ListError> {
        match self.kind {
            PositionKind::BeforeBegin => Err(ListError::BeforeBegin),
            PositionKind::Node(ptr) => list
                .node(ptr)
                .map(|node| &node.value)
                .ok_or(ListError::Dangling),
            PositionKind::End => Err(ListError::End),
        }
    }

    /// Mutable version of [`get`](Self::get).
    pub fn get_mut<A: Allocator>(self, list: &mut ForwardList<T, A>) -> Result<&mut T, ListError> {
        match self.kind {
            PositionKind::BeforeBegin => Err(ListError::BeforeBegin),
            PositionKind::Node(ptr) => list
                .node_mut(ptr)
                .map(|node| &mut node.value)
                .ok_or(ListError::Dangling),
            PositionKind::End => Err(ListError::End),
        }
    }
}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool { self.kind == other.kind }
}

impl<T> Eq for Position<T> {}

impl<T> Hash for Position<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.kind {
            PositionKind::BeforeBegin => 0u8.hash(state),
            PositionKind::Node(ptr) => {
                1u8.hash(state);
                ptr.hash(state);
            }
            PositionKind::End => 2u8.hash(state),
        }
    }
}

impl<T> fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            PositionKind::BeforeBegin => write!(f, "BeforeBegin"),
            PositionKind::Node(ptr) => write!(f, "Node({})", ptr),
            PositionKind::End => write!(f, "End"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_states() {
        let mut list = ForwardList::try_from_slice(&[10, 20]).unwrap();

        let mut pos = list.before_begin();
        assert!(pos.is_before_begin());
        assert_eq!(pos.get(&list), Err(ListError::BeforeBegin));

        pos.advance(&list);
        assert_eq!(pos, list.begin());
        assert_eq!(pos.get(&list), Ok(&10));

        *pos.get_mut(&mut list).unwrap() = 11;
        assert_eq!(list.front(), Ok(&11));

        pos.advance(&list);
        assert_eq!(pos.get(&list), Ok(&20));

        pos.advance(&list);
        assert!(pos.is_end());
        assert_eq!(pos, list.end());
        assert_eq!(pos.get(&list), Err(ListError::End));

        // advancing the end is a no-op
        pos.advance(&list);
        assert!(pos.is_end());
    }

    #[test]
    fn test_position_empty_list() {
        let mut list = ForwardList::<u8>::new();
        let pos = list.before_begin();
        assert_eq!(pos.next(&list), list.end());
        assert_eq!(list.begin(), list.end());
        assert_eq!(pos.get_mut(&mut list), Err(ListError::BeforeBegin));
        assert_eq!(list.end().get_mut(&mut list), Err(ListError::End));
    }

    #[test]
    fn test_post_advance() {
        let list = ForwardList::try_from_slice(&['a', 'b']).unwrap();
        let mut pos = list.begin();
        let old = pos.post_advance(&list);
        assert_eq!(old.get(&list), Ok(&'a'));
        assert_eq!(pos.get(&list), Ok(&'b'));

        let mut end = list.end();
        assert_eq!(end.post_advance(&list), list.end());
        assert_eq!(end, list.end());
    }

    #[test]
    fn test_dangling_position() {
        let mut list = ForwardList::try_from_slice(&[1, 2, 3]).unwrap();
        let second = list.begin().next(&list);
        list.erase_after(list.begin());

        assert_eq!(second.get(&list), Err(ListError::Dangling));
        assert_eq!(second.next(&list), list.end());
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_position_debug() {
        let list = ForwardList::try_from_slice(&[1]).unwrap();
        assert_eq!(format!("{:?}", list.before_begin()), "BeforeBegin");
        assert_eq!(format!("{:?}", list.begin()), "Node(*0)");
        assert_eq!(format!("{:?}", list.end()), "End");
    }
}
