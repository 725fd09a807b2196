use std::convert::Infallible;
use std::{fmt, io, mem};

use super::error::{InsertError, ListError};
use super::iter::{IntoIter, Iter};
use super::node::{Link, NodeData, NodePtr, Sentinel};
use super::position::{Position, PositionKind};
use crate::infra::storage::{Allocator, Arena, Global, Reservation};

/// A singly-linked list with a pluggable allocation policy.
///
/// The nodes live in an arena owned by the list, which is produced by
/// [rebinding](Allocator::rebind) the policy `A` to [`NodeData<T>`]. The
/// sentinel that precedes the first node is stored in the list itself.
///
/// Every insertion reserves storage first and constructs the value second. If
/// either step fails, the list is left exactly as it was.
///
/// # Type parameters
///
/// - `T`: The element type.
/// - `A`: The allocation policy, [`Global`] by default.
///
/// # Examples
///
/// ```
/// use fwdlist::ForwardList;
///
/// let mut list = ForwardList::try_from_slice(&[1, 2, 3]).unwrap();
/// list.push_front(0);
/// assert_eq!(list.len(), 4);
///
/// let pos = list.begin().next(&list);
/// list.erase_after(pos);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 3]);
/// assert_eq!(list.display().to_string(), "size = 3{0 1 3 }");
/// ```
pub struct ForwardList<T, A: Allocator = Global> {
    sentinel: Sentinel<T>,
    len: usize,
    arena: A::Rebound<NodeData<T>>,
    alloc: A,
}

/// A [`Display`](fmt::Display) adapter for the diagnostic dump of a list.
pub struct DisplayList<'a, T, A: Allocator = Global> {
    list: &'a ForwardList<T, A>,
}

impl<T> ForwardList<T> {
    /// Create an empty list with the [`Global`] policy.
    pub fn new() -> Self { Self::new_in(Global) }

    /// Create a list from the values of an iterator, in order.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, ListError>
    where
        I: IntoIterator<Item = T>,
    {
        Self::try_from_iter_in(iter, Global)
    }

    /// Create a list holding a clone of every value of `iter`, in order.
    pub fn try_from_iter_cloned<'a, I>(iter: I) -> Result<Self, ListError>
    where
        I: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
    {
        Self::try_from_iter_cloned_in(iter, Global)
    }

    /// Create a list holding a clone of every value in `values`, in order.
    pub fn try_from_slice(values: &[T]) -> Result<Self, ListError>
    where
        T: Clone,
    {
        Self::try_from_slice_in(values, Global)
    }
}

impl<T, A: Allocator> ForwardList<T, A> {
    /// Create an empty list with the given allocation policy.
    ///
    /// Nothing is allocated here.
    pub fn new_in(alloc: A) -> Self {
        Self {
            sentinel: Sentinel::default(),
            len: 0,
            arena: alloc.rebind(),
            alloc,
        }
    }

    /// Create a list from the values of an iterator, in order.
    ///
    /// If a node cannot be allocated, the nodes created so far are released
    /// together with the partially built list and the error is returned.
    pub fn try_from_iter_in<I>(iter: I, alloc: A) -> Result<Self, ListError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::new_in(alloc);
        list.try_extend_after(list.before_begin(), iter)?;
        Ok(list)
    }

    /// Create a list holding a clone of every value of `iter`, in order.
    ///
    /// Every clone runs after the storage for its node has been reserved, so
    /// no value is cloned once the storage runs out. If a clone panics, the
    /// reserved storage and all nodes created so far are released.
    pub fn try_from_iter_cloned_in<'a, I>(iter: I, alloc: A) -> Result<Self, ListError>
    where
        I: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
    {
        let mut list = Self::new_in(alloc);
        list.try_extend_after_cloned(list.before_begin(), iter)?;
        Ok(list)
    }

    /// Create a list holding a clone of every value in `values`, in order.
    pub fn try_from_slice_in(values: &[T], alloc: A) -> Result<Self, ListError>
    where
        T: Clone,
    {
        Self::try_from_iter_cloned_in(values, alloc)
    }

    /// Create an independent copy of this list.
    ///
    /// The copy gets its own arena, rebound from a clone of the allocation
    /// policy.
    pub fn try_clone(&self) -> Result<Self, ListError>
    where
        T: Clone,
    {
        let mut copy = Self::new_in(self.alloc.clone());
        copy.try_extend_after_cloned(copy.before_begin(), self)?;
        Ok(copy)
    }

    /// Replace the contents of this list with a copy of `other`.
    ///
    /// The copy is built first and then swapped in, so if copying fails this
    /// list is not modified.
    pub fn try_assign_from(&mut self, other: &Self) -> Result<(), ListError>
    where
        T: Clone,
    {
        let mut copy = other.try_clone()?;
        mem::swap(self, &mut copy);
        Ok(())
    }

    /// Take all nodes out of this list, leaving it empty.
    ///
    /// The chain, the length, the arena and the policy are exchanged with a
    /// new empty list, nothing is allocated.
    pub fn take(&mut self) -> Self {
        let mut moved = Self::new_in(self.alloc.clone());
        mem::swap(self, &mut moved);
        moved
    }

    /// Replace the contents of this list with the nodes of `other`, leaving
    /// `other` empty. The previous contents of this list are dropped.
    pub fn assign_take(&mut self, other: &mut Self) {
        let mut moved = other.take();
        mem::swap(self, &mut moved);
    }

    /// Get the allocation policy.
    pub fn allocator(&self) -> &A { &self.alloc }

    /// Get the arena that stores the nodes.
    pub fn arena(&self) -> &A::Rebound<NodeData<T>> { &self.arena }

    /// The position before the first element.
    pub fn before_begin(&self) -> Position<T> { Position::before_begin() }

    /// The position of the first element, or the end if the list is empty.
    pub fn begin(&self) -> Position<T> { Position::from_link(self.sentinel.next()) }

    /// The position after the last element.
    pub fn end(&self) -> Position<T> { Position::end() }

    /// The number of elements.
    pub fn len(&self) -> usize { self.len }

    /// If the list has no element.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Get the first element.
    ///
    /// # Returns
    ///
    /// - `Ok(&T)` if the list is not empty.
    /// - [`ListError::Empty`] otherwise.
    pub fn front(&self) -> Result<&T, ListError> {
        match self.sentinel.next() {
            Some(_) => self.begin().get(self),
            None => Err(ListError::Empty),
        }
    }

    /// Get the first element mutably.
    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        match self.sentinel.next() {
            Some(_) => self.begin().get_mut(self),
            None => Err(ListError::Empty),
        }
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> Iter<'_, T, A> { Iter::new(self, self.sentinel.next(), self.len) }

    /// Call `f` on every element in order, allowing mutation.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        let mut curr = self.sentinel.next();
        while let Some(ptr) = curr {
            let node = self
                .arena
                .try_deref_mut(ptr)
                .unwrap_or_else(|| unreachable!("linked node {} is not in the arena", ptr));
            f(&mut node.value);
            curr = node.next();
        }
    }

    /// Insert a value built by `f` right after `pos`.
    ///
    /// The storage of the new node is reserved before `f` runs. If `f`
    /// returns an error or panics, the storage is released and the list is
    /// not modified.
    ///
    /// # Returns
    ///
    /// - `Ok(Position)` of the new node.
    /// - [`InsertError::List`] if `pos` is the end, `pos` is dangling, or no
    ///   storage is available. `f` is not called.
    /// - [`InsertError::Construct`] if `f` fails.
    pub fn try_insert_after_with<F, E>(
        &mut self,
        pos: Position<T>,
        f: F,
    ) -> Result<Position<T>, InsertError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let next = self.link(pos)?;

        let reservation: Reservation<'_, NodeData<T>, _> =
            Reservation::new(&mut self.arena).map_err(ListError::from)?;
        let value = f().map_err(InsertError::Construct)?;
        let ptr = reservation.fill(NodeData { next, value });

        // `pos` is checked above, this should not return error.
        self.set_link(pos, Some(ptr))
            .unwrap_or_else(|_| unreachable!());
        self.len += 1;

        Ok(Position::node(ptr))
    }

    /// Insert `value` right after `pos`.
    ///
    /// # Returns
    ///
    /// - `Ok(Position)` of the new node.
    /// - [`ListError::End`] or [`ListError::Dangling`] if `pos` cannot be
    ///   inserted after.
    /// - [`ListError::Alloc`] if no storage is available.
    pub fn try_insert_after(&mut self, pos: Position<T>, value: T) -> Result<Position<T>, ListError> {
        Ok(self.try_insert_after_with(pos, || Ok::<_, Infallible>(value))?)
    }

    /// Insert `value` right after `pos`.
    ///
    /// # Panics
    ///
    /// Panics if [`try_insert_after`](Self::try_insert_after) fails.
    pub fn insert_after(&mut self, pos: Position<T>, value: T) -> Position<T> {
        self.try_insert_after(pos, value)
            .unwrap_or_else(|err| panic!("cannot insert after {:?}: {}", pos, err))
    }

    /// Insert every value of `iter` after `pos`, keeping their order.
    ///
    /// # Returns
    ///
    /// The position of the last inserted node, or `pos` if `iter` is empty.
    /// On error, the values inserted before the failure stay in the list.
    pub fn try_extend_after<I>(&mut self, pos: Position<T>, iter: I) -> Result<Position<T>, ListError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut last = pos;
        for value in iter {
            last = self.try_insert_after(last, value)?;
        }
        Ok(last)
    }

    /// Insert a clone of every value of `iter` after `pos`, keeping their
    /// order.
    ///
    /// Like [`try_extend_after`](Self::try_extend_after), but each clone is
    /// made after the storage for its node is reserved.
    pub fn try_extend_after_cloned<'a, I>(
        &mut self,
        pos: Position<T>,
        iter: I,
    ) -> Result<Position<T>, ListError>
    where
        I: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
    {
        let mut last = pos;
        for value in iter {
            last = self.try_insert_after_with(last, || Ok::<_, Infallible>(value.clone()))?;
        }
        Ok(last)
    }

    /// Remove the element after `pos`.
    ///
    /// # Returns
    ///
    /// The position after the removed element. If `pos` is the end, is
    /// dangling, or is the last position, nothing is removed and the end is
    /// returned.
    pub fn erase_after(&mut self, pos: Position<T>) -> Position<T> {
        match self.remove_after(pos) {
            Some(node) => Position::from_link(node.next()),
            None => Position::end(),
        }
    }

    /// Insert `value` at the front.
    pub fn try_push_front(&mut self, value: T) -> Result<Position<T>, ListError> {
        self.try_insert_after(self.before_begin(), value)
    }

    /// Insert `value` at the front.
    ///
    /// # Panics
    ///
    /// Panics if no storage is available.
    pub fn push_front(&mut self, value: T) -> Position<T> {
        self.insert_after(self.before_begin(), value)
    }

    /// Remove the first element and return it.
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove_after(self.before_begin())
            .map(|node| node.value)
    }

    /// Remove all elements.
    ///
    /// This is also what dropping the list does.
    pub fn clear(&mut self) {
        let mut curr = self.sentinel.next.take();
        self.len = 0;
        while let Some(ptr) = curr {
            let node = self
                .arena
                .try_dealloc(ptr)
                .unwrap_or_else(|| unreachable!("linked node {} is not in the arena", ptr));
            curr = node.next();
        }
    }

    /// Get a [`Display`](fmt::Display) adapter for the diagnostic dump,
    /// formatted as `size = <n>{<v1> <v2> ... }`.
    pub fn display(&self) -> DisplayList<'_, T, A> { DisplayList { list: self } }

    /// Write the diagnostic dump and a newline to `out`.
    pub fn dump<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: io::Write,
        T: fmt::Display,
    {
        writeln!(out, "{}", self.display())
    }

    pub(super) fn node(&self, ptr: NodePtr<T>) -> Option<&NodeData<T>> { self.arena.try_deref(ptr) }

    pub(super) fn node_mut(&mut self, ptr: NodePtr<T>) -> Option<&mut NodeData<T>> {
        self.arena.try_deref_mut(ptr)
    }

    /// The `next` link stored at `pos`.
    fn link(&self, pos: Position<T>) -> Result<Option<NodePtr<T>>, ListError> {
        match pos.kind() {
            PositionKind::BeforeBegin => Ok(self.sentinel.next()),
            PositionKind::Node(ptr) => self
                .node(ptr)
                .map(|node| node.next())
                .ok_or(ListError::Dangling),
            PositionKind::End => Err(ListError::End),
        }
    }

    /// Overwrite the `next` link stored at `pos`.
    fn set_link(&mut self, pos: Position<T>, next: Option<NodePtr<T>>) -> Result<(), ListError> {
        match pos.kind() {
            PositionKind::BeforeBegin => self.sentinel.set_next(next),
            PositionKind::Node(ptr) => self
                .node_mut(ptr)
                .ok_or(ListError::Dangling)?
                .set_next(next),
            PositionKind::End => return Err(ListError::End),
        }
        Ok(())
    }

    /// Unlink and deallocate the node after `pos`.
    fn remove_after(&mut self, pos: Position<T>) -> Option<NodeData<T>> {
        let victim = self.link(pos).ok()??;
        let node = self
            .arena
            .try_dealloc(victim)
            .unwrap_or_else(|| unreachable!("linked node {} is not in the arena", victim));
        // `pos` is the predecessor of `victim`, this should not return error.
        self.set_link(pos, node.next())
            .unwrap_or_else(|_| unreachable!());
        self.len -= 1;
        Some(node)
    }
}

impl<T, A: Allocator> Drop for ForwardList<T, A> {
    fn drop(&mut self) { self.clear() }
}

impl<T> Default for ForwardList<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Clone, A: Allocator> Clone for ForwardList<T, A> {
    /// # Panics
    ///
    /// Panics if no storage is available for the copy.
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|err| panic!("cannot clone list: {}", err))
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for ForwardList<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_list().entries(self.iter()).finish() }
}

impl<T: PartialEq, A: Allocator, B: Allocator> PartialEq<ForwardList<T, B>> for ForwardList<T, A> {
    fn eq(&self, other: &ForwardList<T, B>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for ForwardList<T, A> {}

impl<T, A: Allocator + Default> FromIterator<T> for ForwardList<T, A> {
    /// # Panics
    ///
    /// Panics if no storage is available.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::try_from_iter_in(iter, A::default())
            .unwrap_or_else(|err| panic!("cannot collect into list: {}", err))
    }
}

impl<T, const N: usize> From<[T; N]> for ForwardList<T> {
    fn from(values: [T; N]) -> Self { values.into_iter().collect() }
}

impl<'a, T, A: Allocator> IntoIterator for &'a ForwardList<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<T, A: Allocator> IntoIterator for ForwardList<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter { IntoIter::new(self) }
}

impl<T: fmt::Display, A: Allocator> fmt::Display for DisplayList<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "size = {}{{", self.list.len())?;
        for value in self.list {
            write!(f, "{} ", value)?;
        }
        write!(f, "}}")
    }
}
