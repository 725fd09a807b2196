use crate::infra::storage::GenericPtr;

/// Pointer to a value node in the arena of the owning list.
pub(super) type NodePtr<T> = GenericPtr<NodeData<T>>;

/// The common shape of every chain position: a link to the next value node.
pub(super) trait Link<T> {
    /// The next value node, [`None`] for the last position.
    fn next(&self) -> Option<NodePtr<T>>;

    /// This is a low-level method and is not intended to be used directly.
    fn set_next(&mut self, next: Option<NodePtr<T>>);
}

/// The anchor of the chain.
///
/// The sentinel is held by value inside the list, it is never stored in the
/// arena and never holds a value.
pub(super) struct Sentinel<T> {
    pub(super) next: Option<NodePtr<T>>,
}

impl<T> Default for Sentinel<T> {
    fn default() -> Self { Self { next: None } }
}

/// A node that holds a value.
///
/// This is the data type a list stores in its arena, see
/// [`ForwardList::arena`](super::ForwardList::arena).
pub struct NodeData<T> {
    pub(super) next: Option<NodePtr<T>>,
    pub(super) value: T,
}

impl<T> NodeData<T> {
    pub fn value(&self) -> &T { &self.value }
}

impl<T> Link<T> for Sentinel<T> {
    fn next(&self) -> Option<NodePtr<T>> { self.next }

    fn set_next(&mut self, next: Option<NodePtr<T>>) { self.next = next; }
}

impl<T> Link<T> for NodeData<T> {
    fn next(&self) -> Option<NodePtr<T>> { self.next }

    fn set_next(&mut self, next: Option<NodePtr<T>>) { self.next = next; }
}
