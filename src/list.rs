//! Forward List
//!
//! A singly-linked list whose nodes are stored in an arena produced by a
//! pluggable [`Allocator`](crate::infra::storage::Allocator). Positions in the
//! list are plain values: the [before-begin](ForwardList::before_begin)
//! position, a value node, or the [end](ForwardList::end). Insertion and
//! removal are anchored at a position and always act on the node *after* it.

mod error;
mod forward_list;
mod iter;
mod node;
mod position;

pub use error::{InsertError, ListError};
pub use forward_list::{DisplayList, ForwardList};
pub use iter::{IntoIter, Iter};
pub use node::NodeData;
pub use position::Position;
