use std::convert::Infallible;

use thiserror::Error;

use crate::infra::storage::AllocError;

/// The error type for the forward list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ListError {
    /// No storage for a new node.
    #[error(transparent)]
    Alloc(#[from] AllocError),
    /// The before-begin position holds no value.
    #[error("the before-begin position holds no value")]
    BeforeBegin,
    /// The end position does not refer to a node, so it can neither be
    /// dereferenced nor inserted after.
    #[error("the end position does not refer to a node")]
    End,
    /// The position refers to a node that has been erased.
    #[error("the position refers to an erased node")]
    Dangling,
    /// The list has no front element.
    #[error("the list is empty")]
    Empty,
}

/// The error type for inserting a value built by a fallible constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError<E> {
    /// The list refused the insertion, nothing was constructed.
    #[error(transparent)]
    List(#[from] ListError),
    /// The constructor failed, the reserved storage was released.
    #[error("failed to construct value: {0}")]
    Construct(E),
}

impl From<InsertError<Infallible>> for ListError {
    fn from(err: InsertError<Infallible>) -> Self {
        match err {
            InsertError::List(err) => err,
            InsertError::Construct(never) => match never {},
        }
    }
}
