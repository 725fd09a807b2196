pub mod infra;
pub mod list;
#[cfg(feature = "search")]
pub mod search;

pub use list::*;
