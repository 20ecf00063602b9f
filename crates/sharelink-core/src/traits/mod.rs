//! Core traits defined in `sharelink-core` and implemented by other crates.

pub mod cache;
pub mod resource;

pub use cache::CacheProvider;
pub use resource::{Owned, ResourceStore};
