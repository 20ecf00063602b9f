//! # sharelink-service
//!
//! Share link issuance and redemption. The [`ShareRegistry`] mints tokens
//! bound to a protected value and exchanges them back under a duration or
//! use-count policy; the resource services put ownership checks and record
//! lookups around it for each kind of shared resource.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod login;
pub mod message;
pub mod share;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::RequestContext;
pub use file::FileShareService;
pub use login::LoginShareService;
pub use message::MessageShareService;
pub use share::{RedemptionStore, ShareRegistry};
