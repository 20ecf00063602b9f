//! Share link issuance and redemption.

pub(crate) mod ownership;
pub mod registry;
pub mod store;

pub use registry::ShareRegistry;
pub use store::RedemptionStore;
