//! Share domain entities.

pub mod category;
pub mod link;
pub mod policy;
pub mod request;

pub use category::ShareCategory;
pub use link::ShareLink;
pub use policy::ExpiryPolicy;
pub use request::{ExpireType, ShareRequest};
