//! # sharelink-token
//!
//! Share token primitives. A token is the mint instant of a share link,
//! sealed with AES-256-CBC under the process-wide cipher configuration and
//! rendered in a URL-safe base64 alphabet. Expiry can therefore be checked
//! without touching the cache, and forged or corrupted tokens are rejected
//! before any store lookup.

pub mod codec;
pub mod error;
pub mod format;

pub use codec::TokenCodec;
pub use error::DecodeError;
pub use format::{format, public_path, unformat};
