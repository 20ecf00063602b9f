//! # sharelink-core
//!
//! Core crate for ShareLink. Contains the cache and resource-store
//! contracts, configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ShareLink crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
