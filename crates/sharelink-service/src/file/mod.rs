//! File sharing.

pub mod service;

pub use service::FileShareService;
