//! Message sharing.

pub mod service;

pub use service::MessageShareService;
