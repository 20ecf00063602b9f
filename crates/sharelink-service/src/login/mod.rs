//! Login links.

pub mod service;

pub use service::LoginShareService;
