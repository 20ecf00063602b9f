//! # sharelink-entity
//!
//! Domain entity models for ShareLink: the share vocabulary (categories,
//! expiry policies, issued links) and the protected records that links
//! point at.

pub mod file;
pub mod message;
pub mod share;
pub mod user;
