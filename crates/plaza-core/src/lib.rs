//! Core types and trait definitions for the Plaza notification service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it decides who sees which notification and
//! owns the `unread → read` transition, but persists nothing itself.

pub mod error;
pub mod filter;
pub mod notification;
pub mod outcome;
pub mod principal;
pub mod resolver;
pub mod store;
pub mod visibility;

pub use error::{Error, Result};
pub use resolver::NotificationVisibilityResolver;
