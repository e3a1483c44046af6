//! KYC Portal Client Library
//!
//! This library provides a typed client for the KYC and consumer-lending
//! portal API: the workflow operations, file-backed session state, and the
//! pure role/status rules that gate them.

pub mod client;
pub mod core;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use client::ApiClient;
pub use crate::core::{Config, PortalError};
pub use session::{Session, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for the library
pub type Result<T> = crate::core::error::Result<T>;
