//! Core infrastructure module
//!
//! This module provides the ambient layer shared by the rest of the crate:
//! - Configuration management
//! - Structured logging setup
//! - Error handling and type system

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CliOverrides, Config};
pub use error::{ErrorReport, PortalError, Result};
pub use logging::Logger;
