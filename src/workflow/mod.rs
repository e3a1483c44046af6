//! Workflow rules module
//!
//! Pure, I/O-free business rules consumed by the API client:
//! - Role and KYC-status gates
//! - Observed loan/verification state machines
//! - Field validation applied before a request is sent

pub mod guard;
pub mod state;
pub mod validate;

pub use state::partition_requests;
