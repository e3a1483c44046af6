//! Observed workflow state machines
//!
//! The client never transitions loan or verification state itself; the
//! server does, and the client reflects the confirmed transition after a
//! round trip. These functions validate what the client reflects: pending
//! goes to approved/rejected (or verified/rejected), and a decided state is
//! terminal.

use crate::client::models::{Decision, KycStatus, LoanStatus, VerificationRequest};
use crate::core::error::{PortalError, Result};

impl LoanStatus {
    /// A decided loan is immutable from the client's perspective
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Approved | LoanStatus::Rejected)
    }

    /// The state a decision moves a pending loan into
    pub fn decided(&self, decision: Decision) -> Result<LoanStatus> {
        if self.is_terminal() {
            return Err(PortalError::Validation(format!(
                "loan is already {}, decision is terminal",
                self
            )));
        }
        Ok(match decision {
            Decision::Approve => LoanStatus::Approved,
            Decision::Reject => LoanStatus::Rejected,
        })
    }
}

impl KycStatus {
    /// A decided verification is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, KycStatus::Verified | KycStatus::Rejected)
    }

    /// The state a decision moves a pending verification into
    pub fn decided(&self, decision: Decision) -> Result<KycStatus> {
        if self.is_terminal() {
            return Err(PortalError::Validation(format!(
                "verification is already {}, decision is terminal",
                self
            )));
        }
        Ok(match decision {
            Decision::Approve => KycStatus::Verified,
            Decision::Reject => KycStatus::Rejected,
        })
    }
}

/// Split verification requests into the pending queue and completed history.
///
/// A given request lands in exactly one bucket, so the `show_history` views
/// never double-count a user as both pending and history.
pub fn partition_requests(
    requests: Vec<VerificationRequest>,
) -> (Vec<VerificationRequest>, Vec<VerificationRequest>) {
    requests
        .into_iter()
        .partition(|req| !req.status.is_terminal())
}
