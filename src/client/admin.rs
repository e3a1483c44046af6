//! Admin operations: KYC review and loan decisions

use crate::client::models::{
    Decision, DownloadPayload, LoanApplication, LoanDecisionRequest, VerificationRequest,
    VerifyRequest,
};
use crate::client::{Ack, ApiClient};
use crate::core::error::{PortalError, Result};
use crate::workflow::guard;
use url::Url;

impl ApiClient {
    /// List verification requests: the pending queue, or the full history
    /// when `show_history` is set. The two views never double-count a
    /// pending request.
    pub async fn list_verification_requests(
        &self,
        show_history: bool,
    ) -> Result<Vec<VerificationRequest>> {
        let session = self.active_session()?;
        guard::require_admin(&session.user)?;

        let resp = self
            .get("/admin/verification-requests")?
            .query(&[("show_history", show_history)])
            .bearer_auth(&session.token)
            .send()
            .await?;
        let envelope = Self::decode(resp).await?;
        Self::accept_list(envelope, "Failed to list verification requests")
    }

    /// Approve or reject a customer's KYC verification
    pub async fn decide_verification(&self, user_id: i64, decision: Decision) -> Result<()> {
        let session = self.active_session()?;
        guard::require_admin(&session.user)?;

        let req = VerifyRequest {
            user_id,
            action: decision,
        };

        tracing::info!(user_id, decision = ?decision, "Deciding verification");

        let resp = self
            .post("/admin/verify")?
            .bearer_auth(&session.token)
            .json(&req)
            .send()
            .await?;
        let ack: Ack = Self::decode(resp).await?;
        Self::accept(ack, "Verification update failed")?;
        Ok(())
    }

    /// List pending loan applications awaiting a decision
    pub async fn list_loan_requests(&self) -> Result<Vec<LoanApplication>> {
        let session = self.active_session()?;
        guard::require_admin(&session.user)?;

        let resp = self
            .get("/admin/loan-requests")?
            .bearer_auth(&session.token)
            .send()
            .await?;
        let envelope = Self::decode(resp).await?;
        Self::accept_list(envelope, "Failed to list loan requests")
    }

    /// Approve or reject a loan application with an optional note persisted
    /// for the customer. Returns the decision document's download URL when
    /// the server generated one.
    ///
    /// Once decided, the loan is terminal; a duplicate decision call here is
    /// not prevented client-side and is left to the server to refuse.
    pub async fn decide_loan(
        &self,
        loan_id: i64,
        decision: Decision,
        notes: Option<&str>,
    ) -> Result<Option<Url>> {
        let session = self.active_session()?;
        guard::require_admin(&session.user)?;

        let req = LoanDecisionRequest {
            loan_id,
            decision,
            notes: notes.map(str::to_string),
        };

        tracing::info!(loan_id, decision = ?decision, "Deciding loan");

        let resp = self
            .post("/admin/loan-decision")?
            .bearer_auth(&session.token)
            .json(&req)
            .send()
            .await?;
        let payload: DownloadPayload = Self::decode(resp).await?;

        if !payload.success {
            return Err(PortalError::rejected(payload.message, "Error updating loan"));
        }

        tracing::info!(loan_id, decision = ?decision, "Loan decided");
        payload
            .download_url
            .map(|path| self.endpoint(&path))
            .transpose()
    }
}
