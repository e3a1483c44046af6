//! Customer operations: document upload, loan application, own loans

use crate::client::models::{DocumentType, LoanApplication, LoanApplicationRequest, Role};
use crate::client::{Ack, ApiClient};
use crate::core::error::{PortalError, Result};
use crate::workflow::{guard, validate};
use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use std::path::Path;

impl ApiClient {
    /// Upload an identity document for KYC review.
    ///
    /// Sends a multipart request with the four fields the server expects:
    /// `file`, `doc_type`, `doc_number`, `expiry`. Refused locally when the
    /// file is missing or empty, or when the document fields fail
    /// validation.
    pub async fn upload_document(
        &self,
        doc_type: DocumentType,
        number: &str,
        expiry: NaiveDate,
        file: &Path,
    ) -> Result<()> {
        let session = self.active_session()?;
        guard::require_role(&session.user, Role::Customer)?;
        validate::document(doc_type, number, expiry)?;

        if !file.exists() {
            return Err(PortalError::Validation(format!(
                "document image not found: {}",
                file.display()
            )));
        }
        let bytes = tokio::fs::read(file).await?;
        if bytes.is_empty() {
            return Err(PortalError::Validation(format!(
                "document image is empty: {}",
                file.display()
            )));
        }

        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        let mime = mime_guess::from_path(file).first_or_octet_stream();

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.essence_str())?;
        let form = Form::new()
            .part("file", part)
            .text("doc_type", doc_type.wire_name())
            .text("doc_number", number.to_string())
            .text("expiry", expiry.format("%Y-%m-%d").to_string());

        tracing::info!(doc_type = doc_type.wire_name(), "Uploading document");

        let resp = self
            .post("/upload-document")?
            .bearer_auth(&session.token)
            .multipart(form)
            .send()
            .await?;
        let ack: Ack = Self::decode(resp).await?;
        Self::accept(ack, "Upload failed")?;

        tracing::info!(doc_type = doc_type.wire_name(), "Document uploaded");
        Ok(())
    }

    /// Apply for a loan.
    ///
    /// Refused locally unless the user's KYC status is verified. The check
    /// is advisory for UX only; the server enforces the same rule.
    pub async fn apply_for_loan(&self, amount: f64, term: u32, purpose: &str) -> Result<()> {
        let session = self.active_session()?;
        guard::require_role(&session.user, Role::Customer)?;
        guard::require_verified(&session.user)?;
        validate::loan(amount, term, purpose)?;

        let req = LoanApplicationRequest {
            amount,
            term,
            purpose: purpose.to_string(),
        };

        tracing::info!(amount, term, "Submitting loan application");

        let resp = self
            .post("/customer/apply-loan")?
            .bearer_auth(&session.token)
            .json(&req)
            .send()
            .await?;
        let ack: Ack = Self::decode(resp).await?;
        Self::accept(ack, "Failed to apply")?;

        tracing::info!(amount, term, "Loan application submitted");
        Ok(())
    }

    /// List the authenticated customer's own loan applications
    pub async fn list_own_loans(&self) -> Result<Vec<LoanApplication>> {
        let session = self.active_session()?;
        guard::require_role(&session.user, Role::Customer)?;

        let resp = self
            .get("/customer/loans")?
            .query(&[("user_id", session.user.id)])
            .bearer_auth(&session.token)
            .send()
            .await?;
        let envelope = Self::decode(resp).await?;
        Self::accept_list(envelope, "Failed to list loans")
    }
}
