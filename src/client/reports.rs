//! Report exports and download URL construction
//!
//! Exports return a reference to a downloadable resource, never the binary
//! itself; fetching the file is left to the caller (or a browser).

use crate::client::models::{DownloadPayload, ReportFormat, ReportKind};
use crate::client::ApiClient;
use crate::core::error::{PortalError, Result};
use crate::workflow::guard;
use url::Url;

impl ApiClient {
    /// Request a report export and resolve the returned download URL
    pub async fn export_report(
        &self,
        format: ReportFormat,
        kind: Option<ReportKind>,
    ) -> Result<Url> {
        let session = self.active_session()?;
        guard::require_admin(&session.user)?;

        let mut req = match format {
            ReportFormat::Excel => self.get("/export/excel")?,
            ReportFormat::Csv => self.get("/export/csv")?,
        };
        if let Some(kind) = kind {
            req = req.query(&[("type", kind.as_str())]);
        }

        tracing::info!(format = ?format, kind = ?kind, "Requesting report export");

        let resp = req.bearer_auth(&session.token).send().await?;
        let status = resp.status().as_u16();
        let payload: DownloadPayload = Self::decode(resp).await?;

        if !payload.success {
            return Err(PortalError::rejected(payload.message, "Export failed"));
        }

        let path = payload.download_url.ok_or(PortalError::Decode {
            status,
            detail: "export succeeded without a download URL".to_string(),
        })?;
        self.endpoint(&path)
    }

    /// Absolute URL of an uploaded document, for retrieval or display
    pub fn document_url(&self, path: &str) -> Result<Url> {
        self.endpoint(&format!("/uploads/{}", path))
    }

    /// Absolute URL of a generated loan decision PDF
    pub fn pdf_url(&self, path: &str) -> Result<Url> {
        self.endpoint(&format!("/download-pdf/{}", path))
    }
}
