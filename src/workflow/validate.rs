//! Field validation applied before a request is sent
//!
//! The original screens leaned on form controls for required fields; here
//! the rules are re-checked independently so a caller gets a validation
//! error instead of a round trip the server will reject.

use crate::client::models::DocumentType;
use crate::core::error::{PortalError, Result};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CNIC numbers are formatted #####-#######-#
    static ref CNIC_RE: Regex = Regex::new(r"^\d{5}-\d{7}-\d$").unwrap();
}

/// Validate an identity document before upload
pub fn document(doc_type: DocumentType, number: &str, expiry: NaiveDate) -> Result<()> {
    document_as_of(doc_type, number, expiry, chrono::Local::now().date_naive())
}

/// Validation core, parameterized on the reference date
pub fn document_as_of(
    doc_type: DocumentType,
    number: &str,
    expiry: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    if number.trim().is_empty() {
        return Err(PortalError::Validation(
            "document number is required".to_string(),
        ));
    }

    if doc_type == DocumentType::Cnic && !CNIC_RE.is_match(number) {
        return Err(PortalError::Validation(format!(
            "CNIC number '{}' must match #####-#######-#",
            number
        )));
    }

    if expiry <= today {
        return Err(PortalError::Validation(format!(
            "document expired on {}",
            expiry
        )));
    }

    Ok(())
}

/// Validate a loan application before submission
pub fn loan(amount: f64, term_months: u32, purpose: &str) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PortalError::Validation(
            "loan amount must be a positive number".to_string(),
        ));
    }

    if term_months == 0 {
        return Err(PortalError::Validation(
            "loan term must be at least one month".to_string(),
        ));
    }

    if purpose.trim().is_empty() {
        return Err(PortalError::Validation(
            "loan purpose is required".to_string(),
        ));
    }

    Ok(())
}
