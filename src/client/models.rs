//! Domain and wire-level models exchanged with the portal API

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role, issued by the server at login. Nothing client-side can
/// escalate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[value(name = "customer")]
    Customer,
    #[value(name = "admin")]
    Admin,
    #[value(name = "super_admin")]
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Whether this role carries admin-level privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// KYC verification status of a user or uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    Pending,
    Verified,
    Rejected,
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KycStatus::Pending => "pending",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Status of a loan application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Admin decision on a verification request or loan application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

/// Identity document type accepted by the KYC workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DocumentType {
    #[serde(rename = "CNIC")]
    #[value(name = "cnic")]
    Cnic,
    #[serde(rename = "Passport")]
    #[value(name = "passport")]
    Passport,
    #[serde(rename = "Driving License")]
    #[value(name = "driving-license")]
    DrivingLicense,
}

impl DocumentType {
    /// The value sent in the multipart `doc_type` field.
    pub fn wire_name(&self) -> &'static str {
        match self {
            DocumentType::Cnic => "CNIC",
            DocumentType::Passport => "Passport",
            DocumentType::DrivingLicense => "Driving License",
        }
    }
}

/// Report export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Excel,
    Csv,
}

/// Data set selected for a CSV export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Verifications,
    Loans,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Verifications => "verifications",
            ReportKind::Loans => "loans",
        }
    }
}

/// Authenticated user record as returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    pub status: KycStatus,
}

/// An uploaded identity document as seen by the admin review screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    pub status: KycStatus,
}

/// A customer awaiting (or having completed) KYC review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: KycStatus,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// A loan application. Customer views omit the applicant identity fields;
/// admin views include them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    pub loan_id: i64,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub amount: f64,
    pub term: u32,
    pub purpose: String,
    pub status: LoanStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub applied_at: Option<String>,
    #[serde(default)]
    pub pdf_path: Option<String>,
}

/// An admin account on the roster managed by the super admin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// New-customer registration profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub password: String,
}

/// New-admin profile, super-admin only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Login request body. The identifier travels as `email` for every role;
/// admin roles put their username in it.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Loan application request body
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanApplicationRequest {
    pub amount: f64,
    pub term: u32,
    pub purpose: String,
}

/// Verification decision request body
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub user_id: i64,
    pub action: Decision,
}

/// Loan decision request body; `notes` persists the admin's rationale and
/// is omitted entirely when not provided
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanDecisionRequest {
    pub loan_id: i64,
    pub decision: Decision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Admin deletion request body
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAdminRequest {
    pub admin_id: i64,
}

/// Generic `{success, data?, message?}` response wrapper
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Login response body
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for operations that hand back a downloadable resource
#[derive(Debug, Deserialize)]
pub struct DownloadPayload {
    pub success: bool,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
