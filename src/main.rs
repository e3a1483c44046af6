//! KYC Portal command-line client
//!
//! Drives every portal workflow operation from the command line. Results
//! print as JSON on stdout; diagnostics go to stderr (or a log file) via
//! tracing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kyc_portal::client::models::{
    AdminProfile, Decision, DocumentType, RegisterProfile, ReportFormat, ReportKind, Role,
};
use kyc_portal::core::config::CliOverrides;
use kyc_portal::core::{Config, ErrorReport, Logger};
use kyc_portal::{ApiClient, PortalError};

#[derive(Debug, Parser)]
#[command(name = "kyc-portal")]
#[command(about = "KYC and consumer-lending portal client", version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Portal API base URL
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Session state file path
    #[arg(long, value_name = "FILE", global = true)]
    session_file: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and store the session
    Login {
        /// Email (customer) or username (admin roles)
        identifier: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum, default_value_t = Role::Customer)]
        role: Role,
    },
    /// Register a new customer account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: NaiveDate,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Upload an identity document for KYC review
    UploadDocument {
        #[arg(long, value_enum)]
        doc_type: DocumentType,
        #[arg(long)]
        number: String,
        /// Expiry date (YYYY-MM-DD)
        #[arg(long)]
        expiry: NaiveDate,
        /// Path to the document image
        file: PathBuf,
    },
    /// Apply for a loan (verified customers only)
    ApplyLoan {
        amount: f64,
        /// Term in months
        term: u32,
        purpose: String,
    },
    /// List your own loan applications
    Loans,
    /// List verification requests (admin)
    Verifications {
        /// Include completed history instead of the pending queue
        #[arg(long)]
        history: bool,
    },
    /// Approve or reject a customer's verification (admin)
    Verify {
        user_id: i64,
        #[arg(value_enum)]
        decision: Decision,
    },
    /// List pending loan applications (admin)
    LoanRequests,
    /// Approve or reject a loan application (admin)
    LoanDecision {
        loan_id: i64,
        #[arg(value_enum)]
        decision: Decision,
        /// Free-text rationale persisted for the customer
        #[arg(long)]
        notes: Option<String>,
    },
    /// List the admin roster (super admin)
    Admins,
    /// Create an admin account (super admin)
    AddAdmin {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Delete an admin account (super admin)
    DeleteAdmin { admin_id: i64 },
    /// Export a report and print its download URL (admin)
    Export {
        #[arg(value_enum)]
        format: ReportFormat,
        /// Data set for CSV exports
        #[arg(long, value_enum)]
        kind: Option<ReportKind>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        config: cli.config.clone(),
        base_url: cli.base_url.clone(),
        session_file: cli.session_file.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = match Config::load(&overrides) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Print to stderr since logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let _logger = Logger::init(&config.logging)?;
    let client = ApiClient::from_config(&config)?;

    match run(&client, cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(err) => {
            tracing::error!(kind = err.kind(), "{}", err);
            println!(
                "{}",
                serde_json::to_string_pretty(&ErrorReport::from_error(&err))?
            );
            std::process::exit(1);
        }
    }
}

async fn run(
    client: &ApiClient,
    command: Command,
) -> Result<serde_json::Value, PortalError> {
    match command {
        Command::Login {
            identifier,
            password,
            role,
        } => {
            let user = client.login(&identifier, &password, role).await?;
            Ok(serde_json::json!({ "success": true, "user": user }))
        }
        Command::Register {
            first_name,
            last_name,
            email,
            phone,
            dob,
            password,
        } => {
            let profile = RegisterProfile {
                first_name,
                last_name,
                email,
                phone,
                dob: dob.format("%Y-%m-%d").to_string(),
                password,
            };
            let message = client.register(&profile).await?;
            Ok(serde_json::json!({ "success": true, "message": message }))
        }
        Command::Logout => {
            client.logout()?;
            Ok(serde_json::json!({ "success": true }))
        }
        Command::Whoami => {
            let session = client.whoami()?;
            Ok(serde_json::json!({ "user": session.user }))
        }
        Command::UploadDocument {
            doc_type,
            number,
            expiry,
            file,
        } => {
            client
                .upload_document(doc_type, &number, expiry, &file)
                .await?;
            Ok(serde_json::json!({
                "success": true,
                "message": "Document uploaded successfully"
            }))
        }
        Command::ApplyLoan {
            amount,
            term,
            purpose,
        } => {
            client.apply_for_loan(amount, term, &purpose).await?;
            Ok(serde_json::json!({
                "success": true,
                "message": "Loan application submitted"
            }))
        }
        Command::Loans => {
            let loans = client.list_own_loans().await?;
            Ok(serde_json::json!({ "success": true, "data": loans }))
        }
        Command::Verifications { history } => {
            let requests = client.list_verification_requests(history).await?;
            Ok(serde_json::json!({ "success": true, "data": requests }))
        }
        Command::Verify { user_id, decision } => {
            client.decide_verification(user_id, decision).await?;
            Ok(serde_json::json!({ "success": true }))
        }
        Command::LoanRequests => {
            let loans = client.list_loan_requests().await?;
            Ok(serde_json::json!({ "success": true, "data": loans }))
        }
        Command::LoanDecision {
            loan_id,
            decision,
            notes,
        } => {
            let download_url = client
                .decide_loan(loan_id, decision, notes.as_deref())
                .await?;
            Ok(serde_json::json!({
                "success": true,
                "download_url": download_url.map(|u| u.to_string())
            }))
        }
        Command::Admins => {
            let admins = client.list_admins().await?;
            Ok(serde_json::json!({ "success": true, "data": admins }))
        }
        Command::AddAdmin {
            first_name,
            last_name,
            email,
            password,
        } => {
            let profile = AdminProfile {
                first_name,
                last_name,
                email,
                password,
            };
            client.create_admin(&profile).await?;
            Ok(serde_json::json!({ "success": true }))
        }
        Command::DeleteAdmin { admin_id } => {
            client.delete_admin(admin_id).await?;
            Ok(serde_json::json!({ "success": true }))
        }
        Command::Export { format, kind } => {
            let url = client.export_report(format, kind).await?;
            Ok(serde_json::json!({
                "success": true,
                "download_url": url.to_string()
            }))
        }
    }
}
