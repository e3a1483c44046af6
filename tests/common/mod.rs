//! In-process mock of the portal API for integration tests.
//!
//! Serves the same endpoints and envelope shapes as the real server and
//! records what the client actually sent, so tests can assert on the wire
//! contract rather than on client internals.

use axum::extract::{Multipart, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

pub const PASSWORD: &str = "secret";

/// A recorded multipart document upload
#[derive(Debug, Clone, Default)]
pub struct RecordedUpload {
    pub fields: HashMap<String, String>,
    pub file_name: Option<String>,
    pub file_bytes: Vec<u8>,
}

/// Everything the mock has observed and its mutable loan queue
#[derive(Debug, Default)]
pub struct MockState {
    pub uploads: Vec<RecordedUpload>,
    pub loan_applications: Vec<Value>,
    pub verify_calls: Vec<Value>,
    pub loan_decisions: Vec<Value>,
    pub decision_idempotency_keys: Vec<String>,
    pub created_admins: Vec<Value>,
    pub deleted_admins: Vec<i64>,
    pub csv_types: Vec<Option<String>>,
    pub pending_loans: Vec<Value>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockApi {
    pub base_url: Url,
    pub state: Shared,
}

impl MockApi {
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            pending_loans: vec![
                json!({
                    "loan_id": 42,
                    "customer_name": "Ayesha Khan",
                    "email": "ayesha@example.com",
                    "amount": 5000.0,
                    "term": 12,
                    "purpose": "car repair",
                    "status": "pending",
                    "applied_at": "2026-08-20 09:15:00"
                }),
                json!({
                    "loan_id": 43,
                    "customer_name": "Bilal Ahmed",
                    "email": "bilal@example.com",
                    "amount": 1200.0,
                    "term": 6,
                    "purpose": "tuition",
                    "status": "pending",
                    "applied_at": "2026-08-21 14:03:00"
                }),
            ],
            ..MockState::default()
        }));

        let app = Router::new()
            .route("/login", post(login))
            .route("/register", post(register))
            .route("/upload-document", post(upload_document))
            .route("/customer/apply-loan", post(apply_loan))
            .route("/customer/loans", get(customer_loans))
            .route("/admin/verification-requests", get(verification_requests))
            .route("/admin/verify", post(verify_user))
            .route("/admin/loan-requests", get(loan_requests))
            .route("/admin/loan-decision", post(loan_decision))
            .route("/super/admins", get(list_admins))
            .route("/super/add-admin", post(add_admin))
            .route("/super/delete-admin", post(delete_admin))
            .route("/export/excel", get(export_excel))
            .route("/export/csv", get(export_csv))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock api");
        });

        MockApi {
            base_url: Url::parse(&format!("http://{}", addr)).expect("mock base url"),
            state,
        }
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

fn authed(headers: &HeaderMap) -> bool {
    matches!(bearer(headers), Some(token) if token.starts_with("tok-"))
}

fn forbidden() -> Json<Value> {
    Json(json!({ "success": false }))
}

/// Known accounts: two customers (one verified, one pending), an admin,
/// and a super admin.
fn find_user(identifier: &str, role: &str) -> Option<(String, Value)> {
    match (identifier, role) {
        ("ayesha@example.com", "customer") => Some((
            "tok-customer-7".to_string(),
            json!({
                "id": 7,
                "name": "Ayesha Khan",
                "role": "customer",
                "status": "verified"
            }),
        )),
        ("bilal@example.com", "customer") => Some((
            "tok-customer-11".to_string(),
            json!({
                "id": 11,
                "name": "Bilal Ahmed",
                "role": "customer",
                "status": "pending"
            }),
        )),
        ("admin1", "admin") => Some((
            "tok-admin-1".to_string(),
            json!({
                "id": 1,
                "name": "Admin One",
                "role": "admin",
                "status": "verified"
            }),
        )),
        ("root", "super_admin") => Some((
            "tok-super-1".to_string(),
            json!({
                "id": 2,
                "name": "Root Admin",
                "role": "super_admin",
                "status": "verified"
            }),
        )),
        _ => None,
    }
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    let identifier = body["email"].as_str().unwrap_or_default();
    let role = body["role"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match find_user(identifier, role) {
        Some((token, user)) if password == PASSWORD => {
            Json(json!({ "success": true, "token": token, "user": user }))
        }
        _ => Json(json!({ "success": false, "message": "Invalid credentials" })),
    }
}

async fn register(Json(body): Json<Value>) -> Json<Value> {
    if body["email"].as_str() == Some("dup@example.com") {
        return Json(json!({
            "success": false,
            "message": "Email already exists or error occured."
        }));
    }
    Json(json!({
        "success": true,
        "message": "Registered successfully. Please wait for verification."
    }))
}

async fn upload_document(
    State(state): State<Shared>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }

    let mut upload = RecordedUpload::default();
    while let Some(field) = multipart.next_field().await.expect("read multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            upload.file_name = field.file_name().map(|n| n.to_string());
            upload.file_bytes = field.bytes().await.expect("file bytes").to_vec();
        } else {
            let value = field.text().await.expect("field text");
            upload.fields.insert(name, value);
        }
    }

    state.lock().unwrap().uploads.push(upload);
    Json(json!({ "success": true }))
}

async fn apply_loan(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }
    state.lock().unwrap().loan_applications.push(body);
    Json(json!({ "success": true }))
}

async fn customer_loans(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }
    // One pending loan for the verified customer, nothing for anyone else
    let loans = if params.get("user_id").map(String::as_str) == Some("7") {
        json!([{
            "loan_id": 3,
            "amount": 800.0,
            "term": 4,
            "purpose": "appliances",
            "status": "pending",
            "applied_at": "2026-08-01 11:00:00"
        }])
    } else {
        json!([])
    };
    Json(json!({ "success": true, "data": loans }))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    #[serde(default)]
    show_history: bool,
}

async fn verification_requests(
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }

    let data = if query.show_history {
        json!([
            {
                "user_id": 5,
                "name": "Sara Malik",
                "email": "sara@example.com",
                "status": "verified",
                "documents": []
            },
            {
                "user_id": 6,
                "name": "Omar Farooq",
                "email": "omar@example.com",
                "status": "rejected",
                "documents": []
            }
        ])
    } else {
        json!([{
            "user_id": 11,
            "name": "Bilal Ahmed",
            "email": "bilal@example.com",
            "phone": "0300-1234567",
            "status": "pending",
            "documents": [
                {"type": "CNIC", "number": "12345-6789012-3", "path": "11_CNIC_front.jpg", "status": "pending"}
            ]
        }])
    };
    Json(json!({ "success": true, "data": data }))
}

async fn verify_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }
    state.lock().unwrap().verify_calls.push(body);
    Json(json!({ "success": true }))
}

async fn loan_requests(State(state): State<Shared>, headers: HeaderMap) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }
    let pending = state.lock().unwrap().pending_loans.clone();
    Json(json!({ "success": true, "data": pending }))
}

async fn loan_decision(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }

    let loan_id = body["loan_id"].as_i64().unwrap_or_default();
    let mut guard = state.lock().unwrap();
    if let Some(key) = headers
        .get("x-idempotency-key")
        .and_then(|h| h.to_str().ok())
    {
        guard.decision_idempotency_keys.push(key.to_string());
    }
    guard.loan_decisions.push(body.clone());
    guard
        .pending_loans
        .retain(|loan| loan["loan_id"].as_i64() != Some(loan_id));

    Json(json!({
        "success": true,
        "download_url": format!("/download-pdf/Loan_{}.pdf", loan_id)
    }))
}

async fn list_admins(headers: HeaderMap) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }
    Json(json!({
        "success": true,
        "data": [
            {"id": 1, "name": "Admin One", "email": "admin1@example.com"}
        ]
    }))
}

async fn add_admin(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }
    state.lock().unwrap().created_admins.push(body);
    Json(json!({ "success": true }))
}

async fn delete_admin(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }
    if let Some(id) = body["admin_id"].as_i64() {
        state.lock().unwrap().deleted_admins.push(id);
    }
    Json(json!({ "success": true }))
}

async fn export_excel(headers: HeaderMap) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }
    Json(json!({
        "success": true,
        "download_url": "/download-report/KYC_Report.xlsx"
    }))
}

async fn export_csv(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    if !authed(&headers) {
        return forbidden();
    }
    let kind = params.get("type").cloned();
    state.lock().unwrap().csv_types.push(kind.clone());
    Json(json!({
        "success": true,
        "download_url": format!(
            "/download-report/{}_Export.csv",
            kind.unwrap_or_else(|| "all".to_string())
        )
    }))
}
