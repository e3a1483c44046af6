//! Typed API client module
//!
//! One client for the whole portal surface: base URL handling, bearer-token
//! injection, idempotency keys, envelope decoding, and error normalization
//! live here instead of being repeated per call site. Operations are grouped
//! the way the original screens were:
//! - `auth` — login, registration, logout
//! - `customer` — document upload, loan application, own loans
//! - `admin` — verification review and loan decisions
//! - `roster` — super-admin management of admin accounts
//! - `reports` — report exports and download URL construction

pub mod admin;
pub mod auth;
pub mod customer;
pub mod models;
pub mod reports;
pub mod roster;

use crate::core::error::{PortalError, Result};
use crate::session::{Session, SessionStore};
use models::Envelope;
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

/// Header carrying a per-request UUID so a server that honors it can drop
/// duplicate submits. The client itself never de-duplicates and never
/// retries.
pub const IDEMPOTENCY_HEADER: &str = "x-idempotency-key";

/// Acknowledge-only response body
type Ack = Envelope<serde_json::Value>;

/// Typed client for the portal API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    /// Build a client against a base URL with a default user agent
    pub fn new(base_url: Url, session: SessionStore) -> Result<Self> {
        Self::with_user_agent(
            base_url,
            session,
            concat!("kyc-portal/", env!("CARGO_PKG_VERSION")),
        )
    }

    pub fn with_user_agent(
        base_url: Url,
        session: SessionStore,
        user_agent: &str,
    ) -> Result<Self> {
        // No request timeout is configured; operations run to completion or
        // transport failure, matching the original client.
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Build a client from the loaded configuration
    pub fn from_config(config: &crate::core::Config) -> Result<Self> {
        let base_url = config
            .api
            .base_url()
            .map_err(|e| PortalError::Config(e.to_string()))?;
        let session = SessionStore::new(config.session.state_file.clone());
        Self::with_user_agent(base_url, session, &config.api.user_agent)
    }

    /// The session provider backing this client
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path against the base URL
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// The active session, failing before any network I/O when logged out
    pub(crate) fn active_session(&self) -> Result<Session> {
        self.session.current()
    }

    pub(crate) fn get(&self, path: &str) -> Result<reqwest::RequestBuilder> {
        Ok(self.http.get(self.endpoint(path)?))
    }

    /// A POST builder carrying a fresh idempotency key
    pub(crate) fn post(&self, path: &str) -> Result<reqwest::RequestBuilder> {
        Ok(self
            .http
            .post(self.endpoint(path)?)
            .header(IDEMPOTENCY_HEADER, Uuid::new_v4().to_string()))
    }

    /// Decode a JSON response body, normalizing undecodable bodies.
    ///
    /// The server reports business failures inside the envelope (often with
    /// a non-2xx status as well), so the body is parsed regardless of status
    /// and the envelope's `success` flag stays authoritative.
    pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| PortalError::Decode {
            status,
            detail: e.to_string(),
        })
    }

    /// Branch on the envelope's declared outcome
    pub(crate) fn accept<T>(envelope: Envelope<T>, fallback: &str) -> Result<Option<T>> {
        if envelope.success {
            Ok(envelope.data)
        } else {
            Err(PortalError::rejected(envelope.message, fallback))
        }
    }

    /// Like `accept`, for list endpoints where a missing `data` means empty
    pub(crate) fn accept_list<T>(envelope: Envelope<Vec<T>>, fallback: &str) -> Result<Vec<T>> {
        Self::accept(envelope, fallback).map(Option::unwrap_or_default)
    }
}
