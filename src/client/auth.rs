//! Authentication operations

use crate::client::models::{LoginPayload, LoginRequest, RegisterProfile, Role, User};
use crate::client::{Ack, ApiClient};
use crate::core::error::{PortalError, Result};
use crate::session::Session;

impl ApiClient {
    /// Log in and persist the returned session.
    ///
    /// The identifier is an email for customers and a username for admin
    /// roles; the wire field is `email` either way. On success the session
    /// store holds exactly the returned token and user object.
    pub async fn login(&self, identifier: &str, password: &str, role: Role) -> Result<User> {
        tracing::info!(%role, "Login attempt");

        let req = LoginRequest {
            email: identifier.to_string(),
            password: password.to_string(),
            role,
        };
        let resp = self.post("/login")?.json(&req).send().await?;
        let payload: LoginPayload = Self::decode(resp).await?;

        if !payload.success {
            tracing::warn!(%role, "Login rejected");
            return Err(PortalError::rejected(payload.message, "Invalid credentials"));
        }

        let (Some(token), Some(user)) = (payload.token, payload.user) else {
            return Err(PortalError::Decode {
                status: 200,
                detail: "login succeeded without token or user".to_string(),
            });
        };

        self.session().save(&Session {
            token,
            user: user.clone(),
        })?;

        tracing::info!(user_id = user.id, role = %user.role, status = %user.status, "Login successful");
        Ok(user)
    }

    /// Register a new customer profile. Does not log the user in; the server
    /// creates the account in `pending` status awaiting verification.
    pub async fn register(&self, profile: &RegisterProfile) -> Result<String> {
        tracing::info!(email = %profile.email, "Registering new customer");

        let resp = self.post("/register")?.json(profile).send().await?;
        let ack: Ack = Self::decode(resp).await?;

        if ack.success {
            Ok(ack
                .message
                .unwrap_or_else(|| "Registered successfully".to_string()))
        } else {
            Err(PortalError::rejected(ack.message, "Error registering"))
        }
    }

    /// Clear all session state. Local only; the server keeps no session to
    /// invalidate. After this, protected operations fail before any network
    /// I/O until the next login.
    pub fn logout(&self) -> Result<()> {
        self.session().clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// The active session, for display
    pub fn whoami(&self) -> Result<Session> {
        self.active_session()
    }
}
