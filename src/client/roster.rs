//! Super-admin roster management

use crate::client::models::{AdminAccount, AdminProfile, DeleteAdminRequest};
use crate::client::{Ack, ApiClient};
use crate::core::error::Result;
use crate::workflow::guard;

impl ApiClient {
    /// List the admin roster
    pub async fn list_admins(&self) -> Result<Vec<AdminAccount>> {
        let session = self.active_session()?;
        guard::require_super_admin(&session.user)?;

        let resp = self
            .get("/super/admins")?
            .bearer_auth(&session.token)
            .send()
            .await?;
        let envelope = Self::decode(resp).await?;
        Self::accept_list(envelope, "Failed to list admins")
    }

    /// Create a new admin account
    pub async fn create_admin(&self, profile: &AdminProfile) -> Result<()> {
        let session = self.active_session()?;
        guard::require_super_admin(&session.user)?;

        tracing::info!(email = %profile.email, "Creating admin");

        let resp = self
            .post("/super/add-admin")?
            .bearer_auth(&session.token)
            .json(profile)
            .send()
            .await?;
        let ack: Ack = Self::decode(resp).await?;
        Self::accept(ack, "Failed to create admin")?;
        Ok(())
    }

    /// Delete an admin account from the roster
    pub async fn delete_admin(&self, admin_id: i64) -> Result<()> {
        let session = self.active_session()?;
        guard::require_super_admin(&session.user)?;

        tracing::info!(admin_id, "Deleting admin");

        let resp = self
            .post("/super/delete-admin")?
            .bearer_auth(&session.token)
            .json(&DeleteAdminRequest { admin_id })
            .send()
            .await?;
        let ack: Ack = Self::decode(resp).await?;
        Self::accept(ack, "Failed to delete admin")?;
        Ok(())
    }
}
