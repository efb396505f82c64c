//! User account management: validation, CRUD, and the post-mutation
//! re-fetch that keeps the store authoritative.

use adlens_api::{ApiClient, CreateUserRequest, UpdateUserRequest};
use tracing::info;

use crate::error::CoreError;
use crate::model::UserRecord;
use crate::store::DashboardStore;

/// Form data for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub is_active: bool,
}

/// Form data for editing an account. A `None` password keeps the
/// current one.
#[derive(Debug, Clone)]
pub struct AccountEdit {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub role: String,
    pub is_active: bool,
}

/// Account CRUD against the gateway. Every successful mutation is
/// followed by a full re-fetch; the service response is never merged
/// locally.
#[derive(Debug)]
pub struct AccountService {
    api: ApiClient,
    store: DashboardStore,
}

impl AccountService {
    pub fn new(api: ApiClient, store: DashboardStore) -> Self {
        Self { api, store }
    }

    /// Fetch the full user collection into the store.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let users = self.api.list_users().await?;
        self.store
            .replace_users(users.into_iter().map(UserRecord::from).collect());
        Ok(())
    }

    pub async fn create(&self, account: NewAccount) -> Result<(), CoreError> {
        validate_identity(&account.username, &account.email)?;
        if account.password.trim().is_empty() {
            return Err(CoreError::validation("password", "must not be empty"));
        }
        self.api
            .create_user(&CreateUserRequest {
                username: account.username.clone(),
                email: account.email,
                password: account.password,
                role: account.role,
                is_active: account.is_active,
            })
            .await?;
        info!(username = %account.username, "account created");
        self.refresh().await
    }

    pub async fn update(&self, id: &str, edit: AccountEdit) -> Result<(), CoreError> {
        validate_identity(&edit.username, &edit.email)?;
        // A blank password on the form means "unchanged"; it must not
        // reach the wire as an empty string.
        let password = edit.password.filter(|p| !p.trim().is_empty());
        self.api
            .update_user(
                id,
                &UpdateUserRequest {
                    username: edit.username,
                    email: edit.email,
                    password,
                    role: edit.role,
                    is_active: edit.is_active,
                },
            )
            .await?;
        info!(id, "account updated");
        self.refresh().await
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.api.delete_user(id).await?;
        info!(id, "account deleted");
        self.refresh().await
    }
}

fn validate_identity(username: &str, email: &str) -> Result<(), CoreError> {
    if username.trim().is_empty() {
        return Err(CoreError::validation("username", "must not be empty"));
    }
    if email.trim().is_empty() {
        return Err(CoreError::validation("email", "must not be empty"));
    }
    if !email.contains('@') {
        return Err(CoreError::validation("email", "must contain '@'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_validation() {
        assert!(validate_identity("ana", "ana@example.com").is_ok());
        assert!(validate_identity("", "ana@example.com").is_err());
        assert!(validate_identity("ana", "   ").is_err());
        assert!(validate_identity("ana", "not-an-email").is_err());
    }
}
