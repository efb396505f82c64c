//! User account endpoints (list / create / update / delete).

use crate::client::ApiClient;
use crate::types::{CreateUserRequest, UpdateUserRequest, UserPayload, UsersEnvelope};
use crate::Error;

impl ApiClient {
    /// Fetch the full account list.
    pub async fn list_users(&self) -> Result<Vec<UserPayload>, Error> {
        let envelope: UsersEnvelope = self.get("users").await?;
        Ok(envelope.into_users())
    }

    /// Create a new account. Returns the created record when the
    /// service echoes it back; callers should re-fetch regardless.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<serde_json::Value, Error> {
        self.post("users", request).await
    }

    /// Update an account by id. `request.password == None` leaves the
    /// stored password untouched.
    pub async fn update_user(
        &self,
        id: &str,
        request: &UpdateUserRequest,
    ) -> Result<serde_json::Value, Error> {
        self.put(&format!("users/{id}"), request).await
    }

    /// Delete an account by id.
    pub async fn delete_user(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("users/{id}")).await
    }
}
