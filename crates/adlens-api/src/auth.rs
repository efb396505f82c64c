//! Login / logout endpoints.
//!
//! Login needs only the API key header; the returned access token is
//! what later requests attach as the bearer credential. A client holds
//! its token for its whole lifetime — re-authentication means building
//! a fresh [`ApiClient`](crate::ApiClient) with the new token.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::client::ApiClient;
use crate::types::LoginResponse;
use crate::Error;

impl ApiClient {
    /// Exchange email + password for an access token.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, Error> {
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        match self.post("login", &body).await {
            Ok(resp) => Ok(resp),
            // The service answers 401 to bad credentials; on a client
            // without a bearer that surfaces as InvalidApiKey, which is
            // misleading here.
            Err(Error::InvalidApiKey | Error::SessionExpired) => Err(Error::Authentication {
                message: "invalid email or password".into(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Invalidate the current access token server-side.
    pub async fn logout(&self) -> Result<(), Error> {
        self.post_no_response("logout", &json!({})).await
    }
}
