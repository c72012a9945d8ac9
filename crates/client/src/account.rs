//! Login, registration and logout against the identity server.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{AuthorizedClient, ClientConfig, ClientError};

#[derive(Debug, Clone, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Body of a successful login. Servers differ on the field name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

pub struct AccountService {
    client: Arc<AuthorizedClient>,
    base_url: String,
}

impl AccountService {
    pub fn new(client: Arc<AuthorizedClient>, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: format!("{}/api/account", config.identity_server_url),
        }
    }

    /// Exchange credentials for a token and start the session with it.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response: LoginResponse = self
            .client
            .post_json(
                format!("{}/login", self.base_url),
                &LoginRequest { username, password },
            )
            .await?;

        self.client
            .session()
            .login(response.token)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        tracing::info!(username, "logged in");
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        self.client
            .post_unit(format!("{}/register", self.base_url), request)
            .await?;
        tracing::info!(email = %request.email, "account registered");
        Ok(())
    }

    /// Client-side only: the token is dropped, the server is not told.
    pub fn logout(&self) {
        self.client.session().logout();
    }
}
