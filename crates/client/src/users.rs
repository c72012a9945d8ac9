//! `/users` resource.

use std::sync::Arc;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use qwenht_core::{PageRequest, PaginatedResponse, User, UserId};

use crate::{AuthorizedClient, ClientConfig, ClientError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

pub struct UserService {
    client: Arc<AuthorizedClient>,
    base_url: String,
}

impl UserService {
    pub fn new(client: Arc<AuthorizedClient>, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: format!("{}/users", config.api_url),
        }
    }

    pub async fn list(&self) -> Result<Vec<User>, ClientError> {
        self.client.get_json(self.base_url.clone()).await
    }

    pub async fn get(&self, id: &UserId) -> Result<User, ClientError> {
        self.client.get_json(self.user_url(id)).await
    }

    /// Returns the created user when the server echoes it back.
    pub async fn create(&self, user: &User) -> Result<Option<User>, ClientError> {
        user.validate()?;
        self.client
            .post_json_if_present(self.base_url.clone(), user)
            .await
    }

    pub async fn update(&self, id: &UserId, user: &User) -> Result<(), ClientError> {
        user.validate()?;
        self.client.put_unit(self.user_url(id), user).await
    }

    pub async fn delete(&self, id: &UserId) -> Result<(), ClientError> {
        self.client.delete(self.user_url(id)).await
    }

    /// One page of users, sorted and filtered server-side.
    pub async fn paginated(&self, request: &PageRequest) -> Result<PaginatedResponse<User>, ClientError> {
        let mut url = Url::parse(&format!("{}/paginated", self.base_url))
            .map_err(|e| ClientError::InvalidRequest(format!("bad users URL: {e}")))?;
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        self.client.get_json(url.to_string()).await
    }

    pub async fn change_password(
        &self,
        id: &UserId,
        request: &ChangePasswordRequest,
    ) -> Result<(), ClientError> {
        self.client
            .post_unit(format!("{}/change-password", self.user_url(id)), request)
            .await
    }

    fn user_url(&self, id: &UserId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}
