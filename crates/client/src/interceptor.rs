//! Bearer attachment and forced logout on 401.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use qwenht_auth::{LOGIN_ROUTE, Session};

use crate::ClientError;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Routing seam used when the API rejects the session.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Wraps a [`Transport`] so every call carries the session's bearer token.
///
/// Exactly one attempt is made per call. A 401 clears the session and sends
/// the user to the login screen, then the error is still returned so the call
/// site can react.
pub struct AuthorizedClient {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,
}

impl AuthorizedClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<Session>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            session,
            navigator,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let request = match self.session.token() {
            Some(token) => request.with_header("Authorization", format!("Bearer {token}")),
            None => request,
        };

        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(%method, %url, "request failed: {err}");
                return Err(err);
            }
        };

        if response.status == 401 {
            tracing::warn!(%method, %url, "API rejected the session; signing out");
            self.session.logout();
            self.navigator.navigate(LOGIN_ROUTE);
            return Err(ClientError::Unauthorized);
        }

        if !response.is_success() {
            let err = ClientError::from_response(response.status, &response.body);
            tracing::error!(%method, %url, status = response.status, "request rejected: {err}");
            return Err(err);
        }

        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: impl Into<String>) -> Result<T, ClientError> {
        self.send(HttpRequest::get(url)).await?.json()
    }

    pub async fn post_json<B, T>(&self, url: impl Into<String>, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(HttpRequest::post(url).with_json(body)?).await?.json()
    }

    /// POST that may answer with an empty 2xx body.
    pub async fn post_json_if_present<B, T>(
        &self,
        url: impl Into<String>,
        body: &B,
    ) -> Result<Option<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(HttpRequest::post(url).with_json(body)?)
            .await?
            .json_if_present()
    }

    /// PUT whose response body is ignored; any 2xx is success.
    pub async fn put_unit<B: Serialize + ?Sized>(
        &self,
        url: impl Into<String>,
        body: &B,
    ) -> Result<(), ClientError> {
        self.send(HttpRequest::put(url).with_json(body)?).await.map(|_| ())
    }

    /// POST whose response body is ignored.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        url: impl Into<String>,
        body: &B,
    ) -> Result<(), ClientError> {
        self.send(HttpRequest::post(url).with_json(body)?).await.map(|_| ())
    }

    pub async fn delete(&self, url: impl Into<String>) -> Result<(), ClientError> {
        self.send(HttpRequest::delete(url)).await.map(|_| ())
    }
}
