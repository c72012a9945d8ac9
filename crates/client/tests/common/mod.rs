#![allow(dead_code)]

use std::sync::Arc;

use qwenht_auth::Session;
use qwenht_client::testing::{InMemoryBackend, RecordingNavigator};
use qwenht_client::{
    AccountService, AuthorizedClient, ClientConfig, NavigationService, Transport, UserService,
};

pub struct Harness {
    pub backend: Arc<InMemoryBackend>,
    pub session: Arc<Session>,
    pub navigator: Arc<RecordingNavigator>,
    pub client: Arc<AuthorizedClient>,
    pub config: ClientConfig,
}

impl Harness {
    pub fn new(backend: InMemoryBackend) -> Self {
        let backend = Arc::new(backend);
        let session = Arc::new(Session::in_memory());
        let navigator = Arc::new(RecordingNavigator::new());
        let transport: Arc<dyn Transport> = backend.clone();
        let client = Arc::new(AuthorizedClient::new(transport, session.clone(), navigator.clone()));
        Self {
            backend,
            session,
            navigator,
            client,
            config: ClientConfig::default(),
        }
    }

    /// Harness whose session already holds a token the backend accepts.
    pub fn signed_in(backend: InMemoryBackend, roles: &[&str]) -> Self {
        let harness = Self::new(backend);
        let token = harness.backend.issue_token("alice", roles);
        harness.session.login(token).unwrap();
        harness
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.client.clone(), &self.config)
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.client.clone(), &self.config)
    }

    pub fn navigation(&self) -> NavigationService {
        NavigationService::new(self.client.clone(), &self.config)
    }
}
