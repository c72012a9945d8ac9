//! Services and seams shared by every screen.

use std::sync::Arc;

use qwenht_auth::{LOGIN_ROUTE, Session};
use qwenht_client::{
    AccountService, AuthorizedClient, ClientConfig, NavigationService, Navigator, Transport,
    UserService,
};

use crate::{Notifier, ProgressBar};

/// Application state handed to every view.
///
/// One instance per front-end; the session and the navigation memo are the
/// only mutable globals and both live here.
#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub session: Arc<Session>,
    pub client: Arc<AuthorizedClient>,
    pub accounts: Arc<AccountService>,
    pub navigation: Arc<NavigationService>,
    pub users: Arc<UserService>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub progress: ProgressBar,
}

impl AppContext {
    pub fn new(
        config: ClientConfig,
        session: Arc<Session>,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let client = Arc::new(AuthorizedClient::new(
            transport,
            session.clone(),
            navigator.clone(),
        ));
        let accounts = Arc::new(AccountService::new(client.clone(), &config));
        let navigation = Arc::new(NavigationService::new(client.clone(), &config));
        let users = Arc::new(UserService::new(client.clone(), &config));

        Self {
            config,
            session,
            client,
            accounts,
            navigation,
            users,
            notifier,
            navigator,
            progress: ProgressBar::new(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.session.has_role(qwenht_auth::Role::ADMIN.as_str())
    }

    /// Drop the session and the menu it fetched, then go to the login screen.
    pub fn logout(&self) {
        self.accounts.logout();
        self.navigation.clear_cache();
        self.navigator.navigate(LOGIN_ROUTE);
    }
}
