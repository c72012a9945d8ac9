//! Browser implementations of the dialog, routing and storage seams.

use std::sync::Arc;

use leptos::{RwSignal, SignalSet};

use qwenht_auth::{LocalStorageTokenStore, Session};
use qwenht_client::{ClientConfig, ClientError, Navigator, ReqwestTransport, Transport};

use crate::{AppContext, Notifier};

/// `window.alert`, `window.confirm` and `window.prompt`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(message);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn prompt(&self, message: &str) -> Option<String> {
        web_sys::window()
            .and_then(|w| w.prompt_with_message(message).ok())
            .flatten()
    }
}

/// Queues a target for the router; `NavigationBridge` performs the move.
///
/// The router's navigate function only exists inside `<Router>`, while the
/// interceptor is built before it.
#[derive(Debug, Clone, Copy)]
pub struct BrowserNavigator {
    pending: RwSignal<Option<String>>,
}

impl BrowserNavigator {
    pub fn new(pending: RwSignal<Option<String>>) -> Self {
        Self { pending }
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        self.pending.set(Some(path.to_string()));
    }
}

/// Base URLs baked in at build time, falling back to the defaults.
pub fn config() -> ClientConfig {
    ClientConfig::from_lookup(|key| match key {
        qwenht_client::config::IDENTITY_URL_ENV => option_env!("QWENHT_IDENTITY_URL").map(str::to_string),
        qwenht_client::config::API_URL_ENV => option_env!("QWENHT_API_URL").map(str::to_string),
        _ => None,
    })
}

pub fn window_width() -> u32 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w as u32)
        .unwrap_or(u32::MAX)
}

/// Production context for the browser.
pub fn context(pending: RwSignal<Option<String>>) -> Result<AppContext, ClientError> {
    let config = config();
    let session = Arc::new(Session::new(LocalStorageTokenStore));
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(&config)?);
    Ok(AppContext::new(
        config,
        session,
        transport,
        Arc::new(BrowserNavigator::new(pending)),
        Arc::new(BrowserNotifier),
    ))
}
