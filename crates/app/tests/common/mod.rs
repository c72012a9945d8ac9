#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use qwenht_app::{AppContext, Notifier};
use qwenht_auth::Session;
use qwenht_client::testing::{InMemoryBackend, RecordingNavigator};
use qwenht_client::{ClientConfig, Navigator, Transport};

/// Dialogs answered from a script; every message shown is recorded.
#[derive(Debug, Default)]
pub struct ScriptedNotifier {
    alerts: Mutex<Vec<String>>,
    questions: Mutex<Vec<String>>,
    confirms: Mutex<VecDeque<bool>>,
    prompts: Mutex<VecDeque<Option<String>>>,
}

impl ScriptedNotifier {
    pub fn answer_confirm(&self, answer: bool) {
        self.confirms.lock().unwrap().push_back(answer);
    }

    pub fn answer_prompt(&self, answer: Option<&str>) {
        self.prompts
            .lock()
            .unwrap()
            .push_back(answer.map(str::to_string));
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.alerts.lock().unwrap().last().cloned()
    }

    /// Confirm and prompt messages, in order.
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Notifier for ScriptedNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    /// Unscripted confirmations are accepted.
    fn confirm(&self, message: &str) -> bool {
        self.questions.lock().unwrap().push(message.to_string());
        self.confirms.lock().unwrap().pop_front().unwrap_or(true)
    }

    /// Unscripted prompts are cancelled.
    fn prompt(&self, message: &str) -> Option<String> {
        self.questions.lock().unwrap().push(message.to_string());
        self.prompts.lock().unwrap().pop_front().flatten()
    }
}

pub struct AppHarness {
    pub backend: Arc<InMemoryBackend>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<ScriptedNotifier>,
    pub ctx: AppContext,
}

impl AppHarness {
    pub fn new(backend: InMemoryBackend) -> Self {
        let backend = Arc::new(backend);
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Arc::new(ScriptedNotifier::default());
        let transport: Arc<dyn Transport> = backend.clone();
        let nav: Arc<dyn Navigator> = navigator.clone();
        let dialogs: Arc<dyn Notifier> = notifier.clone();
        let ctx = AppContext::new(
            ClientConfig::default(),
            Arc::new(Session::in_memory()),
            transport,
            nav,
            dialogs,
        );
        Self {
            backend,
            navigator,
            notifier,
            ctx,
        }
    }

    /// Harness whose session holds a token for `alice` with `roles`.
    pub fn signed_in(backend: InMemoryBackend, roles: &[&str]) -> Self {
        let harness = Self::new(backend);
        let token = harness.backend.issue_token("alice", roles);
        harness.ctx.session.login(token).unwrap();
        harness
    }

    pub fn last_paginated_url(&self) -> Option<String> {
        self.backend
            .requests()
            .into_iter()
            .rev()
            .find(|r| r.url.contains("/users/paginated"))
            .map(|r| r.url)
    }
}
