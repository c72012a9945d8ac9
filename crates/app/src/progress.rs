use std::sync::Arc;

use tokio::sync::watch;

/// Global "request in flight" indicator driving the top progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    loading: Arc<watch::Sender<bool>>,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBar {
    pub fn new() -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            loading: Arc::new(loading),
        }
    }

    pub fn show(&self) {
        self.loading.send_replace(true);
    }

    pub fn hide(&self) {
        self.loading.send_replace(false);
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }
}
