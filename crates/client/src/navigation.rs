//! Navigation tree provider.

use std::sync::{Arc, Mutex};

use qwenht_core::NavigationItem;

use crate::{AuthorizedClient, ClientConfig, ClientError};

/// Single-slot memo, valid only for the token that fetched it.
#[derive(Debug, Clone)]
struct CachedMenu {
    token: Option<String>,
    items: Vec<NavigationItem>,
}

pub struct NavigationService {
    client: Arc<AuthorizedClient>,
    base_url: String,
    cache: Mutex<Option<CachedMenu>>,
}

impl NavigationService {
    pub fn new(client: Arc<AuthorizedClient>, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: format!("{}/navigation", config.api_url),
            cache: Mutex::new(None),
        }
    }

    /// Menu of the signed-in user, fetched once per session token.
    ///
    /// Any failure empties the memo so the next call fetches again.
    pub async fn user_navigation(&self) -> Result<Vec<NavigationItem>, ClientError> {
        let token = self.client.session().token();
        if let Some(items) = self.cached_for(&token) {
            tracing::debug!("navigation served from cache");
            return Ok(items);
        }

        match self
            .client
            .get_json::<Vec<NavigationItem>>(format!("{}/user", self.base_url))
            .await
        {
            Ok(items) => {
                *self.slot() = Some(CachedMenu {
                    token,
                    items: items.clone(),
                });
                Ok(items)
            }
            Err(err) => {
                self.clear_cache();
                tracing::error!("error loading navigation: {err}");
                Err(err)
            }
        }
    }

    /// Like [`Self::user_navigation`], falling back to the built-in menu.
    pub async fn user_navigation_or_default(&self) -> Vec<NavigationItem> {
        self.user_navigation()
            .await
            .unwrap_or_else(|_| NavigationItem::default_menu())
    }

    pub fn clear_cache(&self) {
        *self.slot() = None;
    }

    pub fn is_cached(&self) -> bool {
        self.slot().is_some()
    }

    pub async fn all(&self) -> Result<Vec<NavigationItem>, ClientError> {
        self.client.get_json(self.base_url.clone()).await
    }

    pub async fn get(&self, id: i64) -> Result<NavigationItem, ClientError> {
        self.client.get_json(format!("{}/{}", self.base_url, id)).await
    }

    pub async fn create(&self, item: &NavigationItem) -> Result<Option<NavigationItem>, ClientError> {
        let created = self
            .client
            .post_json_if_present(self.base_url.clone(), item)
            .await?;
        self.clear_cache();
        Ok(created)
    }

    pub async fn update(&self, id: i64, item: &NavigationItem) -> Result<(), ClientError> {
        self.client
            .put_unit(format!("{}/{}", self.base_url, id), item)
            .await?;
        self.clear_cache();
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.client.delete(format!("{}/{}", self.base_url, id)).await?;
        self.clear_cache();
        Ok(())
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<CachedMenu>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cached_for(&self, token: &Option<String>) -> Option<Vec<NavigationItem>> {
        self.slot()
            .as_ref()
            .filter(|cached| &cached.token == token)
            .map(|cached| cached.items.clone())
    }
}
