//! Navigation menu.

use qwenht_client::NavigationService;
use qwenht_core::NavigationItem;

/// Widths at or below this many pixels get the collapsible menu.
pub const MOBILE_BREAKPOINT: u32 = 768;

pub fn is_mobile(width: u32) -> bool {
    width <= MOBILE_BREAKPOINT
}

/// Exact match against the current path, as the menu highlights entries.
pub fn is_active(current_path: &str, route: &str) -> bool {
    current_path == route
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidebarView {
    items: Vec<NavigationItem>,
    is_open: bool,
}

impl SidebarView {
    /// The user's menu; the built-in two entries stand in on failure.
    pub async fn fetch(navigation: &NavigationService) -> Vec<NavigationItem> {
        navigation.user_navigation_or_default().await
    }

    pub async fn load(&mut self, navigation: &NavigationService) {
        let items = Self::fetch(navigation).await;
        self.set_items(items);
    }

    pub fn set_items(&mut self, items: Vec<NavigationItem>) {
        self.items = NavigationItem::visible_sorted(&items);
    }

    pub fn items(&self) -> &[NavigationItem] {
        &self.items
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// The window was resized; the drawer only stays open on mobile widths.
    pub fn on_resize(&mut self, width: u32) {
        if !is_mobile(width) {
            self.is_open = false;
        }
    }

    /// A menu entry was followed.
    pub fn on_navigate(&mut self, item: &NavigationItem, width: u32) {
        tracing::debug!(route = %item.route, "navigating");
        if is_mobile(width) {
            self.is_open = false;
        }
    }
}
