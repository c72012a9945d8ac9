//! Navigation menu tree served by `/navigation`.

use serde::{Deserialize, Serialize};

/// One entry of the side menu. Entries form a tree through `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub route: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub children: Vec<NavigationItem>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl NavigationItem {
    pub fn root(id: i64, name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: None,
            route: route.into(),
            parent_id: None,
            children: Vec::new(),
            order: 0,
            is_visible: true,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Menu shown when the navigation endpoint cannot be reached.
    pub fn default_menu() -> Vec<NavigationItem> {
        vec![
            NavigationItem::root(1, "Dashboard", "/dashboard").with_icon("fa fa-tachometer-alt"),
            NavigationItem::root(2, "Users", "/users").with_icon("fa fa-users"),
        ]
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Depth-first search for an entry (or descendant) bound to `route`.
    pub fn find_route(&self, route: &str) -> Option<&NavigationItem> {
        if self.route == route {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_route(route))
    }

    /// Visible entries ordered by `order`, recursively.
    pub fn visible_sorted(items: &[NavigationItem]) -> Vec<NavigationItem> {
        let mut out: Vec<NavigationItem> = items
            .iter()
            .filter(|item| item.is_visible)
            .map(|item| NavigationItem {
                children: Self::visible_sorted(&item.children),
                ..item.clone()
            })
            .collect();
        out.sort_by_key(|item| item.order);
        out
    }
}
