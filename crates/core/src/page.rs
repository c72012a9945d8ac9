//! Server-side paging and sorting.
//!
//! Pages are 1-based on the wire. A `PaginatedResponse` is a snapshot: the
//! client never assumes consistency between two pages fetched separately.

use serde::{Deserialize, Serialize};

/// Sort order of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Current sort column and direction of a table.
///
/// Both fields are either set together or cleared together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    field: Option<String>,
    direction: Option<SortDirection>,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: Some(field.into()),
            direction: Some(direction),
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.direction
    }

    pub fn is_sorted(&self) -> bool {
        self.field.is_some() && self.direction.is_some()
    }

    /// Apply a click on column `field`.
    ///
    /// A new column starts ascending; repeated clicks on the same column cycle
    /// ascending → descending → unsorted.
    pub fn toggle(&mut self, field: &str) {
        if self.field.as_deref() != Some(field) {
            *self = Self::by(field, SortDirection::Asc);
            return;
        }
        *self = match self.direction {
            Some(SortDirection::Asc) => Self::by(field, SortDirection::Desc),
            Some(SortDirection::Desc) => Self::unsorted(),
            None => Self::by(field, SortDirection::Asc),
        };
    }
}

/// Parameters of one `GET /users/paginated` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub sort: SortState,
    pub search_term: Option<String>,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            sort: SortState::unsorted(),
            search_term: None,
        }
    }

    pub fn sorted(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search_term = if term.trim().is_empty() { None } else { Some(term) };
        self
    }

    /// Query-string pairs, omitting everything that is unset.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(field) = self.sort.field().filter(|f| !f.is_empty()) {
            pairs.push(("sortField", field.to_string()));
        }
        if let Some(direction) = self.sort.direction() {
            pairs.push(("sortDirection", direction.as_str().to_string()));
        }
        if let Some(term) = self.search_term.as_deref().filter(|t| !t.trim().is_empty()) {
            pairs.push(("searchTerm", term.to_string()));
        }
        pairs
    }
}

/// One page of results plus the totals needed to render a paginator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Cut page `page` (1-based) of `page_size` out of an already ordered slice.
    pub fn from_slice(items: &[T], page: u32, page_size: u32) -> Self
    where
        T: Clone,
    {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total = items.len();
        let start = (page as usize - 1).saturating_mul(page_size as usize);
        let data = items
            .iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();

        Self {
            data,
            total_count: total as u64,
            page_size,
            current_page: page,
            total_pages: total.div_ceil(page_size as usize) as u32,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}
