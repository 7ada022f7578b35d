use serde::{Deserialize, Serialize};
use std::ops::Deref;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// A fetched collection together with the server pagination, if the
/// endpoint paginates.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

impl<T> Listing<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items, pagination: None }
    }
}

impl<T> Deref for Listing<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/// The response shapes emitted by list endpoints.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawListing<T> {
    Paged {
        data: Vec<T>,
        last_page: u32,
        #[serde(default)]
        current_page: Option<u32>,
    },
    Bare(Vec<T>),
}

impl<T> RawListing<T> {
    /// Normalize, falling back to `requested_page` where the envelope
    /// omits the current page.
    pub fn into_listing(self, requested_page: u32) -> Listing<T> {
        match self {
            RawListing::Bare(items) => items.into(),
            RawListing::Paged { data, last_page, current_page } => Listing {
                items: data,
                pagination: Some(Pagination {
                    current_page: current_page.unwrap_or(requested_page).max(1),
                    total_pages: last_page.max(1),
                }),
            },
        }
    }
}

impl<T> From<RawListing<T>> for Listing<T> {
    fn from(raw: RawListing<T>) -> Self {
        raw.into_listing(1)
    }
}
