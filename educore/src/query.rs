use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    convert::Infallible,
    fmt,
    num::NonZeroU32,
    str::FromStr,
};

/// Values a filter control may carry to mean "do not filter".
const ALL_SENTINELS: [&str; 3] = ["", "all", "tous"];

/// The selected value for one discrete filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Value(v) => Some(v.as_str()),
        }
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(if ALL_SENTINELS.iter().any(|v| trimmed.eq_ignore_ascii_case(v)) {
            Selection::All
        } else {
            Selection::Value(trimmed.to_string())
        })
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(v) => v,
            Err(e) => match e {},
        }
    }
}

impl From<String> for Selection {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Value(v) => f.write_str(v),
        }
    }
}

/// The user controlled search, filter, page and sort selection of one
/// browsing session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueryState {
    pub search_text: String,
    pub filters: BTreeMap<String, Selection>,
    pub page: NonZeroU32,
    pub sort: Option<String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            filters: BTreeMap::new(),
            page: NonZeroU32::MIN,
            sort: None,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.set_search(value);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Selection>) -> Self {
        self.set_filter(key, value);
        self
    }

    pub fn page(mut self, value: u32) -> Self {
        self.set_page(value);
        self
    }

    pub fn sort(mut self, value: impl Into<String>) -> Self {
        self.set_sort(Some(value.into()));
        self
    }

    pub fn set_search(&mut self, value: impl Into<String>) {
        self.search_text = value.into();
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<Selection>) {
        self.filters.insert(key.into(), value.into());
    }

    /// Page numbers are 1-based; zero is clamped to the first page.
    pub fn set_page(&mut self, value: u32) {
        self.page = NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN);
    }

    pub fn set_sort(&mut self, value: Option<String>) {
        self.sort = value.filter(|v| !v.trim().is_empty());
    }

    /// The search text with surrounding whitespace removed, if any remains.
    pub fn search_term(&self) -> Option<&str> {
        Some(self.search_text.trim()).filter(|s| !s.is_empty())
    }

    /// Filters that actually constrain the result.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter_map(|(k, v)| v.value().map(|v| (k.as_str(), v)))
    }

    /// Request parameters for a full-collection endpoint.
    ///
    /// Empty and "all" values are left out entirely as the API treats a
    /// missing parameter differently from an empty one.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = self.base_params();
        if self.page.get() > 1 {
            params.push(("page".to_string(), self.page.to_string()));
        }
        params
    }

    /// Request parameters for a server-paginated endpoint.
    pub fn to_params_paged(&self) -> Vec<(String, String)> {
        let mut params = self.base_params();
        params.push(("page".to_string(), self.page.to_string()));
        params
    }

    fn base_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(term) = self.search_term() {
            params.push(("search".to_string(), term.to_string()));
        }
        params.extend(
            self.active_filters()
                .map(|(k, v)| (k.to_string(), v.to_string()))
        );
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        params
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn selection_sentinels() {
        assert_eq!(Selection::from("all"), Selection::All);
        assert_eq!(Selection::from("Tous"), Selection::All);
        assert_eq!(Selection::from(""), Selection::All);
        assert_eq!(Selection::from(" 2024 "), Selection::Value("2024".into()));
    }

    #[test]
    fn default_params_empty() {
        assert!(QueryState::new().to_params().is_empty());
        assert_eq!(
            QueryState::new().to_params_paged(),
            vec![("page".to_string(), "1".to_string())],
        );
    }

    #[test]
    fn omit_empty_fields() {
        let query = QueryState::new()
            .search("   ")
            .filter("year", "all")
            .filter("module_id", "")
            .filter("level", "hard");
        assert_eq!(query.to_params(), vec![
            ("level".to_string(), "hard".to_string()),
        ]);
    }

    #[test]
    fn full_params() {
        let query = QueryState::new()
            .search(" réseaux ")
            .filter("year", "2024")
            .sort("title")
            .page(3);
        assert_eq!(query.to_params(), vec![
            ("search".to_string(), "réseaux".to_string()),
            ("year".to_string(), "2024".to_string()),
            ("sort".to_string(), "title".to_string()),
            ("page".to_string(), "3".to_string()),
        ]);
    }

    #[test]
    fn page_clamped() {
        let query = QueryState::new().page(0);
        assert_eq!(query.page.get(), 1);
    }
}
