//! The client-side filter and sort engine.
//!
//! Everything here is synchronous and free of hidden state: the same
//! items and query always derive the same view, and the source
//! collection is never reordered in place.
use rand::{
    seq::SliceRandom,
    Rng,
};
use std::cmp::Ordering;

use crate::{
    query::QueryState,
    resource::Resource,
};

mod collate;

pub use collate::compare;

/// Per-resource configuration of the fields the engine looks at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrowserSpec {
    /// Fields matched against the free text query.
    pub search_fields: Vec<String>,
    /// Discrete filters offered to the user.
    pub filter_keys: Vec<String>,
    /// Fields the collection may be ordered by.
    pub sort_keys: Vec<String>,
}

impl BrowserSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_field(mut self, value: impl Into<String>) -> Self {
        self.search_fields.push(value.into());
        self
    }

    pub fn filter_key(mut self, value: impl Into<String>) -> Self {
        self.filter_keys.push(value.into());
        self
    }

    pub fn sort_key(mut self, value: impl Into<String>) -> Self {
        self.sort_keys.push(value.into());
        self
    }

    pub fn modules() -> Self {
        Self::new()
            .search_field("name")
            .search_field("description")
            .search_field("year")
            .filter_key("year")
            .sort_key("name")
            .sort_key("year")
    }

    pub fn exams() -> Self {
        Self::new()
            .search_field("title")
            .search_field("module")
            .filter_key("year")
            .filter_key("module_id")
            .sort_key("title")
            .sort_key("year")
    }

    pub fn documents() -> Self {
        Self::new()
            .search_field("title")
            .search_field("description")
            .filter_key("module_id")
            .sort_key("title")
    }

    pub fn exercises() -> Self {
        Self::new()
            .search_field("title")
            .search_field("description")
            .filter_key("module_id")
            .filter_key("difficulty_level")
            .sort_key("title")
    }

    pub fn for_kind(kind: &str) -> Option<Self> {
        match kind {
            "modules" => Some(Self::modules()),
            "exams" => Some(Self::exams()),
            "documents" => Some(Self::documents()),
            "exercises" => Some(Self::exercises()),
            _ => None,
        }
    }
}

pub fn matches_search<T: Resource>(item: &T, needle: &str, spec: &BrowserSpec) -> bool {
    spec.search_fields
        .iter()
        .filter_map(|key| item.field(key))
        .any(|value| value.to_lowercase().contains(needle))
}

pub fn matches_filters<T: Resource>(item: &T, query: &QueryState) -> bool {
    query.active_filters()
        .all(|(key, value)| item.field(key).as_deref() == Some(value))
}

/// Derive the ordered view of `items` for `query`.
pub fn apply<'a, T: Resource>(
    items: &'a [T],
    query: &QueryState,
    spec: &BrowserSpec,
) -> Vec<&'a T> {
    let needle = query.search_term().map(str::to_lowercase);
    let mut result = items.iter()
        .filter(|item| match &needle {
            Some(needle) => matches_search(*item, needle, spec),
            None => true,
        })
        .filter(|item| matches_filters(*item, query))
        .collect::<Vec<_>>();

    if let Some(key) = query.sort.as_deref() {
        // sort_by is stable, so equal keys retain fetch order
        result.sort_by(|a, b| match (a.field(key), b.field(key)) {
            (Some(a), Some(b)) => compare(&a, &b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
    result
}

/// Pick up to `count` items at random, as shown before the user has
/// entered any query.
pub fn sample<'a, T, R: Rng + ?Sized>(items: &'a [T], count: usize, rng: &mut R) -> Vec<&'a T> {
    items.choose_multiple(rng, count).collect()
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};
    use crate::resource::Module;
    use super::*;

    fn module(id: i64, name: &str, year: &str) -> Module {
        Module {
            id,
            name: Some(name.to_string()),
            year: Some(year.to_string()),
            ..Default::default()
        }
    }

    fn ids(items: &[&Module]) -> Vec<i64> {
        items.iter().map(|m| m.id).collect()
    }

    #[test]
    fn sort_missing_field_last() {
        let mut items = vec![module(1, "Zèbre", "2023"), module(2, "abc", "2024")];
        items.push(Module { id: 3, name: Some("Aaa".into()), ..Default::default() });
        let query = QueryState::new().sort("year");
        assert_eq!(ids(&apply(&items, &query, &BrowserSpec::modules())), vec![1, 2, 3]);
        let query = QueryState::new().sort("name");
        assert_eq!(ids(&apply(&items, &query, &BrowserSpec::modules())), vec![3, 2, 1]);
    }

    #[test]
    fn sort_is_stable() {
        let items = vec![
            module(1, "B", "2024"),
            module(2, "A", "2023"),
            module(3, "C", "2024"),
            module(4, "D", "2023"),
        ];
        let query = QueryState::new().sort("year");
        assert_eq!(ids(&apply(&items, &query, &BrowserSpec::modules())), vec![2, 4, 1, 3]);
    }

    #[test]
    fn search_any_configured_field() {
        let mut items = vec![module(1, "Réseaux", "2ème Année"), module(2, "Bases", "1ère Année")];
        items[1].description = Some("SQL et RÉSEAUX".into());
        let query = QueryState::new().search("réseaux");
        assert_eq!(ids(&apply(&items, &query, &BrowserSpec::modules())), vec![1, 2]);
        let query = QueryState::new().search("ANNÉE");
        assert_eq!(ids(&apply(&items, &query, &BrowserSpec::modules())), vec![1, 2]);
        // description is not searched when not configured
        let spec = BrowserSpec::new().search_field("name");
        let query = QueryState::new().search("sql");
        assert!(apply(&items, &query, &spec).is_empty());
    }

    #[test]
    fn filter_missing_field_excluded() {
        let items = vec![module(1, "A", "2024"), Module { id: 2, ..Default::default() }];
        let query = QueryState::new().filter("year", "2024");
        assert_eq!(ids(&apply(&items, &query, &BrowserSpec::modules())), vec![1]);
    }

    #[test]
    fn sample_bounded() {
        let items = (1..=20).map(|i| module(i, "M", "2024")).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(42);
        let picked = sample(&items, 9, &mut rng);
        assert_eq!(picked.len(), 9);
        let mut picked_ids = ids(&picked);
        picked_ids.sort();
        picked_ids.dedup();
        assert_eq!(picked_ids.len(), 9);
        assert_eq!(sample(&items[..3], 9, &mut rng).len(), 3);
    }
}
