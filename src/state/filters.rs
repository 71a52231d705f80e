//! Article filter store and filter-set merging.
//!
//! DESIGN
//! ======
//! `ArticleFilters` is the ambient store edited by page-level controls;
//! callers of the feed pass per-call overrides. Both flatten into a
//! [`FilterSet`], a sorted map whose canonical JSON doubles as the cache key.

#[cfg(test)]
#[path = "filters_test.rs"]
mod filters_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Merged, empty-pruned query filters for the article feed.
pub type FilterSet = BTreeMap<String, Value>;

/// Sort orders offered by the article feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleSort {
    #[default]
    Newest,
    #[serde(rename = "Most Liked")]
    MostLiked,
    #[serde(rename = "Most Comments")]
    MostComments,
}

impl ArticleSort {
    pub const ALL: [Self; 3] = [Self::Newest, Self::MostLiked, Self::MostComments];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::MostLiked => "Most Liked",
            Self::MostComments => "Most Comments",
        }
    }
}

/// Time windows offered by the article feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricPeriod {
    Day,
    Week,
    Month,
    Year,
    #[default]
    AllTime,
}

impl MetricPeriod {
    pub const ALL: [Self; 5] = [Self::Day, Self::Week, Self::Month, Self::Year, Self::AllTime];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Year => "Year",
            Self::AllTime => "All Time",
        }
    }
}

/// Ambient article filters shared by every feed on the page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFilters {
    pub sort: ArticleSort,
    pub period: MetricPeriod,
    /// Free-text search.
    pub query: Option<String>,
    pub tags: Vec<i64>,
    pub username: Option<String>,
}

impl ArticleFilters {
    /// Flatten into a filter set (empty values included; merging prunes them).
    #[must_use]
    pub fn to_filter_set(&self) -> FilterSet {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            _ => FilterSet::new(),
        }
    }
}

/// True for values that carry no filtering intent.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Drop keys whose value is null, an empty string or an empty array.
#[must_use]
pub fn remove_empty(filters: FilterSet) -> FilterSet {
    filters
        .into_iter()
        .filter(|(_, v)| !is_empty_value(v))
        .collect()
}

/// Merge ambient store filters with per-call overrides.
///
/// Overrides win on key collisions. With `disable_store_filters` only the
/// overrides participate.
#[must_use]
pub fn merge_filters(store: &ArticleFilters, overrides: &FilterSet, disable_store_filters: bool) -> FilterSet {
    let mut merged = if disable_store_filters {
        FilterSet::new()
    } else {
        store.to_filter_set()
    };
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    remove_empty(merged)
}

/// Canonical string form of a filter set, stable across key insertion order.
#[must_use]
pub fn canonical_key(filters: &FilterSet) -> String {
    serde_json::to_string(filters).unwrap_or_default()
}
