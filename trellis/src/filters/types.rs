//! Filter-type registry and built-in matchers.

use std::collections::HashMap;
use std::sync::Arc;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use regex::Regex;

use crate::config::TextMatch;
use crate::model::{Column, Row};

/// Key of the default text filter type.
pub const TEXT_FILTER: &str = "text";

/// A filter matcher: given candidate rows, the targeted column id and
/// the filter value, returns the indices of the rows that match.
///
/// The engine probes matchers one row at a time and hides the row when
/// no index comes back; matchers written against whole row sets work
/// unchanged.
pub type FilterFn = Arc<dyn Fn(&[&Row], &str, &[String]) -> Vec<usize> + Send + Sync>;

/// Registry mapping filter-type keys to matchers.
///
/// Ships with `text`, `select`, `greater_than`, `fuzzy` and `regex`;
/// hosts can register their own. A column with no filter type uses
/// `text`.
#[derive(Clone)]
pub struct FilterTypes {
    types: HashMap<String, FilterFn>,
}

impl FilterTypes {
    /// Create a registry with the built-in matchers and a substring
    /// text filter.
    pub fn new() -> Self {
        Self::with_text_match(TextMatch::Substring)
    }

    /// Create a registry with the built-in matchers and the given text
    /// matching mode.
    pub fn with_text_match(mode: TextMatch) -> Self {
        let mut registry = Self {
            types: HashMap::new(),
        };
        registry.types.insert(TEXT_FILTER.to_string(), text(mode));
        registry.types.insert("select".to_string(), select());
        registry
            .types
            .insert("greater_than".to_string(), greater_than());
        registry.types.insert("fuzzy".to_string(), fuzzy());
        registry.types.insert("regex".to_string(), regex_match());
        registry
    }

    /// Register or replace a matcher.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        f: impl Fn(&[&Row], &str, &[String]) -> Vec<usize> + Send + Sync + 'static,
    ) {
        self.types.insert(key.into(), Arc::new(f));
    }

    /// Look up a matcher by key.
    pub fn get(&self, key: &str) -> Option<&FilterFn> {
        self.types.get(key)
    }
}

impl Default for FilterTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FilterTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.types.keys().collect();
        keys.sort();
        f.debug_struct("FilterTypes").field("types", &keys).finish()
    }
}

/// Resolve the matcher for a column: an explicit function wins, then
/// the column's filter-type key, then the default text matcher.
/// Returns `None` only for an unknown key, which callers report and
/// treat as non-matching.
pub fn resolve<'a>(column: &'a Column, registry: &'a FilterTypes) -> Option<&'a FilterFn> {
    if let Some(f) = &column.filter_fn {
        return Some(f);
    }
    match column.filter_type.as_deref() {
        None | Some("") => registry.get(TEXT_FILTER),
        Some(key) => registry.get(key),
    }
}

// -----------------------------------------------------------------------------
// Built-in matchers
// -----------------------------------------------------------------------------
//
// Rows with no value for the targeted column match (are not hidden);
// filters narrow what is known, they do not punish missing data. The
// exception is greater_than, where an absent value cannot satisfy a
// numeric comparison.

fn text(mode: TextMatch) -> FilterFn {
    Arc::new(move |rows, column_id, value| {
        let query = value.first().map(|v| v.to_lowercase()).unwrap_or_default();
        rows.iter()
            .enumerate()
            .filter_map(|(index, row)| match row.value(column_id) {
                None => Some(index),
                Some(cell) => {
                    let cell = cell.to_string().to_lowercase();
                    let hit = match mode {
                        TextMatch::Substring => cell.contains(&query),
                        TextMatch::Prefix => cell.starts_with(&query),
                    };
                    hit.then_some(index)
                }
            })
            .collect()
    })
}

fn select() -> FilterFn {
    Arc::new(|rows, column_id, value| {
        let query = value.first().cloned().unwrap_or_default();
        rows.iter()
            .enumerate()
            .filter_map(|(index, row)| match row.value(column_id) {
                None => Some(index),
                Some(cell) => (cell.to_string() == query).then_some(index),
            })
            .collect()
    })
}

fn greater_than() -> FilterFn {
    Arc::new(|rows, column_id, value| {
        let Some(threshold) = value.first().and_then(|v| v.trim().parse::<f64>().ok()) else {
            log::warn!(
                "greater_than filter on '{}' has no numeric value; matching everything",
                column_id
            );
            return (0..rows.len()).collect();
        };
        rows.iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let number = row.value(column_id).and_then(|cell| cell.as_number());
                match number {
                    Some(n) if n > threshold => Some(index),
                    _ => None,
                }
            })
            .collect()
    })
}

fn fuzzy() -> FilterFn {
    Arc::new(|rows, column_id, value| {
        let query = value.first().cloned().unwrap_or_default();
        if query.is_empty() {
            return (0..rows.len()).collect();
        }
        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::new(
            &query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        rows.iter()
            .enumerate()
            .filter_map(|(index, row)| match row.value(column_id) {
                None => Some(index),
                Some(cell) => {
                    let text = cell.to_string();
                    let mut buf = Vec::new();
                    let haystack = Utf32Str::new(&text, &mut buf);
                    pattern.score(haystack, &mut matcher).map(|_| index)
                }
            })
            .collect()
    })
}

fn regex_match() -> FilterFn {
    Arc::new(|rows, column_id, value| {
        let pattern = value.first().cloned().unwrap_or_default();
        if pattern.is_empty() {
            return (0..rows.len()).collect();
        }
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(err) => {
                log::warn!("invalid regex filter on '{}': {}", column_id, err);
                return (0..rows.len()).collect();
            }
        };
        rows.iter()
            .enumerate()
            .filter_map(|(index, row)| match row.value(column_id) {
                None => Some(index),
                Some(cell) => re.is_match(&cell.to_string()).then_some(index),
            })
            .collect()
    })
}
