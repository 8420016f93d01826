//! Common types used throughout Explore Controls RS

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Raw column identifier as stored in form data
pub type ColumnId = String;

/// Raw metric identifier (saved metric name)
pub type MetricId = String;

/// Lookup from raw column identifier to its display name
pub type VerboseMap = HashMap<ColumnId, String>;

/// A form field that may hold a single value, a list, or nothing.
///
/// Form data coming from the explore view is loosely shaped: a multi-select
/// control with one entry is often stored as a bare value. `OneOrMany`
/// accepts every shape on the way in and normalizes to a `Vec` on the way
/// out, so `null`/absent becomes `[]` and `"a"` becomes `["a"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
    None,
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T> OneOrMany<T> {
    /// Normalize into a sequence
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
            Self::None => vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Many(items) => items.is_empty(),
            Self::One(_) => false,
            Self::None => true,
        }
    }
}

impl<T: Clone> OneOrMany<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.clone().into_vec()
    }
}

impl<T> From<Option<T>> for OneOrMany<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(item) => Self::One(item),
            None => Self::None,
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

/// Resolve a column's display name, falling back to the raw identifier
pub fn verbose_name<'a>(verbose_map: Option<&'a VerboseMap>, column: &'a str) -> &'a str {
    verbose_map
        .and_then(|map| map.get(column))
        .map(String::as_str)
        .unwrap_or(column)
}
