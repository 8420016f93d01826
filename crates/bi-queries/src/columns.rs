//! Query Columns
//!
//! A query selects each column once, in the order it was first requested.

use std::collections::HashSet;

use bi_core::ColumnId;

/// Insertion-ordered set of column identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<ColumnId>,
    seen: HashSet<ColumnId>,
}

impl ColumnSet {
    /// Create a new empty column set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column; returns `false` if it was already present
    pub fn add(&mut self, column: impl Into<ColumnId>) -> bool {
        let column = column.into();
        if self.seen.contains(&column) {
            return false;
        }
        self.seen.insert(column.clone());
        self.columns.push(column);
        true
    }

    /// Add a column (builder pattern)
    pub fn with(mut self, column: impl Into<ColumnId>) -> Self {
        self.add(column);
        self
    }

    /// Add an optional column; `None` is skipped
    pub fn with_opt(mut self, column: Option<impl Into<ColumnId>>) -> Self {
        if let Some(column) = column {
            self.add(column);
        }
        self
    }

    /// Add every column in order
    pub fn with_all<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnId>,
    {
        for column in columns {
            self.add(column);
        }
        self
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn into_vec(self) -> Vec<ColumnId> {
        self.columns
    }
}

impl<S: Into<ColumnId>> FromIterator<S> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new().with_all(iter)
    }
}

/// Order-preserving deduplication, keeping first occurrences
pub fn dedup_columns<I, S>(columns: I) -> Vec<ColumnId>
where
    I: IntoIterator<Item = S>,
    S: Into<ColumnId>,
{
    columns.into_iter().collect::<ColumnSet>().into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_set_keeps_first_occurrence() {
        let mut set = ColumnSet::new();
        assert!(set.add("ts"));
        assert!(set.add("cat"));
        assert!(!set.add("ts"));

        assert_eq!(set.len(), 2);
        assert!(set.has_column("cat"));
        assert!(!set.has_column("g1"));
        assert_eq!(set.columns(), &["ts".to_string(), "cat".to_string()]);
    }

    #[test]
    fn test_with_opt_skips_missing() {
        let set = ColumnSet::new()
            .with_opt(Some("start"))
            .with_opt(None::<String>)
            .with("end");
        assert_eq!(set.into_vec(), vec!["start", "end"]);
    }

    #[test]
    fn test_dedup_columns() {
        let columns = dedup_columns(["b", "a", "b", "c", "a"]);
        assert_eq!(columns, vec!["b", "a", "c"]);
        assert!(dedup_columns(Vec::<String>::new()).is_empty());
    }
}
