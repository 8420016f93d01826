//! Query Sort Orders
//!
//! Order-by clauses travel over the wire as two-element arrays,
//! `[column, descending]`, both in form data (`order_by_cols`, one JSON
//! string per entry) and in the emitted query object.

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (A-Z, 1-9, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-1, newest first)
    Desc,
}

impl SortDirection {
    /// Build from a descending flag
    pub fn from_desc(desc: bool) -> Self {
        if desc {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn is_desc(&self) -> bool {
        matches!(self, Self::Desc)
    }
}

/// A single order-by clause: `(column, is_descending)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy(pub String, pub bool);

impl OrderBy {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self(column.into(), direction.is_desc())
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Desc)
    }

    /// Parse one serialized `order_by_cols` entry, e.g. `["ts", true]`
    pub fn parse(entry: &str) -> QueryResult<Self> {
        serde_json::from_str(entry).map_err(|source| QueryError::OrderBy {
            entry: entry.to_string(),
            source,
        })
    }

    pub fn column(&self) -> &str {
        &self.0
    }

    pub fn direction(&self) -> SortDirection {
        SortDirection::from_desc(self.1)
    }
}

/// Parse every serialized order-by entry; the first malformed entry fails the lot
pub fn parse_order_by(entries: &[String]) -> QueryResult<Vec<OrderBy>> {
    entries.iter().map(|entry| OrderBy::parse(entry)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction() {
        assert_eq!(SortDirection::from_desc(true), SortDirection::Desc);
        assert_eq!(SortDirection::from_desc(false), SortDirection::Asc);
        assert!(SortDirection::Desc.is_desc());
        assert!(!SortDirection::default().is_desc());
    }

    #[test]
    fn test_order_by_parse() {
        let order = OrderBy::parse(r#"["t1", true]"#).unwrap();
        assert_eq!(order.column(), "t1");
        assert_eq!(order.direction(), SortDirection::Desc);
        assert_eq!(order, OrderBy::desc("t1"));
        assert_eq!(OrderBy::parse(r#"["t1", false]"#).unwrap(), OrderBy::asc("t1"));
    }

    #[test]
    fn test_order_by_serializes_as_pair() {
        let json = serde_json::to_string(&OrderBy::desc("ts")).unwrap();
        assert_eq!(json, r#"["ts",true]"#);
    }

    #[test]
    fn test_parse_order_by_rejects_malformed_entry() {
        let entries = vec![r#"["a", false]"#.to_string(), "not json".to_string()];
        let err = parse_order_by(&entries).unwrap_err();
        assert!(matches!(err, QueryError::OrderBy { ref entry, .. } if entry == "not json"));

        let wrong_shape = vec![r#"["a"]"#.to_string()];
        assert!(parse_order_by(&wrong_shape).is_err());
    }
}
