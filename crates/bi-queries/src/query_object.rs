//! Query Object
//!
//! A query object is the structured request a chart sends to the backend:
//! which columns and metrics to select, how to filter and order them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use bi_core::config::QueryDefaults;
use bi_core::{ColumnId, MetricId};

use crate::filters::{process_filters, QueryFilter};
use crate::form_data::{FormData, RowLimit};
use crate::sorts::OrderBy;

/// Free-form extras attached to a query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryExtras {
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    #[serde(rename = "having", default, skip_serializing_if = "Option::is_none")]
    pub having_clause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_grain_sqla: Option<String>,
}

impl QueryExtras {
    pub fn is_empty(&self) -> bool {
        self.where_clause.is_none() && self.having_clause.is_none() && self.time_grain_sqla.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_desc: Option<bool>,
    #[serde(default)]
    pub filters: Vec<QueryFilter>,
    #[serde(default, skip_serializing_if = "QueryExtras::is_empty")]
    pub extras: QueryExtras,
    #[serde(default)]
    pub columns: Vec<ColumnId>,
    #[serde(default)]
    pub metrics: Vec<MetricId>,
    #[serde(default)]
    pub orderby: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub series_columns: Vec<ColumnId>,
}

impl QueryObject {
    /// Check if a column is selected
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty() || !self.extras.is_empty()
    }
}

/// Build the chart-independent part of a query object from form data
pub fn build_query_object(form_data: &FormData, defaults: &QueryDefaults) -> QueryObject {
    let processed = process_filters(&form_data.adhoc_filters);
    let row_limit = form_data
        .row_limit
        .as_ref()
        .and_then(RowLimit::as_u64)
        .or(defaults.row_limit);

    debug!(
        filters = processed.filters.len(),
        row_limit = ?row_limit,
        "Built base query object"
    );

    QueryObject {
        time_range: form_data.time_range.clone(),
        granularity: form_data.granularity().map(str::to_string),
        row_limit,
        row_offset: form_data.row_offset,
        order_desc: form_data.order_desc,
        filters: processed.filters,
        extras: QueryExtras {
            where_clause: processed.where_clause,
            having_clause: processed.having_clause,
            time_grain_sqla: form_data.time_grain_sqla.clone(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AdhocFilter, FilterClause, FilterOperator};
    use serde_json::json;

    #[test]
    fn test_base_query_object() {
        let mut form_data = FormData::new("1__table", "table")
            .with_filter(AdhocFilter::simple("country", FilterOperator::Equals, Some(json!("FR"))))
            .with_filter(AdhocFilter::sql(FilterClause::Where, "x > 0"));
        form_data.time_range = Some("Last week".to_string());
        form_data.granularity_sqla = Some("ds".to_string());
        form_data.row_limit = Some(RowLimit::Number(25));

        let query = build_query_object(&form_data, &QueryDefaults::default());

        assert_eq!(query.time_range.as_deref(), Some("Last week"));
        assert_eq!(query.granularity.as_deref(), Some("ds"));
        assert_eq!(query.row_limit, Some(25));
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.extras.where_clause.as_deref(), Some("(x > 0)"));
        assert!(query.has_filters());
        assert!(query.columns.is_empty());
    }

    #[test]
    fn test_row_limit_default() {
        let defaults = QueryDefaults {
            row_limit: Some(1000),
            ..Default::default()
        };
        let query = build_query_object(&FormData::new("1__table", "table"), &defaults);
        assert_eq!(query.row_limit, Some(1000));
        assert!(!query.has_filters());
    }

    #[test]
    fn test_serialization_skips_empty_parts() {
        let query = QueryObject {
            columns: vec!["a".to_string()],
            orderby: vec![OrderBy::desc("a")],
            ..Default::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({
                "filters": [],
                "columns": ["a"],
                "metrics": [],
                "orderby": [["a", true]]
            })
        );
    }
}
