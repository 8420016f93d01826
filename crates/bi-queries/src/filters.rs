//! Query Filters
//!
//! Adhoc filters are what the explore view stores in form data. Simple
//! filters become structured `{col, op, val}` query filters; free-form SQL
//! filters are folded into the `where`/`having` extras.

use serde::{Deserialize, Serialize};

/// Filter operators understood by the query layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "ILIKE")]
    ILike,
    #[serde(rename = "IS NULL")]
    IsNull,
    #[serde(rename = "IS NOT NULL")]
    IsNotNull,
    #[serde(rename = "IS TRUE")]
    IsTrue,
    #[serde(rename = "IS FALSE")]
    IsFalse,
    #[serde(rename = "TEMPORAL_RANGE")]
    TemporalRange,
}

impl FilterOperator {
    /// Check if this operator requires a comparator value
    pub fn requires_values(&self) -> bool {
        !matches!(
            self,
            Self::IsNull | Self::IsNotNull | Self::IsTrue | Self::IsFalse
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpressionType {
    Simple,
    Sql,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterClause {
    #[default]
    Where,
    Having,
}

/// A filter as stored in form data (`adhoc_filters`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdhocFilter {
    pub expression_type: ExpressionType,
    #[serde(default)]
    pub clause: FilterClause,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<FilterOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_expression: Option<String>,
}

impl AdhocFilter {
    /// Create a simple filter
    pub fn simple(
        subject: impl Into<String>,
        operator: FilterOperator,
        comparator: Option<serde_json::Value>,
    ) -> Self {
        Self {
            expression_type: ExpressionType::Simple,
            clause: FilterClause::Where,
            subject: Some(subject.into()),
            operator: Some(operator),
            comparator,
            sql_expression: None,
        }
    }

    /// Create a free-form SQL filter
    pub fn sql(clause: FilterClause, expression: impl Into<String>) -> Self {
        Self {
            expression_type: ExpressionType::Sql,
            clause,
            subject: None,
            operator: None,
            comparator: None,
            sql_expression: Some(expression.into()),
        }
    }

    /// Check if this filter is complete enough to be sent
    pub fn is_valid(&self) -> bool {
        match self.expression_type {
            ExpressionType::Simple => match (&self.subject, &self.operator) {
                (Some(subject), Some(op)) if !subject.is_empty() => {
                    !op.requires_values() || self.comparator.is_some()
                }
                _ => false,
            },
            ExpressionType::Sql => self
                .sql_expression
                .as_deref()
                .is_some_and(|sql| !sql.trim().is_empty()),
        }
    }
}

/// A structured filter in a query object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub col: String,
    pub op: FilterOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val: Option<serde_json::Value>,
}

/// Result of splitting adhoc filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedFilters {
    pub filters: Vec<QueryFilter>,
    pub where_clause: Option<String>,
    pub having_clause: Option<String>,
}

fn join_sql(expressions: Vec<&str>) -> Option<String> {
    if expressions.is_empty() {
        None
    } else {
        Some(
            expressions
                .iter()
                .map(|sql| format!("({})", sql))
                .collect::<Vec<_>>()
                .join(" AND "),
        )
    }
}

/// Split adhoc filters into structured filters and free-form SQL clauses.
/// Incomplete filters are dropped.
pub fn process_filters(adhoc_filters: &[AdhocFilter]) -> ProcessedFilters {
    let mut filters = Vec::new();
    let mut where_sql = Vec::new();
    let mut having_sql = Vec::new();

    for filter in adhoc_filters.iter().filter(|f| f.is_valid()) {
        match filter.expression_type {
            ExpressionType::Simple => {
                if let (Some(col), Some(op)) = (&filter.subject, filter.operator) {
                    filters.push(QueryFilter {
                        col: col.clone(),
                        op,
                        val: filter.comparator.clone(),
                    });
                }
            }
            ExpressionType::Sql => {
                if let Some(sql) = filter.sql_expression.as_deref() {
                    match filter.clause {
                        FilterClause::Where => where_sql.push(sql),
                        FilterClause::Having => having_sql.push(sql),
                    }
                }
            }
        }
    }

    ProcessedFilters {
        filters,
        where_clause: join_sql(where_sql),
        having_clause: join_sql(having_sql),
    }
}
