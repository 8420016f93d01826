//! Query Context
//!
//! The envelope a chart's query builder returns: the datasource, the list of
//! query objects, and how results should be shaped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use bi_core::config::QueryDefaults;

use crate::error::{QueryError, QueryResult};
use crate::form_data::FormData;
use crate::query_object::{build_query_object, QueryObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasourceType {
    Table,
    Query,
}

/// Parsed `"<id>__<type>"` datasource key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceKey {
    pub id: i64,
    #[serde(rename = "type")]
    pub datasource_type: DatasourceType,
}

impl FromStr for DatasourceKey {
    type Err = QueryError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (id, kind) = key.split_once("__").unwrap_or((key, ""));
        let id = id
            .trim()
            .parse()
            .map_err(|_| QueryError::InvalidDatasource(key.to_string()))?;
        let datasource_type = match kind {
            "query" => DatasourceType::Query,
            _ => DatasourceType::Table,
        };
        Ok(Self { id, datasource_type })
    }
}

impl fmt::Display for DatasourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.datasource_type {
            DatasourceType::Table => "table",
            DatasourceType::Query => "query",
        };
        write!(f, "{}__{}", self.id, kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryContext {
    pub datasource: DatasourceKey,
    pub force: bool,
    pub queries: Vec<QueryObject>,
    pub form_data: FormData,
    pub result_format: String,
    pub result_type: String,
}

/// Wrap chart-specific query objects into a query context.
///
/// `build` receives the base query object derived from the shared form
/// fields and returns the final list of queries; an error from `build`
/// fails the whole context.
#[instrument(skip_all, fields(viz_type = %form_data.viz_type, datasource = %form_data.datasource))]
pub fn build_query_context<F>(
    form_data: &FormData,
    defaults: &QueryDefaults,
    build: F,
) -> QueryResult<QueryContext>
where
    F: FnOnce(QueryObject) -> QueryResult<Vec<QueryObject>>,
{
    let datasource: DatasourceKey = form_data.datasource.parse()?;
    let base = build_query_object(form_data, defaults);
    let queries = build(base)?;

    debug!(queries = queries.len(), "Built query context");

    Ok(QueryContext {
        datasource,
        force: form_data.force.unwrap_or(defaults.force),
        queries,
        form_data: form_data.clone(),
        result_format: form_data
            .result_format
            .clone()
            .unwrap_or_else(|| defaults.result_format.clone()),
        result_type: form_data
            .result_type
            .clone()
            .unwrap_or_else(|| defaults.result_type.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasource_key() {
        let key: DatasourceKey = "42__table".parse().unwrap();
        assert_eq!(key.id, 42);
        assert_eq!(key.datasource_type, DatasourceType::Table);
        assert_eq!(key.to_string(), "42__table");

        let key: DatasourceKey = "7__query".parse().unwrap();
        assert_eq!(key.datasource_type, DatasourceType::Query);

        assert!("abc__table".parse::<DatasourceKey>().is_err());
        assert!("".parse::<DatasourceKey>().is_err());
    }

    #[test]
    fn test_context_defaults() {
        let form_data = FormData::new("1__table", "table");
        let context = build_query_context(&form_data, &QueryDefaults::default(), |base| {
            Ok(vec![base])
        })
        .unwrap();

        assert_eq!(context.result_format, "json");
        assert_eq!(context.result_type, "full");
        assert!(!context.force);
        assert_eq!(context.queries.len(), 1);
    }

    #[test]
    fn test_context_form_data_overrides() {
        let mut form_data = FormData::new("1__table", "table");
        form_data.result_type = Some("samples".to_string());
        form_data.force = Some(true);

        let context = build_query_context(&form_data, &QueryDefaults::default(), |base| {
            Ok(vec![base])
        })
        .unwrap();

        assert_eq!(context.result_type, "samples");
        assert!(context.force);
    }

    #[test]
    fn test_builder_error_propagates() {
        let form_data = FormData::new("1__table", "table");
        let result = build_query_context(&form_data, &QueryDefaults::default(), |_| {
            Err(QueryError::InvalidDatasource("boom".to_string()))
        });
        assert!(result.is_err());
    }
}
