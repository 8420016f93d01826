//! Gantt chart query builder
//!
//! Each Gantt bar spans `start_time..end_time` on the row given by `y_axis`.
//! Bars are colored by the `series` columns and may carry tooltip columns
//! and metrics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use bi_core::config::QueryDefaults;
use bi_core::{ColumnId, MetricId, OneOrMany};

use crate::columns::ColumnSet;
use crate::context::{build_query_context, QueryContext};
use crate::error::QueryResult;
use crate::form_data::FormData;
use crate::query_object::QueryObject;
use crate::sorts::parse_order_by;

/// Gantt-specific form fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GanttFormData {
    #[serde(default)]
    pub start_time: Option<ColumnId>,
    #[serde(default)]
    pub end_time: Option<ColumnId>,
    #[serde(default)]
    pub y_axis: Option<ColumnId>,
    #[serde(default)]
    pub series: OneOrMany<ColumnId>,
    #[serde(default)]
    pub tooltip_columns: OneOrMany<ColumnId>,
    #[serde(default)]
    pub tooltip_metrics: OneOrMany<MetricId>,
    /// Serialized `[column, descending]` pairs
    #[serde(default)]
    pub order_by_cols: OneOrMany<String>,
}

/// Fill the Gantt-specific parts of a base query object
pub fn build_gantt_query_object(base: QueryObject, fields: &GanttFormData) -> QueryResult<QueryObject> {
    let group_by = fields.series.to_vec();
    let orderby = parse_order_by(&fields.order_by_cols.to_vec())?;

    let columns = ColumnSet::new()
        .with_opt(fields.start_time.clone())
        .with_opt(fields.end_time.clone())
        .with_opt(fields.y_axis.clone())
        .with_all(group_by.iter().cloned())
        .with_all(fields.tooltip_columns.to_vec())
        .with_all(orderby.iter().map(|o| o.column().to_string()))
        .into_vec();

    debug!(
        columns = columns.len(),
        orderby = orderby.len(),
        series = group_by.len(),
        "Built gantt query object"
    );

    Ok(QueryObject {
        columns,
        metrics: fields.tooltip_metrics.to_vec(),
        orderby,
        series_columns: group_by,
        ..base
    })
}

/// Build the query context for a Gantt chart
pub fn build_query(form_data: &FormData, defaults: &QueryDefaults) -> QueryResult<QueryContext> {
    let fields: GanttFormData = form_data.chart_fields()?;
    build_query_context(form_data, defaults, |base| {
        Ok(vec![build_gantt_query_object(base, &fields)?])
    })
}
