//! # bi-queries
//!
//! Query layer for Explore Controls RS.
//!
//! This crate turns explore form data into the query objects a chart sends
//! to the backend, wrapped in a query context.
//!
//! ## Structure
//!
//! - `form_data` - The explore form field map
//! - `filters` - Adhoc filters and their query-object form
//! - `sorts` - Sort directions and order-by pairs
//! - `columns` - Insertion-ordered column sets
//! - `query_object` - The query object and its chart-independent base
//! - `context` - Datasource keys and the query context factory
//! - `gantt` - The Gantt chart query builder
//!
//! ## Example
//!
//! ```
//! use bi_core::config::QueryDefaults;
//! use bi_queries::{gantt, FormData};
//! use serde_json::json;
//!
//! let form_data = FormData::new("3__table", "gantt_chart")
//!     .with_field("start_time", "start")
//!     .with_field("end_time", "finish")
//!     .with_field("y_axis", "task")
//!     .with_field("series", "team")
//!     .with_field("order_by_cols", json!([r#"["start", false]"#]));
//!
//! let context = gantt::build_query(&form_data, &QueryDefaults::default()).unwrap();
//! assert_eq!(context.queries.len(), 1);
//! assert_eq!(context.queries[0].columns, vec!["start", "finish", "task", "team"]);
//! ```

pub mod error;
pub mod form_data;
pub mod filters;
pub mod sorts;
pub mod columns;
pub mod query_object;
pub mod context;
pub mod gantt;

// Re-exports for convenience
pub use error::{QueryError, QueryResult};
pub use form_data::{FormData, RowLimit};
pub use filters::{AdhocFilter, FilterOperator, QueryFilter};
pub use sorts::{OrderBy, SortDirection};
pub use columns::{dedup_columns, ColumnSet};
pub use query_object::{build_query_object, QueryExtras, QueryObject};
pub use context::{build_query_context, DatasourceKey, DatasourceType, QueryContext};
