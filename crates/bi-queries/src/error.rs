//! Query building errors

use bi_core::BiError;
use thiserror::Error;

/// Errors raised while turning form data into query objects
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid order-by entry {entry:?}: {source}")]
    OrderBy {
        entry: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid datasource key {0:?}, expected \"<id>__<type>\"")]
    InvalidDatasource(String),
    #[error("Malformed form data: {0}")]
    FormData(#[from] serde_json::Error),
}

pub type QueryResult<T> = Result<T, QueryError>;

impl From<QueryError> for BiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::OrderBy { entry, source } => {
                BiError::parse("order_by_cols", format!("{:?}: {}", entry, source))
            }
            QueryError::InvalidDatasource(key) => BiError::parse("datasource", key),
            QueryError::FormData(e) => BiError::Serialization(e),
        }
    }
}
