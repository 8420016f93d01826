//! Form Data
//!
//! The flat field map an explore view hands to a chart's query builder.
//! Fields shared by every chart are typed here; chart-specific fields stay
//! in `extra` and are read with [`FormData::chart_fields`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::QueryResult;
use crate::filters::AdhocFilter;

/// Row limits arrive either as numbers or as numeric strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowLimit {
    Number(u64),
    Text(String),
}

impl RowLimit {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    /// Datasource key, `"<id>__<type>"`
    pub datasource: String,
    pub viz_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity_sqla: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_grain_sqla: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_limit: Option<RowLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_desc: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adhoc_filters: Vec<AdhocFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    /// Chart-specific fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormData {
    pub fn new(datasource: impl Into<String>, viz_type: impl Into<String>) -> Self {
        Self {
            datasource: datasource.into(),
            viz_type: viz_type.into(),
            ..Default::default()
        }
    }

    /// Parse form data from its JSON representation
    pub fn from_json(json: &str) -> QueryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set a chart-specific field (builder pattern)
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn with_filter(mut self, filter: AdhocFilter) -> Self {
        self.adhoc_filters.push(filter);
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Deserialize the chart-specific fields into a typed struct
    pub fn chart_fields<T: DeserializeOwned>(&self) -> QueryResult<T> {
        Ok(serde_json::from_value(Value::Object(self.extra.clone()))?)
    }

    /// Temporal column used for time filtering
    pub fn granularity(&self) -> Option<&str> {
        self.granularity
            .as_deref()
            .or(self.granularity_sqla.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_data_from_json() {
        let form_data = FormData::from_json(
            r#"{
                "datasource": "3__table",
                "viz_type": "gantt_chart",
                "row_limit": "100",
                "y_axis": "task",
                "series": ["team"]
            }"#,
        )
        .unwrap();

        assert_eq!(form_data.datasource, "3__table");
        assert_eq!(form_data.row_limit.as_ref().and_then(RowLimit::as_u64), Some(100));
        assert_eq!(form_data.field("y_axis"), Some(&json!("task")));
        assert!(form_data.field("row_limit").is_none());
    }

    #[test]
    fn test_chart_fields() {
        #[derive(Deserialize)]
        struct Fields {
            y_axis: String,
        }

        let form_data = FormData::new("1__table", "gantt_chart").with_field("y_axis", "task");
        let fields: Fields = form_data.chart_fields().unwrap();
        assert_eq!(fields.y_axis, "task");
    }

    #[test]
    fn test_granularity_fallback() {
        let mut form_data = FormData::new("1__table", "table");
        assert_eq!(form_data.granularity(), None);

        form_data.granularity_sqla = Some("ds".to_string());
        assert_eq!(form_data.granularity(), Some("ds"));

        form_data.granularity = Some("__time".to_string());
        assert_eq!(form_data.granularity(), Some("__time"));
    }

    #[test]
    fn test_malformed_form_data() {
        assert!(FormData::from_json("{\"viz_type\": 3}").is_err());
    }
}
