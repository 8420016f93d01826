//! Conditional formatting rules
//!
//! A rule pairs a column with a comparator and its operands. Rules are kept
//! in priority order: when several rules apply to the same cell, the first
//! one wins.

use std::fmt;

use serde::{Deserialize, Serialize};

use bi_core::{verbose_name, ColumnId, ValidationErrors, VerboseMap};

use crate::comparator::{Comparator, LabelShape};
use crate::error::ControlResult;

/// A rule operand or a cell value
///
/// Integers and floats are kept apart so a saved rule is written back in
/// the shape it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormattingValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FormattingValue {
    /// Numeric value, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        self.as_f64().is_some()
    }

    /// Equality where `5` and `5.0` are the same number
    pub fn same_as(&self, other: &FormattingValue) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

impl fmt::Display for FormattingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FormattingValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<i64> for FormattingValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for FormattingValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<&str> for FormattingValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A selectable column in the rule popover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOption {
    pub value: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ColumnOption {
    pub fn new(value: impl Into<ColumnId>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingRuleConfig {
    pub column: ColumnId,
    pub operator: Comparator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<FormattingValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value_left: Option<FormattingValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value_right: Option<FormattingValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
}

impl FormattingRuleConfig {
    /// Rule without a condition: colors the whole column
    pub fn column_only(column: impl Into<ColumnId>) -> Self {
        Self {
            column: column.into(),
            operator: Comparator::None,
            target_value: None,
            target_value_left: None,
            target_value_right: None,
            color_scheme: None,
        }
    }

    /// Rule comparing against a single target value
    pub fn point(
        column: impl Into<ColumnId>,
        operator: Comparator,
        target: impl Into<FormattingValue>,
    ) -> Self {
        Self {
            operator,
            target_value: Some(target.into()),
            ..Self::column_only(column)
        }
    }

    /// Rule comparing against a `left..right` range
    pub fn range(
        column: impl Into<ColumnId>,
        operator: Comparator,
        left: impl Into<FormattingValue>,
        right: impl Into<FormattingValue>,
    ) -> Self {
        Self {
            operator,
            target_value_left: Some(left.into()),
            target_value_right: Some(right.into()),
            ..Self::column_only(column)
        }
    }

    pub fn with_color_scheme(mut self, color: impl Into<String>) -> Self {
        self.color_scheme = Some(color.into());
        self
    }

    /// Human-readable label for the rule list
    pub fn label(&self, verbose_map: Option<&VerboseMap>) -> String {
        let name = verbose_name(verbose_map, &self.column);
        let operand = |value: &Option<FormattingValue>| {
            value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "?".to_string())
        };

        match self.operator.label_shape() {
            LabelShape::ColumnOnly => name.to_string(),
            LabelShape::Range { left_op, right_op } => format!(
                "{} {} {} {} {}",
                operand(&self.target_value_left),
                left_op,
                name,
                right_op,
                operand(&self.target_value_right),
            ),
            LabelShape::Point => format!(
                "{} {} {}",
                name,
                self.operator,
                operand(&self.target_value)
            ),
        }
    }

    /// Check that the operands the operator needs are present
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.column.trim().is_empty() {
            errors.add("column", "can't be blank");
        }

        match self.operator.label_shape() {
            LabelShape::ColumnOnly => {}
            LabelShape::Point => match &self.target_value {
                None => errors.add("target_value", "can't be blank"),
                Some(value) if value.is_number() && self.operator.is_textual() => {
                    errors.add("target_value", "must be text")
                }
                Some(_) => {}
            },
            LabelShape::Range { .. } => {
                let left = self.target_value_left.as_ref().and_then(FormattingValue::as_f64);
                let right = self.target_value_right.as_ref().and_then(FormattingValue::as_f64);
                match (left, right) {
                    (Some(l), Some(r)) => {
                        if l > r {
                            errors.add_base("left bound must not exceed right bound");
                        }
                    }
                    (left, right) => {
                        if left.is_none() {
                            errors.add("target_value_left", "must be a number");
                        }
                        if right.is_none() {
                            errors.add("target_value_right", "must be a number");
                        }
                    }
                }
            }
        }

        errors.into_result()
    }

    /// Check whether a cell in `column` holding `value` satisfies this rule
    pub fn applies_to(&self, column: &str, value: &FormattingValue) -> bool {
        self.column == column
            && self.operator.matches(
                value,
                self.target_value.as_ref(),
                self.target_value_left.as_ref(),
                self.target_value_right.as_ref(),
            )
    }
}

/// First rule, in priority order, that applies to the cell
pub fn first_match<'a>(
    rules: &'a [FormattingRuleConfig],
    column: &str,
    value: &FormattingValue,
) -> Option<&'a FormattingRuleConfig> {
    rules.iter().find(|rule| rule.applies_to(column, value))
}

/// Color of the first applicable rule that sets one
pub fn color_for<'a>(
    rules: &'a [FormattingRuleConfig],
    column: &str,
    value: &FormattingValue,
) -> Option<&'a str> {
    rules
        .iter()
        .filter(|rule| rule.applies_to(column, value))
        .find_map(|rule| rule.color_scheme.as_deref())
}

/// Validate a whole rule list.
///
/// Field errors are keyed `rules[i].field` and base errors are prefixed with
/// the rule position, so one report covers every broken rule.
pub fn validate_rules(rules: &[FormattingRuleConfig]) -> ControlResult<()> {
    let mut errors = ValidationErrors::new();

    for (index, rule) in rules.iter().enumerate() {
        if let Err(rule_errors) = rule.validate() {
            for (field, messages) in rule_errors.errors {
                for message in messages {
                    errors.add(format!("rules[{}].{}", index, field), message);
                }
            }
            for message in rule_errors.base_errors {
                errors.add(format!("rules[{}]", index), message);
            }
        }
    }

    errors.into_result()?;
    Ok(())
}
