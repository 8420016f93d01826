//! Conditional formatting comparators
//!
//! The serialized form of each comparator is the symbol shown to users, so
//! saved chart configurations read `{"operator": "≤ x <"}` and the like.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rule::FormattingValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    None,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "≥")]
    GreaterOrEqual,
    #[serde(rename = "≤")]
    LessOrEqual,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "≠")]
    NotEqual,
    #[serde(rename = "< x <")]
    Between,
    #[serde(rename = "≤ x ≤")]
    BetweenOrEqual,
    #[serde(rename = "≤ x <")]
    BetweenOrLeftEqual,
    #[serde(rename = "< x ≤")]
    BetweenOrRightEqual,
    #[serde(rename = "begins with")]
    BeginsWith,
    #[serde(rename = "ends with")]
    EndsWith,
    #[serde(rename = "containing")]
    Containing,
    #[serde(rename = "not containing")]
    NotContaining,
}

/// How a rule using a comparator is rendered as a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelShape {
    /// `{column}`
    ColumnOnly,
    /// `{column} {symbol} {target}`
    Point,
    /// `{left} {left_op} {column} {right_op} {right}`
    Range {
        left_op: &'static str,
        right_op: &'static str,
    },
}

impl Comparator {
    pub const ALL: [Comparator; 15] = [
        Self::None,
        Self::GreaterThan,
        Self::LessThan,
        Self::GreaterOrEqual,
        Self::LessOrEqual,
        Self::Equal,
        Self::NotEqual,
        Self::Between,
        Self::BetweenOrEqual,
        Self::BetweenOrLeftEqual,
        Self::BetweenOrRightEqual,
        Self::BeginsWith,
        Self::EndsWith,
        Self::Containing,
        Self::NotContaining,
    ];

    /// The user-facing symbol, identical to the serialized form
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => "≥",
            Self::LessOrEqual => "≤",
            Self::Equal => "=",
            Self::NotEqual => "≠",
            Self::Between => "< x <",
            Self::BetweenOrEqual => "≤ x ≤",
            Self::BetweenOrLeftEqual => "≤ x <",
            Self::BetweenOrRightEqual => "< x ≤",
            Self::BeginsWith => "begins with",
            Self::EndsWith => "ends with",
            Self::Containing => "containing",
            Self::NotContaining => "not containing",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }

    pub fn label_shape(&self) -> LabelShape {
        let lt = Self::LessThan.symbol();
        let le = Self::LessOrEqual.symbol();
        match self {
            Self::None => LabelShape::ColumnOnly,
            Self::Between => LabelShape::Range {
                left_op: lt,
                right_op: lt,
            },
            Self::BetweenOrEqual => LabelShape::Range {
                left_op: le,
                right_op: le,
            },
            Self::BetweenOrLeftEqual => LabelShape::Range {
                left_op: le,
                right_op: lt,
            },
            Self::BetweenOrRightEqual => LabelShape::Range {
                left_op: lt,
                right_op: le,
            },
            _ => LabelShape::Point,
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self.label_shape(), LabelShape::Range { .. })
    }

    /// Comparators that only make sense on text values
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Self::BeginsWith | Self::EndsWith | Self::Containing | Self::NotContaining
        )
    }

    /// Check whether `value` satisfies the comparator.
    ///
    /// `target` is used by point comparators, `left`/`right` by range
    /// comparators. A missing operand never matches. Numeric comparators
    /// only match numbers, textual comparators only match text; equality
    /// works on both.
    pub fn matches(
        &self,
        value: &FormattingValue,
        target: Option<&FormattingValue>,
        left: Option<&FormattingValue>,
        right: Option<&FormattingValue>,
    ) -> bool {
        use FormattingValue::Text;

        let number = |operand: Option<&FormattingValue>| operand.and_then(FormattingValue::as_f64);

        match self {
            Self::None => true,
            Self::Equal => target.is_some_and(|t| t.same_as(value)),
            Self::NotEqual => target.is_some_and(|t| !t.same_as(value)),
            Self::GreaterThan | Self::LessThan | Self::GreaterOrEqual | Self::LessOrEqual => {
                match (value.as_f64(), number(target)) {
                    (Some(v), Some(t)) => match self {
                        Self::GreaterThan => v > t,
                        Self::LessThan => v < t,
                        Self::GreaterOrEqual => v >= t,
                        _ => v <= t,
                    },
                    _ => false,
                }
            }
            Self::Between
            | Self::BetweenOrEqual
            | Self::BetweenOrLeftEqual
            | Self::BetweenOrRightEqual => match (value.as_f64(), number(left), number(right)) {
                (Some(v), Some(l), Some(r)) => {
                    let left_ok = match self {
                        Self::BetweenOrEqual | Self::BetweenOrLeftEqual => l <= v,
                        _ => l < v,
                    };
                    let right_ok = match self {
                        Self::BetweenOrEqual | Self::BetweenOrRightEqual => v <= r,
                        _ => v < r,
                    };
                    left_ok && right_ok
                }
                _ => false,
            },
            Self::BeginsWith | Self::EndsWith | Self::Containing | Self::NotContaining => {
                match (value, target) {
                    (Text(v), Some(Text(t))) => match self {
                        Self::BeginsWith => v.starts_with(t.as_str()),
                        Self::EndsWith => v.ends_with(t.as_str()),
                        Self::Containing => v.contains(t.as_str()),
                        _ => !v.contains(t.as_str()),
                    },
                    _ => false,
                }
            }
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
