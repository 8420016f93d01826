//! # bi-controls
//!
//! Explore controls for Explore Controls RS.
//!
//! ## Structure
//!
//! - `sort_select` - Sort dropdown for card-based list views
//! - `comparator` - Conditional formatting comparators
//! - `rule` - Formatting rules, labels, and evaluation
//! - `rule_editor` - The ordered rule list control
//!
//! ## Example
//!
//! ```
//! use bi_controls::{Comparator, FormattingRuleConfig, FormattingRuleEditor, RuleEditorProps};
//!
//! let mut editor = FormattingRuleEditor::new(RuleEditorProps::default(), None);
//! editor.add(FormattingRuleConfig::range("x", Comparator::BetweenOrLeftEqual, 1, 10));
//! assert_eq!(editor.labels(), vec!["1 ≤ x < 10"]);
//! ```

pub mod error;
pub mod sort_select;
pub mod comparator;
pub mod rule;
pub mod rule_editor;

// Re-exports for convenience
pub use error::{ControlError, ControlResult};
pub use sort_select::{SelectItem, SortChangeHandler, SortColumn, SortOption, SortSelector};
pub use comparator::{Comparator, LabelShape};
pub use rule::{validate_rules, ColumnOption, FormattingRuleConfig, FormattingValue};
pub use rule_editor::{
    ColorChoice, FormattingRuleEditor, PopoverProps, RuleEditorProps, RulesChangeHandler,
};
