//! Conditional formatting control
//!
//! Holds the ordered list of formatting rules for a table or chart. Every
//! committed change is reported to the host view with the full list, once
//! per commit and only after the list has been updated. When
//! `remove_irrelevant_conditions` is on, rules whose column is no longer
//! among the column options are dropped as a follow-up commit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use bi_core::VerboseMap;

use crate::error::{ControlError, ControlResult};
use crate::rule::{color_for, ColumnOption, FormattingRuleConfig, FormattingValue};

/// An extra color offered next to the default palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorChoice {
    pub value: String,
    pub label: String,
}

/// Inbound properties from the host view
#[derive(Debug, Clone, Default)]
pub struct RuleEditorProps {
    pub value: Option<Vec<FormattingRuleConfig>>,
    pub column_options: Vec<ColumnOption>,
    pub verbose_map: Option<VerboseMap>,
    pub remove_irrelevant_conditions: bool,
    pub extra_color_choices: Vec<ColorChoice>,
}

/// What the rule popover is rendered with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverProps<'a> {
    /// Rule being edited; `None` when adding a new one
    pub config: Option<&'a FormattingRuleConfig>,
    pub columns: &'a [ColumnOption],
    pub extra_color_choices: &'a [ColorChoice],
}

pub type RulesChangeHandler = Box<dyn FnMut(&[FormattingRuleConfig]) + 'static>;

pub struct FormattingRuleEditor {
    rules: Vec<FormattingRuleConfig>,
    column_options: Vec<ColumnOption>,
    verbose_map: Option<VerboseMap>,
    remove_irrelevant_conditions: bool,
    extra_color_choices: Vec<ColorChoice>,
    on_change: Option<RulesChangeHandler>,
}

impl std::fmt::Debug for FormattingRuleEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormattingRuleEditor")
            .field("rules", &self.rules)
            .field("column_options", &self.column_options)
            .field("remove_irrelevant_conditions", &self.remove_irrelevant_conditions)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl FormattingRuleEditor {
    /// Mount the editor, seeding rules from `props.value`.
    ///
    /// The seed itself is not reported; a prune of the seed is.
    pub fn new(props: RuleEditorProps, on_change: Option<RulesChangeHandler>) -> Self {
        let mut editor = Self {
            rules: props.value.unwrap_or_default(),
            column_options: props.column_options,
            verbose_map: props.verbose_map,
            remove_irrelevant_conditions: props.remove_irrelevant_conditions,
            extra_color_choices: props.extra_color_choices,
            on_change,
        };
        editor.prune();
        editor
    }

    pub fn rules(&self) -> &[FormattingRuleConfig] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn column_options(&self) -> &[ColumnOption] {
        &self.column_options
    }

    /// Append a new rule
    pub fn add(&mut self, config: FormattingRuleConfig) {
        debug!(column = %config.column, operator = %config.operator, "Formatting rule added");
        let mut rules = self.rules.clone();
        rules.push(config);
        self.commit(rules);
    }

    /// Replace the rule at `index`, keeping its position
    pub fn edit(&mut self, config: FormattingRuleConfig, index: usize) -> ControlResult<()> {
        self.check_index(index)?;
        debug!(index, column = %config.column, operator = %config.operator, "Formatting rule edited");
        let mut rules = self.rules.clone();
        rules[index] = config;
        self.commit(rules);
        Ok(())
    }

    /// Remove the rule at `index`; later rules shift left
    pub fn delete(&mut self, index: usize) -> ControlResult<FormattingRuleConfig> {
        self.check_index(index)?;
        let mut rules = self.rules.clone();
        let removed = rules.remove(index);
        debug!(index, column = %removed.column, "Formatting rule deleted");
        self.commit(rules);
        Ok(removed)
    }

    /// Drop rules whose column is not among the column options.
    ///
    /// Does nothing unless `remove_irrelevant_conditions` is on. Returns the
    /// number of rules removed; the host view is notified only if any were.
    pub fn prune(&mut self) -> usize {
        if !self.remove_irrelevant_conditions {
            return 0;
        }

        let kept: Vec<FormattingRuleConfig> = self
            .rules
            .iter()
            .filter(|rule| {
                self.column_options
                    .iter()
                    .any(|option| option.value == rule.column)
            })
            .cloned()
            .collect();

        let removed = self.rules.len() - kept.len();
        if removed > 0 {
            debug!(removed, remaining = kept.len(), "Pruned formatting rules for removed columns");
            self.set_rules(kept);
        }
        removed
    }

    /// Replace the column options, e.g. after the chart's columns changed
    pub fn set_column_options(&mut self, column_options: Vec<ColumnOption>) {
        self.column_options = column_options;
        self.prune();
    }

    pub fn set_remove_irrelevant_conditions(&mut self, enabled: bool) {
        self.remove_irrelevant_conditions = enabled;
        self.prune();
    }

    pub fn set_verbose_map(&mut self, verbose_map: Option<VerboseMap>) {
        self.verbose_map = verbose_map;
    }

    /// Label of a single rule, resolving column display names
    pub fn render_label(&self, config: &FormattingRuleConfig) -> String {
        config.label(self.verbose_map.as_ref())
    }

    /// Labels of all rules, in order
    pub fn labels(&self) -> Vec<String> {
        self.rules.iter().map(|rule| self.render_label(rule)).collect()
    }

    /// Popover props for editing the rule at `index`, or adding one when `None`
    pub fn popover_props(&self, index: Option<usize>) -> ControlResult<PopoverProps<'_>> {
        let config = match index {
            Some(index) => {
                self.check_index(index)?;
                Some(&self.rules[index])
            }
            None => None,
        };

        Ok(PopoverProps {
            config,
            columns: &self.column_options,
            extra_color_choices: &self.extra_color_choices,
        })
    }

    /// Color the current rules assign to a cell
    pub fn color_for(&self, column: &str, value: &FormattingValue) -> Option<&str> {
        color_for(&self.rules, column, value)
    }

    fn check_index(&self, index: usize) -> ControlResult<()> {
        if index < self.rules.len() {
            Ok(())
        } else {
            Err(ControlError::IndexOutOfBounds {
                index,
                len: self.rules.len(),
            })
        }
    }

    fn set_rules(&mut self, rules: Vec<FormattingRuleConfig>) {
        self.rules = rules;
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.rules);
        }
    }

    /// Commit a new rule list, notify, then run the prune effect
    fn commit(&mut self, rules: Vec<FormattingRuleConfig>) {
        self.set_rules(rules);
        self.prune();
    }
}
