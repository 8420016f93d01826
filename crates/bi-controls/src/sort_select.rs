//! Card view sort selector
//!
//! A dropdown of sort options for a card-based list view. Exactly one
//! option is selected at any time; picking another one reports the new
//! sort as a single-element `[SortColumn]` list.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ControlError, ControlResult};

/// A column and direction the list can be sorted by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortColumn {
    pub id: String,
    pub desc: bool,
}

impl SortColumn {
    pub fn new(id: impl Into<String>, desc: bool) -> Self {
        Self { id: id.into(), desc }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub id: String,
    pub desc: bool,
    pub label: String,
    pub value: String,
}

impl SortOption {
    pub fn new(
        id: impl Into<String>,
        desc: bool,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            desc,
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn sort_column(&self) -> SortColumn {
        SortColumn::new(self.id.clone(), self.desc)
    }

    fn matches(&self, column: &SortColumn) -> bool {
        self.id == column.id && self.desc == column.desc
    }
}

/// An entry as shown in the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectItem<'a> {
    pub label: &'a str,
    pub value: &'a str,
}

pub type SortChangeHandler = Box<dyn FnMut(&[SortColumn]) + 'static>;

pub struct SortSelector {
    options: Vec<SortOption>,
    selected: usize,
    on_change: Option<SortChangeHandler>,
}

impl std::fmt::Debug for SortSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortSelector")
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl SortSelector {
    /// Create a selector.
    ///
    /// The initial selection is the option matching the first entry of
    /// `initial_sort` by id and direction, falling back to the first option.
    /// `on_change` is not called here.
    pub fn new(
        options: Vec<SortOption>,
        initial_sort: Option<&[SortColumn]>,
        on_change: Option<SortChangeHandler>,
    ) -> ControlResult<Self> {
        if options.is_empty() {
            return Err(ControlError::EmptyOptions);
        }

        let selected = match initial_sort.and_then(|sort| sort.first()) {
            Some(initial) => options
                .iter()
                .position(|option| option.matches(initial))
                .unwrap_or_else(|| {
                    warn!(id = %initial.id, desc = initial.desc, "Initial sort has no matching option");
                    0
                }),
            None => 0,
        };

        Ok(Self {
            options,
            selected,
            on_change,
        })
    }

    /// Dropdown entries, in option order
    pub fn items(&self) -> Vec<SelectItem<'_>> {
        self.options
            .iter()
            .map(|option| SelectItem {
                label: &option.label,
                value: &option.value,
            })
            .collect()
    }

    pub fn options(&self) -> &[SortOption] {
        &self.options
    }

    pub fn selected(&self) -> &SortOption {
        &self.options[self.selected]
    }

    /// The current sort as reported to the host view
    pub fn sort_by(&self) -> Vec<SortColumn> {
        vec![self.selected().sort_column()]
    }

    /// Select the option with the given `value` and notify the host view.
    ///
    /// An unknown value leaves the selection unchanged.
    pub fn select(&mut self, value: &str) -> ControlResult<&SortOption> {
        let index = self
            .options
            .iter()
            .position(|option| option.value == value)
            .ok_or_else(|| ControlError::UnknownOption(value.to_string()))?;

        self.selected = index;
        let sort_by = self.sort_by();
        debug!(value = %value, id = %sort_by[0].id, desc = sort_by[0].desc, "Sort selected");

        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&sort_by);
        }

        Ok(self.selected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn options() -> Vec<SortOption> {
        vec![
            SortOption::new("changed_on", true, "Recently modified", "recently_modified"),
            SortOption::new("name", false, "Alphabetical", "alphabetical"),
            SortOption::new("changed_on", false, "Least recently modified", "least_recently_modified"),
        ]
    }

    #[test]
    fn test_defaults_to_first_option() {
        let selector = SortSelector::new(options(), None, None).unwrap();
        assert_eq!(selector.selected().value, "recently_modified");
        assert_eq!(selector.sort_by(), vec![SortColumn::new("changed_on", true)]);
    }

    #[test]
    fn test_initial_sort_matches_id_and_direction() {
        let initial = [SortColumn::new("changed_on", false)];
        let selector = SortSelector::new(options(), Some(&initial[..]), None).unwrap();
        assert_eq!(selector.selected().value, "least_recently_modified");
    }

    #[test]
    fn test_unmatched_initial_sort_falls_back() {
        let initial = [SortColumn::new("name", true)];
        let selector = SortSelector::new(options(), Some(&initial[..]), None).unwrap();
        assert_eq!(selector.selected().value, "recently_modified");

        let empty: [SortColumn; 0] = [];
        let selector = SortSelector::new(options(), Some(&empty[..]), None).unwrap();
        assert_eq!(selector.selected().value, "recently_modified");
    }

    #[test]
    fn test_empty_options_rejected() {
        let err = SortSelector::new(vec![], None, None).unwrap_err();
        assert_eq!(err, ControlError::EmptyOptions);
    }

    #[test]
    fn test_select_notifies() {
        let calls: Rc<RefCell<Vec<Vec<SortColumn>>>> = Rc::default();
        let sink = calls.clone();
        let mut selector = SortSelector::new(
            options(),
            None,
            Some(Box::new(move |sort: &[SortColumn]| sink.borrow_mut().push(sort.to_vec()))),
        )
        .unwrap();

        assert!(calls.borrow().is_empty());

        let selected = selector.select("alphabetical").unwrap();
        assert_eq!(selected.label, "Alphabetical");
        assert_eq!(*calls.borrow(), vec![vec![SortColumn::new("name", false)]]);
    }

    #[test]
    fn test_unknown_value_keeps_selection() {
        let calls: Rc<RefCell<usize>> = Rc::default();
        let sink = calls.clone();
        let mut selector = SortSelector::new(
            options(),
            None,
            Some(Box::new(move |_: &[SortColumn]| *sink.borrow_mut() += 1)),
        )
        .unwrap();

        let err = selector.select("nope").unwrap_err();
        assert_eq!(err, ControlError::UnknownOption("nope".to_string()));
        assert_eq!(selector.selected().value, "recently_modified");
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_items_follow_option_order() {
        let selector = SortSelector::new(options(), None, None).unwrap();
        let items = selector.items();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[1],
            SelectItem {
                label: "Alphabetical",
                value: "alphabetical",
            }
        );
        assert_eq!(items[2].value, "least_recently_modified");
    }

    #[test]
    fn test_sort_column_serializes_as_id_and_desc() {
        let json = serde_json::to_value(SortColumn::new("changed_on", true)).unwrap();
        assert_eq!(json, serde_json::json!({"id": "changed_on", "desc": true}));
    }
}
