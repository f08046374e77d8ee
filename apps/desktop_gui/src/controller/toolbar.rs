//! Toolbar state: search field visibility and the unsubmitted search draft.
//!
//! Every interaction mutates local state only; intents leave the toolbar as the
//! returned [`ToolbarAction`], which the board view applies.

use crate::controller::actions::ToolbarAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarController {
    show_search_field: bool,
    search_value: String,
    last_applied_query: String,
}

impl ToolbarController {
    pub fn new(applied_query: &str) -> Self {
        Self {
            show_search_field: false,
            search_value: applied_query.to_string(),
            last_applied_query: applied_query.to_string(),
        }
    }

    pub fn show_search_field(&self) -> bool {
        self.show_search_field
    }

    pub fn draft(&self) -> &str {
        &self.search_value
    }

    /// Mutable handle on the draft for a text widget. Same effect as [`Self::edit_draft`].
    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.search_value
    }

    pub fn click_search_label(&mut self) {
        self.show_search_field = true;
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) {
        self.search_value = text.into();
    }

    pub fn submit_search(&self) -> ToolbarAction {
        ToolbarAction::search(self.search_value.clone())
    }

    /// Hides the field, empties the draft and clears the applied filter.
    pub fn click_clear(&mut self) -> ToolbarAction {
        self.show_search_field = false;
        self.search_value.clear();
        ToolbarAction::search("")
    }

    pub fn click_column_header(&self) -> ToolbarAction {
        ToolbarAction::Sort
    }

    pub fn click_start_roll(&self) -> ToolbarAction {
        ToolbarAction::Roll
    }

    /// Re-seeds the draft when the board's applied query changed since the last call.
    ///
    /// Typing alone never changes the applied query, so an in-progress draft is
    /// left alone until something is actually applied.
    pub fn sync_applied_query(&mut self, applied_query: &str) {
        if self.last_applied_query != applied_query {
            self.last_applied_query = applied_query.to_string();
            self.search_value = applied_query.to_string();
        }
    }
}

#[cfg(test)]
#[path = "tests/toolbar_tests.rs"]
mod tests;
