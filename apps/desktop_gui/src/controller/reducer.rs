//! Home board state machine: roster load status, browse/roll mode, and the applied search.
//!
//! All transitions are synchronous and run on the UI thread. The roster fetch
//! itself happens elsewhere; this module hands out a [`FetchTicket`] when a fetch
//! should start and accepts the settled outcome back through [`BoardView::settle_fetch`].

use shared::domain::Person;

use crate::controller::{
    actions::{OverlayAction, ToolbarAction},
    filter::filter_roster,
    toolbar::ToolbarController,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded(Vec<Person>),
    Error,
}

impl LoadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardMode {
    Browse,
    Roll,
}

/// Identity of the fetch capability a mount is bound to.
///
/// Mounting again with an equal trigger is a no-op; a different trigger starts a new fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTrigger(String);

impl FetchTrigger {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Terminal result of one roster fetch. Failure detail is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(Vec<Person>),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleResult {
    Applied,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarView<'a> {
    pub show_search_field: bool,
    pub draft: &'a str,
    pub applied_query: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentRow<'a> {
    pub student: &'a Person,
    pub is_roll_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardBody<'a> {
    Empty,
    Loading,
    Error,
    Rows(Vec<StudentRow<'a>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRender<'a> {
    pub toolbar: ToolbarView<'a>,
    pub body: BoardBody<'a>,
    pub overlay_active: bool,
}

impl BoardRender<'_> {
    pub fn row_count(&self) -> usize {
        match &self.body {
            BoardBody::Rows(rows) => rows.len(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BoardView {
    status: LoadStatus,
    mode: BoardMode,
    search_query: String,
    toolbar: ToolbarController,
    mounted_trigger: Option<FetchTrigger>,
    generation: u64,
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardView {
    pub fn new() -> Self {
        Self {
            status: LoadStatus::Idle,
            mode: BoardMode::Browse,
            search_query: String::new(),
            toolbar: ToolbarController::new(""),
            mounted_trigger: None,
            generation: 0,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    pub fn is_roll_mode(&self) -> bool {
        self.mode() == BoardMode::Roll
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn toolbar(&self) -> &ToolbarController {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut ToolbarController {
        &mut self.toolbar
    }

    /// Mount effect. Returns a ticket only when a fetch must be started.
    pub fn on_mount(&mut self, trigger: &FetchTrigger) -> Option<FetchTicket> {
        if self.mounted_trigger.as_ref() == Some(trigger) {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.mounted_trigger = Some(trigger.clone());
        self.status = LoadStatus::Loading;
        tracing::debug!(
            trigger = trigger.key(),
            generation = self.generation,
            "home board mounted; roster fetch requested"
        );
        Some(FetchTicket {
            generation: self.generation,
        })
    }

    /// Drops the mount. Any fetch still in flight will be ignored when it settles.
    pub fn unmount(&mut self) {
        if self.mounted_trigger.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    pub fn settle_fetch(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> SettleResult {
        let current = self.mounted_trigger.is_some()
            && ticket.generation == self.generation
            && self.status == LoadStatus::Loading;
        if !current {
            tracing::debug!(
                generation = ticket.generation,
                current_generation = self.generation,
                "ignoring stale roster fetch result"
            );
            return SettleResult::Stale;
        }

        self.status = match outcome {
            FetchOutcome::Loaded(roster) => LoadStatus::Loaded(roster),
            FetchOutcome::Failed => LoadStatus::Error,
        };
        SettleResult::Applied
    }

    pub fn apply_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Roll => {
                self.mode = BoardMode::Roll;
            }
            ToolbarAction::Search { value } => {
                self.search_query = value;
                self.toolbar.sync_applied_query(&self.search_query);
            }
            ToolbarAction::Sort => {
                tracing::debug!("sort requested; roster order unchanged");
            }
            ToolbarAction::Unknown => {
                tracing::debug!("ignoring unknown toolbar action");
            }
        }
    }

    pub fn apply_overlay_action(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::Exit => {
                self.mode = BoardMode::Browse;
            }
            OverlayAction::Unknown => {
                tracing::debug!("ignoring unknown overlay action");
            }
        }
    }

    pub fn render(&self) -> BoardRender<'_> {
        let is_roll_mode = self.is_roll_mode();
        let body = match &self.status {
            LoadStatus::Idle => BoardBody::Empty,
            LoadStatus::Loading => BoardBody::Loading,
            LoadStatus::Error => BoardBody::Error,
            LoadStatus::Loaded(roster) => BoardBody::Rows(
                filter_roster(roster, &self.search_query)
                    .into_iter()
                    .map(|student| StudentRow {
                        student,
                        is_roll_mode,
                    })
                    .collect(),
            ),
        };

        BoardRender {
            toolbar: ToolbarView {
                show_search_field: self.toolbar.show_search_field(),
                draft: self.toolbar.draft(),
                applied_query: &self.search_query,
            },
            body,
            overlay_active: is_roll_mode,
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
