//! UI/backend events and error modeling for the home board controller.

use crate::controller::reducer::{FetchOutcome, FetchTicket};

pub enum UiEvent {
    Info(String),
    /// A fetch finished. `error` carries the failure detail for the status line.
    RosterSettled {
        ticket: FetchTicket,
        outcome: FetchOutcome,
        error: Option<UiError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchRoster,
    General,
}

/// Status-line text for a failed roster fetch. The board itself only shows a generic indicator.
pub fn classify_fetch_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure") {
        "Backend worker startup failure; restart the app.".to_string()
    } else if lower.contains("failed to reach")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Roster server unreachable; check the server URL and reload.".to_string()
    } else {
        format!("Roster request failed: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("unreachable")
            || message_lower.contains("transport")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
