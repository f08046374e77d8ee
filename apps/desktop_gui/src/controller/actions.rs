//! Intents emitted by the toolbar and the roll overlay.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolbarAction {
    Roll,
    Sort,
    Search {
        #[serde(default)]
        value: String,
    },
    /// Any tag this build does not know about. Always a no-op.
    #[serde(other)]
    Unknown,
}

impl ToolbarAction {
    pub fn search(value: impl Into<String>) -> Self {
        Self::Search {
            value: value.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Roll => "roll",
            Self::Sort => "sort",
            Self::Search { .. } => "search",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayAction {
    Exit,
    #[serde(other)]
    Unknown,
}
