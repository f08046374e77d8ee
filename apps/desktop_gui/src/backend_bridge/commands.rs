//! Backend commands queued from UI to backend worker.

use crate::controller::reducer::FetchTicket;

#[derive(Debug)]
pub enum BackendCommand {
    FetchRoster { ticket: FetchTicket },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchRoster { .. } => "fetch_roster",
        }
    }
}
