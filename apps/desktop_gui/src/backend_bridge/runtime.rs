//! Runtime bridge between UI command queue and backend event intake.
//!
//! The worker owns a tokio runtime on its own thread. Each roster fetch runs as
//! a task and reports back through the bounded UI event queue.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use client_core::{HttpRosterSource, RosterSource};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    reducer::{FetchOutcome, FetchTicket},
};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    server_url: &str,
    request_timeout: Duration,
) -> Option<JoinHandle<()>> {
    match HttpRosterSource::with_timeout(server_url, request_timeout) {
        Ok(source) => Some(spawn_worker(cmd_rx, ui_tx, Arc::new(source))),
        Err(err) => {
            tracing::error!("failed to build roster source: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: {err}"),
            )));
            None
        }
    }
}

pub fn spawn_worker(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Arc<dyn RosterSource>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
        let mut in_flight = Vec::new();
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::FetchRoster { ticket } => {
                    let source = Arc::clone(&source);
                    let ui_tx = ui_tx.clone();
                    in_flight.push(runtime.spawn(async move {
                        fetch_and_report(source.as_ref(), ticket, &ui_tx).await;
                    }));
                }
            }
            in_flight.retain(|task| !task.is_finished());
        }

        // Queue closed: let pending fetches settle before the runtime goes away.
        runtime.block_on(async move {
            for task in in_flight {
                let _ = task.await;
            }
        });
        tracing::debug!("backend worker stopped");
    })
}

async fn fetch_and_report(
    source: &dyn RosterSource,
    ticket: FetchTicket,
    ui_tx: &Sender<UiEvent>,
) {
    tracing::info!(generation = ticket.generation(), "backend: fetch_roster");
    let (outcome, error) = match source.fetch_roster().await {
        Ok(roster) => (FetchOutcome::Loaded(roster), None),
        Err(err) => {
            tracing::warn!(
                generation = ticket.generation(),
                "backend: fetch_roster failed: {err}"
            );
            (
                FetchOutcome::Failed,
                Some(UiError::from_message(
                    UiErrorContext::FetchRoster,
                    err.to_string(),
                )),
            )
        }
    };
    let settled = UiEvent::RosterSettled {
        ticket,
        outcome,
        error,
    };
    if ui_tx.send(settled).is_err() {
        tracing::debug!("ui event queue closed before roster fetch settled");
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
