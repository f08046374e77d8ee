use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::Person,
    error::ApiError,
    protocol::{HomeboardStudentsResponse, HOMEBOARD_STUDENTS_PATH},
};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid roster endpoint url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to reach roster endpoint: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("roster endpoint returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("invalid roster response payload: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Asynchronous capability that retrieves the home board roster.
///
/// Implementations know the transport; callers only see the roster or a failure.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn fetch_roster(&self) -> Result<Vec<Person>, FetchError>;
}

pub struct HttpRosterSource {
    http: Client,
    endpoint: Url,
}

impl HttpRosterSource {
    pub fn new(server_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(server_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = roster_endpoint(server_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RosterSource for HttpRosterSource {
    async fn fetch_roster(&self) -> Result<Vec<Person>, FetchError> {
        info!(endpoint = %self.endpoint, "fetching home board roster");
        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiError>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            };
            warn!(%status, %message, "roster endpoint rejected request");
            return Err(FetchError::Status { status, message });
        }

        let body: HomeboardStudentsResponse =
            response.json().await.map_err(FetchError::Decode)?;
        info!(students = body.students.len(), "home board roster loaded");
        Ok(body.students)
    }
}

fn roster_endpoint(server_url: &str) -> Result<Url, FetchError> {
    let base = format!("{}/", server_url.trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|base| base.join(HOMEBOARD_STUDENTS_PATH.trim_start_matches('/')))
        .map_err(|source| FetchError::InvalidUrl {
            url: server_url.to_string(),
            source,
        })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
