use super::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{extract::State, http::StatusCode as HttpStatus, routing::get, Json, Router};
use shared::error::ErrorCode;
use tokio::net::TcpListener;

#[derive(Clone)]
struct ServerState {
    hits: Arc<AtomicUsize>,
}

async fn list_students(State(state): State<ServerState>) -> Json<serde_json::Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(serde_json::json!({
        "students": [
            { "id": 1, "first_name": "Alice", "last_name": "Jones" },
            { "id": 2, "first_name": "Bob", "last_name": "Smith" },
            { "id": 3, "first_name": "Cara" }
        ]
    }))
}

async fn reject_students() -> (HttpStatus, Json<ApiError>) {
    (
        HttpStatus::INTERNAL_SERVER_ERROR,
        Json(ApiError::new(ErrorCode::Internal, "roster store offline")),
    )
}

async fn malformed_students() -> &'static str {
    "not json"
}

async fn spawn_roster_server() -> (String, Arc<AtomicUsize>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/get-homeboard-students", get(list_students))
        .route("/broken/get-homeboard-students", get(reject_students))
        .route("/garbled/get-homeboard-students", get(malformed_students))
        .with_state(ServerState { hits: hits.clone() });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), hits)
}

#[test]
fn builds_endpoint_under_base_path() {
    let source = HttpRosterSource::new("http://127.0.0.1:4001/api/").expect("source");
    assert_eq!(
        source.endpoint().as_str(),
        "http://127.0.0.1:4001/api/get-homeboard-students"
    );
}

#[test]
fn rejects_unparseable_server_url() {
    let err = HttpRosterSource::new("not a url").err().expect("invalid url");
    assert!(matches!(err, FetchError::InvalidUrl { .. }));
}

#[tokio::test]
async fn fetches_roster_in_server_order() {
    let (server_url, hits) = spawn_roster_server().await;
    let source = HttpRosterSource::new(&server_url).expect("source");

    let roster = source.fetch_roster().await.expect("roster");

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    let names: Vec<String> = roster.iter().map(Person::full_name).collect();
    assert_eq!(names, vec!["Alice Jones", "Bob Smith", "Cara "]);
}

#[tokio::test]
async fn maps_error_status_with_api_error_message() {
    let (server_url, _) = spawn_roster_server().await;
    let source = HttpRosterSource::new(&format!("{server_url}/broken")).expect("source");

    let err = source.fetch_roster().await.expect_err("status error");

    match err {
        FetchError::Status { status, message } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "roster store offline");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn maps_missing_route_to_status_error() {
    let (server_url, _) = spawn_roster_server().await;
    let source = HttpRosterSource::new(&format!("{server_url}/nowhere")).expect("source");

    let err = source.fetch_roster().await.expect_err("status error");

    assert!(matches!(
        err,
        FetchError::Status { status, .. } if status == StatusCode::NOT_FOUND
    ));
}

#[tokio::test]
async fn maps_garbled_body_to_decode_error() {
    let (server_url, _) = spawn_roster_server().await;
    let source = HttpRosterSource::new(&format!("{server_url}/garbled")).expect("source");

    let err = source.fetch_roster().await.expect_err("decode error");

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let source = HttpRosterSource::new(&format!("http://{addr}")).expect("source");

    let err = source.fetch_roster().await.expect_err("transport error");

    assert!(matches!(err, FetchError::Transport(_)));
}
