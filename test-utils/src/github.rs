//! Fake GitHub server.
//!
//! Serves the subset of the contents API the bot uses plus a raw-file mirror, all
//! backed by a [`MemoryRepo`]. Bound to an ephemeral local port and stopped when
//! dropped.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use tokio::task::JoinHandle;

use crate::{
    error::TestError,
    remote::{MemoryRepo, PutError},
};

/// A running fake GitHub server.
pub struct FakeGitHub {
    /// Repository behind the server.
    pub repo: MemoryRepo,
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl FakeGitHub {
    /// Starts the server on `127.0.0.1` with an ephemeral port.
    ///
    /// # Returns
    /// - `Ok(FakeGitHub)` - Server is accepting connections
    /// - `Err(TestError::Io)` - Could not bind the listener
    pub async fn spawn(repo: MemoryRepo) -> Result<Self, TestError> {
        let router = Router::new()
            .route(
                "/repos/{owner}/{name}/contents/{*path}",
                get(get_contents).put(put_contents),
            )
            .route("/raw/{*path}", get(get_raw))
            .with_state(repo.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self { repo, addr, task })
    }

    /// Base URL to use as the API URL.
    pub fn api_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Public mirror URL of a repository file.
    pub fn mirror_url(&self, path: &str) -> String {
        format!("http://{}/raw/{}", self.addr, path)
    }
}

impl Drop for FakeGitHub {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Deserialize)]
struct PutBody {
    message: String,
    content: String,
    #[serde(default)]
    sha: Option<String>,
}

async fn get_contents(
    State(repo): State<MemoryRepo>,
    Path((_owner, _name, path)): Path<(String, String, String)>,
) -> Response {
    if repo.is_failing() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    match repo.get(&path) {
        Some((content, sha)) => Json(json!({
            "path": path,
            "sha": sha,
            "encoding": "base64",
            "content": STANDARD.encode(content),
        }))
        .into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response(),
    }
}

async fn put_contents(
    State(repo): State<MemoryRepo>,
    Path((_owner, _name, path)): Path<(String, String, String)>,
    Json(body): Json<PutBody>,
) -> Response {
    if repo.is_failing() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let Ok(content) = STANDARD.decode(&body.content) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match repo.put(&path, content, &body.message, body.sha.as_deref()) {
        Ok(sha) => Json(json!({ "content": { "path": path, "sha": sha } })).into_response(),
        Err(PutError::Conflict) => (
            StatusCode::CONFLICT,
            Json(json!({ "message": "sha does not match" })),
        )
            .into_response(),
    }
}

async fn get_raw(State(repo): State<MemoryRepo>, Path(path): Path<String>) -> Response {
    if repo.is_failing() || repo.take_mirror_lag() {
        return StatusCode::NOT_FOUND.into_response();
    }

    match repo.text(&path) {
        Some(text) => text.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
