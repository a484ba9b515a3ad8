#![allow(dead_code)]

use std::path::PathBuf;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Router;
use client::{ApiClient, SessionStore};
use url::Url;
use uuid::Uuid;

/// Boots the given router on an ephemeral local port and returns its base
/// URL. The server task lives for the rest of the test process.
pub async fn spawn_backend(app: Router) -> anyhow::Result<Url> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend failed");
    });
    Ok(Url::parse(&format!("http://{addr}"))?)
}

/// Generates a unique session file path so tests never share state.
pub fn temp_session_path(prefix: &str) -> PathBuf {
    let suffix = Uuid::new_v4().simple();
    std::env::temp_dir().join(format!("{prefix}_{suffix}.json"))
}

pub async fn client_for(app: Router, prefix: &str) -> anyhow::Result<ApiClient> {
    let base_url = spawn_backend(app).await?;
    let store = SessionStore::new(temp_session_path(prefix));
    Ok(ApiClient::new(base_url, store)?)
}

/// The bearer token carried by the request, if any.
pub fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
