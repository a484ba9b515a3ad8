mod common;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use client::{ApiClient, Session, SessionStore};
use serde_json::{json, Value};
use shared::CareerProfileUpdate;

fn profile_router() -> Router {
    Router::new().route("/user/profile", get(get_profile).put(put_profile))
}

fn profile_with_skills(skills: &str) -> Value {
    json!({
        "id": 3,
        "user_id": 7,
        "experience_level": "senior",
        "preferred_roles": null,
        "preferred_industries": null,
        "preferred_locations": null,
        "skills": skills,
        "work_authorization": null,
        "career_goal": null,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-02T00:00:00Z",
    })
}

async fn get_profile(headers: HeaderMap) -> impl IntoResponse {
    if common::bearer(&headers) != Some("tok123") {
        return (StatusCode::UNAUTHORIZED, "").into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Profile not found for this user."})),
    )
        .into_response()
}

async fn put_profile(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    if common::bearer(&headers) != Some("tok123") {
        return (StatusCode::UNAUTHORIZED, "").into_response();
    }
    // A partial update must only carry the fields that were set.
    let keys: Vec<&str> = body
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default();
    if keys != ["skills"] {
        return (StatusCode::BAD_REQUEST, "unexpected fields in update").into_response();
    }
    Json(profile_with_skills(body["skills"].as_str().unwrap_or_default())).into_response()
}

async fn logged_in_client(prefix: &str) -> anyhow::Result<ApiClient> {
    let base_url = common::spawn_backend(profile_router()).await?;
    let store = SessionStore::new(common::temp_session_path(prefix));
    store.save(&Session {
        email: "a@b.com".to_owned(),
        access_token: "tok123".to_owned(),
    })?;
    Ok(ApiClient::new(base_url, store)?)
}

#[tokio::test]
async fn missing_profile_maps_to_none() -> anyhow::Result<()> {
    let client = logged_in_client("careerboost_profile_none").await?;
    assert_eq!(client.career_profile().await?, None);
    Ok(())
}

#[tokio::test]
async fn partial_update_omits_unset_fields() -> anyhow::Result<()> {
    let client = logged_in_client("careerboost_profile_update").await?;
    let update = CareerProfileUpdate {
        skills: Some("Rust, SQL".to_owned()),
        ..Default::default()
    };
    let profile = client.update_career_profile(&update).await?;
    assert_eq!(profile.skills.as_deref(), Some("Rust, SQL"));
    assert_eq!(profile.user_id, 7);
    Ok(())
}

#[tokio::test]
async fn profile_calls_without_token_are_rejected() -> anyhow::Result<()> {
    let client = common::client_for(profile_router(), "careerboost_profile_anon").await?;
    let error = client.career_profile().await.unwrap_err();
    assert!(error.is_auth_rejection());
    Ok(())
}
