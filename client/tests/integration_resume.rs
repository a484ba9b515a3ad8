mod common;

use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use client::{ApiClient, Session, SessionStore};
use serde_json::{json, Value};

fn record(filename: &str) -> Value {
    json!({
        "id": 1,
        "original_filename": filename,
        "content_type": "text/plain",
        "extracted_text": "ten years of experience",
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-02T00:00:00Z",
    })
}

fn resume_router() -> Router {
    Router::new()
        .route("/user/resume", get(no_saved_resume))
        .route("/user/resume/upload", post(upload))
        .route("/user/resume/rename", patch(rename))
        .route("/resume/optimize-from-jd", post(optimize))
        .route("/resume/tailor-from-saved", post(tailor))
        .route("/job-fit/analyze", post(analyze))
}

async fn no_saved_resume(headers: HeaderMap) -> impl IntoResponse {
    if common::bearer(&headers) != Some("tok123") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Could not validate credentials."})),
        )
            .into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "No resume saved for this user."})),
    )
        .into_response()
}

async fn upload(headers: HeaderMap, mut multipart: Multipart) -> impl IntoResponse {
    if common::bearer(&headers) != Some("tok123") {
        return (StatusCode::UNAUTHORIZED, "").into_response();
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("resume").to_owned();
            return Json(record(&filename)).into_response();
        }
    }
    (StatusCode::BAD_REQUEST, "missing file").into_response()
}

async fn rename(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    if common::bearer(&headers) != Some("tok123") {
        return (StatusCode::UNAUTHORIZED, "").into_response();
    }
    match body["new_filename"].as_str() {
        Some(name) if !name.is_empty() => Json(record(name)).into_response(),
        _ => (StatusCode::BAD_REQUEST, "new_filename is required").into_response(),
    }
}

async fn optimize(Json(body): Json<Value>) -> impl IntoResponse {
    if body["job_description"] == "" || body["resume_text"] == "" {
        return (StatusCode::BAD_REQUEST, "both texts are required").into_response();
    }
    Json(json!({"optimized_resume": "OPTIMIZED\nten years of experience"})).into_response()
}

async fn tailor(headers: HeaderMap) -> impl IntoResponse {
    if common::bearer(&headers) != Some("tok123") {
        return (StatusCode::UNAUTHORIZED, "").into_response();
    }
    // Nested analysis uses the legacy field spellings on purpose.
    Json(json!({
        "tailored_resume": "TAILORED",
        "improvement_explanation": "reordered the skills section",
        "improved_match": {"matchScore": 88, "strong_points": ["Rust"]},
    }))
    .into_response()
}

async fn analyze(Json(body): Json<Value>) -> impl IntoResponse {
    if body["job_description"] == "" {
        return (StatusCode::BAD_REQUEST, "job_description is required").into_response();
    }
    Json(json!({
        "match_score": 72,
        "strengths": ["X"],
        "missing_skills": ["Y"],
    }))
    .into_response()
}

async fn logged_in_client(prefix: &str) -> anyhow::Result<ApiClient> {
    let base_url = common::spawn_backend(resume_router()).await?;
    let store = SessionStore::new(common::temp_session_path(prefix));
    store.save(&Session {
        email: "a@b.com".to_owned(),
        access_token: "tok123".to_owned(),
    })?;
    Ok(ApiClient::new(base_url, store)?)
}

#[tokio::test]
async fn missing_saved_resume_maps_to_none() -> anyhow::Result<()> {
    let client = logged_in_client("careerboost_nosaved").await?;
    assert_eq!(client.saved_resume().await?, None);
    Ok(())
}

#[tokio::test]
async fn upload_returns_the_stored_record() -> anyhow::Result<()> {
    let client = logged_in_client("careerboost_upload").await?;
    let record = client
        .upload_resume("pasted-resume.txt", b"ten years of experience".to_vec())
        .await?;
    assert_eq!(record.original_filename, "pasted-resume.txt");
    assert_eq!(record.extracted_text, "ten years of experience");
    Ok(())
}

#[tokio::test]
async fn upload_without_session_fails_before_network() -> anyhow::Result<()> {
    let client = common::client_for(resume_router(), "careerboost_upload_anon").await?;
    let error = client
        .upload_resume("resume.txt", b"text".to_vec())
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "please log in to use this feature");
    Ok(())
}

#[tokio::test]
async fn rename_sends_patch_with_new_filename() -> anyhow::Result<()> {
    let client = logged_in_client("careerboost_rename").await?;
    let record = client.rename_resume("2026-dev-resume.pdf").await?;
    assert_eq!(record.original_filename, "2026-dev-resume.pdf");
    Ok(())
}

#[tokio::test]
async fn optimize_returns_the_rewritten_text() -> anyhow::Result<()> {
    let client = common::client_for(resume_router(), "careerboost_optimize").await?;
    let optimized = client
        .optimize_resume("job description", "ten years of experience")
        .await?;
    assert_eq!(optimized, "OPTIMIZED\nten years of experience");
    Ok(())
}

#[tokio::test]
async fn tailor_decodes_nested_legacy_analysis() -> anyhow::Result<()> {
    let client = logged_in_client("careerboost_tailor").await?;
    let response = client.tailor_resume_from_saved("job description").await?;
    assert_eq!(response.tailored_resume, "TAILORED");
    assert_eq!(
        response.improvement_explanation,
        "reordered the skills section"
    );
    assert_eq!(response.improved_match.match_score, 88);
    assert_eq!(response.improved_match.strengths, vec!["Rust"]);
    assert!(response.improved_match.red_flags.is_empty());
    Ok(())
}

#[tokio::test]
async fn analysis_defaults_absent_sections_to_empty() -> anyhow::Result<()> {
    let client = common::client_for(resume_router(), "careerboost_analyze").await?;
    let analysis = client
        .analyze_job_fit("job description", "ten years of experience")
        .await?;
    assert_eq!(analysis.match_score, 72);
    assert_eq!(analysis.strengths, vec!["X"]);
    assert_eq!(analysis.missing_skills, vec!["Y"]);
    assert!(analysis.red_flags.is_empty());
    assert!(analysis.recommendations.is_empty());
    Ok(())
}
