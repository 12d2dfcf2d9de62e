use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use super::domain::{InterestRecord, QuizProgressUpdate, SubmissionRecord};
use super::repository::LeadRepository;
use super::service::{LeadService, LeadServiceError};
use crate::quiz::AnswerSet;

/// Router exposing the public quiz funnel endpoints.
pub fn lead_router<R>(service: Arc<LeadService<R>>) -> Router
where
    R: LeadRepository + 'static,
{
    Router::new()
        .route("/api/submit", post(submit_handler::<R>))
        .route("/api/interest", post(interest_handler::<R>))
        .route("/api/quiz-progress", post(progress_handler::<R>))
        .route("/api/quiz/questions", get(questions_handler::<R>))
        .route("/api/quiz/results", post(results_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    answers: AnswerSet,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn success() -> Response {
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

fn save_failed(err: LeadServiceError) -> Response {
    error!(error = %err, "failed to persist lead data");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save")
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    payload: Result<Json<SubmissionRecord>, JsonRejection>,
) -> Response
where
    R: LeadRepository + 'static,
{
    let Ok(Json(record)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
    };
    match service.submit(record) {
        Ok(_) => success(),
        Err(err) => save_failed(err),
    }
}

pub(crate) async fn interest_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    payload: Result<Json<InterestRecord>, JsonRejection>,
) -> Response
where
    R: LeadRepository + 'static,
{
    let Ok(Json(record)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
    };
    match service.register_interest(record) {
        Ok(_) => success(),
        Err(err) => save_failed(err),
    }
}

pub(crate) async fn progress_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response
where
    R: LeadRepository + 'static,
{
    let Ok(Json(body)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
    };
    let Value::Object(mut fields) = body else {
        return error_response(StatusCode::BAD_REQUEST, "Body must be an object");
    };
    let session_id = match fields.remove("sessionId") {
        Some(Value::String(id)) if !id.trim().is_empty() => id,
        _ => return error_response(StatusCode::BAD_REQUEST, "sessionId required"),
    };
    let update: QuizProgressUpdate = match serde_json::from_value(Value::Object(fields)) {
        Ok(update) => update,
        Err(err) => {
            warn!(error = %err, "rejecting malformed quiz progress fields");
            return error_response(StatusCode::BAD_REQUEST, "Invalid session fields");
        }
    };

    match service.save_progress(&session_id, update) {
        Ok(_) => success(),
        Err(LeadServiceError::MissingSessionId) => {
            error_response(StatusCode::BAD_REQUEST, "sessionId required")
        }
        Err(err) => save_failed(err),
    }
}

pub(crate) async fn questions_handler<R>(State(service): State<Arc<LeadService<R>>>) -> Response
where
    R: LeadRepository + 'static,
{
    (StatusCode::OK, Json(service.catalog())).into_response()
}

pub(crate) async fn results_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response
where
    R: LeadRepository + 'static,
{
    let Ok(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
    };
    (StatusCode::OK, Json(service.score(&request.answers))).into_response()
}
