use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::preferences::Preferences;
use super::prompts::build_personalised_cards;
use super::session::SessionPlan;

/// Stateless personalisation endpoints for the companion app.
pub fn companion_router() -> Router {
    Router::new()
        .route("/api/companion/cards", post(cards_handler))
        .route("/api/companion/plan", post(plan_handler))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlanRequest {
    #[serde(flatten)]
    preferences: Preferences,
    #[serde(default)]
    rotation: usize,
}

fn invalid_body() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Invalid JSON body" })),
    )
        .into_response()
}

pub(crate) async fn cards_handler(payload: Result<Json<Preferences>, JsonRejection>) -> Response {
    let Ok(Json(preferences)) = payload else {
        return invalid_body();
    };
    let cards = build_personalised_cards(&preferences);
    Json(json!({ "cards": cards })).into_response()
}

pub(crate) async fn plan_handler(payload: Result<Json<PlanRequest>, JsonRejection>) -> Response {
    let Ok(Json(request)) = payload else {
        return invalid_body();
    };
    Json(SessionPlan::for_preferences(&request.preferences, request.rotation)).into_response()
}
