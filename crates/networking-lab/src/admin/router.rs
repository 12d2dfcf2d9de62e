use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::analytics::TimeRange;
use super::export::{ExportError, ExportFormat, ExportKind};
use super::service::{AdminError, AdminService};
use super::session::clear_session_cookies;
use crate::leads::LeadRepository;

/// Router exposing admin login, dashboard, and export endpoints.
pub fn admin_router<R>(service: Arc<AdminService<R>>) -> Router
where
    R: LeadRepository + 'static,
{
    Router::new()
        .route("/api/admin/login", post(login_handler::<R>))
        .route("/api/admin/logout", post(logout_handler))
        .route("/api/admin/export", get(export_handler::<R>))
        .route("/api/admin/dashboard", get(dashboard_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
    format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    range: Option<String>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_authorized<R>(service: &AdminService<R>, headers: &HeaderMap) -> bool
where
    R: LeadRepository + 'static,
{
    service.authorize(&cookie_header(headers), Utc::now()).is_ok()
}

pub(crate) async fn login_handler<R>(
    State(service): State<Arc<AdminService<R>>>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response
where
    R: LeadRepository + 'static,
{
    if is_authorized(&service, &headers) {
        return (StatusCode::OK, Json(json!({ "success": true }))).into_response();
    }
    let Ok(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
    };

    match service.login(&request.username, &request.password, Utc::now()) {
        Ok(token) => {
            let cookie = service
                .signer()
                .map(|signer| signer.session_cookie(&token))
                .unwrap_or_default();
            (
                StatusCode::OK,
                AppendHeaders([(header::SET_COOKIE, cookie)]),
                Json(json!({ "success": true })),
            )
                .into_response()
        }
        Err(err @ AdminError::NotConfigured) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
        Err(err @ AdminError::InvalidCredentials) => {
            error_response(StatusCode::UNAUTHORIZED, &err.to_string())
        }
        Err(err) => {
            error!(error = %err, "admin login failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Login failed")
        }
    }
}

pub(crate) async fn logout_handler() -> Response {
    let [root, legacy] = clear_session_cookies();
    (
        StatusCode::OK,
        AppendHeaders([(header::SET_COOKIE, root), (header::SET_COOKIE, legacy)]),
        Json(json!({ "success": true })),
    )
        .into_response()
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<AdminService<R>>>,
    headers: HeaderMap,
    Query(query): Query<ExportQuery>,
) -> Response
where
    R: LeadRepository + 'static,
{
    if !is_authorized(&service, &headers) {
        return error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let kind = match query.kind.as_deref().unwrap_or_default().parse::<ExportKind>() {
        Ok(kind) => kind,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    };
    let format = match query.format.as_deref() {
        None => ExportFormat::default(),
        Some(raw) => match raw.parse::<ExportFormat>() {
            Ok(format) => format,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
        },
    };

    match service.export(kind, format) {
        Ok(file) => {
            let disposition = file.content_disposition();
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, file.content_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                file.body,
            )
                .into_response()
        }
        Err(AdminError::Export(err @ ExportError::Unsupported { .. })) => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(err) => {
            error!(error = %err, "export failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Export failed")
        }
    }
}

pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<AdminService<R>>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    R: LeadRepository + 'static,
{
    if !is_authorized(&service, &headers) {
        return error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let range = match query.range.as_deref() {
        None => TimeRange::default(),
        Some(raw) => match raw.parse::<TimeRange>() {
            Ok(range) => range,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
        },
    };

    match service.dashboard(range, Utc::now()) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => {
            error!(error = %err, "dashboard aggregation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Dashboard unavailable")
        }
    }
}
