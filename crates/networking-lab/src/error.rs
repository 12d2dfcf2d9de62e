use crate::admin::{AdminError, ExportError, SessionError};
use crate::companion::{CompanionStoreError, ContactError, UnknownPreference};
use crate::config::ConfigError;
use crate::leads::LeadServiceError;
use crate::quiz::CatalogError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Server(axum::Error),
    Catalog(CatalogError),
    Leads(LeadServiceError),
    Admin(AdminError),
    Companion(CompanionStoreError),
    Contact(ContactError),
    Preference(UnknownPreference),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Json(_) | AppError::Contact(_) | AppError::Preference(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Leads(LeadServiceError::MissingSessionId) => StatusCode::BAD_REQUEST,
            AppError::Admin(AdminError::InvalidCredentials)
            | AppError::Admin(AdminError::Session(_)) => StatusCode::UNAUTHORIZED,
            AppError::Admin(AdminError::Export(
                ExportError::UnknownKind | ExportError::UnknownFormat(_) | ExportError::Unsupported { .. },
            )) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Catalog(_)
            | AppError::Leads(_)
            | AppError::Admin(_)
            | AppError::Companion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "invalid json: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Leads(err) => write!(f, "{}", err),
            AppError::Admin(err) => write!(f, "{}", err),
            AppError::Companion(err) => write!(f, "companion error: {}", err),
            AppError::Contact(err) => write!(f, "{}", err),
            AppError::Preference(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Leads(err) => Some(err),
            AppError::Admin(err) => Some(err),
            AppError::Companion(err) => Some(err),
            AppError::Contact(err) => Some(err),
            AppError::Preference(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<LeadServiceError> for AppError {
    fn from(value: LeadServiceError) -> Self {
        Self::Leads(value)
    }
}

impl From<AdminError> for AppError {
    fn from(value: AdminError) -> Self {
        Self::Admin(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Admin(AdminError::Export(value))
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Admin(AdminError::Session(value))
    }
}

impl From<CompanionStoreError> for AppError {
    fn from(value: CompanionStoreError) -> Self {
        Self::Companion(value)
    }
}

impl From<ContactError> for AppError {
    fn from(value: ContactError) -> Self {
        Self::Contact(value)
    }
}

impl From<UnknownPreference> for AppError {
    fn from(value: UnknownPreference) -> Self {
        Self::Preference(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::RepositoryError;

    #[test]
    fn input_errors_map_to_bad_request() {
        assert_eq!(
            AppError::from(LeadServiceError::MissingSessionId).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ExportError::UnknownKind).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ContactError::MissingName).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn auth_errors_map_to_unauthorized() {
        assert_eq!(
            AppError::from(AdminError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(SessionError::Expired).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn storage_errors_map_to_server_error() {
        let err = AppError::from(LeadServiceError::from(RepositoryError::Poisoned));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "lead store lock poisoned");
        assert_eq!(
            AppError::from(AdminError::NotConfigured).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
