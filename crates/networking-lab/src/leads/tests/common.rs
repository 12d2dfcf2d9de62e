use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tempfile::TempDir;

use crate::leads::domain::{
    InterestRecord, QuizProgressUpdate, QuizSessionRecord, SessionWrite, SubmissionRecord,
};
use crate::leads::repository::{JsonFileLeadStore, LeadRepository, RepositoryError};
use crate::leads::service::LeadService;
use crate::quiz::{QuestionCatalog, ScoringEngine};

pub(super) fn engine() -> Arc<ScoringEngine> {
    Arc::new(ScoringEngine::new(Arc::new(QuestionCatalog::standard())))
}

/// Service over a JSON store in a fresh temp dir. Keep the `TempDir` alive.
pub(super) fn file_service() -> (LeadService<JsonFileLeadStore>, Arc<JsonFileLeadStore>, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(JsonFileLeadStore::new(dir.path()));
    let service = LeadService::new(store.clone(), engine());
    (service, store, dir)
}

pub(super) fn submission(persona: &str) -> SubmissionRecord {
    SubmissionRecord {
        stage: Some("student,career_switcher".to_string()),
        main_goal: Some("find_job".to_string()),
        persona: Some(persona.to_string()),
        persona_score: Some(4),
        event_frequency: Some("monthly".to_string()),
        improvement_goal: Some("starting_conversations".to_string()),
        open_text: Some(String::new()),
        interest_level: Some("want_this".to_string()),
        email: Some("sam@example.com".to_string()),
        ..SubmissionRecord::default()
    }
}

pub(super) fn interest(persona: &str, level: &str) -> InterestRecord {
    InterestRecord {
        interest_level: Some(level.to_string()),
        persona: Some(persona.to_string()),
        ..InterestRecord::default()
    }
}

pub(super) fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Repository whose every call fails, for exercising 500 paths.
pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn append_submission(&self, _record: &SubmissionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn submissions(&self) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn append_interest(&self, _record: &InterestRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn interest(&self) -> Result<Vec<InterestRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn upsert_session(
        &self,
        _session_id: &str,
        _update: &QuizProgressUpdate,
        _now: DateTime<Utc>,
    ) -> Result<SessionWrite, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn sessions(&self) -> Result<Vec<QuizSessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }
}
