use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tempfile::TempDir;

use crate::admin::service::AdminService;
use crate::admin::session::{AdminCredentials, AdminSessionSigner};
use crate::leads::{
    InterestRecord, JsonFileLeadStore, LeadService, LeadSnapshot, QuizSessionRecord,
    RawLeadFiles, SubmissionRecord,
};
use crate::quiz::{AnswerSet, QuestionCatalog, ScoringEngine};

pub(super) const SECRET: &str = "0123456789abcdef-test-secret";
pub(super) const USERNAME: &str = "admin";
pub(super) const PASSWORD: &str = "correct horse";

pub(super) fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub(super) fn signer() -> AdminSessionSigner {
    AdminSessionSigner::new(SECRET, false).expect("secret long enough")
}

pub(super) fn submission(persona: &str, created_at: &str) -> SubmissionRecord {
    SubmissionRecord {
        stage: Some("student, career_switcher".to_string()),
        persona: Some(persona.to_string()),
        persona_score: Some(3),
        event_frequency: Some("monthly".to_string()),
        improvement_goal: Some("following_up,staying_consistent".to_string()),
        interest_level: Some("want_this".to_string()),
        email: Some(format!("{persona}@example.com")),
        created_at: Some(created_at.to_string()),
        ..SubmissionRecord::default()
    }
}

pub(super) fn interest(persona: &str, level: &str, created_at: &str) -> InterestRecord {
    InterestRecord {
        interest_level: Some(level.to_string()),
        persona: Some(persona.to_string()),
        created_at: Some(created_at.to_string()),
        ..InterestRecord::default()
    }
}

pub(super) fn session(id: &str, started_at: &str, step: u32, completed: bool) -> QuizSessionRecord {
    QuizSessionRecord {
        session_id: id.to_string(),
        started_at: started_at.to_string(),
        updated_at: started_at.to_string(),
        answers: AnswerSet::new()
            .with("stage", ["graduate"])
            .with("event_frequency", ["weekly", "monthly"])
            .with("improvement_goal", ["following_up"]),
        current_step: step,
        completed,
        ..QuizSessionRecord::default()
    }
}

/// Two submissions, three interest votes, and three sessions spread over
/// early March 2025.
pub(super) fn snapshot() -> LeadSnapshot {
    let mut completed = session("s-2", "2025-03-10T09:00:00.000Z", 9, true);
    completed.persona = Some("connectorDisappears".to_string());
    completed.interest_level = Some("curious".to_string());
    completed.updated_at = "2025-03-10T09:30:00.000Z".to_string();

    LeadSnapshot {
        submissions: vec![
            submission("connectorDisappears", "2025-03-10T09:31:00.000Z"),
            submission("overthinker", "2025-03-01T12:00:00.000Z"),
        ],
        interest: vec![
            interest("connectorDisappears", "want_this", "2025-03-10T09:29:00.000Z"),
            interest("overthinker", "curious", "2025-03-01T11:59:00.000Z"),
            interest("overthinker", "not_interested", "2025-02-01T08:00:00.000Z"),
        ],
        sessions: vec![
            session("s-1", "2025-03-10T08:00:00.000Z", 3, false),
            completed,
            session("s-3", "2025-02-01T07:00:00.000Z", 3, false),
        ],
    }
}

/// [`snapshot`] as the stored JSON the exports are rendered from.
pub(super) fn raw() -> RawLeadFiles {
    RawLeadFiles::from_snapshot(&snapshot()).expect("encodes")
}

pub(super) fn catalog() -> QuestionCatalog {
    QuestionCatalog::standard()
}

/// Admin service over a temp-dir JSON store. Keep the `TempDir` alive.
pub(super) fn admin_service(
    configured: bool,
) -> (AdminService<JsonFileLeadStore>, Arc<JsonFileLeadStore>, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(JsonFileLeadStore::new(dir.path()));
    let engine = Arc::new(ScoringEngine::new(Arc::new(catalog())));
    let leads = Arc::new(LeadService::new(store.clone(), engine));
    let service = if configured {
        AdminService::new(
            leads,
            Some(AdminCredentials::new(USERNAME, PASSWORD)),
            Some(signer()),
        )
    } else {
        AdminService::new(leads, None, None)
    };
    (service, store, dir)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
