use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::quiz::{AnswerSet, PersonaKey};

/// Formats a timestamp the way the lead files store them
/// (`2025-01-31T09:15:00.000Z`).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Lenient RFC 3339 parse; records written by older clients may carry junk.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// Final email-gate submission. Multi-select answers arrive comma-joined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement_goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SubmissionRecord {
    pub fn persona_key(&self) -> Option<PersonaKey> {
        self.persona.as_deref().and_then(PersonaKey::from_key)
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// Interest-level vote from the validation modal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_reasons: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_other: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl InterestRecord {
    pub fn persona_key(&self) -> Option<PersonaKey> {
        self.persona.as_deref().and_then(PersonaKey::from_key)
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// In-progress or completed quiz run, keyed by the client's session id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSessionRecord {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub started_at: String,
    pub updated_at: String,
    pub answers: AnswerSet,
    pub current_step: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_reasons: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_other: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    pub completed: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl QuizSessionRecord {
    /// Fresh record for a session id seen for the first time.
    pub fn start(session_id: &str, update: QuizProgressUpdate, now: DateTime<Utc>) -> Self {
        let update = update.without_reserved_keys();
        let stamp = format_timestamp(now);
        Self {
            session_id: session_id.to_string(),
            started_at: stamp.clone(),
            updated_at: stamp,
            answers: update.answers.unwrap_or_default(),
            current_step: update.current_step.unwrap_or(0),
            interest_level: update.interest_level,
            feedback_reasons: update.feedback_reasons,
            feedback_other: update.feedback_other,
            email: update.email,
            consent: update.consent,
            persona: update.persona,
            completed: update.completed.unwrap_or(false),
            extra: update.extra,
        }
    }

    pub fn persona_key(&self) -> Option<PersonaKey> {
        self.persona.as_deref().and_then(PersonaKey::from_key)
    }

    pub fn started_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.started_at)
    }
}

/// Partial session update; only the fields present are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizProgressUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<AnswerSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_reasons: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_other: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Session keys owned by the store. Client copies arriving through `extra`
/// are dropped so they cannot shadow the typed fields.
const RESERVED_SESSION_KEYS: [&str; 3] = ["sessionId", "started_at", "updated_at"];

impl QuizProgressUpdate {
    pub fn without_reserved_keys(mut self) -> Self {
        self.extra
            .retain(|key, _| !RESERVED_SESSION_KEYS.contains(&key.as_str()));
        self
    }
}

/// Whether an upsert touched an existing session or created one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionWrite {
    Created,
    Updated,
}

/// Everything the admin dashboard and exports read in one go.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeadSnapshot {
    pub submissions: Vec<SubmissionRecord>,
    pub interest: Vec<InterestRecord>,
    #[serde(rename = "quiz_sessions")]
    pub sessions: Vec<QuizSessionRecord>,
}

/// Lead files exactly as stored, entries that no longer decode included.
/// Field order is the combined export's key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawLeadFiles {
    pub interest: Vec<Value>,
    #[serde(rename = "quiz_sessions")]
    pub sessions: Vec<Value>,
    pub submissions: Vec<Value>,
}

impl RawLeadFiles {
    pub fn from_snapshot(snapshot: &LeadSnapshot) -> Result<Self, serde_json::Error> {
        Ok(Self {
            interest: to_values(&snapshot.interest)?,
            sessions: to_values(&snapshot.sessions)?,
            submissions: to_values(&snapshot.submissions)?,
        })
    }
}

fn to_values<T: Serialize>(records: &[T]) -> Result<Vec<Value>, serde_json::Error> {
    records.iter().map(serde_json::to_value).collect()
}
