use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::domain::{
    format_timestamp, InterestRecord, LeadSnapshot, QuizProgressUpdate, RawLeadFiles,
    SessionWrite, SubmissionRecord,
};
use super::repository::{LeadRepository, RepositoryError};
use crate::quiz::{AnswerSet, QuestionCatalog, QuizResult, ResultPresentation, ScoringEngine};

/// Service composing the lead repository with the quiz scoring engine.
pub struct LeadService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

/// Scored answers plus the copy the result screen renders.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredQuiz {
    pub result: QuizResult,
    pub presentation: ResultPresentation,
}

impl<R> LeadService<R>
where
    R: LeadRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<ScoringEngine>) -> Self {
        Self { repository, engine }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        self.engine.catalog()
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn score(&self, answers: &AnswerSet) -> ScoredQuiz {
        let result = self.engine.score(answers);
        let presentation = ResultPresentation::from_result(&result);
        ScoredQuiz {
            result,
            presentation,
        }
    }

    /// Store the email-gate submission, stamping `created_at` when absent.
    pub fn submit(
        &self,
        mut record: SubmissionRecord,
    ) -> Result<SubmissionRecord, LeadServiceError> {
        stamp_if_blank(&mut record.created_at, Utc::now());
        self.repository.append_submission(&record)?;
        info!(
            persona = record.persona.as_deref().unwrap_or("unknown"),
            interest = record.interest_level.as_deref().unwrap_or("unknown"),
            "lead submission stored"
        );
        Ok(record)
    }

    pub fn register_interest(
        &self,
        mut record: InterestRecord,
    ) -> Result<InterestRecord, LeadServiceError> {
        stamp_if_blank(&mut record.created_at, Utc::now());
        self.repository.append_interest(&record)?;
        info!(
            persona = record.persona.as_deref().unwrap_or("unknown"),
            interest = record.interest_level.as_deref().unwrap_or("unknown"),
            "interest recorded"
        );
        Ok(record)
    }

    /// Merge a partial update into the session. A completed session that
    /// arrives with answers but no persona gets its persona scored here.
    pub fn save_progress(
        &self,
        session_id: &str,
        mut update: QuizProgressUpdate,
    ) -> Result<SessionWrite, LeadServiceError> {
        let session_id = session_id.trim();
        if session_id.is_empty() {
            return Err(LeadServiceError::MissingSessionId);
        }

        if update.completed == Some(true) && update.persona.is_none() {
            if let Some(answers) = update.answers.as_ref().filter(|answers| !answers.is_empty()) {
                let persona = self.engine.score(answers).dominant_persona;
                update.persona = Some(persona.key().to_string());
            }
        }

        let write = self
            .repository
            .upsert_session(session_id, &update, Utc::now())?;
        info!(
            session_id,
            created = matches!(write, SessionWrite::Created),
            completed = update.completed.unwrap_or(false),
            "quiz session saved"
        );
        Ok(write)
    }

    pub fn snapshot(&self) -> Result<LeadSnapshot, LeadServiceError> {
        Ok(self.repository.snapshot()?)
    }

    pub fn raw_files(&self) -> Result<RawLeadFiles, LeadServiceError> {
        Ok(self.repository.raw_files()?)
    }
}

fn stamp_if_blank(slot: &mut Option<String>, now: DateTime<Utc>) {
    if slot.as_deref().map_or(true, |value| value.trim().is_empty()) {
        *slot = Some(format_timestamp(now));
    }
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error("sessionId required")]
    MissingSessionId,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
