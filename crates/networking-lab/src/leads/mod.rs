//! Lead capture for the quiz funnel: submissions, interest votes, and
//! resumable quiz sessions persisted as JSON files.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    format_timestamp, parse_timestamp, InterestRecord, LeadSnapshot, QuizProgressUpdate,
    QuizSessionRecord, RawLeadFiles, SessionWrite, SubmissionRecord,
};
pub use repository::{
    JsonFileLeadStore, LeadRepository, RepositoryError, INTEREST_FILE, QUIZ_SESSIONS_FILE,
    SUBMISSIONS_FILE,
};
pub use router::lead_router;
pub use service::{LeadService, LeadServiceError, ScoredQuiz};
