use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::domain::{
    format_timestamp, InterestRecord, LeadSnapshot, QuizProgressUpdate, QuizSessionRecord,
    RawLeadFiles, SessionWrite, SubmissionRecord,
};

pub const SUBMISSIONS_FILE: &str = "submissions.json";
pub const INTEREST_FILE: &str = "interest.json";
pub const QUIZ_SESSIONS_FILE: &str = "quiz_sessions.json";

/// Storage abstraction for captured leads so the service can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    fn append_submission(&self, record: &SubmissionRecord) -> Result<(), RepositoryError>;
    fn submissions(&self) -> Result<Vec<SubmissionRecord>, RepositoryError>;
    fn append_interest(&self, record: &InterestRecord) -> Result<(), RepositoryError>;
    fn interest(&self) -> Result<Vec<InterestRecord>, RepositoryError>;
    fn upsert_session(
        &self,
        session_id: &str,
        update: &QuizProgressUpdate,
        now: DateTime<Utc>,
    ) -> Result<SessionWrite, RepositoryError>;
    fn sessions(&self) -> Result<Vec<QuizSessionRecord>, RepositoryError>;

    fn snapshot(&self) -> Result<LeadSnapshot, RepositoryError> {
        Ok(LeadSnapshot {
            submissions: self.submissions()?,
            interest: self.interest()?,
            sessions: self.sessions()?,
        })
    }

    /// Stored entries without decoding. Stores that only hold typed records
    /// can rely on the default, which re-encodes the snapshot.
    fn raw_files(&self) -> Result<RawLeadFiles, RepositoryError> {
        Ok(RawLeadFiles::from_snapshot(&self.snapshot()?)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode lead record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("lead store lock poisoned")]
    Poisoned,
    #[error("lead store unavailable: {0}")]
    Unavailable(String),
}

/// Lead store backed by three pretty-printed JSON arrays in one directory.
///
/// A missing or unparseable file is rewritten as `[]` and read as empty.
/// Entries that no longer match the record shape are skipped on read but
/// preserved on disk.
#[derive(Debug)]
pub struct JsonFileLeadStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileLeadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_array(&self, file: &str) -> Result<Vec<Value>, RepositoryError> {
        let path = self.path(file);
        let parsed = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok());

        match parsed {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => {
                warn!(file, "lead file is not a JSON array; treating as empty");
                Ok(Vec::new())
            }
            None => {
                self.write_array(file, &[])?;
                Ok(Vec::new())
            }
        }
    }

    fn write_array(&self, file: &str, items: &[Value]) -> Result<(), RepositoryError> {
        fs::create_dir_all(&self.dir).map_err(|source| RepositoryError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path(file);
        let body = serde_json::to_string_pretty(items)?;
        fs::write(&path, body).map_err(|source| RepositoryError::Io { path, source })
    }

    fn append(&self, file: &str, record: Value) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().map_err(|_| RepositoryError::Poisoned)?;
        let mut items = self.read_array(file)?;
        items.push(record);
        self.write_array(file, &items)
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, RepositoryError> {
        let _guard = self.lock.lock().map_err(|_| RepositoryError::Poisoned)?;
        let items = self.read_array(file)?;
        Ok(decode_records(file, items))
    }
}

fn decode_records<T: DeserializeOwned>(file: &str, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(file, index, %error, "skipping malformed lead record");
                None
            }
        })
        .collect()
}

impl LeadRepository for JsonFileLeadStore {
    fn append_submission(&self, record: &SubmissionRecord) -> Result<(), RepositoryError> {
        self.append(SUBMISSIONS_FILE, serde_json::to_value(record)?)
    }

    fn submissions(&self) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        self.load(SUBMISSIONS_FILE)
    }

    fn append_interest(&self, record: &InterestRecord) -> Result<(), RepositoryError> {
        self.append(INTEREST_FILE, serde_json::to_value(record)?)
    }

    fn interest(&self) -> Result<Vec<InterestRecord>, RepositoryError> {
        self.load(INTEREST_FILE)
    }

    fn upsert_session(
        &self,
        session_id: &str,
        update: &QuizProgressUpdate,
        now: DateTime<Utc>,
    ) -> Result<SessionWrite, RepositoryError> {
        let update = update.clone().without_reserved_keys();
        let _guard = self.lock.lock().map_err(|_| RepositoryError::Poisoned)?;
        let mut sessions = self.read_array(QUIZ_SESSIONS_FILE)?;

        let existing = sessions.iter_mut().find_map(|entry| match entry {
            Value::Object(fields)
                if fields.get("sessionId").and_then(Value::as_str) == Some(session_id) =>
            {
                Some(fields)
            }
            _ => None,
        });

        let outcome = match existing {
            Some(fields) => {
                if let Value::Object(changes) = serde_json::to_value(&update)? {
                    fields.extend(changes);
                }
                fields.insert(
                    "updated_at".to_string(),
                    Value::String(format_timestamp(now)),
                );
                SessionWrite::Updated
            }
            None => {
                let record = QuizSessionRecord::start(session_id, update, now);
                sessions.push(serde_json::to_value(record)?);
                SessionWrite::Created
            }
        };

        self.write_array(QUIZ_SESSIONS_FILE, &sessions)?;
        Ok(outcome)
    }

    fn sessions(&self) -> Result<Vec<QuizSessionRecord>, RepositoryError> {
        self.load(QUIZ_SESSIONS_FILE)
    }

    fn raw_files(&self) -> Result<RawLeadFiles, RepositoryError> {
        let _guard = self.lock.lock().map_err(|_| RepositoryError::Poisoned)?;
        Ok(RawLeadFiles {
            interest: self.read_array(INTEREST_FILE)?,
            sessions: self.read_array(QUIZ_SESSIONS_FILE)?,
            submissions: self.read_array(SUBMISSIONS_FILE)?,
        })
    }
}
