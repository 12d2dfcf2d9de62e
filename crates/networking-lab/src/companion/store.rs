use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::contacts::{Contact, ContactBook};
use super::preferences::Preferences;
use super::session::{SessionOutcome, SessionRecord};

pub const COMPANION_FILE: &str = "companion.json";

/// Saved self-introductions, one per length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intros {
    pub short: String,
    pub elevator: String,
    pub technical: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IntrosUpdate {
    pub short: Option<String>,
    pub elevator: Option<String>,
    pub technical: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionHistory {
    pub count: u32,
    pub last_completed: Option<DateTime<Utc>>,
    /// Newest first.
    pub history: Vec<SessionRecord>,
}

/// Everything the companion app keeps between launches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionState {
    pub contacts: ContactBook,
    pub intros: Intros,
    pub sessions: SessionHistory,
    pub preferences: Preferences,
}

impl CompanionState {
    pub fn has_completed_setup(&self) -> bool {
        self.preferences.is_complete()
    }

    pub fn set_preferences(&mut self, update: Preferences) {
        self.preferences.merge(update);
    }

    pub fn reset_preferences(&mut self) {
        self.preferences = Preferences::default();
    }

    pub fn save_intros(&mut self, update: IntrosUpdate) {
        if let Some(short) = update.short {
            self.intros.short = short;
        }
        if let Some(elevator) = update.elevator {
            self.intros.elevator = elevator;
        }
        if let Some(technical) = update.technical {
            self.intros.technical = technical;
        }
    }

    /// Rotation index for the next session plan.
    pub fn next_rotation(&self) -> usize {
        self.sessions.count as usize
    }

    /// Record a finished session, saving the met contact when it has a name.
    /// Returns the saved contact, if any.
    pub fn complete_session(
        &mut self,
        outcome: SessionOutcome,
        now: DateTime<Utc>,
    ) -> Option<Contact> {
        let saved = outcome
            .contact_to_save()
            .and_then(|draft| self.contacts.add(draft, now).ok().cloned());

        let record = outcome.into_record(now);
        self.sessions.count += 1;
        self.sessions.last_completed = Some(now);
        self.sessions.history.insert(0, record);
        saved
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompanionStoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode companion state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Single JSON document holding the companion state.
#[derive(Debug, Clone)]
pub struct CompanionStore {
    path: PathBuf,
}

impl CompanionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(COMPANION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file yields the default state.
    pub fn load(&self) -> CompanionState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return CompanionState::default(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read companion state");
                return CompanionState::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring corrupt companion state");
                CompanionState::default()
            }
        }
    }

    pub fn save(&self, state: &CompanionState) -> Result<(), CompanionStoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CompanionStoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let encoded = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, encoded).map_err(|source| CompanionStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(
            path = %self.path.display(),
            contacts = state.contacts.len(),
            sessions = state.sessions.count,
            "companion state saved"
        );
        Ok(())
    }
}
