use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("contact name required")]
    MissingName,
    #[error("contact '{0}' not found")]
    NotFound(String),
}

/// Someone the user met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, rename = "where")]
    pub met_at: String,
    #[serde(default)]
    pub notes: String,
    /// `YYYY-MM-DD`, or empty when no reminder is set.
    #[serde(default)]
    pub follow_up_date: String,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    pub fn follow_up_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.follow_up_date.trim(), "%Y-%m-%d").ok()
    }

    pub fn follow_up_due(&self, today: NaiveDate) -> bool {
        self.follow_up_on().is_some_and(|date| date <= today)
    }

    /// "role at company", whichever parts are present.
    pub fn headline(&self) -> String {
        [self.role.trim(), self.company.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" at ")
    }
}

/// Contact fields as entered, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub role: String,
    pub company: String,
    #[serde(rename = "where")]
    pub met_at: String,
    pub notes: String,
    pub follow_up_date: String,
}

impl ContactDraft {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn trimmed(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            company: self.company.trim().to_string(),
            met_at: self.met_at.trim().to_string(),
            notes: self.notes.trim().to_string(),
            follow_up_date: self.follow_up_date.trim().to_string(),
        }
    }
}

/// Partial edit; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    #[serde(rename = "where")]
    pub met_at: Option<String>,
    pub notes: Option<String>,
    pub follow_up_date: Option<String>,
}

/// Contacts, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactBook(Vec<Contact>);

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.0.iter()
    }

    pub fn find(&self, id: &str) -> Option<&Contact> {
        self.0.iter().find(|contact| contact.id == id)
    }

    /// Ids are creation times in epoch millis, bumped until unique.
    pub fn add(&mut self, draft: ContactDraft, now: DateTime<Utc>) -> Result<&Contact, ContactError> {
        let draft = draft.trimmed();
        if draft.name.is_empty() {
            return Err(ContactError::MissingName);
        }

        let mut millis = now.timestamp_millis();
        while self.find(&millis.to_string()).is_some() {
            millis += 1;
        }

        let contact = Contact {
            id: millis.to_string(),
            name: draft.name,
            role: draft.role,
            company: draft.company,
            met_at: draft.met_at,
            notes: draft.notes,
            follow_up_date: draft.follow_up_date,
            created_at: now,
        };
        self.0.insert(0, contact);
        Ok(&self.0[0])
    }

    pub fn update(&mut self, id: &str, update: ContactUpdate) -> Result<&Contact, ContactError> {
        if update
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ContactError::MissingName);
        }

        let contact = self
            .0
            .iter_mut()
            .find(|contact| contact.id == id)
            .ok_or_else(|| ContactError::NotFound(id.to_string()))?;

        let apply = |field: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *field = value.trim().to_string();
            }
        };
        apply(&mut contact.name, update.name);
        apply(&mut contact.role, update.role);
        apply(&mut contact.company, update.company);
        apply(&mut contact.met_at, update.met_at);
        apply(&mut contact.notes, update.notes);
        apply(&mut contact.follow_up_date, update.follow_up_date);

        Ok(&*contact)
    }

    pub fn delete(&mut self, id: &str) -> Result<Contact, ContactError> {
        let index = self
            .0
            .iter()
            .position(|contact| contact.id == id)
            .ok_or_else(|| ContactError::NotFound(id.to_string()))?;
        Ok(self.0.remove(index))
    }

    pub fn due_for_follow_up(&self, today: NaiveDate) -> Vec<&Contact> {
        self.0
            .iter()
            .filter(|contact| contact.follow_up_due(today))
            .collect()
    }
}
