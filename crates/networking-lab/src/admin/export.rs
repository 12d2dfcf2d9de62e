use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::leads::{LeadSnapshot, RawLeadFiles};
use crate::quiz::{PersonaKey, PersonaProfile, QuestionCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Interest,
    Sessions,
    Submissions,
    Combined,
    Personas,
    Questions,
}

impl ExportKind {
    pub const ALL: [ExportKind; 6] = [
        ExportKind::Interest,
        ExportKind::Sessions,
        ExportKind::Submissions,
        ExportKind::Combined,
        ExportKind::Personas,
        ExportKind::Questions,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ExportKind::Interest => "interest",
            ExportKind::Sessions => "sessions",
            ExportKind::Submissions => "submissions",
            ExportKind::Combined => "combined",
            ExportKind::Personas => "personas",
            ExportKind::Questions => "questions",
        }
    }

    fn file_stem(&self) -> &'static str {
        match self {
            ExportKind::Interest => "interest",
            ExportKind::Sessions => "quiz_sessions",
            ExportKind::Submissions => "submissions",
            ExportKind::Combined => "export_combined",
            ExportKind::Personas => "personas",
            ExportKind::Questions => "questions",
        }
    }

    pub fn filename(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.file_stem(), format.extension())
    }

    /// Whether rendering reads the lead files.
    pub fn needs_leads(&self) -> bool {
        matches!(
            self,
            ExportKind::Interest
                | ExportKind::Sessions
                | ExportKind::Submissions
                | ExportKind::Combined
        )
    }

    pub fn supports(&self, format: ExportFormat) -> bool {
        match format {
            ExportFormat::Json => true,
            ExportFormat::Csv => !matches!(self, ExportKind::Combined | ExportKind::Questions),
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExportKind {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == value.trim())
            .ok_or(ExportError::UnknownKind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid or missing type. Use: interest, sessions, submissions, combined, personas, questions")]
    UnknownKind,
    #[error("unknown export format '{0}'; use json or csv")]
    UnknownFormat(String),
    #[error("{kind} export is not available as {format}")]
    Unsupported {
        kind: ExportKind,
        format: &'static str,
    },
    #[error("failed to encode export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write csv export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv export: {0}")]
    Io(#[from] std::io::Error),
}

/// Rendered download: body plus the headers the HTTP layer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ExportFile {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Render an export. JSON lead exports are built from `raw` so entries that
/// no longer decode still reach the download; CSV rows come from `snapshot`.
/// Neither is read for kinds where [`ExportKind::needs_leads`] is false.
pub fn render_export(
    kind: ExportKind,
    format: ExportFormat,
    snapshot: &LeadSnapshot,
    raw: &RawLeadFiles,
    catalog: &QuestionCatalog,
) -> Result<ExportFile, ExportError> {
    if !kind.supports(format) {
        return Err(ExportError::Unsupported {
            kind,
            format: format.extension(),
        });
    }

    let body = match format {
        ExportFormat::Json => render_json(kind, raw, catalog)?,
        ExportFormat::Csv => render_csv(kind, snapshot)?,
    };

    Ok(ExportFile {
        filename: kind.filename(format),
        content_type: format.content_type(),
        body,
    })
}

fn render_json(
    kind: ExportKind,
    raw: &RawLeadFiles,
    catalog: &QuestionCatalog,
) -> Result<Vec<u8>, ExportError> {
    let body = match kind {
        ExportKind::Interest => serde_json::to_vec_pretty(&raw.interest)?,
        ExportKind::Sessions => serde_json::to_vec_pretty(&raw.sessions)?,
        ExportKind::Submissions => serde_json::to_vec_pretty(&raw.submissions)?,
        ExportKind::Combined => serde_json::to_vec_pretty(raw)?,
        ExportKind::Personas => {
            let personas: BTreeMap<PersonaKey, &PersonaProfile> = PersonaProfile::all().collect();
            serde_json::to_vec_pretty(&personas)?
        }
        ExportKind::Questions => serde_json::to_vec_pretty(catalog.questions())?,
    };
    Ok(body)
}

fn joined(values: Option<&Vec<String>>) -> String {
    values.map(|values| values.join("; ")).unwrap_or_default()
}

fn text(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

fn render_csv(kind: ExportKind, snapshot: &LeadSnapshot) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    match kind {
        ExportKind::Submissions => {
            writer.write_record([
                "created_at",
                "email",
                "persona",
                "persona_score",
                "stage",
                "main_goal",
                "event_frequency",
                "improvement_goal",
                "interest_level",
                "open_text",
            ])?;
            for record in &snapshot.submissions {
                let score = record
                    .persona_score
                    .map(|score| score.to_string())
                    .unwrap_or_default();
                writer.write_record([
                    text(record.created_at.as_deref()),
                    text(record.email.as_deref()),
                    text(record.persona.as_deref()),
                    score.as_str(),
                    text(record.stage.as_deref()),
                    text(record.main_goal.as_deref()),
                    text(record.event_frequency.as_deref()),
                    text(record.improvement_goal.as_deref()),
                    text(record.interest_level.as_deref()),
                    text(record.open_text.as_deref()),
                ])?;
            }
        }
        ExportKind::Interest => {
            writer.write_record([
                "created_at",
                "interest_level",
                "persona",
                "feedback_reasons",
                "feedback_other",
            ])?;
            for record in &snapshot.interest {
                let reasons = joined(record.feedback_reasons.as_ref());
                writer.write_record([
                    text(record.created_at.as_deref()),
                    text(record.interest_level.as_deref()),
                    text(record.persona.as_deref()),
                    reasons.as_str(),
                    text(record.feedback_other.as_deref()),
                ])?;
            }
        }
        ExportKind::Sessions => {
            writer.write_record([
                "sessionId",
                "started_at",
                "updated_at",
                "current_step",
                "completed",
                "persona",
                "interest_level",
                "email",
                "consent",
                "feedback_reasons",
                "feedback_other",
                "answers",
            ])?;
            for record in &snapshot.sessions {
                let step = record.current_step.to_string();
                let completed = record.completed.to_string();
                let consent = record
                    .consent
                    .map(|consent| consent.to_string())
                    .unwrap_or_default();
                let reasons = joined(record.feedback_reasons.as_ref());
                let answers = serde_json::to_string(&record.answers)?;
                writer.write_record([
                    record.session_id.as_str(),
                    record.started_at.as_str(),
                    record.updated_at.as_str(),
                    step.as_str(),
                    completed.as_str(),
                    text(record.persona.as_deref()),
                    text(record.interest_level.as_deref()),
                    text(record.email.as_deref()),
                    consent.as_str(),
                    reasons.as_str(),
                    text(record.feedback_other.as_deref()),
                    answers.as_str(),
                ])?;
            }
        }
        ExportKind::Personas => {
            writer.write_record([
                "key",
                "title",
                "tagline",
                "pattern",
                "risk",
                "solution",
                "image_path",
                "circle_color",
            ])?;
            for (key, profile) in PersonaProfile::all() {
                writer.write_record([
                    key.key(),
                    profile.title,
                    profile.tagline,
                    profile.pattern,
                    profile.risk,
                    profile.solution,
                    profile.image_path,
                    profile.circle_color.hex(),
                ])?;
            }
        }
        ExportKind::Combined | ExportKind::Questions => {
            return Err(ExportError::Unsupported {
                kind,
                format: ExportFormat::Csv.extension(),
            })
        }
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}
