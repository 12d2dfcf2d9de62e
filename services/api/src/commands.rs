use crate::infra::{lead_service, load_catalog};
use clap::Args;
use networking_lab::admin::{AdminService, ExportFile, ExportFormat, ExportKind};
use networking_lab::companion::{
    build_personalised_cards, Category, Difficulty, PromptCard, Preferences, Reason, SessionPlan,
};
use networking_lab::config::{AppConfig, QuizConfig};
use networking_lab::leads::ScoredQuiz;
use networking_lab::quiz::{AnswerSet, QuestionCatalog, ResultPresentation, ScoringEngine};
use networking_lab::AppError;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file with answers, either `{"answers": {...}}` or a bare map
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Score against this catalog instead of the built-in quiz
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Print this catalog file (validated) instead of the built-in quiz
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PreferenceArgs {
    #[arg(long)]
    pub(crate) category: Option<Category>,
    #[arg(long)]
    pub(crate) reason: Option<Reason>,
    #[arg(long)]
    pub(crate) difficulty: Option<Difficulty>,
}

impl PreferenceArgs {
    fn preferences(&self) -> Preferences {
        Preferences {
            category: self.category,
            reason: self.reason,
            difficulty: self.difficulty,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct CompanionPlanArgs {
    #[command(flatten)]
    pub(crate) preferences: PreferenceArgs,
    /// Completed-session count used to rotate reframes and prompts
    #[arg(long, default_value_t = 0)]
    pub(crate) rotation: usize,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// interest, sessions, submissions, combined, personas or questions
    #[arg(long = "type")]
    pub(crate) kind: ExportKind,
    #[arg(long, default_value = "json")]
    pub(crate) format: ExportFormat,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
    /// Lead data directory (defaults to DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswersFile {
    Wrapped { answers: AnswerSet },
    Bare(AnswerSet),
}

impl AnswersFile {
    fn into_answers(self) -> AnswerSet {
        match self {
            AnswersFile::Wrapped { answers } | AnswersFile::Bare(answers) => answers,
        }
    }
}

pub(crate) fn run_quiz_score(args: ScoreArgs) -> Result<(), AppError> {
    let catalog = catalog_from(args.catalog)?;
    let answers = read_answers(&args.answers)?;
    print_json(&score_answers(catalog, &answers))
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    print_json(&catalog_from(args.catalog)?)
}

pub(crate) fn run_companion_cards(args: PreferenceArgs) -> Result<(), AppError> {
    print_json(&CardsOutput {
        cards: build_personalised_cards(&args.preferences()),
    })
}

pub(crate) fn run_companion_plan(args: CompanionPlanArgs) -> Result<(), AppError> {
    let plan = SessionPlan::for_preferences(&args.preferences.preferences(), args.rotation);
    print_json(&plan)
}

pub(crate) fn run_leads_export(args: ExportArgs) -> Result<(), AppError> {
    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => AppConfig::load()?.storage.data_dir,
    };
    let file = export_leads(&data_dir, args.kind, args.format)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, &file.body)?;
            println!("wrote {} ({} bytes)", path.display(), file.body.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&file.body)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct CardsOutput {
    cards: Vec<PromptCard>,
}

fn catalog_from(path: Option<PathBuf>) -> Result<QuestionCatalog, AppError> {
    let config = QuizConfig { catalog_path: path };
    Ok(load_catalog(&config)?)
}

fn read_answers(path: &Path) -> Result<AnswerSet, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let file: AnswersFile = serde_json::from_str(&raw)?;
    Ok(file.into_answers())
}

fn score_answers(catalog: QuestionCatalog, answers: &AnswerSet) -> ScoredQuiz {
    let engine = ScoringEngine::new(Arc::new(catalog));
    let result = engine.score(answers);
    let presentation = ResultPresentation::from_result(&result);
    ScoredQuiz {
        result,
        presentation,
    }
}

/// Render an export from the lead files under `data_dir`, scored against the
/// built-in catalog.
fn export_leads(
    data_dir: &Path,
    kind: ExportKind,
    format: ExportFormat,
) -> Result<ExportFile, AppError> {
    let service = AdminService::new(
        Arc::new(lead_service(data_dir, QuestionCatalog::standard())),
        None,
        None,
    );
    Ok(service.export(kind, format)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use networking_lab::leads::{LeadRepository, SubmissionRecord};
    use networking_lab::quiz::PersonaKey;
    use tempfile::tempdir;

    #[test]
    fn answers_file_accepts_wrapped_and_bare_maps() {
        let dir = tempdir().expect("temp dir");
        let wrapped = dir.path().join("wrapped.json");
        let bare = dir.path().join("bare.json");
        std::fs::write(&wrapped, r#"{"answers": {"q1": ["a"]}}"#).expect("write");
        std::fs::write(&bare, r#"{"q1": ["a"]}"#).expect("write");

        let from_wrapped = read_answers(&wrapped).expect("wrapped parses");
        let from_bare = read_answers(&bare).expect("bare parses");

        assert_eq!(from_wrapped, from_bare);
        assert_eq!(from_bare.selected("q1"), ["a".to_string()]);
    }

    #[test]
    fn malformed_answers_file_is_a_json_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("answers.json");
        std::fs::write(&path, "not json").expect("write");

        let err = read_answers(&path).expect_err("malformed");
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn empty_answers_score_against_the_built_in_catalog() {
        let scored = score_answers(QuestionCatalog::standard(), &AnswerSet::new());

        assert_eq!(scored.result.dominant_persona, PersonaKey::Overthinker);
        assert!(!scored.result.is_optimizer);
    }

    #[test]
    fn missing_catalog_override_is_reported() {
        let dir = tempdir().expect("temp dir");
        let err = catalog_from(Some(dir.path().join("absent.json"))).expect_err("missing file");

        assert!(matches!(err, AppError::Catalog(_)));
    }

    #[test]
    fn export_reads_lead_files_from_the_data_dir() {
        let dir = tempdir().expect("temp dir");
        let store = networking_lab::leads::JsonFileLeadStore::new(dir.path());
        let record: SubmissionRecord = serde_json::from_value(serde_json::json!({
            "email": "ada@example.com",
            "persona": "overthinker",
            "created_at": "2025-03-10T09:00:00.000Z"
        }))
        .expect("record");
        store.append_submission(&record).expect("stored");

        let file = export_leads(dir.path(), ExportKind::Submissions, ExportFormat::Csv)
            .expect("export renders");
        let body = String::from_utf8(file.body).expect("utf8");

        assert_eq!(file.filename, "submissions.csv");
        assert!(body.contains("ada@example.com"));
    }

    #[test]
    fn unsupported_export_format_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let err = export_leads(dir.path(), ExportKind::Combined, ExportFormat::Csv)
            .expect_err("combined is json only");

        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
