use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{PersonaKey, Question, QuizOption, Trait};

/// Designated opt-in answer that flags a low-signal result as an "optimizer".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizerRule {
    pub question_id: String,
    pub option_id: String,
    /// Highest dominant-persona score that still counts as low signal.
    pub max_dominant_score: i32,
}

impl Default for OptimizerRule {
    fn default() -> Self {
        Self {
            question_id: "past_6_months".to_string(),
            option_id: "wants_optimize".to_string(),
            max_dominant_score: 3,
        }
    }
}

/// Ordered, validated question catalog. Question order drives tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    optimizer: OptimizerRule,
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Empty,
    DuplicateQuestion(String),
    DuplicateOption { question_id: String, option_id: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read question catalog: {}", err),
            CatalogError::Json(err) => write!(f, "invalid question catalog: {}", err),
            CatalogError::Empty => write!(f, "question catalog has no questions"),
            CatalogError::DuplicateQuestion(id) => {
                write!(f, "question id '{}' appears more than once", id)
            }
            CatalogError::DuplicateOption {
                question_id,
                option_id,
            } => write!(
                f,
                "option id '{}' appears more than once in question '{}'",
                option_id, question_id
            ),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Accepted on-disk shapes: a full document or a bare question list.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Document {
        questions: Vec<Question>,
        #[serde(default)]
        optimizer: OptimizerRule,
    },
    Questions(Vec<Question>),
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>, optimizer: OptimizerRule) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut question_ids = HashSet::new();
        for question in &questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(CatalogError::DuplicateQuestion(question.id.clone()));
            }

            let mut option_ids = HashSet::new();
            for option in &question.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(CatalogError::DuplicateOption {
                        question_id: question.id.clone(),
                        option_id: option.id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            questions,
            optimizer,
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        match serde_json::from_reader(reader)? {
            CatalogFile::Document {
                questions,
                optimizer,
            } => Self::new(questions, optimizer),
            CatalogFile::Questions(questions) => Self::new(questions, OptimizerRule::default()),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Self::from_reader(raw.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn optimizer(&self) -> &OptimizerRule {
        &self.optimizer
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    /// `(id, label)` pairs for a question's options, empty for unknown ids.
    pub fn option_labels(&self, question_id: &str) -> Vec<(String, String)> {
        self.question(question_id)
            .map(|question| {
                question
                    .options
                    .iter()
                    .map(|option| (option.id.clone(), option.label.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The seven-question networking persona quiz.
    pub fn standard() -> Self {
        use PersonaKey::*;
        use Trait::*;

        let mut stage = Question::new(
            "stage",
            "Where are you in your career right now?",
            true,
            vec![
                QuizOption::new("student", "Student").with_persona(IdentityExplorer, 1),
                QuizOption::new("graduate", "Recent graduate / early career")
                    .with_trait(Positioning, -1)
                    .with_persona(IdentityExplorer, 1),
                QuizOption::new("career_switcher", "Switching careers")
                    .with_trait(Positioning, -2)
                    .with_persona(IdentityExplorer, 3),
                QuizOption::new("professional", "Working professional").with_trait(Leverage, 1),
                QuizOption::new("entrepreneur", "Founder / freelancer")
                    .with_trait(Leverage, 1)
                    .with_trait(Positioning, 1),
                QuizOption::new("other", "Other"),
            ],
        );
        stage.auto_advance = false;

        let main_goal = Question::new(
            "main_goal",
            "What do you most want networking to do for you?",
            false,
            vec![
                QuizOption::new("find_job", "Land a job or internship").with_trait(Leverage, 1),
                QuizOption::new("grow_career", "Grow in my current career")
                    .with_trait(Leverage, 1)
                    .with_trait(Positioning, 1),
                QuizOption::new("find_mentor", "Find a mentor").with_trait(FollowUp, 1),
                QuizOption::new("build_confidence", "Feel more confident in the room")
                    .with_trait(Confidence, -1)
                    .with_persona(Overthinker, 1),
                QuizOption::new("find_clients", "Win clients or partners").with_trait(Leverage, 2),
            ],
        );

        let event_frequency = Question::new(
            "event_frequency",
            "How often do you go to networking events?",
            false,
            vec![
                QuizOption::new("never", "Never, or almost never")
                    .with_trait(Confidence, -2)
                    .with_persona(SilentObserver, 1),
                QuizOption::new("rarely", "A couple of times a year")
                    .with_persona(InconsistentSprinter, 1),
                QuizOption::new("monthly", "About once a month").with_trait(Conversation, 1),
                QuizOption::new("weekly", "Most weeks")
                    .with_trait(Confidence, 2)
                    .with_trait(Conversation, 1),
                QuizOption::new("bursts", "In bursts, then nothing for months")
                    .with_trait(FollowUp, -1)
                    .with_persona(InconsistentSprinter, 3),
            ],
        );

        let before_event = Question::new(
            "before_event",
            "How do you feel in the hour before an event?",
            false,
            vec![
                QuizOption::new("rehearse", "I rehearse what I will say, again and again")
                    .with_trait(Confidence, -2)
                    .with_persona(Overthinker, 3),
                QuizOption::new("dread", "I quietly hope I can slip in and out")
                    .with_trait(Confidence, -3)
                    .with_persona(SilentObserver, 2),
                QuizOption::new("unsure_pitch", "Worried about explaining what I do")
                    .with_trait(Positioning, -2)
                    .with_persona(IdentityExplorer, 2),
                QuizOption::new("neutral", "Fine, it is just another event")
                    .with_trait(Confidence, 1),
                QuizOption::new("excited", "Energised, I like meeting people")
                    .with_trait(Confidence, 2)
                    .with_trait(Conversation, 1),
            ],
        );

        let at_event = Question::new(
            "at_event",
            "What usually happens once you are in the room?",
            true,
            vec![
                QuizOption::new("wait_to_be_approached", "I wait for someone to approach me")
                    .with_trait(Conversation, -2)
                    .with_persona(SilentObserver, 3),
                QuizOption::new(
                    "great_chats_no_recall",
                    "Great chats, but nobody remembers what I do",
                )
                .with_trait(Conversation, 2)
                .with_trait(Positioning, -2)
                .with_persona(FriendlyForgettable, 3),
                QuizOption::new("replay_conversations", "I replay conversations for days")
                    .with_trait(Confidence, -1)
                    .with_persona(Overthinker, 2),
                QuizOption::new("swap_details", "I swap details with a few people")
                    .with_trait(Conversation, 1)
                    .with_persona(ConnectorDisappears, 1),
                QuizOption::new("leave_early", "I leave earlier than I planned")
                    .with_trait(Confidence, -1)
                    .with_persona(SilentObserver, 1),
            ],
        );

        let past_6_months = Question::new(
            "past_6_months",
            "Which of these happened in the past 6 months?",
            true,
            vec![
                QuizOption::new("lost_touch", "I lost touch with people I meant to follow up with")
                    .with_trait(FollowUp, -3)
                    .with_persona(ConnectorDisappears, 3),
                QuizOption::new("never_asked", "I needed help but did not ask my network")
                    .with_trait(Leverage, -3)
                    .with_persona(PassiveNetworker, 3),
                QuizOption::new("sprint_then_stop", "I went all in for a few weeks, then stopped")
                    .with_trait(FollowUp, -1)
                    .with_persona(InconsistentSprinter, 3),
                QuizOption::new("changed_direction", "I changed direction or role")
                    .with_trait(Positioning, -1)
                    .with_persona(IdentityExplorer, 2),
                QuizOption::new("people_forgot_me", "Someone I had met did not remember me")
                    .with_trait(Positioning, -1)
                    .with_persona(FriendlyForgettable, 2),
                QuizOption::new(
                    "wants_optimize",
                    "None of these, I just want to get more out of it",
                )
                .with_trait(Confidence, 1)
                .with_trait(Leverage, 1),
            ],
        );

        let improvement_goal = Question::new(
            "improvement_goal",
            "What would you most like to improve?",
            true,
            vec![
                QuizOption::new("starting_conversations", "Starting conversations")
                    .with_trait(Conversation, -1)
                    .with_persona(SilentObserver, 1),
                QuizOption::new("explaining_myself", "Explaining what I do")
                    .with_trait(Positioning, -1)
                    .with_persona(FriendlyForgettable, 1),
                QuizOption::new("following_up", "Following up")
                    .with_trait(FollowUp, -1)
                    .with_persona(ConnectorDisappears, 1),
                QuizOption::new("asking_for_help", "Asking for help or referrals")
                    .with_trait(Leverage, -1)
                    .with_persona(PassiveNetworker, 1),
                QuizOption::new("staying_consistent", "Staying consistent")
                    .with_persona(InconsistentSprinter, 1),
                QuizOption::new("feeling_prepared", "Feeling prepared without overthinking")
                    .with_persona(Overthinker, 1),
            ],
        );

        Self {
            questions: vec![
                stage,
                main_goal,
                event_frequency,
                before_event,
                at_event,
                past_6_months,
                improvement_goal,
            ],
            optimizer: OptimizerRule::default(),
        }
    }
}
