use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contacts::ContactDraft;
use super::content::{
    ConfidenceBooster, ConfidencePrep, ConversationStarter, FollowUpTemplate, IntroField,
    MentalReframe, ACTION_COMMITMENTS, CONFIDENCE_BOOSTERS, CONFIDENCE_PREP, CURIOSITY_PROMPTS,
    FOLLOW_UP_QUESTIONS, FOLLOW_UP_TEMPLATES, GENERAL_STARTERS, GOAL_SUGGESTIONS, INTRO_EXAMPLE,
    INTRO_FIELDS, MENTAL_REFRAMES, REFLECTION_PROMPTS, REINFORCEMENTS,
};
use super::personalisation::{
    needs_confidence_prep, primary_route, Route, SessionFocus, Tone,
};
use super::preferences::{Difficulty, Preferences, Reason};
use super::prompts::{build_personalised_cards, reset_message, PromptCard};

const SUGGESTIONS_SHOWN: usize = 4;
const CONFIDENCE_PREP_SHOWN: usize = 2;

/// The three screens of a live networking session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStep {
    #[default]
    Before,
    During,
    After,
}

impl SessionStep {
    pub const ALL: [SessionStep; 3] = [SessionStep::Before, SessionStep::During, SessionStep::After];

    pub fn label(&self) -> &'static str {
        match self {
            SessionStep::Before => "Before",
            SessionStep::During => "During",
            SessionStep::After => "After",
        }
    }

    /// Stays on `After`.
    pub fn next(self) -> SessionStep {
        match self {
            SessionStep::Before => SessionStep::During,
            SessionStep::During | SessionStep::After => SessionStep::After,
        }
    }

    /// Stays on `Before`.
    pub fn back(self) -> SessionStep {
        match self {
            SessionStep::Before | SessionStep::During => SessionStep::Before,
            SessionStep::After => SessionStep::During,
        }
    }

    pub fn is_last(&self) -> bool {
        *self == SessionStep::After
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeforeStep {
    pub reset_message: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub confidence_prep: Vec<&'static ConfidencePrep>,
    pub reframe: &'static MentalReframe,
    pub goal_suggestions: Vec<&'static str>,
    pub commitments: Vec<&'static str>,
}

/// In-room material. Sections that do not apply are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuringStep {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub starters: Vec<&'static ConversationStarter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub follow_up_questions: Vec<&'static ConversationStarter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intro_fields: Vec<&'static IntroField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_example: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub confidence_boosters: Vec<&'static ConfidenceBooster>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub curiosity_prompts: Vec<&'static ConversationStarter>,
}

impl DuringStep {
    fn for_preferences(preferences: &Preferences) -> DuringStep {
        let difficulty = preferences.difficulty;
        let show_intro = difficulty == Some(Difficulty::TalkingAboutMyself);
        let show_boosters = needs_confidence_prep(difficulty);
        let show_starters = matches!(
            difficulty,
            Some(Difficulty::StartingConversations) | Some(Difficulty::KeepingGoing)
        ) || (!show_intro && !show_boosters);

        let mut step = DuringStep::default();
        if show_starters {
            step.starters = GENERAL_STARTERS.iter().collect();
        }
        if difficulty == Some(Difficulty::KeepingGoing) {
            step.follow_up_questions = FOLLOW_UP_QUESTIONS.iter().collect();
        }
        if show_intro {
            step.intro_fields = INTRO_FIELDS.iter().collect();
            step.intro_example = Some(INTRO_EXAMPLE);
        }
        if show_boosters {
            step.confidence_boosters = CONFIDENCE_BOOSTERS.iter().collect();
        }
        if preferences.reason == Some(Reason::Learning) {
            step.curiosity_prompts = CURIOSITY_PROMPTS.iter().collect();
        }
        step
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AfterStep {
    pub reflection_prompt: &'static str,
    pub follow_up_templates: &'static [FollowUpTemplate],
    pub reinforcement: &'static str,
}

/// Everything needed to run one session for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPlan {
    pub route: Route,
    pub focus: SessionFocus,
    pub tone: Tone,
    pub cards: Vec<PromptCard>,
    pub before: BeforeStep,
    pub during: DuringStep,
    pub after: AfterStep,
}

impl SessionPlan {
    /// `rotation` selects the reframe, reflection prompt and reinforcement so
    /// repeat sessions cycle through the copy deterministically. Callers pass
    /// the number of sessions already completed.
    pub fn for_preferences(preferences: &Preferences, rotation: usize) -> SessionPlan {
        let difficulty = preferences.difficulty;
        let confidence_prep = if needs_confidence_prep(difficulty) {
            CONFIDENCE_PREP[..CONFIDENCE_PREP_SHOWN].iter().collect()
        } else {
            Vec::new()
        };

        SessionPlan {
            route: primary_route(difficulty),
            focus: SessionFocus::for_difficulty(difficulty),
            tone: Tone::for_category(preferences.category),
            cards: build_personalised_cards(preferences),
            before: BeforeStep {
                reset_message: reset_message(difficulty),
                confidence_prep,
                reframe: pick(&MENTAL_REFRAMES, rotation),
                goal_suggestions: GOAL_SUGGESTIONS[..SUGGESTIONS_SHOWN].to_vec(),
                commitments: ACTION_COMMITMENTS[..SUGGESTIONS_SHOWN].to_vec(),
            },
            during: DuringStep::for_preferences(preferences),
            after: AfterStep {
                reflection_prompt: *pick(&REFLECTION_PROMPTS, rotation),
                follow_up_templates: &FOLLOW_UP_TEMPLATES,
                reinforcement: *pick(&REINFORCEMENTS, rotation),
            },
        }
    }
}

fn pick<T>(items: &'static [T], rotation: usize) -> &'static T {
    &items[rotation % items.len()]
}

/// What the user entered over a session, submitted on completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionOutcome {
    pub goal: String,
    pub commitment: String,
    pub reflection: String,
    pub contact: ContactDraft,
}

impl SessionOutcome {
    /// The met contact, only when a name was given.
    pub fn contact_to_save(&self) -> Option<ContactDraft> {
        if self.contact.name.trim().is_empty() {
            return None;
        }
        Some(self.contact.trimmed())
    }

    pub fn into_record(self, completed_at: DateTime<Utc>) -> SessionRecord {
        let contact_saved = self.contact_to_save().is_some();
        SessionRecord {
            goal: self.goal,
            commitment: self.commitment,
            reflection: self.reflection,
            contact_saved,
            completed_at,
        }
    }
}

/// History entry for a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub commitment: String,
    #[serde(default)]
    pub reflection: String,
    #[serde(default)]
    pub contact_saved: bool,
    pub completed_at: DateTime<Utc>,
}
