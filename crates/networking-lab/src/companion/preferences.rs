use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownPreference {
    pub kind: &'static str,
    pub value: String,
}

/// Where the user is in their career.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Student,
    Graduate,
    CareerSwitcher,
    Professional,
    Entrepreneur,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Student,
        Category::Graduate,
        Category::CareerSwitcher,
        Category::Professional,
        Category::Entrepreneur,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Student => "student",
            Category::Graduate => "graduate",
            Category::CareerSwitcher => "career-switcher",
            Category::Professional => "professional",
            Category::Entrepreneur => "entrepreneur",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Student => "Student",
            Category::Graduate => "Recent graduate",
            Category::CareerSwitcher => "Career switcher",
            Category::Professional => "Working professional",
            Category::Entrepreneur => "Entrepreneur / freelancer",
        }
    }
}

/// Why the user wants to network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    Job,
    Learning,
    CareerGrowth,
    Mentor,
    Confidence,
}

impl Reason {
    pub const ALL: [Reason; 5] = [
        Reason::Job,
        Reason::Learning,
        Reason::CareerGrowth,
        Reason::Mentor,
        Reason::Confidence,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Reason::Job => "job",
            Reason::Learning => "learning",
            Reason::CareerGrowth => "career-growth",
            Reason::Mentor => "mentor",
            Reason::Confidence => "confidence",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Reason::Job => "Job / internship",
            Reason::Learning => "Learning",
            Reason::CareerGrowth => "Career growth",
            Reason::Mentor => "Finding mentor",
            Reason::Confidence => "Building confidence",
        }
    }
}

/// The part of networking the user finds hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Confidence,
    StartingConversations,
    TalkingAboutMyself,
    KeepingGoing,
    FollowUp,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Confidence,
        Difficulty::StartingConversations,
        Difficulty::TalkingAboutMyself,
        Difficulty::KeepingGoing,
        Difficulty::FollowUp,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Difficulty::Confidence => "confidence",
            Difficulty::StartingConversations => "starting-conversations",
            Difficulty::TalkingAboutMyself => "talking-about-myself",
            Difficulty::KeepingGoing => "keeping-going",
            Difficulty::FollowUp => "follow-up",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Confidence => "Confidence",
            Difficulty::StartingConversations => "Starting conversations",
            Difficulty::TalkingAboutMyself => "Talking about myself",
            Difficulty::KeepingGoing => "Keeping conversations going",
            Difficulty::FollowUp => "Follow-up",
        }
    }
}

macro_rules! preference_key_impls {
    ($($ty:ident => $kind:literal),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.key())
                }
            }

            impl FromStr for $ty {
                type Err = UnknownPreference;

                fn from_str(value: &str) -> Result<Self, Self::Err> {
                    let trimmed = value.trim();
                    $ty::ALL
                        .into_iter()
                        .find(|candidate| candidate.key() == trimmed)
                        .ok_or_else(|| UnknownPreference {
                            kind: $kind,
                            value: trimmed.to_string(),
                        })
                }
            }
        )+
    };
}

preference_key_impls!(
    Category => "category",
    Reason => "reason",
    Difficulty => "difficulty",
);

/// Setup answers driving personalisation. Every field is optional until the
/// user finishes setup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub category: Option<Category>,
    pub reason: Option<Reason>,
    pub difficulty: Option<Difficulty>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.reason.is_none() && self.difficulty.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.category.is_some() && self.reason.is_some() && self.difficulty.is_some()
    }

    /// Overlay the fields set in `update`, keeping the rest.
    pub fn merge(&mut self, update: Preferences) {
        if update.category.is_some() {
            self.category = update.category;
        }
        if update.reason.is_some() {
            self.reason = update.reason;
        }
        if update.difficulty.is_some() {
            self.difficulty = update.difficulty;
        }
    }
}
