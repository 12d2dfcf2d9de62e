use serde::Serialize;

use super::preferences::{Category, Difficulty};

/// Companion app sections. Declaration order is the default menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Discover,
    Motivation,
    StartFlow,
    SelfPresentation,
    FollowUp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Discover,
        Route::Motivation,
        Route::StartFlow,
        Route::SelfPresentation,
        Route::FollowUp,
    ];

    pub fn info(&self) -> RouteInfo {
        let (title, description, icon, color) = match self {
            Route::Discover => (
                "Discover",
                "Find aligned networking events",
                "Search",
                "#7c9a8e",
            ),
            Route::Motivation => (
                "Prepare",
                "Build confidence & mental readiness",
                "Sparkles",
                "#c4975a",
            ),
            Route::StartFlow => (
                "Connect",
                "Start & sustain conversations",
                "MessageCircle",
                "#6b9e7a",
            ),
            Route::SelfPresentation => (
                "Present",
                "Introduce yourself clearly",
                "User",
                "#8e7cb0",
            ),
            Route::FollowUp => (
                "Follow Up",
                "Maintain & grow connections",
                "Send",
                "#b07c8e",
            ),
        };
        RouteInfo {
            title,
            description,
            icon,
            color,
        }
    }
}

/// Section the user lands on first; `StartFlow` until setup picks a difficulty.
pub fn primary_route(difficulty: Option<Difficulty>) -> Route {
    match difficulty {
        Some(Difficulty::Confidence) => Route::Motivation,
        Some(Difficulty::StartingConversations) | Some(Difficulty::KeepingGoing) => {
            Route::StartFlow
        }
        Some(Difficulty::TalkingAboutMyself) => Route::SelfPresentation,
        Some(Difficulty::FollowUp) => Route::FollowUp,
        None => Route::StartFlow,
    }
}

/// All routes, primary first, the rest in menu order.
pub fn ordered_routes(difficulty: Option<Difficulty>) -> Vec<Route> {
    let primary = primary_route(difficulty);
    std::iter::once(primary)
        .chain(Route::ALL.into_iter().filter(|route| *route != primary))
        .collect()
}

pub fn needs_confidence_prep(difficulty: Option<Difficulty>) -> bool {
    difficulty == Some(Difficulty::Confidence)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Register {
    Casual,
    Supportive,
    Empowering,
    Professional,
    Energetic,
}

/// Copy voice for a career category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tone {
    pub greeting: &'static str,
    pub encouragement: &'static str,
    pub register: Register,
    pub example_context: &'static str,
}

impl Tone {
    /// Falls back to the working-professional voice.
    pub fn for_category(category: Option<Category>) -> Tone {
        match category.unwrap_or(Category::Professional) {
            Category::Student => Tone {
                greeting: "Hey there",
                encouragement: "You're already ahead of the curve by practising this early!",
                register: Register::Casual,
                example_context: "university events, career fairs, study groups",
            },
            Category::Graduate => Tone {
                greeting: "Welcome",
                encouragement:
                    "Every connection you make now builds the foundation of your career.",
                register: Register::Supportive,
                example_context: "industry meetups, alumni events, professional mixers",
            },
            Category::CareerSwitcher => Tone {
                greeting: "Hello",
                encouragement: "Your diverse experience is an asset — people love hearing different perspectives.",
                register: Register::Empowering,
                example_context:
                    "cross-industry events, skill-share meetups, professional communities",
            },
            Category::Professional => Tone {
                greeting: "Welcome back",
                encouragement: "Strategic networking is the most underused tool for career growth.",
                register: Register::Professional,
                example_context: "conferences, leadership forums, industry roundtables",
            },
            Category::Entrepreneur => Tone {
                greeting: "Hey",
                encouragement: "Every conversation could lead to your next opportunity, client, or partner.",
                register: Register::Energetic,
                example_context:
                    "startup events, pitch nights, co-working spaces, business meetups",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusArea {
    GoalSetting,
    EventTips,
    Reflection,
    MentalPrep,
    ConfidenceBoosters,
    PositiveReinforcement,
    ConversationStarters,
    ContactSave,
    IntroPrep,
    IntroTemplate,
    FollowUpPrompts,
    FollowUpAction,
}

/// What each session step emphasises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionFocus {
    pub before: FocusArea,
    pub during: FocusArea,
    pub after: FocusArea,
}

impl SessionFocus {
    pub fn for_route(route: Route) -> SessionFocus {
        use FocusArea::*;

        let (before, during, after) = match route {
            Route::Discover => (GoalSetting, EventTips, Reflection),
            Route::Motivation => (MentalPrep, ConfidenceBoosters, PositiveReinforcement),
            Route::StartFlow => (GoalSetting, ConversationStarters, ContactSave),
            Route::SelfPresentation => (IntroPrep, IntroTemplate, ContactSave),
            Route::FollowUp => (GoalSetting, FollowUpPrompts, FollowUpAction),
        };
        SessionFocus {
            before,
            during,
            after,
        }
    }

    pub fn for_difficulty(difficulty: Option<Difficulty>) -> SessionFocus {
        Self::for_route(primary_route(difficulty))
    }
}
