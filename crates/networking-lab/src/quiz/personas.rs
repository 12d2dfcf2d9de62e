use serde::Serialize;

use super::domain::{PersonaKey, QuizResult, Trait, TraitScores};

/// Accent colour used when rendering a persona badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleColor {
    Blue,
    Purple,
    Orange,
    Green,
    Yellow,
    Teal,
    Indigo,
}

impl CircleColor {
    pub fn hex(&self) -> &'static str {
        match self {
            CircleColor::Blue => "#60a5fa",
            CircleColor::Purple => "#a78bfa",
            CircleColor::Orange => "#fb923c",
            CircleColor::Green => "#4ade80",
            CircleColor::Yellow => "#facc15",
            CircleColor::Teal => "#2dd4bf",
            CircleColor::Indigo => "#818cf8",
        }
    }
}

/// Display copy for a persona result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaProfile {
    pub title: &'static str,
    pub tagline: &'static str,
    pub pattern: &'static str,
    pub risk: &'static str,
    pub solution: &'static str,
    pub image_path: &'static str,
    pub circle_color: CircleColor,
}

impl PersonaProfile {
    pub fn for_key(key: PersonaKey) -> &'static PersonaProfile {
        &PERSONAS[key.priority()]
    }

    pub fn all() -> impl Iterator<Item = (PersonaKey, &'static PersonaProfile)> {
        PersonaKey::ALL
            .into_iter()
            .map(|key| (key, Self::for_key(key)))
    }
}

static PERSONAS: [PersonaProfile; 7] = [
    PersonaProfile {
        title: "The Overthinker",
        tagline: "Mentally prepared. Emotionally exhausted.",
        pattern: "You care deeply about making a good impression. You rehearse, reflect, and replay conversations. Your preparation is thorough—maybe too thorough. The pressure builds before you even enter the room.",
        risk: "If this continues, you will keep exhausting yourself before events. The mental load will grow. You may start avoiding networking altogether because the prep feels unsustainable.",
        solution: "The Networking Lab helps you reduce pre-event anxiety with a Mental Prep framework. Not more preparation—structured, low-pressure preparation. You learn to enter rooms without carrying the weight of perfection.",
        image_path: "/images/personas/overthinker.svg",
        circle_color: CircleColor::Blue,
    },
    PersonaProfile {
        title: "The Silent Observer",
        tagline: "You attend. You watch. You rarely initiate.",
        pattern: "You show up. You listen. You analyse. But starting conversations feels heavy. You wait for the right moment, the right person, the right opener. The moment often never comes.",
        risk: "If this continues, you will keep leaving events with regret. Your network will stay small. Opportunities will pass because you never made the first move.",
        solution: "The Networking Lab teaches structured conversation initiation. Low-pressure openers, flow frameworks, exit strategies. You do not need to become extroverted. You need structure.",
        image_path: "/images/personas/silent_observer.svg",
        circle_color: CircleColor::Purple,
    },
    PersonaProfile {
        title: "The Friendly but Forgettable",
        tagline: "People like you. They just do not remember why.",
        pattern: "You connect easily. People enjoy talking to you. But when they leave, they struggle to recall what you do or why you matter. Your professional value gets lost in the warmth.",
        risk: "If this continues, you will keep having pleasant conversations that go nowhere. Your network will grow wide but shallow. Referrals and opportunities will go to people who positioned themselves clearly.",
        solution: "The Networking Lab helps you define your professional identity and craft a natural \"what do you do?\" response. Not rehearsed—memorable. This is where good conversations become opportunities.",
        image_path: "/images/personas/friendly_forgettable.svg",
        circle_color: CircleColor::Orange,
    },
    PersonaProfile {
        title: "The Connector Who Disappears",
        tagline: "You meet people. Then momentum fades.",
        pattern: "You exchange LinkedIn. You have good intentions. Then life happens. The follow-up never lands. The relationship cools. You have a growing list of contacts who do not really know you anymore.",
        risk: "If this continues, your network will become a graveyard of one-off connections. People will stop expecting to hear from you. When you need help, you will have to start from scratch.",
        solution: "The Networking Lab teaches follow-up timing, simple message frameworks, and relationship maintenance habits. Connections only grow if nurtured. We show you how to do it without it feeling like a chore.",
        image_path: "/images/personas/connector_disappears.svg",
        circle_color: CircleColor::Green,
    },
    PersonaProfile {
        title: "The Passive Networker",
        tagline: "You have contacts. Asking feels wrong.",
        pattern: "You have a network. You have helped others. But asking for help, referrals, or introductions feels uncomfortable. You tell yourself you do not want to be that person. So you stay passive.",
        risk: "If this continues, you will keep under-leveraging what you have built. Others will advance because they asked. You will stay stuck because you did not.",
        solution: "The Networking Lab shows you how to ask without awkwardness. How to provide value first. How to activate dormant connections. Networking is not about using people. It is about mutual value.",
        image_path: "/images/personas/passive_networker.svg",
        circle_color: CircleColor::Yellow,
    },
    PersonaProfile {
        title: "The Inconsistent Sprinter",
        tagline: "You go hard. Then you disappear.",
        pattern: "You burst into action. You attend events, send messages, make plans. Then you burn out or get busy. Weeks of silence. When you return, you have to rebuild momentum from zero.",
        risk: "If this continues, people will stop taking your outreach seriously. You will be known as someone who shows up in waves and then vanishes. Consistency matters more than intensity.",
        solution: "The Networking Lab helps you build sustainable habits. Not sprints—systems. You learn to maintain presence without exhausting yourself. Steady beats sporadic.",
        image_path: "/images/personas/overthinker.svg",
        circle_color: CircleColor::Teal,
    },
    PersonaProfile {
        title: "The Identity Explorer",
        tagline: "Still figuring out who you are professionally.",
        pattern: "You are in transition. Career switch, new role, or still defining your path. When people ask what you do, you hesitate. Your story feels unfinished. Networking feels harder when you are not sure of your own narrative.",
        risk: "If this continues, you will keep avoiding situations where you have to explain yourself. Opportunities will pass because you could not articulate your value. Clarity precedes confidence.",
        solution: "The Networking Lab helps you craft a professional identity that feels authentic. You learn to tell your story even when it is still evolving. You do not need to have it all figured out to show up.",
        image_path: "/images/personas/friendly_forgettable.svg",
        circle_color: CircleColor::Indigo,
    },
];

const OPTIMIZER_TITLE: &str = "Low Friction Profile (Optimizer)";
const OPTIMIZER_TAGLINE: &str = "You have a healthy approach, but you want to do more.";
const OPTIMIZER_PATTERN: &str = "This is what happens in real life: You don’t feel paralyzed by anxiety or friction. You attend events, you talk to people, and you generally feel fine. But you know you could be getting more out of the time you invest.";
const OPTIMIZER_RISK: &str = "Without a system, you might coast. You’re doing \"fine\", but you’re leaving opportunity on the table because you aren’t being strategic enough.";
const OPTIMIZER_SOLUTION: &str = "This is fixable with simple workflows. The Networking Lab helps you move from \"attending\" to \"leveraging\". We give you the strategic frameworks to turn casual conversations into tangible career assets.";

/// Upper bound of the trait display scale.
pub const TRAIT_DISPLAY_MAX: i32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitHighlight {
    #[serde(rename = "trait")]
    pub target: Trait,
    pub label: &'static str,
    pub value: i32,
}

/// Everything the result screen needs: persona copy (optimizer-aware),
/// strongest and weakest trait, and display-clamped trait values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPresentation {
    pub persona: PersonaKey,
    pub is_optimizer: bool,
    pub profile: PersonaProfile,
    pub strongest: TraitHighlight,
    pub weakest: TraitHighlight,
    pub display_scores: Vec<TraitHighlight>,
}

impl ResultPresentation {
    pub fn from_result(result: &QuizResult) -> Self {
        let base = PersonaProfile::for_key(result.dominant_persona);
        let profile = if result.is_optimizer {
            PersonaProfile {
                title: OPTIMIZER_TITLE,
                tagline: OPTIMIZER_TAGLINE,
                pattern: OPTIMIZER_PATTERN,
                risk: OPTIMIZER_RISK,
                solution: OPTIMIZER_SOLUTION,
                ..base.clone()
            }
        } else {
            base.clone()
        };

        let display_scores = display_scores(&result.trait_scores);
        let (strongest, weakest) = extremes(&display_scores);

        Self {
            persona: result.dominant_persona,
            is_optimizer: result.is_optimizer,
            profile,
            strongest,
            weakest,
            display_scores,
        }
    }
}

fn display_scores(scores: &TraitScores) -> Vec<TraitHighlight> {
    Trait::ALL
        .into_iter()
        .map(|target| TraitHighlight {
            target,
            label: target.label(),
            value: scores.get(target).clamp(0, TRAIT_DISPLAY_MAX),
        })
        .collect()
}

// Ties resolve to the earlier-declared trait on both ends.
fn extremes(scores: &[TraitHighlight]) -> (TraitHighlight, TraitHighlight) {
    let mut strongest = &scores[0];
    let mut weakest = &scores[0];
    for highlight in &scores[1..] {
        if highlight.value > strongest.value {
            strongest = highlight;
        }
        if highlight.value < weakest.value {
            weakest = highlight;
        }
    }
    (strongest.clone(), weakest.clone())
}
