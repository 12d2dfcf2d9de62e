use serde::Serialize;

use super::preferences::{Category, Difficulty, Preferences, Reason};

/// Role a prompt plays in a conversation. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptKind {
    Opener,
    Curiosity,
    FollowUp,
    Closer,
}

/// Bank entry with the preference tags it is relevant to. An entry with no
/// tags at all is universal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEntry {
    pub text: &'static str,
    pub kind: PromptKind,
    pub label: &'static str,
    pub reasons: &'static [Reason],
    pub categories: &'static [Category],
    pub difficulties: &'static [Difficulty],
}

impl PromptEntry {
    fn is_universal(&self) -> bool {
        self.reasons.is_empty() && self.categories.is_empty() && self.difficulties.is_empty()
    }

    /// Relevance in half-points: difficulty 4, reason 2, category 2,
    /// universal bonus 1.
    pub(crate) fn half_points(&self, preferences: &Preferences) -> u8 {
        let mut score = 0;
        if preferences
            .difficulty
            .is_some_and(|value| self.difficulties.contains(&value))
        {
            score += 4;
        }
        if preferences
            .reason
            .is_some_and(|value| self.reasons.contains(&value))
        {
            score += 2;
        }
        if preferences
            .category
            .is_some_and(|value| self.categories.contains(&value))
        {
            score += 2;
        }
        if self.is_universal() {
            score += 1;
        }
        score
    }

    fn card(&self) -> PromptCard {
        PromptCard {
            text: self.text,
            kind: self.kind,
            label: self.label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptCard {
    pub text: &'static str,
    #[serde(rename = "type")]
    pub kind: PromptKind,
    pub label: &'static str,
}

pub const CARD_TARGET: usize = 6;
pub const DEFAULT_CARD_COUNT: usize = 5;

pub fn prompt_bank() -> &'static [PromptEntry] {
    &PROMPT_BANK
}

/// Rank the bank against the user's preferences. Picks the best entry of each
/// kind first, tops up with the best of the rest, then orders by kind.
pub fn build_personalised_cards(preferences: &Preferences) -> Vec<PromptCard> {
    if preferences.is_empty() {
        return PROMPT_BANK[..DEFAULT_CARD_COUNT]
            .iter()
            .map(PromptEntry::card)
            .collect();
    }

    let mut scored: Vec<(u8, &PromptEntry)> = PROMPT_BANK
        .iter()
        .map(|entry| (entry.half_points(preferences), entry))
        .collect();
    // `sort_by` is stable, so equal scores keep bank order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut picked: Vec<usize> = Vec::with_capacity(CARD_TARGET);
    let mut kinds: Vec<PromptKind> = Vec::new();
    for (index, (_, entry)) in scored.iter().enumerate() {
        if picked.len() >= CARD_TARGET {
            break;
        }
        if !kinds.contains(&entry.kind) {
            kinds.push(entry.kind);
            picked.push(index);
        }
    }
    for index in 0..scored.len() {
        if picked.len() >= CARD_TARGET {
            break;
        }
        if !picked.contains(&index) {
            picked.push(index);
        }
    }

    let mut selected: Vec<&PromptEntry> = picked.into_iter().map(|index| scored[index].1).collect();
    selected.sort_by_key(|entry| entry.kind);
    selected.into_iter().map(PromptEntry::card).collect()
}

/// Line shown on the reset screen before walking into the room.
pub fn reset_message(difficulty: Option<Difficulty>) -> &'static str {
    match difficulty {
        Some(Difficulty::Confidence) => "You belong here. Take one breath.",
        Some(Difficulty::StartingConversations) => {
            "You have great questions ready. Take one breath."
        }
        Some(Difficulty::TalkingAboutMyself) => "You have a story worth sharing. Take one breath.",
        Some(Difficulty::KeepingGoing) => "Curiosity is your superpower. Take one breath.",
        Some(Difficulty::FollowUp) => "Connections start here. Take one breath.",
        None => "Take one breath.",
    }
}

static PROMPT_BANK: [PromptEntry; 15] = [
    PromptEntry {
        text: "What brought you to this event?",
        kind: PromptKind::Opener,
        label: "Universal opener",
        reasons: &[],
        categories: &[],
        difficulties: &[Difficulty::StartingConversations],
    },
    PromptEntry {
        text: "What are you working on right now?",
        kind: PromptKind::Opener,
        label: "Direct and engaging",
        reasons: &[Reason::Job, Reason::CareerGrowth],
        categories: &[Category::Professional, Category::Entrepreneur],
        difficulties: &[Difficulty::StartingConversations],
    },
    PromptEntry {
        text: "Hi, I'm exploring [field] — what's your background?",
        kind: PromptKind::Opener,
        label: "Shows intention",
        reasons: &[Reason::Learning, Reason::Mentor],
        categories: &[Category::Student, Category::CareerSwitcher],
        difficulties: &[
            Difficulty::StartingConversations,
            Difficulty::TalkingAboutMyself,
        ],
    },
    PromptEntry {
        text: "I'm new to events like this — any tips?",
        kind: PromptKind::Opener,
        label: "Honest and disarming",
        reasons: &[Reason::Confidence],
        categories: &[Category::Student, Category::Graduate],
        difficulties: &[Difficulty::Confidence, Difficulty::StartingConversations],
    },
    PromptEntry {
        text: "What opportunities are you most excited about right now?",
        kind: PromptKind::Opener,
        label: "Opportunity-focused",
        reasons: &[Reason::Job, Reason::CareerGrowth],
        categories: &[Category::Professional, Category::Graduate],
        difficulties: &[Difficulty::StartingConversations],
    },
    PromptEntry {
        text: "What's changing in your industry right now?",
        kind: PromptKind::Curiosity,
        label: "Shows you want to learn",
        reasons: &[Reason::Learning, Reason::CareerGrowth],
        categories: &[Category::Professional, Category::CareerSwitcher],
        difficulties: &[Difficulty::KeepingGoing],
    },
    PromptEntry {
        text: "What advice would you give someone starting out in your field?",
        kind: PromptKind::Curiosity,
        label: "Great for mentorship",
        reasons: &[Reason::Mentor, Reason::Learning],
        categories: &[
            Category::Student,
            Category::Graduate,
            Category::CareerSwitcher,
        ],
        difficulties: &[Difficulty::KeepingGoing],
    },
    PromptEntry {
        text: "How did you get into what you do?",
        kind: PromptKind::Curiosity,
        label: "People love sharing their story",
        reasons: &[Reason::Learning, Reason::Mentor],
        categories: &[],
        difficulties: &[Difficulty::KeepingGoing],
    },
    PromptEntry {
        text: "What's the most interesting project you've worked on recently?",
        kind: PromptKind::Curiosity,
        label: "Sparks deeper conversation",
        reasons: &[Reason::Job, Reason::Learning],
        categories: &[Category::Professional, Category::Entrepreneur],
        difficulties: &[Difficulty::KeepingGoing],
    },
    PromptEntry {
        text: "That's interesting — can you tell me more?",
        kind: PromptKind::FollowUp,
        label: "Keep them talking",
        reasons: &[],
        categories: &[],
        difficulties: &[Difficulty::KeepingGoing],
    },
    PromptEntry {
        text: "What would you do differently if you were starting over?",
        kind: PromptKind::FollowUp,
        label: "Invites reflection",
        reasons: &[Reason::Mentor, Reason::CareerGrowth],
        categories: &[Category::CareerSwitcher],
        difficulties: &[Difficulty::KeepingGoing],
    },
    PromptEntry {
        text: "That resonates with me — I've been thinking about something similar.",
        kind: PromptKind::FollowUp,
        label: "Build connection",
        reasons: &[Reason::Confidence],
        categories: &[],
        difficulties: &[Difficulty::TalkingAboutMyself, Difficulty::Confidence],
    },
    PromptEntry {
        text: "Great chatting — would you be open to connecting on LinkedIn?",
        kind: PromptKind::Closer,
        label: "Natural transition",
        reasons: &[Reason::Job, Reason::CareerGrowth],
        categories: &[],
        difficulties: &[Difficulty::FollowUp],
    },
    PromptEntry {
        text: "I'd love to continue this conversation — could we grab a coffee sometime?",
        kind: PromptKind::Closer,
        label: "Proactive follow-up",
        reasons: &[Reason::Mentor, Reason::Learning],
        categories: &[],
        difficulties: &[Difficulty::FollowUp],
    },
    PromptEntry {
        text: "Thanks for sharing your insights — I'll definitely look into that.",
        kind: PromptKind::Closer,
        label: "Shows you listened",
        reasons: &[Reason::Learning],
        categories: &[Category::Student, Category::Graduate],
        difficulties: &[Difficulty::FollowUp],
    },
];
