use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Behavioural dimension scored by the quiz, displayed on a 0-20 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trait {
    Confidence,
    Conversation,
    Positioning,
    FollowUp,
    Leverage,
}

impl Trait {
    pub const ALL: [Trait; 5] = [
        Trait::Confidence,
        Trait::Conversation,
        Trait::Positioning,
        Trait::FollowUp,
        Trait::Leverage,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Trait::Confidence => "confidence",
            Trait::Conversation => "conversation",
            Trait::Positioning => "positioning",
            Trait::FollowUp => "followUp",
            Trait::Leverage => "leverage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trait::Confidence => "Confidence",
            Trait::Conversation => "Conversation",
            Trait::Positioning => "Positioning",
            Trait::FollowUp => "Follow-up",
            Trait::Leverage => "Leverage",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Persona categories in their fixed priority order. The declaration order is
/// the last-resort tie-breaker when resolving the dominant persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonaKey {
    Overthinker,
    SilentObserver,
    FriendlyForgettable,
    ConnectorDisappears,
    PassiveNetworker,
    InconsistentSprinter,
    IdentityExplorer,
}

impl PersonaKey {
    pub const ALL: [PersonaKey; 7] = [
        PersonaKey::Overthinker,
        PersonaKey::SilentObserver,
        PersonaKey::FriendlyForgettable,
        PersonaKey::ConnectorDisappears,
        PersonaKey::PassiveNetworker,
        PersonaKey::InconsistentSprinter,
        PersonaKey::IdentityExplorer,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PersonaKey::Overthinker => "overthinker",
            PersonaKey::SilentObserver => "silentObserver",
            PersonaKey::FriendlyForgettable => "friendlyForgettable",
            PersonaKey::ConnectorDisappears => "connectorDisappears",
            PersonaKey::PassiveNetworker => "passiveNetworker",
            PersonaKey::InconsistentSprinter => "inconsistentSprinter",
            PersonaKey::IdentityExplorer => "identityExplorer",
        }
    }

    /// Position in the fixed priority list.
    pub fn priority(&self) -> usize {
        *self as usize
    }

    pub fn from_key(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|persona| persona.key() == value.trim())
    }
}

impl fmt::Display for PersonaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Selectable answer with optional signed weights for traits and personas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub trait_impact: BTreeMap<Trait, i32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub persona_impact: BTreeMap<PersonaKey, i32>,
}

impl QuizOption {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            trait_impact: BTreeMap::new(),
            persona_impact: BTreeMap::new(),
        }
    }

    pub fn with_trait(mut self, target: Trait, weight: i32) -> Self {
        self.trait_impact.insert(target, weight);
        self
    }

    pub fn with_persona(mut self, persona: PersonaKey, weight: i32) -> Self {
        self.persona_impact.insert(persona, weight);
        self
    }
}

/// Catalog entry for a single quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "question")]
    pub prompt: String,
    pub multi: bool,
    /// Presentation hint only; scoring ignores it.
    #[serde(default = "default_auto_advance")]
    pub auto_advance: bool,
    pub options: Vec<QuizOption>,
}

fn default_auto_advance() -> bool {
    true
}

impl Question {
    pub fn new(id: &str, prompt: &str, multi: bool, options: Vec<QuizOption>) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            multi,
            auto_advance: !multi,
            options,
        }
    }

    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

/// Caller-supplied selections keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, Vec<String>>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I, S>(&mut self, question_id: &str, option_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(
            question_id.to_string(),
            option_ids.into_iter().map(Into::into).collect(),
        );
    }

    pub fn with<I, S>(mut self, question_id: &str, option_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(question_id, option_ids);
        self
    }

    /// Selected option ids for a question, empty when unanswered.
    pub fn selected(&self, question_id: &str) -> &[String] {
        self.0
            .get(question_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl From<BTreeMap<String, Vec<String>>> for AnswerSet {
    fn from(value: BTreeMap<String, Vec<String>>) -> Self {
        Self(value)
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, values)| (key.into(), values.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

/// Running trait scores; always holds every trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitScores(BTreeMap<Trait, i32>);

impl TraitScores {
    pub const BASELINE: i32 = 10;

    pub fn baseline() -> Self {
        Self(Trait::ALL.into_iter().map(|t| (t, Self::BASELINE)).collect())
    }

    pub fn get(&self, target: Trait) -> i32 {
        self.0.get(&target).copied().unwrap_or(Self::BASELINE)
    }

    pub(crate) fn apply(&mut self, target: Trait, delta: i32) {
        let score = self.0.entry(target).or_insert(Self::BASELINE);
        *score = score.saturating_add(delta);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, i32)> + '_ {
        self.0.iter().map(|(t, score)| (*t, *score))
    }
}

/// Accumulated persona scores; always holds every persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaScores(BTreeMap<PersonaKey, i32>);

impl PersonaScores {
    pub fn zeroed() -> Self {
        Self(PersonaKey::ALL.into_iter().map(|p| (p, 0)).collect())
    }

    pub fn get(&self, persona: PersonaKey) -> i32 {
        self.0.get(&persona).copied().unwrap_or(0)
    }

    pub(crate) fn apply(&mut self, persona: PersonaKey, delta: i32) {
        let score = self.0.entry(persona).or_insert(0);
        *score = score.saturating_add(delta);
    }

    pub fn iter(&self) -> impl Iterator<Item = (PersonaKey, i32)> + '_ {
        self.0.iter().map(|(p, score)| (*p, *score))
    }
}

/// Output of a scoring pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub trait_scores: TraitScores,
    pub persona_scores: PersonaScores,
    pub dominant_persona: PersonaKey,
    pub is_optimizer: bool,
}

impl QuizResult {
    pub fn dominant_score(&self) -> i32 {
        self.persona_scores.get(self.dominant_persona)
    }
}
