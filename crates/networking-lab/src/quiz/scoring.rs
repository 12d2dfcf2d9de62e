use std::cmp::Ordering;
use std::sync::Arc;

use super::catalog::QuestionCatalog;
use super::domain::{AnswerSet, PersonaKey, PersonaScores, QuizResult, TraitScores};

/// Stateless scorer bound to an immutable catalog.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<QuestionCatalog>,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn score(&self, answers: &AnswerSet) -> QuizResult {
        calculate_results(&self.catalog, answers)
    }
}

/// Per-persona accumulator. `first_positive_at` is written once, on the first
/// strictly positive contribution.
#[derive(Debug, Clone, Copy, Default)]
struct PersonaTally {
    score: i32,
    first_positive_at: Option<usize>,
}

impl PersonaTally {
    fn add(&mut self, weight: i32, question_index: usize) {
        self.score = self.score.saturating_add(weight);
        if weight > 0 && self.first_positive_at.is_none() {
            self.first_positive_at = Some(question_index);
        }
    }
}

/// Score an answer set against a catalog. Unknown question and option ids are
/// ignored; an empty answer set still yields a complete result.
pub fn calculate_results(catalog: &QuestionCatalog, answers: &AnswerSet) -> QuizResult {
    let mut trait_scores = TraitScores::baseline();
    let mut tallies = [PersonaTally::default(); PersonaKey::ALL.len()];
    let optimizer = catalog.optimizer();
    let mut optimizer_candidate = false;

    for (index, question) in catalog.questions().iter().enumerate() {
        let selected = answers.selected(&question.id);
        if selected.is_empty() {
            continue;
        }

        if question.id == optimizer.question_id
            && selected.iter().any(|id| *id == optimizer.option_id)
        {
            optimizer_candidate = true;
        }

        // Iterate the catalog's options, not the selection, so duplicate ids
        // in the selection contribute once.
        for option in question
            .options
            .iter()
            .filter(|option| selected.contains(&option.id))
        {
            for (target, weight) in &option.trait_impact {
                trait_scores.apply(*target, *weight);
            }
            for (persona, weight) in &option.persona_impact {
                tallies[persona.priority()].add(*weight, index);
            }
        }
    }

    let dominant_persona = PersonaKey::ALL
        .into_iter()
        .min_by(|a, b| rank(&tallies, *a, *b))
        .unwrap_or(PersonaKey::Overthinker);

    let mut persona_scores = PersonaScores::zeroed();
    for persona in PersonaKey::ALL {
        persona_scores.apply(persona, tallies[persona.priority()].score);
    }

    let max_score = tallies[dominant_persona.priority()].score;
    let is_optimizer = optimizer_candidate && max_score <= optimizer.max_dominant_score;

    QuizResult {
        trait_scores,
        persona_scores,
        dominant_persona,
        is_optimizer,
    }
}

/// Ordering where "less" means "more dominant": higher score, then earlier
/// first positive contribution (never = last), then fixed priority.
fn rank(tallies: &[PersonaTally], a: PersonaKey, b: PersonaKey) -> Ordering {
    let left = tallies[a.priority()];
    let right = tallies[b.priority()];

    right
        .score
        .cmp(&left.score)
        .then_with(|| {
            let left_first = left.first_positive_at.unwrap_or(usize::MAX);
            let right_first = right.first_positive_at.unwrap_or(usize::MAX);
            left_first.cmp(&right_first)
        })
        .then_with(|| a.priority().cmp(&b.priority()))
}
