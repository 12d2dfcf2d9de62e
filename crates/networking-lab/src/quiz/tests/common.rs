use std::sync::Arc;

use crate::quiz::catalog::{OptimizerRule, QuestionCatalog};
use crate::quiz::domain::{PersonaKey, Question, QuizOption, Trait};
use crate::quiz::scoring::ScoringEngine;

pub(super) fn persona_option(id: &str, impacts: &[(PersonaKey, i32)]) -> QuizOption {
    impacts
        .iter()
        .fold(QuizOption::new(id, id), |option, (persona, weight)| {
            option.with_persona(*persona, *weight)
        })
}

pub(super) fn trait_option(id: &str, impacts: &[(Trait, i32)]) -> QuizOption {
    impacts
        .iter()
        .fold(QuizOption::new(id, id), |option, (target, weight)| {
            option.with_trait(*target, *weight)
        })
}

pub(super) fn single(id: &str, options: Vec<QuizOption>) -> Question {
    Question::new(id, id, false, options)
}

pub(super) fn multi(id: &str, options: Vec<QuizOption>) -> Question {
    Question::new(id, id, true, options)
}

pub(super) fn catalog(questions: Vec<Question>) -> QuestionCatalog {
    QuestionCatalog::new(questions, OptimizerRule::default()).expect("valid catalog")
}

pub(super) fn engine(questions: Vec<Question>) -> ScoringEngine {
    ScoringEngine::new(Arc::new(catalog(questions)))
}

/// One ordinary question plus the designated life-events question, where the
/// `signal` option awards `signal_weight` points to the overthinker.
pub(super) fn optimizer_engine(signal_weight: i32) -> ScoringEngine {
    engine(vec![
        single(
            "warmup",
            vec![persona_option(
                "signal",
                &[(PersonaKey::Overthinker, signal_weight)],
            )],
        ),
        multi(
            "past_6_months",
            vec![
                persona_option("lost_touch", &[(PersonaKey::ConnectorDisappears, 3)]),
                trait_option("wants_optimize", &[(Trait::Leverage, 1)]),
            ],
        ),
    ])
}
