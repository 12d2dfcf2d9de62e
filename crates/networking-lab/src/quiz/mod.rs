//! Persona quiz: question catalog, scoring engine, and result presentation.
//!
//! The catalog is injected into the engine as an immutable value so tests can
//! drive the engine with small synthetic catalogs.

pub mod catalog;
pub mod domain;
pub mod personas;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, OptimizerRule, QuestionCatalog};
pub use domain::{
    AnswerSet, PersonaKey, PersonaScores, Question, QuizOption, QuizResult, Trait, TraitScores,
};
pub use personas::{CircleColor, PersonaProfile, ResultPresentation, TraitHighlight};
pub use scoring::{calculate_results, ScoringEngine};
