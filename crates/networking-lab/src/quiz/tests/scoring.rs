use std::sync::Arc;

use super::common::*;
use crate::quiz::catalog::QuestionCatalog;
use crate::quiz::domain::{AnswerSet, PersonaKey, Trait, TraitScores};
use crate::quiz::scoring::{calculate_results, ScoringEngine};

#[test]
fn empty_answers_yield_baseline_result() {
    let engine = ScoringEngine::new(Arc::new(QuestionCatalog::standard()));

    let result = engine.score(&AnswerSet::new());

    for target in Trait::ALL {
        assert_eq!(result.trait_scores.get(target), TraitScores::BASELINE);
    }
    assert_eq!(result.trait_scores.iter().count(), 5);
    for persona in PersonaKey::ALL {
        assert_eq!(result.persona_scores.get(persona), 0);
    }
    assert_eq!(result.persona_scores.iter().count(), 7);
    assert_eq!(result.dominant_persona, PersonaKey::Overthinker);
    assert!(!result.is_optimizer);
}

#[test]
fn single_question_example_picks_selected_persona() {
    let engine = engine(vec![single(
        "q1",
        vec![
            persona_option("a", &[(PersonaKey::Overthinker, 5)]),
            persona_option("b", &[(PersonaKey::SilentObserver, 5)]),
        ],
    )]);

    let result = engine.score(&AnswerSet::new().with("q1", ["a"]));

    assert_eq!(result.dominant_persona, PersonaKey::Overthinker);
    assert_eq!(result.dominant_score(), 5);
    for persona in PersonaKey::ALL
        .into_iter()
        .filter(|persona| *persona != PersonaKey::Overthinker)
    {
        assert_eq!(result.persona_scores.get(persona), 0);
    }
    for target in Trait::ALL {
        assert_eq!(result.trait_scores.get(target), 10);
    }
    assert!(!result.is_optimizer);
}

#[test]
fn scoring_is_deterministic() {
    let engine = ScoringEngine::new(Arc::new(QuestionCatalog::standard()));
    let answers = AnswerSet::new()
        .with("stage", ["career_switcher", "student"])
        .with("at_event", ["great_chats_no_recall", "leave_early"])
        .with("past_6_months", ["lost_touch"]);

    assert_eq!(engine.score(&answers), engine.score(&answers));
}

#[test]
fn duplicate_selection_counts_once() {
    let engine = engine(vec![single(
        "q1",
        vec![persona_option("a", &[(PersonaKey::PassiveNetworker, 2)])
            .with_trait(Trait::Leverage, -2)],
    )]);

    let once = engine.score(&AnswerSet::new().with("q1", ["a"]));
    let twice = engine.score(&AnswerSet::new().with("q1", ["a", "a"]));

    assert_eq!(once, twice);
    assert_eq!(twice.persona_scores.get(PersonaKey::PassiveNetworker), 2);
    assert_eq!(twice.trait_scores.get(Trait::Leverage), 8);
}

#[test]
fn answer_insertion_order_does_not_matter() {
    let engine = ScoringEngine::new(Arc::new(QuestionCatalog::standard()));

    let forward: AnswerSet = [
        ("before_event", vec!["dread"]),
        ("at_event", vec!["great_chats_no_recall"]),
        ("improvement_goal", vec!["explaining_myself"]),
    ]
    .into_iter()
    .collect();
    let reversed: AnswerSet = [
        ("improvement_goal", vec!["explaining_myself"]),
        ("at_event", vec!["great_chats_no_recall"]),
        ("before_event", vec!["dread"]),
    ]
    .into_iter()
    .collect();

    assert_eq!(engine.score(&forward), engine.score(&reversed));
}

#[test]
fn earlier_first_contribution_wins_score_tie() {
    let engine = engine(vec![
        single(
            "early",
            vec![persona_option("x", &[(PersonaKey::SilentObserver, 2)])],
        ),
        single(
            "late",
            vec![persona_option("y", &[(PersonaKey::Overthinker, 2)])],
        ),
    ]);

    // Insert the later question first; only catalog order may matter.
    let answers = AnswerSet::new().with("late", ["y"]).with("early", ["x"]);
    let result = engine.score(&answers);

    assert_eq!(result.persona_scores.get(PersonaKey::Overthinker), 2);
    assert_eq!(result.persona_scores.get(PersonaKey::SilentObserver), 2);
    assert_eq!(result.dominant_persona, PersonaKey::SilentObserver);
}

#[test]
fn full_tie_falls_back_to_priority_order() {
    let engine = engine(vec![single(
        "q1",
        vec![persona_option(
            "both",
            &[
                (PersonaKey::PassiveNetworker, 2),
                (PersonaKey::ConnectorDisappears, 2),
            ],
        )],
    )]);

    let result = engine.score(&AnswerSet::new().with("q1", ["both"]));

    assert_eq!(result.dominant_persona, PersonaKey::ConnectorDisappears);
}

#[test]
fn unscored_personas_tie_on_priority() {
    let engine = engine(vec![single(
        "q1",
        vec![persona_option("drop", &[(PersonaKey::Overthinker, -1)])],
    )]);

    let result = engine.score(&AnswerSet::new().with("q1", ["drop"]));

    assert_eq!(result.persona_scores.get(PersonaKey::Overthinker), -1);
    assert_eq!(result.dominant_persona, PersonaKey::SilentObserver);
}

#[test]
fn negative_contribution_does_not_record_first_index() {
    let engine = engine(vec![
        single(
            "q0",
            vec![persona_option("a", &[(PersonaKey::PassiveNetworker, -1)])],
        ),
        single(
            "q1",
            vec![persona_option("b", &[(PersonaKey::IdentityExplorer, 2)])],
        ),
        single(
            "q2",
            vec![persona_option("c", &[(PersonaKey::PassiveNetworker, 3)])],
        ),
    ]);

    let answers = AnswerSet::new()
        .with("q0", ["a"])
        .with("q1", ["b"])
        .with("q2", ["c"]);
    let result = engine.score(&answers);

    assert_eq!(result.persona_scores.get(PersonaKey::PassiveNetworker), 2);
    assert_eq!(result.persona_scores.get(PersonaKey::IdentityExplorer), 2);
    assert_eq!(result.dominant_persona, PersonaKey::IdentityExplorer);
}

#[test]
fn negative_trait_weight_is_applied() {
    let engine = engine(vec![single(
        "q1",
        vec![trait_option("shaky", &[(Trait::Confidence, -3)])],
    )]);

    let result = engine.score(&AnswerSet::new().with("q1", ["shaky"]));

    assert_eq!(result.trait_scores.get(Trait::Confidence), 7);
    for target in Trait::ALL
        .into_iter()
        .filter(|target| *target != Trait::Confidence)
    {
        assert_eq!(result.trait_scores.get(target), 10);
    }
}

#[test]
fn optimizer_flag_requires_low_dominant_score() {
    let answers = AnswerSet::new()
        .with("warmup", ["signal"])
        .with("past_6_months", ["wants_optimize"]);

    let low = optimizer_engine(3).score(&answers);
    assert_eq!(low.dominant_persona, PersonaKey::Overthinker);
    assert_eq!(low.dominant_score(), 3);
    assert!(low.is_optimizer);

    let high = optimizer_engine(4).score(&answers);
    assert_eq!(high.dominant_persona, PersonaKey::Overthinker);
    assert!(!high.is_optimizer);
}

#[test]
fn optimizer_flag_requires_designated_option() {
    let answers = AnswerSet::new().with("warmup", ["signal"]);

    let result = optimizer_engine(1).score(&answers);

    assert!(!result.is_optimizer);
}

#[test]
fn optimizer_candidate_survives_other_selected_options() {
    let answers = AnswerSet::new().with("past_6_months", ["lost_touch", "wants_optimize"]);

    let result = optimizer_engine(0).score(&answers);

    assert_eq!(result.dominant_persona, PersonaKey::ConnectorDisappears);
    assert_eq!(result.dominant_score(), 3);
    assert!(result.is_optimizer);
}

#[test]
fn extreme_catalog_weights_saturate_instead_of_overflowing() {
    let heavy = |id: &str| {
        persona_option(id, &[(PersonaKey::SilentObserver, i32::MAX)])
            .with_trait(Trait::Leverage, i32::MAX)
            .with_trait(Trait::Confidence, i32::MIN)
    };
    let engine = engine(vec![
        single("q1", vec![heavy("a")]),
        single("q2", vec![heavy("b")]),
    ]);

    let result = engine.score(&AnswerSet::new().with("q1", ["a"]).with("q2", ["b"]));

    assert_eq!(result.persona_scores.get(PersonaKey::SilentObserver), i32::MAX);
    assert_eq!(result.dominant_persona, PersonaKey::SilentObserver);
    assert_eq!(result.trait_scores.get(Trait::Leverage), i32::MAX);
    assert_eq!(result.trait_scores.get(Trait::Confidence), i32::MIN);
}

#[test]
fn unknown_ids_are_ignored() {
    let catalog = QuestionCatalog::standard();
    let answers = AnswerSet::new()
        .with("not_a_question", ["whatever"])
        .with("before_event", ["not_an_option"]);

    let result = calculate_results(&catalog, &answers);

    assert_eq!(result, calculate_results(&catalog, &AnswerSet::new()));
}

#[test]
fn standard_catalog_scores_overthinker_path() {
    let engine = ScoringEngine::new(Arc::new(QuestionCatalog::standard()));
    let answers = AnswerSet::new()
        .with("before_event", ["rehearse"])
        .with("at_event", ["replay_conversations"]);

    let result = engine.score(&answers);

    assert_eq!(result.dominant_persona, PersonaKey::Overthinker);
    assert_eq!(result.dominant_score(), 5);
    assert_eq!(result.trait_scores.get(Trait::Confidence), 7);
    assert!(!result.is_optimizer);
}

#[test]
fn standard_catalog_flags_low_friction_optimizer() {
    let engine = ScoringEngine::new(Arc::new(QuestionCatalog::standard()));
    let answers = AnswerSet::new()
        .with("event_frequency", ["weekly"])
        .with("before_event", ["excited"])
        .with("past_6_months", ["wants_optimize"]);

    let result = engine.score(&answers);

    assert!(result.is_optimizer);
    assert_eq!(result.dominant_persona, PersonaKey::Overthinker);
    assert_eq!(result.trait_scores.get(Trait::Confidence), 15);
    assert_eq!(result.trait_scores.get(Trait::Conversation), 12);
    assert_eq!(result.trait_scores.get(Trait::Leverage), 11);
}

#[test]
fn result_serializes_with_camel_case_keys() {
    let engine = engine(vec![single(
        "q1",
        vec![persona_option("a", &[(PersonaKey::SilentObserver, 1)])
            .with_trait(Trait::FollowUp, 2)],
    )]);

    let result = engine.score(&AnswerSet::new().with("q1", ["a"]));
    let value = serde_json::to_value(&result).expect("serializes");

    assert_eq!(value["dominantPersona"], "silentObserver");
    assert_eq!(value["isOptimizer"], false);
    assert_eq!(value["traitScores"]["followUp"], 12);
    assert_eq!(value["personaScores"]["silentObserver"], 1);
    assert_eq!(value["personaScores"]["identityExplorer"], 0);
}
