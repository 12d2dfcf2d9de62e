use super::common::*;
use crate::quiz::catalog::{CatalogError, OptimizerRule, QuestionCatalog};
use crate::quiz::domain::{PersonaKey, Trait};

#[test]
fn standard_catalog_is_valid_and_ordered() {
    let catalog = QuestionCatalog::standard();
    let ids: Vec<&str> = catalog
        .questions()
        .iter()
        .map(|question| question.id.as_str())
        .collect();

    assert_eq!(
        ids,
        vec![
            "stage",
            "main_goal",
            "event_frequency",
            "before_event",
            "at_event",
            "past_6_months",
            "improvement_goal",
        ]
    );

    let revalidated = QuestionCatalog::new(
        catalog.questions().to_vec(),
        catalog.optimizer().clone(),
    );
    assert!(revalidated.is_ok());

    let optimizer = catalog.optimizer();
    let life_events = catalog
        .question(&optimizer.question_id)
        .expect("life events question present");
    assert!(life_events.option(&optimizer.option_id).is_some());
    assert!(!catalog.question("stage").expect("stage").auto_advance);
}

#[test]
fn rejects_duplicate_question_ids() {
    let result = QuestionCatalog::new(
        vec![
            single("q1", vec![persona_option("a", &[])]),
            single("q1", vec![persona_option("b", &[])]),
        ],
        OptimizerRule::default(),
    );

    match result {
        Err(CatalogError::DuplicateQuestion(id)) => assert_eq!(id, "q1"),
        other => panic!("expected duplicate question error, got {other:?}"),
    }
}

#[test]
fn rejects_duplicate_option_ids() {
    let result = QuestionCatalog::new(
        vec![single(
            "q1",
            vec![persona_option("a", &[]), persona_option("a", &[])],
        )],
        OptimizerRule::default(),
    );

    assert!(matches!(
        result,
        Err(CatalogError::DuplicateOption { ref question_id, ref option_id })
            if question_id == "q1" && option_id == "a"
    ));
}

#[test]
fn rejects_empty_catalog() {
    let result = QuestionCatalog::new(Vec::new(), OptimizerRule::default());
    assert!(matches!(result, Err(CatalogError::Empty)));
}

#[test]
fn loads_document_with_optimizer_override() {
    let raw = r#"{
        "questions": [
            {
                "id": "life",
                "question": "What happened lately?",
                "multi": true,
                "options": [
                    { "id": "optimise", "label": "Nothing, I want more",
                      "traitImpact": { "followUp": 2 } },
                    { "id": "quiet", "label": "Stayed quiet",
                      "personaImpact": { "silentObserver": 3, "overthinker": -1 } }
                ]
            }
        ],
        "optimizer": { "questionId": "life", "optionId": "optimise", "maxDominantScore": 1 }
    }"#;

    let catalog = QuestionCatalog::from_json(raw).expect("catalog parses");

    assert_eq!(catalog.optimizer().question_id, "life");
    assert_eq!(catalog.optimizer().max_dominant_score, 1);
    let question = catalog.question("life").expect("question present");
    assert!(question.auto_advance);
    let quiet = question.option("quiet").expect("option present");
    assert_eq!(quiet.persona_impact.get(&PersonaKey::SilentObserver), Some(&3));
    assert_eq!(quiet.persona_impact.get(&PersonaKey::Overthinker), Some(&-1));
    let optimise = question.option("optimise").expect("option present");
    assert_eq!(optimise.trait_impact.get(&Trait::FollowUp), Some(&2));
}

#[test]
fn loads_bare_question_list_with_default_optimizer() {
    let raw = r#"[
        { "id": "q1", "question": "Pick one", "multi": false,
          "options": [ { "id": "a", "label": "A" } ] }
    ]"#;

    let catalog = QuestionCatalog::from_json(raw).expect("catalog parses");

    assert_eq!(catalog.questions().len(), 1);
    assert_eq!(catalog.optimizer(), &OptimizerRule::default());
}

#[test]
fn unknown_trait_name_is_a_load_error() {
    let raw = r#"[
        { "id": "q1", "question": "Pick one", "multi": false,
          "options": [ { "id": "a", "label": "A", "traitImpact": { "charisma": 1 } } ] }
    ]"#;

    let err = QuestionCatalog::from_json(raw).expect_err("unknown trait rejected");
    assert!(matches!(err, CatalogError::Json(_)));
}

#[test]
fn option_labels_follow_catalog_order() {
    let catalog = QuestionCatalog::standard();

    let labels = catalog.option_labels("event_frequency");

    assert_eq!(labels.first().map(|(id, _)| id.as_str()), Some("never"));
    assert_eq!(labels.len(), 5);
    assert!(catalog.option_labels("missing").is_empty());
}

#[test]
fn catalog_round_trips_through_json() {
    let catalog = QuestionCatalog::standard();
    let raw = serde_json::to_string(&catalog).expect("serializes");

    let reloaded = QuestionCatalog::from_json(&raw).expect("reloads");

    assert_eq!(reloaded, catalog);
}
