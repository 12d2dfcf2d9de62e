use super::common::*;
use crate::companion::content::{
    FOLLOW_UP_TEMPLATES, GENERAL_STARTERS, MENTAL_REFRAMES, REFLECTION_PROMPTS, REINFORCEMENTS,
};
use crate::companion::personalisation::Route;
use crate::companion::preferences::{Category, Difficulty, Preferences, Reason};
use crate::companion::session::{SessionOutcome, SessionPlan, SessionStep};

#[test]
fn steps_move_forward_and_back_saturating() {
    let step = SessionStep::default();
    assert_eq!(step, SessionStep::Before);
    assert_eq!(step.back(), SessionStep::Before);

    let step = step.next().next();
    assert_eq!(step, SessionStep::After);
    assert!(step.is_last());
    assert_eq!(step.next(), SessionStep::After);
    assert_eq!(step.back(), SessionStep::During);
    assert_eq!(step.back().label(), "During");
}

#[test]
fn confidence_plan_preps_and_boosts() {
    let plan = SessionPlan::for_preferences(
        &preferences(
            Some(Category::Graduate),
            Some(Reason::Confidence),
            Some(Difficulty::Confidence),
        ),
        0,
    );

    assert_eq!(plan.route, Route::Motivation);
    assert_eq!(plan.before.confidence_prep.len(), 2);
    assert_eq!(plan.before.reset_message, "You belong here. Take one breath.");
    assert_eq!(plan.during.confidence_boosters.len(), 4);
    assert!(plan.during.starters.is_empty());
    assert!(plan.during.intro_fields.is_empty());
    assert_eq!(plan.tone.greeting, "Welcome");
}

#[test]
fn self_presentation_plan_shows_intro_template() {
    let plan = SessionPlan::for_preferences(
        &preferences(None, None, Some(Difficulty::TalkingAboutMyself)),
        0,
    );

    assert_eq!(plan.during.intro_fields.len(), 3);
    assert!(plan.during.intro_example.is_some());
    assert!(plan.during.starters.is_empty());
    assert!(plan.before.confidence_prep.is_empty());
}

#[test]
fn keeping_going_plan_adds_follow_up_questions() {
    let plan = SessionPlan::for_preferences(
        &preferences(None, Some(Reason::Learning), Some(Difficulty::KeepingGoing)),
        0,
    );

    assert_eq!(plan.during.starters.len(), GENERAL_STARTERS.len());
    assert_eq!(plan.during.follow_up_questions.len(), 5);
    assert_eq!(plan.during.curiosity_prompts.len(), 4);
}

#[test]
fn default_plan_shows_general_starters() {
    let plan = SessionPlan::for_preferences(&Preferences::default(), 0);

    assert_eq!(plan.route, Route::StartFlow);
    assert_eq!(plan.during.starters.len(), GENERAL_STARTERS.len());
    assert!(plan.during.follow_up_questions.is_empty());
    assert_eq!(plan.cards.len(), 5);
    assert_eq!(plan.before.goal_suggestions.len(), 4);
    assert_eq!(plan.before.commitments.len(), 4);
    assert_eq!(plan.after.follow_up_templates.len(), FOLLOW_UP_TEMPLATES.len());
}

#[test]
fn rotation_cycles_copy_deterministically() {
    let prefs = Preferences::default();
    let first = SessionPlan::for_preferences(&prefs, 0);
    let again = SessionPlan::for_preferences(&prefs, 0);
    let next = SessionPlan::for_preferences(&prefs, 1);
    let wrapped = SessionPlan::for_preferences(&prefs, MENTAL_REFRAMES.len());

    assert_eq!(first, again);
    assert_eq!(first.before.reframe.id, "reframe-1");
    assert_eq!(next.before.reframe.id, "reframe-2");
    assert_eq!(next.after.reflection_prompt, REFLECTION_PROMPTS[1]);
    assert_eq!(next.after.reinforcement, REINFORCEMENTS[1]);
    assert_eq!(wrapped.before.reframe.id, first.before.reframe.id);
}

#[test]
fn outcome_saves_contact_only_with_name() {
    let named = outcome("  Priya  ");
    let saved = named.contact_to_save().expect("contact saved");
    assert_eq!(saved.name, "Priya");

    let blank = outcome("   ");
    assert!(blank.contact_to_save().is_none());

    let record = blank.into_record(at(4, 18));
    assert!(!record.contact_saved);
    assert_eq!(record.goal, "Find a potential mentor");
}

#[test]
fn plan_serializes_without_empty_sections() {
    let plan = SessionPlan::for_preferences(
        &preferences(None, None, Some(Difficulty::Confidence)),
        0,
    );
    let value = serde_json::to_value(&plan).expect("serializes");

    assert_eq!(value["route"], "motivation");
    assert_eq!(value["focus"]["during"], "confidence-boosters");
    assert!(value["during"].get("starters").is_none());
    assert_eq!(value["during"]["confidenceBoosters"][0]["id"], "cb-1");
    assert_eq!(value["before"]["reframe"]["theme"], "mindset");
    let outcome: SessionOutcome = serde_json::from_value(serde_json::json!({
        "goal": "Meet 1 new person in my field",
        "contact": { "name": "Ada", "where": "Meetup" }
    }))
    .expect("outcome parses");
    assert_eq!(outcome.contact.met_at, "Meetup");
}
