use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::companion::contacts::ContactDraft;
use crate::companion::preferences::{Category, Difficulty, Preferences, Reason};
use crate::companion::prompts::PromptCard;
use crate::companion::session::SessionOutcome;

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date")
}

pub(super) fn preferences(
    category: Option<Category>,
    reason: Option<Reason>,
    difficulty: Option<Difficulty>,
) -> Preferences {
    Preferences {
        category,
        reason,
        difficulty,
    }
}

pub(super) fn texts(cards: &[PromptCard]) -> Vec<&'static str> {
    cards.iter().map(|card| card.text).collect()
}

pub(super) fn draft(name: &str, met_at: &str) -> ContactDraft {
    ContactDraft {
        met_at: met_at.to_string(),
        ..ContactDraft::named(name)
    }
}

pub(super) fn outcome(contact_name: &str) -> SessionOutcome {
    SessionOutcome {
        goal: "Find a potential mentor".to_string(),
        commitment: "I will listen more than I talk".to_string(),
        reflection: "Asked better questions".to_string(),
        contact: draft(contact_name, "Product meetup"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}
