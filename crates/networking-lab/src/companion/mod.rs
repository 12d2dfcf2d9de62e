//! Networking companion: setup preferences, personalised prompt cards, the
//! before/during/after session flow, and the locally stored contact book.

pub mod contacts;
pub mod content;
pub mod personalisation;
pub mod preferences;
pub mod prompts;
pub mod router;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use contacts::{Contact, ContactBook, ContactDraft, ContactError, ContactUpdate};
pub use content::{render_template, FollowUpTemplate, IntroDraft};
pub use personalisation::{
    needs_confidence_prep, ordered_routes, primary_route, Route, RouteInfo, SessionFocus, Tone,
};
pub use preferences::{Category, Difficulty, Preferences, Reason, UnknownPreference};
pub use prompts::{build_personalised_cards, reset_message, PromptCard, PromptKind};
pub use router::companion_router;
pub use session::{SessionOutcome, SessionPlan, SessionRecord, SessionStep};
pub use store::{
    CompanionState, CompanionStore, CompanionStoreError, Intros, IntrosUpdate, COMPANION_FILE,
};
