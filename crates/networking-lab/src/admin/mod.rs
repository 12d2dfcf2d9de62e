//! Admin dashboard backend: signed session cookie, lead analytics over a
//! time window, and JSON/CSV exports.

pub mod analytics;
pub mod export;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use analytics::{
    Conversion, DailyCount, DashboardSummary, DashboardTotals, OptionBreakdown, PersonaCount,
    StepCount, TimeRange, UnknownTimeRange, INTEREST_LEVELS,
};
pub use export::{render_export, ExportError, ExportFile, ExportFormat, ExportKind};
pub use router::admin_router;
pub use service::{AdminError, AdminService};
pub use session::{
    clear_session_cookies, cookie_value, AdminCredentials, AdminSessionSigner, SessionClaims,
    SessionError, SESSION_COOKIE, SESSION_MAX_AGE_SECS,
};
