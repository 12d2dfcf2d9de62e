use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::leads::{format_timestamp, parse_timestamp, LeadSnapshot, SubmissionRecord};
use crate::quiz::{PersonaKey, PersonaProfile, QuestionCatalog};

/// Interest levels offered by the validation modal, in display order.
pub const INTEREST_LEVELS: [(&str, &str); 4] = [
    ("not_interested", "Not interested"),
    ("curious", "Curious"),
    ("would_try", "I would try it"),
    ("want_this", "I want this"),
];

const RECENT_SUBMISSIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    LastHour,
    #[serde(rename = "24h")]
    LastDay,
    #[serde(rename = "7d")]
    LastWeek,
    #[serde(rename = "30d")]
    LastMonth,
    #[default]
    #[serde(rename = "all")]
    AllTime,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::LastHour,
        TimeRange::LastDay,
        TimeRange::LastWeek,
        TimeRange::LastMonth,
        TimeRange::AllTime,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TimeRange::LastHour => "1h",
            TimeRange::LastDay => "24h",
            TimeRange::LastWeek => "7d",
            TimeRange::LastMonth => "30d",
            TimeRange::AllTime => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::LastHour => "Last hour",
            TimeRange::LastDay => "Last 24 hours",
            TimeRange::LastWeek => "Last 7 days",
            TimeRange::LastMonth => "Last 30 days",
            TimeRange::AllTime => "All time",
        }
    }

    /// Inclusive lower bound, `None` for all time.
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let window = match self {
            TimeRange::LastHour => Duration::hours(1),
            TimeRange::LastDay => Duration::hours(24),
            TimeRange::LastWeek => Duration::days(7),
            TimeRange::LastMonth => Duration::days(30),
            TimeRange::AllTime => return None,
        };
        Some(now - window)
    }

    fn admits(&self, start: Option<DateTime<Utc>>, at: Option<DateTime<Utc>>) -> bool {
        match (start, at) {
            (None, _) => true,
            (Some(start), Some(at)) => at >= start,
            (Some(_), None) => false,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time range '{0}'; use 1h, 24h, 7d, 30d or all")]
pub struct UnknownTimeRange(pub String);

impl FromStr for TimeRange {
    type Err = UnknownTimeRange;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.key() == value.trim())
            .ok_or_else(|| UnknownTimeRange(value.to_string()))
    }
}

/// Headline numbers for the selected window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    pub submissions: usize,
    pub interest: usize,
    pub sessions: usize,
    pub completed_sessions: usize,
    /// Rounded percentage; 0 when no sessions started.
    pub completion_rate: u32,
    pub unique_personas: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaCount {
    pub persona: PersonaKey,
    pub title: &'static str,
    pub count: usize,
}

/// Count for one answer option or interest level, with a per-persona split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionBreakdown {
    pub id: String,
    pub label: String,
    pub count: usize,
    pub by_persona: BTreeMap<PersonaKey, usize>,
}

impl OptionBreakdown {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            count: 0,
            by_persona: PersonaKey::ALL.into_iter().map(|key| (key, 0)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepCount {
    pub step: u32,
    pub sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub interest_count: usize,
    pub submission_count: usize,
    /// Rounded percentage; `None` when nobody registered interest.
    pub rate: Option<u32>,
}

/// Aggregated admin dashboard view over one time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub range: TimeRange,
    pub totals: DashboardTotals,
    pub last_activity: Option<String>,
    pub is_empty: bool,
    pub persona_counts: Vec<PersonaCount>,
    pub interest_levels: Vec<OptionBreakdown>,
    pub stages: Vec<OptionBreakdown>,
    pub event_frequency: Vec<OptionBreakdown>,
    pub improvement_goals: Vec<OptionBreakdown>,
    pub step_dropoff: Vec<StepCount>,
    /// persona -> interest level -> count, from submissions and sessions.
    pub persona_interest: BTreeMap<String, BTreeMap<String, usize>>,
    pub conversion: Conversion,
    pub submissions_per_day: Vec<DailyCount>,
    pub recent_submissions: Vec<SubmissionRecord>,
}

/// Tallies values against a fixed option list; values outside the list are
/// dropped.
struct Tally {
    rows: Vec<OptionBreakdown>,
}

impl Tally {
    fn from_options(options: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            rows: options
                .into_iter()
                .map(|(id, label)| OptionBreakdown::new(&id, &label))
                .collect(),
        }
    }

    fn row(&mut self, value: &str) -> Option<&mut OptionBreakdown> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        self.rows.iter_mut().find(|row| row.id == value)
    }

    fn count(&mut self, value: &str) {
        if let Some(row) = self.row(value) {
            row.count += 1;
        }
    }

    fn split(&mut self, value: &str, persona: Option<PersonaKey>) {
        if let (Some(persona), Some(row)) = (persona, self.row(value)) {
            if let Some(slot) = row.by_persona.get_mut(&persona) {
                *slot += 1;
            }
        }
    }

    fn record(&mut self, value: &str, persona: Option<PersonaKey>) {
        self.count(value);
        self.split(value, persona);
    }

    fn finish(self) -> Vec<OptionBreakdown> {
        self.rows
    }
}

fn percentage(part: usize, whole: usize) -> u32 {
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

fn comma_separated(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl DashboardSummary {
    pub fn build(
        snapshot: &LeadSnapshot,
        range: TimeRange,
        now: DateTime<Utc>,
        catalog: &QuestionCatalog,
    ) -> Self {
        let start = range.start(now);
        let submissions: Vec<_> = snapshot
            .submissions
            .iter()
            .filter(|record| range.admits(start, record.created_at_utc()))
            .collect();
        let interest: Vec<_> = snapshot
            .interest
            .iter()
            .filter(|record| range.admits(start, record.created_at_utc()))
            .collect();
        let sessions: Vec<_> = snapshot
            .sessions
            .iter()
            .filter(|record| range.admits(start, record.started_at_utc()))
            .collect();

        let completed_sessions = sessions.iter().filter(|session| session.completed).count();
        let completion_rate = if sessions.is_empty() {
            0
        } else {
            percentage(completed_sessions, sessions.len())
        };

        let unique_personas = submissions
            .iter()
            .filter_map(|record| record.persona.as_deref())
            .chain(sessions.iter().filter_map(|record| record.persona.as_deref()))
            .filter(|persona| !persona.is_empty())
            .collect::<BTreeSet<_>>()
            .len();

        let mut persona_totals: BTreeMap<PersonaKey, usize> = BTreeMap::new();
        for persona in submissions
            .iter()
            .filter_map(|record| record.persona_key())
            .chain(sessions.iter().filter_map(|record| record.persona_key()))
        {
            *persona_totals.entry(persona).or_default() += 1;
        }
        let persona_counts = PersonaProfile::all()
            .map(|(persona, profile)| PersonaCount {
                persona,
                title: profile.title,
                count: persona_totals.get(&persona).copied().unwrap_or(0),
            })
            .collect();

        let mut interest_levels = Tally::from_options(
            INTEREST_LEVELS
                .iter()
                .map(|(id, label)| (id.to_string(), label.to_string())),
        );
        for record in &interest {
            let level = record.interest_level.as_deref().unwrap_or_default();
            interest_levels.record(level, record.persona_key());
        }
        for record in &submissions {
            let level = record.interest_level.as_deref().unwrap_or_default();
            interest_levels.split(level, record.persona_key());
        }
        for record in &sessions {
            let level = record.interest_level.as_deref().unwrap_or_default();
            interest_levels.split(level, record.persona_key());
        }

        let mut stages = Tally::from_options(catalog.option_labels("stage"));
        let mut event_frequency = Tally::from_options(catalog.option_labels("event_frequency"));
        let mut improvement_goals = Tally::from_options(catalog.option_labels("improvement_goal"));
        for record in &submissions {
            let persona = record.persona_key();
            for stage in comma_separated(record.stage.as_deref()) {
                stages.record(stage, persona);
            }
            event_frequency.record(
                record.event_frequency.as_deref().unwrap_or_default(),
                persona,
            );
            for goal in comma_separated(record.improvement_goal.as_deref()) {
                improvement_goals.record(goal, persona);
            }
        }
        for record in &sessions {
            let persona = record.persona_key();
            for stage in record.answers.selected("stage") {
                stages.record(stage, persona);
            }
            if let Some(frequency) = record.answers.selected("event_frequency").first() {
                event_frequency.record(frequency, persona);
            }
            for goal in record.answers.selected("improvement_goal") {
                improvement_goals.record(goal, persona);
            }
        }

        let mut steps: BTreeMap<u32, usize> = BTreeMap::new();
        for session in &sessions {
            *steps.entry(session.current_step).or_default() += 1;
        }
        let step_dropoff = steps
            .into_iter()
            .map(|(step, sessions)| StepCount { step, sessions })
            .collect();

        let mut persona_interest: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        let pairs = submissions
            .iter()
            .map(|record| (record.persona.as_deref(), record.interest_level.as_deref()))
            .chain(
                sessions
                    .iter()
                    .map(|record| (record.persona.as_deref(), record.interest_level.as_deref())),
            );
        for (persona, level) in pairs {
            if let (Some(persona), Some(level)) = (persona, level) {
                if persona.is_empty() || level.is_empty() {
                    continue;
                }
                *persona_interest
                    .entry(persona.to_string())
                    .or_default()
                    .entry(level.to_string())
                    .or_default() += 1;
            }
        }

        let conversion = Conversion {
            interest_count: interest.len(),
            submission_count: submissions.len(),
            rate: (!interest.is_empty()).then(|| percentage(submissions.len(), interest.len())),
        };

        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for at in submissions.iter().filter_map(|record| record.created_at_utc()) {
            *per_day.entry(at.date_naive()).or_default() += 1;
        }
        let submissions_per_day = per_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect();

        let mut dated: Vec<_> = submissions
            .iter()
            .filter_map(|record| record.created_at_utc().map(|at| (at, *record)))
            .collect();
        dated.sort_by(|(left, _), (right, _)| right.cmp(left));
        let recent_submissions = dated
            .into_iter()
            .take(RECENT_SUBMISSIONS)
            .map(|(_, record)| record.clone())
            .collect();

        let last_activity = submissions
            .iter()
            .filter_map(|record| record.created_at_utc())
            .chain(
                sessions
                    .iter()
                    .filter_map(|record| parse_timestamp(&record.updated_at)),
            )
            .chain(interest.iter().filter_map(|record| record.created_at_utc()))
            .max()
            .map(format_timestamp);

        Self {
            range,
            totals: DashboardTotals {
                submissions: submissions.len(),
                interest: interest.len(),
                sessions: sessions.len(),
                completed_sessions,
                completion_rate,
                unique_personas,
            },
            last_activity,
            is_empty: submissions.is_empty() && sessions.is_empty() && interest.is_empty(),
            persona_counts,
            interest_levels: interest_levels.finish(),
            stages: stages.finish(),
            event_frequency: event_frequency.finish(),
            improvement_goals: improvement_goals.finish(),
            step_dropoff,
            persona_interest,
            conversion,
            submissions_per_day,
            recent_submissions,
        }
    }
}
