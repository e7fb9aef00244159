//! Resolution of list filters into concrete date ranges.
//!
//! A period token (`week`, `month`, `threeMonths`, `custom`) is turned into a
//! [`DateRange`] anchored at a single `now` instant. Nothing here fails: a
//! custom period with missing or unreadable bounds, an empty token and an
//! unknown token all resolve to the unbounded range.

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, Utc};
use shared::ExpenseListQuery;
use std::sync::Arc;

use crate::domain::validation::evaluators::matches_layout_shape;

/// Canonical wire format of calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    None,
    Week,
    Month,
    ThreeMonths,
    Custom,
    Unrecognized(String),
}

impl Period {
    pub fn parse(token: &str) -> Self {
        match token {
            "" => Period::None,
            "week" => Period::Week,
            "month" => Period::Month,
            "threeMonths" | "3months" => Period::ThreeMonths,
            "custom" => Period::Custom,
            other => Period::Unrecognized(other.to_string()),
        }
    }
}

/// A list filter as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub period: Period,
    pub explicit_start: Option<String>,
    pub explicit_end: Option<String>,
    /// Passed through to storage untouched
    pub category: Option<String>,
}

impl From<&ExpenseListQuery> for FilterSpec {
    fn from(query: &ExpenseListQuery) -> Self {
        Self {
            period: Period::parse(&query.period),
            explicit_start: query.start_date.clone(),
            explicit_end: query.end_date.clone(),
            category: query.category.clone().filter(|c| !c.is_empty()),
        }
    }
}

/// Inclusive range of instants; an absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if !matches_layout_shape(value, "YYYY-MM-DD") {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Step `months` calendar months back, keeping the day of month and time of
/// day. A day past the end of the target month rolls over into the following
/// month: March 31 minus one month is March 2 in a leap year.
fn months_before(now: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    let first_of_month = now.date_naive().with_day(1)?;
    let target_month = first_of_month.checked_sub_months(Months::new(months))?;
    let date = target_month.checked_add_days(Days::new(u64::from(now.day0())))?;
    Some(date.and_time(now.time()).and_utc())
}

/// Resolve `spec` against the given `now`.
pub fn resolve(spec: &FilterSpec, now: DateTime<Utc>) -> DateRange {
    let trailing = |start: Option<DateTime<Utc>>| DateRange { start, end: Some(now) };

    match &spec.period {
        Period::Week => trailing(now.checked_sub_signed(Duration::days(7))),
        Period::Month => trailing(months_before(now, 1)),
        Period::ThreeMonths => trailing(months_before(now, 3)),
        Period::Custom => {
            let start = spec.explicit_start.as_deref().and_then(parse_date);
            let end = spec.explicit_end.as_deref().and_then(parse_date);
            match (start, end) {
                (Some(start), Some(end)) => DateRange::between(start, end),
                _ => DateRange::unbounded(),
            }
        }
        Period::None | Period::Unrecognized(_) => DateRange::unbounded(),
    }
}

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Resolves filters against an injected clock, reading it once per call.
#[derive(Clone)]
pub struct PeriodResolver {
    clock: Arc<dyn Clock>,
}

impl PeriodResolver {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn resolve(&self, spec: &FilterSpec) -> DateRange {
        let now = self.clock.now();
        resolve(spec, now)
    }
}

impl Default for PeriodResolver {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
