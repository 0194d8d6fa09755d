use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Reduces an instant to the calendar date it names.
///
/// Dates coming from forms are midnight UTC timestamps, so the UTC calendar
/// components are the intended day. Re-reading them in a local offset west
/// of UTC would land on the previous day.
pub fn normalize_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// A calendar date as accepted over the wire: either `YYYY-MM-DD` or a full
/// RFC 3339 timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl DateInput {
    /// The pure calendar date, with any time-of-day component dropped.
    pub fn date(&self) -> NaiveDate {
        match self {
            DateInput::Date(date) => *date,
            DateInput::Timestamp(instant) => normalize_date(*instant),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

/// Every calendar date from `start` to `end`, both inclusive.
///
/// Empty when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}
