use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::recurrence::{DateInput, weekday_label};

/// One dated session produced by expanding a course's recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Occurrence {
    /// Renders the occurrence on the wall clock of `offset`.
    pub fn display(&self, offset: FixedOffset) -> OccurrenceDisplay {
        OccurrenceDisplay::new(self.date, self.start_time, self.end_time, offset)
    }
}

/// Human-facing rendering of a session: `04/03/2024`, `06:00`, `08:30`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceDisplay {
    pub day: String,
    pub date: String,
    pub start: String,
    pub end: String,
}

impl OccurrenceDisplay {
    pub fn new(
        date: NaiveDate,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            day: weekday_label(date.weekday()).to_string(),
            date: date.format("%d/%m/%Y").to_string(),
            start: start_time.with_timezone(&offset).format("%H:%M").to_string(),
            end: end_time.with_timezone(&offset).format("%H:%M").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewScheduleRequest {
    pub start_date: DateInput,
    pub end_date: DateInput,
    #[serde(default)]
    pub week_days: Vec<String>,
    #[serde(default)]
    pub vacations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewScheduleResponse {
    pub count: usize,
    pub occurrences: Vec<OccurrenceResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrenceResponse {
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub display: OccurrenceDisplay,
}

impl OccurrenceResponse {
    pub fn new(occurrence: Occurrence, offset: FixedOffset) -> Self {
        Self {
            date: occurrence.date,
            start_time: occurrence.start_time,
            end_time: occurrence.end_time,
            display: occurrence.display(offset),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotResponse {
    pub name: String,
    pub label: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotTableResponse {
    pub utc_offset: String,
    pub slots: Vec<SlotResponse>,
}
