use chrono::NaiveDate;

use crate::errors::{SeanceError, SeanceResult};
use crate::models::schedule::Occurrence;
use crate::recurrence::dates::DateInput;
use crate::recurrence::expander::expand_schedule;
use crate::recurrence::slots::SlotTable;
use crate::recurrence::weekday::parse_weekday;

/// Longest date span a single schedule may cover, about five years.
pub const MAX_SCHEDULE_DAYS: i64 = 5 * 366;

/// A course's recurrence parameters, checked the way the course forms check
/// them before any schedule is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub week_days: Vec<String>,
    pub vacations: Vec<String>,
}

impl GenerationRequest {
    /// Validates the raw form values.
    ///
    /// Both dates are required, at least one weekday and one vacation must be
    /// chosen, and weekday names must be known. A start date after the end
    /// date is accepted and expands to nothing.
    ///
    /// Vacations missing from `table` are kept and skipped at expansion, so a
    /// course that still names a retired slot can be regenerated. The request
    /// is only rejected when none of its vacations is configured.
    pub fn validated(
        start_date: Option<DateInput>,
        end_date: Option<DateInput>,
        week_days: &[String],
        vacations: &[String],
        table: &SlotTable,
    ) -> SeanceResult<Self> {
        let (start_date, end_date) = match (start_date, end_date) {
            (Some(start), Some(end)) => (start.date(), end.date()),
            _ => {
                return Err(SeanceError::Validation(
                    "Start and end dates are required to generate a schedule".to_string(),
                ));
            }
        };

        if (end_date - start_date).num_days() >= MAX_SCHEDULE_DAYS {
            return Err(SeanceError::Validation(format!(
                "A schedule may span at most {} days ({} to {})",
                MAX_SCHEDULE_DAYS, start_date, end_date
            )));
        }

        if week_days.is_empty() {
            return Err(SeanceError::Validation(
                "At least one weekday must be selected".to_string(),
            ));
        }

        if vacations.is_empty() {
            return Err(SeanceError::Validation(
                "At least one vacation must be selected".to_string(),
            ));
        }

        if let Some(unknown) = week_days.iter().find(|day| parse_weekday(day).is_none()) {
            return Err(SeanceError::Validation(format!("Unknown weekday '{}'", unknown)));
        }

        if !vacations.iter().any(|slot| table.contains(slot)) {
            return Err(SeanceError::Validation(format!(
                "None of the vacations {} is configured",
                vacations.join(", ")
            )));
        }

        Ok(Self {
            start_date,
            end_date,
            week_days: week_days.to_vec(),
            vacations: vacations.to_vec(),
        })
    }

    /// Whether the form values describe a schedule at all, i.e. every field
    /// needed for generation was filled in.
    pub fn is_complete(
        start_date: Option<&DateInput>,
        end_date: Option<&DateInput>,
        week_days: &[String],
        vacations: &[String],
    ) -> bool {
        start_date.is_some()
            && end_date.is_some()
            && !week_days.is_empty()
            && !vacations.is_empty()
    }

    pub fn expand(&self, table: &SlotTable) -> Vec<Occurrence> {
        expand_schedule(
            self.start_date,
            self.end_date,
            &self.week_days,
            &self.vacations,
            table,
        )
    }
}
