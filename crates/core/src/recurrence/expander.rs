use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::schedule::Occurrence;
use crate::recurrence::dates::days_inclusive;
use crate::recurrence::slots::{SlotDefinition, SlotTable};
use crate::recurrence::weekday::WeekdayFilter;

/// Expands a recurrence description into dated session occurrences.
///
/// Every date from `start_date` to `end_date` (inclusive) whose weekday is
/// named in `weekdays` yields one [`Occurrence`] per entry of `slots`, in the
/// order the slots were given. The output is sorted by date, then by slot
/// order.
///
/// The function never fails:
///
/// - `start_date > end_date`, no weekdays or no slots give an empty result
/// - unknown weekday names are ignored
/// - slot names missing from `table` are skipped
/// - a slot named twice is expanded once per mention
///
/// Start and end instants are the slot clocks read in the table's offset, so
/// displaying them back in that offset shows the configured wall-clock times.
pub fn expand_schedule<W, S>(
    start_date: NaiveDate,
    end_date: NaiveDate,
    weekdays: &[W],
    slots: &[S],
    table: &SlotTable,
) -> Vec<Occurrence>
where
    W: AsRef<str>,
    S: AsRef<str>,
{
    let filter = WeekdayFilter::from_names(weekdays);
    let windows = resolve_slots(slots, table);

    if filter.is_empty() || windows.is_empty() {
        return Vec::new();
    }

    days_inclusive(start_date, end_date)
        .filter(|day| filter.contains(day.weekday()))
        .flat_map(|day| {
            windows.iter().map(move |slot| Occurrence {
                date: day,
                start_time: table.instant_at(day, slot.start),
                end_time: table.instant_at(day, slot.end),
            })
        })
        .collect()
}

fn resolve_slots<'t, S>(slots: &[S], table: &'t SlotTable) -> Vec<&'t SlotDefinition>
where
    S: AsRef<str>,
{
    slots
        .iter()
        .map(|name| name.as_ref())
        .filter_map(|name| {
            let slot = table.get(name);
            if slot.is_none() {
                debug!("Skipping unknown slot '{}'", name);
            }
            slot
        })
        .collect()
}
