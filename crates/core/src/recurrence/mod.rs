//! # Recurrence
//!
//! Expansion of a course's recurrence description (date range, weekdays and
//! named time-of-day slots) into concrete [`Occurrence`]s.
//!
//! Slot clocks are configured as the wall-clock times the sessions are meant
//! to show in the operating timezone. The [`SlotTable`] carries that
//! timezone's fixed offset, so the conversion from wall clock to stored
//! instant and back happens in one place.

pub mod dates;
pub mod expander;
pub mod request;
pub mod slots;
pub mod weekday;

pub use dates::{DateInput, normalize_date};
pub use expander::expand_schedule;
pub use request::{GenerationRequest, MAX_SCHEDULE_DAYS};
pub use slots::{SlotDefinition, SlotTable, parse_offset};
pub use weekday::{WeekdayFilter, parse_weekday, weekday_label, weekday_name};

pub use crate::models::schedule::Occurrence;
