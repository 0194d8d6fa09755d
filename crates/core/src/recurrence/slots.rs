use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{SeanceError, SeanceResult};

/// Offset of the operating timezone from UTC (Kinshasa, UTC+1).
pub const DEFAULT_OFFSET_SECONDS: i32 = 3600;

/// A named time-of-day window, with clocks in the operating timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefinition {
    pub name: String,
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SlotDefinition {
    pub fn new(name: &str, start: NaiveTime, end: NaiveTime) -> SeanceResult<Self> {
        let name = name.trim();
        let label = format!("{} ({} - {})", name, start.format("%Hh%M"), end.format("%Hh%M"));
        Self::with_label(name, &label, start, end)
    }

    pub fn with_label(
        name: &str,
        label: &str,
        start: NaiveTime,
        end: NaiveTime,
    ) -> SeanceResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SeanceError::Configuration(
                "Slot name must not be empty".to_string(),
            ));
        }
        if start >= end {
            return Err(SeanceError::Configuration(format!(
                "Slot '{}' must start before it ends ({} >= {})",
                name,
                start.format("%H:%M"),
                end.format("%H:%M")
            )));
        }

        Ok(Self {
            name: name.to_string(),
            label: label.trim().to_string(),
            start,
            end,
        })
    }
}

/// Ordered table of slot definitions plus the fixed offset their clocks are
/// expressed in.
///
/// The same offset converts a slot clock into the instant that gets stored
/// and converts a stored instant back into the clock shown to users. DST is
/// not modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTable {
    offset: FixedOffset,
    slots: Vec<SlotDefinition>,
}

impl SlotTable {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            slots: Vec::new(),
        }
    }

    /// Appends a slot. Names must be unique within the table.
    pub fn insert(&mut self, slot: SlotDefinition) -> SeanceResult<()> {
        if self.get(&slot.name).is_some() {
            return Err(SeanceError::Configuration(format!(
                "Slot '{}' is defined twice",
                slot.name
            )));
        }
        self.slots.push(slot);
        Ok(())
    }

    pub fn with_slot(mut self, slot: SlotDefinition) -> SeanceResult<Self> {
        self.insert(slot)?;
        Ok(self)
    }

    /// Parses a table such as
    /// `avant-midi=06:00-08:30|Avant-midi;apres-midi=16:30-19:00`.
    ///
    /// Entries are separated by `;`. The `|label` part is optional.
    pub fn parse(offset: FixedOffset, raw: &str) -> SeanceResult<Self> {
        let mut table = Self::new(offset);

        for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (definition, label) = match entry.split_once('|') {
                Some((definition, label)) => (definition, Some(label)),
                None => (entry, None),
            };
            let (name, window) = definition.split_once('=').ok_or_else(|| {
                SeanceError::Configuration(format!("Slot entry '{}' is missing '='", entry))
            })?;
            let (start, end) = window.split_once('-').ok_or_else(|| {
                SeanceError::Configuration(format!(
                    "Slot entry '{}' must look like name=HH:MM-HH:MM",
                    entry
                ))
            })?;
            let start = parse_clock(start)?;
            let end = parse_clock(end)?;

            let slot = match label {
                Some(label) => SlotDefinition::with_label(name, label, start, end)?,
                None => SlotDefinition::new(name, start, end)?,
            };
            table.insert(slot)?;
        }

        if table.slots.is_empty() {
            return Err(SeanceError::Configuration(
                "Slot table must define at least one slot".to_string(),
            ));
        }

        Ok(table)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn get(&self, name: &str) -> Option<&SlotDefinition> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotDefinition> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The instant at which the wall clock in this table's offset reads
    /// `clock` on `date`.
    pub fn instant_at(&self, date: NaiveDate, clock: NaiveTime) -> DateTime<Utc> {
        let local = date.and_time(clock);
        let offset = Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&(local - offset))
    }

    /// Shows a stored instant on the wall clock of this table's offset.
    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }
}

impl Default for SlotTable {
    /// The sessions offered by the school: early morning, late afternoon and
    /// the Saturday practical, in UTC+1.
    fn default() -> Self {
        let offset = FixedOffset::east_opt(DEFAULT_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix());
        let defaults = [
            ("avant-midi", "Avant-midi (06h00 - 08h30)", (6, 0), (8, 30)),
            ("apres-midi", "Après-midi (16h30 - 19h00)", (16, 30), (19, 0)),
            ("samedi", "Séance pratique Samedi (08h00 - 10h30)", (8, 0), (10, 30)),
        ];

        let slots = defaults
            .into_iter()
            .filter_map(|(name, label, (sh, sm), (eh, em))| {
                let start = NaiveTime::from_hms_opt(sh, sm, 0)?;
                let end = NaiveTime::from_hms_opt(eh, em, 0)?;
                SlotDefinition::with_label(name, label, start, end).ok()
            })
            .collect();

        Self { offset, slots }
    }
}

/// Parses `+01:00`, `-05:30`, `UTC` or `Z`.
pub fn parse_offset(value: &str) -> SeanceResult<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("utc") || value == "Z" {
        return Ok(Utc.fix());
    }

    value.parse::<FixedOffset>().map_err(|e| {
        SeanceError::Configuration(format!("Invalid UTC offset '{}': {}", value, e))
    })
}

fn parse_clock(value: &str) -> SeanceResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|e| {
        SeanceError::Configuration(format!("Invalid clock time '{}': {}", value.trim(), e))
    })
}
