use chrono::Weekday;

/// Weekday names accepted from course forms, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
];

const WEEKDAY_LABELS: [&str; 7] = [
    "Dimanche", "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi",
];

/// Parses a weekday name such as `"lundi"`.
///
/// Matching ignores case and surrounding whitespace. Returns `None` for
/// anything outside the closed set of names.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim().to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .and_then(|index| Weekday::try_from(((index + 6) % 7) as u8).ok())
}

/// The form name of a weekday, e.g. `Weekday::Mon` -> `"lundi"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

/// Capitalised display name, e.g. `Weekday::Mon` -> `"Lundi"`.
pub fn weekday_label(day: Weekday) -> &'static str {
    WEEKDAY_LABELS[day.num_days_from_sunday() as usize]
}

/// Set of weekdays on which a recurring course meets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdayFilter(u8);

impl WeekdayFilter {
    pub fn new() -> Self {
        Self(0)
    }

    /// Builds a filter from weekday names. Unknown names are ignored.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| parse_weekday(name.as_ref()))
            .collect()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_sunday();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
}

impl FromIterator<Weekday> for WeekdayFilter {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut filter = Self::new();
        for day in iter {
            filter.insert(day);
        }
        filter
    }
}
