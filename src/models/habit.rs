use std::collections::BTreeSet;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

/// Single-letter labels for the weekday picker, Sunday first.
pub const WEEKDAY_LABELS: [char; 7] = ['S', 'M', 'T', 'W', 'T', 'F', 'S'];

/// Active days of a habit as integers 0-6, Sunday = 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Weekdays(BTreeSet<u8>);

impl Weekdays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `day` in or out of the set and reports whether it is now
    /// selected. Days outside 0-6 are ignored.
    pub fn toggle(&mut self, day: u8) -> bool {
        if day > 6 {
            return false;
        }
        if !self.0.remove(&day) {
            self.0.insert(day);
            return true;
        }
        false
    }

    pub fn contains(&self, day: u8) -> bool {
        self.0.contains(&day)
    }

    pub fn contains_weekday(&self, day: Weekday) -> bool {
        self.contains(day.num_days_from_sunday() as u8)
    }

    pub fn includes_date(&self, date: impl Datelike) -> bool {
        self.contains_weekday(date.weekday())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// The seven picker slots with their selection state.
    pub fn slots(&self) -> [(char, bool); 7] {
        let mut slots = [(' ', false); 7];
        for (i, label) in WEEKDAY_LABELS.iter().enumerate() {
            slots[i] = (*label, self.contains(i as u8));
        }
        slots
    }

    /// Compact text rendering: selected days upper-case, the rest as dots.
    pub fn render(&self) -> String {
        self.slots()
            .iter()
            .map(|(label, on)| if *on { *label } else { '.' })
            .collect()
    }
}

impl TryFrom<Vec<u8>> for Weekdays {
    type Error = String;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        if let Some(bad) = days.iter().find(|d| **d > 6) {
            return Err(format!("weekday out of range: {bad}"));
        }
        Ok(Self(days.into_iter().collect()))
    }
}

impl From<Weekdays> for Vec<u8> {
    fn from(days: Weekdays) -> Self {
        days.0.into_iter().collect()
    }
}

impl FromIterator<u8> for Weekdays {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|d| *d <= 6).collect())
    }
}

/// GET /habits entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDefinition {
    pub id: i64,
    pub name: String,
    #[serde(rename = "days")]
    pub weekdays: Weekdays,
}

/// Contents of the create-habit panel; also the POST /habits body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HabitDraft {
    pub name: String,
    #[serde(rename = "days")]
    pub weekdays: Weekdays,
}

impl HabitDraft {
    pub fn new(name: impl Into<String>, weekdays: Weekdays) -> Self {
        Self {
            name: name.into(),
            weekdays,
        }
    }

    /// Drafts with no name or no day are never sent.
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.weekdays.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.weekdays = Weekdays::new();
    }
}
