use std::fmt;

use serde::{Deserialize, Serialize};

/// GET /habits/today entry. Streak counters are computed server-side and
/// taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyHabitInstance {
    pub id: i64,
    pub name: String,
    pub done: bool,
    pub current_sequence: u32,
    pub highest_sequence: u32,
}

impl DailyHabitInstance {
    /// Done today and the running streak is the best one so far.
    pub fn is_personal_best(&self) -> bool {
        self.done && self.current_sequence == self.highest_sequence
    }
}

/// "1 day" / "N days"
pub fn days_label(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

/// Share of today's habits marked done, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompletionPercentage(u8);

impl CompletionPercentage {
    /// `round(done * 100 / total)`, halves rounded up. `None` when there is
    /// nothing scheduled today.
    pub fn from_counts(done: usize, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        let done = done.min(total);
        let pct = (done * 200 + total) / (total * 2);
        Some(Self(pct as u8))
    }

    pub fn of(instances: &[DailyHabitInstance]) -> Option<Self> {
        let done = instances.iter().filter(|h| h.done).count();
        Self::from_counts(done, instances.len())
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CompletionPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
