use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::api::DailyCompletionClient;
use crate::models::{CompletionPercentage, DailyHabitInstance};
use crate::store::ProgressStore;
use crate::views::pending::{Mounted, PendingLock};

/// Line under the date heading on the daily screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtitle {
    Loading,
    NoHabits,
    NoneCompleted,
    Completed(CompletionPercentage),
    LoadFailed,
}

impl Subtitle {
    pub fn for_instances(instances: &[DailyHabitInstance]) -> Self {
        match CompletionPercentage::of(instances) {
            None => Subtitle::NoHabits,
            Some(_) if !instances.iter().any(|h| h.done) => Subtitle::NoneCompleted,
            Some(pct) => Subtitle::Completed(pct),
        }
    }

    /// Drawn in the accent colour once anything is done.
    pub fn is_highlighted(&self) -> bool {
        matches!(self, Subtitle::Completed(_))
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subtitle::Loading => f.write_str("Loading habits..."),
            Subtitle::NoHabits => f.write_str("No habits for today"),
            Subtitle::NoneCompleted => f.write_str("None completed yet"),
            Subtitle::Completed(pct) => write!(f, "{pct} completed"),
            Subtitle::LoadFailed => f.write_str("Couldn't load habits :/"),
        }
    }
}

/// "Monday, 19/10"
pub fn heading(date: NaiveDate) -> String {
    date.format("%A, %d/%m").to_string()
}

/// Display state of one habit card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Unmarked,
    Pending,
    Marked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Another toggle is still settling.
    Busy,
    /// No such habit on today's list.
    Unknown,
    /// Resync succeeded; `done` is the server's value afterwards.
    Settled { done: bool },
    /// Resync failed; the card keeps its pre-toggle state.
    ResyncFailed,
    /// The response arrived after the screen was left.
    Detached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayState {
    pub habits: Vec<DailyHabitInstance>,
    pub subtitle: Subtitle,
    pub toggling: Option<i64>,
}

impl TodayState {
    pub fn instance_state(&self, habit_id: i64) -> Option<InstanceState> {
        let habit = self.habits.iter().find(|h| h.id == habit_id)?;
        Some(if self.toggling == Some(habit_id) {
            InstanceState::Pending
        } else if habit.done {
            InstanceState::Marked
        } else {
            InstanceState::Unmarked
        })
    }

    /// Every toggle control is disabled while one toggle is in flight.
    pub fn controls_disabled(&self) -> bool {
        self.toggling.is_some()
    }
}

impl Default for TodayState {
    fn default() -> Self {
        Self {
            habits: Vec::new(),
            subtitle: Subtitle::Loading,
            toggling: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TodayView {
    daily: DailyCompletionClient,
    progress: ProgressStore,
    state: Arc<Mutex<TodayState>>,
    pending: PendingLock,
    mounted: Mounted,
}

impl TodayView {
    pub fn new(daily: DailyCompletionClient, progress: ProgressStore) -> Self {
        let mounted = Mounted::default();
        Self {
            daily,
            progress,
            state: Arc::new(Mutex::new(TodayState::default())),
            pending: PendingLock::for_view(mounted.clone()),
            mounted,
        }
    }

    /// Starts a new visit. A toggle left over from an earlier visit neither
    /// locks the controls nor shows as pending.
    pub async fn enter(&self) -> bool {
        self.mounted.mount();
        self.state.lock().await.toggling = None;
        self.refresh().await
    }

    pub fn leave(&self) {
        self.mounted.unmount();
    }

    /// Fetches today's list and, if the same visit is still on screen,
    /// replaces the cards, the subtitle and the shared percentage.
    pub async fn refresh(&self) -> bool {
        let visit = self.mounted.current();
        let result = self.daily.list_today().await;
        if !self.mounted.is_current(visit) {
            return false;
        }
        let mut state = self.state.lock().await;
        match result {
            Ok(habits) => {
                state.subtitle = Subtitle::for_instances(&habits);
                self.progress.set(CompletionPercentage::of(&habits));
                state.habits = habits;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load today's habits");
                state.subtitle = Subtitle::LoadFailed;
                false
            }
        }
    }

    /// Flips one habit's done flag on the server, then resyncs the whole list.
    /// The toggle lock is held until the resync settles.
    pub async fn toggle(&self, habit_id: i64) -> ToggleOutcome {
        let Some(guard) = self.pending.try_acquire() else {
            return ToggleOutcome::Busy;
        };
        let visit = guard.visit();
        let target = {
            let mut state = self.state.lock().await;
            let Some(target) = state.habits.iter().find(|h| h.id == habit_id).cloned() else {
                return ToggleOutcome::Unknown;
            };
            state.toggling = Some(habit_id);
            target
        };

        if let Err(e) = self.daily.toggle(&target).await {
            tracing::warn!(error = %e, habit_id, "Toggle request failed");
        }

        let resynced = self.mounted.is_current(visit) && self.refresh().await;
        let mut state = self.state.lock().await;
        drop(guard);

        if !self.mounted.is_current(visit) {
            // A newer visit owns the cards now; only tidy up if none is up.
            if !self.mounted.is_live() {
                state.toggling = None;
            }
            tracing::debug!(habit_id, "Dropping toggle result for a left view");
            return ToggleOutcome::Detached;
        }
        state.toggling = None;
        if !resynced {
            return ToggleOutcome::ResyncFailed;
        }
        match state.habits.iter().find(|h| h.id == habit_id) {
            Some(habit) => ToggleOutcome::Settled { done: habit.done },
            None => ToggleOutcome::Unknown,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    pub async fn state(&self) -> TodayState {
        self.state.lock().await.clone()
    }
}
