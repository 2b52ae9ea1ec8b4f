use std::sync::Arc;

use tokio::sync::Mutex;

use crate::api::HabitCatalogClient;
use crate::models::{HabitDefinition, HabitDraft};
use crate::views::pending::{Mounted, PendingLock};

pub const EMPTY_CATALOG: &str = "You don't have any habits yet. Add a habit to start tracking!";
pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this habit? (this action cannot be undone!)";
pub const RETRY_PROMPT: &str = "Error. Please try again!";

/// Result of a create or delete attempt on the habits screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// Draft had no name or no weekday; nothing was sent.
    Skipped,
    /// The user did not confirm the delete.
    Declined,
    /// Another mutation is still in flight.
    Busy,
    Failed,
    /// The response arrived after the screen was left.
    Detached,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitsState {
    pub habits: Vec<HabitDefinition>,
    pub draft: HabitDraft,
    pub form_open: bool,
    pub notice: Option<&'static str>,
    pub disabled: bool,
}

impl HabitsState {
    /// Text shown in place of the list when there is nothing to show.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.habits.is_empty().then_some(EMPTY_CATALOG)
    }
}

#[derive(Debug, Default)]
struct Inner {
    habits: Vec<HabitDefinition>,
    draft: HabitDraft,
    form_open: bool,
    notice: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct HabitsView {
    catalog: HabitCatalogClient,
    inner: Arc<Mutex<Inner>>,
    pending: PendingLock,
    mounted: Mounted,
}

impl HabitsView {
    pub fn new(catalog: HabitCatalogClient) -> Self {
        let mounted = Mounted::default();
        Self {
            catalog,
            inner: Arc::new(Mutex::new(Inner::default())),
            pending: PendingLock::for_view(mounted.clone()),
            mounted,
        }
    }

    pub async fn enter(&self) {
        self.mounted.mount();
        self.refresh().await;
    }

    pub fn leave(&self) {
        self.mounted.unmount();
    }

    /// Reloads the catalog. A failed load keeps the list already shown.
    pub async fn refresh(&self) -> bool {
        let visit = self.mounted.current();
        let result = self.catalog.list().await;
        if !self.mounted.is_current(visit) {
            return false;
        }
        match result {
            Ok(habits) => {
                self.inner.lock().await.habits = habits;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load habits");
                false
            }
        }
    }

    pub async fn toggle_form(&self) {
        if self.pending.is_pending() {
            return;
        }
        let mut inner = self.inner.lock().await;
        inner.form_open = !inner.form_open;
    }

    pub async fn set_name(&self, name: impl Into<String>) {
        if self.pending.is_pending() {
            return;
        }
        self.inner.lock().await.draft.name = name.into();
    }

    pub async fn toggle_day(&self, day: u8) -> bool {
        if self.pending.is_pending() {
            return false;
        }
        self.inner.lock().await.draft.weekdays.toggle(day)
    }

    /// Sends the draft. An incomplete draft is dropped silently. On success
    /// the draft is reset, the panel closes and the list reloads.
    pub async fn create(&self) -> MutationOutcome {
        let (guard, draft) = {
            let mut inner = self.inner.lock().await;
            if !inner.draft.is_submittable() {
                return MutationOutcome::Skipped;
            }
            let Some(guard) = self.pending.try_acquire() else {
                return MutationOutcome::Busy;
            };
            inner.notice = None;
            (guard, inner.draft.clone())
        };

        let result = self.catalog.create(&draft).await;
        if !self.mounted.is_current(guard.visit()) {
            tracing::debug!("Dropping create result for a left view");
            return MutationOutcome::Detached;
        }

        let outcome = match result {
            Ok(Some(_)) => {
                let mut inner = self.inner.lock().await;
                inner.draft.clear();
                inner.form_open = false;
                drop(inner);
                self.refresh().await;
                MutationOutcome::Applied
            }
            Ok(None) => MutationOutcome::Skipped,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create habit");
                self.inner.lock().await.notice = Some(RETRY_PROMPT);
                MutationOutcome::Failed
            }
        };
        drop(guard);
        outcome
    }

    /// Deletes a habit once `confirm` approves [`DELETE_PROMPT`]. A refusal
    /// changes nothing.
    pub async fn delete<F>(&self, habit_id: i64, confirm: F) -> MutationOutcome
    where
        F: FnOnce(&str) -> bool,
    {
        if self.pending.is_pending() {
            return MutationOutcome::Busy;
        }
        if !confirm(DELETE_PROMPT) {
            return MutationOutcome::Declined;
        }
        let Some(guard) = self.pending.try_acquire() else {
            return MutationOutcome::Busy;
        };

        let result = self.catalog.delete(habit_id).await;
        if !self.mounted.is_current(guard.visit()) {
            tracing::debug!(habit_id, "Dropping delete result for a left view");
            return MutationOutcome::Detached;
        }

        let outcome = match result {
            Ok(()) => {
                self.refresh().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, habit_id, "Failed to delete habit");
                MutationOutcome::Failed
            }
        };
        drop(guard);
        outcome
    }

    pub async fn state(&self) -> HabitsState {
        let inner = self.inner.lock().await;
        HabitsState {
            habits: inner.habits.clone(),
            draft: inner.draft.clone(),
            form_open: inner.form_open,
            notice: inner.notice,
            disabled: self.pending.is_pending(),
        }
    }
}
