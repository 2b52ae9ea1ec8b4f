use crate::api::DailyCompletionClient;
use crate::models::CompletionPercentage;
use crate::store::ProgressStore;
use crate::views::navigation::Route;

/// Persistent bottom bar: navigation links plus the progress indicator.
#[derive(Debug, Clone)]
pub struct Footer {
    daily: DailyCompletionClient,
    progress: ProgressStore,
}

impl Footer {
    pub const LINKS: [Route; 3] = [Route::Habits, Route::Today, Route::History];

    pub fn new(daily: DailyCompletionClient, progress: ProgressStore) -> Self {
        Self { daily, progress }
    }

    /// Independent fetch of today's list; overwrites the shared percentage.
    /// A failed fetch leaves the last value in place.
    pub async fn refresh(&self) -> Option<CompletionPercentage> {
        match self.daily.list_today().await {
            Ok(habits) => {
                let pct = CompletionPercentage::of(&habits);
                self.progress.set(pct);
                pct
            }
            Err(e) => {
                tracing::warn!(error = %e, "Footer failed to load today's habits");
                self.progress.get()
            }
        }
    }

    pub fn percentage(&self) -> Option<CompletionPercentage> {
        self.progress.get()
    }
}
