use serde_json::json;

use crate::api::client::ApiClient;
use crate::error::ApiResult;
use crate::models::today::DailyHabitInstance;
use crate::store::SessionStore;

/// Today's habit instances and their done/undone toggle.
#[derive(Debug, Clone)]
pub struct DailyCompletionClient {
    api: ApiClient,
    session: SessionStore,
}

impl DailyCompletionClient {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub async fn list_today(&self) -> ApiResult<Vec<DailyHabitInstance>> {
        let token = self.session.token().await;
        self.api.get_json("/habits/today", token.as_deref()).await
    }

    pub async fn check(&self, habit_id: i64) -> ApiResult<()> {
        self.mark(habit_id, "check").await
    }

    pub async fn uncheck(&self, habit_id: i64) -> ApiResult<()> {
        self.mark(habit_id, "uncheck").await
    }

    /// Sends whichever of check/uncheck flips the instance's current state.
    pub async fn toggle(&self, instance: &DailyHabitInstance) -> ApiResult<()> {
        if instance.done {
            self.uncheck(instance.id).await
        } else {
            self.check(instance.id).await
        }
    }

    async fn mark(&self, habit_id: i64, action: &str) -> ApiResult<()> {
        let token = self.session.token().await;
        self.api
            .post(
                &format!("/habits/{habit_id}/{action}"),
                token.as_deref(),
                &json!({}),
            )
            .await?;
        tracing::debug!(habit_id, action, "Habit marked");
        Ok(())
    }
}
