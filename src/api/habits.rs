use crate::api::client::ApiClient;
use crate::error::ApiResult;
use crate::models::habit::{HabitDefinition, HabitDraft};
use crate::store::SessionStore;

/// Habit definitions: list, create, delete. There is no update.
#[derive(Debug, Clone)]
pub struct HabitCatalogClient {
    api: ApiClient,
    session: SessionStore,
}

impl HabitCatalogClient {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Server order is kept as-is.
    pub async fn list(&self) -> ApiResult<Vec<HabitDefinition>> {
        let token = self.session.token().await;
        self.api.get_json("/habits", token.as_deref()).await
    }

    /// Returns `Ok(None)` without touching the network when the draft has no
    /// name or no weekday.
    pub async fn create(&self, draft: &HabitDraft) -> ApiResult<Option<HabitDefinition>> {
        if !draft.is_submittable() {
            tracing::debug!("Skipping create for incomplete habit draft");
            return Ok(None);
        }
        let token = self.session.token().await;
        let habit: HabitDefinition = self
            .api
            .post_json("/habits", token.as_deref(), draft)
            .await?;
        tracing::info!(habit_id = habit.id, name = %habit.name, "Habit created");
        Ok(Some(habit))
    }

    pub async fn delete(&self, habit_id: i64) -> ApiResult<()> {
        let token = self.session.token().await;
        self.api
            .delete(&format!("/habits/{habit_id}"), token.as_deref())
            .await?;
        tracing::info!(habit_id, "Habit deleted");
        Ok(())
    }
}
