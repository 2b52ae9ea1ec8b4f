//! # TrackIt client
//!
//! Session handling and the habit-completion state machine for the TrackIt
//! habit tracker. All habit data lives behind a remote REST API; this crate
//! keeps the local stores, form state and pending locks consistent with it.

use std::sync::Arc;

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod views;

use api::{ApiClient, AuthClient, DailyCompletionClient, HabitCatalogClient};
use config::Config;
use error::ApiResult;
use store::{ProgressStore, SessionStore};
use views::{Footer, HabitsView, LoginView, RegisterView, TodayView};

/// The two shared stores plus the transport, handed explicitly to every
/// screen controller.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: SessionStore,
    pub progress: ProgressStore,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: Config) -> ApiResult<Self> {
        let api = ApiClient::new(&config)?;
        let session = SessionStore::new(config.session_file.clone());
        Ok(Self {
            config: Arc::new(config),
            session,
            progress: ProgressStore::new(),
            api,
        })
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.api.clone(), self.session.clone())
    }

    pub fn catalog(&self) -> HabitCatalogClient {
        HabitCatalogClient::new(self.api.clone(), self.session.clone())
    }

    pub fn daily(&self) -> DailyCompletionClient {
        DailyCompletionClient::new(self.api.clone(), self.session.clone())
    }

    pub fn login_view(&self) -> LoginView {
        LoginView::new(self.auth(), self.session.clone(), self.config.restore_delay())
    }

    pub fn register_view(&self) -> RegisterView {
        RegisterView::new(self.auth())
    }

    pub fn habits_view(&self) -> HabitsView {
        HabitsView::new(self.catalog())
    }

    pub fn today_view(&self) -> TodayView {
        TodayView::new(self.daily(), self.progress.clone())
    }

    pub fn footer(&self) -> Footer {
        Footer::new(self.daily(), self.progress.clone())
    }
}
