use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use validator::Validate;

use crate::api::AuthClient;
use crate::error::AuthError;
use crate::models::LoginForm;
use crate::store::SessionStore;
use crate::views::navigation::{Route, Transition};
use crate::views::pending::PendingLock;

/// What the login screen shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub form: LoginForm,
    pub error: Option<AuthError>,
    pub disabled: bool,
}

#[derive(Debug, Default)]
struct Inner {
    form: LoginForm,
    error: Option<AuthError>,
    restoring: bool,
}

#[derive(Debug, Clone)]
pub struct LoginView {
    auth: AuthClient,
    session: SessionStore,
    restore_delay: Duration,
    inner: Arc<Mutex<Inner>>,
    pending: PendingLock,
}

impl LoginView {
    pub fn new(auth: AuthClient, session: SessionStore, restore_delay: Duration) -> Self {
        Self {
            auth,
            session,
            restore_delay,
            inner: Arc::new(Mutex::new(Inner::default())),
            pending: PendingLock::new(),
        }
    }

    /// Runs when the screen opens. A saved session skips the form: the
    /// controls lock and the habits screen follows after the restore delay.
    pub async fn enter(&self) -> Option<Transition> {
        let session = self.session.restore().await?;
        self.inner.lock().await.restoring = true;
        tracing::info!(user_id = session.user_id, "Welcome back, redirecting");
        Some(Transition::delayed(Route::Habits, self.restore_delay))
    }

    pub async fn set_email(&self, email: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        if !self.is_disabled(&inner) {
            inner.form.email = email.into();
        }
    }

    pub async fn set_password(&self, password: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        if !self.is_disabled(&inner) {
            inner.form.password = password.into();
        }
    }

    /// Submits the form. Returns the navigation to perform on success; on
    /// failure the error is recorded and the form re-enabled.
    pub async fn submit(&self) -> Option<Transition> {
        let (guard, form) = {
            let mut inner = self.inner.lock().await;
            if inner.restoring {
                return None;
            }
            if inner.form.validate().is_err() {
                inner.error = Some(AuthError::MissingFields);
                return None;
            }
            let guard = self.pending.try_acquire()?;
            inner.error = None;
            (guard, inner.form.clone())
        };

        let result = self.auth.login(&form).await;

        let mut inner = self.inner.lock().await;
        drop(guard);
        match result {
            Ok(_) => Some(Transition::now(Route::Habits)),
            Err(e) => {
                if e.clears_credentials() {
                    inner.form.clear();
                }
                inner.error = Some(e);
                None
            }
        }
    }

    pub async fn state(&self) -> LoginState {
        let inner = self.inner.lock().await;
        LoginState {
            form: inner.form.clone(),
            error: inner.error,
            disabled: self.is_disabled(&inner),
        }
    }

    fn is_disabled(&self, inner: &Inner) -> bool {
        inner.restoring || self.pending.is_pending()
    }
}
