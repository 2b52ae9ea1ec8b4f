use std::sync::Arc;

use tokio::sync::Mutex;
use validator::Validate;

use crate::api::AuthClient;
use crate::config::REGISTER_REDIRECT_DELAY;
use crate::error::AuthError;
use crate::models::RegisterForm;
use crate::views::navigation::{Route, Transition};
use crate::views::pending::PendingLock;

pub const SUCCESS_BANNER: &str = "User created successfully! Redirecting...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterState {
    pub form: RegisterForm,
    pub error: Option<AuthError>,
    pub success: bool,
    pub disabled: bool,
}

#[derive(Debug, Default)]
struct Inner {
    form: RegisterForm,
    error: Option<AuthError>,
    success: bool,
}

#[derive(Debug, Clone)]
pub struct RegisterView {
    auth: AuthClient,
    inner: Arc<Mutex<Inner>>,
    pending: PendingLock,
}

impl RegisterView {
    pub fn new(auth: AuthClient) -> Self {
        Self {
            auth,
            inner: Arc::new(Mutex::new(Inner::default())),
            pending: PendingLock::new(),
        }
    }

    /// Replaces the form contents; ignored while a submission is in flight.
    pub async fn fill(&self, form: RegisterForm) {
        let mut inner = self.inner.lock().await;
        if !self.pending.is_pending() {
            inner.form = form;
        }
    }

    /// On success the banner goes up and the login screen follows after
    /// exactly [`REGISTER_REDIRECT_DELAY`].
    pub async fn submit(&self) -> Option<Transition> {
        let (guard, form) = {
            let mut inner = self.inner.lock().await;
            if inner.form.validate().is_err() {
                inner.error = Some(AuthError::MissingFields);
                return None;
            }
            let guard = self.pending.try_acquire()?;
            (guard, inner.form.clone())
        };

        let result = self.auth.register(&form).await;

        let mut inner = self.inner.lock().await;
        drop(guard);
        match result {
            Ok(()) => {
                inner.error = None;
                inner.success = true;
                Some(Transition::delayed(Route::Login, REGISTER_REDIRECT_DELAY))
            }
            Err(e) => {
                inner.error = Some(e);
                None
            }
        }
    }

    pub async fn state(&self) -> RegisterState {
        let inner = self.inner.lock().await;
        RegisterState {
            form: inner.form.clone(),
            error: inner.error,
            success: inner.success,
            disabled: self.pending.is_pending(),
        }
    }

    pub async fn banner(&self) -> Option<&'static str> {
        self.inner.lock().await.success.then_some(SUCCESS_BANNER)
    }
}
