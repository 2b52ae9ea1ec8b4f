use validator::Validate;

use crate::api::client::ApiClient;
use crate::error::AuthError;
use crate::models::session::{LoginForm, LoginResponse, RegisterForm, Session};
use crate::store::SessionStore;

#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
    session: SessionStore,
}

impl AuthClient {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Logs in and installs the resulting session in the store. Blank fields
    /// fail with `MissingFields` before anything is sent; a response missing
    /// any session field is `UnknownError` and nothing is stored.
    pub async fn login(&self, form: &LoginForm) -> Result<Session, AuthError> {
        form.validate().map_err(|_| AuthError::MissingFields)?;

        let response: LoginResponse = self
            .api
            .post_json("/auth/login", None, form)
            .await
            .map_err(|e| {
                let kind = AuthError::for_login(&e);
                tracing::warn!(error = %e, kind = ?kind, "Login failed");
                kind
            })?;

        let session = Session::from(response);
        if !session.is_complete() {
            tracing::warn!(user_id = session.user_id, "Login response is missing session fields");
            return Err(AuthError::UnknownError);
        }
        if let Err(e) = self.session.set(session.clone()).await {
            // The login itself succeeded; only the next restart will ask again.
            tracing::warn!(error = %e, "Failed to persist session snapshot");
        }
        Ok(session)
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<(), AuthError> {
        form.validate().map_err(|_| AuthError::MissingFields)?;

        self.api
            .post("/auth/sign-up", None, form)
            .await
            .map_err(|e| {
                let kind = AuthError::for_register(&e);
                tracing::warn!(error = %e, kind = ?kind, "Registration failed");
                kind
            })?;

        tracing::info!(email = %form.email, "Account registered");
        Ok(())
    }
}
