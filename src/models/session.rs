use serde::{Deserialize, Serialize};
use validator::Validate;

/// Authenticated identity plus the bearer token used on every habit call.
///
/// "Logged out" is modelled as the absence of a `Session`, so a value of this
/// type is always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: i64,
    pub display_name: String,
    pub avatar_url: String,
    pub email: String,
    pub token: String,
}

impl Session {
    /// A snapshot is only adopted when it carries everything a fresh login
    /// would have produced.
    pub fn is_complete(&self) -> bool {
        !self.display_name.is_empty()
            && !self.avatar_url.is_empty()
            && !self.email.is_empty()
            && !self.token.is_empty()
    }
}

/// POST /auth/login response. The server echoes the password back; it is
/// dropped here and never reaches the session snapshot.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub email: String,
    pub token: String,
}

impl From<LoginResponse> for Session {
    fn from(r: LoginResponse) -> Self {
        Self {
            user_id: r.id,
            display_name: r.name,
            avatar_url: r.image,
            email: r.email,
            token: r.token,
        }
    }
}

/// POST /auth/login
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
    }
}

/// POST /auth/sign-up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub name: String,

    /// Avatar URL
    #[validate(length(min = 1))]
    pub image: String,

    #[validate(length(min = 1))]
    pub password: String,
}
