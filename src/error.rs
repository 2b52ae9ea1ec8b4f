use reqwest::StatusCode;

/// Failure kinds produced by the transport adapter. Callers switch on these
/// exhaustively; nothing above `api::client` looks at raw status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication rejected")]
    Unauthorized,

    #[error("Request rejected as invalid")]
    Unprocessable,

    #[error("Remote server error")]
    ServerError,

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::Unprocessable,
            StatusCode::INTERNAL_SERVER_ERROR => ApiError::ServerError,
            other => ApiError::Status(other.as_u16()),
        }
    }
}

/// Errors surfaced by the login and registration forms. The `Display` text is
/// the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please fill in the missing fields above!")]
    MissingFields,

    #[error("User not found. Check your details and try again!")]
    InvalidCredentials,

    #[error("User already registered. Try again!")]
    AlreadyRegistered,

    #[error("Invalid data. Try again!")]
    ValidationError,

    #[error("The server is down, try again later...")]
    ServerUnavailable,

    #[error("Check your details and try again!")]
    UnknownError,
}

impl AuthError {
    pub fn for_login(err: &ApiError) -> Self {
        match err {
            ApiError::Unauthorized => AuthError::InvalidCredentials,
            ApiError::Unprocessable => AuthError::ValidationError,
            ApiError::ServerError => AuthError::ServerUnavailable,
            ApiError::Status(_) | ApiError::Transport(_) => AuthError::UnknownError,
        }
    }

    pub fn for_register(err: &ApiError) -> Self {
        match err {
            ApiError::Unauthorized => AuthError::AlreadyRegistered,
            ApiError::Unprocessable => AuthError::ValidationError,
            ApiError::ServerError => AuthError::ServerUnavailable,
            ApiError::Status(_) | ApiError::Transport(_) => AuthError::UnknownError,
        }
    }

    /// Whether the form must wipe the entered credentials after this error.
    pub fn clears_credentials(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::ValidationError
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot format error: {0}")]
    Format(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_is_closed() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY),
            ApiError::Unprocessable
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::ServerError
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::CONFLICT),
            ApiError::Status(409)
        ));
    }

    #[test]
    fn test_unauthorized_means_different_things_per_endpoint() {
        assert_eq!(
            AuthError::for_login(&ApiError::Unauthorized),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            AuthError::for_register(&ApiError::Unauthorized),
            AuthError::AlreadyRegistered
        );
    }

    #[test]
    fn test_other_statuses_are_unknown() {
        assert_eq!(
            AuthError::for_login(&ApiError::Status(404)),
            AuthError::UnknownError
        );
        assert_eq!(
            AuthError::for_register(&ApiError::Status(503)),
            AuthError::UnknownError
        );
        assert_eq!(
            AuthError::for_register(&ApiError::ServerError),
            AuthError::ServerUnavailable
        );
    }

    #[test]
    fn test_only_rejections_clear_credentials() {
        assert!(AuthError::InvalidCredentials.clears_credentials());
        assert!(AuthError::ValidationError.clears_credentials());
        assert!(!AuthError::ServerUnavailable.clears_credentials());
        assert!(!AuthError::UnknownError.clears_credentials());
        assert!(!AuthError::MissingFields.clears_credentials());
    }

    #[test]
    fn test_invalid_credentials_message_says_user_not_found() {
        assert!(AuthError::InvalidCredentials
            .to_string()
            .starts_with("User not found"));
    }
}
