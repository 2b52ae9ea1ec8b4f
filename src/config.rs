use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// How long the success banner stays up after a registration before the
/// login screen takes over.
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub request_timeout_secs: u64,
    pub restore_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("TRACKIT_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".into()),
            session_file: env::var("TRACKIT_SESSION_FILE")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_session_file),
            request_timeout_secs: parse_or(env::var("TRACKIT_REQUEST_TIMEOUT_SECS").ok(), 30),
            restore_delay_ms: parse_or(env::var("TRACKIT_RESTORE_DELAY_MS").ok(), 2000),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn restore_delay(&self) -> Duration {
        Duration::from_millis(self.restore_delay_ms)
    }
}

fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trackit")
        .join("session.json")
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
