pub mod progress;
pub mod session;

pub use progress::ProgressStore;
pub use session::SessionStore;
