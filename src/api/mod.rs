pub mod auth;
pub mod client;
pub mod habits;
pub mod today;

pub use auth::AuthClient;
pub use client::ApiClient;
pub use habits::HabitCatalogClient;
pub use today::DailyCompletionClient;
