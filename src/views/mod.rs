//! Screen controllers. Each one owns its local form state and pending lock
//! and reads/writes the shared stores it was handed; rendering is left to
//! whoever drives them.

pub mod footer;
pub mod habits;
pub mod login;
pub mod navigation;
pub mod pending;
pub mod register;
pub mod today;

pub use footer::Footer;
pub use habits::{HabitsView, MutationOutcome};
pub use login::LoginView;
pub use navigation::{Route, Transition};
pub use register::RegisterView;
pub use today::{Subtitle, TodayView, ToggleOutcome};
