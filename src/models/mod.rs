pub mod habit;
pub mod session;
pub mod today;

pub use habit::{HabitDefinition, HabitDraft, Weekdays};
pub use session::{LoginForm, RegisterForm, Session};
pub use today::{CompletionPercentage, DailyHabitInstance};
