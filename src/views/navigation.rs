use std::time::Duration;

pub const HISTORY_PLACEHOLDER: &str = "Soon you'll be able to see your habit history here!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Habits,
    Today,
    History,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Habits => "/habits",
            Route::Today => "/today",
            Route::History => "/history",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Login => "Log in",
            Route::Register => "Sign up",
            Route::Habits => "Habits",
            Route::Today => "Today",
            Route::History => "History",
        }
    }
}

/// A navigation a view asks for, possibly after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: Route,
    pub after: Duration,
}

impl Transition {
    pub fn now(to: Route) -> Self {
        Self {
            to,
            after: Duration::ZERO,
        }
    }

    pub fn delayed(to: Route, after: Duration) -> Self {
        Self { to, after }
    }

    /// Sleeps out the delay and yields the destination.
    pub async fn wait(self) -> Route {
        if !self.after.is_zero() {
            tokio::time::sleep(self.after).await;
        }
        self.to
    }
}
