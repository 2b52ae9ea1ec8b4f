//! `trackit` command line front end. Each subcommand drives the matching
//! screen controller once and prints what that screen would show.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::models::{today::days_label, CompletionPercentage, RegisterForm, Session};
use crate::views::habits::RETRY_PROMPT;
use crate::views::navigation::HISTORY_PLACEHOLDER;
use crate::views::register::SUCCESS_BANNER;
use crate::views::today::{heading, TodayState};
use crate::views::{Footer, MutationOutcome, ToggleOutcome};
use crate::AppState;

#[derive(Debug, Parser)]
#[command(name = "trackit", version, about = "Track your daily habits")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        /// Avatar image URL
        #[arg(long)]
        image: String,
        #[arg(long)]
        password: String,
    },
    /// Show the remembered session
    Whoami,
    /// Manage habit definitions
    Habits {
        #[command(subcommand)]
        action: HabitsCommand,
    },
    /// Show today's habits and progress
    Today,
    /// Mark one of today's habits as done
    Check { id: i64 },
    /// Mark one of today's habits as not done
    Uncheck { id: i64 },
    /// Habit history
    History,
}

#[derive(Debug, Subcommand)]
pub enum HabitsCommand {
    List,
    Add {
        name: String,
        /// Weekdays, 0 = Sunday ... 6 = Saturday
        #[arg(long, value_delimiter = ',')]
        days: Vec<u8>,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    match cli.command {
        Command::Login { email, password } => login(&state, email, password).await,
        Command::Register {
            email,
            name,
            image,
            password,
        } => {
            register(
                &state,
                RegisterForm {
                    email,
                    name,
                    image,
                    password,
                },
            )
            .await
        }
        Command::Whoami => whoami(&state).await,
        Command::Habits { action } => {
            require_session(&state).await?;
            match action {
                HabitsCommand::List => list_habits(&state).await,
                HabitsCommand::Add { name, days } => add_habit(&state, name, days).await,
                HabitsCommand::Delete { id, yes } => delete_habit(&state, id, yes).await,
            }
        }
        Command::Today => {
            require_session(&state).await?;
            let view = state.today_view();
            view.enter().await;
            print_today(&view.state().await);
            print_footer(state.progress.get());
            Ok(())
        }
        Command::Check { id } => mark(&state, id, true).await,
        Command::Uncheck { id } => mark(&state, id, false).await,
        Command::History => {
            println!("{HISTORY_PLACEHOLDER}");
            Ok(())
        }
    }
}

async fn require_session(state: &AppState) -> anyhow::Result<Session> {
    state
        .session
        .restore()
        .await
        .ok_or_else(|| anyhow!("Not logged in. Run `trackit login` first."))
}

async fn login(state: &AppState, email: String, password: String) -> anyhow::Result<()> {
    let view = state.login_view();
    view.set_email(email).await;
    view.set_password(password).await;

    if view.submit().await.is_some() {
        let session = state
            .session
            .get()
            .await
            .context("login succeeded without a session")?;
        println!("Logged in as {} <{}>", session.display_name, session.email);
        return Ok(());
    }
    match view.state().await.error {
        Some(e) => Err(anyhow!(e)),
        None => Ok(()),
    }
}

async fn register(state: &AppState, form: RegisterForm) -> anyhow::Result<()> {
    let view = state.register_view();
    view.fill(form).await;

    match view.submit().await {
        Some(transition) => {
            println!("{SUCCESS_BANNER}");
            transition.wait().await;
            println!("You can now run `trackit login`.");
            Ok(())
        }
        None => match view.state().await.error {
            Some(e) => Err(anyhow!(e)),
            None => Ok(()),
        },
    }
}

async fn whoami(state: &AppState) -> anyhow::Result<()> {
    if state.login_view().enter().await.is_none() {
        println!("Not logged in.");
        return Ok(());
    }
    let session = state
        .session
        .get()
        .await
        .context("restored session disappeared")?;
    println!("{} <{}>", session.display_name, session.email);
    println!("avatar: {}", session.avatar_url);
    Ok(())
}

async fn list_habits(state: &AppState) -> anyhow::Result<()> {
    let view = state.habits_view();
    view.enter().await;
    let habits = view.state().await;

    if let Some(message) = habits.empty_message() {
        println!("{message}");
    }
    let today = Local::now().date_naive();
    for habit in &habits.habits {
        let due = if habit.weekdays.includes_date(today) {
            "  (today)"
        } else {
            ""
        };
        println!("#{:<4} {}  {}{}", habit.id, habit.weekdays.render(), habit.name, due);
    }

    print_footer(state.footer().refresh().await);
    Ok(())
}

async fn add_habit(state: &AppState, name: String, days: Vec<u8>) -> anyhow::Result<()> {
    let view = state.habits_view();
    view.enter().await;
    view.toggle_form().await;
    view.set_name(name).await;
    for day in days {
        view.toggle_day(day).await;
    }

    match view.create().await {
        MutationOutcome::Applied => {
            let habits = view.state().await.habits;
            println!("Saved. You now have {} habit(s).", habits.len());
            Ok(())
        }
        MutationOutcome::Failed => Err(anyhow!(RETRY_PROMPT)),
        _ => Ok(()),
    }
}

async fn delete_habit(state: &AppState, id: i64, yes: bool) -> anyhow::Result<()> {
    let view = state.habits_view();
    let outcome = view
        .delete(id, |prompt| yes || ask(prompt).unwrap_or(false))
        .await;
    match outcome {
        MutationOutcome::Applied => println!("Deleted habit #{id}."),
        MutationOutcome::Failed => println!("Could not delete habit #{id}."),
        _ => {}
    }
    Ok(())
}

async fn mark(state: &AppState, id: i64, done: bool) -> anyhow::Result<()> {
    require_session(state).await?;
    let view = state.today_view();
    view.enter().await;

    let current = view.state().await;
    let Some(habit) = current.habits.iter().find(|h| h.id == id) else {
        return Err(anyhow!("No habit #{id} scheduled for today."));
    };
    if habit.done == done {
        print_today(&current);
        return Ok(());
    }

    let mut progress = state.progress.subscribe();
    let before = *progress.borrow_and_update();
    match view.toggle(id).await {
        ToggleOutcome::Settled { .. } | ToggleOutcome::ResyncFailed => {
            print_today(&view.state().await);
            if progress.has_changed().unwrap_or(false) {
                let after = *progress.borrow_and_update();
                if after != before {
                    println!("\nProgress: {} -> {}", percent(before), percent(after));
                }
            }
            Ok(())
        }
        ToggleOutcome::Unknown => Err(anyhow!("No habit #{id} scheduled for today.")),
        ToggleOutcome::Busy | ToggleOutcome::Detached => Ok(()),
    }
}

fn print_today(state: &TodayState) {
    println!("{}", heading(Local::now().date_naive()));
    let marker = if state.subtitle.is_highlighted() { "* " } else { "" };
    println!("{marker}{}\n", state.subtitle);
    for habit in &state.habits {
        let mark = if habit.done { "x" } else { " " };
        let best = if habit.is_personal_best() { "  *" } else { "" };
        println!("[{mark}] #{:<4} {}", habit.id, habit.name);
        println!(
            "         Current sequence: {}  Best: {}{best}",
            days_label(habit.current_sequence),
            days_label(habit.highest_sequence)
        );
    }
}

fn print_footer(pct: Option<CompletionPercentage>) {
    let links: Vec<_> = Footer::LINKS
        .iter()
        .map(|route| format!("{} ({})", route.label(), route.path()))
        .collect();
    println!("\n{}", links.join(" | "));
    println!("Today: {}", percent(pct));
}

fn percent(pct: Option<CompletionPercentage>) -> String {
    pct.map_or_else(|| "-".to_string(), |p| p.to_string())
}

fn ask(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
