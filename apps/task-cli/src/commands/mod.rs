//! Command execution.

mod auth;
mod tasks;

use anyhow::anyhow;

use taskdeck_core::ClientError;

use crate::cli::Command;
use crate::state::AppState;

pub async fn run(state: &mut AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => auth::register(state, &name, &email, &password).await,
        Command::Login { email, password } => auth::login(state, &email, &password).await,
        Command::Logout => auth::logout(state).await,
        Command::Whoami => auth::whoami(state),
        Command::SetName { name } => auth::set_name(state, &name).await,
        Command::ChangePassword {
            current,
            new,
            confirm,
        } => auth::change_password(state, &current, &new, &confirm).await,
        Command::List { page, category } => tasks::list(state, page, &category).await,
        Command::Add {
            title,
            due,
            category,
        } => tasks::add(state, &title, due, category.as_deref()).await,
        Command::Toggle { id, page, category } => {
            tasks::toggle(state, &id, page, &category).await
        }
        Command::Delete { id, page, category } => {
            tasks::delete(state, &id, page, &category).await
        }
    }
}

/// Convert a client error into the message a user should see, with the
/// operation's generic fallback for errors that carry no wording of
/// their own.
fn user_facing<T>(result: Result<T, ClientError>, fallback: &str) -> anyhow::Result<T> {
    result.map_err(|err| anyhow!(err.display_message(fallback)))
}
