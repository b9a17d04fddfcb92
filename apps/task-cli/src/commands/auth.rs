//! Account and session commands.

use anyhow::bail;

use crate::output;
use crate::state::AppState;

use super::user_facing;

pub async fn register(
    state: &mut AppState,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    user_facing(
        state.session.register(name, email, password).await,
        "Registration failed. Please try again.",
    )?;

    println!("Account created.");
    if let Some(user) = state.session.user() {
        print!("Logged in as ");
        output::print_user(user);
    }
    Ok(())
}

pub async fn login(state: &mut AppState, email: &str, password: &str) -> anyhow::Result<()> {
    user_facing(
        state.session.login(email, password).await,
        "Login failed. Please try again.",
    )?;

    if let Some(user) = state.session.user() {
        print!("Logged in as ");
        output::print_user(user);
    }
    Ok(())
}

pub async fn logout(state: &mut AppState) -> anyhow::Result<()> {
    user_facing(
        state.session.logout().await,
        "Logout failed. Please try again.",
    )?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(state: &AppState) -> anyhow::Result<()> {
    match state.session.user() {
        Some(user) => {
            output::print_user(user);
            Ok(())
        }
        None => bail!("Not logged in."),
    }
}

pub async fn set_name(state: &mut AppState, name: &str) -> anyhow::Result<()> {
    let user = user_facing(
        state.session.update_name(name).await,
        "Failed to update name.",
    )?;
    println!("Name updated successfully!");
    output::print_user(&user);
    Ok(())
}

pub async fn change_password(
    state: &mut AppState,
    current: &str,
    new: &str,
    confirm: &str,
) -> anyhow::Result<()> {
    let message = user_facing(
        state.session.change_password(current, new, confirm).await,
        "Failed to change password.",
    )?;
    println!("{}", message);
    Ok(())
}
