//! Task list commands.

use anyhow::{Context, anyhow};
use chrono::NaiveDate;

use taskdeck_core::TaskBoard;
use taskdeck_core::domain::{Category, NewTask, TaskId};
use taskdeck_core::view::CategoryFilter;

use crate::output;
use crate::state::AppState;

use super::user_facing;

pub async fn list(state: &AppState, page: u32, category: &str) -> anyhow::Result<()> {
    let board = board_at(state, page, category).await?;
    output::print_board(&board);
    Ok(())
}

pub async fn add(
    state: &AppState,
    title: &str,
    due: Option<NaiveDate>,
    category: Option<&str>,
) -> anyhow::Result<()> {
    let mut new_task = NewTask::new(title);
    if let Some(due) = due {
        new_task = new_task.with_due_date(due);
    }
    if let Some(raw) = category {
        let category: Category = raw
            .parse()
            .with_context(|| format!("unknown category: {}", raw))?;
        new_task = new_task.with_category(category);
    }

    let mut board = state.board();
    let created = user_facing(
        board.create(new_task).await,
        "Failed to create task. Please try again.",
    )?;

    println!("Added task {}: {}", created.id, created.title);
    output::print_board(&board);
    Ok(())
}

pub async fn toggle(state: &AppState, id: &str, page: u32, category: &str) -> anyhow::Result<()> {
    let mut board = board_at(state, page, category).await?;
    let id = parse_task_id(id);

    let updated = user_facing(
        board.toggle(id).await,
        "Failed to update task. Please try again.",
    )?;

    let status = if updated.is_completed() {
        "completed"
    } else {
        "pending"
    };
    println!("Task {} is now {}.", updated.id, status);
    output::print_board(&board);
    Ok(())
}

pub async fn delete(state: &AppState, id: &str, page: u32, category: &str) -> anyhow::Result<()> {
    let mut board = board_at(state, page, category).await?;
    let id = parse_task_id(id);

    user_facing(
        board.delete(id.clone()).await,
        "Failed to delete task. Please try again.",
    )?;

    println!("Task {} deleted.", id);
    output::print_board(&board);
    Ok(())
}

/// A board looking at the requested page under the requested filter,
/// with the page already fetched so mutations reconcile against real
/// pagination state.
async fn board_at(state: &AppState, page: u32, category: &str) -> anyhow::Result<TaskBoard> {
    let filter = parse_filter(category)?;
    let mut board = state.board();
    board.set_filter(filter);
    board.request_page(page);
    user_facing(
        board.refresh().await,
        "Failed to load tasks. Please try again.",
    )?;
    Ok(board)
}

fn parse_filter(raw: &str) -> anyhow::Result<CategoryFilter> {
    raw.parse().map_err(|_| {
        anyhow!(
            "unknown category: {} (expected \"all\" or one of: Work, Personal, Shopping, Study, Other)",
            raw
        )
    })
}

fn parse_task_id(raw: &str) -> TaskId {
    // Infallible: anything non-numeric is an opaque string id.
    raw.parse()
        .unwrap_or_else(|_| TaskId::Text(raw.to_string()))
}
