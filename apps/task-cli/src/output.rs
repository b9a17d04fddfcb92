//! Terminal rendering of tasks, pages and profiles.

use taskdeck_core::TaskBoard;
use taskdeck_core::domain::{Task, User};

pub fn print_board(board: &TaskBoard) {
    let tasks = board.visible_tasks();
    if tasks.is_empty() {
        println!("No tasks to show.");
    } else {
        for task in &tasks {
            println!("{}", format_task(task));
        }
    }

    if let Some(page) = board.page() {
        let mut footer = format!(
            "page {} · {} of {} task(s)",
            page.current_page,
            tasks.len(),
            page.total
        );
        if board.pager().can_go_previous() {
            footer.push_str(" · prev available");
        }
        if board.pager().can_go_next() {
            footer.push_str(" · next available");
        }
        println!("{}", footer);
    }
}

pub fn print_user(user: &User) {
    println!("{} <{}> (id {})", user.name, user.email, user.id);
}

fn format_task(task: &Task) -> String {
    let mark = if task.is_completed() { "x" } else { " " };

    let due = match (task.due(), task.has_invalid_due_date()) {
        (Some(date), _) => format!("  due {}", date),
        (None, true) => "  due Invalid Date".to_string(),
        (None, false) => String::new(),
    };

    let category = task
        .category
        .map(|c| format!("  [{}]", c))
        .unwrap_or_default();

    format!("[{}] {:>4}  {}{}{}", mark, task.id, task.title, due, category)
}
