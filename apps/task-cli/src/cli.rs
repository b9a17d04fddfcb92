//! Command-line surface.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "taskdeck",
    about = "Terminal client for the taskdeck task manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and log in.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log in with an existing account.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log out and forget the stored token.
    Logout,

    /// Show the profile of the logged-in user.
    Whoami,

    /// Change the display name.
    SetName { name: String },

    /// Change the password.
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },

    /// List tasks, one page at a time.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// "all" or one of: Work, Personal, Shopping, Study, Other.
        #[arg(long, default_value = "all")]
        category: String,
    },

    /// Add a task.
    Add {
        title: String,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long)]
        category: Option<String>,
    },

    /// Toggle a task between pending and completed.
    Toggle {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = "all")]
        category: String,
    },

    /// Delete a task.
    Delete {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = "all")]
        category: String,
    },
}
