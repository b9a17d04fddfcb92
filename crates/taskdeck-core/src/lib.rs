//! # Taskdeck Core
//!
//! The client-side domain of the taskdeck task manager.
//! Pure session and view-state logic with zero transport dependencies;
//! the backend REST API and token persistence are reached through ports.

pub mod board;
pub mod domain;
pub mod error;
pub mod ports;
pub mod session;
pub mod validate;
pub mod view;

pub use board::TaskBoard;
pub use error::{ApiError, ClientError, TokenStoreError};
pub use session::{AuthPhase, AuthToken, Session, SessionManager};
