//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod gateway;
mod token_store;

pub use gateway::{AuthGateway, TasksGateway};
pub use token_store::TokenStore;
