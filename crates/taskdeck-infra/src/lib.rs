//! # Taskdeck Infrastructure
//!
//! Concrete implementations of the ports defined in `taskdeck-core`:
//! the HTTP gateway to the real backend, token persistence, and an
//! in-memory fake backend used as a stand-in for tests.

pub mod gateway;
pub mod token;

#[cfg(test)]
mod tests;

pub use gateway::{HttpGateway, HttpGatewayConfig, MemoryBackend};
pub use token::{FileTokenStore, InMemoryTokenStore};
