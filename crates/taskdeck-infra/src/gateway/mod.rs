//! Backend gateway implementations - HTTP and the in-memory fake.

mod http;
mod memory;

pub use http::{HttpGateway, HttpGatewayConfig};
pub use memory::MemoryBackend;
