//! View-state components: ordering, filtering, pagination reconciliation,
//! per-item busy markers and the page cache.

mod cache;
mod filter;
mod inflight;
mod pager;
mod sort;

pub use cache::PageCache;
pub use filter::{CategoryFilter, visible};
pub use inflight::InFlight;
pub use pager::Pager;
pub use sort::sort_by_due;
