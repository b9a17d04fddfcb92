use serde::{Deserialize, Serialize};

/// One page of results as returned by the backend paginator.
///
/// The envelope is owned transiently by the view: it is replaced
/// wholesale on every fetch and never mutated in place. Invariants the
/// backend guarantees: `data.len() <= per_page` and `total >= data.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub current_page: u32,
    pub data: Vec<T>,
    pub total: u64,
    pub per_page: u32,

    #[serde(default)]
    pub last_page: Option<u32>,

    #[serde(default)]
    pub next_page_url: Option<String>,

    #[serde(default)]
    pub prev_page_url: Option<String>,
}

impl<T> Page<T> {
    /// Whether a next page exists. The backend is authoritative here -
    /// filtering is applied server-side, so local item counts say nothing
    /// about what follows.
    pub fn has_next(&self) -> bool {
        self.next_page_url.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Navigation metadata without the items.
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            current_page: self.current_page,
            total: self.total,
            per_page: self.per_page,
            has_next: self.has_next(),
        }
    }
}

/// Pagination metadata of a fetched page, detached from its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: u32,
    pub total: u64,
    pub per_page: u32,
    pub has_next: bool,
}
