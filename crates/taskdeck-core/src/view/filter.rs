//! Category filtering and the filter/sort composition.

use std::fmt;
use std::str::FromStr;

use crate::domain::{Category, Task, UnknownCategory};

use super::sort::sort_by_due;

/// Category selector: everything, or exactly one of the fixed labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Exact equality on the category field; no case folding, no partial
    /// match. `All` admits everything, including uncategorized tasks.
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => task.category == Some(*category),
        }
    }

    /// Query-parameter value for the backend; `None` means no filter.
    pub fn as_query(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(*category),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

/// The visible subset of a page, in display order.
///
/// Filter first, then sort the filtered subset - sorting never reaches
/// across the filter boundary.
pub fn visible<'a>(tasks: &'a [Task], filter: CategoryFilter) -> Vec<&'a Task> {
    let mut picked: Vec<&Task> = tasks.iter().filter(|task| filter.matches(task)).collect();
    sort_by_due(&mut picked);
    picked
}
