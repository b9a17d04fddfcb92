//! Display ordering for task collections.

use crate::domain::Task;

/// Order tasks by due date ascending for display.
///
/// A task with a parseable due date always sorts before one without;
/// unparsable dates count as absent. The sort is stable and has no
/// secondary key, so equal dates and the whole undated tail keep their
/// input order - which also makes it idempotent.
pub fn sort_by_due(tasks: &mut [&Task]) {
    tasks.sort_by_key(|task| match task.due() {
        Some(date) => (false, Some(date)),
        None => (true, None),
    });
}
