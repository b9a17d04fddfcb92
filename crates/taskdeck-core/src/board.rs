//! The task list view: one cached page, its filter, and the mutations
//! that act on it.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{NewTask, Page, Task, TaskId};
use crate::error::ClientError;
use crate::ports::TasksGateway;
use crate::session::AuthToken;
use crate::validate;
use crate::view::{CategoryFilter, InFlight, PageCache, Pager, visible};

/// Holds the page of tasks currently on display plus the transient state
/// around it: the category selector, the pagination reconciler, the page
/// cache, and the per-item busy markers.
///
/// The cached page is never mutated field-by-field. Mutations go to the
/// backend, invalidate the cache, and replace the page with a fresh
/// fetch; a failed request leaves everything as it was.
pub struct TaskBoard {
    gateway: Arc<dyn TasksGateway>,
    token: Option<AuthToken>,
    filter: CategoryFilter,
    pager: Pager,
    page: Option<Page<Task>>,
    cache: PageCache,
    toggling: InFlight,
    deleting: InFlight,
}

impl TaskBoard {
    pub fn new(gateway: Arc<dyn TasksGateway>, token: Option<AuthToken>) -> Self {
        Self {
            gateway,
            token,
            filter: CategoryFilter::All,
            pager: Pager::new(),
            page: None,
            cache: PageCache::new(),
            toggling: InFlight::new(),
            deleting: InFlight::new(),
        }
    }

    pub fn set_token(&mut self, token: Option<AuthToken>) {
        self.token = token;
    }

    pub fn page(&self) -> Option<&Page<Task>> {
        self.page.as_ref()
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn is_toggling(&self, id: &TaskId) -> bool {
        self.toggling.contains(id)
    }

    pub fn is_deleting(&self, id: &TaskId) -> bool {
        self.deleting.contains(id)
    }

    /// Tasks of the current page in display order: the category filter
    /// first, then the due-date sort over the filtered subset.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.page
            .as_ref()
            .map(|page| visible(&page.data, self.filter))
            .unwrap_or_default()
    }

    /// Fetch the page the pager currently wants, or serve it from cache.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let page_no = self.pager.desired_page();
        if let Some(cached) = self.cache.get(page_no, self.filter) {
            debug!(page = page_no, "serving cached page");
            let cached = cached.clone();
            self.pager.record(cached.meta());
            self.page = Some(cached);
            return Ok(());
        }

        let fetched = self
            .gateway
            .list(self.token.as_ref(), page_no, self.filter.as_query())
            .await?;
        debug!(
            page = fetched.current_page,
            items = fetched.data.len(),
            total = fetched.total,
            "page fetched"
        );
        self.pager.record(fetched.meta());
        self.cache.insert(self.filter, fetched.clone());
        self.page = Some(fetched);
        Ok(())
    }

    /// Switch the category selector. A page number only means something
    /// within one filtered result set, so the view returns to page 1.
    /// Takes effect at the next [`refresh`](Self::refresh).
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.pager.request_page(1);
        }
    }

    /// Direct the next refresh at an explicit page.
    pub fn request_page(&mut self, page: u32) {
        self.pager.request_page(page);
    }

    /// Advance one page if the backend reported one. Returns whether the
    /// view moved.
    pub async fn next_page(&mut self) -> Result<bool, ClientError> {
        if !self.pager.can_go_next() {
            return Ok(false);
        }
        self.pager.request_page(self.pager.desired_page() + 1);
        self.refresh().await?;
        Ok(true)
    }

    /// Step one page back if not already on the first. Returns whether
    /// the view moved.
    pub async fn previous_page(&mut self) -> Result<bool, ClientError> {
        if !self.pager.can_go_previous() {
            return Ok(false);
        }
        self.pager.request_page(self.pager.desired_page() - 1);
        self.refresh().await?;
        Ok(true)
    }

    /// Create a task and bring the view back to page 1, where new items
    /// are expected to surface.
    pub async fn create(&mut self, new_task: NewTask) -> Result<Task, ClientError> {
        validate::task_title(&new_task.title)?;

        let created = self.gateway.create(self.token.as_ref(), &new_task).await?;
        self.pager.on_created();
        self.invalidate_and_refresh().await?;
        Ok(created)
    }

    /// Flip a task's status. The per-id marker is set before dispatch and
    /// cleared when the request settles, success or failure; a second
    /// toggle for the same id while one is outstanding is refused.
    pub async fn toggle(&mut self, id: TaskId) -> Result<Task, ClientError> {
        if !self.toggling.begin(&id) {
            return Err(ClientError::Busy(id));
        }

        let outcome = self.gateway.toggle(self.token.as_ref(), &id).await;
        self.toggling.finish(&id);

        let updated = outcome?;
        self.invalidate_and_refresh().await?;
        Ok(updated)
    }

    /// Delete a task. On success the pager reconciles - removing the last
    /// item of a later page steps the view back - before the refetch.
    pub async fn delete(&mut self, id: TaskId) -> Result<(), ClientError> {
        if !self.deleting.begin(&id) {
            return Err(ClientError::Busy(id));
        }

        let outcome = self.gateway.delete(self.token.as_ref(), &id).await;
        self.deleting.finish(&id);
        outcome?;

        let remaining = self
            .page
            .as_ref()
            .map(|page| page.data.iter().filter(|task| task.id != id).count())
            .unwrap_or(0);
        self.pager.on_deleted(remaining);
        self.invalidate_and_refresh().await?;
        Ok(())
    }

    async fn invalidate_and_refresh(&mut self) -> Result<(), ClientError> {
        self.cache.invalidate_all();
        self.refresh().await
    }
}
