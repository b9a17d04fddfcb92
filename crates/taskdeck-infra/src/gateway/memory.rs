//! In-memory fake backend - stands in for the REST API in tests.
//!
//! Behaves like the real thing as far as the client can tell: bearer
//! tokens, server-side category filtering, newest-first default order
//! and Laravel-style pagination envelopes. State lives in a mutex and
//! is lost when the instance drops.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use taskdeck_core::domain::{Category, NewTask, Page, Status, Task, TaskId, User, UserId};
use taskdeck_core::error::ApiError;
use taskdeck_core::ports::{AuthGateway, TasksGateway};
use taskdeck_core::session::AuthToken;

struct UserRecord {
    id: u64,
    name: String,
    email: String,
    password: String,
}

struct BackendState {
    users: Vec<UserRecord>,
    /// token -> user id
    sessions: HashMap<String, u64>,
    /// Newest first, matching the backend's default ordering - which is
    /// what makes "new items surface on page 1" actually true here.
    tasks: Vec<Task>,
    next_user_id: u64,
    next_task_id: u64,
    next_token: u64,
}

/// Fake backend implementing both gateways.
pub struct MemoryBackend {
    state: Mutex<BackendState>,
    per_page: u32,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_per_page(10)
    }

    pub fn with_per_page(per_page: u32) -> Self {
        Self {
            state: Mutex::new(BackendState {
                users: Vec::new(),
                sessions: HashMap::new(),
                tasks: Vec::new(),
                next_user_id: 1,
                next_task_id: 1,
                next_token: 1,
            }),
            per_page,
        }
    }

    /// Insert a task directly, bypassing auth. Test setup only.
    pub fn seed_task(
        &self,
        title: &str,
        due_date: Option<&str>,
        category: Option<Category>,
    ) -> TaskId {
        let mut state = self.lock();
        let id = TaskId::Number(state.next_task_id);
        state.next_task_id += 1;
        state.tasks.insert(
            0,
            Task {
                id: id.clone(),
                title: title.to_string(),
                status: Status::Pending,
                due_date: due_date.map(|s| s.to_string()),
                category,
            },
        );
        id
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn issue_token(state: &mut BackendState, user_id: u64) -> AuthToken {
        let raw = format!("token-{}", state.next_token);
        state.next_token += 1;
        state.sessions.insert(raw.clone(), user_id);
        AuthToken::new(raw)
    }

    fn authed(state: &BackendState, token: Option<&AuthToken>) -> Result<u64, ApiError> {
        let token = token.ok_or(ApiError::Unauthorized)?;
        state
            .sessions
            .get(token.as_str())
            .copied()
            .ok_or(ApiError::Unauthorized)
    }

    fn user_of(state: &BackendState, user_id: u64) -> Result<User, ApiError> {
        let record = state
            .users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or(ApiError::Unauthorized)?;
        Ok(User {
            id: UserId::Number(record.id),
            name: record.name.clone(),
            email: record.email.clone(),
        })
    }

    fn paginate(&self, matching: Vec<&Task>, page: u32) -> Page<Task> {
        let per_page = self.per_page as usize;
        let total = matching.len() as u64;
        let last_page = (matching.len().div_ceil(per_page)).max(1) as u32;

        let start = (page as usize - 1) * per_page;
        let data: Vec<Task> = matching
            .into_iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect();

        Page {
            current_page: page,
            data,
            total,
            per_page: self.per_page,
            last_page: Some(last_page),
            next_page_url: (page < last_page)
                .then(|| format!("/tasks?page={}", page + 1)),
            prev_page_url: (page > 1).then(|| format!("/tasks?page={}", page - 1)),
        }
    }
}

#[async_trait]
impl AuthGateway for MemoryBackend {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthToken>, ApiError> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.email == email) {
            return Err(ApiError::Rejected {
                status: 422,
                message: Some("The email has already been taken.".to_string()),
            });
        }

        let id = state.next_user_id;
        state.next_user_id += 1;
        state.users.push(UserRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
        Ok(Some(Self::issue_token(&mut state, id)))
    }

    async fn login(&self, email: &str, password: &str) -> Result<Option<AuthToken>, ApiError> {
        let mut state = self.lock();
        let id = state
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(|u| u.id)
            .ok_or(ApiError::Rejected {
                status: 422,
                message: Some("These credentials do not match our records.".to_string()),
            })?;
        Ok(Some(Self::issue_token(&mut state, id)))
    }

    async fn logout(&self, token: &AuthToken) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.sessions.remove(token.as_str());
        Ok(())
    }

    async fn profile(&self, token: &AuthToken) -> Result<User, ApiError> {
        let state = self.lock();
        let user_id = Self::authed(&state, Some(token))?;
        Self::user_of(&state, user_id)
    }

    async fn update_name(&self, token: &AuthToken, name: &str) -> Result<User, ApiError> {
        let mut state = self.lock();
        let user_id = Self::authed(&state, Some(token))?;
        let record = state
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(ApiError::Unauthorized)?;
        record.name = name.to_string();
        Self::user_of(&state, user_id)
    }

    async fn change_password(
        &self,
        token: &AuthToken,
        current: &str,
        new: &str,
        _confirmation: &str,
    ) -> Result<String, ApiError> {
        let mut state = self.lock();
        let user_id = Self::authed(&state, Some(token))?;
        let record = state
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(ApiError::Unauthorized)?;

        if record.password != current {
            return Err(ApiError::Rejected {
                status: 422,
                message: Some("The current password is incorrect.".to_string()),
            });
        }
        record.password = new.to_string();
        Ok("Password updated successfully.".to_string())
    }
}

#[async_trait]
impl TasksGateway for MemoryBackend {
    async fn list(
        &self,
        token: Option<&AuthToken>,
        page: u32,
        category: Option<Category>,
    ) -> Result<Page<Task>, ApiError> {
        let state = self.lock();
        Self::authed(&state, token)?;

        let matching: Vec<&Task> = state
            .tasks
            .iter()
            .filter(|task| category.is_none_or(|c| task.category == Some(c)))
            .collect();
        Ok(self.paginate(matching, page.max(1)))
    }

    async fn create(
        &self,
        token: Option<&AuthToken>,
        new_task: &NewTask,
    ) -> Result<Task, ApiError> {
        let mut state = self.lock();
        Self::authed(&state, token)?;

        let task = Task {
            id: TaskId::Number(state.next_task_id),
            title: new_task.title.trim().to_string(),
            status: Status::Pending,
            due_date: new_task.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            category: new_task.category,
        };
        state.next_task_id += 1;
        state.tasks.insert(0, task.clone());
        Ok(task)
    }

    async fn toggle(&self, token: Option<&AuthToken>, id: &TaskId) -> Result<Task, ApiError> {
        let mut state = self.lock();
        Self::authed(&state, token)?;

        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == *id)
            .ok_or(ApiError::Rejected {
                status: 404,
                message: Some("Task not found.".to_string()),
            })?;
        task.status = task.status.toggled();
        Ok(task.clone())
    }

    async fn delete(&self, token: Option<&AuthToken>, id: &TaskId) -> Result<(), ApiError> {
        let mut state = self.lock();
        Self::authed(&state, token)?;

        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != *id);
        if state.tasks.len() == before {
            return Err(ApiError::Rejected {
                status: 404,
                message: Some("Task not found.".to_string()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn backend_with_session() -> (MemoryBackend, AuthToken) {
        let backend = MemoryBackend::with_per_page(5);
        let token = backend
            .register("Ana", "ana@example.test", "longenough")
            .await
            .unwrap()
            .unwrap();
        (backend, token)
    }

    #[tokio::test]
    async fn test_requests_without_token_are_rejected() {
        let (backend, _token) = backend_with_session().await;
        let err = backend.list(None, 1, None).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn test_envelope_respects_per_page_and_total() {
        let (backend, token) = backend_with_session().await;
        for i in 0..12 {
            backend.seed_task(&format!("task {}", i), None, None);
        }

        let first = backend.list(Some(&token), 1, None).await.unwrap();
        assert_eq!(first.data.len(), 5);
        assert_eq!(first.total, 12);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = backend.list(Some(&token), 3, None).await.unwrap();
        assert_eq!(last.data.len(), 2);
        assert!(!last.has_next());
        assert!(last.has_previous());

        // data never exceeds per_page, total never undercounts.
        assert!(first.data.len() as u32 <= first.per_page);
        assert!(first.total >= first.data.len() as u64);
    }

    #[tokio::test]
    async fn test_category_filter_is_applied_server_side() {
        let (backend, token) = backend_with_session().await;
        backend.seed_task("report", None, Some(Category::Work));
        backend.seed_task("groceries", None, Some(Category::Shopping));
        backend.seed_task("standup", None, Some(Category::Work));

        let page = backend
            .list(Some(&token), 1, Some(Category::Work))
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(page.data.iter().all(|t| t.category == Some(Category::Work)));
    }

    #[tokio::test]
    async fn test_created_tasks_surface_first() {
        let (backend, token) = backend_with_session().await;
        backend.seed_task("old", None, None);
        backend
            .create(Some(&token), &NewTask::new("new"))
            .await
            .unwrap();

        let page = backend.list(Some(&token), 1, None).await.unwrap();
        assert_eq!(page.data[0].title, "new");
    }

    #[tokio::test]
    async fn test_logout_invalidates_the_token() {
        let (backend, token) = backend_with_session().await;
        backend.logout(&token).await.unwrap();
        let err = backend.profile(&token).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn test_wrong_current_password_is_rejected_with_message() {
        let (backend, token) = backend_with_session().await;
        let err = backend
            .change_password(&token, "wrong", "newpassword", "newpassword")
            .await
            .unwrap_err();
        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message.as_deref(), Some("The current password is incorrect."));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
