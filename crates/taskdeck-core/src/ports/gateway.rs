//! Backend gateway ports - the REST API as the client sees it.

use async_trait::async_trait;

use crate::domain::{Category, NewTask, Page, Task, TaskId, User};
use crate::error::ApiError;
use crate::session::AuthToken;

/// Authentication and profile endpoints.
///
/// Registration and login may legitimately come back without a token
/// (a misbehaving backend); callers decide what that means, so the
/// gateway reports it as `Ok(None)` rather than inventing an error.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthToken>, ApiError>;

    async fn login(&self, email: &str, password: &str) -> Result<Option<AuthToken>, ApiError>;

    async fn logout(&self, token: &AuthToken) -> Result<(), ApiError>;

    /// Fetch the profile of the token's owner. Doubles as token
    /// verification: a 401 here means the token is dead.
    async fn profile(&self, token: &AuthToken) -> Result<User, ApiError>;

    async fn update_name(&self, token: &AuthToken, name: &str) -> Result<User, ApiError>;

    /// Returns the backend's confirmation message.
    async fn change_password(
        &self,
        token: &AuthToken,
        current: &str,
        new: &str,
        confirmation: &str,
    ) -> Result<String, ApiError>;
}

/// Task collection endpoints.
///
/// Every method takes the token as `Option` - an absent token sends an
/// unauthenticated request (no Authorization header), which the backend
/// rejects for these routes. That keeps the "no token" behavior the
/// backend's decision, not the client's.
#[async_trait]
pub trait TasksGateway: Send + Sync {
    /// Fetch one page, optionally filtered by category. Filtering is
    /// applied server-side.
    async fn list(
        &self,
        token: Option<&AuthToken>,
        page: u32,
        category: Option<Category>,
    ) -> Result<Page<Task>, ApiError>;

    async fn create(&self, token: Option<&AuthToken>, new_task: &NewTask)
    -> Result<Task, ApiError>;

    /// Flip a task between pending and completed.
    async fn toggle(&self, token: Option<&AuthToken>, id: &TaskId) -> Result<Task, ApiError>;

    async fn delete(&self, token: Option<&AuthToken>, id: &TaskId) -> Result<(), ApiError>;
}
