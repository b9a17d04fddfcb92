//! HTTP implementation of the backend gateways.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use taskdeck_core::domain::{Category, NewTask, Page, Task, TaskId, User};
use taskdeck_core::error::ApiError;
use taskdeck_core::ports::{AuthGateway, TasksGateway};
use taskdeck_core::session::AuthToken;
use taskdeck_shared::ErrorBody;
use taskdeck_shared::dto::{
    AuthResponse, ChangePasswordRequest, CreateTaskRequest, LoginRequest, MessageResponse,
    RegisterRequest, UpdateNameRequest,
};

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    /// Fixed timeout applied to every request. There are no retries; a
    /// timed-out request surfaces as a transport error.
    pub timeout: Duration,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Talks to the real backend over HTTP with one shared `reqwest` client.
pub struct HttpGateway {
    base_url: String,
    http: reqwest::Client,
}

/// `GET /user` style responses: the profile is usually wrapped in a
/// `user` envelope, but older backend revisions returned it bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserPayload {
    Wrapped { user: User },
    Plain(User),
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        match payload {
            UserPayload::Wrapped { user } => user,
            UserPayload::Plain(user) => user,
        }
    }
}

impl HttpGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer header when a token is held. No token means an
    /// unauthenticated request; the backend decides what to do with it.
    fn bearer(builder: RequestBuilder, token: Option<&AuthToken>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        // Pull a human-readable message out of the error body if there
        // is one; the body shape is best-effort.
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.display_message());
        debug!(status = status.as_u16(), ?message, "request rejected");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthToken>, ApiError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = Self::send(self.http.post(self.url("/register")).json(&body)).await?;
        let auth: AuthResponse = Self::decode(response).await?;
        Ok(auth.token.map(AuthToken::new))
    }

    async fn login(&self, email: &str, password: &str) -> Result<Option<AuthToken>, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = Self::send(self.http.post(self.url("/login")).json(&body)).await?;
        let auth: AuthResponse = Self::decode(response).await?;
        Ok(auth.token.map(AuthToken::new))
    }

    async fn logout(&self, token: &AuthToken) -> Result<(), ApiError> {
        let builder = Self::bearer(self.http.post(self.url("/logout")), Some(token));
        Self::send(builder).await?;
        Ok(())
    }

    async fn profile(&self, token: &AuthToken) -> Result<User, ApiError> {
        let builder = Self::bearer(self.http.get(self.url("/user")), Some(token));
        let response = Self::send(builder).await?;
        let payload: UserPayload = Self::decode(response).await?;
        Ok(payload.into())
    }

    async fn update_name(&self, token: &AuthToken, name: &str) -> Result<User, ApiError> {
        let body = UpdateNameRequest {
            name: name.to_string(),
        };
        let builder = Self::bearer(self.http.put(self.url("/user/name")), Some(token)).json(&body);
        let response = Self::send(builder).await?;
        let payload: UserPayload = Self::decode(response).await?;
        Ok(payload.into())
    }

    async fn change_password(
        &self,
        token: &AuthToken,
        current: &str,
        new: &str,
        confirmation: &str,
    ) -> Result<String, ApiError> {
        let body = ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
            new_password_confirmation: confirmation.to_string(),
        };
        let builder =
            Self::bearer(self.http.put(self.url("/user/password")), Some(token)).json(&body);
        let response = Self::send(builder).await?;
        let reply: MessageResponse = Self::decode(response).await?;
        Ok(reply.message)
    }
}

#[async_trait]
impl TasksGateway for HttpGateway {
    async fn list(
        &self,
        token: Option<&AuthToken>,
        page: u32,
        category: Option<Category>,
    ) -> Result<Page<Task>, ApiError> {
        let mut query = vec![("page", page.to_string())];
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }

        let builder = Self::bearer(self.http.get(self.url("/tasks")), token).query(&query);
        let response = Self::send(builder).await?;
        Self::decode(response).await
    }

    async fn create(
        &self,
        token: Option<&AuthToken>,
        new_task: &NewTask,
    ) -> Result<Task, ApiError> {
        let body = CreateTaskRequest {
            title: new_task.title.trim().to_string(),
            due_date: new_task.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            category: new_task.category.map(|c| c.to_string()),
        };
        let builder = Self::bearer(self.http.post(self.url("/tasks")), token).json(&body);
        let response = Self::send(builder).await?;
        Self::decode(response).await
    }

    async fn toggle(&self, token: Option<&AuthToken>, id: &TaskId) -> Result<Task, ApiError> {
        let url = self.url(&format!("/tasks/{}/toggle-status", id));
        let response = Self::send(Self::bearer(self.http.put(url), token)).await?;
        Self::decode(response).await
    }

    async fn delete(&self, token: Option<&AuthToken>, id: &TaskId) -> Result<(), ApiError> {
        let url = self.url(&format!("/tasks/{}", id));
        Self::send(Self::bearer(self.http.delete(url), token)).await?;
        Ok(())
    }
}
