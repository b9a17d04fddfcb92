//! Bearer-token session lifecycle.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::User;
use crate::error::{ApiError, ClientError};
use crate::ports::{AuthGateway, TokenStore};
use crate::validate;

/// Opaque bearer credential issued by the backend at login or
/// registration. Possession implies authorization; the client never
/// inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The token plus the profile that verified it.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: AuthToken,
    pub user: Option<User>,
}

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Nothing attempted yet.
    Unknown,
    /// A token is held and a profile fetch is confirming it.
    Verifying,
    /// Token confirmed by a profile fetch.
    Authenticated,
    /// No token, or verification failed.
    Unauthenticated,
}

/// Drives the session lifecycle: the single owner of the token, with
/// defined entry points for login, logout and verification. The gate
/// cycles for the lifetime of the client; there is no terminal state.
pub struct SessionManager {
    gateway: Arc<dyn AuthGateway>,
    tokens: Arc<dyn TokenStore>,
    phase: AuthPhase,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            gateway,
            tokens,
            phase: AuthPhase::Unknown,
            session: None,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.session.as_ref().map(|s| &s.token)
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().and_then(|s| s.user.as_ref())
    }

    /// Restore the session persisted by a previous run.
    ///
    /// A stored token is only trusted once a profile fetch confirms it; a
    /// failing fetch discards the token and the client simply starts
    /// unauthenticated, so verification failure is not an error here.
    pub async fn bootstrap(&mut self) -> Result<(), ClientError> {
        let stored = self.tokens.load()?;
        let Some(token) = stored else {
            debug!("no stored token found");
            self.phase = AuthPhase::Unauthenticated;
            return Ok(());
        };

        info!("stored token found, verifying");
        if let Err(err) = self.verify(token).await {
            debug!(error = %err, "stored token rejected");
        }
        Ok(())
    }

    /// Exchange credentials for a token and verify it.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let token = self.gateway.login(email, password).await?;
        self.adopt_token(token).await
    }

    /// Create an account, then verify the returned token like a login.
    /// Inputs are validated before anything is dispatched.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        validate::registration(name, email, password)?;
        let token = self.gateway.register(name.trim(), email, password).await?;
        self.adopt_token(token).await
    }

    /// Drop the session. The backend call is best-effort: its failure
    /// must not keep the local session alive.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        if let Some(session) = self.session.take() {
            if let Err(err) = self.gateway.logout(&session.token).await {
                warn!(error = %err, "backend logout failed; clearing local session anyway");
            }
        }
        self.tokens.clear()?;
        self.phase = AuthPhase::Unauthenticated;
        info!("logged out");
        Ok(())
    }

    /// Re-fetch the profile for the current token. A 401 means the token
    /// died server-side; the session is torn down like a logout.
    pub async fn refresh_profile(&mut self) -> Result<User, ClientError> {
        let token = self.require_token()?.clone();
        match self.gateway.profile(&token).await {
            Ok(user) => {
                if let Some(session) = self.session.as_mut() {
                    session.user = Some(user.clone());
                }
                Ok(user)
            }
            Err(ApiError::Unauthorized) => {
                warn!("token no longer accepted; discarding session");
                self.discard_session()?;
                Err(ApiError::Unauthorized.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Update the display name. Rejects an empty or unchanged name before
    /// dispatch; the cached profile is refreshed from the response.
    pub async fn update_name(&mut self, name: &str) -> Result<User, ClientError> {
        let current = self.user().map(|u| u.name.clone());
        validate::user_name(name, current.as_deref())?;

        let token = self.require_token()?.clone();
        let user = self.gateway.update_name(&token, name.trim()).await?;
        if let Some(session) = self.session.as_mut() {
            session.user = Some(user.clone());
        }
        Ok(user)
    }

    /// Change the password; returns the backend's confirmation message.
    pub async fn change_password(
        &mut self,
        current: &str,
        new: &str,
        confirmation: &str,
    ) -> Result<String, ClientError> {
        validate::password_change(current, new, confirmation)?;
        let token = self.require_token()?.clone();
        let message = self
            .gateway
            .change_password(&token, current, new, confirmation)
            .await?;
        Ok(message)
    }

    /// Store a freshly issued token and verify it. A response without a
    /// token stores nothing and leaves the session unauthenticated.
    async fn adopt_token(&mut self, token: Option<AuthToken>) -> Result<(), ClientError> {
        let Some(token) = token else {
            self.phase = AuthPhase::Unauthenticated;
            return Err(ApiError::Decode("response did not include a token".to_string()).into());
        };

        self.tokens.save(&token)?;
        self.verify(token).await
    }

    /// Confirm a token with a profile fetch. Failure discards the token.
    async fn verify(&mut self, token: AuthToken) -> Result<(), ClientError> {
        self.phase = AuthPhase::Verifying;
        match self.gateway.profile(&token).await {
            Ok(user) => {
                self.session = Some(Session {
                    token,
                    user: Some(user),
                });
                self.phase = AuthPhase::Authenticated;
                info!("session verified");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "profile fetch failed; discarding token");
                self.discard_session()?;
                Err(err.into())
            }
        }
    }

    fn discard_session(&mut self) -> Result<(), ClientError> {
        self.session = None;
        self.phase = AuthPhase::Unauthenticated;
        self.tokens.clear()?;
        Ok(())
    }

    fn require_token(&self) -> Result<&AuthToken, ClientError> {
        self.token().ok_or(ClientError::Api(ApiError::Unauthorized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::error::TokenStoreError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubGateway {
        issued_token: Option<AuthToken>,
        profile_ok: bool,
        logout_fails: bool,
        profile_calls: AtomicUsize,
    }

    impl StubGateway {
        fn new() -> Self {
            Self {
                issued_token: Some(AuthToken::new("tok-1")),
                profile_ok: true,
                logout_fails: false,
                profile_calls: AtomicUsize::new(0),
            }
        }

        fn user() -> User {
            User {
                id: UserId::Number(1),
                name: "Ana".to_string(),
                email: "ana@example.test".to_string(),
            }
        }
    }

    #[async_trait]
    impl AuthGateway for StubGateway {
        async fn register(
            &self,
            _name: &str,
            _email: &str,
            _password: &str,
        ) -> Result<Option<AuthToken>, ApiError> {
            Ok(self.issued_token.clone())
        }

        async fn login(&self, _email: &str, _password: &str) -> Result<Option<AuthToken>, ApiError> {
            Ok(self.issued_token.clone())
        }

        async fn logout(&self, _token: &AuthToken) -> Result<(), ApiError> {
            if self.logout_fails {
                Err(ApiError::Transport("connection reset".to_string()))
            } else {
                Ok(())
            }
        }

        async fn profile(&self, _token: &AuthToken) -> Result<User, ApiError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            if self.profile_ok {
                Ok(Self::user())
            } else {
                Err(ApiError::Unauthorized)
            }
        }

        async fn update_name(&self, _token: &AuthToken, name: &str) -> Result<User, ApiError> {
            Ok(User {
                name: name.to_string(),
                ..Self::user()
            })
        }

        async fn change_password(
            &self,
            _token: &AuthToken,
            _current: &str,
            _new: &str,
            _confirmation: &str,
        ) -> Result<String, ApiError> {
            Ok("Password updated successfully.".to_string())
        }
    }

    #[derive(Default)]
    struct MemTokens(Mutex<Option<AuthToken>>);

    impl TokenStore for MemTokens {
        fn load(&self) -> Result<Option<AuthToken>, TokenStoreError> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError> {
            *self.0.lock().unwrap() = Some(token.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), TokenStoreError> {
            *self.0.lock().unwrap() = None;
            Ok(())
        }
    }

    fn manager(gateway: StubGateway, tokens: Arc<MemTokens>) -> SessionManager {
        SessionManager::new(Arc::new(gateway), tokens)
    }

    #[tokio::test]
    async fn test_bootstrap_without_token_is_unauthenticated() {
        let mut session = manager(StubGateway::new(), Arc::new(MemTokens::default()));
        session.bootstrap().await.unwrap();
        assert_eq!(session.phase(), AuthPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn test_bootstrap_verifies_stored_token() {
        let tokens = Arc::new(MemTokens::default());
        tokens.save(&AuthToken::new("stored")).unwrap();

        let mut session = manager(StubGateway::new(), tokens);
        session.bootstrap().await.unwrap();

        assert_eq!(session.phase(), AuthPhase::Authenticated);
        assert_eq!(session.user().unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn test_failed_verification_clears_stored_token() {
        let tokens = Arc::new(MemTokens::default());
        tokens.save(&AuthToken::new("stale")).unwrap();

        let gateway = StubGateway {
            profile_ok: false,
            ..StubGateway::new()
        };
        let mut session = manager(gateway, tokens.clone());
        session.bootstrap().await.unwrap();

        assert_eq!(session.phase(), AuthPhase::Unauthenticated);
        assert_eq!(tokens.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_stores_and_verifies_token() {
        let tokens = Arc::new(MemTokens::default());
        let mut session = manager(StubGateway::new(), tokens.clone());

        session.login("ana@example.test", "longenough").await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(tokens.load().unwrap(), Some(AuthToken::new("tok-1")));
    }

    #[tokio::test]
    async fn test_login_without_token_stores_nothing() {
        let tokens = Arc::new(MemTokens::default());
        let gateway = StubGateway {
            issued_token: None,
            ..StubGateway::new()
        };
        let mut session = manager(gateway, tokens.clone());

        let err = session
            .login("ana@example.test", "longenough")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Api(ApiError::Decode(_))));
        assert_eq!(session.phase(), AuthPhase::Unauthenticated);
        assert_eq!(tokens.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_validates_before_dispatch() {
        let gateway = Arc::new(StubGateway::new());
        let mut session = SessionManager::new(gateway.clone(), Arc::new(MemTokens::default()));

        let err = session
            .register("Ana", "ana@example.test", "short")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        // Nothing was dispatched, so no profile fetch happened either.
        assert_eq!(session.phase(), AuthPhase::Unknown);
        assert_eq!(gateway.profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_logout_survives_backend_failure() {
        let tokens = Arc::new(MemTokens::default());
        let gateway = StubGateway {
            logout_fails: true,
            ..StubGateway::new()
        };
        let mut session = manager(gateway, tokens.clone());
        session.login("ana@example.test", "longenough").await.unwrap();

        session.logout().await.unwrap();

        assert_eq!(session.phase(), AuthPhase::Unauthenticated);
        assert_eq!(tokens.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_unchanged_name_is_rejected_client_side() {
        let mut session = manager(StubGateway::new(), Arc::new(MemTokens::default()));
        session.login("ana@example.test", "longenough").await.unwrap();

        let err = session.update_name("Ana").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_name_refreshes_cached_profile() {
        let mut session = manager(StubGateway::new(), Arc::new(MemTokens::default()));
        session.login("ana@example.test", "longenough").await.unwrap();

        session.update_name("Ana Maria").await.unwrap();
        assert_eq!(session.user().unwrap().name, "Ana Maria");
    }

    #[tokio::test]
    async fn test_change_password_returns_backend_message() {
        let mut session = manager(StubGateway::new(), Arc::new(MemTokens::default()));
        session.login("ana@example.test", "longenough").await.unwrap();

        let message = session
            .change_password("oldpassword", "newpassword", "newpassword")
            .await
            .unwrap();
        assert_eq!(message, "Password updated successfully.");
    }
}
