//! Application state - the core services wired to real infrastructure.

use std::sync::Arc;

use anyhow::Context;

use taskdeck_core::{SessionManager, TaskBoard};
use taskdeck_infra::{FileTokenStore, HttpGateway, HttpGatewayConfig};

use crate::config::AppConfig;

pub struct AppState {
    gateway: Arc<HttpGateway>,
    pub session: SessionManager,
}

impl AppState {
    /// Wire the HTTP gateway and the token store, then restore any
    /// session persisted by a previous run.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let gateway = Arc::new(
            HttpGateway::new(HttpGatewayConfig {
                base_url: config.base_url.clone(),
                timeout: config.timeout,
            })
            .context("failed to build HTTP client")?,
        );

        let token_path = match &config.token_path {
            Some(path) => path.clone(),
            None => FileTokenStore::default_path()
                .context("cannot resolve the token file location")?,
        };
        let tokens = Arc::new(FileTokenStore::new(token_path));

        let mut session = SessionManager::new(gateway.clone(), tokens);
        session
            .bootstrap()
            .await
            .context("failed to restore the stored session")?;

        Ok(Self { gateway, session })
    }

    /// A task board bound to the current session's token.
    pub fn board(&self) -> TaskBoard {
        TaskBoard::new(self.gateway.clone(), self.session.token().cloned())
    }
}
