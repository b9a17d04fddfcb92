//! File-backed token store.
//!
//! The terminal-world analogue of the browser's localStorage slot: one
//! small file holding the raw token, nothing else.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use taskdeck_core::error::TokenStoreError;
use taskdeck_core::ports::TokenStore;
use taskdeck_core::session::AuthToken;

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's config directory,
    /// e.g. `~/.config/taskdeck/token`.
    pub fn default_path() -> Result<PathBuf, TokenStoreError> {
        let base = dirs::config_dir().ok_or_else(|| {
            TokenStoreError::Read("cannot determine config directory".to_string())
        })?;
        Ok(base.join("taskdeck").join("token"))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AuthToken>, TokenStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(TokenStoreError::Read(err.to_string())),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(AuthToken::new(trimmed)))
        }
    }

    fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| TokenStoreError::Write(e.to_string()))?;
        }
        fs::write(&self.path, token.as_str())
            .map_err(|e| TokenStoreError::Write(e.to_string()))?;
        debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(TokenStoreError::Write(err.to_string())),
        }
    }
}
