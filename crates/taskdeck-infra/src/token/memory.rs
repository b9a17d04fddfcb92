//! In-memory token store - used by tests and anywhere persistence across
//! runs is not wanted.

use std::sync::Mutex;

use taskdeck_core::error::TokenStoreError;
use taskdeck_core::ports::TokenStore;
use taskdeck_core::session::AuthToken;

#[derive(Default)]
pub struct InMemoryTokenStore {
    slot: Mutex<Option<AuthToken>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already "persisted", as if a previous run had
    /// saved one.
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<AuthToken>, TokenStoreError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError> {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let store = InMemoryTokenStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&AuthToken::new("t")).unwrap();
        assert_eq!(store.load().unwrap(), Some(AuthToken::new("t")));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
