//! Token persistence port - the localStorage of the terminal world.

use crate::error::TokenStoreError;
use crate::session::AuthToken;

/// Persists the bearer token between runs.
///
/// Synchronous on purpose: implementations touch a few bytes of local
/// state, nothing worth an executor round-trip.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<AuthToken>, TokenStoreError>;

    fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError>;

    /// Remove any stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), TokenStoreError>;
}
