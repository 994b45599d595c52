//! Atlassian OAuth credential library
//!
//! Resolves which credential governs outbound Atlassian Cloud requests, keeps
//! managed OAuth tokens fresh, persists them (OS keyring with a JSON file
//! fallback), and injects the bearer token into request headers. The crate
//! has no dependency on the CLI binary and can be embedded on its own.
//!
//! Credential flow:
//! 1. `resolver::resolve()` picks a direct token or a managed OAuth credential
//! 2. For a first run, the user opens `TokenClient::authorization_url()`
//! 3. The redirect's code goes to `TokenClient::exchange_code()`
//! 4. Tokens are stored via `store::CredentialStore::save()`
//! 5. `session::bind()` attaches the bearer token, refreshing on expiry
//! 6. Refreshed credentials are returned to the caller and persisted

pub mod authorize;
pub mod constants;
pub mod credential;
pub mod error;
pub mod expiry;
pub mod resolver;
pub mod session;
pub mod store;
pub mod token;

#[cfg(test)]
mod testing;

pub use authorize::generate_state;
pub use constants::*;
pub use credential::{Credential, DirectTokenCredential, OAuthCredential};
pub use error::{Error, Result};
pub use expiry::{Refresh, ensure_valid, is_expired, now_secs};
pub use resolver::{resolve, resolve_direct_token, resolve_managed};
pub use session::bind;
pub use store::{CredentialStore, FileTokenStore, KeyringVault, SecretVault, StoredTokens};
pub use token::{AccessibleResource, Endpoints, TokenClient, TokenResponse};
