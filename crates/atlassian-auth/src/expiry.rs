//! Token validity window
//!
//! A token is treated as expired [`TOKEN_EXPIRY_MARGIN_SECS`] before its
//! nominal expiry so it cannot lapse while a request is in flight.
//!
//! [`TOKEN_EXPIRY_MARGIN_SECS`]: crate::constants::TOKEN_EXPIRY_MARGIN_SECS

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::credential::OAuthCredential;
use crate::error::{Error, Result};

/// Current unix time in seconds.
pub fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Whether `credential` must be refreshed before use at `now`.
///
/// True when there is no access token, no expiry, or the expiry falls within
/// `margin_secs` of `now`. Pure; performs no I/O.
pub fn is_expired(credential: &OAuthCredential, now: u64, margin_secs: u64) -> bool {
    if credential.access_token.is_none() {
        return true;
    }
    match credential.expires_at {
        Some(expires_at) => expires_at <= now.saturating_add(margin_secs),
        None => true,
    }
}

/// Something that can trade a credential's refresh token for new tokens.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility (`&dyn Refresh`).
pub trait Refresh: Send + Sync {
    fn refresh<'a>(
        &'a self,
        credential: &'a OAuthCredential,
    ) -> Pin<Box<dyn Future<Output = Result<OAuthCredential>> + Send + 'a>>;
}

/// Return a credential that is valid right now.
///
/// An unexpired credential comes back as-is with no I/O. An expired one is
/// refreshed if it has a refresh token; otherwise this fails without touching
/// the network.
pub async fn ensure_valid(
    credential: &OAuthCredential,
    refresher: &dyn Refresh,
) -> Result<OAuthCredential> {
    if !credential.is_expired_at(now_secs()) {
        return Ok(credential.clone());
    }
    if credential.refresh_token.is_none() {
        debug!(client_id = %credential.client_id, "token expired and no refresh token available");
        return Err(Error::MissingRefreshToken);
    }
    debug!(client_id = %credential.client_id, "token expired or expiring soon, refreshing");
    refresher.refresh(credential).await
}
