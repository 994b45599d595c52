//! Bearer token injection into outbound request headers
//!
//! [`bind`] is the last step before dispatch: it makes sure the credential is
//! usable (refreshing a managed one if needed) and writes
//! `Authorization: Bearer <token>` into the caller's header map. No other
//! header is read or changed, and on failure the map is left as it was.
//!
//! A failed bind means requests would go out unauthenticated; callers must
//! check the result before dispatching anything that needs auth.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, error, info, warn};

use crate::credential::Credential;
use crate::error::{Error, Result};
use crate::expiry::{Refresh, ensure_valid};

/// Attach `credential`'s bearer token to `headers`.
///
/// Returns the credential to keep using: unchanged for a direct token or a
/// still-valid managed token, or the refreshed managed credential. Callers
/// replace the credential they hold with the returned one. If a refresh
/// succeeds but its token cannot be attached, the error is
/// [`Error::UnusableRefreshedToken`] and still carries the new credential.
pub async fn bind(
    headers: &mut HeaderMap,
    credential: &Credential,
    refresher: &dyn Refresh,
) -> Result<Credential> {
    match credential {
        Credential::Direct(direct) => {
            if direct.access_token.is_empty() {
                error!("oauth access token configuration provided as empty string");
                return Err(Error::InvalidCredentials(
                    "direct access token is empty".into(),
                ));
            }
            set_bearer(headers, direct.access_token())?;
            info!(
                cloud_id = %direct.cloud_id,
                "using provided OAuth access token directly (no refresh token)"
            );
            Ok(credential.clone())
        }
        Credential::Managed(oauth) => {
            let valid = match ensure_valid(oauth, refresher).await {
                Ok(valid) => valid,
                Err(e) => {
                    warn!(
                        client_id = %oauth.client_id,
                        error = %e,
                        "failed to obtain a valid access token"
                    );
                    return Err(e);
                }
            };
            let token = valid.access_token().ok_or_else(|| {
                Error::InvalidCredentials("credential has no access token after validation".into())
            })?;
            if let Err(e) = set_bearer(headers, token) {
                if valid.access_token() == oauth.access_token() {
                    return Err(e);
                }
                error!(
                    client_id = %valid.client_id,
                    error = %e,
                    "refreshed access token is not a valid header value"
                );
                return Err(Error::UnusableRefreshedToken {
                    refreshed: Box::new(valid),
                    reason: e.to_string(),
                });
            }
            debug!(client_id = %valid.client_id, "bearer token attached");
            Ok(Credential::Managed(valid))
        }
    }
}

/// Insert the `Authorization` header, marked sensitive so it is not logged.
///
/// Validates the value before touching the map.
fn set_bearer(headers: &mut HeaderMap, token: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| Error::InvalidCredentials(format!("invalid token value: {e}")))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(())
}
