//! Authorization request construction
//!
//! Builds the URL the user opens in a browser to grant the app access, plus
//! the opaque `state` value that protects the round trip against CSRF. The
//! redirect back to `redirect_uri` is handled outside this crate; whatever
//! receives it hands the `code` to [`TokenClient::exchange_code`].
//!
//! [`TokenClient::exchange_code`]: crate::TokenClient::exchange_code

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;
use reqwest::Url;

use crate::constants::AUDIENCE;
use crate::credential::OAuthCredential;
use crate::error::{Error, Result};

/// Generate a random `state` value: 32 random bytes as URL-safe base64
/// without padding (43 characters).
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Build the authorization URL for `credential` against `endpoint`.
///
/// Pure string construction; no I/O. Fails only if `endpoint` is not a URL.
pub fn authorization_url(
    endpoint: &str,
    credential: &OAuthCredential,
    state: &str,
) -> Result<String> {
    let url = Url::parse_with_params(
        endpoint,
        &[
            ("audience", AUDIENCE),
            ("client_id", credential.client_id.as_str()),
            ("scope", credential.scope.as_str()),
            ("redirect_uri", credential.redirect_uri.as_str()),
            ("state", state),
            ("response_type", "code"),
            ("prompt", "consent"),
        ],
    )
    .map_err(|e| Error::InvalidCredentials(format!("invalid authorization endpoint: {e}")))?;
    Ok(url.into())
}
