//! Error types for OAuth credential operations

/// Errors from OAuth credential operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The refresh succeeded and was persisted, but the new access token is
    /// not a valid header value. Callers should still replace their held
    /// credential with `refreshed`, since the old refresh token may be spent.
    #[error("refreshed access token cannot be attached: {reason}")]
    UnusableRefreshedToken {
        refreshed: Box<crate::credential::OAuthCredential>,
        reason: String,
    },

    #[error("no refresh token available")]
    MissingRefreshToken,

    #[error("no accessible cloud site for this token")]
    NoAccessibleResources,

    #[error("keyring error: {0}")]
    Vault(String),

    #[error("credential parse error: {0}")]
    CredentialParse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
