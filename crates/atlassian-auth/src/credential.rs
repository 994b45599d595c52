//! Credential variants
//!
//! Two ways to authenticate against Atlassian Cloud:
//! - [`OAuthCredential`]: a registered OAuth app (client id/secret) whose
//!   tokens this crate obtains, refreshes and persists.
//! - [`DirectTokenCredential`]: an access token issued out-of-band, used as-is
//!   and never refreshed.
//!
//! Refresh and exchange never mutate a credential in place. They return a new
//! value, and the caller replaces the one it holds.

use common::Secret;

use crate::constants::TOKEN_EXPIRY_MARGIN_SECS;
use crate::expiry::is_expired;
use crate::store::StoredTokens;

/// Managed OAuth credential.
///
/// `expires_at` is a unix timestamp in seconds (absolute, not a delta) and is
/// only meaningful while `access_token` is set.
#[derive(Debug, Clone)]
pub struct OAuthCredential {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub redirect_uri: String,
    pub scope: String,
    /// Cloud site the token is scoped to, resolved after authentication
    pub cloud_id: Option<String>,
    pub access_token: Option<Secret<String>>,
    pub refresh_token: Option<Secret<String>>,
    pub expires_at: Option<u64>,
}

impl OAuthCredential {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Secret::new(client_secret.into()),
            redirect_uri: redirect_uri.into(),
            scope: scope.into(),
            cloud_id: None,
            access_token: None,
            refresh_token: None,
            expires_at: None,
        }
    }

    /// Placeholder used when OAuth is switched on but the app registration
    /// is supplied later (for example by an external authorization step).
    pub fn minimal(cloud_id: Option<String>) -> Self {
        Self {
            cloud_id,
            ..Self::new("", "", "", "")
        }
    }

    pub fn with_cloud_id(mut self, cloud_id: impl Into<String>) -> Self {
        self.cloud_id = Some(cloud_id.into());
        self
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(Secret::as_str)
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(Secret::as_str)
    }

    /// Whether all four app registration fields are present.
    pub fn has_client_config(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.redirect_uri.is_empty()
            && !self.scope.is_empty()
    }

    /// Expired (or about to expire) relative to `now`, using the standard margin.
    pub fn is_expired_at(&self, now: u64) -> bool {
        is_expired(self, now, TOKEN_EXPIRY_MARGIN_SECS)
    }

    /// Fold a persisted record into this credential.
    ///
    /// Token fields come from the record. A cloud id already on the credential
    /// (from the environment) wins over the stored one.
    pub fn merge_stored(mut self, stored: StoredTokens) -> Self {
        self.access_token = stored.access_token.map(Secret::new);
        self.refresh_token = stored.refresh_token.map(Secret::new);
        self.expires_at = stored.expires_at;
        if self.cloud_id.is_none() {
            self.cloud_id = stored.cloud_id;
        }
        self
    }

    /// The durable projection written to the credential store.
    pub fn to_stored(&self) -> StoredTokens {
        StoredTokens {
            refresh_token: self.refresh_token().map(str::to_owned),
            access_token: self.access_token().map(str::to_owned),
            expires_at: self.expires_at,
            cloud_id: self.cloud_id.clone(),
        }
    }

    /// New credential carrying freshly issued tokens.
    ///
    /// A `None` refresh token keeps the current one (the provider did not
    /// rotate it).
    pub(crate) fn with_tokens(
        &self,
        access_token: String,
        refresh_token: Option<String>,
        expires_in: u64,
        now: u64,
    ) -> Self {
        let mut next = self.clone();
        next.access_token = Some(Secret::new(access_token));
        if let Some(refresh) = refresh_token {
            next.refresh_token = Some(Secret::new(refresh));
        }
        next.expires_at = Some(now.saturating_add(expires_in));
        next
    }
}

/// Bring-your-own access token. No refresh capability, no persistence.
#[derive(Debug, Clone)]
pub struct DirectTokenCredential {
    pub cloud_id: String,
    pub access_token: Secret<String>,
}

impl DirectTokenCredential {
    pub fn new(cloud_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            cloud_id: cloud_id.into(),
            access_token: Secret::new(access_token.into()),
        }
    }

    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }
}

/// The single credential governing a session.
#[derive(Debug, Clone)]
pub enum Credential {
    Managed(OAuthCredential),
    Direct(DirectTokenCredential),
}

impl Credential {
    /// Short label for logs and status output.
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::Managed(_) => "oauth",
            Credential::Direct(_) => "direct-token",
        }
    }

    pub fn cloud_id(&self) -> Option<&str> {
        match self {
            Credential::Managed(c) => c.cloud_id.as_deref(),
            Credential::Direct(c) => Some(c.cloud_id.as_str()),
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        match self {
            Credential::Managed(c) => c.access_token(),
            Credential::Direct(c) => Some(c.access_token()).filter(|t| !t.is_empty()),
        }
    }

    /// Whether the credential can authorize a request at `now` without any
    /// network round trip.
    pub fn is_usable(&self, now: u64) -> bool {
        match self {
            Credential::Managed(c) => !c.is_expired_at(now),
            Credential::Direct(c) => !c.access_token.is_empty(),
        }
    }

    /// Whether an expired token could be renewed.
    pub fn can_refresh(&self) -> bool {
        match self {
            Credential::Managed(c) => c.refresh_token.is_some(),
            Credential::Direct(_) => false,
        }
    }
}

impl From<OAuthCredential> for Credential {
    fn from(value: OAuthCredential) -> Self {
        Credential::Managed(value)
    }
}

impl From<DirectTokenCredential> for Credential {
    fn from(value: DirectTokenCredential) -> Self {
        Credential::Direct(value)
    }
}
