//! OAuth token exchange and refresh
//!
//! Handles the token endpoint interactions plus the follow-up lookup of the
//! cloud site a token belongs to:
//! 1. Authorization code exchange (initial OAuth flow completion)
//! 2. Token refresh
//! 3. Accessible-resources lookup to fill in `cloud_id`
//!
//! Every successful exchange or refresh produces a new credential, resolves
//! its cloud id if unknown, and persists it through the [`CredentialStore`].
//! Failed calls leave the caller's credential exactly as it was.

use std::future::Future;
use std::pin::Pin;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::authorize;
use crate::constants::{ACCESSIBLE_RESOURCES_ENDPOINT, AUTHORIZE_ENDPOINT, TOKEN_ENDPOINT};
use crate::credential::OAuthCredential;
use crate::error::{Error, Result};
use crate::expiry::{Refresh, now_secs};
use crate::store::CredentialStore;

/// Response from the token endpoint for both exchange and refresh.
///
/// `expires_in` is a delta in seconds from the response time. An exchange
/// response must carry a refresh token. Atlassian rotates refresh tokens, but
/// a refresh response without one means the previous refresh token stays valid.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires (delta, not absolute)
    pub expires_in: u64,
}

/// One cloud site reachable with a token.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessibleResource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Identity provider URLs. Defaults are Atlassian's production endpoints.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub token: String,
    pub authorize: String,
    pub accessible_resources: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token: TOKEN_ENDPOINT.into(),
            authorize: AUTHORIZE_ENDPOINT.into(),
            accessible_resources: ACCESSIBLE_RESOURCES_ENDPOINT.into(),
        }
    }
}

impl Endpoints {
    /// All three endpoints under one base URL (`{base}/oauth/token`,
    /// `{base}/authorize`, `{base}/oauth/token/accessible-resources`).
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            token: format!("{base}/oauth/token"),
            authorize: format!("{base}/authorize"),
            accessible_resources: format!("{base}/oauth/token/accessible-resources"),
        }
    }
}

/// Talks to the identity provider on behalf of [`OAuthCredential`]s.
///
/// Network timeouts are whatever the supplied `reqwest::Client` enforces.
#[derive(Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    store: CredentialStore,
}

impl TokenClient {
    pub fn new(http: reqwest::Client, store: CredentialStore) -> Self {
        Self {
            http,
            endpoints: Endpoints::default(),
            store,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Authorization URL for `credential` with the given CSRF `state`.
    pub fn authorization_url(&self, credential: &OAuthCredential, state: &str) -> Result<String> {
        authorize::authorization_url(&self.endpoints.authorize, credential, state)
    }

    /// Exchange an authorization code for tokens (initial OAuth flow).
    ///
    /// The user has authorized in their browser and the redirect delivered
    /// `code`. Returns the credential with tokens filled in, cloud id
    /// resolved where possible, and already persisted. A response without a
    /// refresh token is malformed and nothing is persisted.
    pub async fn exchange_code(
        &self,
        credential: &OAuthCredential,
        code: &str,
    ) -> Result<OAuthCredential> {
        let tokens = self
            .post_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", credential.client_id.as_str()),
                ("client_secret", credential.client_secret.as_str()),
                ("redirect_uri", credential.redirect_uri.as_str()),
            ])
            .await?;

        let Some(refresh_token) = tokens.refresh_token else {
            warn!(
                client_id = %credential.client_id,
                "no refresh token issued; add the offline_access scope to allow refresh"
            );
            return Err(Error::MalformedResponse(
                "authorization_code response has no refresh_token".into(),
            ));
        };

        let updated = credential.with_tokens(
            tokens.access_token,
            Some(refresh_token),
            tokens.expires_in,
            now_secs(),
        );
        info!(client_id = %credential.client_id, "authorization code exchanged for tokens");
        Ok(self.finish(updated).await)
    }

    /// Refresh an access token using the credential's refresh token.
    ///
    /// Without a refresh token this fails immediately and makes no request.
    pub async fn refresh(&self, credential: &OAuthCredential) -> Result<OAuthCredential> {
        let Some(refresh) = credential.refresh_token() else {
            debug!(client_id = %credential.client_id, "refresh requested without a refresh token");
            return Err(Error::MissingRefreshToken);
        };

        let tokens = self
            .post_token(&[
                ("grant_type", "refresh_token"),
                ("client_id", credential.client_id.as_str()),
                ("client_secret", credential.client_secret.as_str()),
                ("refresh_token", refresh),
            ])
            .await?;

        let updated = credential.with_tokens(
            tokens.access_token,
            tokens.refresh_token,
            tokens.expires_in,
            now_secs(),
        );
        info!(client_id = %credential.client_id, "access token refreshed");
        Ok(self.finish(updated).await)
    }

    /// Look up the first cloud site the credential's access token can reach.
    ///
    /// Returns `Ok(None)` without any request when there is no access token.
    pub async fn resolve_cloud_id(&self, credential: &OAuthCredential) -> Result<Option<String>> {
        let Some(access) = credential.access_token() else {
            debug!(client_id = %credential.client_id, "no access token, skipping cloud id lookup");
            return Ok(None);
        };

        let response = self
            .http
            .get(&self.endpoints.accessible_resources)
            .bearer_auth(access)
            .send()
            .await
            .map_err(|e| Error::Http(format!("accessible resources request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("reading accessible resources response: {e}")))?;
        if status != StatusCode::OK {
            return Err(Error::TokenExchange(format!(
                "accessible resources returned {status}: {body}"
            )));
        }

        let resources: Vec<AccessibleResource> = serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("invalid accessible resources: {e}")))?;
        let first = resources
            .into_iter()
            .next()
            .ok_or(Error::NoAccessibleResources)?;
        debug!(cloud_id = %first.id, site = %first.name, "resolved cloud id");
        Ok(Some(first.id))
    }

    /// POST a form to the token endpoint and parse the token response.
    ///
    /// Only a 200 with a well-formed body counts as success.
    async fn post_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let grant = form
            .iter()
            .find(|(k, _)| *k == "grant_type")
            .map(|(_, v)| *v)
            .unwrap_or_default();

        let response = self
            .http
            .post(&self.endpoints.token)
            .form(form)
            .send()
            .await
            .map_err(|e| Error::Http(format!("{grant} request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("reading {grant} response: {e}")))?;

        if status != StatusCode::OK {
            // 401/403 means the code or refresh token is revoked or invalid
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(Error::InvalidCredentials(format!(
                    "{grant} rejected ({status}): {body}"
                )));
            }
            return Err(Error::TokenExchange(format!(
                "token endpoint returned {status} for {grant}: {body}"
            )));
        }

        serde_json::from_str::<TokenResponse>(&body)
            .map_err(|e| Error::MalformedResponse(format!("invalid {grant} response: {e}")))
    }

    /// Post-acquisition steps that must not fail the acquisition itself:
    /// fill in a missing cloud id, then persist.
    async fn finish(&self, mut credential: OAuthCredential) -> OAuthCredential {
        if credential.cloud_id.is_none() {
            match self.resolve_cloud_id(&credential).await {
                Ok(cloud_id) => credential.cloud_id = cloud_id,
                Err(e) => {
                    warn!(
                        client_id = %credential.client_id,
                        error = %e,
                        "failed to resolve cloud id"
                    )
                }
            }
        }

        if let Err(e) = self
            .store
            .save(&credential.client_id, &credential.to_stored())
            .await
        {
            warn!(client_id = %credential.client_id, error = %e, "failed to persist tokens");
        }
        credential
    }
}

impl Refresh for TokenClient {
    fn refresh<'a>(
        &'a self,
        credential: &'a OAuthCredential,
    ) -> Pin<Box<dyn Future<Output = Result<OAuthCredential>> + Send + 'a>> {
        Box::pin(TokenClient::refresh(self, credential))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingVault, memory_store};
    use common::Secret;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credential() -> OAuthCredential {
        OAuthCredential::new(
            "test-client-id",
            "test-client-secret",
            "https://example.com/callback",
            "read:jira-work offline_access",
        )
    }

    fn client(server: &MockServer, store: CredentialStore) -> TokenClient {
        TokenClient::new(reqwest::Client::new(), store)
            .with_endpoints(Endpoints::with_base(&server.uri()))
    }

    async fn mount_resources(server: &MockServer, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/oauth/token/accessible-resources"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": "test-cloud-id", "name": "Test Site"}])),
            )
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[test]
    fn token_response_deserializes() {
        let json = r#"{"access_token":"at_abc","refresh_token":"rt_def","expires_in":3600}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "at_abc");
        assert_eq!(token.refresh_token.as_deref(), Some("rt_def"));
        assert_eq!(token.expires_in, 3600);
    }

    #[test]
    fn token_response_without_refresh_token_deserializes() {
        let json = r#"{"access_token":"at_abc","expires_in":3600,"scope":"read"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert!(token.refresh_token.is_none());
    }

    #[test]
    fn default_endpoints_are_atlassian() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.token, "https://auth.atlassian.com/oauth/token");
        assert_eq!(endpoints.authorize, "https://auth.atlassian.com/authorize");
        assert_eq!(
            endpoints.accessible_resources,
            "https://api.atlassian.com/oauth/token/accessible-resources"
        );
    }

    #[test]
    fn endpoints_with_base_trims_trailing_slash() {
        let endpoints = Endpoints::with_base("http://127.0.0.1:9/");
        assert_eq!(endpoints.token, "http://127.0.0.1:9/oauth/token");
    }

    #[tokio::test]
    async fn exchange_code_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=code1"))
            .and(body_string_contains("client_id=c1"))
            .and(body_string_contains("client_secret=s1"))
            .and(body_string_contains("redirect_uri=https%3A%2F%2Fcb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "A",
                "refresh_token": "R",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_resources(&server, 1).await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        assert!(store.load("c1").await.is_none());
        let client = client(&server, store.clone());

        let before = now_secs();
        let cred = OAuthCredential::new("c1", "s1", "https://cb", "read");
        let updated = client.exchange_code(&cred, "code1").await.unwrap();

        assert_eq!(updated.access_token(), Some("A"));
        assert_eq!(updated.refresh_token(), Some("R"));
        let expires_at = updated.expires_at.unwrap();
        assert!(expires_at >= before + 3600 && expires_at <= now_secs() + 3600);
        assert_eq!(updated.cloud_id.as_deref(), Some("test-cloud-id"));

        let persisted = store.load("c1").await.unwrap();
        assert_eq!(persisted.access_token.as_deref(), Some("A"));
        assert_eq!(persisted.refresh_token.as_deref(), Some("R"));
        assert_eq!(persisted.expires_at, Some(expires_at));
        assert_eq!(persisted.cloud_id.as_deref(), Some("test-cloud-id"));

        // The input credential was not touched
        assert!(cred.access_token().is_none());
    }

    #[tokio::test]
    async fn exchange_code_failure_leaves_credential_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .expect(1)
            .mount(&server)
            .await;
        mount_resources(&server, 0).await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store.clone());

        let cred = credential();
        let result = client.exchange_code(&cred, "bad-code").await;
        assert!(matches!(result, Err(Error::TokenExchange(_))));
        assert!(cred.access_token().is_none());
        assert!(cred.refresh_token().is_none());
        assert!(store.load("test-client-id").await.is_none());
    }

    #[tokio::test]
    async fn exchange_code_network_error_is_http_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        // Nothing listens on the discard port
        let client = TokenClient::new(reqwest::Client::new(), store)
            .with_endpoints(Endpoints::with_base("http://127.0.0.1:9"));

        let cred = credential();
        let result = client.exchange_code(&cred, "code").await;
        assert!(matches!(result, Err(Error::Http(_))));
        assert!(cred.access_token().is_none());
        assert!(cred.refresh_token().is_none());
    }

    #[tokio::test]
    async fn exchange_code_malformed_body_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "nope"})))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store);

        let result = client.exchange_code(&credential(), "code").await;
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn exchange_without_refresh_token_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "A",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_resources(&server, 0).await;

        let dir = tempfile::tempdir().unwrap();
        let (store, vault) = memory_store(&dir);
        let client = client(&server, store.clone());

        let cred = OAuthCredential::new("c1", "s1", "https://cb", "read");
        let result = client.exchange_code(&cred, "code1").await;
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
        assert!(cred.access_token().is_none());
        assert!(cred.refresh_token().is_none());
        assert!(store.load("c1").await.is_none());
        assert!(vault.is_empty());
    }

    #[tokio::test]
    async fn exchange_succeeds_even_if_cloud_id_lookup_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at",
                "refresh_token": "rt",
                "expires_in": 3600
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/oauth/token/accessible-resources"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store.clone());

        let updated = client.exchange_code(&credential(), "code").await.unwrap();
        assert_eq!(updated.access_token(), Some("at"));
        assert!(updated.cloud_id.is_none());
        assert!(store.load("test-client-id").await.is_some());
    }

    #[tokio::test]
    async fn exchange_with_known_cloud_id_skips_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at",
                "refresh_token": "rt",
                "expires_in": 3600
            })))
            .mount(&server)
            .await;
        mount_resources(&server, 0).await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store);

        let cred = credential().with_cloud_id("env-cloud");
        let updated = client.exchange_code(&cred, "code").await.unwrap();
        assert_eq!(updated.cloud_id.as_deref(), Some("env-cloud"));
    }

    #[tokio::test]
    async fn exchange_persists_to_file_when_keyring_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at",
                "refresh_token": "rt",
                "expires_in": 3600
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let vault = Arc::new(FailingVault::default());
        let store = CredentialStore::new(
            vault.clone(),
            crate::store::FileTokenStore::new(dir.path().to_path_buf()),
        );
        let client = client(&server, store.clone());

        let cred = credential().with_cloud_id("cloud");
        client.exchange_code(&cred, "code").await.unwrap();

        assert_eq!(vault.sets(), 1);
        assert!(store.files().path_for("test-client-id").exists());
    }

    #[tokio::test]
    async fn refresh_without_refresh_token_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store);

        let result = client.refresh(&credential()).await;
        assert!(matches!(result, Err(Error::MissingRefreshToken)));
    }

    #[tokio::test]
    async fn refresh_success_updates_and_persists() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=rt_old"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "new-access-token",
                "refresh_token": "new-refresh-token",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store.clone());

        let mut cred = credential().with_cloud_id("cloud");
        cred.refresh_token = Some(Secret::from("rt_old"));
        let updated = client.refresh(&cred).await.unwrap();

        assert_eq!(updated.access_token(), Some("new-access-token"));
        assert_eq!(updated.refresh_token(), Some("new-refresh-token"));
        assert!(updated.expires_at.is_some());
        assert_eq!(
            store.load("test-client-id").await.unwrap().access_token.as_deref(),
            Some("new-access-token")
        );
    }

    #[tokio::test]
    async fn refresh_keeps_refresh_token_when_not_rotated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at_new",
                "expires_in": 3600
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store);

        let mut cred = credential().with_cloud_id("cloud");
        cred.refresh_token = Some(Secret::from("rt_keep"));
        let updated = client.refresh(&cred).await.unwrap();
        assert_eq!(updated.refresh_token(), Some("rt_keep"));
    }

    #[tokio::test]
    async fn refresh_rejected_token_is_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(403).set_body_string("unauthorized_client"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store);

        let mut cred = credential();
        cred.refresh_token = Some(Secret::from("rt_revoked"));
        let result = client.refresh(&cred).await;
        assert!(matches!(result, Err(Error::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn resolve_cloud_id_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth/token/accessible-resources"))
            .and(header("authorization", "Bearer test-access-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "test-cloud-id", "name": "Test Site", "url": "https://test.atlassian.net"},
                {"id": "other-cloud-id", "name": "Other Site"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store);

        let mut cred = credential();
        cred.access_token = Some(Secret::from("test-access-token"));
        let cloud_id = client.resolve_cloud_id(&cred).await.unwrap();
        assert_eq!(cloud_id.as_deref(), Some("test-cloud-id"));
    }

    #[tokio::test]
    async fn resolve_cloud_id_without_access_token_makes_no_request() {
        let server = MockServer::start().await;
        mount_resources(&server, 0).await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store);

        assert_eq!(client.resolve_cloud_id(&credential()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn resolve_cloud_id_with_no_sites_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth/token/accessible-resources"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store);

        let mut cred = credential();
        cred.access_token = Some(Secret::from("at"));
        let result = client.resolve_cloud_id(&cred).await;
        assert!(matches!(result, Err(Error::NoAccessibleResources)));
    }

    #[tokio::test]
    async fn refresh_through_trait_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at_dyn",
                "expires_in": 60
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = client(&server, store);
        let refresher: &dyn Refresh = &client;

        let mut cred = credential().with_cloud_id("cloud");
        cred.refresh_token = Some(Secret::from("rt"));
        let updated = refresher.refresh(&cred).await.unwrap();
        assert_eq!(updated.access_token(), Some("at_dyn"));
    }

    #[test]
    fn authorization_url_uses_configured_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _vault) = memory_store(&dir);
        let client = TokenClient::new(reqwest::Client::new(), store)
            .with_endpoints(Endpoints::with_base("https://auth.example.test"));
        let url = client.authorization_url(&credential(), "st").unwrap();
        assert!(url.starts_with("https://auth.example.test/authorize?"));
    }
}
