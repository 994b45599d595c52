//! Atlassian OAuth constants
//!
//! Endpoint URLs for Atlassian's 3LO (three-legged OAuth) flow, the keyring
//! service identity, and the environment variable names the resolver reads.

/// Token endpoint for code exchange and token refresh
pub const TOKEN_ENDPOINT: &str = "https://auth.atlassian.com/oauth/token";

/// Authorization endpoint the user is sent to in a browser
pub const AUTHORIZE_ENDPOINT: &str = "https://auth.atlassian.com/authorize";

/// Lists the cloud sites an access token can reach
pub const ACCESSIBLE_RESOURCES_ENDPOINT: &str =
    "https://api.atlassian.com/oauth/token/accessible-resources";

/// Audience Atlassian requires on the authorization request.
pub const AUDIENCE: &str = "api.atlassian.com";

/// Service name under which tokens are stored in the OS keyring.
pub const KEYRING_SERVICE_NAME: &str = "atlassian-oauth";

/// Directory (under the home directory) for the file fallback.
pub const TOKEN_DIR_NAME: &str = ".atlassian-oauth";

/// Seconds before nominal expiry at which a token is already treated as expired.
pub const TOKEN_EXPIRY_MARGIN_SECS: u64 = 300;

pub const ENV_CLIENT_ID: &str = "ATLASSIAN_OAUTH_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "ATLASSIAN_OAUTH_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "ATLASSIAN_OAUTH_REDIRECT_URI";
pub const ENV_SCOPE: &str = "ATLASSIAN_OAUTH_SCOPE";
pub const ENV_CLOUD_ID: &str = "ATLASSIAN_OAUTH_CLOUD_ID";
pub const ENV_ENABLE: &str = "ATLASSIAN_OAUTH_ENABLE";
pub const ENV_ACCESS_TOKEN: &str = "ATLASSIAN_OAUTH_ACCESS_TOKEN";
