//! Credential selection from environment values
//!
//! Precedence:
//! 1. `ATLASSIAN_OAUTH_CLOUD_ID` + `ATLASSIAN_OAUTH_ACCESS_TOKEN` → direct token.
//!    Checked first and, when it resolves, the managed path is never evaluated
//!    (no keyring or file access).
//! 2. Client id, secret, redirect URI and scope → managed OAuth, merged with
//!    any persisted tokens for that client id.
//! 3. `ATLASSIAN_OAUTH_ENABLE` truthy → minimal managed credential awaiting
//!    an external authorization step.
//!
//! Missing configuration is not an error here; the resolvers return `None`.

use common::Env;
use tracing::{debug, info};

use crate::constants::{
    ENV_ACCESS_TOKEN, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_CLOUD_ID, ENV_ENABLE,
    ENV_REDIRECT_URI, ENV_SCOPE,
};
use crate::credential::{Credential, DirectTokenCredential, OAuthCredential};
use crate::store::CredentialStore;

/// Direct (bring-your-own) token, if both its variables are set.
pub fn resolve_direct_token<E: Env + ?Sized>(env: &E) -> Option<DirectTokenCredential> {
    let cloud_id = env.non_empty(ENV_CLOUD_ID)?;
    let access_token = env.non_empty(ENV_ACCESS_TOKEN)?;
    debug!(cloud_id = %cloud_id, "direct access token configured");
    Some(DirectTokenCredential::new(cloud_id, access_token))
}

/// Managed OAuth credential, with persisted tokens merged in.
pub async fn resolve_managed<E: Env + ?Sized>(
    env: &E,
    store: &CredentialStore,
) -> Option<OAuthCredential> {
    let cloud_id = env.non_empty(ENV_CLOUD_ID);

    let required = (
        env.non_empty(ENV_CLIENT_ID),
        env.non_empty(ENV_CLIENT_SECRET),
        env.non_empty(ENV_REDIRECT_URI),
        env.non_empty(ENV_SCOPE),
    );
    let (Some(client_id), Some(client_secret), Some(redirect_uri), Some(scope)) = required else {
        if env.flag(ENV_ENABLE) {
            info!("OAuth enabled without app registration, using minimal credential");
            return Some(OAuthCredential::minimal(cloud_id));
        }
        debug!("OAuth app registration incomplete");
        return None;
    };

    let mut credential = OAuthCredential::new(client_id, client_secret, redirect_uri, scope);
    credential.cloud_id = cloud_id;

    match store.load(&credential.client_id).await {
        Some(stored) => {
            debug!(client_id = %credential.client_id, "merged persisted tokens");
            Some(credential.merge_stored(stored))
        }
        None => {
            debug!(client_id = %credential.client_id, "no persisted tokens");
            Some(credential)
        }
    }
}

/// The credential that governs outbound requests, if any is configured.
pub async fn resolve<E: Env + ?Sized>(env: &E, store: &CredentialStore) -> Option<Credential> {
    if let Some(direct) = resolve_direct_token(env) {
        return Some(Credential::Direct(direct));
    }
    resolve_managed(env, store).await.map(Credential::Managed)
}
