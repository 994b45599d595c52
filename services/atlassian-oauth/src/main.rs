//! Atlassian OAuth helper
//!
//! Small operator tool around the `atlassian-auth` library:
//! 1. `authorize-url` prints the URL to open in a browser
//! 2. `exchange <code>` trades the redirect's code for tokens and stores them
//! 3. `status` resolves the active credential and checks it can authorize
//!
//! All OAuth settings come from `ATLASSIAN_OAUTH_*` environment variables.

mod config;

use std::time::Duration;

use anyhow::{Context, Result};
use atlassian_auth::{Credential, CredentialStore, FileTokenStore, KeyringVault, TokenClient};
use common::ProcessEnv;
use reqwest::header::HeaderMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{CliArgs, Command};

/// Machine-readable result of the `status` command.
#[derive(Debug, Serialize)]
struct StatusReport {
    credential: Option<&'static str>,
    cloud_id: Option<String>,
    authorized: bool,
    can_refresh: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and LOG_LEVEL / RUST_LOG support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}\n{}", config::USAGE);
            std::process::exit(2);
        }
    };

    let env = ProcessEnv;
    let token_dir = config::resolve_token_dir(cli.token_dir.clone(), &env);
    info!(token_dir = %token_dir.display(), "using token fallback directory");

    let store = CredentialStore::new(Arc::new(KeyringVault), FileTokenStore::new(token_dir));
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config::http_timeout_secs(&env)))
        .build()
        .context("failed to build HTTP client")?;
    let client = TokenClient::new(http, store);

    match cli.command {
        Command::AuthorizeUrl => authorize_url(&env, &client).await,
        Command::Exchange { code } => exchange(&env, &client, &code).await,
        Command::Status => status(&env, &client).await,
    }
}

async fn authorize_url(env: &ProcessEnv, client: &TokenClient) -> Result<()> {
    config::check_app_registration(env).context("OAuth app registration incomplete")?;
    let credential = atlassian_auth::resolve_managed(env, client.store())
        .await
        .context("OAuth app registration incomplete")?;

    let state = atlassian_auth::generate_state();
    let url = client
        .authorization_url(&credential, &state)
        .context("failed to build authorization URL")?;

    println!("{url}");
    eprintln!("state: {state}");
    Ok(())
}

async fn exchange(env: &ProcessEnv, client: &TokenClient, code: &str) -> Result<()> {
    config::check_app_registration(env).context("OAuth app registration incomplete")?;
    let credential = atlassian_auth::resolve_managed(env, client.store())
        .await
        .context("OAuth app registration incomplete")?;

    let updated = client
        .exchange_code(&credential, code)
        .await
        .context("authorization code exchange failed")?;

    match updated.cloud_id.as_deref() {
        Some(cloud_id) => info!(client_id = %updated.client_id, cloud_id, "tokens stored"),
        None => warn!(
            client_id = %updated.client_id,
            "tokens stored but cloud id unresolved; set ATLASSIAN_OAUTH_CLOUD_ID"
        ),
    }
    Ok(())
}

async fn status(env: &ProcessEnv, client: &TokenClient) -> Result<()> {
    let Some(credential) = atlassian_auth::resolve(env, client.store()).await else {
        let report = StatusReport {
            credential: None,
            cloud_id: None,
            authorized: false,
            can_refresh: false,
            error: Some("no OAuth credential configured".into()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    };

    let mut headers = HeaderMap::new();
    let report = match atlassian_auth::bind(&mut headers, &credential, client).await {
        Ok(bound) => report_for(&bound, true, None),
        Err(e) => {
            error!(
                credential = credential.kind(),
                error = %e,
                "credential cannot authorize requests"
            );
            report_for(&credential, false, Some(e.to_string()))
        }
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn report_for(credential: &Credential, authorized: bool, error: Option<String>) -> StatusReport {
    StatusReport {
        credential: Some(credential.kind()),
        cloud_id: credential.cloud_id().map(str::to_owned),
        authorized,
        can_refresh: credential.can_refresh(),
        error,
    }
}
