//! Command line and environment settings
//!
//! Token directory precedence: `--token-dir` > `ATLASSIAN_OAUTH_TOKEN_DIR` >
//! `~/.atlassian-oauth`. OAuth app settings always come from the
//! environment, never from arguments, so secrets stay out of shell history.

use std::path::PathBuf;

use atlassian_auth::{ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_REDIRECT_URI, ENV_SCOPE, FileTokenStore};
use common::Env;

/// Overrides the file fallback directory.
pub const ENV_TOKEN_DIR: &str = "ATLASSIAN_OAUTH_TOKEN_DIR";

/// Overrides the HTTP timeout (seconds) for identity provider calls.
pub const ENV_HTTP_TIMEOUT: &str = "ATLASSIAN_OAUTH_HTTP_TIMEOUT_SECS";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const USAGE: &str =
    "usage: atlassian-oauth [--token-dir <dir>] <authorize-url | exchange <code> | status>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print an authorization URL with a fresh state value
    AuthorizeUrl,
    /// Trade an authorization code for tokens and persist them
    Exchange { code: String },
    /// Resolve the active credential and try to bind it
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub token_dir: Option<PathBuf>,
}

impl CliArgs {
    /// Parse arguments (without the program name).
    pub fn parse(args: &[String]) -> common::Result<Self> {
        let mut token_dir = None;
        let mut positional = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--token-dir" => {
                    let dir = iter.next().ok_or_else(|| {
                        common::Error::Config("--token-dir requires a value".into())
                    })?;
                    token_dir = Some(PathBuf::from(dir));
                }
                flag if flag.starts_with("--") => {
                    return Err(common::Error::Config(format!("unknown flag: {flag}")));
                }
                _ => positional.push(arg.as_str()),
            }
        }

        let command = match positional.as_slice() {
            ["authorize-url"] => Command::AuthorizeUrl,
            ["exchange", code] => Command::Exchange {
                code: (*code).to_owned(),
            },
            ["exchange"] => {
                return Err(common::Error::Config(
                    "exchange requires an authorization code".into(),
                ));
            }
            ["status"] | [] => Command::Status,
            other => {
                return Err(common::Error::Config(format!(
                    "unknown command: {}",
                    other.join(" ")
                )));
            }
        };

        Ok(Self { command, token_dir })
    }
}

/// Directory for the token file fallback.
pub fn resolve_token_dir<E: Env + ?Sized>(cli_dir: Option<PathBuf>, env: &E) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir;
    }
    if let Some(dir) = env.non_empty(ENV_TOKEN_DIR) {
        return PathBuf::from(dir);
    }
    FileTokenStore::default_dir()
}

/// HTTP timeout for identity provider calls; invalid values fall back to the default.
pub fn http_timeout_secs<E: Env + ?Sized>(env: &E) -> u64 {
    env.non_empty(ENV_HTTP_TIMEOUT)
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
}

/// Fail with the first missing OAuth app setting, if any.
///
/// The authorization and exchange commands need a complete app registration,
/// unlike `status`, which also accepts a direct token.
pub fn check_app_registration<E: Env + ?Sized>(env: &E) -> common::Result<()> {
    for key in [ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_REDIRECT_URI, ENV_SCOPE] {
        env.require(key)?;
    }
    Ok(())
}
