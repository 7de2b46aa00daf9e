//! Startup configuration.
//!
//! Settings come from three layers, highest precedence first: command-line
//! flags, the process environment, and a dotenv file. Resolution is a
//! separate phase that returns [`RelayConfigError`]; deciding to exit is left
//! to `main`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use mockable::Env;
use tracing::{debug, warn};
use url::Url;

use crate::outbound::twitter::{BearerToken, DEFAULT_API_BASE_URL};

/// Environment variable holding the directory bearer credential.
pub const BEARER_ENV: &str = "BEARER";
/// Environment variable overriding the listen address.
pub const BIND_ADDR_ENV: &str = "RELAY_BIND_ADDR";
/// Environment variable overriding the directory base URL.
pub const API_BASE_URL_ENV: &str = "RELAY_API_BASE_URL";
/// Environment variable setting the upstream request timeout in seconds.
pub const UPSTREAM_TIMEOUT_ENV: &str = "RELAY_UPSTREAM_TIMEOUT_SECS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ENV_FILE: &str = ".env";

/// `handle-relay` command-line arguments.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "handle-relay",
    about = "Resolve social-network handles to numeric account ids over HTTP",
    version
)]
pub struct CliArgs {
    /// Directory API bearer token. Overrides `BEARER`.
    #[arg(long, value_name = "token")]
    pub token: Option<String>,
    /// Listen address. Overrides `RELAY_BIND_ADDR`.
    #[arg(long, value_name = "addr")]
    pub bind: Option<String>,
    /// Directory base URL. Overrides `RELAY_API_BASE_URL`.
    #[arg(long = "api-base-url", value_name = "url")]
    pub api_base_url: Option<String>,
    /// Upstream request timeout in seconds. Overrides `RELAY_UPSTREAM_TIMEOUT_SECS`.
    #[arg(long = "upstream-timeout-secs", value_name = "secs")]
    pub upstream_timeout_secs: Option<String>,
    /// Dotenv file loaded before the environment is read.
    #[arg(long = "env-file", value_name = "path")]
    pub env_file: Option<PathBuf>,
}

impl CliArgs {
    /// Dotenv path to load, falling back to `.env`.
    #[must_use]
    pub fn env_file(&self) -> PathBuf {
        self.env_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE))
    }
}

/// Fully resolved relay settings.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Credential attached to every directory call.
    pub token: BearerToken,
    /// Address the HTTP server binds.
    pub bind_addr: SocketAddr,
    /// Directory host.
    pub api_base_url: Url,
    /// Whole-request timeout for directory calls; `None` keeps transport defaults.
    pub upstream_timeout: Option<Duration>,
}

/// Errors raised while resolving settings. All are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum RelayConfigError {
    /// The bearer credential was not supplied or is blank.
    #[error("missing bearer credential: pass --token or set {BEARER_ENV}")]
    MissingCredential,
    /// A setting is present but unparseable.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The dotenv file exists but could not be loaded.
    #[error("failed to load dotenv file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Load `path` into the process environment without overriding variables
/// that are already set. A missing file is not an error.
///
/// # Errors
/// Returns [`RelayConfigError::EnvFile`] when the file exists but cannot be
/// read or parsed.
pub fn load_env_file(path: &Path) -> Result<bool, RelayConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "loaded dotenv file");
            Ok(true)
        }
        Err(dotenvy::Error::Io(error)) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no dotenv file; using process environment");
            Ok(false)
        }
        Err(source) => Err(RelayConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolve settings from CLI flags and an environment.
///
/// # Examples
///
/// ```rust
/// use handle_relay::settings::{CliArgs, relay_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "BEARER" => Some("AAAA".to_owned()),
///     _ => None,
/// });
///
/// let settings = relay_settings_from_env(&env, &CliArgs::default()).unwrap();
/// assert_eq!(settings.bind_addr.port(), 8080);
/// assert_eq!(settings.token.expose(), "AAAA");
/// ```
///
/// # Errors
/// Returns [`RelayConfigError`] when the credential is missing or any value
/// fails to parse.
pub fn relay_settings_from_env<E: Env>(
    env: &E,
    args: &CliArgs,
) -> Result<RelaySettings, RelayConfigError> {
    let token = token_from(env, args)?;
    let bind_addr = bind_addr_from(env, args)?;
    let api_base_url = api_base_url_from(env, args)?;
    let upstream_timeout = upstream_timeout_from(env, args)?;

    Ok(RelaySettings {
        token,
        bind_addr,
        api_base_url,
        upstream_timeout,
    })
}

/// Pick the flag value when given, otherwise the environment value.
fn layered<E: Env>(env: &E, flag: Option<&String>, name: &str) -> Option<String> {
    flag.cloned().or_else(|| env.string(name))
}

fn token_from<E: Env>(env: &E, args: &CliArgs) -> Result<BearerToken, RelayConfigError> {
    if let Some(flag) = args.token.as_deref() {
        if let Some(token) = BearerToken::new(flag) {
            return Ok(token);
        }
        warn!("--token is blank; falling back to {BEARER_ENV}");
    }
    env.string(BEARER_ENV)
        .and_then(BearerToken::new)
        .ok_or(RelayConfigError::MissingCredential)
}

fn bind_addr_from<E: Env>(env: &E, args: &CliArgs) -> Result<SocketAddr, RelayConfigError> {
    let raw = layered(env, args.bind.as_ref(), BIND_ADDR_ENV)
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    raw.trim()
        .parse()
        .map_err(|_| RelayConfigError::InvalidValue {
            name: BIND_ADDR_ENV,
            value: raw.clone(),
            expected: "a socket address such as 0.0.0.0:8080",
        })
}

fn api_base_url_from<E: Env>(env: &E, args: &CliArgs) -> Result<Url, RelayConfigError> {
    let raw = layered(env, args.api_base_url.as_ref(), API_BASE_URL_ENV)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
    let invalid = || RelayConfigError::InvalidValue {
        name: API_BASE_URL_ENV,
        value: raw.clone(),
        expected: "an absolute http(s) URL",
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(url)
}

fn upstream_timeout_from<E: Env>(
    env: &E,
    args: &CliArgs,
) -> Result<Option<Duration>, RelayConfigError> {
    let Some(raw) = layered(env, args.upstream_timeout_secs.as_ref(), UPSTREAM_TIMEOUT_ENV)
    else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(RelayConfigError::InvalidValue {
            name: UPSTREAM_TIMEOUT_ENV,
            value: raw,
            expected: "a positive number of seconds",
        }),
    }
}

#[cfg(test)]
mod tests;
