//! Per-client configuration and environment lookups.
//!
//! All knobs a client instance exposes live in [`ClientConfig`]: request
//! timeout, the two retry toggles, the default market and the provider
//! URLs. The URLs default to the public Spotify endpoints and are
//! overridable per instance so tests can point a client at a local server.
//!
//! Credential lookups read environment variables after an optional `.env`
//! load, mirroring how the rest of the crate expects to be configured:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. Application defaults (where applicable)

use std::{env, time::Duration};

use crate::{Result, error::Error};

/// Base URL of the Spotify Web API.
pub const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// The provider's OAuth authorization endpoint.
pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// The provider's OAuth token exchange and refresh endpoint.
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Wait applied to a 429 retry when the provider sent no `Retry-After`.
pub const RATE_LIMIT_FALLBACK: Duration = Duration::from_secs(2);

/// Longest `Retry-After` the executor will sleep on. Hints above this
/// surface as a rate-limit error immediately instead of blocking the call.
pub const RETRY_AFTER_CEILING: Duration = Duration::from_secs(120);

/// Options of one client instance.
///
/// Set at construction through [`SpotifyClientBuilder`](crate::client::SpotifyClientBuilder)
/// and mutable afterwards through the client's setters.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for API requests.
    pub api_base_url: String,
    /// OAuth authorization endpoint.
    pub authorize_url: String,
    /// OAuth token endpoint.
    pub token_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether a 429 response gets its single automatic retry.
    pub retry_on_rate_limit: bool,
    /// Whether a 401 response gets its single refresh-and-retry.
    pub retry_on_unauthorized: bool,
    /// Market applied to market-aware endpoints when the call passes none.
    pub default_market: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: API_BASE_URL.to_string(),
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_on_rate_limit: true,
            retry_on_unauthorized: true,
            default_market: None,
        }
    }
}

/// Loads environment variables from a `.env` file in the working directory.
///
/// Missing files are not an error; explicitly exported variables always win
/// over file entries. Called by the `*_from_env` grant constructors before
/// their lookups.
pub fn load_env() {
    let _ = dotenv::dotenv();
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Validation(format!("{name} must be set")))
}

/// Returns the application's client id from `SPOTIKIT_CLIENT_ID`.
pub fn client_id() -> Result<String> {
    required_var("SPOTIKIT_CLIENT_ID")
}

/// Returns the application's client secret from `SPOTIKIT_CLIENT_SECRET`.
///
/// Only the confidential grants (client-credentials, plain authorization
/// code) need this; PKCE and implicit clients never read it.
pub fn client_secret() -> Result<String> {
    required_var("SPOTIKIT_CLIENT_SECRET")
}

/// Returns the registered redirect URI from `SPOTIKIT_REDIRECT_URI`.
///
/// Must match the redirect URI registered in the provider's application
/// settings exactly, or the token exchange is rejected.
pub fn redirect_uri() -> Result<String> {
    required_var("SPOTIKIT_REDIRECT_URI")
}
