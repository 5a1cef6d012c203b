//! Token state: the credential itself, the per-client store, and the
//! consumed persistence seam.
//!
//! A client owns exactly one [`TokenStore`] holding the current [`Token`]
//! (or none). Refreshes replace the stored value atomically; two concurrent
//! refreshes race benignly and the last writer wins, which is acceptable
//! because refreshes are idempotent on the provider side. Persistence
//! across process restarts is not this crate's business: attach a
//! [`TokenCache`] implementation and the client will push every new token
//! through it.

use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{Result, types::TokenResponse};

/// Seconds before the nominal expiry at which a token is already treated
/// as expired, so a request never departs with a token about to lapse
/// mid-flight.
const EXPIRY_MARGIN_SECS: i64 = 240;

/// An access token with its refresh companion and expiry metadata.
///
/// Serializable so external credential stores can persist it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// The bearer credential sent with every request.
    pub access_token: String,
    /// Refresh credential, absent for client-credentials and implicit
    /// grants.
    pub refresh_token: Option<String>,
    /// Instant after which the access token is no longer valid.
    pub expires_at: DateTime<Utc>,
    /// Scopes the provider reported as granted. Empty when the provider
    /// omitted the `scope` field.
    #[serde(default)]
    pub scopes: BTreeSet<String>,
}

impl Token {
    /// Whether the token is expired (or about to be, within the safety
    /// margin) and must be refreshed before use.
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }

    /// Whether the provider reported this scope as granted.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Builds a token from the provider's token-endpoint response.
    ///
    /// When the response omits `refresh_token`, as refresh responses often
    /// do, the previous refresh token is carried forward so the client does
    /// not lose its refresh path.
    pub(crate) fn from_response(
        response: TokenResponse,
        previous_refresh_token: Option<String>,
    ) -> Self {
        let expires_in = response.expires_in.unwrap_or(3600);
        Token {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh_token),
            expires_at: Utc::now() + Duration::seconds(expires_in),
            scopes: response
                .scope
                .as_deref()
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Holds the single current token of one client instance.
///
/// Cloning the store clones the handle, not the token; all clones observe
/// the same slot. Reads and writes are atomic relative to concurrent
/// requests on the same client.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<Token>>>,
}

impl TokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        TokenStore::default()
    }

    /// Creates a store pre-seeded with a token, e.g. one restored by the
    /// caller from an external credential store.
    pub fn with_token(token: Option<Token>) -> Self {
        TokenStore {
            inner: Arc::new(RwLock::new(token)),
        }
    }

    /// Returns a clone of the current token, if any. No side effects.
    pub async fn get(&self) -> Option<Token> {
        self.inner.read().await.clone()
    }

    /// Replaces the current token. Overwrites any prior value; the last
    /// writer wins.
    pub async fn set(&self, token: Token) {
        *self.inner.write().await = Some(token);
    }

    /// Removes the stored token. Used on explicit logout or revocation.
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }
}

/// External token persistence, consumed but never implemented here.
///
/// Attach an implementation through the client builder and the client
/// pushes every newly obtained or refreshed token into it and can restore
/// one at startup. File, keyring or database storage is entirely the
/// implementor's business.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Loads the previously persisted token, if one exists.
    async fn load(&self) -> Result<Option<Token>>;

    /// Persists a freshly obtained or refreshed token.
    async fn store(&self, token: &Token) -> Result<()>;

    /// Deletes any persisted token.
    async fn clear(&self) -> Result<()>;
}
