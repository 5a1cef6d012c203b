//! The client: one grant, one token store, one configuration.
//!
//! A [`SpotifyClient`] owns everything a call needs: the HTTP client, the
//! [`TokenStore`] shared by all concurrent calls on the instance, the
//! [`Authenticator`] for its grant and the per-instance options. Endpoint
//! groups hang off accessor methods (`client.artists()`, `client.player()`,
//! ...), all funneling through the executor in [`crate::executor`].

use std::{sync::Arc, time::Duration};

use crate::{
    Result,
    auth::{Authenticator, AuthorizationGrant, AuthorizationRequest, RedirectListener},
    config::ClientConfig,
    endpoints::{Albums, Artists, Follow, Player, Playlists, Shows, Users},
    error::Error,
    token::{Token, TokenCache, TokenStore},
};

/// A typed client for the Spotify Web API.
///
/// # Example
///
/// ```
/// use spotikit::{AuthorizationGrant, SpotifyClient};
///
/// #[tokio::main]
/// async fn main() -> spotikit::Result<()> {
///     let grant = AuthorizationGrant::client_credentials_from_env()?;
///     let client = SpotifyClient::new(grant)?;
///     let artist = client.artists().get("4NHQUGzhtTLFvgF5SZesLK").await?;
///     println!("{}", artist.name);
///     Ok(())
/// }
/// ```
pub struct SpotifyClient {
    http: reqwest::Client,
    config: ClientConfig,
    store: TokenStore,
    authenticator: Authenticator,
    cache: Option<Arc<dyn TokenCache>>,
}

impl SpotifyClient {
    /// Creates a client with default options for the given grant.
    pub fn new(grant: AuthorizationGrant) -> Result<Self> {
        SpotifyClient::builder(grant).build()
    }

    /// Starts building a client with non-default options.
    pub fn builder(grant: AuthorizationGrant) -> SpotifyClientBuilder {
        SpotifyClientBuilder {
            grant,
            config: ClientConfig::default(),
            token: None,
            cache: None,
        }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The instance's current options.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -- option setters, mutable after construction ------------------------

    /// Replaces the per-request timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
    }

    /// Toggles the single automatic retry on 429.
    pub fn set_retry_on_rate_limit(&mut self, enabled: bool) {
        self.config.retry_on_rate_limit = enabled;
    }

    /// Toggles the single refresh-and-retry on 401.
    pub fn set_retry_on_unauthorized(&mut self, enabled: bool) {
        self.config.retry_on_unauthorized = enabled;
    }

    /// Replaces the market applied when a market-aware call passes none.
    pub fn set_default_market(&mut self, market: Option<String>) {
        self.config.default_market = market;
    }

    // -- token lifecycle ---------------------------------------------------

    /// Returns a clone of the current token, if any.
    pub async fn token(&self) -> Option<Token> {
        self.store.get().await
    }

    /// Installs a token, e.g. one the application restored itself. The
    /// token is also pushed into the attached cache, if any.
    pub async fn set_token(&self, token: Token) {
        self.install_token(token).await;
    }

    /// Drops the stored token and clears the attached cache, if any. Used
    /// on logout or revocation.
    pub async fn clear_token(&self) -> Result<()> {
        self.store.clear().await;
        if let Some(cache) = &self.cache {
            cache.clear().await?;
        }
        Ok(())
    }

    /// Restores a token from the attached cache into the store. Returns
    /// whether one was found.
    pub async fn restore_token_from_cache(&self) -> Result<bool> {
        let Some(cache) = &self.cache else {
            return Ok(false);
        };
        match cache.load().await? {
            Some(token) => {
                self.store.set(token).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Forces a token refresh and returns the new token.
    ///
    /// Concurrent refreshes are not deduplicated; the last writer wins,
    /// which is harmless because refreshes are idempotent on the provider
    /// side.
    pub async fn refresh_token(&self) -> Result<Token> {
        let current = self.store.get().await;
        let token = self.authenticator.refresh(current.as_ref()).await?;
        self.install_token(token.clone()).await;
        Ok(token)
    }

    /// Returns an unexpired token, refreshing or obtaining one first when
    /// necessary. Every request goes through here before touching the
    /// network.
    pub(crate) async fn ensure_token(&self) -> Result<Token> {
        if let Some(token) = self.store.get().await {
            if !token.is_expired() {
                return Ok(token);
            }
            log::debug!("stored token is expired, refreshing");
        }
        self.refresh_token().await
    }

    async fn install_token(&self, token: Token) {
        self.store.set(token.clone()).await;
        if let Some(cache) = &self.cache {
            // A cache that cannot persist must not fail the request that
            // produced the token.
            if let Err(e) = cache.store(&token).await {
                log::warn!("failed to persist token to cache: {e}");
            }
        }
    }

    // -- grant entry points ------------------------------------------------

    /// Runs the client-credentials flow and stores the resulting token.
    pub async fn request_client_credentials_token(&self) -> Result<Token> {
        let token = self.authenticator.request_client_credentials_token().await?;
        self.install_token(token.clone()).await;
        Ok(token)
    }

    /// Starts a user authorization flow; see
    /// [`Authenticator::begin_authorization`].
    pub fn begin_authorization(&self, scopes: &[&str]) -> Result<AuthorizationRequest> {
        self.authenticator.begin_authorization(scopes)
    }

    /// Finishes a user authorization flow from the redirect URL and stores
    /// the resulting token.
    pub async fn finish_authorization(
        &self,
        request: &AuthorizationRequest,
        redirect_url: &str,
    ) -> Result<Token> {
        let token = self
            .authenticator
            .finish_authorization(request, redirect_url)
            .await?;
        self.install_token(token.clone()).await;
        Ok(token)
    }

    /// Runs the whole interactive flow for native applications: binds a
    /// loopback listener on `listen_addr`, opens the authorization URL in
    /// the system browser, waits for the redirect and exchanges it for a
    /// token.
    ///
    /// The registered redirect URI must point at `listen_addr`'s
    /// `/callback` route. Implicit grants cannot use this: the fragment
    /// never reaches a server, so their redirect must be captured by the
    /// application and passed to [`finish_authorization`](Self::finish_authorization).
    pub async fn authorize_interactively(
        &self,
        scopes: &[&str],
        listen_addr: &str,
        timeout: Duration,
    ) -> Result<Token> {
        if matches!(self.authenticator.grant(), AuthorizationGrant::Implicit { .. }) {
            return Err(Error::Validation(
                "the implicit flow's fragment never reaches a local listener".to_string(),
            ));
        }

        let request = self.begin_authorization(scopes)?;
        let listener = RedirectListener::bind(listen_addr).await?;

        if webbrowser::open(request.url()).is_err() {
            log::warn!(
                "failed to open a browser, navigate to this URL manually: {}",
                request.url()
            );
        }

        let redirect_url = listener.wait(timeout).await?;
        self.finish_authorization(&request, &redirect_url).await
    }

    // -- endpoint groups ---------------------------------------------------

    /// Artist lookups and discographies.
    pub fn artists(&self) -> Artists<'_> {
        Artists::new(self)
    }

    /// Album lookups, album tracks and new releases.
    pub fn albums(&self) -> Albums<'_> {
        Albums::new(self)
    }

    /// Shows, episodes and the user's saved shows.
    pub fn shows(&self) -> Shows<'_> {
        Shows::new(self)
    }

    /// Following artists and the followed-artists listing.
    pub fn follow(&self) -> Follow<'_> {
        Follow::new(self)
    }

    /// Playback state and controls.
    pub fn player(&self) -> Player<'_> {
        Player::new(self)
    }

    /// Playlist lookups and modification.
    pub fn playlists(&self) -> Playlists<'_> {
        Playlists::new(self)
    }

    /// User profiles.
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }
}

/// Builder for non-default client options.
pub struct SpotifyClientBuilder {
    grant: AuthorizationGrant,
    config: ClientConfig,
    token: Option<Token>,
    cache: Option<Arc<dyn TokenCache>>,
}

impl SpotifyClientBuilder {
    /// Per-request timeout, default 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Whether a 429 gets its single automatic retry, default on.
    pub fn retry_on_rate_limit(mut self, enabled: bool) -> Self {
        self.config.retry_on_rate_limit = enabled;
        self
    }

    /// Whether a 401 gets its single refresh-and-retry, default on.
    pub fn retry_on_unauthorized(mut self, enabled: bool) -> Self {
        self.config.retry_on_unauthorized = enabled;
        self
    }

    /// Market applied when a market-aware call passes none.
    pub fn default_market(mut self, market: impl Into<String>) -> Self {
        self.config.default_market = Some(market.into());
        self
    }

    /// Overrides the API base URL. Tests point this at a local server.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    /// Overrides the OAuth authorization endpoint.
    pub fn authorize_url(mut self, url: impl Into<String>) -> Self {
        self.config.authorize_url = url.into();
        self
    }

    /// Overrides the OAuth token endpoint.
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.config.token_url = url.into();
        self
    }

    /// Seeds the client with an already-obtained token.
    pub fn token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    /// Attaches an external credential store; every newly obtained or
    /// refreshed token is pushed into it.
    pub fn token_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<SpotifyClient> {
        let http = reqwest::Client::builder().build().map_err(Error::Http)?;
        let authenticator = Authenticator::new(http.clone(), self.grant, &self.config);

        Ok(SpotifyClient {
            http,
            config: self.config,
            store: TokenStore::with_token(self.token),
            authenticator,
            cache: self.cache,
        })
    }
}
