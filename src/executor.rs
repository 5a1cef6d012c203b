//! Request execution: the single chokepoint every endpoint call passes
//! through.
//!
//! [`SpotifyClient::execute`] resolves the token (refreshing it first when
//! it is missing or expired), attaches the bearer header, applies the
//! per-request timeout and runs the bounded retry policy: at most one
//! retry for a 429, honoring `Retry-After`, and at most one
//! refresh-and-retry for a 401. Everything else propagates immediately;
//! there is no circuit breaker and no backoff beyond that.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    Result,
    client::SpotifyClient,
    config,
    error::Error,
    request::RequestSpec,
    token::Token,
    types::{ApiErrorBody, CursorPage, Page},
};

impl SpotifyClient {
    /// Issues one request and returns the raw response body.
    ///
    /// The contract, in order:
    /// 1. Resolve the current token; refresh first if missing or expired.
    /// 2. Attach the bearer header, send with the configured timeout.
    /// 3. On 429: wait for `Retry-After` (or the fixed fallback) and retry
    ///    once; a second 429, a disabled retry or an oversized hint
    ///    surfaces [`Error::RateLimited`].
    /// 4. On 401: refresh the token and retry once; a second 401 surfaces
    ///    [`Error::Auth`].
    /// 5. On timeout: surface [`Error::Timeout`], no retry.
    /// 6. On any other non-2xx (5xx included): surface [`Error::Api`] with
    ///    the provider's error payload, no retry.
    /// 7. On success: return the body bytes for decoding.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<Vec<u8>> {
        let mut token = self.ensure_token().await?;
        warn_on_missing_scopes(spec, &token);

        let timeout = self.config().timeout;
        let mut retried_rate_limit = false;
        let mut retried_unauthorized = false;

        loop {
            let url = spec.url(&self.config().api_base_url)?;
            log::debug!("{} {}", spec.method(), url);

            let mut request = self
                .http()
                .request(spec.method().clone(), url)
                .bearer_auth(&token.access_token)
                .timeout(timeout);
            if let Some(body) = spec.request_body() {
                request = request.json(body);
            }

            let response = request.send().await.map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout { after: timeout }
                } else {
                    Error::Http(e)
                }
            })?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = parse_retry_after(response.headers());
                if retried_rate_limit || !self.config().retry_on_rate_limit {
                    return Err(Error::RateLimited { retry_after });
                }
                let wait = retry_after.unwrap_or(config::RATE_LIMIT_FALLBACK);
                if wait > config::RETRY_AFTER_CEILING {
                    return Err(Error::RateLimited { retry_after });
                }
                log::warn!("rate limited, retrying in {}s", wait.as_secs());
                sleep(wait).await;
                retried_rate_limit = true;
                continue;
            }

            if status == StatusCode::UNAUTHORIZED {
                if retried_unauthorized || !self.config().retry_on_unauthorized {
                    return Err(Error::Auth {
                        code: "unauthorized".to_string(),
                        description: read_error_message(response).await,
                    });
                }
                log::warn!("request was unauthorized, refreshing token and retrying");
                token = self.refresh_token().await?;
                retried_unauthorized = true;
                continue;
            }

            if !status.is_success() {
                return Err(Error::Api {
                    status: status.as_u16(),
                    message: read_error_message(response).await,
                });
            }

            let body = response.bytes().await.map_err(Error::Http)?;
            return Ok(body.to_vec());
        }
    }

    /// Executes a spec and decodes the body into `T`. A body that does not
    /// match the expected shape surfaces [`Error::Decode`].
    pub async fn fetch<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<T> {
        let body = self.execute(spec).await?;
        serde_json::from_slice(&body).map_err(Error::Decode)
    }

    /// Like [`fetch`](Self::fetch), but maps an empty body (204, or a 200
    /// with nothing in it) to `None`. Playback endpoints answer this way
    /// when no device is active.
    pub async fn fetch_optional<T: DeserializeOwned>(
        &self,
        spec: &RequestSpec,
    ) -> Result<Option<T>> {
        let body = self.execute(spec).await?;
        if body.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&body).map(Some).map_err(Error::Decode)
    }

    /// Executes a spec and discards the body. For the playback-control
    /// endpoints that answer with nothing.
    pub async fn send(&self, spec: &RequestSpec) -> Result<()> {
        self.execute(spec).await.map(|_| ())
    }

    /// Fetches the page after `page`, following the provider-issued
    /// absolute `next` URL as-is. `None` when this was the last page.
    pub async fn next_page<T: DeserializeOwned>(&self, page: &Page<T>) -> Result<Option<Page<T>>> {
        match &page.next {
            Some(next) => self.fetch(&RequestSpec::get_absolute(next)).await.map(Some),
            None => Ok(None),
        }
    }

    /// Fetches the page before `page`. `None` when this was the first
    /// page.
    pub async fn previous_page<T: DeserializeOwned>(
        &self,
        page: &Page<T>,
    ) -> Result<Option<Page<T>>> {
        match &page.previous {
            Some(previous) => self
                .fetch(&RequestSpec::get_absolute(previous))
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    /// Fetches the cursor page after `page`. `None` when the cursor is
    /// exhausted. Only valid for endpoints whose pages arrive unwrapped;
    /// the followed-artists envelope pages through its own wrapper method.
    pub async fn next_cursor_page<T: DeserializeOwned>(
        &self,
        page: &CursorPage<T>,
    ) -> Result<Option<CursorPage<T>>> {
        match &page.next {
            Some(next) => self.fetch(&RequestSpec::get_absolute(next)).await.map(Some),
            None => Ok(None),
        }
    }
}

/// Declared scopes are advisory: a token whose scope set is non-empty but
/// missing one gets a warning, nothing more. The provider stays
/// authoritative on what the token may do.
fn warn_on_missing_scopes(spec: &RequestSpec, token: &Token) {
    if token.scopes.is_empty() {
        return;
    }
    for scope in spec.required_scopes() {
        if !token.has_scope(scope) {
            log::warn!("token does not carry declared scope {scope}; the provider may refuse");
        }
    }
}

fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get("retry-after")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Pulls the provider's error message out of a non-2xx response, falling
/// back to the raw body when it is not the documented error shape.
async fn read_error_message(response: reqwest::Response) -> String {
    let raw = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiErrorBody>(&raw) {
        Ok(body) => body.error.message,
        Err(_) => raw,
    }
}
