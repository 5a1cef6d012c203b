//! Local redirect listener for native applications.
//!
//! A convenience built on top of the redirect-parsing seam, not a
//! dependency of the core: applications with their own redirect handling
//! (mobile deep links, hosted callbacks) never touch this. For everything
//! else, [`RedirectListener`] binds a loopback address, serves the
//! provider's redirect on `/callback`, and hands the captured redirect URL
//! back to the caller.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Extension, Router, extract::RawQuery, response::Html, routing::get};
use tokio::{sync::Mutex, task::JoinHandle, time::Instant};

use crate::{Result, error::Error};

type CapturedQuery = Arc<Mutex<Option<String>>>;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A running one-shot HTTP server waiting for the provider redirect.
pub struct RedirectListener {
    addr: SocketAddr,
    captured: CapturedQuery,
    server: JoinHandle<()>,
}

impl RedirectListener {
    /// Binds `addr` (e.g. `127.0.0.1:8080`, or port 0 for an ephemeral
    /// port) and starts serving `/callback`. The registered redirect URI
    /// must point at the bound address.
    pub async fn bind(addr: &str) -> Result<Self> {
        let captured: CapturedQuery = Arc::new(Mutex::new(None));

        let app = Router::new()
            .route("/health", get(health))
            .route(
                "/callback",
                get(callback).layer(Extension(Arc::clone(&captured))),
            );

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(RedirectListener {
            addr,
            captured,
            server,
        })
    }

    /// The address the listener actually bound, with the resolved port.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Waits until the provider redirect arrives and returns the full
    /// redirect URL, or times out. Consumes the listener; the server is
    /// shut down either way.
    pub async fn wait(self, timeout: Duration) -> Result<String> {
        let start = Instant::now();

        while start.elapsed() < timeout {
            {
                let captured = self.captured.lock().await;
                if let Some(query) = captured.as_ref() {
                    return Ok(format!("http://{}/callback?{}", self.addr, query));
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Err(Error::Timeout { after: timeout })
    }
}

impl Drop for RedirectListener {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn health() -> Html<&'static str> {
    Html("OK")
}

async fn callback(
    RawQuery(query): RawQuery,
    Extension(captured): Extension<CapturedQuery>,
) -> Html<&'static str> {
    let mut slot = captured.lock().await;
    *slot = Some(query.unwrap_or_default());
    Html("<h2>Authentication complete.</h2><p>You can close this window.</p>")
}
