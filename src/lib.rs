//! Spotikit: a typed async client library for the Spotify Web API.
//!
//! The crate wraps the provider's REST endpoints in typed methods and
//! handles everything around them: OAuth 2.0 grant flows (client
//! credentials, authorization code, PKCE, implicit), token storage and
//! refresh, bearer-header injection, per-request timeouts, bounded retries
//! on rate limits and expired tokens, and pagination helpers. All real
//! logic stays with the remote service.
//!
//! # Modules
//!
//! - `auth` - OAuth grant flows, redirect parsing and the local listener
//! - `client` - The client, its builder and the endpoint accessors
//! - `config` - Per-client options and environment lookups
//! - `endpoints` - Typed wrappers, one struct per resource group
//! - `error` - The failure taxonomy
//! - `executor` - The request chokepoint with the bounded retry policy
//! - `request` - Request descriptions built by the wrappers
//! - `token` - The token, its store and the persistence seam
//! - `types` - Models mirroring the provider's JSON
//!
//! # Example
//!
//! ```
//! use spotikit::{AuthorizationGrant, SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spotikit::Result<()> {
//!     let grant = AuthorizationGrant::client_credentials_from_env()?;
//!     let client = SpotifyClient::new(grant)?;
//!
//!     let albums = client
//!         .artists()
//!         .albums("4NHQUGzhtTLFvgF5SZesLK", &Default::default(), Some(20), None, None)
//!         .await?;
//!     for album in &albums.items {
//!         println!("{} ({})", album.name, album.release_date);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod request;
pub mod token;
pub mod types;

pub use auth::{Authenticator, AuthorizationGrant, AuthorizationRequest, RedirectListener};
pub use client::{SpotifyClient, SpotifyClientBuilder};
pub use config::ClientConfig;
pub use endpoints::{AlbumGroup, AlbumGroups};
pub use error::Error;
pub use request::RequestSpec;
pub use token::{Token, TokenCache, TokenStore};

/// Result type used across the crate, carrying the typed failure taxonomy
/// of [`error::Error`].
pub type Result<T> = std::result::Result<T, Error>;
