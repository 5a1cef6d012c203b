//! Typed wrappers over the provider's REST endpoints.
//!
//! One struct per resource group, each borrowed off the client
//! (`client.artists()`, `client.player()`, ...). Every method builds a
//! [`RequestSpec`](crate::request::RequestSpec) from typed parameters,
//! validating cardinality limits before any network traffic, and decodes
//! the executor's bytes into the models of [`crate::types`]. Bulk lookups
//! keep the provider's per-id `null` semantics as `Vec<Option<T>>`.

pub mod albums;
pub mod artists;
pub mod follow;
pub mod player;
pub mod playlists;
pub mod shows;
pub mod users;

pub use albums::Albums;
pub use artists::{AlbumGroup, AlbumGroups, Artists};
pub use follow::Follow;
pub use player::Player;
pub use playlists::Playlists;
pub use shows::Shows;
pub use users::Users;

use serde::Serialize;

use crate::{Result, client::SpotifyClient, error::Error};

/// Paged endpoints accept 1 to 50 items per page.
pub(crate) fn validate_limit(limit: Option<u32>) -> Result<()> {
    match limit {
        Some(limit) if !(1..=50).contains(&limit) => Err(Error::Validation(format!(
            "limit must be between 1 and 50, got {limit}"
        ))),
        _ => Ok(()),
    }
}

/// Bulk calls fail fast when the id list is empty or exceeds the
/// provider's documented limit for the resource.
pub(crate) fn validate_id_count(ids: &[&str], max: usize, resource: &str) -> Result<()> {
    if ids.is_empty() {
        return Err(Error::Validation(format!(
            "at least one {resource} id is required"
        )));
    }
    if ids.len() > max {
        return Err(Error::Validation(format!(
            "at most {max} {resource} ids per call, got {}",
            ids.len()
        )));
    }
    Ok(())
}

pub(crate) fn join_ids(ids: &[&str]) -> String {
    ids.join(",")
}

/// The per-call market, falling back to the client's default market.
pub(crate) fn resolve_market(client: &SpotifyClient, market: Option<&str>) -> Option<String> {
    market
        .map(str::to_string)
        .or_else(|| client.config().default_market.clone())
}

pub(crate) fn to_body<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| Error::Validation(format!("failed to encode request body: {e}")))
}
