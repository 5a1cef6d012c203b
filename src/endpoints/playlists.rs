//! Playlist lookups and modification.

use crate::{
    Result,
    client::SpotifyClient,
    endpoints::{resolve_market, to_body, validate_limit},
    error::Error,
    request::RequestSpec,
    types::{
        AddItemsRequest, AddItemsResponse, CreatePlaylistRequest, Page, Playlist, PlaylistItem,
        SimplifiedPlaylist,
    },
};

/// Playlist items are added in batches of at most 100.
const MAX_ITEMS: usize = 100;

/// Playlist endpoints, borrowed off [`SpotifyClient::playlists`].
pub struct Playlists<'a> {
    client: &'a SpotifyClient,
}

impl<'a> Playlists<'a> {
    pub(crate) fn new(client: &'a SpotifyClient) -> Self {
        Playlists { client }
    }

    /// Fetches one playlist by id, including its first page of items.
    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Playlist> {
        let spec = RequestSpec::get(format!("/playlists/{id}"))
            .query_opt("market", resolve_market(self.client, market));
        self.client.fetch(&spec).await
    }

    /// Fetches one page of a playlist's items. Entries the provider can no
    /// longer resolve have a `None` track.
    pub async fn items(
        &self,
        id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Page<PlaylistItem>> {
        validate_limit(limit)?;
        let spec = RequestSpec::get(format!("/playlists/{id}/tracks"))
            .query_opt("limit", limit)
            .query_opt("offset", offset)
            .query_opt("market", resolve_market(self.client, market));
        self.client.fetch(&spec).await
    }

    /// Fetches one page of the current user's playlists.
    pub async fn current_user_playlists(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Page<SimplifiedPlaylist>> {
        validate_limit(limit)?;
        let spec = RequestSpec::get("/me/playlists")
            .query_opt("limit", limit)
            .query_opt("offset", offset)
            .scopes(&["playlist-read-private"]);
        self.client.fetch(&spec).await
    }

    /// Creates a playlist owned by `user_id`.
    pub async fn create(&self, user_id: &str, request: &CreatePlaylistRequest) -> Result<Playlist> {
        if request.name.trim().is_empty() {
            return Err(Error::Validation(
                "playlist name cannot be empty".to_string(),
            ));
        }
        let spec = RequestSpec::post(format!("/users/{user_id}/playlists"))
            .body(to_body(request)?)
            .scopes(&["playlist-modify-private", "playlist-modify-public"]);
        self.client.fetch(&spec).await
    }

    /// Appends up to 100 items to a playlist and returns the new snapshot
    /// id.
    pub async fn add_items(&self, id: &str, request: &AddItemsRequest) -> Result<String> {
        if request.uris.is_empty() {
            return Err(Error::Validation(
                "at least one item uri is required".to_string(),
            ));
        }
        if request.uris.len() > MAX_ITEMS {
            return Err(Error::Validation(format!(
                "at most {MAX_ITEMS} items per call, got {}",
                request.uris.len()
            )));
        }
        let spec = RequestSpec::post(format!("/playlists/{id}/tracks"))
            .body(to_body(request)?)
            .scopes(&["playlist-modify-private", "playlist-modify-public"]);
        let response: AddItemsResponse = self.client.fetch(&spec).await?;
        Ok(response.snapshot_id)
    }
}
